//! Application startup and initialization logic.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{Config, LogFormat};
use crate::database::{self, PgStore};

/// Install the global tracing subscriber. `RUST_LOG` wins over `LOG_LEVEL`.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Connect to the database, run migrations and create the AppState.
pub async fn initialize_app(config: Config) -> Result<AppState> {
    info!(
        environment = %config.environment,
        transition_policy = %config.transition_policy,
        "🚀 Starting marketplace API"
    );

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
    info!("✅ Prometheus metrics initialized");

    let db_pool = database::setup_database(&config.database_url, config.max_connections).await?;
    database::run_migrations(&db_pool).await?;

    let store = Arc::new(PgStore::new(db_pool));
    let admin_bootstrap = config.admin_bootstrap.clone();
    let app_state = AppState::new(config, store).with_metrics(metrics_handle);

    match admin_bootstrap {
        Some(admin) => {
            app_state
                .identity
                .bootstrap_admin(&admin)
                .await
                .map_err(|e| anyhow::anyhow!("Admin bootstrap failed: {}", e))?;
        }
        None => warn!("ADMIN_* variables not set; no admin account will be bootstrapped"),
    }

    info!("✅ Application state initialized");
    Ok(app_state)
}

/// Wait for SIGTERM or SIGINT signal for graceful shutdown
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
