use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use marketplace_api::router::build_router;
use marketplace_api::startup::{initialize_app, init_tracing, shutdown_signal};
use marketplace_api::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let port = config.port;
    let app_state = initialize_app(config).await?;
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting marketplace API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
