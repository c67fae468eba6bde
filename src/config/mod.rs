use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub mod policy;
pub use policy::TransitionPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration: i64,
    pub bcrypt_cost: u32,
    pub request_timeout: u64,
    pub transition_policy: TransitionPolicy,
    pub flash_ttl_secs: u64,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Seeded at startup when all three ADMIN_* variables are present
    pub admin_bootstrap: Option<AdminBootstrap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown LOG_FORMAT: {}", other)),
        }
    }
}

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if environment == "production" && jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} bytes in production",
                MIN_PRODUCTION_SECRET_LEN
            ));
        }

        let admin_bootstrap = match (
            env::var("ADMIN_USERNAME"),
            env::var("ADMIN_EMAIL"),
            env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(AdminBootstrap {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Config {
            environment,
            port: parse_var("PORT", 8080)?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            max_connections: parse_var("MAX_CONNECTIONS", 10)?,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 86400)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            request_timeout: parse_var("REQUEST_TIMEOUT", 30)?,
            transition_policy: parse_var("ORDER_TRANSITION_POLICY", TransitionPolicy::Strict)?,
            flash_ttl_secs: parse_var("FLASH_TTL_SECS", 60)?,
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "marketplace_api=debug,tower_http=debug".to_string()),
            log_format: parse_var("LOG_FORMAT", LogFormat::Pretty)?,
            admin_bootstrap,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Read an optional variable, falling back to `default` when unset.
/// A value that is present but unparsable is an error.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by in-process router tests.
    pub fn for_tests() -> Self {
        Config {
            environment: "test".to_string(),
            port: 0,
            database_url: String::new(),
            max_connections: 1,
            jwt_secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            jwt_expiration: 3600,
            bcrypt_cost: 4,
            request_timeout: 5,
            transition_policy: TransitionPolicy::Strict,
            flash_ttl_secs: 60,
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
            admin_bootstrap: None,
        }
    }
}
