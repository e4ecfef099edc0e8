//! Environment configuration

use anyhow::{Context, Result};
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings read from the environment (and `.env`, if present)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let host = std::env::var("HOST").unwrap_or_else(|_| {
            warn!("HOST not set. Defaulting to {DEFAULT_HOST}");
            DEFAULT_HOST.to_string()
        });

        let port = parse_or_default("PORT", DEFAULT_PORT)?;
        let max_connections = parse_or_default("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
        })
    }

    /// Address to bind the HTTP listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or_default<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} must be a valid number, got: {value}")),
        Err(_) => {
            warn!("{name} not set. Defaulting to {default}");
            Ok(default)
        }
    }
}
