use std::env;
use std::time::Duration;
use anyhow::{Context, Result};

/// The demo's fixed port. `SERVICE_PORT` overrides it only so that tests
/// and side-by-side runs can pick another one.
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// How long both delay handlers hold a request before answering.
pub const DELAY: Duration = Duration::from_millis(9000);

#[derive(Debug, Clone)]
pub struct Config {
    pub service_host: String,
    pub service_port: u16,
    pub delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_host: DEFAULT_HOST.to_string(),
            service_port: DEFAULT_PORT,
            delay: DELAY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// The delay is not configurable; only the bind address is.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Config {
            service_host,
            service_port,
            delay: DELAY,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Bind address: {}", self.bind_address());
        tracing::info!("  Delay: {} ms", self.delay.as_millis());
    }
}
