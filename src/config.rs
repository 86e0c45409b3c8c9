use std::env;
use anyhow::{Context, Result, bail};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub route_docs_enabled: bool,
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
            route_docs_enabled: true,
            seed_demo_data: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let service_port = match lookup("SERVICE_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("SERVICE_PORT must be a valid port number (0-65535)")?,
            None => defaults.service_port,
        };

        let service_host = lookup("SERVICE_HOST").unwrap_or(defaults.service_host);

        let route_docs_enabled = match lookup("ROUTE_DOCS_ENABLED") {
            Some(raw) => parse_flag(&raw).context("ROUTE_DOCS_ENABLED must be a boolean")?,
            None => defaults.route_docs_enabled,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(raw) => parse_flag(&raw).context("SEED_DEMO_DATA must be a boolean")?,
            None => defaults.seed_demo_data,
        };

        Ok(Config {
            service_port,
            service_host,
            route_docs_enabled,
            seed_demo_data,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Service listening on: {}", self.bind_address());
        tracing::info!(
            "  Route docs: {}",
            if self.route_docs_enabled { "enabled" } else { "disabled" }
        );
        tracing::info!(
            "  Demo data: {}",
            if self.seed_demo_data { "seeded" } else { "empty catalog" }
        );
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("expected true/false, got '{}'", other),
    }
}
