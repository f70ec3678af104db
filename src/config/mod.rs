mod types;

pub use types::*;

use crate::{Error, Result};
use reqwest::Url;
use std::{env, io::ErrorKind, time::Duration};
use tracing::debug;

/// Environment variable holding the inference endpoint the gateway targets.
pub const INFERENCE_URL_ENV: &str = "KSERVE_URL";
pub const TIMEOUT_ENV: &str = "GATEWAY_TIMEOUT_SECS";
pub const MODEL_NAME_ENV: &str = "MODEL_NAME";

/// Loads the configuration file named by `CONFIG_PATH` (default `config.yaml`), then
/// applies environment overrides and validates the result.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_from(&config_path).await?;
    config.apply_overrides(|key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

/// Parses one YAML file. A missing file falls back to [`Config::default`].
pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

impl Config {
    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(INFERENCE_URL_ENV) {
            self.gateway.inference_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.gateway.timeout_secs = raw.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, raw))
            })?;
        }

        if let Some(name) = lookup(MODEL_NAME_ENV) {
            self.model.name = name;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.gateway.endpoint()?;

        if self.gateway.timeout_secs == 0 {
            return Err(Error::config("gateway.timeout_secs must be greater than zero"));
        }

        if self.model.name.trim().is_empty() {
            return Err(Error::config("model.name must not be empty"));
        }

        Ok(())
    }
}

impl GatewayConfig {
    /// Parsed inference endpoint; only absolute http(s) URLs are accepted.
    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.inference_url).map_err(|e| {
            Error::config(format!("Invalid inference_url '{}': {}", self.inference_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::config(format!(
                "inference_url must use http or https, got '{}'",
                other
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
