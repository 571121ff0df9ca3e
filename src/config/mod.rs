mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::io::ErrorKind;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => from_yaml_str(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    config.apply_overrides(env::var("GEMINI_API_KEY").ok(), env::var("GEMINI_MODEL").ok());
    config.validate()?;

    Ok(config)
}

pub fn from_yaml_str(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not an empty map
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

impl Config {
    /// Environment values win over the file when present and non-empty.
    pub fn apply_overrides(&mut self, api_key: Option<String>, model: Option<String>) {
        if let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.gemini.api_key = api_key;
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.gemini.model = model;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(Error::config(
                "Gemini API key is not set (use GEMINI_API_KEY or gemini.api_key)",
            ));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(Error::config("gemini.model must not be empty"));
        }
        if self.server.max_upload_bytes == Some(0) {
            return Err(Error::config("server.max_upload_bytes must be greater than zero"));
        }
        self.server
            .logs
            .level
            .parse::<LevelFilter>()
            .map_err(|_| {
                Error::config(format!(
                    "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                    self.server.logs.level
                ))
            })?;
        Ok(())
    }
}
