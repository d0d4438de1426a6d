//! Configuration loading and validation for the console.
//!
//! Uses serde_yaml to load YAML configuration files with support for
//! an environment variable override of the API base URL.

mod api;
mod app;
mod control;
mod duration;
mod error;
mod opportunities;
mod poller;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use app::{AppConfig, Environment};
pub use control::ControlConfig;
pub use error::ConfigError;
pub use opportunities::OpportunitiesConfig;
pub use poller::{DEFAULT_POLL_INTERVAL, PollerConfig};

use serde::Deserialize;
use std::{env, fs};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "KINK_HUNTER_API_URL";

/// Root configuration structure.
///
/// Required sections: app.
/// Optional sections: api, poller, opportunities, control.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Remote service endpoint and transport limits.
    #[serde(default)]
    pub api: ApiConfig,
    /// Status refresh loop.
    #[serde(default)]
    pub poller: PollerConfig,
    /// Opportunity scan filters.
    #[serde(default)]
    pub opportunities: OpportunitiesConfig,
    /// Start/stop defaults.
    #[serde(default)]
    pub control: ControlConfig,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Loads `.env` first (if present), then the YAML file, then applies
    /// `KINK_HUNTER_API_URL` on top of `api.base_url`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_string(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;

        if let Ok(url) = env::var(API_URL_ENV) {
            config.apply_api_url_override(url);
        }
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from YAML text without touching the environment.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_api_url_override(&mut self, url: String) {
        let url = url.trim();
        if !url.is_empty() {
            self.api.base_url = url.trim_end_matches('/').to_string();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                url
            )));
        }

        if self.poller.interval.is_zero() {
            return Err(ConfigError::Validation(
                "poller.interval must be positive".into(),
            ));
        }

        if self.opportunities.display_limit == 0 {
            return Err(ConfigError::Validation(
                "opportunities.display_limit must be positive".into(),
            ));
        }

        Ok(())
    }
}
