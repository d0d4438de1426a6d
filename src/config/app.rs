//! Console identity and logging.

use serde::Deserialize;

/// Deployment the console is pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Name shown in the startup log line.
    pub name: String,
    pub env: Environment,
    /// "trace", "debug", "info", "warn" or "error". `RUST_LOG` wins when set.
    pub log_level: Option<String>,
}
