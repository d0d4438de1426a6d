//! Bot control configuration.

use serde::Deserialize;

/// Defaults for start/stop commands.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlConfig {
    /// Preset id forwarded with start commands.
    #[serde(default = "default_preset")]
    pub preset: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
        }
    }
}

fn default_preset() -> String {
    "balanced".to_string()
}
