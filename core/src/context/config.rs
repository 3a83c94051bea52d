//! Persisted application configuration.
//!
//! Two display knobs, passed through unmodified to whatever renders summary
//! lines; nothing in the tracking core reads them.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

const APP_NAME: &str = "dutywatch";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix every printed summary line with the plugin label.
    #[serde(default)]
    pub include_plugin_label: bool,
    /// Skip statistics whose value is zero (wipeless clears, deathless runs).
    #[serde(default = "default_suppress")]
    pub suppress_empty_values: bool,
}

fn default_suppress() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            include_plugin_label: false,
            suppress_empty_values: true,
        }
    }
}

impl AppConfig {
    /// Load the stored configuration, falling back to defaults on any failure.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_default()
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self).map_err(ConfigError::Save)
    }
}
