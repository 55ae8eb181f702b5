use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::history::DEFAULT_CAPACITY;
use crate::mode::Mode;

/// Session settings. Every key is optional:
///
/// ```toml
/// history-capacity = 10
/// error-indicator = "Error"
/// initial-mode = "basic"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    pub history_capacity: usize,
    pub error_indicator: String,
    pub initial_mode: Mode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            error_indicator: "Error".to_string(),
            initial_mode: Mode::Basic,
        }
    }
}

impl SessionConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text)?;
        config.history_capacity = config.history_capacity.max(1);
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), ?config, "loaded session config");
        Ok(config)
    }
}
