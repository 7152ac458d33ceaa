use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scroll config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What the animator does with an out-of-bounds focus change that arrives
/// while a slide is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetriggerPolicy {
    /// Ignore it; the running slide finishes untouched.
    #[default]
    Drop,
    /// Restart the slide from the current offset toward the new target.
    Supersede,
}

/// Application-facing scroll settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Slides per second; a slide lasts `1 / (scroll_speed + 0.01)` seconds.
    pub scroll_speed: f64,
    pub retrigger: RetriggerPolicy,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 1.0,
            retrigger: RetriggerPolicy::Drop,
        }
    }
}

impl ScrollConfig {
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&data)?;
        log::info!("loaded scroll config from {}", path.display());
        Ok(config)
    }
}
