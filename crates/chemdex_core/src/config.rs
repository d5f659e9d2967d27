//! Core configuration document.
//!
//! # Responsibility
//! - Parse the JSON config that callers (CLI, viewer host) pass to core.
//!
//! # Invariants
//! - Every section is optional; an empty object is a valid config.

use crate::logging::LogSettings;
use crate::registry::builder::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// File logging; `None` leaves logging uninitialized.
    pub logging: Option<LogSettings>,
    pub registry: RegistryConfig,
}

/// Config loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

pub fn parse_config(json: &str) -> Result<CoreConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<CoreConfig, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&json)
}
