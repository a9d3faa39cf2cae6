//! Dispatch configuration, read from the `[dispatch]` table of a TOML file.
//!
//! ```toml
//! [dispatch]
//! failure-mode = "continue"
//! max-depth = 8
//! log-values = true
//! ```

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// What happens when a hook returns `HookError::Failed`.
///
/// Rejections always stop the operation regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    /// Stop the stage and fail the operation.
    Abort,
    /// Record the failure, keep the field's pre-hook value and move on to the
    /// next field.
    Continue,
}

impl FromStr for FailureMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(FailureMode::Abort),
            "continue" => Ok(FailureMode::Continue),
            other => Err(ConfigError::Invalid(format!("unknown failure mode '{other}'"))),
        }
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureMode::Abort => "abort",
            FailureMode::Continue => "continue",
        })
    }
}

/// Dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DispatchConfig {
    #[serde(default)]
    pub failure_mode: FailureMode,
    /// Deepest block nesting accepted; collection fields are depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Include hook input/output values in debug logs.
    #[serde(default)]
    pub log_values: bool,
}

fn default_max_depth() -> usize {
    16
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            max_depth: default_max_depth(),
            log_values: false,
        }
    }
}

/// Raw TOML structure of the config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    dispatch: DispatchConfig,
}

impl DispatchConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        if file.dispatch.max_depth == 0 {
            return Err(ConfigError::Invalid("max-depth must be at least 1".into()));
        }
        Ok(file.dispatch)
    }

    /// Reads and parses a config file, returning any error.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reads a config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No dispatch config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded dispatch config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load dispatch config {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
