//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ide-bridge/ide-bridge.toml`
//! 3. Environment variables: `IDE_BRIDGE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{ProtocolOptions, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
use crate::application::ApplicationError;

/// Unified configuration for both bridge variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How long to wait for the editor's result file (default: 30000)
    pub timeout_ms: u64,
    /// Sleep between checks for the result file (default: 100)
    pub poll_interval_ms: u64,
    /// Write every result to the debug echo file (default: true)
    pub debug_echo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            debug_echo: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub timeout_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub debug_echo: Option<bool>,
}

/// Get the XDG config directory for ide-bridge.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ide-bridge").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ide-bridge.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn protocol_options(&self) -> ProtocolOptions {
        ProtocolOptions {
            timeout: self.timeout(),
            poll_interval: self.poll_interval(),
            debug_echo: self.debug_echo,
        }
    }

    /// Overlay explicitly specified values onto self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            timeout_ms: overlay.timeout_ms.unwrap_or(self.timeout_ms),
            poll_interval_ms: overlay.poll_interval_ms.unwrap_or(self.poll_interval_ms),
            debug_echo: overlay.debug_echo.unwrap_or(self.debug_echo),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/ide-bridge/ide-bridge.toml`
    /// 3. Environment variables: `IDE_BRIDGE_*` prefix
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using an explicit global config file (absent files are skipped).
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply IDE_BRIDGE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("IDE_BRIDGE")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            timeout_ms: optional(config.get::<u64>("timeout_ms"))?,
            poll_interval_ms: optional(config.get::<u64>("poll_interval_ms"))?,
            debug_echo: optional(config.get::<bool>("debug_echo"))?,
        };
        Ok(settings.merge_with(&raw))
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.poll_interval_ms == 0 {
            return Err(ApplicationError::Config {
                message: "poll_interval_ms must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

/// Treat a missing key as unset, but surface malformed values.
fn optional<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}
