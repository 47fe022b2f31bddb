//! Rune transition configuration system
//!
//! This crate provides centralized configuration for presence transitions,
//! loading default timings and class-name settings from the `[transition]`
//! table of `rune.toml`, with environment variables as overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default enter/exit phase length when nothing is configured.
pub const DEFAULT_TIMEOUT_MS: f32 = 300.0;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`RuneConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Presence transition defaults
    pub transition: TransitionDefaults,
}

/// Defaults applied to every presence transition built from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionDefaults {
    /// Animate the first render of an element that starts present
    pub appear: bool,
    /// Length of the entering phase in milliseconds
    pub enter_timeout_ms: f32,
    /// Length of the exiting phase in milliseconds
    pub exit_timeout_ms: f32,
    /// Length of the appear phase (falls back to `enter_timeout_ms`)
    pub appear_timeout_ms: Option<f32>,
    /// Remove the element from the render tree once fully exited
    pub mount_on_demand: bool,
    /// Prefix used to derive phase class names (e.g. `fade` -> `fade-entering`)
    pub class_prefix: Option<String>,
}

impl Default for TransitionDefaults {
    fn default() -> Self {
        Self {
            appear: false,
            enter_timeout_ms: DEFAULT_TIMEOUT_MS,
            exit_timeout_ms: DEFAULT_TIMEOUT_MS,
            appear_timeout_ms: None,
            mount_on_demand: false,
            class_prefix: None,
        }
    }
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML source text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        let transition = &mut self.transition;

        if let Ok(val) = std::env::var("RUNE_TRANSITION_ENTER_MS") {
            if let Ok(ms) = val.parse::<f32>() {
                transition.enter_timeout_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("RUNE_TRANSITION_EXIT_MS") {
            if let Ok(ms) = val.parse::<f32>() {
                transition.exit_timeout_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("RUNE_TRANSITION_APPEAR_MS") {
            if let Ok(ms) = val.parse::<f32>() {
                transition.appear_timeout_ms = Some(ms);
            }
        }
        if let Ok(val) = std::env::var("RUNE_TRANSITION_APPEAR") {
            transition.appear = env_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_TRANSITION_MOUNT_ON_DEMAND") {
            transition.mount_on_demand = env_flag(&val);
        }
        if let Ok(prefix) = std::env::var("RUNE_TRANSITION_CLASS_PREFIX") {
            transition.class_prefix = if prefix.trim().is_empty() {
                None
            } else {
                Some(prefix)
            };
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}
