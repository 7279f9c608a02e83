//! Configuration management for `safelog-core`.
//!
//! The scrubber itself needs nothing beyond a sink. This module covers the optional
//! knobs around it (a cap on the pending buffer, where the CLI writes its output)
//! and handles loading them from YAML.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::SafelogError;

/// File name looked up inside the platform config directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Settings for a single `LogScrubber`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrubberConfig {
    /// Upper bound on buffered bytes without a newline. When exceeded, the
    /// buffered tail is scrubbed and emitted as a line of its own.
    /// `None` keeps everything until a newline arrives.
    pub max_pending_bytes: Option<usize>,
}

/// Where the CLI sends scrubbed output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file. `None` means stdout.
    pub path: Option<PathBuf>,
    /// Append to `path` instead of truncating it.
    pub append: bool,
    /// Scrub and emit an unterminated final line when the input ends.
    pub finish_on_eof: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            append: false,
            finish_on_eof: true,
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SafelogConfig {
    pub scrubber: ScrubberConfig,
    pub output: OutputConfig,
}

impl SafelogConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| SafelogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SafelogConfig =
            serde_yml::from_str(&text).map_err(|source| SafelogError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        debug!(
            "Configuration loaded: max_pending_bytes={:?}, finish_on_eof={}",
            config.scrubber.max_pending_bytes, config.output.finish_on_eof
        );
        Ok(config)
    }

    /// Platform config location, e.g. `~/.config/safelog/config.yaml` on Linux.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("safelog").join(DEFAULT_CONFIG_FILE))
    }

    /// Loads `explicit` if given, else the default location if it exists, else
    /// falls back to built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(path),
            _ => {
                debug!("No configuration file found, using defaults.");
                Ok(Self::default())
            }
        }
    }

    /// Rejects settings the scrubber cannot honour.
    pub fn validate(&self) -> Result<(), SafelogError> {
        if self.scrubber.max_pending_bytes == Some(0) {
            return Err(SafelogError::InvalidConfig(
                "scrubber.max_pending_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
