//! Board configuration
//!
//! Loaded from TOML or YAML; every field has a default so an empty file is
//! a valid configuration.

use crate::error::ConfigError;
use crate::gate::Passcodes;
use crate::types::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Expected passcodes for the add and delete gates
    pub passcodes: Passcodes,
    /// View shown at startup
    pub default_view: ViewMode,
    /// Seed file replacing the built-in columns and entries
    pub seed_path: Option<PathBuf>,
}

impl BoardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_passcodes(mut self, passcodes: Passcodes) -> Self {
        self.passcodes = passcodes;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_default_view(mut self, view: ViewMode) -> Self {
        self.default_view = view;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Malformed TOML or an invalid configuration.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML text
    ///
    /// # Errors
    /// Malformed YAML or an invalid configuration.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// A relative `seed_path` is resolved against the config file's directory.
    ///
    /// # Errors
    /// I/O failure, unknown extension or invalid contents.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let mut config = match ext.as_str() {
            "toml" => Self::from_toml_str(&raw)?,
            "yaml" | "yml" => Self::from_yaml_str(&raw)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        if let (Some(seed), Some(dir)) = (config.seed_path.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = dir.join(&*seed);
            }
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Reject passcodes that could never be typed
    ///
    /// # Errors
    /// An empty passcode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.passcodes.add.is_empty() || self.passcodes.delete.is_empty() {
            return Err(ConfigError::Invalid("passcodes must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            passcodes: Passcodes::default(),
            default_view: ViewMode::Board,
            seed_path: None,
        }
    }
}
