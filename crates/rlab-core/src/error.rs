//! Error types for the research board
//!
//! The taxonomy is narrow: nothing here is fatal to the process.
//! - Validation failures refuse an add
//! - Gate mismatches are retryable
//! - Configuration and seed errors surface at startup

use std::path::PathBuf;

/// Main board error type
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Required field missing on a draft
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Passcode gate refused or was not open
    #[error("gate: {0}")]
    Gate(#[from] GateError),

    /// Add form is not open
    #[error("no entry form is open; request an add and confirm the passcode first")]
    FormClosed,

    /// Label parsing failed
    #[error(transparent)]
    Parse(#[from] ParseLabelError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seed data error
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
}

impl BoardError {
    /// Check if the same action may succeed on another attempt
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Gate(GateError::IncorrectPasscode) | Self::Parse(_)
        )
    }

    /// Short message suitable for inline display next to the offending input
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Gate(e) => e.to_string(),
            Self::Validation(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Draft validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,

    #[error("notes are required")]
    EmptyNotes,
}

/// Passcode gate errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Submitted value did not match; the gate stays open
    #[error("Incorrect passcode")]
    IncorrectPasscode,

    /// No mutation is waiting for confirmation
    #[error("no pending action to confirm")]
    NotOpen,
}

/// Unknown label for one of the closed taxonomies
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    #[inline]
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Seed data loading errors
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported seed format: {0}")]
    UnsupportedFormat(String),

    #[error("duplicate entry id in seed: {0}")]
    DuplicateId(String),
}
