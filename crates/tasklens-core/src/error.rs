//! Core error types for tasklens-core.
//!
//! The scoring and suggestion engines are total over well-typed input and
//! never return errors. Everything here belongs to the edges: loading task
//! snapshots, reading configuration, and validating request parameters.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tasklens-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist in the current snapshot
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Task id is not a version 1-5 UUID
    #[error("Invalid task id format: {0}")]
    InvalidTaskId(String),

    /// Two tasks in one snapshot share an id
    #[error("Duplicate task id in snapshot: {0}")]
    DuplicateTaskId(String),

    /// A task snapshot entry could not be decoded
    #[error("Invalid task snapshot at {location}: {message}")]
    InvalidSnapshot { location: String, message: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl CoreError {
    /// Shorthand for a missing task.
    pub fn task_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
