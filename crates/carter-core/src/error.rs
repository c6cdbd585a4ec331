//! Error types for the Carter client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the backend library and the invocation bridge.
///
/// Variants are structured so they survive a trip across the bridge
/// (`Serialize`/`Deserialize`) and can be matched on by callers.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CarterError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Entity already exists
    #[error("Entity already exists: {entity_type} '{id}'")]
    AlreadyExists {
        entity_type: String,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// The library store has not been attached yet
    #[error("Database is not ready")]
    NotReady,

    /// A bridge command failed or does not exist
    #[error("Command '{command}' failed: {message}")]
    Invoke { command: String, message: String },

    /// The Carter API could not be reached or answered with an error
    #[error("Carter API error: {0}")]
    Api(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CarterError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates an AlreadyExists error
    pub fn already_exists(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Invoke error for the given command
    pub fn invoke(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invoke {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a NotReady error
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for CarterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CarterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CarterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CarterError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CarterError>`.
pub type Result<T> = std::result::Result<T, CarterError>;
