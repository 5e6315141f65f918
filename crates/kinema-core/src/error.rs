//! Error types for Kinema

use thiserror::Error;

/// The main error type for Kinema operations
///
/// Only boundary operations (documents, configuration, store insertion)
/// produce these. Per-tick evaluation absorbs its failure cases.
#[derive(Debug, Error)]
pub enum KinemaError {
    #[error("Duplicate object id: {0}")]
    DuplicateObjectId(String),

    #[error("Invalid property path: {0}")]
    InvalidPropertyPath(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Document error: {0}")]
    DocumentError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Kinema operations
pub type Result<T> = std::result::Result<T, KinemaError>;

impl From<toml::de::Error> for KinemaError {
    fn from(err: toml::de::Error) -> Self {
        KinemaError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for KinemaError {
    fn from(err: toml::ser::Error) -> Self {
        KinemaError::TomlSerError(err.to_string())
    }
}
