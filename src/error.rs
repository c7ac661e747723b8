//! piiscan error types

use thiserror::Error;

/// piiscan error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A recognizer pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Document rejected before scanning
    #[error("Intake error: {0}")]
    Intake(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for piiscan operations
pub type Result<T> = std::result::Result<T, Error>;
