//! Error types for the catalog search front end

use thiserror::Error;

/// Errors raised while loading a catalog or reading configuration
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using the search Error.
pub type Result<T> = std::result::Result<T, Error>;
