//! Error types

use thiserror::Error;

/// Core errors shared by the engine crates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A forced category/intensity (or other caller-supplied selector) is not
    /// present in the loaded catalog. Callers should retry unconstrained.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The injected state store failed
    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Raised by external text generators, never by the core itself
    #[error("Generation error: {0}")]
    Generation(String),
}

impl Error {
    /// Whether the caller should fall back to unconstrained generation
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;
