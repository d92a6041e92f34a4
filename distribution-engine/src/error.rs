//! Error types for the distribution engine

use thiserror::Error;

/// Result type for distribution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Distribution engine error
#[derive(Debug, Error)]
pub enum Error {
    /// Pattern is not one of the recognized allocation policies
    #[error("Unsupported distribution pattern: {0}")]
    UnsupportedPolicy(String),

    /// `custom` pattern requested without any custom weights
    #[error("Custom distribution pattern requires a non-empty custom_weights map")]
    MissingCustomWeights,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the caller should prompt for input rather than treat this as
    /// a fatal misconfiguration
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MissingCustomWeights)
    }
}
