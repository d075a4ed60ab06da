//! Shared error type across promtext crates.

use thiserror::Error;

/// Stable error codes, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Metric options or config file rejected.
    Configuration,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Observation rejected by a metric kind.
    InvalidObservation,
    /// Config file could not be read.
    Io,
}

impl ErrorKind {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::InvalidObservation => "INVALID_OBSERVATION",
            ErrorKind::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromTextError>;

/// Unified error type used by the core and the metric kinds.
#[derive(Debug, Error)]
pub enum PromTextError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid observation: {0}")]
    InvalidObservation(String),
    #[error("io: {0}")]
    Io(String),
}

impl PromTextError {
    /// Map the error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromTextError::Configuration(_) => ErrorKind::Configuration,
            PromTextError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            PromTextError::InvalidObservation(_) => ErrorKind::InvalidObservation,
            PromTextError::Io(_) => ErrorKind::Io,
        }
    }
}
