//! Unified error handling for the seotrend crate
//!
//! A single [`Error`] enum wraps the domain-specific analysis error and the
//! configuration-loading failures, with an [`ErrorCategory`] classification
//! so callers can map errors to handling strategies (the API layer maps
//! `Validation` to a client-visible 400-equivalent response).

use thiserror::Error;

pub use crate::analytics::AnalysisError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller-supplied input failed validation
    Validation,
    /// Configuration loading or validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the seotrend crate
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot validation and analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Analysis(_) => ErrorCategory::Validation,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Check if this error is recoverable (can be retried).
    ///
    /// Every error this crate produces is deterministic for a given input,
    /// so retrying without changing the input or configuration cannot help.
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

// Conversion from anyhow::Error (config loading uses anyhow context chains)
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
