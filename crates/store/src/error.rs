//! Infrastructure error model for the storage and order ports.

use thiserror::Error;

use treadstock_core::DomainError;

/// Result type used across the store ports.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage and collaborator failures.
///
/// Domain failures pass through as [`StoreError::Domain`] so callers can keep
/// telling validation problems apart from broken files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No catalog could be loaded from any candidate location.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The order collaborator refused the request.
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}
