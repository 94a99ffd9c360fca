//! Error types for concolic-core
//!
//! Provides unified error handling across the crate.
//!
//! Two classes of condition share this enum:
//! - hard errors (`NotFound`, `Field`, `Store`, ...) which always propagate
//! - soft conditions (`Decode`, `UnsupportedPredicate`) which only surface
//!   through the `try_*` entry points; the default paths log them and degrade

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for concolic-core operations
#[derive(Debug, Error)]
pub enum ConcolicError {
    /// No view in the view map matched the path
    #[error("No view matches path '{path}'")]
    NotFound { path: String },

    /// Invalid filter predicate for the model (unknown field, bad lookup)
    #[error("Field error: {0}")]
    Field(String),

    /// Inbound token carries a kind the symbolic library cannot rebuild
    #[error("Cannot decode token '{token}': unknown symbolic kind '{kind}'")]
    Decode { kind: String, token: String },

    /// Filter shape the mutation engine does not handle
    #[error("Unsupported predicate: {0}")]
    UnsupportedPredicate(String),

    /// `get()` matched no entity
    #[error("{0} matching query does not exist")]
    DoesNotExist(String),

    /// `get()` matched more than one entity
    #[error("get() returned more than one {model} -- it returned {count}")]
    MultipleObjectsReturned { model: String, count: usize },

    /// Backend failure (SQLite, lock poisoning, ...)
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid path pattern of a `RegexView`
    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConcolicError {
    /// Create a not-found error for a path
    pub fn not_found(path: impl Into<String>) -> Self {
        ConcolicError::NotFound { path: path.into() }
    }

    /// Create a field error
    pub fn field(msg: impl Into<String>) -> Self {
        ConcolicError::Field(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        ConcolicError::Store(msg.into())
    }

    /// True for conditions the default paths degrade on instead of aborting
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            ConcolicError::Decode { .. } | ConcolicError::UnsupportedPredicate(_)
        )
    }
}

/// Result type alias for concolic operations
pub type Result<T> = std::result::Result<T, ConcolicError>;
