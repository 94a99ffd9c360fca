//! Error types for concolic-storage

use std::fmt;
use thiserror::Error;

use concolic_core::ConcolicError;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// SQLite errors
    Database,
    /// Model not registered with the store
    ModelNotFound,
    /// Unknown column or ill-typed value for a column
    Field,
    /// Duplicate primary key
    Constraint,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::ModelNotFound => "model_not_found",
            ErrorKind::Field => "field",
            ErrorKind::Constraint => "constraint",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn model_not_found(model: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ModelNotFound,
            format!("Model not found: {}", model.into()),
        )
    }

    pub fn field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Field, message)
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Constraint, message)
    }
}

// SQLite error conversions
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::database(format!("SQLite error: {}", err)).with_source(err)
    }
}

/// Column conversion failures come back from the core as field errors
impl From<ConcolicError> for StorageError {
    fn from(err: ConcolicError) -> Self {
        match err {
            ConcolicError::Field(message) => StorageError::field(message),
            other => StorageError::database(other.to_string()),
        }
    }
}

// Field errors stay hard FieldErrors once they cross into the core
impl From<StorageError> for ConcolicError {
    fn from(err: StorageError) -> Self {
        match err.kind {
            ErrorKind::Field => ConcolicError::Field(err.message),
            _ => ConcolicError::Store(err.to_string()),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;
