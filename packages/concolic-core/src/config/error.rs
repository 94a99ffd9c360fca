//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Token sentinel must not be empty
    #[error("bridge.tag must not be empty: an empty sentinel would turn every form value into a token candidate")]
    EmptyTag,

    /// Operator outside the mutable set
    #[error("Operator '{0}' cannot be used for mutation. Valid operators: lte, gte, gt, lt, exact")]
    UnknownOperator(String),

    /// Operator listed twice
    #[error("Operator '{0}' is listed more than once in mutation.operators")]
    DuplicateOperator(String),

    /// No operators to mutate with
    #[error("mutation.operators must contain at least two operators")]
    EmptyOperatorSet,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
