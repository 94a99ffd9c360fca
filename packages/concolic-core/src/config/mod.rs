//! Configuration System
//!
//! A test run is configured by one `ConcolicConfig`, built in code or loaded
//! from a versioned YAML file:
//!
//! ```yaml
//! version: 1
//! bridge:
//!   tag: "CoNcOlIc::"
//! mutation:
//!   operators: [lte, gte, gt, lt, exact]
//!   suppress_field_errors: false
//!   record_skipped: true
//! client:
//!   server_name: concolic.io
//!   url_scheme: http
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use concolic_core::config::{ConcolicConfig, MutationConfig};
//!
//! let config = ConcolicConfig::default()
//!     .with_mutation(MutationConfig::default().suppress_field_errors(true));
//! config.validate()?;
//!
//! let config = ConcolicConfig::from_yaml("concolic.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod settings;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, SUPPORTED_VERSIONS};
pub use settings::{
    BridgeConfig, ClientConfig, ConcolicConfig, MutationConfig, DEFAULT_SERVER_NAME, DEFAULT_TAG,
};
