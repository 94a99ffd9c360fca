//! Run settings
//!
//! One `ConcolicConfig` per test run. Every section has defaults matching the
//! behaviour of an unconfigured run, so an empty YAML document (apart from
//! `version`) is valid.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::features::data_access::Lookup;

/// Default token sentinel
pub const DEFAULT_TAG: &str = "CoNcOlIc::";

/// Default simulated host
pub const DEFAULT_SERVER_NAME: &str = "concolic.io";

/// Symbolic Value Bridge settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Sentinel prefix of every token
    pub tag: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

/// Mutation Testing Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MutationConfig {
    /// Operator set mutations are drawn from
    pub operators: Vec<Lookup>,

    /// Turn a FieldError on the original filter into an empty result
    pub suppress_field_errors: bool,

    /// Record empty reports for calls mutation skipped
    pub record_skipped: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            operators: Lookup::MUTABLE.to_vec(),
            suppress_field_errors: false,
            record_skipped: true,
        }
    }
}

impl MutationConfig {
    /// Builder: replace the operator set
    pub fn operators(mut self, operators: impl IntoIterator<Item = Lookup>) -> Self {
        self.operators = operators.into_iter().collect();
        self
    }

    /// Builder: toggle defensive FieldError suppression
    pub fn suppress_field_errors(mut self, suppress: bool) -> Self {
        self.suppress_field_errors = suppress;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.operators.len() < 2 {
            return Err(ConfigError::EmptyOperatorSet);
        }
        let mut seen = Vec::with_capacity(self.operators.len());
        for op in &self.operators {
            if !op.is_mutable() {
                return Err(ConfigError::UnknownOperator(op.as_str().to_string()));
            }
            if seen.contains(op) {
                return Err(ConfigError::DuplicateOperator(op.as_str().to_string()));
            }
            seen.push(*op);
        }
        Ok(())
    }
}

/// Simulated client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub server_name: String,
    pub url_scheme: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            url_scheme: "http".to_string(),
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConcolicConfig {
    pub bridge: BridgeConfig,
    pub mutation: MutationConfig,
    pub client: ClientConfig,
}

impl ConcolicConfig {
    /// Builder: override the mutation section
    pub fn with_mutation(mut self, mutation: MutationConfig) -> Self {
        self.mutation = mutation;
        self
    }

    /// Builder: override the token sentinel
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.bridge.tag = tag.into();
        self
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bridge.tag.is_empty() {
            return Err(ConfigError::EmptyTag);
        }
        self.mutation.validate()
    }
}
