//! Configuration I/O (YAML loading)
//!
//! Defines the versioned YAML schema and the load/save entry points.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::settings::{BridgeConfig, ClientConfig, ConcolicConfig, MutationConfig};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub mutation: MutationConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

impl ConcolicConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = ConcolicConfig {
            bridge: file.bridge,
            mutation: file.mutation,
            client: file.client,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize as a v1 YAML document
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            bridge: self.bridge.clone(),
            mutation: self.mutation.clone(),
            client: self.client.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}
