//! Store configuration
//!
//! Every field has a default, so a YAML file only needs the keys it wants to
//! override:
//!
//! ```yaml
//! default_type_version: "2.0"
//! indexed_keys: ["__type", "__type.name"]
//! ```

use crate::store::constants;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML syntax or shape error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Well-formed but unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeStoreConfig {
    /// Version tag given to definitions that carry none
    pub default_type_version: String,

    /// Label of the subtype -> supertype edge
    pub supertype_edge_label: String,

    /// Vertex property keys the in-memory engine keeps equality indices on
    pub indexed_keys: Vec<String>,
}

impl Default for TypeStoreConfig {
    fn default() -> Self {
        Self {
            default_type_version: constants::DEFAULT_TYPE_VERSION.to_string(),
            supertype_edge_label: constants::SUPERTYPE_EDGE_LABEL.to_string(),
            indexed_keys: vec![
                constants::VERTEX_TYPE_PROPERTY_KEY.to_string(),
                constants::TYPENAME_PROPERTY_KEY.to_string(),
                constants::GUID_PROPERTY_KEY.to_string(),
                constants::TYPE_CATEGORY_PROPERTY_KEY.to_string(),
            ],
        }
    }
}

impl TypeStoreConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: TypeStoreConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        info!("Loaded type store configuration from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_type_version.trim().is_empty() {
            return Err(ConfigError::Invalid("default_type_version can't be empty".to_string()));
        }
        if self.supertype_edge_label.trim().is_empty() {
            return Err(ConfigError::Invalid("supertype_edge_label can't be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TypeStoreConfig::default();
        assert_eq!(config.default_type_version, "1.0");
        assert_eq!(config.supertype_edge_label, "__type..supertype");
        assert!(config.indexed_keys.iter().any(|k| k == "__type.name"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TypeStoreConfig::from_yaml_str("default_type_version: \"2.0\"\n").unwrap();
        assert_eq!(config.default_type_version, "2.0");
        assert_eq!(config.supertype_edge_label, constants::SUPERTYPE_EDGE_LABEL);
        assert_eq!(config.indexed_keys, TypeStoreConfig::default().indexed_keys);
    }

    #[test]
    fn test_blank_values_rejected() {
        let err = TypeStoreConfig::from_yaml_str("supertype_edge_label: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = TypeStoreConfig::from_yaml_str("indexed_keys: 12\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
