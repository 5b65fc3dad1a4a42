//! Catalog configuration
//!
//! Describes a catalog surface: which item fields act as facet groups,
//! which groups persist across sessions, the storage key namespacing the
//! persisted blob, and the optional group-by modes a caller may render.
//! The engine performs no I/O, so configuration round-trips through TOML
//! strings and the caller decides where they live.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::ALL_CATEGORY_ID;

/// Errors that can occur while reading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Configuration for one catalog surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Storage key namespacing the persisted filter blob
    #[serde(default)]
    pub store_key: Option<String>,

    /// Item fields whose values become facet groups
    #[serde(default)]
    pub filter_groups: Vec<String>,

    /// Groups whose selections persist across sessions
    #[serde(default)]
    pub retention: Vec<String>,

    /// Grouping modes the caller may render
    #[serde(default)]
    pub group_by_options: Vec<String>,

    /// Category selected when state resolves to none
    #[serde(default = "default_category_id")]
    pub default_category_id: String,
}

fn default_category_id() -> String {
    ALL_CATEGORY_ID.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_key: None,
            filter_groups: Vec::new(),
            retention: Vec::new(),
            group_by_options: Vec::new(),
            default_category_id: default_category_id(),
        }
    }
}

impl CatalogConfig {
    /// Create a configuration for the given facet groups
    #[must_use]
    pub fn new<S: Into<String>>(filter_groups: impl IntoIterator<Item = S>) -> Self {
        Self {
            filter_groups: filter_groups.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the persistence key
    #[must_use]
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = Some(key.into());
        self
    }

    /// Set the retention allow-list
    #[must_use]
    pub fn with_retention<S: Into<String>>(mut self, groups: impl IntoIterator<Item = S>) -> Self {
        self.retention = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Set the group-by modes
    #[must_use]
    pub fn with_group_by_options<S: Into<String>>(
        mut self,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        self.group_by_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the string is not valid TOML for this shape.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Render the configuration as a TOML string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.default_category_id, "all");
        assert!(config.filter_groups.is_empty());
        assert!(config.store_key.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = CatalogConfig::new(["kind", "provider"])
            .with_store_key("catalog-filters")
            .with_retention(["provider"])
            .with_group_by_options(["operator", "none"]);

        assert_eq!(config.filter_groups, ["kind", "provider"]);
        assert_eq!(config.retention, ["provider"]);
        assert_eq!(config.store_key.as_deref(), Some("catalog-filters"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CatalogConfig::new(["kind"]).with_retention(["kind"]);
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("filter_groups"));

        let back = CatalogConfig::from_toml_str(&toml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CatalogConfig::from_toml_str("filter_groups = [\"kind\"]").unwrap();
        assert_eq!(config.filter_groups, ["kind"]);
        assert_eq!(config.default_category_id, "all");
    }

    #[test]
    fn test_malformed_toml_errors() {
        assert!(CatalogConfig::from_toml_str("filter_groups = 3").is_err());
    }
}
