//! Facetr - a faceted categorization and filtering engine
//!
//! This library classifies a flat catalog of heterogeneous items into a
//! category tree, applies keyword and multi-group facet filters with
//! OR-within-group / AND-across-groups semantics, computes per-value facet
//! counts scoped to the selected category, and keeps the whole filter state
//! reproducible from a URL query string and a persisted preference blob.
//!
//! The engine is pure: it accepts already-fetched items and already-resolved
//! category declarations, and returns new data structures on every recompute.
//! Rendering, routing, and storage belong to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod category;
pub mod config;
pub mod controller;
pub mod counts;
pub mod filter;
pub mod state;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the engine
#[derive(Debug, Error)]
pub enum FacetError {
    /// State codec error
    #[error("State error: {0}")]
    StateError(#[from] state::StateError),
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// A scalar or list value held by an item field
///
/// Category and filter declarations match against field values without
/// caring whether the underlying field is single- or multi-valued, so both
/// shapes deserialize from the same untagged representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single scalar value
    One(String),
    /// A list of values
    Many(Vec<String>),
}

impl FieldValue {
    /// View the field as a value slice regardless of shape
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// True if any held value appears in `candidates`
    #[must_use]
    pub fn intersects(&self, candidates: &[String]) -> bool {
        self.values().iter().any(|v| candidates.contains(v))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Read-only view of a catalog item: a stable identity plus named fields
///
/// Types implement this trait to expose the fields that category and filter
/// declarations inspect. An absent field is not an error; the item simply
/// fails to match whatever inspected it.
pub trait CatalogEntry {
    /// Stable unique identity used for de-duplication within categories
    fn uid(&self) -> &str;

    /// Look up a declared field by name
    fn field(&self, name: &str) -> Option<&FieldValue>;
}

/// Generic catalog item backed by a field map
///
/// Callers with a bespoke item type implement [`CatalogEntry`] directly;
/// everyone else (including this crate's tests) can use this record, which
/// round-trips through serde as a flat object:
/// `{"uid": "t1", "kind": "Template", "provider": ["Acme", "Example"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub uid: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl CatalogRecord {
    /// Create a record with no fields
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field value
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl CatalogEntry for CatalogRecord {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Caller-supplied reorder applied to every category's item list
pub type ItemSorter<I> = Box<dyn Fn(&mut Vec<I>)>;

/// Caller-supplied keyword predicate; receives the lowercased keyword
pub type KeywordMatch<I> = Box<dyn Fn(&str, &I) -> bool>;
