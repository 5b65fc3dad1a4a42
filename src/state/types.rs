//! Resolved and encoded state representations

use std::collections::BTreeMap;

use crate::category::ALL_CATEGORY_ID;
use crate::filter::FilterGroup;

/// Query parameter carrying the selected category id
pub const CATEGORY_PARAM: &str = "category";

/// Query parameter carrying the keyword
pub const KEYWORD_PARAM: &str = "keyword";

/// Query parameter carrying the grouping mode
pub const GROUP_BY_PARAM: &str = "groupBy";

/// Persisted preference blob: group name → value name → filter entry
pub type StoredFilters = BTreeMap<String, FilterGroup>;

/// Fully resolved catalog state
///
/// `active_values` holds only groups with at least one active value; an
/// absent group means all-inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    pub selected_category_id: String,
    pub keyword: String,
    pub group_by: Option<String>,
    pub active_values: BTreeMap<String, Vec<String>>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            selected_category_id: ALL_CATEGORY_ID.to_string(),
            keyword: String::new(),
            group_by: None,
            active_values: BTreeMap::new(),
        }
    }
}

/// Serialized state ready for the caller's URL and storage layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedState {
    /// URL query string, without a leading `?`
    pub query: String,
    /// JSON blob for the namespaced persistence key
    pub stored: String,
}
