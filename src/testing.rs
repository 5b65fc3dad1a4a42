//! Testing utilities for facetr
//!
//! Shared fixtures for the module tests: a small catalog of records, the
//! matching category declarations, and the caller-supplied collaborators
//! (sorter, keyword predicate) in their simplest deterministic form.
//!
//! Only available when compiled with `cfg(test)`.

use crate::category::{CategoryDef, CategoryTree};
use crate::config::CatalogConfig;
use crate::controller::CatalogController;
use crate::{CatalogEntry, CatalogRecord};

/// Three records: two of kind A, one of kind B
pub fn kind_items() -> Vec<CatalogRecord> {
    vec![
        CatalogRecord::new("1").with_field("kind", "A"),
        CatalogRecord::new("2").with_field("kind", "B"),
        CatalogRecord::new("3").with_field("kind", "A"),
    ]
}

/// One matching category (`kind-a`) and one that never matches (`kind-b`)
pub fn kind_defs() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new("kind-a", "Kind A")
            .with_field("kind")
            .with_values(["A"]),
        CategoryDef::new("kind-b", "Kind B")
            .with_field("kind")
            .with_values(["Z"]),
    ]
}

/// Deterministic sorter ordering items by uid
pub fn uid_sorter() -> impl Fn(&mut Vec<CatalogRecord>) {
    |items: &mut Vec<CatalogRecord>| items.sort_by(|a, b| a.uid.cmp(&b.uid))
}

/// Keyword predicate matching the lowercased uid by substring
pub fn uid_keyword_match() -> impl Fn(&str, &CatalogRecord) -> bool {
    |needle: &str, item: &CatalogRecord| item.uid.to_lowercase().contains(needle)
}

/// Uids of one category's items, empty when the category is absent
pub fn uids(tree: &CategoryTree<CatalogRecord>, id: &str) -> Vec<String> {
    tree.get(id)
        .map(|category| category.items.iter().map(|i| i.uid().to_string()).collect())
        .unwrap_or_default()
}

/// Uids of an item slice, in order
pub fn uids_of(items: &[CatalogRecord]) -> Vec<String> {
    items.iter().map(|i| i.uid().to_string()).collect()
}

/// A controller over the kind fixtures with retention enabled for `kind`
pub fn test_controller() -> CatalogController<CatalogRecord> {
    CatalogController::builder()
        .items(kind_items())
        .category_defs(kind_defs())
        .config(
            CatalogConfig::new(["kind"])
                .with_retention(["kind"])
                .with_store_key("facetr-test"),
        )
        .sorter(uid_sorter())
        .keyword_match(uid_keyword_match())
        .build()
}
