//! Per-value facet match counts scoped to the selected category
//!
//! The scope is the selected category's membership after keyword-only
//! filtering. Group filters are deliberately excluded from the scope so a
//! sidebar can preview "if this one value were toggled on, N items would
//! match" for every candidate value, independent of what is currently
//! active. Counts for different values of the same group overlap freely and
//! carry no sum invariant.

use std::collections::BTreeMap;

use crate::CatalogEntry;
use crate::category::{CategoryTree, recategorize};
use crate::filter::{ActiveFilters, filter_by_keyword};

/// Match counts keyed by group then value; missing entries read as zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCounts(BTreeMap<String, BTreeMap<String, usize>>);

impl FilterCounts {
    /// Count for one group value, zero when absent
    #[must_use]
    pub fn get(&self, group: &str, value: &str) -> usize {
        self.0
            .get(group)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }

    /// All counted values of one group
    #[must_use]
    pub fn group(&self, group: &str) -> Option<&BTreeMap<String, usize>> {
        self.0.get(group)
    }

    fn set(&mut self, group: &str, value: &str, count: usize) {
        self.0
            .entry(group.to_string())
            .or_default()
            .insert(value.to_string(), count);
    }
}

/// Compute facet counts for every candidate value of every named group
///
/// Items are keyword-filtered, recategorized over `tree`'s structure, and
/// scoped to `selected_category_id`; an unknown id yields an empty scope and
/// all-zero counts. Every entry in `filters` is counted, active or not.
#[must_use]
pub fn facet_counts<I: CatalogEntry + Clone>(
    items: &[I],
    group_names: &[String],
    filters: &ActiveFilters,
    tree: &CategoryTree<I>,
    selected_category_id: &str,
    sorter: &dyn Fn(&mut Vec<I>),
    keyword_match: &dyn Fn(&str, &I) -> bool,
) -> FilterCounts {
    let scoped_items = filter_by_keyword(items, &filters.keyword, keyword_match);
    let scoped_tree = recategorize(tree, &scoped_items, sorter);
    let empty = Vec::new();
    let scope = scoped_tree
        .get(selected_category_id)
        .map_or(&empty, |category| &category.items);

    let mut counts = FilterCounts::default();
    for group in group_names {
        let Some(entries) = filters.groups.get(group) else {
            continue;
        };
        for entry in entries.values() {
            let match_values = entry.match_values();
            let matched = scope
                .iter()
                .filter(|item| {
                    item.field(group)
                        .is_some_and(|value| value.intersects(&match_values))
                })
                .count();
            counts.set(group, &entry.value, matched);
        }
    }
    counts
}
