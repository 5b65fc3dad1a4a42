//! Item filtering: keyword stage then per-group intersection
//!
//! The keyword stage runs first over the raw item list. Each group with at
//! least one active value then constrains the result to items whose group
//! field intersects any active value or synonym (OR within the group);
//! constraints from different groups intersect (AND across groups). Groups
//! with nothing active impose no constraint. Only removal happens here, so
//! input order is preserved throughout.

use super::types::{ActiveFilters, KeywordFilter};
use crate::CatalogEntry;

/// Reduce items through the keyword stage and every active group constraint
///
/// With no active filters at all this is the identity. `keyword_match`
/// receives the lowercased keyword and is supplied by the caller; field
/// matching is the engine's own.
#[must_use]
pub fn apply_filters<I: CatalogEntry + Clone>(
    items: &[I],
    filters: &ActiveFilters,
    keyword_match: &dyn Fn(&str, &I) -> bool,
) -> Vec<I> {
    let mut result = filter_by_keyword(items, &filters.keyword, keyword_match);

    for (group, entries) in &filters.groups {
        let active: Vec<_> = entries.values().filter(|e| e.active).collect();
        if active.is_empty() {
            continue;
        }

        let match_values: Vec<String> = active.iter().flat_map(|e| e.match_values()).collect();
        result.retain(|item| {
            item.field(group)
                .is_some_and(|value| value.intersects(&match_values))
        });
    }

    result
}

/// Apply only the keyword stage
#[must_use]
pub fn filter_by_keyword<I: Clone>(
    items: &[I],
    keyword: &KeywordFilter,
    keyword_match: &dyn Fn(&str, &I) -> bool,
) -> Vec<I> {
    if !keyword.active {
        return items.to_vec();
    }

    let needle = keyword.value.to_lowercase();
    items
        .iter()
        .filter(|item| keyword_match(&needle, item))
        .cloned()
        .collect()
}
