//! Filter data structures and state operations
//!
//! The value maps are ordered (`BTreeMap`) so rebuilds, encodes, and counts
//! iterate deterministically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CatalogEntry, state::CatalogState};

/// One candidate value inside a facet group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// Display label, defaults to the value itself
    pub label: String,

    /// The field value this entry matches
    pub value: String,

    /// Whether the user has toggled this value on
    #[serde(default)]
    pub active: bool,

    /// Alternate field values treated as equivalent to `value`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

impl FilterEntry {
    /// Create an inactive entry labeled by its value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            active: false,
            synonyms: Vec::new(),
        }
    }

    /// Set a display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Declare synonym values
    #[must_use]
    pub fn with_synonyms<S: Into<String>>(mut self, synonyms: impl IntoIterator<Item = S>) -> Self {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// The value plus its synonyms, the full match set for this entry
    #[must_use]
    pub fn match_values(&self) -> Vec<String> {
        let mut values = Vec::with_capacity(1 + self.synonyms.len());
        values.push(self.value.clone());
        values.extend(self.synonyms.iter().cloned());
        values
    }
}

/// Candidate values of one facet group, keyed by value
pub type FilterGroup = BTreeMap<String, FilterEntry>;

/// The distinguished keyword filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFilter {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub active: bool,
}

/// Live filter state: keyword plus per-group value maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    pub keyword: KeywordFilter,
    pub groups: BTreeMap<String, FilterGroup>,
}

impl ActiveFilters {
    /// Discover candidate values by scanning item fields
    ///
    /// Every distinct value of every named group field becomes an inactive
    /// entry. Equivalent to seeding [`Self::discover_into`] with an empty
    /// state.
    #[must_use]
    pub fn discover<I: CatalogEntry>(items: &[I], group_names: &[String]) -> Self {
        Self::discover_into(Self::default(), items, group_names)
    }

    /// Discover candidate values on top of a seeded state
    ///
    /// Seeded entries (labels, synonyms, active flags) are preserved; only
    /// values missing from the seed are added. Callers use the seed to
    /// inject synonym declarations the scan cannot know about.
    #[must_use]
    pub fn discover_into<I: CatalogEntry>(
        seed: Self,
        items: &[I],
        group_names: &[String],
    ) -> Self {
        let mut filters = seed;
        for group in group_names {
            let entries = filters.groups.entry(group.clone()).or_default();
            for item in items {
                let Some(value) = item.field(group) else {
                    continue;
                };
                for v in value.values() {
                    entries
                        .entry(v.clone())
                        .or_insert_with(|| FilterEntry::new(v.clone()));
                }
            }
        }
        filters
    }

    /// Set the keyword; an empty keyword deactivates the stage
    pub fn set_keyword(&mut self, value: &str) {
        self.keyword.value = value.to_string();
        self.keyword.active = !value.is_empty();
    }

    /// Set one value's active flag, inserting the entry if undiscovered
    ///
    /// URL state may reference values absent from the current item set;
    /// those become plain entries so the selection is not silently lost.
    pub fn set_active(&mut self, group: &str, value: &str, active: bool) {
        let entries = self.groups.entry(group.to_string()).or_default();
        entries
            .entry(value.to_string())
            .or_insert_with(|| FilterEntry::new(value))
            .active = active;
    }

    /// Flip one value's active flag, returning the new state
    pub fn toggle(&mut self, group: &str, value: &str) -> bool {
        let entries = self.groups.entry(group.to_string()).or_default();
        let entry = entries
            .entry(value.to_string())
            .or_insert_with(|| FilterEntry::new(value));
        entry.active = !entry.active;
        entry.active
    }

    /// Deactivate everything and clear the keyword
    pub fn clear(&mut self) {
        self.keyword = KeywordFilter::default();
        for entries in self.groups.values_mut() {
            for entry in entries.values_mut() {
                entry.active = false;
            }
        }
    }

    /// Copy active flags from a previous state onto freshly discovered values
    ///
    /// Used after an item-list change: `fresh` carries the new candidate
    /// values, `previous` the user's selections. Values that vanished from
    /// the catalog drop their selection with them.
    #[must_use]
    pub fn carry_forward(mut fresh: Self, previous: &Self) -> Self {
        fresh.keyword = previous.keyword.clone();
        for (group, entries) in &mut fresh.groups {
            for (value, entry) in entries.iter_mut() {
                entry.active = previous
                    .groups
                    .get(group)
                    .and_then(|g| g.get(value))
                    .is_some_and(|e| e.active);
            }
        }
        fresh
    }

    /// Apply decoded state: keyword, then per-group active value lists
    ///
    /// All current selections are cleared first; the decoded state is the
    /// complete description of what is active.
    pub fn apply_state(&mut self, state: &CatalogState) {
        self.clear();
        self.set_keyword(&state.keyword);
        for (group, values) in &state.active_values {
            for value in values {
                self.set_active(group, value, true);
            }
        }
    }

    /// Active entries of one group
    #[must_use]
    pub fn active_entries(&self, group: &str) -> Vec<&FilterEntry> {
        self.groups
            .get(group)
            .map(|entries| entries.values().filter(|e| e.active).collect())
            .unwrap_or_default()
    }

    /// Active value names of one group, in map order
    #[must_use]
    pub fn active_value_names(&self, group: &str) -> Vec<String> {
        self.active_entries(group)
            .into_iter()
            .map(|e| e.value.clone())
            .collect()
    }

    /// True when neither the keyword nor any group value is active
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        !self.keyword.active
            && self
                .groups
                .values()
                .all(|entries| entries.values().all(|e| !e.active))
    }

    /// Snapshot the current selections as codec state
    #[must_use]
    pub fn to_state(&self, selected_category_id: &str, group_by: Option<&str>) -> CatalogState {
        let mut active_values = BTreeMap::new();
        for group in self.groups.keys() {
            let names = self.active_value_names(group);
            if !names.is_empty() {
                active_values.insert(group.clone(), names);
            }
        }
        CatalogState {
            selected_category_id: selected_category_id.to_string(),
            keyword: self.keyword.value.clone(),
            group_by: group_by.map(str::to_string),
            active_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogRecord;

    fn sample_items() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new("1")
                .with_field("kind", "A")
                .with_field("provider", "Acme"),
            CatalogRecord::new("2")
                .with_field("kind", "B")
                .with_field("provider", vec!["Acme", "Example"]),
        ]
    }

    fn groups() -> Vec<String> {
        vec!["kind".to_string(), "provider".to_string()]
    }

    #[test]
    fn test_discover_scans_scalar_and_list_fields() {
        let filters = ActiveFilters::discover(&sample_items(), &groups());

        let kind = filters.groups.get("kind").unwrap();
        assert_eq!(kind.len(), 2);
        assert!(kind.values().all(|e| !e.active));

        let provider = filters.groups.get("provider").unwrap();
        assert!(provider.contains_key("Acme"));
        assert!(provider.contains_key("Example"));
    }

    #[test]
    fn test_discover_into_preserves_seeded_synonyms() {
        let mut seed = ActiveFilters::default();
        seed.groups.entry("provider".to_string()).or_default().insert(
            "Acme".to_string(),
            FilterEntry::new("Acme")
                .with_label("Acme Corp.")
                .with_synonyms(["Acme Inc."]),
        );

        let filters = ActiveFilters::discover_into(seed, &sample_items(), &groups());
        let acme = &filters.groups["provider"]["Acme"];
        assert_eq!(acme.label, "Acme Corp.");
        assert_eq!(acme.synonyms, ["Acme Inc."]);
    }

    #[test]
    fn test_set_keyword_tracks_active_flag() {
        let mut filters = ActiveFilters::default();
        filters.set_keyword("query");
        assert!(filters.keyword.active);

        filters.set_keyword("");
        assert!(!filters.keyword.active);
        assert!(filters.is_inactive());
    }

    #[test]
    fn test_toggle_inserts_unknown_values() {
        let mut filters = ActiveFilters::discover(&sample_items(), &groups());
        assert!(filters.toggle("kind", "Z"));
        assert!(filters.groups["kind"]["Z"].active);
        assert!(!filters.toggle("kind", "Z"));
    }

    #[test]
    fn test_clear_deactivates_everything() {
        let mut filters = ActiveFilters::discover(&sample_items(), &groups());
        filters.set_keyword("query");
        filters.set_active("kind", "A", true);

        filters.clear();
        assert!(filters.is_inactive());
        assert_eq!(filters.keyword.value, "");
        // candidate values survive clearing
        assert!(filters.groups["kind"].contains_key("A"));
    }

    #[test]
    fn test_carry_forward_keeps_selections_for_surviving_values() {
        let mut previous = ActiveFilters::discover(&sample_items(), &groups());
        previous.set_active("kind", "A", true);
        previous.set_active("kind", "B", true);
        previous.set_keyword("query");

        // catalog shrank: only kind A items remain
        let shrunk: Vec<_> = sample_items().into_iter().take(1).collect();
        let fresh = ActiveFilters::discover(&shrunk, &groups());
        let merged = ActiveFilters::carry_forward(fresh, &previous);

        assert!(merged.groups["kind"]["A"].active);
        assert!(!merged.groups["kind"].contains_key("B"));
        assert_eq!(merged.keyword.value, "query");
    }

    #[test]
    fn test_match_values_includes_synonyms() {
        let entry = FilterEntry::new("Acme").with_synonyms(["Acme Inc.", "Acme Corp."]);
        assert_eq!(entry.match_values(), ["Acme", "Acme Inc.", "Acme Corp."]);
    }

    #[test]
    fn test_to_state_skips_inactive_groups() {
        let mut filters = ActiveFilters::discover(&sample_items(), &groups());
        filters.set_active("kind", "A", true);

        let state = filters.to_state("all", None);
        assert_eq!(state.active_values.len(), 1);
        assert_eq!(state.active_values["kind"], ["A"]);
    }
}
