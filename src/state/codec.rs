//! Encode/decode between catalog state and its URL/storage form

use std::collections::BTreeMap;

use tracing::{debug, warn};
use url::form_urlencoded;

use super::error::StateError;
use super::types::{
    CATEGORY_PARAM, CatalogState, EncodedState, GROUP_BY_PARAM, KEYWORD_PARAM, StoredFilters,
};
use crate::category::ALL_CATEGORY_ID;
use crate::filter::ActiveFilters;

/// Strictly parse one group's URL parameter (a JSON string array)
///
/// # Errors
///
/// Returns `StateError::MalformedParam` if the value is not a JSON array of
/// strings.
pub fn parse_group_param(name: &str, raw: &str) -> Result<Vec<String>, StateError> {
    serde_json::from_str(raw).map_err(|source| StateError::MalformedParam {
        name: name.to_string(),
        source,
    })
}

/// Strictly parse the persisted filter blob
///
/// # Errors
///
/// Returns `StateError::MalformedStored` if the blob is not a group → value
/// → filter map.
pub fn parse_stored(raw: &str) -> Result<StoredFilters, StateError> {
    serde_json::from_str(raw).map_err(StateError::MalformedStored)
}

/// Resolve catalog state from a query string and a persisted blob
///
/// Precedence per group: a URL parameter wins outright; otherwise the
/// persisted selections apply when the group is retention-listed; otherwise
/// the group starts all-inactive. `category`, `keyword`, and `groupBy` come
/// from the URL alone. Malformed values on either side are logged and
/// treated as absent.
#[must_use]
pub fn decode(
    query: &str,
    stored: Option<&str>,
    group_names: &[String],
    retention: &[String],
) -> CatalogState {
    let params: BTreeMap<String, String> =
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

    let mut state = CatalogState::default();
    if let Some(category) = params.get(CATEGORY_PARAM)
        && !category.is_empty()
    {
        state.selected_category_id = category.clone();
    }
    if let Some(keyword) = params.get(KEYWORD_PARAM) {
        state.keyword = keyword.clone();
    }
    if let Some(group_by) = params.get(GROUP_BY_PARAM)
        && !group_by.is_empty()
    {
        state.group_by = Some(group_by.clone());
    }

    let mut from_url: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for group in group_names {
        let Some(raw) = params.get(group) else {
            continue;
        };
        match parse_group_param(group, raw) {
            Ok(values) => {
                from_url.insert(group.clone(), values);
            }
            Err(err) => warn!("ignoring filter state from url params: {err}"),
        }
    }

    let persisted = stored.and_then(|raw| match parse_stored(raw) {
        Ok(filters) => Some(filters),
        Err(err) => {
            warn!("ignoring persisted filter settings: {err}");
            None
        }
    });

    for group in group_names {
        if let Some(values) = from_url.remove(group) {
            if !values.is_empty() {
                state.active_values.insert(group.clone(), values);
            }
            continue;
        }
        if !retention.contains(group) {
            continue;
        }
        let Some(entries) = persisted.as_ref().and_then(|p| p.get(group)) else {
            continue;
        };
        let values: Vec<String> = entries
            .values()
            .filter(|entry| entry.active)
            .map(|entry| entry.value.clone())
            .collect();
        if !values.is_empty() {
            state.active_values.insert(group.clone(), values);
        }
    }

    debug!(
        category = %state.selected_category_id,
        groups = state.active_values.len(),
        "resolved catalog state"
    );
    state
}

/// Serialize catalog state for the caller's URL and storage layers
///
/// The query string carries `category` (omitted for the `all` root),
/// `keyword` and `groupBy` (omitted when empty), and one JSON-array
/// parameter per group with active values. The stored blob carries the
/// retention-listed groups' full entry maps so inactive candidate values
/// and synonyms survive alongside the selections.
#[must_use]
pub fn encode(state: &CatalogState, filters: &ActiveFilters, retention: &[String]) -> EncodedState {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if state.selected_category_id != ALL_CATEGORY_ID && !state.selected_category_id.is_empty() {
        serializer.append_pair(CATEGORY_PARAM, &state.selected_category_id);
    }
    if !state.keyword.is_empty() {
        serializer.append_pair(KEYWORD_PARAM, &state.keyword);
    }
    if let Some(group_by) = state.group_by.as_deref()
        && !group_by.is_empty()
    {
        serializer.append_pair(GROUP_BY_PARAM, group_by);
    }
    for (group, values) in &state.active_values {
        if values.is_empty() {
            continue;
        }
        if let Ok(json) = serde_json::to_string(values) {
            serializer.append_pair(group, &json);
        }
    }

    let retained: StoredFilters = filters
        .groups
        .iter()
        .filter(|(group, _)| retention.contains(group))
        .map(|(group, entries)| (group.clone(), entries.clone()))
        .collect();
    let stored = serde_json::to_string(&retained).unwrap_or_else(|_| "{}".to_string());

    EncodedState {
        query: serializer.finish(),
        stored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterEntry;

    fn group_names() -> Vec<String> {
        vec!["kind".to_string(), "provider".to_string()]
    }

    fn sample_filters() -> ActiveFilters {
        let mut filters = ActiveFilters::default();
        for (group, value) in [("kind", "A"), ("kind", "B"), ("provider", "Acme")] {
            filters
                .groups
                .entry(group.to_string())
                .or_default()
                .insert(value.to_string(), FilterEntry::new(value));
        }
        filters
    }

    #[test]
    fn test_decode_empty_inputs_yields_defaults() {
        let state = decode("", None, &group_names(), &[]);
        assert_eq!(state, CatalogState::default());
    }

    #[test]
    fn test_decode_reads_scalar_params() {
        let state = decode(
            "?category=kind-a&keyword=web&groupBy=operator",
            None,
            &group_names(),
            &[],
        );
        assert_eq!(state.selected_category_id, "kind-a");
        assert_eq!(state.keyword, "web");
        assert_eq!(state.group_by.as_deref(), Some("operator"));
    }

    #[test]
    fn test_decode_group_param_is_json_array() {
        let query = format!("kind={}", urlencode("[\"A\",\"B\"]"));
        let state = decode(&query, None, &group_names(), &[]);
        assert_eq!(state.active_values["kind"], ["A", "B"]);
    }

    #[test]
    fn test_decode_malformed_group_param_is_ignored() {
        let query = format!("kind={}", urlencode("not-json"));
        let state = decode(&query, None, &group_names(), &[]);
        assert!(state.active_values.is_empty());
    }

    #[test]
    fn test_decode_url_wins_over_persisted() {
        let stored = stored_with_active("kind", "B");
        let query = format!("kind={}", urlencode("[\"A\"]"));
        let state = decode(
            &query,
            Some(&stored),
            &group_names(),
            &["kind".to_string()],
        );
        assert_eq!(state.active_values["kind"], ["A"]);
    }

    #[test]
    fn test_decode_persisted_needs_retention_listing() {
        let stored = stored_with_active("kind", "B");

        let without = decode("", Some(&stored), &group_names(), &[]);
        assert!(without.active_values.is_empty());

        let with = decode("", Some(&stored), &group_names(), &["kind".to_string()]);
        assert_eq!(with.active_values["kind"], ["B"]);
    }

    #[test]
    fn test_decode_malformed_stored_blob_is_ignored() {
        let state = decode("", Some("{broken"), &group_names(), &["kind".to_string()]);
        assert!(state.active_values.is_empty());
    }

    #[test]
    fn test_parse_helpers_are_strict() {
        assert!(parse_group_param("kind", "[\"A\"]").is_ok());
        assert!(matches!(
            parse_group_param("kind", "oops"),
            Err(StateError::MalformedParam { .. })
        ));
        assert!(matches!(
            parse_stored("[]"),
            Err(StateError::MalformedStored(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let mut filters = sample_filters();
        filters.set_active("kind", "A", true);
        filters.set_keyword("web");
        let state = filters.to_state("kind-a", Some("operator"));

        let encoded = encode(&state, &filters, &["kind".to_string()]);
        let decoded = decode(
            &encoded.query,
            Some(&encoded.stored),
            &group_names(),
            &["kind".to_string()],
        );
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_encode_omits_defaults() {
        let filters = sample_filters();
        let state = filters.to_state("all", None);
        let encoded = encode(&state, &filters, &[]);
        assert_eq!(encoded.query, "");
        assert_eq!(encoded.stored, "{}");
    }

    #[test]
    fn test_encode_stores_only_retained_groups() {
        let mut filters = sample_filters();
        filters.set_active("kind", "A", true);
        filters.set_active("provider", "Acme", true);
        let state = filters.to_state("all", None);

        let encoded = encode(&state, &filters, &["provider".to_string()]);
        let stored: StoredFilters = serde_json::from_str(&encoded.stored).unwrap();
        assert!(stored.contains_key("provider"));
        assert!(!stored.contains_key("kind"));
        // the whole entry map is stored, inactive candidates included
        assert!(stored["provider"]["Acme"].active);
    }

    fn stored_with_active(group: &str, value: &str) -> String {
        let mut filters = ActiveFilters::default();
        filters.set_active(group, value, true);
        serde_json::to_string(&filters.groups).unwrap()
    }

    fn urlencode(raw: &str) -> String {
        form_urlencoded::byte_serialize(raw.as_bytes()).collect()
    }
}
