//! Controller lifecycle phases and emitted snapshots

use crate::category::CategoryTree;
use crate::counts::FilterCounts;
use crate::filter::ActiveFilters;
use crate::state::EncodedState;

/// Controller lifecycle phase
///
/// `Uninitialized` exists only before construction (the builder stage);
/// a constructed controller starts in `Loading` and reaches `Ready` once
/// initial state is resolved. Disposal is a separate terminal flag, not a
/// phase: a disposed controller keeps its last phase but ignores events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// Render-ready snapshot emitted after every processed event
///
/// Every field is a freshly computed value; callers never see the
/// controller's internal structures and cannot alias them.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<I> {
    /// Filtered category tree (base shape, filtered membership)
    pub categories: CategoryTree<I>,

    /// Facet counts scoped to the selected category
    pub filter_counts: FilterCounts,

    /// Current filter state, keyword included
    pub active_filters: ActiveFilters,

    /// Selected category id
    pub selected_category_id: String,

    /// Current grouping mode, if any
    pub group_by: Option<String>,
}

/// A view snapshot paired with the state the caller should persist
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogUpdate<I> {
    pub view: CatalogView<I>,
    pub encoded: EncodedState,
}
