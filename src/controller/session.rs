//! Controller state machine and its builder
//!
//! Construct with the builder:
//! ```
//! use facetr::CatalogRecord;
//! use facetr::category::CategoryDef;
//! use facetr::config::CatalogConfig;
//! use facetr::controller::CatalogController;
//!
//! let items = vec![CatalogRecord::new("t1").with_field("kind", "A")];
//! let defs = vec![CategoryDef::new("kind-a", "Kind A")
//!     .with_field("kind")
//!     .with_values(["A"])];
//!
//! let mut controller = CatalogController::builder()
//!     .items(items)
//!     .category_defs(defs)
//!     .config(CatalogConfig::new(["kind"]))
//!     .build();
//!
//! let update = controller.initialize("", None).unwrap();
//! assert_eq!(update.view.selected_category_id, "all");
//! ```

use tracing::debug;

use super::types::{CatalogUpdate, CatalogView, Phase};
use crate::category::{CategoryDef, CategoryTree, build_tree, recategorize};
use crate::config::CatalogConfig;
use crate::counts::facet_counts;
use crate::filter::{ActiveFilters, apply_filters};
use crate::state::{decode, encode};
use crate::{CatalogEntry, ItemSorter, KeywordMatch};

/// Orchestrates tree building, filtering, counting, and state encoding
pub struct CatalogController<I> {
    items: Vec<I>,
    defs: Vec<CategoryDef>,
    config: CatalogConfig,
    sorter: ItemSorter<I>,
    keyword_match: KeywordMatch<I>,
    filter_seed: ActiveFilters,

    base_tree: CategoryTree<I>,
    filters: ActiveFilters,
    selected_category_id: String,
    group_by: Option<String>,
    phase: Phase,
    disposed: bool,
}

impl<I: CatalogEntry + Clone> CatalogController<I> {
    /// Create a new builder for constructing a controller
    #[must_use]
    pub fn builder() -> CatalogControllerBuilder<I> {
        CatalogControllerBuilder::new()
    }

    /// Current lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// True once [`Self::dispose`] has been called
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Resolve initial URL/persisted state and transition to Ready
    ///
    /// Returns the first update, or `None` if the controller is not in the
    /// Loading phase (already initialized, or disposed).
    pub fn initialize(&mut self, query: &str, stored: Option<&str>) -> Option<CatalogUpdate<I>> {
        if self.disposed || self.phase != Phase::Loading {
            return None;
        }

        let state = decode(
            query,
            stored,
            &self.config.filter_groups,
            &self.config.retention,
        );
        self.filters.apply_state(&state);
        self.selected_category_id = state.selected_category_id;
        self.group_by = state.group_by;
        self.phase = Phase::Ready;
        debug!("catalog controller ready");

        Some(self.refresh())
    }

    /// Replace the item list, rediscovering filters and rebuilding the tree
    ///
    /// Active flags carry forward for values that still exist in the new
    /// catalog; selections on vanished values are dropped with them.
    pub fn items_changed(&mut self, items: Vec<I>) -> Option<CatalogUpdate<I>> {
        if !self.accepting_events() {
            return None;
        }

        self.items = items;
        self.base_tree = build_tree(&self.items, &self.defs, &*self.sorter);
        let fresh = ActiveFilters::discover_into(
            self.filter_seed.clone(),
            &self.items,
            &self.config.filter_groups,
        );
        self.filters = ActiveFilters::carry_forward(fresh, &self.filters);

        Some(self.refresh())
    }

    /// Set one filter value's active flag
    pub fn toggle_filter(
        &mut self,
        group: &str,
        value: &str,
        active: bool,
    ) -> Option<CatalogUpdate<I>> {
        if !self.accepting_events() {
            return None;
        }
        self.filters.set_active(group, value, active);
        Some(self.refresh())
    }

    /// Update the keyword; an empty keyword deactivates the stage
    pub fn set_keyword(&mut self, value: &str) -> Option<CatalogUpdate<I>> {
        if !self.accepting_events() {
            return None;
        }
        self.filters.set_keyword(value);
        Some(self.refresh())
    }

    /// Select a category by id
    pub fn select_category(&mut self, id: &str) -> Option<CatalogUpdate<I>> {
        if !self.accepting_events() {
            return None;
        }
        self.selected_category_id = id.to_string();
        Some(self.refresh())
    }

    /// Change the grouping mode
    pub fn set_group_by(&mut self, value: Option<&str>) -> Option<CatalogUpdate<I>> {
        if !self.accepting_events() {
            return None;
        }
        self.group_by = value.filter(|v| !v.is_empty()).map(str::to_string);
        Some(self.refresh())
    }

    /// Deactivate every filter and clear the keyword
    pub fn clear_filters(&mut self) -> Option<CatalogUpdate<I>> {
        if !self.accepting_events() {
            return None;
        }
        self.filters.clear();
        Some(self.refresh())
    }

    /// Terminal transition: every later event returns `None`
    pub fn dispose(&mut self) {
        self.disposed = true;
        debug!("catalog controller disposed");
    }

    fn accepting_events(&self) -> bool {
        !self.disposed && self.phase == Phase::Ready
    }

    fn refresh(&self) -> CatalogUpdate<I> {
        let filtered = apply_filters(&self.items, &self.filters, &*self.keyword_match);
        let categories = recategorize(&self.base_tree, &filtered, &*self.sorter);

        // counts fall back to the configured default when the selected
        // category no longer exists in the tree
        let scope_id = if self.base_tree.contains(&self.selected_category_id) {
            self.selected_category_id.as_str()
        } else {
            self.config.default_category_id.as_str()
        };
        let filter_counts = facet_counts(
            &self.items,
            &self.config.filter_groups,
            &self.filters,
            &self.base_tree,
            scope_id,
            &*self.sorter,
            &*self.keyword_match,
        );

        let state = self
            .filters
            .to_state(&self.selected_category_id, self.group_by.as_deref());
        let encoded = encode(&state, &self.filters, &self.config.retention);

        CatalogUpdate {
            view: CatalogView {
                categories,
                filter_counts,
                active_filters: self.filters.clone(),
                selected_category_id: self.selected_category_id.clone(),
                group_by: self.group_by.clone(),
            },
            encoded,
        }
    }
}

/// Builder for [`CatalogController`]
///
/// Items default to an empty catalog, the sorter to a no-op, and the
/// keyword predicate to a case-insensitive substring match on the uid.
pub struct CatalogControllerBuilder<I> {
    items: Vec<I>,
    defs: Vec<CategoryDef>,
    config: CatalogConfig,
    sorter: Option<ItemSorter<I>>,
    keyword_match: Option<KeywordMatch<I>>,
    filter_seed: ActiveFilters,
}

impl<I: CatalogEntry + Clone> CatalogControllerBuilder<I> {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            defs: Vec::new(),
            config: CatalogConfig::default(),
            sorter: None,
            keyword_match: None,
            filter_seed: ActiveFilters::default(),
        }
    }

    /// Set the initial item list
    #[must_use]
    pub fn items(mut self, items: Vec<I>) -> Self {
        self.items = items;
        self
    }

    /// Set the category declarations
    #[must_use]
    pub fn category_defs(mut self, defs: Vec<CategoryDef>) -> Self {
        self.defs = defs;
        self
    }

    /// Set the catalog configuration
    #[must_use]
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the item sorter applied to every category's item list
    #[must_use]
    pub fn sorter(mut self, sorter: impl Fn(&mut Vec<I>) + 'static) -> Self {
        self.sorter = Some(Box::new(sorter));
        self
    }

    /// Set the keyword predicate (receives the lowercased keyword)
    #[must_use]
    pub fn keyword_match(mut self, matcher: impl Fn(&str, &I) -> bool + 'static) -> Self {
        self.keyword_match = Some(Box::new(matcher));
        self
    }

    /// Seed filter state, e.g. synonym declarations discovery cannot know
    #[must_use]
    pub fn filter_seed(mut self, seed: ActiveFilters) -> Self {
        self.filter_seed = seed;
        self
    }

    /// Build the controller; it starts in the Loading phase with the base
    /// tree already constructed from the initial items
    #[must_use]
    pub fn build(self) -> CatalogController<I> {
        let sorter = self.sorter.unwrap_or_else(|| Box::new(|_| {}));
        let keyword_match: KeywordMatch<I> = self.keyword_match.unwrap_or_else(|| {
            Box::new(|needle, item: &I| item.uid().to_lowercase().contains(needle))
        });

        let base_tree = build_tree(&self.items, &self.defs, &*sorter);
        let filters = ActiveFilters::discover_into(
            self.filter_seed.clone(),
            &self.items,
            &self.config.filter_groups,
        );
        let selected_category_id = self.config.default_category_id.clone();

        CatalogController {
            items: self.items,
            defs: self.defs,
            config: self.config,
            sorter,
            keyword_match,
            filter_seed: self.filter_seed,
            base_tree,
            filters,
            selected_category_id,
            group_by: None,
            phase: Phase::Loading,
            disposed: false,
        }
    }
}

impl<I: CatalogEntry + Clone> Default for CatalogControllerBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}
