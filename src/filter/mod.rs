//! Active filter state and the filtering engine
//!
//! [`ActiveFilters`] is the single source of truth for the live filter
//! state: the distinguished keyword filter plus one discovered value map per
//! facet group. [`apply_filters`] reduces an item list through the keyword
//! stage and the group stage (OR within a group, AND across groups),
//! preserving input order.
//!
//! Candidate values are discovered by scanning item fields, not statically
//! declared; rediscovery after an item-list change carries the previous
//! `active` flags forward so user selections survive catalog refreshes.

mod engine;
mod types;

pub use engine::{apply_filters, filter_by_keyword};
pub use types::{ActiveFilters, FilterEntry, FilterGroup, KeywordFilter};
