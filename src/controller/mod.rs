//! Catalog controller: orchestration and lifecycle
//!
//! The controller owns the inputs (items, category declarations,
//! configuration, the caller's sorter and keyword predicate) and reruns the
//! pipeline on every external event: rebuild or reuse the base tree, apply
//! filters, recategorize, recount. Each processed event emits an immutable
//! [`CatalogView`] snapshot plus the [`EncodedState`](crate::state::EncodedState)
//! the caller should write to its URL and storage layers.
//!
//! Lifecycle: `Uninitialized → Loading → Ready`. Construction builds the
//! base tree synchronously (Loading); [`CatalogController::initialize`]
//! resolves URL/persisted state in a single synchronous step (Ready). Events
//! arriving before Ready or after [`CatalogController::dispose`] are
//! swallowed and return `None`.

mod session;
mod types;

pub use session::{CatalogController, CatalogControllerBuilder};
pub use types::{CatalogUpdate, CatalogView, Phase};
