//! Filter/category state codec
//!
//! Serializes the active category id, keyword, group-by mode, and per-group
//! active value selections into a URL query string plus a persisted
//! preference blob, and resolves them back with well-defined precedence:
//! URL parameters win, groups absent from the URL fall back to persisted
//! selections (retention-listed groups only), and everything else defaults
//! to inactive.
//!
//! Both directions are pure string functions; the engine never touches a
//! real URL bar or storage backend. Malformed input is logged and treated
//! as absent, never fatal. Callers wanting strict parsing use the
//! `parse_*` helpers directly.

mod codec;
mod error;
mod types;

pub use codec::{decode, encode, parse_group_param, parse_stored};
pub use error::StateError;
pub use types::{CATEGORY_PARAM, CatalogState, EncodedState, GROUP_BY_PARAM, KEYWORD_PARAM, StoredFilters};
