//! Category tree construction and item assignment
//!
//! This module turns a flat item list plus a declarative category tree into
//! a runtime [`CategoryTree`]: every item is assigned to each category whose
//! declared values intersect the item's field values, unmatched items land
//! in a synthetic `other` root, and every item lands in the synthetic `all`
//! root. Empty categories are pruned, surviving categories are counted and
//! sorted, and parents with children gain a lazily-created "Other" child for
//! items no child claimed.
//!
//! The tree is an arena keyed by category id with explicit parent/child id
//! lists, so rebuilds produce structurally comparable values and no node
//! ever holds a back-reference.
//!
//! # Examples
//!
//! ```
//! use facetr::CatalogRecord;
//! use facetr::category::{CategoryDef, build_tree};
//!
//! let items = vec![
//!     CatalogRecord::new("t1").with_field("kind", "A"),
//!     CatalogRecord::new("t2").with_field("kind", "B"),
//! ];
//! let defs = vec![CategoryDef::new("kind-a", "Kind A")
//!     .with_field("kind")
//!     .with_values(["A"])];
//!
//! let tree = build_tree(&items, &defs, &|_| {});
//! assert_eq!(tree.get("kind-a").unwrap().num_items, 1);
//! assert_eq!(tree.get("all").unwrap().num_items, 2);
//! assert_eq!(tree.get("other").unwrap().num_items, 1);
//! ```

mod builder;
mod types;

pub use builder::{build_tree, recategorize};
pub use types::{ALL_CATEGORY_ID, Category, CategoryDef, CategoryTree, OTHER_CATEGORY_ID};
