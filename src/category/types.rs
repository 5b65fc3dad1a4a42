//! Category declarations and the runtime category arena
//!
//! `CategoryDef` is the caller-authored declaration; `Category` and
//! `CategoryTree` are what the builder produces. These are pure data
//! structures with direct field access; all construction logic lives in the
//! builder module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the synthetic root category containing every item
pub const ALL_CATEGORY_ID: &str = "all";

/// Id of the synthetic root category for items no declared category claimed
pub const OTHER_CATEGORY_ID: &str = "other";

/// Declarative category description supplied by the caller
///
/// A definition without `subcategories` is a leaf matched by `field` and
/// `values`; one with `subcategories` matches through its children, and
/// through its own `values` when it declares any. Children inherit `field`
/// from the nearest ancestor that declares one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Globally unique category id
    pub id: String,

    /// Display label
    pub label: String,

    /// Item field inspected by this category and its children
    #[serde(default)]
    pub field: Option<String>,

    /// Field values this category matches
    #[serde(default)]
    pub values: Vec<String>,

    /// Child categories, in display order
    #[serde(default)]
    pub subcategories: Vec<CategoryDef>,
}

impl CategoryDef {
    /// Create a definition with no matching rules
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field: None,
            values: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    /// Set the inspected item field
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the matched values
    #[must_use]
    pub fn with_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Append a child definition
    #[must_use]
    pub fn with_subcategory(mut self, sub: Self) -> Self {
        self.subcategories.push(sub);
        self
    }
}

/// Runtime category node holding assigned items
///
/// `match_field` is the definition's own `field` or the nearest ancestor's,
/// resolved once when the tree is seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category<I> {
    pub id: String,
    pub label: String,
    pub match_field: Option<String>,
    pub values: Vec<String>,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub items: Vec<I>,
    pub num_items: usize,
}

impl<I> Category<I> {
    pub(crate) fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            match_field: None,
            values: Vec::new(),
            parent: None,
            children: Vec::new(),
            items: Vec::new(),
            num_items: 0,
        }
    }

    /// True when this node declares values of its own to match against
    #[must_use]
    pub fn has_match_rule(&self) -> bool {
        self.match_field.is_some() && !self.values.is_empty()
    }
}

/// Arena of category nodes keyed by id, with explicit root order
///
/// Roots are always `all`, the declared top-level categories in declaration
/// order, then `other`. The two synthetic roots survive pruning even when
/// empty so callers always have a stable pair to render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryTree<I> {
    pub(crate) nodes: BTreeMap<String, Category<I>>,
    pub(crate) roots: Vec<String>,
}

impl<I> CategoryTree<I> {
    /// Look up a category by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Category<I>> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Category<I>> {
        self.nodes.get_mut(id)
    }

    /// True when a category with this id exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root category ids in display order
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Number of categories in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no categories at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of every category, root order first then depth-first
    #[must_use]
    pub fn ids_in_order(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.collect_ids(root, &mut out);
        }
        out
    }

    fn collect_ids(&self, id: &str, out: &mut Vec<String>) {
        if let Some(node) = self.nodes.get(id) {
            out.push(node.id.clone());
            for child in node.children.clone() {
                self.collect_ids(&child, out);
            }
        }
    }

    /// Walk ancestors from `id` (exclusive) to its root
    #[must_use]
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(|n| n.parent.clone());
        while let Some(parent_id) = current {
            current = self.nodes.get(&parent_id).and_then(|n| n.parent.clone());
            out.push(parent_id);
        }
        out
    }
}
