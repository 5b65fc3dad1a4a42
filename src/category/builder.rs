//! Tree construction: matching, assignment, pruning, and processing
//!
//! `build_tree` produces the base tree for a fresh item list; `recategorize`
//! re-runs assignment over an existing tree's structure without pruning, so
//! filtered views and count scopes keep every category addressable even when
//! its filtered item list drops to zero.
//!
//! Matching walks each declared top-level subtree collecting every node
//! whose own values intersect the item's field values; descent never stops
//! at a matching node, and sibling matches are deliberately non-exclusive.
//! Assignment then closes over ancestors so a parent always holds at least
//! the union of its children's items.

use std::collections::BTreeSet;

use super::types::{ALL_CATEGORY_ID, Category, CategoryDef, CategoryTree, OTHER_CATEGORY_ID};
use crate::CatalogEntry;

/// Build a category tree from scratch
///
/// Seeds the synthetic `all` and `other` roots plus one node per definition,
/// assigns every item, prunes empty declared categories, then counts, sorts,
/// and synthesizes leftover "Other" children. The synthetic roots survive
/// pruning even when the catalog is empty.
pub fn build_tree<I: CatalogEntry + Clone>(
    items: &[I],
    defs: &[CategoryDef],
    sorter: &dyn Fn(&mut Vec<I>),
) -> CategoryTree<I> {
    let mut tree = seed_tree(defs);
    categorize(&mut tree, items);
    prune(&mut tree);
    process(&mut tree, sorter);
    tree
}

/// Re-run assignment over an existing tree's structure
///
/// Clears every node's items, assigns the given items, and reprocesses.
/// No pruning happens here: the result has exactly the same node set as the
/// input tree, with possibly-zero counts.
pub fn recategorize<I: CatalogEntry + Clone>(
    tree: &CategoryTree<I>,
    items: &[I],
    sorter: &dyn Fn(&mut Vec<I>),
) -> CategoryTree<I> {
    let mut next = CategoryTree {
        nodes: tree
            .nodes
            .iter()
            .map(|(id, node)| {
                let mut cleared = node.clone();
                cleared.items = Vec::new();
                cleared.num_items = 0;
                (id.clone(), cleared)
            })
            .collect(),
        roots: tree.roots.clone(),
    };
    categorize(&mut next, items);
    process(&mut next, sorter);
    next
}

fn seed_tree<I>(defs: &[CategoryDef]) -> CategoryTree<I> {
    let mut tree = CategoryTree {
        nodes: std::collections::BTreeMap::new(),
        roots: Vec::new(),
    };

    tree.nodes.insert(
        ALL_CATEGORY_ID.to_string(),
        Category::new(ALL_CATEGORY_ID, "All Items"),
    );
    tree.roots.push(ALL_CATEGORY_ID.to_string());

    for def in defs {
        seed_def(&mut tree, def, None, None);
        tree.roots.push(def.id.clone());
    }

    tree.nodes.insert(
        OTHER_CATEGORY_ID.to_string(),
        Category::new(OTHER_CATEGORY_ID, "Other"),
    );
    tree.roots.push(OTHER_CATEGORY_ID.to_string());

    tree
}

fn seed_def<I>(
    tree: &mut CategoryTree<I>,
    def: &CategoryDef,
    parent: Option<&str>,
    inherited_field: Option<&str>,
) {
    let match_field = def
        .field
        .clone()
        .or_else(|| inherited_field.map(str::to_string));

    let mut node = Category::new(&def.id, &def.label);
    node.match_field = match_field.clone();
    node.values = def.values.clone();
    node.parent = parent.map(str::to_string);
    node.children = def.subcategories.iter().map(|s| s.id.clone()).collect();
    tree.nodes.insert(def.id.clone(), node);

    for sub in &def.subcategories {
        seed_def(tree, sub, Some(&def.id), match_field.as_deref());
    }
}

fn categorize<I: CatalogEntry + Clone>(tree: &mut CategoryTree<I>, items: &[I]) {
    let declared_roots: Vec<String> = tree
        .roots
        .iter()
        .filter(|r| r.as_str() != ALL_CATEGORY_ID && r.as_str() != OTHER_CATEGORY_ID)
        .cloned()
        .collect();

    for item in items {
        let mut assigned: BTreeSet<String> = BTreeSet::new();

        for root in &declared_roots {
            let mut matches = Vec::new();
            matching_descendants(tree, root, item, &mut matches);
            for matched in matches {
                for ancestor in tree.ancestors(&matched) {
                    assigned.insert(ancestor);
                }
                assigned.insert(matched);
            }
        }

        let matched_any = !assigned.is_empty();
        for id in &assigned {
            add_item(tree, id, item);
        }
        if !matched_any {
            add_item(tree, OTHER_CATEGORY_ID, item);
        }
        add_item(tree, ALL_CATEGORY_ID, item);
    }
}

fn matching_descendants<I: CatalogEntry>(
    tree: &CategoryTree<I>,
    id: &str,
    item: &I,
    out: &mut Vec<String>,
) {
    let Some(node) = tree.get(id) else {
        return;
    };

    if node.has_match_rule() {
        let matched = node
            .match_field
            .as_deref()
            .and_then(|field| item.field(field))
            .is_some_and(|value| value.intersects(&node.values));
        if matched {
            out.push(node.id.clone());
        }
    }

    for child in &node.children {
        matching_descendants(tree, child, item, out);
    }
}

fn add_item<I: CatalogEntry + Clone>(tree: &mut CategoryTree<I>, id: &str, item: &I) {
    if let Some(node) = tree.get_mut(id)
        && !node.items.iter().any(|existing| existing.uid() == item.uid())
    {
        node.items.push(item.clone());
    }
}

fn prune<I>(tree: &mut CategoryTree<I>) {
    let declared_roots: Vec<String> = tree
        .roots
        .iter()
        .filter(|r| r.as_str() != ALL_CATEGORY_ID && r.as_str() != OTHER_CATEGORY_ID)
        .cloned()
        .collect();

    for root in declared_roots {
        if tree.get(&root).is_some_and(|n| n.items.is_empty()) {
            remove_subtree(tree, &root);
            tree.roots.retain(|r| r != &root);
        } else {
            prune_children(tree, &root);
        }
    }
}

fn prune_children<I>(tree: &mut CategoryTree<I>, id: &str) {
    let children = tree.get(id).map(|n| n.children.clone()).unwrap_or_default();
    let mut surviving = Vec::new();

    for child in children {
        if tree.get(&child).is_some_and(|n| n.items.is_empty()) {
            remove_subtree(tree, &child);
        } else {
            prune_children(tree, &child);
            surviving.push(child);
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.children = surviving;
    }
}

fn remove_subtree<I>(tree: &mut CategoryTree<I>, id: &str) {
    if let Some(node) = tree.nodes.remove(id) {
        for child in node.children {
            remove_subtree(tree, &child);
        }
    }
}

fn process<I: CatalogEntry + Clone>(tree: &mut CategoryTree<I>, sorter: &dyn Fn(&mut Vec<I>)) {
    for id in tree.ids_in_order() {
        if let Some(node) = tree.get_mut(&id) {
            node.num_items = node.items.len();
            sorter(&mut node.items);
        }
    }

    // Items a parent holds that no child claimed surface in a synthesized
    // "Other" child, keeping parent membership visually accounted for.
    let parents: Vec<String> = tree
        .ids_in_order()
        .into_iter()
        .filter(|id| tree.get(id).is_some_and(|n| !n.children.is_empty()))
        .collect();

    for parent_id in parents {
        let Some(parent) = tree.get(&parent_id) else {
            continue;
        };
        let children = parent.children.clone();
        let parent_items = parent.items.clone();

        let mut claimed: BTreeSet<String> = BTreeSet::new();
        for child in &children {
            if let Some(node) = tree.get(child) {
                claimed.extend(node.items.iter().map(|i| i.uid().to_string()));
            }
        }

        let leftovers: Vec<I> = parent_items
            .into_iter()
            .filter(|i| !claimed.contains(i.uid()))
            .collect();
        if leftovers.is_empty() {
            continue;
        }

        let other_id = format!("{parent_id}-{OTHER_CATEGORY_ID}");
        let mut items = leftovers;
        sorter(&mut items);
        let num_items = items.len();

        if let Some(existing) = tree.get_mut(&other_id) {
            existing.items = items;
            existing.num_items = num_items;
        } else {
            let mut other = Category::new(&other_id, "Other");
            other.parent = Some(parent_id.clone());
            other.items = items;
            other.num_items = num_items;
            tree.nodes.insert(other_id.clone(), other);
        }

        if let Some(parent) = tree.get_mut(&parent_id)
            && !parent.children.contains(&other_id)
        {
            parent.children.push(other_id);
        }
    }
}
