//! Forest assembly
//!
//! Turns a flat, parent-linked item list into an ordered forest and back.
//! Inputs are only ever borrowed; every returned node is a fresh copy.

use crate::error::HierarchyError;
use crate::hierarchy::{validate_hierarchy, ItemIndex};
use serde::Serialize;
use worktrack_model::WorkItem;

/// Build an ordered forest from a flat item list.
///
/// Items whose parent is missing become roots. Roots and every sibling list
/// are stably sorted by `sort_order`. Parent cycles are cut rather than
/// followed, so every input item appears in the output exactly once.
#[must_use]
pub fn build_forest(items: &[WorkItem]) -> Vec<WorkItem> {
    let index = ItemIndex::new(items);
    let forest = assemble(&index);

    tracing::debug!(
        "Built forest: {} items, {} roots, {} cycle cuts",
        index.live().len(),
        forest.len(),
        index.promoted().len()
    );
    forest
}

/// Like [`build_forest`], but rejects duplicate ids, self-parented items and
/// parent cycles instead of repairing them.
pub fn try_build_forest(items: &[WorkItem]) -> Result<Vec<WorkItem>, HierarchyError> {
    validate_hierarchy(items)?;
    Ok(build_forest(items))
}

// Nodes are built bottom-up: a pre-order listing puts every child after its
// parent, so walking it backwards finishes each subtree before it is needed.
fn assemble(index: &ItemIndex<'_>) -> Vec<WorkItem> {
    let mut order = Vec::with_capacity(index.live().len());
    let mut stack: Vec<usize> = index.roots().iter().rev().copied().collect();
    while let Some(pos) = stack.pop() {
        order.push(pos);
        stack.extend(index.children_of(pos).iter().rev().copied());
    }

    let mut built: Vec<Option<WorkItem>> = vec![None; index.len()];
    for &pos in order.iter().rev() {
        let mut node = index.item(pos).detached();
        node.children = Some(
            index
                .children_of(pos)
                .iter()
                .filter_map(|&child| built[child].take())
                .collect(),
        );
        built[pos] = Some(node);
    }

    index
        .roots()
        .iter()
        .filter_map(|&pos| built[pos].take())
        .collect()
}

/// Flatten a forest in pre-order: each node, then its whole subtree.
#[must_use]
pub fn flatten(forest: &[WorkItem]) -> Vec<WorkItem> {
    let mut out = Vec::new();
    walk(forest, |node, _| out.push(node.clone()));
    out
}

/// A flattened node with its depth below the roots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthRow {
    /// 0 for roots
    pub depth: usize,
    /// The node, without children
    pub item: WorkItem,
}

/// Flatten a forest in pre-order, annotating each row with its depth.
///
/// Used for indented tables and Gantt rows.
#[must_use]
pub fn flatten_with_depth(forest: &[WorkItem]) -> Vec<DepthRow> {
    let mut out = Vec::new();
    walk(forest, |node, depth| {
        out.push(DepthRow {
            depth,
            item: node.detached(),
        });
    });
    out
}

fn walk<F>(forest: &[WorkItem], mut visit: F)
where
    F: FnMut(&WorkItem, usize),
{
    let mut stack: Vec<(&WorkItem, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        visit(node, depth);
        stack.extend(node.children().iter().rev().map(|c| (c, depth + 1)));
    }
}
