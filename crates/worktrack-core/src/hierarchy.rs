//! Parent/child index over a flat item list
//!
//! [`ItemIndex`] resolves parent references once so that forest assembly and
//! validation share the same view of the hierarchy. It never holds back
//! references: each position only records the positions of its children.

use crate::error::HierarchyError;
use petgraph::algo::kosaraju_scc;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use worktrack_model::WorkItem;

/// Resolved hierarchy of a borrowed item slice
#[derive(Debug)]
pub struct ItemIndex<'a> {
    items: &'a [WorkItem],
    positions: HashMap<&'a str, usize>,
    live: Vec<usize>,
    shadowed: Vec<usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    promoted: Vec<usize>,
}

impl<'a> ItemIndex<'a> {
    /// Index `items`, attach children, cut cycles and sort siblings
    #[must_use]
    pub fn new(items: &'a [WorkItem]) -> Self {
        let mut index = Self::resolve(items);
        index.attach();
        index.break_cycles();
        index.sort_siblings();
        index
    }

    // Identifier lookup only; nothing attached or repaired yet.
    fn resolve(items: &'a [WorkItem]) -> Self {
        let mut positions = HashMap::with_capacity(items.len());
        let mut shadowed = Vec::new();
        for (pos, item) in items.iter().enumerate() {
            if let Some(prev) = positions.insert(item.id.as_str(), pos) {
                shadowed.push(prev);
            }
        }

        // Last occurrence of an identifier wins.
        let live: Vec<usize> = (0..items.len())
            .filter(|&pos| positions.get(items[pos].id.as_str()) == Some(&pos))
            .collect();

        Self {
            items,
            positions,
            live,
            shadowed,
            children: vec![Vec::new(); items.len()],
            roots: Vec::new(),
            promoted: Vec::new(),
        }
    }

    fn attach(&mut self) {
        for &pos in &self.live {
            match self.parent_position(pos) {
                Some(parent) if parent != pos => self.children[parent].push(pos),
                Some(_) => {
                    tracing::warn!("Item {} is its own parent, treating as root", self.items[pos].id);
                    self.roots.push(pos);
                }
                None => {
                    if let Some(parent) = self.items[pos].parent() {
                        tracing::warn!(
                            "Item {} references missing parent {}, treating as root",
                            self.items[pos].id,
                            parent
                        );
                    }
                    self.roots.push(pos);
                }
            }
        }
    }

    /// Items on a parent cycle are unreachable from every root. Each cycle is
    /// cut at its member that appears first in the input.
    fn break_cycles(&mut self) {
        let mut reached = vec![false; self.items.len()];
        for root in self.roots.clone() {
            self.mark(root, &mut reached);
        }

        for pos in self.live.clone() {
            if reached[pos] {
                continue;
            }
            let cut = self.cycle_head(pos, &reached);
            if let Some(parent) = self.parent_position(cut) {
                self.children[parent].retain(|&c| c != cut);
            }
            tracing::warn!(
                "Item {} is on a parent cycle, promoting to root",
                self.items[cut].id
            );
            self.roots.push(cut);
            self.promoted.push(cut);
            self.mark(cut, &mut reached);
        }
    }

    // Walk parent links from an unreached item until one repeats, then pick
    // the earliest member of that loop.
    fn cycle_head(&self, start: usize, reached: &[bool]) -> usize {
        let mut seen = vec![false; self.items.len()];
        let mut cur = start;
        while !seen[cur] {
            seen[cur] = true;
            match self.parent_position(cur) {
                Some(parent) if !reached[parent] => cur = parent,
                _ => return cur,
            }
        }

        let mut head = cur;
        let mut member = cur;
        loop {
            match self.parent_position(member) {
                Some(parent) if parent != cur => {
                    head = head.min(parent);
                    member = parent;
                }
                _ => return head,
            }
        }
    }

    fn mark(&self, from: usize, reached: &mut [bool]) {
        let mut stack = vec![from];
        while let Some(pos) = stack.pop() {
            if reached[pos] {
                continue;
            }
            reached[pos] = true;
            stack.extend(self.children[pos].iter().copied());
        }
    }

    fn sort_siblings(&mut self) {
        let items = self.items;
        self.roots.sort_by_key(|&pos| items[pos].sort_key());
        for list in &mut self.children {
            list.sort_by_key(|&pos| items[pos].sort_key());
        }
    }

    /// Position of the item's parent as recorded, if it resolves
    #[must_use]
    pub fn parent_position(&self, pos: usize) -> Option<usize> {
        self.items[pos]
            .parent()
            .and_then(|parent| self.positions.get(parent))
            .copied()
    }

    /// Borrow the item at `pos`
    #[inline]
    #[must_use]
    pub fn item(&self, pos: usize) -> &'a WorkItem {
        &self.items[pos]
    }

    /// Root positions, sorted by sort key
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Child positions of `pos`, sorted by sort key
    #[inline]
    #[must_use]
    pub fn children_of(&self, pos: usize) -> &[usize] {
        &self.children[pos]
    }

    /// Number of indexed input positions, shadowed duplicates included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the indexed slice is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions that survived duplicate elimination, in input order
    #[inline]
    #[must_use]
    pub fn live(&self) -> &[usize] {
        &self.live
    }

    /// Positions promoted to root to cut a parent cycle
    #[inline]
    #[must_use]
    pub fn promoted(&self) -> &[usize] {
        &self.promoted
    }

    /// Check if no parent cycle had to be cut
    #[inline]
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.promoted.is_empty()
    }
}

/// Validate a flat item list before building a forest from it.
///
/// Reports, in this order: duplicate identifiers, items parented to
/// themselves, and parent cycles. Dangling parent references are not errors.
pub fn validate_hierarchy(items: &[WorkItem]) -> Result<(), HierarchyError> {
    let index = ItemIndex::resolve(items);

    if let Some(&pos) = index.shadowed.first() {
        return Err(HierarchyError::DuplicateId {
            id: items[pos].id.clone(),
        });
    }

    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    for &pos in index.live() {
        graph.add_node(pos);
        if let Some(parent) = index.parent_position(pos) {
            if parent == pos {
                return Err(HierarchyError::SelfParent {
                    id: items[pos].id.clone(),
                });
            }
            graph.add_edge(parent, pos, ());
        }
    }

    // Self loops are gone, so any component with more than one member is a cycle.
    let mut ids: Vec<String> = kosaraju_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .flatten()
        .map(|pos| items[pos].id.clone())
        .collect();
    if ids.is_empty() {
        return Ok(());
    }
    ids.sort();
    Err(HierarchyError::CycleDetected { ids })
}
