//! Weighted progress rollup
//!
//! Leaves are measured from their quantities; parents are always derived
//! from their children and their own quantities are ignored. Missing
//! numbers count as zero and a zero weight total yields zero progress, so
//! no division by zero ever reaches the caller.

use crate::tree::build_forest;
use worktrack_model::WorkItem;

/// Completion of a single item as a fraction in `[0, 1]`.
///
/// With children: the children's progress averaged by child weight (0 when
/// the weights sum to 0). Without: `actual / planned` capped at 1, where a
/// zero plan counts as done as soon as any actual work is logged.
#[must_use]
pub fn item_progress(item: &WorkItem) -> f64 {
    if item.is_leaf() {
        return leaf_progress(item);
    }
    node_progress(std::slice::from_ref(item))[0]
}

fn leaf_progress(item: &WorkItem) -> f64 {
    let planned = item.planned();
    let actual = item.actual();

    if planned == 0.0 {
        return if actual > 0.0 { 1.0 } else { 0.0 };
    }
    (actual / planned).min(1.0)
}

/// Progress of every node of a forest, in the pre-order of
/// [`flatten_with_depth`](crate::flatten_with_depth).
///
/// Computed bottom-up in one pass without recursion, so arbitrarily deep
/// trees are fine.
#[must_use]
pub fn node_progress(forest: &[WorkItem]) -> Vec<f64> {
    let mut order: Vec<(&WorkItem, Option<usize>)> = Vec::new();
    let mut stack: Vec<(&WorkItem, Option<usize>)> = forest.iter().rev().map(|n| (n, None)).collect();
    while let Some((node, parent)) = stack.pop() {
        let slot = order.len();
        order.push((node, parent));
        stack.extend(node.children().iter().rev().map(|c| (c, Some(slot))));
    }

    // Children always sit after their parent, so a reverse sweep sees them first.
    let mut means: Vec<WeightedMean> = order
        .iter()
        .map(|(node, _)| WeightedMean::over(node.children()))
        .collect();
    let mut progress = vec![0.0; order.len()];
    for slot in (0..order.len()).rev() {
        let (node, parent) = order[slot];
        let value = if node.is_leaf() {
            leaf_progress(node)
        } else {
            means[slot].value()
        };
        progress[slot] = value;
        if let Some(parent) = parent {
            means[parent].add(node.weight(), value);
        }
    }
    progress
}

/// Running weighted mean over a sibling set.
///
/// Weights are divided by the largest one up front so the sums stay finite
/// even for weights near `f64::MAX`.
#[derive(Debug, Default)]
struct WeightedMean {
    scale: f64,
    weighted: f64,
    total: f64,
}

impl WeightedMean {
    fn over(items: &[WorkItem]) -> Self {
        Self {
            scale: items.iter().map(WorkItem::weight).fold(0.0, f64::max),
            ..Self::default()
        }
    }

    fn add(&mut self, weight: f64, progress: f64) {
        if self.scale > 0.0 {
            let share = weight / self.scale;
            self.weighted += progress * share;
            self.total += share;
        }
    }

    fn value(&self) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            self.weighted / self.total
        }
    }
}

/// Weighted completion of a set of items as a whole percentage in `[0, 100]`.
///
/// Each item counts on its own; no tree is built. Items that do carry
/// children are rolled up through [`item_progress`]. An empty set or a zero
/// weight total gives 0.
#[must_use]
pub fn weighted_progress(items: &[WorkItem]) -> u8 {
    let mut mean = WeightedMean::over(items);
    for item in items {
        mean.add(item.weight(), item_progress(item));
    }
    to_percent(mean.value())
}

/// Progress of a project's whole flat item list.
///
/// Builds the forest first and weighs the roots, so parents count through
/// their children exactly once.
#[must_use]
pub fn rollup_progress(items: &[WorkItem]) -> u8 {
    weighted_progress(&build_forest(items))
}

/// Fraction in `[0, 1]` as a rounded whole percentage. Out of range values
/// are clamped and NaN maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_percent(fraction: f64) -> u8 {
    // NaN casts to 0.
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}
