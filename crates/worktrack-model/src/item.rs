//! Work items
//!
//! A work item is one row of a project's execution breakdown. Raw records
//! arrive flat, linked only by `parent_id`; `children` is filled in by the
//! forest builder and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Execution status of a single work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Planned, not started
    #[default]
    Plan,
    /// Work is under way
    Progress,
    /// Done
    Complete,
}

impl ItemStatus {
    /// Check if the item is finished
    #[inline]
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Plan => "Plan",
            Self::Progress => "Progress",
            Self::Complete => "Complete",
        };
        f.write_str(s)
    }
}

/// A node in a project's work breakdown structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Opaque, stable identifier
    pub id: String,
    /// Owning project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Execution status
    #[serde(default)]
    pub status: ItemStatus,
    /// Parent item; absent or empty means root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Ordering among siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    /// Planned quantity of work (leaves only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_quantity: Option<f64>,
    /// Actual quantity of work done (leaves only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_quantity: Option<f64>,
    /// Share of the parent's (or project's) total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Planned start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_start_date: Option<NaiveDate>,
    /// Planned finish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_end_date: Option<NaiveDate>,
    /// Actual start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start_date: Option<NaiveDate>,
    /// Actual finish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end_date: Option<NaiveDate>,
    /// Populated by the forest builder only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<WorkItem>>,
}

impl WorkItem {
    /// Create a root item with every optional field unset
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// With owning project
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// With parent item
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// With sibling sort key
    #[inline]
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// With weight
    #[inline]
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// With planned and actual quantities
    #[inline]
    #[must_use]
    pub fn with_quantities(mut self, planned: f64, actual: f64) -> Self {
        self.planned_quantity = Some(planned);
        self.actual_quantity = Some(actual);
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// With planned start
    #[inline]
    #[must_use]
    pub fn with_plan_start(mut self, date: NaiveDate) -> Self {
        self.plan_start_date = Some(date);
        self
    }

    /// With planned finish
    #[inline]
    #[must_use]
    pub fn with_plan_end(mut self, date: NaiveDate) -> Self {
        self.plan_end_date = Some(date);
        self
    }

    /// With actual start
    #[inline]
    #[must_use]
    pub fn with_actual_start(mut self, date: NaiveDate) -> Self {
        self.actual_start_date = Some(date);
        self
    }

    /// With actual finish
    #[inline]
    #[must_use]
    pub fn with_actual_end(mut self, date: NaiveDate) -> Self {
        self.actual_end_date = Some(date);
        self
    }

    /// With explicit children, as produced by the forest builder
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: Vec<WorkItem>) -> Self {
        self.children = Some(children);
        self
    }

    /// Parent identifier, treating an empty string as absent
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }

    /// Sibling sort key (missing is 0)
    #[inline]
    #[must_use]
    pub fn sort_key(&self) -> i64 {
        self.sort_order.unwrap_or(0)
    }

    /// Weight, coerced to a non-negative finite number
    #[inline]
    #[must_use]
    pub fn weight(&self) -> f64 {
        non_negative(self.weight)
    }

    /// Planned quantity, coerced to a non-negative finite number
    #[inline]
    #[must_use]
    pub fn planned(&self) -> f64 {
        non_negative(self.planned_quantity)
    }

    /// Actual quantity, coerced to a non-negative finite number
    #[inline]
    #[must_use]
    pub fn actual(&self) -> f64 {
        non_negative(self.actual_quantity)
    }

    /// Children slice (empty when not built or a leaf)
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[WorkItem] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// An item is a parent iff it has at least one child after assembly
    #[inline]
    #[must_use]
    pub fn is_parent(&self) -> bool {
        !self.children().is_empty()
    }

    /// Check if this item is measured directly from its quantities
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.is_parent()
    }

    /// Copy of this item without its children
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            id: self.id.clone(),
            project_id: self.project_id.clone(),
            name: self.name.clone(),
            status: self.status,
            parent_id: self.parent_id.clone(),
            sort_order: self.sort_order,
            planned_quantity: self.planned_quantity,
            actual_quantity: self.actual_quantity,
            weight: self.weight,
            plan_start_date: self.plan_start_date,
            plan_end_date: self.plan_end_date,
            actual_start_date: self.actual_start_date,
            actual_end_date: self.actual_end_date,
            children: None,
        }
    }
}

// Missing, negative and NaN inputs all collapse to zero.
fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
