//! Project issues

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Issue workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Newly raised
    #[default]
    Open,
    /// Being worked on
    InProgress,
    /// Closed
    Resolved,
}

/// Issue severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum IssuePriority {
    /// Blocks delivery
    Critical,
    /// Needs attention this week
    High,
    /// Normal
    #[default]
    Medium,
    /// Whenever
    Low,
}

impl std::fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

/// An issue raised against a project
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Issue identifier
    pub id: String,
    /// Owning project
    #[serde(default)]
    pub project_id: String,
    /// Short title
    pub title: String,
    /// Workflow state
    #[serde(default)]
    pub status: IssueStatus,
    /// Severity
    #[serde(default)]
    pub priority: IssuePriority,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Person responsible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Creation timestamp as recorded (`yyyy-MM-dd` or `yyyy-MM-dd HH:mm`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Resolution timestamp as recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
}

impl Issue {
    /// Create an open, medium-priority issue
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: IssuePriority) -> Self {
        self.priority = priority;
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = status;
        self
    }

    /// With creation timestamp
    #[inline]
    #[must_use]
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Check if the issue is resolved
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == IssueStatus::Resolved
    }

    /// Unresolved and Critical or High
    #[inline]
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        !self.is_resolved()
            && matches!(self.priority, IssuePriority::Critical | IssuePriority::High)
    }

    /// Calendar day the issue was created, if the timestamp parses
    #[must_use]
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_day)
    }

    /// Mark resolved at `at`
    pub fn resolve(&mut self, at: impl Into<String>) {
        self.status = IssueStatus::Resolved;
        self.resolved_at = Some(at.into());
    }

    /// Reopen a resolved issue; it goes back to in-progress
    pub fn reopen(&mut self) {
        self.status = IssueStatus::InProgress;
        self.resolved_at = None;
    }
}

fn parse_day(stamp: &str) -> Option<NaiveDate> {
    let day = stamp.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
