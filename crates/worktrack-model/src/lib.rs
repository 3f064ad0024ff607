//! Worktrack Model
//!
//! The records the dashboard keeps per project:
//! - Work items forming a weighted breakdown tree
//! - Projects and their four-stage lifecycle
//! - Issues raised against projects

pub mod error;
pub mod issue;
pub mod item;
pub mod project;

pub use error::ModelError;
pub use issue::{Issue, IssuePriority, IssueStatus};
pub use item::{ItemStatus, WorkItem};
pub use project::{validate_transition, Project, ProjectStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
