//! Worktrack Core
//!
//! Pure functions over a project's work items:
//! - **Tree**: assemble a flat parent-linked list into an ordered forest, and
//!   flatten it back
//! - **Progress**: weighted rollup of leaf quantities into a percentage
//!
//! # Quick Start
//!
//! ```rust
//! use worktrack_core::prelude::*;
//!
//! let items = vec![
//!     WorkItem::new("site").with_weight(100.0),
//!     WorkItem::new("dig").with_parent("site").with_weight(40.0).with_quantities(10.0, 10.0),
//!     WorkItem::new("pour").with_parent("site").with_weight(60.0).with_quantities(10.0, 0.0),
//! ];
//!
//! let forest = build_forest(&items);
//! assert_eq!(forest.len(), 1);
//! assert_eq!(rollup_progress(&items), 40);
//! ```

pub mod error;
pub mod hierarchy;
pub mod progress;
pub mod tree;

pub use error::HierarchyError;
pub use hierarchy::{validate_hierarchy, ItemIndex};
pub use progress::{item_progress, node_progress, rollup_progress, to_percent, weighted_progress};
pub use tree::{build_forest, flatten, flatten_with_depth, try_build_forest, DepthRow};

/// Common imports for working with work item trees
pub mod prelude {
    pub use crate::{
        build_forest, flatten, flatten_with_depth, item_progress, node_progress, rollup_progress,
        to_percent, try_build_forest, validate_hierarchy, weighted_progress, DepthRow,
        HierarchyError,
    };
    pub use worktrack_model::{ItemStatus, WorkItem};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
