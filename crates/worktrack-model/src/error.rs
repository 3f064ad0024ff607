//! Error types for the worktrack model

use crate::project::ProjectStatus;

/// Model-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Project lifecycle transition that is not allowed
    #[error("illegal project transition: {from} -> {to}")]
    IllegalTransition {
        /// Current stage
        from: ProjectStatus,
        /// Requested stage
        to: ProjectStatus,
    },
}
