//! Error types for hierarchy validation
//!
//! Forest assembly and progress rollup never fail; these errors only come
//! from the strict entry points that check a flat item list up front.

/// Structural problems in a flat item list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// Two items share an identifier
    #[error("duplicate item id: {id}")]
    DuplicateId {
        /// The repeated identifier
        id: String,
    },

    /// An item names itself as its parent
    #[error("item {id} is its own parent")]
    SelfParent {
        /// The offending item
        id: String,
    },

    /// Parent references form a cycle
    #[error("parent cycle among items: {}", ids.join(", "))]
    CycleDetected {
        /// Identifiers on the cycle, sorted
        ids: Vec<String>,
    },
}
