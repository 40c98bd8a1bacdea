use std::collections::TryReserveError;
use thiserror::Error;

/// An error returned when a tree cannot allocate a node for a new element.
///
/// The tree is left exactly as it was before the failed operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AllocError {
    /// Every index the node store can address is already in use.
    #[error("tree cannot hold more than {max} elements")]
    CapacityOverflow {
        /// The maximum number of elements the tree can hold.
        max: usize,
    },

    /// The global allocator refused to grow the node store.
    #[error("node allocation failed: {0}")]
    Reserve(#[from] TryReserveError),
}
