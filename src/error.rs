//! Error types for tree operations.
//!
//! Every failure is reported before the tree is modified, so an `Err` never leaves a half-applied
//! mutation behind.

use thiserror::Error;

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while navigating or mutating a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Tried to advance a position that is already at the end.
    #[error("cannot advance past the end of the traversal")]
    PastEnd,

    /// Tried to retreat a position that is already at the beginning.
    #[error("cannot retreat before the beginning of the traversal")]
    BeforeBegin,

    /// The position is null, belongs to another tree, or was invalidated by a structural change
    /// made after it was obtained.
    #[error("invalid position")]
    InvalidPosition,

    /// The end position doesn't refer to an element, so it can't be read, erased or extracted.
    #[error("the end position does not refer to an element")]
    EndPosition,

    /// Merging requires both trees to use equal allocators.
    #[error("cannot merge trees with different allocators")]
    AllocatorMismatch,
}

impl Error {
    /// Whether this error came from stepping outside `[begin, end]`.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::PastEnd | Self::BeforeBegin)
    }
}
