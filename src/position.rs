//! Opaque iterator positions.
//!
//! Spec-level "iterator" here is a `Position`: a handle to one slot in a
//! tree (or the past-the-end slot), analogous to `cranelift_bforest`'s
//! own habit of handing callers a small `Node` id rather than a pointer.
//! `Position` carries no borrow, so it stays valid to hold across calls
//! the way a C++ iterator would, with the same caveat spec.md §3 states:
//! using one after its node has been erased is a precondition violation.

use crate::node::NodeId;

/// A handle to a tree slot, or the past-the-end position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position(pub(crate) Option<NodeId>);

impl Position {
    pub(crate) fn end() -> Self {
        Position(None)
    }

    pub(crate) fn of(id: Option<NodeId>) -> Self {
        Position(id)
    }

    pub(crate) fn node(self) -> Option<NodeId> {
        self.0
    }

    /// Is this the past-the-end position?
    pub fn is_end(self) -> bool {
        self.0.is_none()
    }
}
