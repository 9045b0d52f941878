//! Error taxonomy for the tree engines.
//!
//! Most operations in this crate are infallible the way the standard
//! library's own collections are: a duplicate insert isn't an error (it's
//! `(iterator, false)`), erasing a missing key isn't an error (it's
//! `end()`), and misusing an iterator (dereferencing `end()`, calling
//! `min`/`max` on an empty tree) is a programming error that may panic.
//! The one genuinely fallible case is allocation failure, surfaced
//! through [`TreeError`] by the `try_insert` entry points.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can be returned by the `try_insert` family of operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The arena's backing storage could not grow to hold a new node.
    ///
    /// No structural mutation is performed before the reservation
    /// succeeds, so the tree is left exactly as it was before the call.
    #[error("failed to reserve storage for a new node: {0}")]
    AllocationFailed(#[from] TryReserveError),
}
