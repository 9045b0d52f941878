//! Order-statistic ordered sets.
//!
//! This crate provides two ordered-set engines sharing one vocabulary of
//! operations — insert, erase, find, bounds, and the two rank queries
//! that make this crate's sets more than a sorted container:
//!
//! - [`OrderedSet`]: a red-black tree, worst-case O(log n) per operation.
//! - [`SplaySet`]: a splay tree, amortised O(log n) per operation, which
//!   concentrates future lookups near whatever was accessed most
//!   recently at the cost of mutating structure on every read.
//!
//! Both augment every node with a subtree size, so
//! [`OrderedSet::rank_lt`]/[`rank_le`](OrderedSet::rank_le) (and their
//! [`SplaySet`] equivalents) answer "how many stored keys are below
//! this threshold" in O(log n) without scanning. Combined,
//! `rank_le(hi) - rank_lt(lo)` is the count of keys in `[lo, hi]` —
//! exposed directly as `count_in_range`.
//!
//! ```
//! use rankset::OrderedSet;
//!
//! let mut set: OrderedSet<i32> = OrderedSet::new();
//! set.insert_many([0, 1, 2, 3, 7, 9, 11, 15, 20, 21, 56, 70]);
//! assert_eq!(set.count_in_range(&8, &70), 8);
//! ```

mod arena;
mod balance;
mod comparator;
mod core;
mod error;
mod iter;
mod node;
mod position;
mod rbset;
mod splayset;

pub use comparator::{Comparator, OrdComparator};
pub use error::TreeError;
pub use iter::Iter;
pub use position::Position;
pub use rbset::OrderedSet;
pub use splayset::SplaySet;
