//! Red-black order-statistic set.

use std::fmt;

use log::trace;

use crate::balance::redblack::RedBlack;
use crate::balance::Balancer;
use crate::comparator::{Comparator, OrdComparator};
use crate::core::{Core, InsertOutcome};
use crate::error::TreeError;
use crate::iter::Iter;
use crate::position::Position;

/// An ordered set backed by a red-black tree, augmented with per-node
/// subtree sizes so `rank_lt`/`rank_le` answer in O(log n).
///
/// Reads never mutate structure, so `OrderedSet<K, C>` is `Sync`
/// whenever `K` and `C` are — concurrent lookups from multiple threads
/// need no external synchronisation.
#[derive(Clone)]
pub struct OrderedSet<K, C = OrdComparator> {
    core: Core<K, C, RedBlack>,
}

impl<K> OrderedSet<K, OrdComparator> {
    /// An empty set ordered by `K`'s `Ord` implementation.
    pub fn new() -> Self {
        OrderedSet { core: Core::new(OrdComparator) }
    }
}

impl<K> Default for OrderedSet<K, OrdComparator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> OrderedSet<K, C> {
    /// An empty set ordered by a custom comparator.
    pub fn with_comparator(comp: C) -> Self {
        OrderedSet { core: Core::new(comp) }
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// The least stored key.
    ///
    /// # Panics
    /// Panics if the set is empty.
    pub fn min(&self) -> &K {
        let id = self.core.min.expect("min() called on an empty set");
        self.core.key(id)
    }

    /// The greatest stored key.
    ///
    /// # Panics
    /// Panics if the set is empty.
    pub fn max(&self) -> &K {
        let id = self.core.max.expect("max() called on an empty set");
        self.core.key(id)
    }

    pub fn begin(&self) -> Position {
        Position::of(self.core.min)
    }

    pub fn end(&self) -> Position {
        Position::end()
    }

    /// Dereference a position. Returns `None` for `end()` or a stale
    /// position whose node has since been erased.
    pub fn get(&self, pos: Position) -> Option<&K> {
        pos.node().map(|id| self.core.key(id))
    }

    pub fn advance(&self, pos: Position) -> Position {
        match pos.node() {
            Some(id) => Position::of(self.core.next(id)),
            None => Position::end(),
        }
    }

    pub fn retreat(&self, pos: Position) -> Position {
        match pos.node() {
            Some(id) => Position::of(self.core.prev(id)),
            None => Position::of(self.core.max),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.core.descend(key).0.is_some()
    }

    pub fn find(&self, key: &K) -> Position {
        Position::of(self.core.descend(key).0)
    }

    /// Insert `key`, returning a position to the (new or pre-existing)
    /// node and whether the insertion actually happened.
    pub fn insert(&mut self, key: K) -> (Position, bool) {
        match self.core.insert_structural(key) {
            InsertOutcome::Existing(id) => (Position::of(Some(id)), false),
            InsertOutcome::Inserted(id) => {
                trace!("insert: fixing up after linking a new leaf");
                RedBlack::after_insert(&mut self.core, id);
                (Position::of(Some(id)), true)
            }
        }
    }

    /// Fallible twin of [`OrderedSet::insert`]: reports allocation
    /// failure instead of panicking, and performs no mutation when it
    /// occurs.
    pub fn try_insert(&mut self, key: K) -> Result<(Position, bool), TreeError> {
        match self.core.try_insert_structural(key)? {
            InsertOutcome::Existing(id) => Ok((Position::of(Some(id)), false)),
            InsertOutcome::Inserted(id) => {
                RedBlack::after_insert(&mut self.core, id);
                Ok((Position::of(Some(id)), true))
            }
        }
    }

    /// Insert every key from `keys`, returning the number actually
    /// inserted (duplicates within `keys`, or already present, don't
    /// count). Supplemental operation, see SPEC_FULL.md §9.
    pub fn insert_many<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut inserted = 0;
        for key in keys {
            if self.insert(key).1 {
                inserted += 1;
            }
        }
        inserted
    }

    /// Remove the node at `pos`, returning a position to its successor
    /// (or `end()`). Erasing `end()` is a no-op that returns `end()`.
    pub fn erase_at(&mut self, pos: Position) -> Position {
        let id = match pos.node() {
            Some(id) => id,
            None => return Position::end(),
        };
        let next = self.core.next(id);
        let point = self.core.erase_structural(id);
        trace!("erase: fixing up after unlinking a node");
        RedBlack::after_erase(&mut self.core, point);
        Position::of(next)
    }

    /// Remove `key` if present, returning a position to its successor
    /// (or `end()` if `key` wasn't present, or was the maximum).
    pub fn erase(&mut self, key: &K) -> Position {
        match self.core.descend(key).0 {
            Some(id) => self.erase_at(Position::of(Some(id))),
            None => Position::end(),
        }
    }

    pub fn lower_bound(&self, key: &K) -> Position {
        Position::of(self.core.lower_bound(key).0)
    }

    pub fn upper_bound(&self, key: &K) -> Position {
        Position::of(self.core.upper_bound(key).0)
    }

    /// Count of stored keys strictly less than `key`.
    pub fn rank_lt(&self, key: &K) -> usize {
        self.core.rank_lt(key).0
    }

    /// Count of stored keys less than or equal to `key`.
    pub fn rank_le(&self, key: &K) -> usize {
        self.core.rank_le(key).0
    }

    /// Count of stored keys in the closed range `[lo, hi]`.
    pub fn count_in_range(&self, lo: &K, hi: &K) -> usize {
        self.rank_le(hi).saturating_sub(self.rank_lt(lo))
    }

    /// Count of stored keys strictly between `first` and `last`
    /// (exclusive), the way `std::distance` over an in-order range
    /// would, but in O(log n) rather than O(n). See `splay_tree.hpp`'s
    /// `distance`.
    pub fn distance(&self, first: &K, last: &K) -> usize {
        self.core.distance(first, last).0
    }

    pub fn iter(&self) -> Iter<'_, K, C, RedBlack> {
        Iter::new(&self.core)
    }
}

impl<K, C: Comparator<K>> fmt::Debug for OrderedSet<K, C>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C: Comparator<K>> PartialEq for OrderedSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| self.core.comp.equal(a, b))
    }
}

impl<K, C: Comparator<K>> Eq for OrderedSet<K, C> {}

impl<K: Ord> FromIterator<K> for OrderedSet<K, OrdComparator> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.insert_many(iter);
        set
    }
}

impl<'a, K, C: Comparator<K>> IntoIterator for &'a OrderedSet<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, C, RedBlack>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_lt_of_three() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many([0, 1, 2]);
        assert_eq!(set.rank_lt(&1), 1);
    }

    #[test]
    fn rank_le_of_three() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many([0, 1, 2]);
        assert_eq!(set.rank_le(&1), 2);
    }

    #[test]
    fn count_in_range_twelve_keys() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many([0, 1, 2, 3, 7, 9, 11, 15, 20, 21, 56, 70]);
        assert_eq!(set.count_in_range(&8, &70), 8);
    }

    #[test]
    fn iteration_is_sorted() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many([8, 7, 0, 1, 5, 3, -1]);
        let got: Vec<i32> = set.iter().copied().collect();
        assert_eq!(got, vec![-1, 0, 1, 3, 5, 7, 8]);
    }

    #[test]
    fn begin_after_erasing_min() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many(0..20);
        set.erase(&1);
        let begin = set.begin();
        assert_eq!(set.get(begin), Some(&0));
    }

    #[test]
    fn bounds_skip_gaps() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many([-5, -4, -3, 6, 8, 9, 10, 11, 15, 17]);
        let lb = set.lower_bound(&7);
        let ub = set.upper_bound(&13);
        assert_eq!(set.get(lb), Some(&8));
        assert_eq!(set.get(ub), Some(&15));
    }

    #[test]
    fn clone_is_independent() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many(1..=9);
        let mut clone = set.clone();
        clone.erase(&5);
        assert_eq!(clone.len(), 9);
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn insert_then_erase_is_identity() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many([3, 1, 4, 1, 5, 9, 2, 6]);
        let before = set.clone();
        assert_eq!(before, before.clone());
        let (_, inserted) = set.insert(42);
        assert!(inserted);
        set.erase(&42);
        assert_eq!(set, before);
    }

    #[test]
    fn duplicate_insert_reports_false() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        assert!(set.insert(5).1);
        assert!(!set.insert(5).1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn erase_missing_key_is_end() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert(1);
        assert!(set.erase(&99).is_end());
    }

    #[test]
    fn subtree_sizes_agree_with_len() {
        let mut set: OrderedSet<i32> = OrderedSet::new();
        set.insert_many(0..100);
        for i in 0..100 {
            set.erase(&(i * 2));
        }
        assert_eq!(set.len(), set.iter().count());
    }
}
