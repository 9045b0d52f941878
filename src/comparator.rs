//! Key comparator.

use core::cmp::Ordering;

/// A context for comparing keys.
///
/// Keys don't need to implement `Ord`. They are compared through a
/// comparator object, so that smaller "context free" keys can be stored
/// and ordered some other way (case-insensitive strings, keys ordered by
/// a secondary field, etc).
///
/// Equality is always derived from `less`: `a == b` iff
/// `!less(a, b) && !less(b, a)`. No operation in this crate calls
/// [`PartialEq`] or [`Eq`] on `K` directly.
pub trait Comparator<K> {
    /// Is `a` strictly less than `b`?
    fn less(&self, a: &K, b: &K) -> bool;

    /// Are `a` and `b` equivalent under this ordering?
    fn equal(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Three-way comparison, derived from `less` by default.
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// The default comparator: orders keys by their [`Ord`] implementation.
///
/// This is a zero-sized type, so `OrderedSet<K>` and `SplaySet<K>` pay
/// nothing for carrying it around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrdComparator;

impl<K: Ord> Comparator<K> for OrdComparator {
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    fn cmp(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
