//! Property tests for the quantified invariants in spec.md §8, checked
//! against `std::collections::BTreeSet` as the reference model.

use std::collections::BTreeSet;

use proptest::prelude::*;

use rankset::{OrderedSet, SplaySet};

#[derive(Clone, Copy, Debug)]
enum Op {
    Insert(i32),
    Erase(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50..50i32).prop_map(Op::Insert),
        (-50..50i32).prop_map(Op::Erase),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..200)
}

fn apply_ops_rb(ops: &[Op]) -> OrderedSet<i32> {
    let mut set = OrderedSet::new();
    for op in ops {
        match *op {
            Op::Insert(k) => {
                set.insert(k);
            }
            Op::Erase(k) => {
                set.erase(&k);
            }
        }
    }
    set
}

fn apply_ops_splay(ops: &[Op]) -> SplaySet<i32> {
    let mut set = SplaySet::new();
    for op in ops {
        match *op {
            Op::Insert(k) => {
                set.insert(k);
            }
            Op::Erase(k) => {
                set.erase(&k);
            }
        }
    }
    set
}

fn apply_ops_reference(ops: &[Op]) -> BTreeSet<i32> {
    let mut set = BTreeSet::new();
    for op in ops {
        match *op {
            Op::Insert(k) => {
                set.insert(k);
            }
            Op::Erase(k) => {
                set.remove(&k);
            }
        }
    }
    set
}

proptest! {
    #[test]
    fn rb_matches_reference_in_order(ops in ops_strategy()) {
        let set = apply_ops_rb(&ops);
        let reference = apply_ops_reference(&ops);

        // Invariant 1 + 8: in-order sequence is the deduplicated sort.
        let got: Vec<i32> = set.iter().copied().collect();
        let want: Vec<i32> = reference.iter().copied().collect();
        prop_assert_eq!(&got, &want);

        // Invariant 2: len() agrees with the in-order sequence length.
        prop_assert_eq!(set.len(), want.len());

        // Invariant 5: extremal cache.
        if let (Some(&lo), Some(&hi)) = (want.first(), want.last()) {
            prop_assert_eq!(set.min(), &lo);
            prop_assert_eq!(set.max(), &hi);
        }

        // Invariant 6 + 7: rank queries against a manual count.
        for probe in -55..55 {
            let rank_lt = want.iter().filter(|&&k| k < probe).count();
            let rank_le = want.iter().filter(|&&k| k <= probe).count();
            prop_assert_eq!(set.rank_lt(&probe), rank_lt);
            prop_assert_eq!(set.rank_le(&probe), rank_le);
            prop_assert!(rank_le - rank_lt <= 1);
        }
    }

    #[test]
    fn splay_matches_reference_in_order(ops in ops_strategy()) {
        let mut set = apply_ops_splay(&ops);
        let reference = apply_ops_reference(&ops);

        let got: Vec<i32> = set.iter().copied().collect();
        let want: Vec<i32> = reference.iter().copied().collect();
        prop_assert_eq!(&got, &want);
        prop_assert_eq!(set.len(), want.len());

        if let (Some(&lo), Some(&hi)) = (want.first(), want.last()) {
            prop_assert_eq!(set.min(), &lo);
            prop_assert_eq!(set.max(), &hi);
        }

        for probe in -55..55 {
            let rank_lt = want.iter().filter(|&&k| k < probe).count();
            let rank_le = want.iter().filter(|&&k| k <= probe).count();
            prop_assert_eq!(set.rank_lt(&probe), rank_lt);
            prop_assert_eq!(set.rank_le(&probe), rank_le);
        }
    }

    #[test]
    fn insert_then_erase_is_inverse(ops in ops_strategy(), fresh in -1000..1000i32) {
        let mut set = apply_ops_rb(&ops);
        prop_assume!(!set.contains(&fresh));
        let before: Vec<i32> = set.iter().copied().collect();
        set.insert(fresh);
        set.erase(&fresh);
        let after: Vec<i32> = set.iter().copied().collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn clone_is_independent(ops in ops_strategy(), extra in -1000..1000i32) {
        let set = apply_ops_rb(&ops);
        let mut clone = set.clone();
        let original: Vec<i32> = set.iter().copied().collect();
        clone.insert(extra);
        clone.erase(&extra);
        // mutating the clone through a real structural change and back
        // shouldn't disturb the original.
        prop_assert_eq!(set.iter().copied().collect::<Vec<i32>>(), original);
    }
}

#[test]
fn empty_set_has_no_extent() {
    let set: OrderedSet<i32> = OrderedSet::new();
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
    assert_eq!(set.rank_lt(&0), 0);
    assert_eq!(set.rank_le(&0), 0);
}

#[test]
fn splay_empty_set_has_no_extent() {
    let mut set: SplaySet<i32> = SplaySet::new();
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
    assert_eq!(set.rank_lt(&0), 0);
    assert_eq!(set.rank_le(&0), 0);
}
