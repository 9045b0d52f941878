//! The splay-tree balancing discipline.
//!
//! Every public operation ends by splaying the node it touched (or the
//! last node visited, on a miss) to the root via zig/zig-zig/zig-zag
//! rotations, per `splay_tree.hpp`'s `splay()`. Unlike the red-black
//! engine, reads mutate structure here, which is why [`crate::SplaySet`]
//! is not `Sync`.

use crate::comparator::Comparator;
use crate::core::{Core, ErasePoint};
use crate::node::{NodeId, SplayAug};

use super::Balancer;

/// Marker type selecting the splay engine.
pub(crate) struct Splay;

impl<K, C: Comparator<K>> Balancer<K, C> for Splay {
    type Aug = SplayAug;

    fn new_leaf_aug() -> SplayAug {
        SplayAug { size: 1 }
    }

    fn adopt_position(_moved: &mut SplayAug, _vacated: &SplayAug) {
        // Splay nodes carry no colour or other positional state to copy.
    }

    fn after_insert(core: &mut Core<K, C, Self>, new: NodeId) {
        let parent = core.arena.get(new).parent;
        core.recompute_ancestors(parent);
        splay(core, new);
    }

    fn after_erase(core: &mut Core<K, C, Self>, point: ErasePoint<SplayAug>) {
        core.recompute_ancestors(point.anchor);
        // Splaying the hole's former parent to the root keeps the next
        // access cheap, mirroring `splay_tree.hpp`'s erase, which splays
        // the removed node's parent after unlinking it.
        if let Some(anchor) = point.anchor {
            splay(core, anchor);
        }
    }

    fn after_access(core: &mut Core<K, C, Self>, node: NodeId) {
        splay(core, node);
    }
}

/// Splay `node` to the root with the standard zig / zig-zig / zig-zag
/// rotations. `Core::rotate_left`/`rotate_right` already recompute the
/// two rotated nodes' sizes, so no extra bookkeeping is needed here.
fn splay<K, C: Comparator<K>>(core: &mut Core<K, C, Splay>, node: NodeId) {
    loop {
        let parent = match core.arena.get(node).parent {
            Some(p) => p,
            None => break,
        };
        let grandparent = core.arena.get(parent).parent;

        match grandparent {
            None => {
                // Zig: node is a child of the root.
                if core.arena.get(parent).left == Some(node) {
                    core.rotate_right(parent);
                } else {
                    core.rotate_left(parent);
                }
            }
            Some(g) => {
                let parent_is_left = core.arena.get(g).left == Some(parent);
                let node_is_left = core.arena.get(parent).left == Some(node);
                if parent_is_left && node_is_left {
                    // Zig-zig: two left steps.
                    core.rotate_right(g);
                    core.rotate_right(parent);
                } else if !parent_is_left && !node_is_left {
                    // Zig-zig: two right steps.
                    core.rotate_left(g);
                    core.rotate_left(parent);
                } else if parent_is_left && !node_is_left {
                    // Zig-zag.
                    core.rotate_left(parent);
                    core.rotate_right(g);
                } else {
                    // Zig-zag, mirrored.
                    core.rotate_right(parent);
                    core.rotate_left(g);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::OrdComparator;
    use crate::core::InsertOutcome;

    type TestCore = Core<i32, OrdComparator, Splay>;

    fn insert(core: &mut TestCore, key: i32) {
        if let InsertOutcome::Inserted(id) = core.insert_structural(key) {
            <Splay as Balancer<i32, OrdComparator>>::after_insert(core, id);
        }
    }

    #[test]
    fn find_splays_the_accessed_key_to_the_root() {
        let mut core = TestCore::new(OrdComparator);
        for key in 0..20 {
            insert(&mut core, key);
        }
        let (found, last) = core.descend(&3);
        let last = last.unwrap();
        assert_eq!(found, Some(last));
        <Splay as Balancer<i32, OrdComparator>>::after_access(&mut core, last);
        assert_eq!(core.root, Some(last));
        core.assert_size_invariant();
    }

    #[test]
    fn size_stays_correct_through_many_rotations() {
        let mut core = TestCore::new(OrdComparator);
        for key in 0..150 {
            insert(&mut core, key);
            core.assert_size_invariant();
        }
        for key in (0..150).step_by(2) {
            if let (Some(id), _) = core.descend(&key) {
                let point = core.erase_structural(id);
                <Splay as Balancer<i32, OrdComparator>>::after_erase(&mut core, point);
            }
            core.assert_size_invariant();
        }
    }
}
