//! The shared tree skeleton: arena ownership, BST descent, rotations,
//! transplant, the extremal cache, and the rank walk.
//!
//! Everything here is oblivious to *why* the tree stays balanced — that
//! is the [`crate::balance::Balancer`]'s job. `Core` only ever restores
//! the BST and size-augmentation invariants; colour invariants and
//! splay-to-root are applied by the caller after `Core` hands back a
//! structural outcome.

use crate::arena::Arena;
use crate::balance::Balancer;
use crate::comparator::Comparator;
use crate::error::TreeError;
use crate::node::{Augment, NodeId};

/// The outcome of the structural part of an insert.
pub(crate) enum InsertOutcome {
    /// `key` was already present; no mutation happened.
    Existing(NodeId),
    /// `key` was linked in as a fresh leaf.
    Inserted(NodeId),
}

/// The outcome of the structural part of an erase: where engine-specific
/// rebalancing should resume, and what the vacated node's augmentation
/// looked like (for the red-black engine, whether it was black).
pub(crate) struct ErasePoint<A> {
    /// The node whose child set changed during the splice — i.e. the
    /// parent of the hole. `None` only when the tree became empty.
    pub anchor: Option<NodeId>,
    /// The child (possibly absent) that now occupies the hole.
    pub x: Option<NodeId>,
    /// Was `x` the left child of `anchor`? Meaningful even when `x` is
    /// `None`, since a plain pointer comparison can't tell two absent
    /// children apart.
    pub x_is_left: bool,
    /// The augmentation the vacated position had before the splice.
    pub removed_aug: A,
}

pub(crate) struct Core<K, C, B: Balancer<K, C>> {
    pub(crate) arena: Arena<K, B::Aug>,
    pub(crate) root: Option<NodeId>,
    pub(crate) min: Option<NodeId>,
    pub(crate) max: Option<NodeId>,
    pub(crate) len: usize,
    pub(crate) comp: C,
}

impl<K, C, B> Clone for Core<K, C, B>
where
    K: Clone,
    C: Clone,
    B: Balancer<K, C>,
    B::Aug: Clone,
{
    fn clone(&self) -> Self {
        Core {
            arena: self.arena.clone(),
            root: self.root,
            min: self.min,
            max: self.max,
            len: self.len,
            comp: self.comp.clone(),
        }
    }
}

impl<K, C, B> Core<K, C, B>
where
    C: Comparator<K>,
    B: Balancer<K, C>,
{
    pub(crate) fn new(comp: C) -> Self {
        Core {
            arena: Arena::new(),
            root: None,
            min: None,
            max: None,
            len: 0,
            comp,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.arena.get(id).key
    }

    fn size_of(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.arena.get(id).aug.size())
    }

    pub(crate) fn recompute_size(&mut self, id: NodeId) {
        let (l, r) = {
            let slot = self.arena.get(id);
            (slot.left, slot.right)
        };
        let size = self.size_of(l) + self.size_of(r) + 1;
        self.arena.get_mut(id).aug.set_size(size);
    }

    /// Recompute `size` along the path from `start` up to the root,
    /// inclusive. This is the one post-splice step every mutation needs:
    /// each rotation only ever recomputes two nodes from their direct
    /// children, so the nodes that were never rotated (most ancestors,
    /// after a splay-free insert; the whole climb, for a red-black
    /// fix-up that stops early) must have their caches refreshed
    /// explicitly here before any balancer runs.
    pub(crate) fn recompute_ancestors(&mut self, start: Option<NodeId>) {
        let mut cur = start;
        while let Some(id) = cur {
            self.recompute_size(id);
            cur = self.arena.get(id).parent;
        }
    }

    /// `left_rotate` from spec.md §4.6/§4.7: recomputes size on the two
    /// rotated nodes, child then parent.
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.arena.get(x).right.expect("rotate_left needs a right child");
        let y_left = self.arena.get(y).left;
        self.arena.get_mut(x).right = y_left;
        if let Some(yl) = y_left {
            self.arena.get_mut(yl).parent = Some(x);
        }
        let x_parent = self.arena.get(x).parent;
        self.arena.get_mut(y).parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.arena.get(p).left == Some(x) {
                    self.arena.get_mut(p).left = Some(y);
                } else {
                    self.arena.get_mut(p).right = Some(y);
                }
            }
        }
        self.arena.get_mut(y).left = Some(x);
        self.arena.get_mut(x).parent = Some(y);
        self.recompute_size(x);
        self.recompute_size(y);
    }

    /// `right_rotate`, mirror of [`Core::rotate_left`].
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.arena.get(x).left.expect("rotate_right needs a left child");
        let y_right = self.arena.get(y).right;
        self.arena.get_mut(x).left = y_right;
        if let Some(yr) = y_right {
            self.arena.get_mut(yr).parent = Some(x);
        }
        let x_parent = self.arena.get(x).parent;
        self.arena.get_mut(y).parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.arena.get(p).left == Some(x) {
                    self.arena.get_mut(p).left = Some(y);
                } else {
                    self.arena.get_mut(p).right = Some(y);
                }
            }
        }
        self.arena.get_mut(y).right = Some(x);
        self.arena.get_mut(x).parent = Some(y);
        self.recompute_size(x);
        self.recompute_size(y);
    }

    pub(crate) fn tree_minimum(&self, mut node: NodeId) -> NodeId {
        while let Some(l) = self.arena.get(node).left {
            node = l;
        }
        node
    }

    pub(crate) fn tree_maximum(&self, mut node: NodeId) -> NodeId {
        while let Some(r) = self.arena.get(node).right {
            node = r;
        }
        node
    }

    /// Plain BST descent. Returns the node matching `key`, if any, and
    /// the last node visited along the way (used by the splay engine to
    /// splay something to the root even on a miss).
    pub(crate) fn descend(&self, key: &K) -> (Option<NodeId>, Option<NodeId>) {
        let mut cur = self.root;
        let mut last = None;
        while let Some(id) = cur {
            last = Some(id);
            let node_key = &self.arena.get(id).key;
            if self.comp.less(key, node_key) {
                cur = self.arena.get(id).left;
            } else if self.comp.less(node_key, key) {
                cur = self.arena.get(id).right;
            } else {
                return (Some(id), last);
            }
        }
        (None, last)
    }

    /// Structural part of insert: shared by both engines.
    pub(crate) fn insert_structural(&mut self, key: K) -> InsertOutcome {
        let mut parent = None;
        let mut cur = self.root;
        let mut go_left = false;
        while let Some(id) = cur {
            parent = Some(id);
            let node_key = &self.arena.get(id).key;
            if self.comp.less(&key, node_key) {
                go_left = true;
                cur = self.arena.get(id).left;
            } else if self.comp.less(node_key, &key) {
                go_left = false;
                cur = self.arena.get(id).right;
            } else {
                return InsertOutcome::Existing(id);
            }
        }

        let is_new_min = self.min.map_or(true, |m| self.comp.less(&key, self.key(m)));
        let is_new_max = self.max.map_or(true, |m| self.comp.less(self.key(m), &key));

        let new_id = self.arena.alloc(key, B::new_leaf_aug());
        self.link_leaf(new_id, parent, go_left);

        if is_new_min {
            self.min = Some(new_id);
        }
        if is_new_max {
            self.max = Some(new_id);
        }
        self.len += 1;
        InsertOutcome::Inserted(new_id)
    }

    /// Fallible twin of [`Core::insert_structural`]: no mutation happens
    /// unless the arena can grow to hold the new node.
    pub(crate) fn try_insert_structural(&mut self, key: K) -> Result<InsertOutcome, TreeError> {
        let mut parent = None;
        let mut cur = self.root;
        let mut go_left = false;
        while let Some(id) = cur {
            parent = Some(id);
            let node_key = &self.arena.get(id).key;
            if self.comp.less(&key, node_key) {
                go_left = true;
                cur = self.arena.get(id).left;
            } else if self.comp.less(node_key, &key) {
                go_left = false;
                cur = self.arena.get(id).right;
            } else {
                return Ok(InsertOutcome::Existing(id));
            }
        }

        let is_new_min = self.min.map_or(true, |m| self.comp.less(&key, self.key(m)));
        let is_new_max = self.max.map_or(true, |m| self.comp.less(self.key(m), &key));

        let new_id = self.arena.try_alloc(key, B::new_leaf_aug())?;
        self.link_leaf(new_id, parent, go_left);

        if is_new_min {
            self.min = Some(new_id);
        }
        if is_new_max {
            self.max = Some(new_id);
        }
        self.len += 1;
        Ok(InsertOutcome::Inserted(new_id))
    }

    fn link_leaf(&mut self, new_id: NodeId, parent: Option<NodeId>, go_left: bool) {
        match parent {
            None => self.root = Some(new_id),
            Some(p) => {
                self.arena.get_mut(new_id).parent = Some(p);
                if go_left {
                    self.arena.get_mut(p).left = Some(new_id);
                } else {
                    self.arena.get_mut(p).right = Some(new_id);
                }
            }
        }
    }

    fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let u_parent = self.arena.get(u).parent;
        match u_parent {
            None => self.root = v,
            Some(p) => {
                if self.arena.get(p).left == Some(u) {
                    self.arena.get_mut(p).left = v;
                } else {
                    self.arena.get_mut(p).right = v;
                }
            }
        }
        if let Some(vv) = v {
            self.arena.get_mut(vv).parent = u_parent;
        }
    }

    /// Structural part of erase, per spec.md §4.5. Frees `z` and
    /// refreshes the min/max cache; returns where the engine-specific
    /// balancer should resume.
    pub(crate) fn erase_structural(&mut self, z: NodeId) -> ErasePoint<B::Aug> {
        let z_was_min = self.min == Some(z);
        let z_was_max = self.max == Some(z);

        let z_left = self.arena.get(z).left;
        let z_right = self.arena.get(z).right;

        let point = if z_left.is_none() {
            let removed_aug = self.arena.get(z).aug;
            let x = z_right;
            let anchor = self.arena.get(z).parent;
            let x_is_left = anchor.is_some_and(|p| self.arena.get(p).left == Some(z));
            self.transplant(z, x);
            self.arena.free(z);
            ErasePoint { anchor, x, x_is_left, removed_aug }
        } else if z_right.is_none() {
            let removed_aug = self.arena.get(z).aug;
            let x = z_left;
            let anchor = self.arena.get(z).parent;
            let x_is_left = anchor.is_some_and(|p| self.arena.get(p).left == Some(z));
            self.transplant(z, x);
            self.arena.free(z);
            ErasePoint { anchor, x, x_is_left, removed_aug }
        } else {
            let y = self.tree_minimum(z_right.unwrap());
            let removed_aug = self.arena.get(y).aug;
            let x = self.arena.get(y).right;

            let point = if self.arena.get(y).parent == Some(z) {
                if let Some(xx) = x {
                    self.arena.get_mut(xx).parent = Some(y);
                }
                ErasePoint { anchor: Some(y), x, x_is_left: false, removed_aug }
            } else {
                let anchor = self.arena.get(y).parent;
                self.transplant(y, x);
                self.arena.get_mut(y).right = z_right;
                if let Some(r) = z_right {
                    self.arena.get_mut(r).parent = Some(y);
                }
                ErasePoint { anchor, x, x_is_left: true, removed_aug }
            };

            let z_aug = self.arena.get(z).aug;
            B::adopt_position(&mut self.arena.get_mut(y).aug, &z_aug);
            self.arena.get_mut(y).left = z_left;
            if let Some(l) = z_left {
                self.arena.get_mut(l).parent = Some(y);
            }
            self.transplant(z, Some(y));
            self.arena.free(z);
            self.recompute_size(y);
            point
        };

        self.len -= 1;
        if z_was_min || z_was_max {
            self.refresh_extremes(z_was_min, z_was_max);
        }
        point
    }

    fn refresh_extremes(&mut self, refresh_min: bool, refresh_max: bool) {
        if refresh_min {
            self.min = self.root.map(|r| self.tree_minimum(r));
        }
        if refresh_max {
            self.max = self.root.map(|r| self.tree_maximum(r));
        }
    }

    /// `rank_lt(k)`: count of stored keys strictly less than `k`.
    pub(crate) fn rank_lt(&self, key: &K) -> (usize, Option<NodeId>) {
        self.rank_walk(key, false)
    }

    /// `rank_le(k)`: count of stored keys less than or equal to `k`.
    pub(crate) fn rank_le(&self, key: &K) -> (usize, Option<NodeId>) {
        self.rank_walk(key, true)
    }

    /// Count of stored keys strictly between `first` and `last`, the way
    /// `std::distance` over an in-order range would, but via the rank
    /// walk rather than a scan. Shared by both engines; the two "last
    /// node visited" results (in the order the two `rank_lt` walks ran)
    /// let the splay engine splay exactly the nodes a direct two-call
    /// `rank_lt(last)` / `rank_lt(first)` sequence would have.
    pub(crate) fn distance(
        &self,
        first: &K,
        last: &K,
    ) -> (usize, Option<NodeId>, Option<NodeId>) {
        let (lt_last, touched_last) = self.rank_lt(last);
        let (lt_first, touched_first) = self.rank_lt(first);
        (lt_last.saturating_sub(lt_first), touched_last, touched_first)
    }

    fn rank_walk(&self, key: &K, inclusive: bool) -> (usize, Option<NodeId>) {
        let mut count: usize = 0;
        let mut cur = self.root;
        let mut last = None;
        while let Some(id) = cur {
            last = Some(id);
            let node_key = &self.arena.get(id).key;
            let take_left_subtree = if inclusive {
                !self.comp.less(key, node_key)
            } else {
                self.comp.less(node_key, key)
            };
            if take_left_subtree {
                count += self.size_of(self.arena.get(id).left) as usize + 1;
                cur = self.arena.get(id).right;
            } else {
                cur = self.arena.get(id).left;
            }
        }
        (count, last)
    }

    pub(crate) fn lower_bound(&self, key: &K) -> (Option<NodeId>, Option<NodeId>) {
        let mut cur = self.root;
        let mut candidate = None;
        let mut last = None;
        while let Some(id) = cur {
            last = Some(id);
            let node_key = &self.arena.get(id).key;
            if !self.comp.less(node_key, key) {
                candidate = Some(id);
                cur = self.arena.get(id).left;
            } else {
                cur = self.arena.get(id).right;
            }
        }
        (candidate, candidate.or(last))
    }

    pub(crate) fn upper_bound(&self, key: &K) -> (Option<NodeId>, Option<NodeId>) {
        let mut cur = self.root;
        let mut candidate = None;
        let mut last = None;
        while let Some(id) = cur {
            last = Some(id);
            let node_key = &self.arena.get(id).key;
            if self.comp.less(key, node_key) {
                candidate = Some(id);
                cur = self.arena.get(id).left;
            } else {
                cur = self.arena.get(id).right;
            }
        }
        (candidate, candidate.or(last))
    }

    pub(crate) fn next(&self, id: NodeId) -> Option<NodeId> {
        if let Some(r) = self.arena.get(id).right {
            return Some(self.tree_minimum(r));
        }
        let mut cur = id;
        let mut parent = self.arena.get(id).parent;
        while let Some(p) = parent {
            if self.arena.get(p).left == Some(cur) {
                return Some(p);
            }
            cur = p;
            parent = self.arena.get(p).parent;
        }
        None
    }

    pub(crate) fn prev(&self, id: NodeId) -> Option<NodeId> {
        if let Some(l) = self.arena.get(id).left {
            return Some(self.tree_maximum(l));
        }
        let mut cur = id;
        let mut parent = self.arena.get(id).parent;
        while let Some(p) = parent {
            if self.arena.get(p).right == Some(cur) {
                return Some(p);
            }
            cur = p;
            parent = self.arena.get(p).parent;
        }
        None
    }

    /// Check `size(x) = size(x.left) + size(x.right) + 1` at every node,
    /// and that `parent` links agree with `left`/`right`. Panics on the
    /// first violation found; used by both engines' test suites.
    #[cfg(test)]
    pub(crate) fn assert_size_invariant(&self) {
        fn walk<K, C, B>(core: &Core<K, C, B>, id: NodeId, parent: Option<NodeId>)
        where
            C: Comparator<K>,
            B: Balancer<K, C>,
        {
            let slot = core.arena.get(id);
            assert_eq!(slot.parent, parent, "parent link mismatch at a node");
            let expected = core.size_of(slot.left) + core.size_of(slot.right) + 1;
            assert_eq!(slot.aug.size(), expected, "augmented size mismatch at a node");
            if let Some(l) = slot.left {
                walk(core, l, Some(id));
            }
            if let Some(r) = slot.right {
                walk(core, r, Some(id));
            }
        }
        if let Some(root) = self.root {
            walk(self, root, None);
        } else {
            assert_eq!(self.len, 0);
        }
    }
}
