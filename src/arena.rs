//! A compacting arena of [`NodeSlot`]s, addressed by [`NodeId`].
//!
//! Modeled on `cranelift_bforest::NodePool`: one flat allocation backs
//! every node in the tree, and freed slots are recycled through a
//! free-list instead of being returned to the global allocator one at a
//! time. Unlike the B+-tree forest this crate's trees each own a private
//! arena (no cross-tree sharing), which keeps `Clone` a plain deep copy
//! of the backing `Vec`.

use crate::error::TreeError;
use crate::node::NodeId;
use crate::node::NodeSlot;

#[derive(Clone, Debug)]
pub(crate) struct Arena<K, A> {
    slots: Vec<Option<NodeSlot<K, A>>>,
    free: Vec<NodeId>,
}

impl<K, A> Arena<K, A> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Allocate a new node, reusing a freed slot if one is available.
    pub(crate) fn alloc(&mut self, key: K, aug: A) -> NodeId {
        let slot = NodeSlot::new(key, aug);
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(slot);
            id
        } else {
            let id = NodeId::new(self.slots.len());
            self.slots.push(Some(slot));
            id
        }
    }

    /// Same as [`Arena::alloc`], but reports an allocation failure
    /// instead of aborting the process, provided no reusable slot exists.
    pub(crate) fn try_alloc(&mut self, key: K, aug: A) -> Result<NodeId, TreeError> {
        if self.free.is_empty() {
            self.slots.try_reserve(1)?;
        }
        Ok(self.alloc(key, aug))
    }

    /// Free a previously allocated node. The returned key lets callers
    /// keep using it (e.g. to refresh a min/max cache) after the slot is
    /// gone.
    pub(crate) fn free(&mut self, id: NodeId) -> K {
        let slot = self.slots[id.index()]
            .take()
            .expect("double free of tree node");
        self.free.push(id);
        slot.key
    }

    pub(crate) fn get(&self, id: NodeId) -> &NodeSlot<K, A> {
        self.slots[id.index()].as_ref().expect("use of freed node")
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut NodeSlot<K, A> {
        self.slots[id.index()].as_mut().expect("use of freed node")
    }
}
