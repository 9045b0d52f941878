//! The balancing capability shared between the red-black and splay engines.
//!
//! [`crate::core::Core`] implements every operation that doesn't care how
//! balance is restored: BST descent, transplant, rotation bookkeeping,
//! the extremal cache, and the rank walk. Each engine supplies the
//! `after_*` hooks below to plug its own rebalancing discipline into
//! that skeleton, per the "Polymorphism between RB and splay engines"
//! design note.

use crate::comparator::Comparator;
use crate::core::{Core, ErasePoint};
use crate::node::{Augment, NodeId};

pub(crate) mod redblack;
pub(crate) mod splay;

pub(crate) trait Balancer<K, C: Comparator<K>>: Sized {
    /// The augmentation each node of this engine carries.
    type Aug: Augment;

    /// Augmentation for a freshly allocated leaf node (size 1, and for
    /// the red-black engine, coloured red).
    fn new_leaf_aug() -> Self::Aug;

    /// Restore the engine's invariants (and augmented sizes) after
    /// `new` has been linked into the tree as a leaf.
    fn after_insert(core: &mut Core<K, C, Self>, new: NodeId);

    /// Restore the engine's invariants after the structural part of an
    /// erase has completed.
    fn after_erase(core: &mut Core<K, C, Self>, point: ErasePoint<Self::Aug>);

    /// Run after a read-only access (find, bound, rank). The red-black
    /// engine does nothing here; the splay engine splays `node` to the
    /// root.
    fn after_access(core: &mut Core<K, C, Self>, node: NodeId);

    /// Called when `moved` physically takes over `vacated`'s position in
    /// the tree during a two-children erase (spec.md §4.5: "inheriting
    /// z's children and colour (RB only)"). The red-black engine copies
    /// colour; the splay engine has nothing to copy.
    fn adopt_position(moved: &mut Self::Aug, vacated: &Self::Aug);
}
