//! The red-black balancing discipline.
//!
//! Textbook CLRS insert/erase fix-up, adapted to a no-sentinel arena: an
//! absent child counts as black, and the one place a bare pointer
//! comparison can't tell two absent children apart (the very first step
//! of erase fix-up, before `x` has climbed to a real node) is resolved
//! with the explicit `x_is_left` flag [`crate::core::ErasePoint`] already
//! carries.

use crate::comparator::Comparator;
use crate::core::{Core, ErasePoint};
use crate::node::{Color, NodeId, RbAug};

use super::Balancer;

/// Marker type selecting the red-black engine.
pub(crate) struct RedBlack;

fn color_of<K, C>(core: &Core<K, C, RedBlack>, id: Option<NodeId>) -> Color
where
    C: Comparator<K>,
{
    match id {
        None => Color::Black,
        Some(id) => core.arena.get(id).aug.color,
    }
}

fn set_color<K, C>(core: &mut Core<K, C, RedBlack>, id: NodeId, color: Color)
where
    C: Comparator<K>,
{
    core.arena.get_mut(id).aug.color = color;
}

fn is_left_child<K, C>(
    core: &Core<K, C, RedBlack>,
    x: Option<NodeId>,
    xp: Option<NodeId>,
    fallback: bool,
) -> bool
where
    C: Comparator<K>,
{
    match (x, xp) {
        (Some(xx), Some(p)) => core.arena.get(p).left == Some(xx),
        _ => fallback,
    }
}

impl<K, C: Comparator<K>> Balancer<K, C> for RedBlack {
    type Aug = RbAug;

    fn new_leaf_aug() -> RbAug {
        RbAug { color: Color::Red, size: 1 }
    }

    fn adopt_position(moved: &mut RbAug, vacated: &RbAug) {
        moved.color = vacated.color;
    }

    fn after_insert(core: &mut Core<K, C, Self>, new: NodeId) {
        let parent = core.arena.get(new).parent;
        core.recompute_ancestors(parent);
        insert_fixup(core, new);
    }

    fn after_erase(core: &mut Core<K, C, Self>, point: ErasePoint<RbAug>) {
        core.recompute_ancestors(point.anchor);
        if matches!(point.removed_aug.color, Color::Black) {
            erase_fixup(core, point.x, point.anchor, point.x_is_left);
        }
    }

    fn after_access(_core: &mut Core<K, C, Self>, _node: NodeId) {
        // Reads never mutate a red-black tree's structure.
    }
}

fn insert_fixup<K, C: Comparator<K>>(core: &mut Core<K, C, RedBlack>, mut node: NodeId) {
    loop {
        let parent = match core.arena.get(node).parent {
            Some(p) => p,
            None => break,
        };
        if matches!(color_of(core, Some(parent)), Color::Black) {
            break;
        }
        // parent is red, so it can't be the root: grandparent exists.
        let grandparent = core
            .arena
            .get(parent)
            .parent
            .expect("red node must have a grandparent");
        let parent_is_left = core.arena.get(grandparent).left == Some(parent);
        let uncle = if parent_is_left {
            core.arena.get(grandparent).right
        } else {
            core.arena.get(grandparent).left
        };

        if matches!(color_of(core, uncle), Color::Red) {
            set_color(core, parent, Color::Black);
            set_color(core, uncle.unwrap(), Color::Black);
            set_color(core, grandparent, Color::Red);
            node = grandparent;
            continue;
        }

        if parent_is_left {
            if core.arena.get(parent).right == Some(node) {
                node = parent;
                core.rotate_left(node);
            }
            let parent = core.arena.get(node).parent.unwrap();
            let grandparent = core.arena.get(parent).parent.unwrap();
            set_color(core, parent, Color::Black);
            set_color(core, grandparent, Color::Red);
            core.rotate_right(grandparent);
        } else {
            if core.arena.get(parent).left == Some(node) {
                node = parent;
                core.rotate_right(node);
            }
            let parent = core.arena.get(node).parent.unwrap();
            let grandparent = core.arena.get(parent).parent.unwrap();
            set_color(core, parent, Color::Black);
            set_color(core, grandparent, Color::Red);
            core.rotate_left(grandparent);
        }
        break;
    }

    if let Some(root) = core.root {
        set_color(core, root, Color::Black);
    }
}

fn erase_fixup<K, C: Comparator<K>>(
    core: &mut Core<K, C, RedBlack>,
    mut x: Option<NodeId>,
    mut xp: Option<NodeId>,
    mut x_is_left: bool,
) {
    while x != core.root && matches!(color_of(core, x), Color::Black) {
        let p = match xp {
            Some(p) => p,
            None => break,
        };
        x_is_left = is_left_child(core, x, xp, x_is_left);

        if x_is_left {
            let mut w = core.arena.get(p).right.expect("sibling must exist");
            if matches!(color_of(core, Some(w)), Color::Red) {
                set_color(core, w, Color::Black);
                set_color(core, p, Color::Red);
                core.rotate_left(p);
                w = core.arena.get(p).right.expect("sibling must exist");
            }
            let w_left = core.arena.get(w).left;
            let w_right = core.arena.get(w).right;
            if matches!(color_of(core, w_left), Color::Black) && matches!(color_of(core, w_right), Color::Black) {
                set_color(core, w, Color::Red);
                x = Some(p);
                xp = core.arena.get(p).parent;
                x_is_left = is_left_child(core, x, xp, false);
            } else {
                let mut w = w;
                if matches!(color_of(core, core.arena.get(w).right), Color::Black) {
                    if let Some(wl) = core.arena.get(w).left {
                        set_color(core, wl, Color::Black);
                    }
                    set_color(core, w, Color::Red);
                    core.rotate_right(w);
                    w = core.arena.get(p).right.expect("sibling must exist");
                }
                set_color(core, w, color_of(core, Some(p)));
                set_color(core, p, Color::Black);
                if let Some(wr) = core.arena.get(w).right {
                    set_color(core, wr, Color::Black);
                }
                core.rotate_left(p);
                x = core.root;
                xp = None;
            }
        } else {
            let mut w = core.arena.get(p).left.expect("sibling must exist");
            if matches!(color_of(core, Some(w)), Color::Red) {
                set_color(core, w, Color::Black);
                set_color(core, p, Color::Red);
                core.rotate_right(p);
                w = core.arena.get(p).left.expect("sibling must exist");
            }
            let w_left = core.arena.get(w).left;
            let w_right = core.arena.get(w).right;
            if matches!(color_of(core, w_right), Color::Black) && matches!(color_of(core, w_left), Color::Black) {
                set_color(core, w, Color::Red);
                x = Some(p);
                xp = core.arena.get(p).parent;
                x_is_left = is_left_child(core, x, xp, true);
            } else {
                let mut w = w;
                if matches!(color_of(core, core.arena.get(w).left), Color::Black) {
                    if let Some(wr) = core.arena.get(w).right {
                        set_color(core, wr, Color::Black);
                    }
                    set_color(core, w, Color::Red);
                    core.rotate_left(w);
                    w = core.arena.get(p).left.expect("sibling must exist");
                }
                set_color(core, w, color_of(core, Some(p)));
                set_color(core, p, Color::Black);
                if let Some(wl) = core.arena.get(w).left {
                    set_color(core, wl, Color::Black);
                }
                core.rotate_right(p);
                x = core.root;
                xp = None;
            }
        }
    }
    if let Some(xx) = x {
        set_color(core, xx, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::OrdComparator;

    type TestCore = Core<i32, OrdComparator, RedBlack>;

    fn black_height<K, C: Comparator<K>>(
        core: &Core<K, C, RedBlack>,
        id: Option<NodeId>,
    ) -> u32 {
        match id {
            None => 1,
            Some(id) => {
                let slot = core.arena.get(id);
                if let Some(p) = slot.parent {
                    let parent_color = core.arena.get(p).aug.color;
                    assert!(
                        !(matches!(parent_color, Color::Red) && matches!(slot.aug.color, Color::Red)),
                        "a red node has a red child"
                    );
                }
                let left = black_height(core, slot.left);
                let right = black_height(core, slot.right);
                assert_eq!(left, right, "unequal black height across a node's children");
                left + if matches!(slot.aug.color, Color::Black) { 1 } else { 0 }
            }
        }
    }

    fn assert_rb_invariants(core: &TestCore) {
        if let Some(root) = core.root {
            assert!(matches!(core.arena.get(root).aug.color, Color::Black), "root is not black");
        }
        black_height(core, core.root);
        core.assert_size_invariant();
    }

    fn insert(core: &mut TestCore, key: i32) {
        use crate::core::InsertOutcome;
        if let InsertOutcome::Inserted(id) = core.insert_structural(key) {
            <RedBlack as Balancer<i32, OrdComparator>>::after_insert(core, id);
        }
    }

    fn erase(core: &mut TestCore, key: i32) {
        if let (Some(id), _) = core.descend(&key) {
            let point = core.erase_structural(id);
            <RedBlack as Balancer<i32, OrdComparator>>::after_erase(core, point);
        }
    }

    #[test]
    fn ascending_insert_stays_balanced() {
        let mut core = TestCore::new(OrdComparator);
        for key in 0..200 {
            insert(&mut core, key);
            assert_rb_invariants(&core);
        }
    }

    #[test]
    fn descending_insert_stays_balanced() {
        let mut core = TestCore::new(OrdComparator);
        for key in (0..200).rev() {
            insert(&mut core, key);
            assert_rb_invariants(&core);
        }
    }

    #[test]
    fn interleaved_insert_and_erase_stays_balanced() {
        let mut core = TestCore::new(OrdComparator);
        for key in 0..100 {
            insert(&mut core, key);
        }
        for key in 0..100 {
            if key % 3 == 0 {
                erase(&mut core, key);
            }
            assert_rb_invariants(&core);
        }
        for key in 0..100 {
            erase(&mut core, key);
            assert_rb_invariants(&core);
        }
        assert_eq!(core.len(), 0);
    }
}
