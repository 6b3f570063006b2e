//! Balance-factor assignment tables for rebalancing rotations.
//!
//! Both rebalancing walks resolve an imbalance the same way: rotate so that a
//! descendant on the overweight side rises above the overweight node, then
//! assign fixed balance factors to the nodes involved. The assignments depend
//! only on the direction of the imbalance and the pre-rotation balance of the
//! riser, so they live here as pure tables, keyed by sign, where the whole
//! case analysis can be read and tested without building a tree.

use crate::Dir;

/// Balance factors after a single rotation at an overweight node.
///
/// `riser_balance` is the pre-rotation balance of the overweight node's child
/// on the overweight side, which rises to take its place. It must not lean
/// away from the imbalance; that shape takes a double rotation.
///
/// Returns the new balances of the overweight node and the riser, and whether
/// the rotation shortened the subtree (`false` only for an evenly balanced
/// riser, which can occur only during removal).
pub(crate) fn single(overweight: Dir, riser_balance: i8) -> (i8, i8, bool) {
    let s = overweight.sign();

    if riser_balance == 0 {
        // The riser's inner subtree is as tall as its outer one, so the
        // rotation hands the overweight node a subtree of the same height it
        // lost: both nodes end up leaning, and the total height stands.
        (s, -s, false)
    } else {
        debug_assert_eq!(riser_balance, s, "riser leans away from the imbalance");
        (0, 0, true)
    }
}

/// Balance factors after a double rotation at an overweight node.
///
/// Applies when the overweight node's child leans *away* from the imbalance;
/// the riser is then that child's inner grandchild, and `riser_balance` its
/// pre-rotation balance. Returns the new balances of the overweight node, the
/// child, and the riser. The subtree always ends up one level shorter than it
/// was before the height disturbance.
pub(crate) fn double(overweight: Dir, riser_balance: i8) -> (i8, i8, i8) {
    let s = overweight.sign();

    // The riser's two subtrees end up split between the overweight node and
    // the child; whichever of the two inherits the riser's shorter subtree
    // ends up leaning away from it.
    if riser_balance == s {
        (-s, 0, 0)
    } else if riser_balance == 0 {
        (0, 0, 0)
    } else {
        debug_assert_eq!(riser_balance, -s);
        (0, s, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rotation_balances() {
        // Leaning riser: imbalance fully resolved, subtree shorter.
        assert_eq!(single(Dir::Left, -1), (0, 0, true));
        assert_eq!(single(Dir::Right, 1), (0, 0, true));

        // Even riser: pivot and riser lean toward each other, height kept.
        assert_eq!(single(Dir::Left, 0), (-1, 1, false));
        assert_eq!(single(Dir::Right, 0), (1, -1, false));
    }

    #[test]
    fn double_rotation_balances() {
        // Riser leaning toward the imbalance: the node opposite it inherits
        // its short side.
        assert_eq!(double(Dir::Left, -1), (1, 0, 0));
        assert_eq!(double(Dir::Right, 1), (-1, 0, 0));

        // Even riser: everything levels out.
        assert_eq!(double(Dir::Left, 0), (0, 0, 0));
        assert_eq!(double(Dir::Right, 0), (0, 0, 0));

        // Riser leaning away from the imbalance: the child inherits its
        // short side.
        assert_eq!(double(Dir::Left, 1), (0, -1, 0));
        assert_eq!(double(Dir::Right, -1), (0, 1, 0));
    }
}
