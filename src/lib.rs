//! An intrusive AVL tree.
//#![no_std]

// Conventions used in comments:
// - The balance factor of a node `x`, written `b(x)`, is the height of its
//   right subtree minus the height of its left subtree.
// - A node is left-heavy if `b(x) < 0` and right-heavy if `b(x) > 0`.
//
// The fundamental invariant of an AVL tree is that `b(x) ∈ {-1, 0, +1}` for
// every node. A balance factor may reach ±2 transiently, inside a rebalancing
// walk, and is corrected by a rotation before the walk returns.
//
// The two rebalancing walks are not symmetric:
// - After an insertion, the first rotation restores the height the subtree
//   had before the insertion, so the walk performs at most one rotation.
// - After a removal, a rotation may itself shorten the subtree it roots, so
//   the walk can rotate at every level on the way up.

use core::{
    cell::UnsafeCell, cmp::Ordering, fmt, marker::PhantomPinned, mem, ops::Not, pin::Pin,
    ptr::NonNull,
};
use std::borrow::Borrow;

use cordyceps::Linked;

mod debug;
mod fixup;
mod iter;
pub mod map;
#[cfg(any(test, feature = "model"))]
pub mod model;
#[cfg(test)]
mod tests;

pub use crate::iter::Iter;
pub use crate::map::AvlMap;

pub trait TreeNode<L>: Linked<L> {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
}

/// An intrusive AVL tree.
///
/// The tree owns every node reachable from its root: inserting an item hands
/// its [`Handle`] to the tree, and the handle is returned when the item is
/// removed.
///
/// [`Handle`]: cordyceps::Linked::Handle
pub struct AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    root: Link<T>,
}

pub struct Links<T: ?Sized> {
    inner: UnsafeCell<LinksInner<T>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl Dir {
    // Growing a subtree on this side moves its root's balance factor by this
    // amount.
    pub(crate) fn sign(self) -> i8 {
        match self {
            Dir::Left => -1,
            Dir::Right => 1,
        }
    }
}

#[repr(C)]
struct LinksInner<T: ?Sized> {
    parent: Link<T>,
    children: [Link<T>; 2],
    balance: i8,
    _unpin: PhantomPinned,
}

pub(crate) type Link<T> = Option<NonNull<T>>;

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { root: None }
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    ///
    /// The tree keeps no size counter, so this walks every element.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        if let Some(root) = self.root {
            unsafe {
                assert!(
                    T::links(root).as_ref().parent().is_none(),
                    "root must not have a parent"
                );
                self.assert_invariants_at(root);
            }
        }
    }

    // Verifies the subtree rooted at `node` and returns its height, counting
    // nodes (an empty subtree has height 0).
    unsafe fn assert_invariants_at(&self, node: NonNull<T>) -> usize {
        unsafe {
            let mut heights = [0usize; 2];

            for dir in [Dir::Left, Dir::Right] {
                if let Some(child) = T::links(node).as_ref().child(dir) {
                    // Ensure the child's parent link points back at this node.
                    let parent = T::links(child)
                        .as_ref()
                        .parent()
                        .expect("child parent pointer not set");
                    assert_eq!(node, parent, "child parent pointer points elsewhere");

                    // Ensure keys are ordered.
                    match dir {
                        Dir::Left => assert!(child.as_ref().key() < node.as_ref().key()),
                        Dir::Right => assert!(child.as_ref().key() > node.as_ref().key()),
                    }

                    heights[dir as usize] = self.assert_invariants_at(child);
                }
            }

            // Ensure the stored balance factor is the measured height
            // difference, within AVL bounds.
            let balance = T::links(node).as_ref().balance();
            assert_eq!(
                i64::from(balance),
                heights[Dir::Right as usize] as i64 - heights[Dir::Left as usize] as i64,
                "stored balance does not match measured height difference"
            );
            assert!(balance.abs() <= 1, "balance factor out of AVL bounds");

            1 + heights[0].max(heights[1])
        }
    }

    #[doc(hidden)]
    pub fn height(&self) -> usize {
        unsafe { self.height_at(self.root) }
    }

    unsafe fn height_at(&self, node: Link<T>) -> usize {
        match node {
            None => 0,
            Some(node) => unsafe {
                let left = self.height_at(T::links(node).as_ref().left());
                let right = self.height_at(T::links(node).as_ref().right());
                1 + left.max(right)
            },
        }
    }

    /// Returns `true` if the tree contains an element with the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.get_raw(key).is_some()
    }

    /// Returns a reference to the node corresponding to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<Pin<&T>>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let ptr = self.get_raw(key)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    /// Returns a mutable reference to the node corresponding to `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<Pin<&mut T>>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut ptr = self.get_raw(key)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_mut())) }
    }

    pub(crate) fn get_raw<Q>(&self, key: &Q) -> Link<T>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            unsafe {
                match key.cmp(cur.as_ref().key().borrow()) {
                    Ordering::Less => opt_cur = T::links(cur).as_ref().left(),
                    Ordering::Equal => return Some(cur),
                    Ordering::Greater => opt_cur = T::links(cur).as_ref().right(),
                }
            }
        }
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<Pin<&T>> {
        let root = self.root?;
        unsafe {
            let first = self.extremum_in_subtree(root, Dir::Left);
            Some(Pin::new_unchecked(first.as_ref()))
        }
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<Pin<&T>> {
        let root = self.root?;
        unsafe {
            let last = self.extremum_in_subtree(root, Dir::Right);
            Some(Pin::new_unchecked(last.as_ref()))
        }
    }

    /// Removes and returns the minimum element of the tree.
    pub fn pop_first(&mut self) -> Option<T::Handle> {
        let root = self.root?;
        unsafe {
            let first = self.extremum_in_subtree(root, Dir::Left);
            Some(self.remove_at(first))
        }
    }

    /// Removes and returns the maximum element of the tree.
    pub fn pop_last(&mut self) -> Option<T::Handle> {
        let root = self.root?;
        unsafe {
            let last = self.extremum_in_subtree(root, Dir::Right);
            Some(self.remove_at(last))
        }
    }

    /// Returns an iterator over the tree's elements in key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Inserts an item into the tree.
    ///
    /// If an element with the same key is already present, the tree is left
    /// untouched and `item` is handed back to the caller.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, item: T::Handle) -> Option<T::Handle> {
        let ptr = T::into_ptr(item);

        let Some(root) = self.root else {
            // Tree is empty. Set `item` as the root and return.
            unsafe {
                T::links(ptr).as_mut().clear();
            }

            self.root = Some(ptr);
            return None;
        };

        // Descend the tree, looking for the insertion parent.
        let mut parent = root;
        let dir = loop {
            let ordering = unsafe { ptr.as_ref().key().cmp(parent.as_ref().key()) };

            let dir = match ordering {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                // The key is already present. Hand the item back; the tree is
                // structurally untouched.
                Ordering::Equal => return Some(unsafe { T::from_ptr(ptr) }),
            };

            match unsafe { T::links(parent).as_ref().child(dir) } {
                Some(child) => parent = child,
                None => break dir,
            }
        };

        unsafe {
            let links = T::links(ptr).as_mut();
            links.clear();
            links.set_parent(Some(parent));
            T::links(parent).as_mut().set_child(dir, Some(ptr));

            let parent_links = T::links(parent).as_mut();
            if parent_links.balance() != 0 {
                // The new leaf fills out the parent's shorter side; the
                // subtree height is unchanged and no ancestor is affected.
                parent_links.set_balance(0);
            } else {
                parent_links.set_balance(dir.sign());
                self.insert_fix(parent, ptr);
            }
        }

        None
    }

    // Walks upward from `parent`, whose subtree just grew by one level on the
    // side of `child`, updating ancestor balance factors.
    //
    // The walk stops as soon as a balance factor lands on 0 (the new level
    // filled a shorter side) or a rotation is performed: a rotation after
    // insertion restores the subtree's previous height, so nothing above it
    // can be out of balance.
    fn insert_fix(&mut self, mut parent: NonNull<T>, mut child: NonNull<T>) {
        unsafe {
            while let Some(grandparent) = T::links(parent).as_ref().parent() {
                let parent_dir = self.which_child(grandparent, Some(parent));
                let balance = T::links(grandparent).as_ref().balance() + parent_dir.sign();
                T::links(grandparent).as_mut().set_balance(balance);

                match balance {
                    0 => return,
                    -1 | 1 => {
                        child = parent;
                        parent = grandparent;
                    }
                    _ => {
                        debug_assert_eq!(balance.abs(), 2);
                        let overweight = parent_dir;

                        if self.which_child(parent, Some(child)) == overweight {
                            // Same-direction case: one rotation.
                            self.rotate(grandparent, !overweight);

                            let (down, up, _) =
                                fixup::single(overweight, T::links(parent).as_ref().balance());
                            T::links(grandparent).as_mut().set_balance(down);
                            T::links(parent).as_mut().set_balance(up);
                        } else {
                            // Opposite-direction case: rotate `child` up
                            // through both ancestors.
                            let child_balance = T::links(child).as_ref().balance();
                            self.rotate(parent, overweight);
                            self.rotate(grandparent, !overweight);

                            let (down, mid, up) = fixup::double(overweight, child_balance);
                            T::links(grandparent).as_mut().set_balance(down);
                            T::links(parent).as_mut().set_balance(mid);
                            T::links(child).as_mut().set_balance(up);
                        }

                        return;
                    }
                }
            }
        }
    }

    /// Removes the element with the given key from the tree.
    ///
    /// Returns `None`, without modifying the tree, if no element has the
    /// given key.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T::Handle>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let node = self.get_raw(key)?;
        Some(unsafe { self.remove_at(node) })
    }

    /// Removes an arbitrary node from the tree.
    ///
    /// # Safety
    ///
    /// It is the caller's responsibility to ensure that `node` is an element
    /// of `self`, and not any other tree.
    pub unsafe fn remove_at(&mut self, node: NonNull<T>) -> T::Handle {
        unsafe {
            // A node with two children is first moved to the position of its
            // in-order predecessor, the maximum of its left subtree. The
            // predecessor has no right child, so the node can then be spliced
            // out as a ≤1-child node.
            if T::links(node).as_ref().left().is_some() && T::links(node).as_ref().right().is_some()
            {
                let pred = self
                    .neighbor_raw(node, Dir::Left)
                    .expect("a node with a left child has a predecessor");
                self.swap_positions(node, pred);
            }

            let parent = T::links(node).as_ref().parent();
            let left = T::links(node).as_ref().left();
            let right = T::links(node).as_ref().right();
            let child = left.or(right);

            match parent {
                None => {
                    self.root = child;
                    self.maybe_set_parent(child, None);
                }
                Some(parent) => {
                    let dir = self.which_child(parent, Some(node));
                    T::links(parent).as_mut().set_child(dir, child);
                    self.maybe_set_parent(child, Some(parent));

                    // The parent lost a level on the spliced side.
                    let dif = match dir {
                        Dir::Left => 1,
                        Dir::Right => -1,
                    };
                    self.remove_fix(parent, dif);
                }
            }

            T::links(node).as_mut().clear();
            T::from_ptr(node)
        }
    }

    // Walks upward from `node`, applying the balance delta `dif` left behind
    // by a removal in one of `node`'s subtrees.
    //
    // Unlike the insertion walk, a rotation here may shorten the subtree it
    // roots, so the walk can rotate at every level; it stops only when a
    // delta is absorbed (a balance factor lands on ±1) or the root has been
    // processed.
    fn remove_fix(&mut self, node: NonNull<T>, dif: i8) {
        let mut node = node;
        let mut dif = dif;

        loop {
            unsafe {
                let parent = T::links(node).as_ref().parent();
                // The delta seen by `parent` if this subtree shrinks.
                // Computed before any rotation below: a rotation moves `node`
                // down but leaves its subtree in the same child slot of
                // `parent`.
                let next_dif = match parent {
                    Some(p) => match self.which_child(p, Some(node)) {
                        Dir::Left => Some(1),
                        Dir::Right => Some(-1),
                    },
                    None => None,
                };

                let balance = T::links(node).as_ref().balance() + dif;
                match balance {
                    -1 | 1 => {
                        // The removal shortened the taller side; the height
                        // of this subtree is unchanged from the parent's
                        // perspective.
                        T::links(node).as_mut().set_balance(balance);
                        return;
                    }

                    0 => {
                        // Both sides are now equal, so this subtree is one
                        // level shorter and the parent has to absorb that.
                        T::links(node).as_mut().set_balance(0);
                    }

                    _ => {
                        debug_assert_eq!(balance.abs(), 2);
                        let overweight = if balance < 0 { Dir::Left } else { Dir::Right };
                        let child = T::links(node)
                            .as_ref()
                            .child(overweight)
                            .expect("overweight side has a child");
                        let child_balance = T::links(child).as_ref().balance();

                        if child_balance == -overweight.sign() {
                            // The taller child leans the other way; rotate
                            // its inner grandchild up through both levels.
                            let grand = T::links(child)
                                .as_ref()
                                .child(!overweight)
                                .expect("opposite-leaning child has an inner grandchild");
                            let grand_balance = T::links(grand).as_ref().balance();

                            self.rotate(child, overweight);
                            self.rotate(node, !overweight);

                            let (down, mid, up) = fixup::double(overweight, grand_balance);
                            T::links(node).as_mut().set_balance(down);
                            T::links(child).as_mut().set_balance(mid);
                            T::links(grand).as_mut().set_balance(up);
                            // A double rotation always shortens this subtree;
                            // keep propagating.
                        } else {
                            self.rotate(node, !overweight);

                            let (down, up, shrank) = fixup::single(overweight, child_balance);
                            T::links(node).as_mut().set_balance(down);
                            T::links(child).as_mut().set_balance(up);

                            if !shrank {
                                // The riser was evenly balanced, so the
                                // rotation preserved the subtree height.
                                return;
                            }
                        }
                    }
                }

                match (parent, next_dif) {
                    (Some(p), Some(d)) => {
                        node = p;
                        dif = d;
                    }
                    _ => return,
                }
            }
        }
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                // Descend to the minimum node.
                let cur = self.extremum_in_subtree(cur, Dir::Left);
                let parent = T::links(cur).as_ref().parent();
                let right = T::links(cur).as_ref().right();

                // Elevate the node's right child (which may be None).
                self.replace_child_or_set_root(parent, cur, right);
                self.maybe_set_parent(right, parent);

                // Drop the node.
                drop(T::from_ptr(cur));

                // If the node had no right child, climb to the parent. If the
                // node had no parent, the tree is empty.
                opt_cur = right.or(parent);
            }
        }

        debug_assert!(self.root.is_none());
    }

    // Structural primitives ==================================================

    // Rotates the subtree rooted at `pivot` in direction `dir`: `pivot`'s
    // child opposite `dir` rises to take its place, and `pivot` becomes that
    // child's `dir` child. In-order element order is preserved.
    //
    // Balance factors are not touched; callers assign them afterward.
    fn rotate(&mut self, pivot: NonNull<T>, dir: Dir) {
        unsafe {
            let up = T::links(pivot)
                .as_ref()
                .child(!dir)
                .expect("rotation requires a child opposite the rotation direction");

            // The riser's inner subtree switches sides: it sits between
            // `pivot` and `up` in key order, and stays there.
            let across = T::links(up).as_ref().child(dir);
            T::links(pivot).as_mut().set_child(!dir, across);
            self.maybe_set_parent(across, Some(pivot));

            let parent = T::links(pivot).as_ref().parent();
            T::links(up).as_mut().set_parent(parent);
            self.replace_child_or_set_root(parent, pivot, Some(up));

            T::links(up).as_mut().set_child(dir, Some(pivot));
            T::links(pivot).as_mut().set_parent(Some(up));
        }
    }

    // Exchanges the structural positions of `n1` and `n2`, including their
    // balance factors. The nodes keep their keys and values; only their
    // placement in the tree topology changes.
    unsafe fn swap_positions(&mut self, n1: NonNull<T>, n2: NonNull<T>) {
        if n1 == n2 {
            return;
        }

        unsafe {
            // The balance factor belongs to the structural position, not to
            // the key/value identity, so it travels with the position.
            let balance1 = T::links(n1).as_ref().balance();
            let balance2 = T::links(n2).as_ref().balance();
            T::links(n1).as_mut().set_balance(balance2);
            T::links(n2).as_mut().set_balance(balance1);

            if T::links(n2).as_ref().parent() == Some(n1) {
                return self.swap_with_child(n1, n2);
            }
            if T::links(n1).as_ref().parent() == Some(n2) {
                return self.swap_with_child(n2, n1);
            }

            // The nodes are not adjacent; snapshot both neighborhoods before
            // rewriting either.
            let parent1 = T::links(n1).as_ref().parent();
            let parent2 = T::links(n2).as_ref().parent();
            let slot1 = match parent1 {
                Some(p) => Some(self.which_child(p, Some(n1))),
                None => None,
            };
            let slot2 = match parent2 {
                Some(p) => Some(self.which_child(p, Some(n2))),
                None => None,
            };

            for dir in [Dir::Left, Dir::Right] {
                let child1 = T::links(n1).as_ref().child(dir);
                let child2 = T::links(n2).as_ref().child(dir);

                T::links(n1).as_mut().set_child(dir, child2);
                self.maybe_set_parent(child2, Some(n1));
                T::links(n2).as_mut().set_child(dir, child1);
                self.maybe_set_parent(child1, Some(n2));
            }

            T::links(n1).as_mut().set_parent(parent2);
            T::links(n2).as_mut().set_parent(parent1);

            match (parent1, slot1) {
                (Some(parent), Some(slot)) => {
                    T::links(parent).as_mut().set_child(slot, Some(n2));
                }
                _ => self.root = Some(n2),
            }
            match (parent2, slot2) {
                (Some(parent), Some(slot)) => {
                    T::links(parent).as_mut().set_child(slot, Some(n1));
                }
                _ => self.root = Some(n1),
            }
        }
    }

    // Position exchange for the adjacent case: `child` is a direct child of
    // `parent`.
    unsafe fn swap_with_child(&mut self, parent: NonNull<T>, child: NonNull<T>) {
        unsafe {
            let dir = self.which_child(parent, Some(child));
            let grandparent = T::links(parent).as_ref().parent();
            let other = T::links(parent).as_ref().child(!dir);
            let child_left = T::links(child).as_ref().left();
            let child_right = T::links(child).as_ref().right();

            // `child` takes `parent`'s slot...
            self.replace_child_or_set_root(grandparent, parent, Some(child));
            T::links(child).as_mut().set_parent(grandparent);

            // ...with `parent` hanging where `child` used to...
            T::links(child).as_mut().set_child(dir, Some(parent));
            T::links(parent).as_mut().set_parent(Some(child));

            T::links(child).as_mut().set_child(!dir, other);
            self.maybe_set_parent(other, Some(child));

            // ...and `parent` adopts `child`'s former children.
            T::links(parent).as_mut().set_left(child_left);
            T::links(parent).as_mut().set_right(child_right);
            self.maybe_set_parent(child_left, Some(parent));
            self.maybe_set_parent(child_right, Some(parent));
        }
    }

    // Support methods ========================================================

    unsafe fn maybe_set_parent(&mut self, opt_node: Link<T>, parent: Link<T>) {
        let Some(node) = opt_node else {
            return;
        };

        unsafe { T::links(node).as_mut().set_parent(parent) };
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with
    // `new_child`, or the tree root if `parent` is absent.
    //
    // `new_child`'s parent pointer is not updated.
    #[inline]
    unsafe fn replace_child_or_set_root(
        &mut self,
        parent: Link<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        match parent {
            Some(parent) => unsafe {
                let dir = self.which_child(parent, Some(old_child));
                T::links(parent).as_mut().set_child(dir, new_child);
            },
            None => self.root = new_child,
        }
    }

    pub(crate) unsafe fn which_child(&self, parent: NonNull<T>, child: Link<T>) -> Dir {
        if unsafe { T::links(parent).as_ref().left() } == child {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    // Returns the extreme node of the subtree rooted at `root` in direction
    // `dir`: its minimum for `Dir::Left`, its maximum for `Dir::Right`.
    pub(crate) unsafe fn extremum_in_subtree(&self, root: NonNull<T>, dir: Dir) -> NonNull<T> {
        let mut cur = root;

        while let Some(next) = unsafe { T::links(cur).as_ref().child(dir) } {
            cur = next;
        }

        cur
    }

    // Returns `node`'s in-order neighbor in direction `dir`: its predecessor
    // for `Dir::Left`, its successor for `Dir::Right`.
    pub(crate) unsafe fn neighbor_raw(&self, node: NonNull<T>, dir: Dir) -> Link<T> {
        unsafe {
            if let Some(child) = T::links(node).as_ref().child(dir) {
                return Some(self.extremum_in_subtree(child, !dir));
            }

            // No subtree on that side; climb until the walk crosses an
            // ancestor from the `dir` side.
            let mut cur = node;
            while let Some(parent) = T::links(cur).as_ref().parent() {
                if self.which_child(parent, Some(cur)) == !dir {
                    return Some(parent);
                }

                cur = parent;
            }

            None
        }
    }
}

impl<T> Drop for AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: ?Sized> Links<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                parent: None,
                children: [None; 2],
                balance: 0,
                _unpin: PhantomPinned,
            }),
        }
    }

    #[inline]
    fn balance(&self) -> i8 {
        unsafe { (*self.inner.get()).balance }
    }

    #[inline]
    fn parent(&self) -> Link<T> {
        unsafe { (*self.inner.get()).parent }
    }

    #[inline]
    fn child(&self, dir: Dir) -> Link<T> {
        unsafe { (*self.inner.get()).children[dir as usize] }
    }

    #[inline]
    fn left(&self) -> Link<T> {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Link<T> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().children[dir as usize], child)
    }

    #[inline]
    fn set_left(&mut self, left: Link<T>) -> Link<T> {
        self.set_child(Dir::Left, left)
    }

    #[inline]
    fn set_right(&mut self, right: Link<T>) -> Link<T> {
        self.set_child(Dir::Right, right)
    }

    #[inline]
    fn set_balance(&mut self, balance: i8) {
        self.inner.get_mut().balance = balance;
    }

    #[inline]
    fn clear(&mut self) {
        let inner = self.inner.get_mut();
        inner.parent = None;
        inner.children = [None; 2];
        inner.balance = 0;
    }
}

impl<T: ?Sized> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("parent", &self.parent())
            .field("left", &self.left())
            .field("right", &self.right())
            .field("balance", &self.balance())
            .finish()
    }
}
