use core::iter::FusedIterator;

use crate::{AvlTree, Dir, Link, Links, TreeNode};

/// A borrowing in-order iterator over the elements of an [`AvlTree`].
pub struct Iter<'tree, T: TreeNode<Links<T>> + ?Sized> {
    tree: &'tree AvlTree<T>,
    next: Link<T>,
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iter<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        let next = tree
            .root
            .map(|root| unsafe { tree.extremum_in_subtree(root, Dir::Left) });

        Iter { tree, next }
    }
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;

        // The successor walk touches only parent and right-child links of
        // nodes that remain borrowed by `self.tree` for `'tree`.
        unsafe {
            self.next = self.tree.neighbor_raw(cur, Dir::Right);
            Some(cur.as_ref())
        }
    }
}

impl<T: TreeNode<Links<T>> + ?Sized> FusedIterator for Iter<'_, T> {}
