extern crate std;

use std::{ops::Range, prelude::v1::*, ptr::NonNull};

use proptest::prelude::*;

use crate::model::{self, TestNode};

use super::*;

// A small deterministic generator for shuffles and key sequences, so the
// larger structural tests don't depend on proptest.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed | 1)
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_u32() as usize % (i + 1);
            items.swap(i, j);
        }
    }
}

// All orderings of `0..n`, by Heap's algorithm.
fn permutations(n: usize) -> Vec<Vec<u32>> {
    fn heap(k: usize, arr: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
        if k <= 1 {
            out.push(arr.clone());
            return;
        }

        for i in 0..k {
            heap(k - 1, arr, out);
            if k % 2 == 0 {
                arr.swap(i, k - 1);
            } else {
                arr.swap(0, k - 1);
            }
        }
    }

    let mut arr: Vec<u32> = (0..n as u32).collect();
    let mut out = Vec::new();
    heap(n, &mut arr, &mut out);
    out
}

fn node(tree: &AvlTree<TestNode>, key: u32) -> NonNull<TestNode> {
    tree.get_raw(&key).expect("key not found")
}

fn balance_of(tree: &AvlTree<TestNode>, key: u32) -> i8 {
    unsafe { TestNode::links(node(tree, key)).as_ref().balance() }
}

fn child_key(tree: &AvlTree<TestNode>, key: u32, dir: Dir) -> Option<u32> {
    unsafe {
        match TestNode::links(node(tree, key)).as_ref().child(dir) {
            Some(child) => Some(child.as_ref().key),
            None => None,
        }
    }
}

fn root_key(tree: &AvlTree<TestNode>) -> u32 {
    unsafe { tree.root.expect("tree is empty").as_ref().key }
}

fn keys_in_order(tree: &AvlTree<TestNode>) -> Vec<u32> {
    tree.iter().map(|node| node.key).collect()
}

fn tree_of(keys: &[u32]) -> AvlTree<TestNode> {
    let mut tree = AvlTree::new();

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    tree
}

fn insert_find_all(keys: &[u32]) {
    let tree = tree_of(keys);

    for key in keys {
        let node = tree.get_raw(key).expect("item not found");
        assert_eq!(unsafe { node.as_ref().key() }, key);
    }

    let mut sorted: Vec<u32> = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(keys_in_order(&tree), sorted);
}

fn insert_remove_all(keys: &[u32]) {
    let mut tree = tree_of(keys);

    for key in keys {
        let node = tree.get_raw(key).expect("item not found");
        unsafe { tree.remove_at(node) };
        tree.assert_invariants();
    }

    assert!(tree.is_empty());

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    for key in keys.iter().rev() {
        let node = tree.get_raw(key).expect("item not found");
        unsafe { tree.remove_at(node) };
        tree.assert_invariants();
    }

    assert!(tree.is_empty());
    assert!(tree.iter().next().is_none());
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn small_permutations_find() {
    for n in 2..=5 {
        for perm in permutations(n) {
            insert_find_all(&perm);
        }
    }
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn small_permutations_remove() {
    for n in 2..=5 {
        for perm in permutations(n) {
            insert_remove_all(&perm);
        }
    }
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree = tree_of(&[2, 1, 3]);

    let rejected = tree.insert(TestNode::new(2));
    assert_eq!(rejected.expect("duplicate must be handed back").key, 2);

    tree.assert_invariants();
    assert_eq!(keys_in_order(&tree), vec![1, 2, 3]);
}

#[test]
fn remove_missing_key_is_a_noop() {
    let mut tree = tree_of(&[2, 1, 3]);

    assert!(tree.remove(&7).is_none());

    tree.assert_invariants();
    assert_eq!(keys_in_order(&tree), vec![1, 2, 3]);
}

// Ascending insertion of 1, 2, 3 leaves the root right-heavy by two; a single
// left rotation must lift 2 to the root and level everything.
#[test]
fn ascending_triple_single_rotation() {
    let tree = tree_of(&[1, 2, 3]);

    assert_eq!(root_key(&tree), 2);
    assert_eq!(child_key(&tree, 2, Dir::Left), Some(1));
    assert_eq!(child_key(&tree, 2, Dir::Right), Some(3));
    for key in [1, 2, 3] {
        assert_eq!(balance_of(&tree, key), 0);
    }
}

// Inserting 2 between 3 and 1 makes the middle key rise through a double
// (right-left) rotation, producing the same shape as the single-rotation
// case.
#[test]
fn zig_zag_triple_double_rotation() {
    let tree = tree_of(&[3, 1, 2]);

    assert_eq!(root_key(&tree), 2);
    assert_eq!(child_key(&tree, 2, Dir::Left), Some(1));
    assert_eq!(child_key(&tree, 2, Dir::Right), Some(3));
    for key in [1, 2, 3] {
        assert_eq!(balance_of(&tree, key), 0);
    }
}

#[test]
fn descending_triple_single_rotation() {
    let tree = tree_of(&[30, 20, 10]);

    assert_eq!(root_key(&tree), 20);
    assert_eq!(child_key(&tree, 20, Dir::Left), Some(10));
    assert_eq!(child_key(&tree, 20, Dir::Right), Some(30));

    // Removing a leaf off the balanced triple is absorbed by the root's
    // balance factor alone.
    let mut tree = tree;
    tree.remove(&30).expect("30 is present");
    tree.assert_invariants();

    assert_eq!(root_key(&tree), 20);
    assert_eq!(balance_of(&tree, 20), -1);
    assert_eq!(keys_in_order(&tree), vec![10, 20]);
}

// Removing the lone right child of the root leaves the left subtree two
// levels taller; the removal walk must resolve it with one right rotation.
#[test]
fn removal_single_rotation() {
    let mut tree = tree_of(&[20, 10, 30, 5]);

    tree.remove(&30).expect("30 is present");
    tree.assert_invariants();

    assert_eq!(root_key(&tree), 10);
    assert_eq!(child_key(&tree, 10, Dir::Left), Some(5));
    assert_eq!(child_key(&tree, 10, Dir::Right), Some(20));
    for key in [5, 10, 20] {
        assert_eq!(balance_of(&tree, key), 0);
    }
}

// As above, but the surviving subtree leans inward, so the walk must rotate
// the inner grandchild up through both levels.
#[test]
fn removal_double_rotation() {
    let mut tree = tree_of(&[20, 10, 30, 15]);

    tree.remove(&30).expect("30 is present");
    tree.assert_invariants();

    assert_eq!(root_key(&tree), 15);
    assert_eq!(child_key(&tree, 15, Dir::Left), Some(10));
    assert_eq!(child_key(&tree, 15, Dir::Right), Some(20));
    for key in [10, 15, 20] {
        assert_eq!(balance_of(&tree, key), 0);
    }
}

// Removing a node with two children swaps it with its in-order predecessor
// (the maximum of its left subtree) before splicing. Exercises the case
// where the predecessor is the node's direct left child.
#[test]
fn remove_two_child_node_adjacent_predecessor() {
    let mut tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 35, 45]);
    let count = tree.len();

    // 30's left child 20 is a leaf, so 20 itself is the predecessor.
    tree.remove(&30).expect("30 is present");
    tree.assert_invariants();

    assert!(!tree.contains_key(&30));
    assert!(tree.contains_key(&20));
    assert_eq!(tree.len(), count - 1);
    assert_eq!(keys_in_order(&tree), vec![20, 35, 40, 45, 50, 60, 70, 80]);
}

// As above, with the predecessor buried deeper than the left child.
#[test]
fn remove_two_child_node_distant_predecessor() {
    let mut tree = tree_of(&[50, 30, 70, 20, 40, 60, 80, 25, 35, 45]);
    let count = tree.len();

    // predecessor(30) is 25, the right child of 20.
    tree.remove(&30).expect("30 is present");
    tree.assert_invariants();

    assert!(!tree.contains_key(&30));
    assert!(tree.contains_key(&25));
    assert_eq!(tree.len(), count - 1);
    assert_eq!(
        keys_in_order(&tree),
        vec![20, 25, 35, 40, 45, 50, 60, 70, 80]
    );
}

#[test]
fn remove_two_child_root() {
    let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);

    let root = root_key(&tree);
    tree.remove(&root).expect("root is present");
    tree.assert_invariants();

    assert!(!tree.contains_key(&root));
    assert_eq!(keys_in_order(&tree), vec![1, 2, 3, 5, 6, 7]);
}

fn assert_height_bound(len: usize, height: usize) {
    let bound = 1.44 * ((len + 2) as f64).log2() - 0.328;
    assert!(
        (height as f64) <= bound,
        "height {height} exceeds AVL bound {bound} for {len} nodes"
    );
}

#[cfg(miri)]
const HEIGHT_BOUND_CHECKPOINTS: [usize; 3] = [1, 10, 100];

#[cfg(not(miri))]
const HEIGHT_BOUND_CHECKPOINTS: [usize; 5] = [1, 10, 100, 1_000, 10_000];

#[test]
fn height_bound_sequential_inserts() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();

    let mut inserted = 0;
    for key in 0..*HEIGHT_BOUND_CHECKPOINTS.last().unwrap() as u32 {
        tree.insert(TestNode::new(key));
        inserted += 1;

        if HEIGHT_BOUND_CHECKPOINTS.contains(&inserted) {
            tree.assert_invariants();
            assert_height_bound(inserted, tree.height());
        }
    }
}

#[test]
fn height_bound_random_inserts() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();
    let mut lcg = Lcg::new(0x5DEECE66D);

    let mut inserted = 0;
    while inserted < *HEIGHT_BOUND_CHECKPOINTS.last().unwrap() {
        if tree.insert(TestNode::new(lcg.next_u32())).is_none() {
            inserted += 1;

            if HEIGHT_BOUND_CHECKPOINTS.contains(&inserted) {
                tree.assert_invariants();
                assert_height_bound(inserted, tree.height());
            }
        }
    }
}

#[test]
fn shuffled_round_trip() {
    const N: u32 = if cfg!(miri) { 32 } else { 1_000 };

    let mut keys: Vec<u32> = (0..N).collect();
    let mut lcg = Lcg::new(0xDEADBEEF);
    lcg.shuffle(&mut keys);

    let mut tree: AvlTree<TestNode> = AvlTree::new();
    for &key in &keys {
        tree.insert(TestNode::new(key));
    }
    tree.assert_invariants();
    assert_eq!(tree.len(), keys.len());

    // Remove in an unrelated order; the tree must drain to nothing.
    lcg.shuffle(&mut keys);
    for &key in &keys {
        tree.remove(&key).expect("key is present");
    }

    assert!(tree.is_empty());
    assert!(tree.iter().next().is_none());
    assert_eq!(tree.first().map(|n| n.key), None);
}

// Random insert/remove churn over a small key space, with full invariant
// verification after every operation.
#[test]
fn stress_random_ops() {
    const OPS: usize = if cfg!(miri) { 64 } else { 8_192 };

    let mut tree: AvlTree<TestNode> = AvlTree::new();
    let mut lcg = Lcg::new(0xA5A5A5A5);

    for _ in 0..OPS {
        let key = lcg.next_u32() % 512;

        if lcg.next_u32() % 2 == 0 {
            tree.insert(TestNode::new(key));
        } else {
            tree.remove(&key);
        }

        tree.assert_invariants();
    }
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn map_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_map_equivalence(ops);
    }
}
