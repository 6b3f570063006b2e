extern crate std;

use core::{fmt, ptr::NonNull};
use std::{collections::VecDeque, prelude::v1::*};

use crate::{Links, TreeNode, AvlTree};

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>>,
{
    /// Writes the tree as a Graphviz digraph, one `rank=same` group per tree
    /// level, with each node labeled `key:balance`.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
        T::Key: fmt::Display,
    {
        let Some(root) = self.root else {
            return write!(w, "digraph \"graph-{name}\" {{}}");
        };

        enum Item<T> {
            Node(NonNull<T>),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut edges = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let node = match queue.pop_front().unwrap() {
                    Item::Node(node) => node,
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                let key = unsafe { node.as_ref().key() };
                let balance = unsafe { T::links(node).as_ref().balance() };
                write!(w, "\"graph{name}-{key}\" [label=\"{key}:{balance}\"]; ")?;

                for child in unsafe {
                    [
                        T::links(node).as_ref().left(),
                        T::links(node).as_ref().right(),
                    ]
                } {
                    match child {
                        Some(child) => {
                            let child_key = unsafe { child.as_ref().key() };
                            writeln!(
                                edges,
                                "\"graph{name}-{key}\" -> \"graph{name}-{child_key}\";"
                            )?;
                            queue.push_back(Item::Node(child));
                        }
                        None => {
                            writeln!(
                                edges,
                                "\"graph{name}-{key}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            queue.push_back(Item::Missing(missing));
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&edges)?;

        w.write_str(" }\n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestNode;

    #[test]
    fn dotgraph_renders_keys_and_balances() {
        let mut tree: AvlTree<TestNode> = AvlTree::new();
        for key in [2, 1, 3, 4] {
            tree.insert(TestNode::new(key));
        }

        let mut out = String::new();
        tree.dotgraph("t", &mut out).unwrap();

        // The appended leaf 4 tips both 3 and the root toward the right.
        assert!(out.starts_with("digraph \"graph-t\""));
        assert!(out.contains("[label=\"2:1\"]"));
        assert!(out.contains("[label=\"1:0\"]"));
        assert!(out.contains("[label=\"3:1\"]"));
        assert!(out.contains("[label=\"4:0\"]"));
        assert!(out.contains("\"grapht-2\" -> \"grapht-3\";"));
    }

    #[test]
    fn dotgraph_empty_tree() {
        let tree: AvlTree<TestNode> = AvlTree::new();

        let mut out = String::new();
        tree.dotgraph("empty", &mut out).unwrap();

        assert_eq!(out, "digraph \"graph-empty\" {}");
    }
}
