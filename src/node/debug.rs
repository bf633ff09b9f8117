//! Debug utilities for inspecting trie structure.

use std::fmt::{self, Write};

use super::{Slot, TrieNode};

/// Pending work while rendering a subtree.
enum Dump<'a, V> {
    Node(&'a TrieNode<V>, usize),
    Slot(u8, &'a Slot<V>, usize),
}

impl<V: fmt::Debug> TrieNode<V> {
    /// Render the subtree, one line per prefix value, leaf or nested node.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![Dump::Node(self, 0)];
        while let Some(item) = stack.pop() {
            match item {
                Dump::Node(node, depth) => {
                    if let Some(value) = &node.prefix_value {
                        let _ = writeln!(out, "{}= {value:?}", "  ".repeat(depth));
                    }
                    let slots: Vec<_> = node.occupied().collect();
                    stack.extend(
                        slots
                            .into_iter()
                            .rev()
                            .map(|(byte, slot)| Dump::Slot(byte, slot, depth)),
                    );
                }
                Dump::Slot(byte, slot, depth) => {
                    let indent = "  ".repeat(depth);
                    match slot {
                        Slot::Empty => {}
                        Slot::Leaf(leaf) => {
                            let _ = writeln!(
                                out,
                                "{indent}[{}] {:?} -> {:?}",
                                byte.escape_ascii(),
                                String::from_utf8_lossy(leaf.key()),
                                leaf.value()
                            );
                        }
                        Slot::Branch(child) => {
                            let _ = writeln!(out, "{indent}[{}]", byte.escape_ascii());
                            stack.push(Dump::Node(child.as_ref(), depth + 1));
                        }
                    }
                }
            }
        }
        out
    }
}

impl<V: fmt::Debug> fmt::Debug for TrieNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("TrieNode")
            .field("prefix_value", &self.prefix_value)
            .field("keys", &(stats.leaves + stats.prefix_values))
            .field("branches", &stats.branches)
            .field("max_depth", &stats.max_depth)
            .finish()
    }
}

impl<V> TrieNode<V> {
    /// Audit the subtree and return a description of every issue found.
    ///
    /// Nested nodes must never be empty and every leaf key must start with
    /// the byte of the slot holding it.
    pub fn verify(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut path: Vec<u8> = Vec::new();
        // (node, length of the path above it, byte leading into it)
        let mut stack = vec![(self, 0usize, None)];
        while let Some((node, above, byte)) = stack.pop() {
            path.truncate(above);
            path.extend(byte);
            for (byte, slot) in node.occupied() {
                match slot {
                    Slot::Empty => {}
                    Slot::Leaf(leaf) => {
                        if leaf.key().first() != Some(&byte) {
                            path.push(byte);
                            issues.push(format!(
                                "leaf at {:?} holds key {:?}",
                                String::from_utf8_lossy(path.as_slice()),
                                String::from_utf8_lossy(leaf.key())
                            ));
                            path.pop();
                        }
                    }
                    Slot::Branch(child) => {
                        if child.is_empty() {
                            path.push(byte);
                            issues.push(format!(
                                "empty branch left at {:?}",
                                String::from_utf8_lossy(path.as_slice())
                            ));
                            path.pop();
                        }
                        stack.push((child.as_ref(), path.len(), Some(byte)));
                    }
                }
            }
        }
        issues
    }
}
