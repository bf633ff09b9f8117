//! Character-indexed trie nodes.
//!
//! Every node owns one slot per possible byte value. A slot is either empty,
//! holds a single [`Leaf`] for the only key passing through that byte at this
//! depth, or holds a nested [`TrieNode`] once a second key collides there.
//! A key that runs out exactly at a node is kept in the node's prefix value.
//!
//! Nodes are created on demand when two keys collide in a slot and removed on
//! demand when a deletion leaves a nested node with nothing in it.
//!
//! Chains of nested nodes are as deep as the longest shared key prefix, so
//! every walk over the tree (insert, lookup, delete, clone, drop, stats) runs
//! in a loop instead of recursing.

mod debug;

/// Number of slots in every node, one per byte value.
pub const FANOUT: usize = 256;

/// A single key still unresolved at some depth, together with its value.
///
/// The stored key starts with the byte of the slot that holds the leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<V> {
    key: Box<[u8]>,
    value: V,
}

impl<V> Leaf<V> {
    fn new(key: &[u8], value: V) -> Self {
        debug_assert!(!key.is_empty());
        Self {
            key: key.into(),
            value,
        }
    }

    /// Remaining key at this depth, slot byte included.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Contents of one child slot.
///
/// Leaves are boxed so a slot stays two words wide.
#[derive(Debug, Clone)]
pub enum Slot<V> {
    Empty,
    Leaf(Box<Leaf<V>>),
    Branch(Box<TrieNode<V>>),
}

impl<V> Slot<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Slot::Leaf(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Slot::Branch(_))
    }

    fn take(&mut self) -> Self {
        std::mem::replace(self, Slot::Empty)
    }
}

/// Shape of a subtree, as reported by [`TrieNode::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Nested nodes below the inspected node.
    pub branches: usize,
    /// Leaves anywhere in the subtree.
    pub leaves: usize,
    /// Nodes (the inspected one included) holding a prefix value.
    pub prefix_values: usize,
    /// Deepest level of nesting below the inspected node.
    pub max_depth: usize,
}

/// One position in the trie.
///
/// A node exclusively owns its slots and everything nested in them; dropping
/// a node drops its whole subtree.
pub struct TrieNode<V> {
    children: Box<[Slot<V>; FANOUT]>,
    prefix_value: Option<V>,
}

impl<V> TrieNode<V> {
    /// Create an empty node.
    pub fn new() -> Self {
        Self {
            children: Box::new(std::array::from_fn(|_| Slot::Empty)),
            prefix_value: None,
        }
    }

    /// Store `value` under `key`, or delete `key` when `value` is `None`.
    ///
    /// A leaf is sprouted into a nested node as soon as a second key lands in
    /// its slot, even when both keys are equal; the incoming value always wins.
    /// Deleting through a leaf only removes it when its key matches exactly.
    /// Nested nodes left empty by a deletion are pruned from their slot.
    pub fn insert(&mut self, key: &[u8], value: Option<V>) {
        match value {
            Some(value) => self.put(key, value),
            None => self.delete(key),
        }
    }

    fn put(&mut self, key: &[u8], value: V) {
        let mut node = self;
        let mut key = key;
        loop {
            let Some((&byte, rest)) = key.split_first() else {
                node.prefix_value = Some(value);
                return;
            };

            let slot = &mut node.children[byte as usize];
            if slot.is_leaf() {
                if let Slot::Leaf(displaced) = slot.take() {
                    *slot = Slot::Branch(Self::sprout(*displaced));
                }
            }
            match slot {
                Slot::Branch(child) => {
                    node = child;
                    key = rest;
                }
                _ => {
                    *slot = Slot::Leaf(Box::new(Leaf::new(key, value)));
                    return;
                }
            }
        }
    }

    /// Build the nested node replacing a leaf that another key collided with,
    /// seeded with the displaced leaf one level down.
    fn sprout(displaced: Leaf<V>) -> Box<Self> {
        let mut branch = Box::new(Self::new());
        let Leaf { key, value } = displaced;
        match key.get(1..) {
            Some(rest) if !rest.is_empty() => {
                branch.children[rest[0] as usize] = Slot::Leaf(Box::new(Leaf::new(rest, value)));
            }
            _ => branch.prefix_value = Some(value),
        }
        branch
    }

    fn delete(&mut self, key: &[u8]) {
        // Depth of the topmost slot whose subtree holds nothing but `key`.
        let mut cut = None;
        let mut node: &Self = self;
        for (depth, &byte) in key.iter().enumerate() {
            match &node.children[byte as usize] {
                Slot::Empty => return,
                Slot::Leaf(leaf) => {
                    if leaf.key() != &key[depth..] {
                        return;
                    }
                    self.clear_slot(key, cut.unwrap_or(depth));
                    return;
                }
                Slot::Branch(child) => {
                    if child.content_count() == 1 {
                        cut.get_or_insert(depth);
                    } else {
                        cut = None;
                    }
                    node = child;
                }
            }
        }

        if node.prefix_value.is_none() {
            return;
        }
        match cut {
            Some(depth) => self.clear_slot(key, depth),
            None => {
                if let Some(owner) = self.descend_mut(key) {
                    owner.prefix_value = None;
                }
            }
        }
    }

    /// Empty the slot for `key[depth]` in the node reached through `key[..depth]`.
    fn clear_slot(&mut self, key: &[u8], depth: usize) {
        if let Some(node) = self.descend_mut(&key[..depth]) {
            // Dropping a pruned chain goes through `Drop`, which does not recurse.
            node.children[key[depth] as usize] = Slot::Empty;
        }
    }

    /// Follow nested nodes along `path`.
    fn descend_mut(&mut self, path: &[u8]) -> Option<&mut Self> {
        let mut node = self;
        for &byte in path {
            match &mut node.children[byte as usize] {
                Slot::Branch(child) => node = child,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Prefix value plus occupied slots.
    fn content_count(&self) -> usize {
        usize::from(self.prefix_value.is_some()) + self.occupied().count()
    }

    /// Delete `key`. Shorthand for `insert(key, None)`.
    pub fn remove(&mut self, key: &[u8]) {
        self.delete(key);
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let mut node = self;
        for (depth, &byte) in key.iter().enumerate() {
            match &node.children[byte as usize] {
                Slot::Empty => return None,
                Slot::Branch(child) => node = child,
                Slot::Leaf(leaf) => return (leaf.key() == &key[depth..]).then_some(&leaf.value),
            }
        }
        node.prefix_value.as_ref()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// A node is empty when it has no prefix value and every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.prefix_value.is_none() && self.children.iter().all(Slot::is_empty)
    }

    /// Number of keys stored in this subtree.
    pub fn len(&self) -> usize {
        let stats = self.stats();
        stats.leaves + stats.prefix_values
    }

    pub fn prefix_value(&self) -> Option<&V> {
        self.prefix_value.as_ref()
    }

    /// Slot for `byte`.
    pub fn slot(&self, byte: u8) -> &Slot<V> {
        &self.children[byte as usize]
    }

    /// Non-empty slots in byte order.
    pub fn occupied(&self) -> impl Iterator<Item = (u8, &Slot<V>)> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(byte, slot)| (byte as u8, slot))
    }

    pub fn stats(&self) -> NodeStats {
        let mut stats = NodeStats::default();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            if node.prefix_value.is_some() {
                stats.prefix_values += 1;
            }
            stats.max_depth = stats.max_depth.max(depth);
            for (_, slot) in node.occupied() {
                match slot {
                    Slot::Empty => {}
                    Slot::Leaf(_) => stats.leaves += 1,
                    Slot::Branch(child) => {
                        stats.branches += 1;
                        stack.push((child.as_ref(), depth + 1));
                    }
                }
            }
        }
        stats
    }

    /// Copy of this node without its nested nodes.
    fn shallow_clone(&self) -> Self
    where
        V: Clone,
    {
        let mut copy = Self::new();
        copy.prefix_value = self.prefix_value.clone();
        for (byte, slot) in self.occupied() {
            if let Slot::Leaf(leaf) = slot {
                copy.children[byte as usize] = Slot::Leaf(leaf.clone());
            }
        }
        copy
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TrieNode<V> {
    fn clone(&self) -> Self {
        // Shallow copies, each after its parent, with the slot it hangs from.
        let mut copies = vec![self.shallow_clone()];
        let mut links: Vec<(usize, u8)> = Vec::new();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, index)) = stack.pop() {
            for (byte, slot) in node.occupied() {
                if let Slot::Branch(child) = slot {
                    copies.push(child.shallow_clone());
                    links.push((index, byte));
                    stack.push((child.as_ref(), copies.len() - 1));
                }
            }
        }

        while let Some((parent, byte)) = links.pop() {
            if let Some(copy) = copies.pop() {
                copies[parent].children[byte as usize] = Slot::Branch(Box::new(copy));
            }
        }
        copies.pop().unwrap_or_default()
    }
}

impl<V> Drop for TrieNode<V> {
    fn drop(&mut self) {
        let mut detached: Vec<Box<Self>> = Vec::new();
        detach_branches(self, &mut detached);
        while let Some(mut node) = detached.pop() {
            detach_branches(&mut node, &mut detached);
        }
    }
}

fn detach_branches<V>(node: &mut TrieNode<V>, out: &mut Vec<Box<TrieNode<V>>>) {
    for slot in node.children.iter_mut() {
        if slot.is_branch() {
            if let Slot::Branch(child) = slot.take() {
                out.push(child);
            }
        }
    }
}
