//! Named stores, each owning one trie root.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::error::{Result, StoreError};
use crate::node::TrieNode;

/// Maps store names to independent tries.
///
/// Every operation on a store fails with [`StoreError::NotFound`] until the
/// store has been created with [`create_store`](Self::create_store).
#[derive(Debug, Clone)]
pub struct StoreRegistry<V> {
    stores: HashMap<String, TrieNode<V>>,
}

impl<V> StoreRegistry<V> {
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Create an empty store called `name`.
    pub fn create_store(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        match self.stores.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(name.to_owned())),
            Entry::Vacant(entry) => {
                entry.insert(TrieNode::new());
                debug!("created store {name:?}");
                Ok(())
            }
        }
    }

    /// Drop the store called `name` together with every key in it.
    pub fn delete_store(&mut self, name: &str) -> Result<()> {
        match self.stores.remove(name) {
            Some(root) => {
                debug!("deleted store {name:?} holding {} keys", root.len());
                Ok(())
            }
            None => Err(StoreError::NotFound(name.to_owned())),
        }
    }

    pub fn resolve(&self, name: &str) -> Result<&TrieNode<V>> {
        self.stores
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_owned()))
    }

    pub fn resolve_mut(&mut self, name: &str) -> Result<&mut TrieNode<V>> {
        self.stores
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_owned()))
    }

    /// Store `value` under `key` in `store`; `None` deletes the key.
    pub fn insert(&mut self, store: &str, key: impl AsRef<[u8]>, value: Option<V>) -> Result<()> {
        self.resolve_mut(store)?.insert(key.as_ref(), value);
        Ok(())
    }

    pub fn remove(&mut self, store: &str, key: impl AsRef<[u8]>) -> Result<()> {
        self.insert(store, key, None)
    }

    pub fn lookup(&self, store: &str, key: impl AsRef<[u8]>) -> Result<Option<&V>> {
        Ok(self.resolve(store)?.get(key.as_ref()))
    }

    pub fn exists(&self, store: &str, key: impl AsRef<[u8]>) -> Result<bool> {
        Ok(self.resolve(store)?.contains_key(key.as_ref()))
    }

    pub fn contains_store(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Names of all stores, sorted.
    pub fn store_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stores.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl<V> Default for StoreRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
