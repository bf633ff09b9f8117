//! # triestore
//!
//! An in-memory key/value store built on a character-indexed trie, organized
//! into independently named stores.
//!
//! Keys are walked one byte at a time. A slot holds a single leaf until a
//! second key collides there, at which point it sprouts a nested node; nested
//! nodes emptied by a deletion are pruned again. Storing `None` under a key
//! deletes it.
//!
//! ## Example
//!
//! ```rust
//! use triestore::StoreRegistry;
//!
//! let mut stores: StoreRegistry<u64> = StoreRegistry::new();
//! stores.create_store("A").unwrap();
//! stores.insert("A", "cat", Some(1)).unwrap();
//! stores.insert("A", "car", Some(2)).unwrap();
//!
//! assert_eq!(stores.lookup("A", "cat").unwrap(), Some(&1));
//! assert!(stores.exists("A", "car").unwrap());
//!
//! stores.insert("A", "cat", None).unwrap();
//! assert!(!stores.exists("A", "cat").unwrap());
//! ```
//!
//! The [`batch`] module drives a registry from text commands such as
//! `insert cat 1 into A`, producing a two-column report.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod batch;
pub mod command;
pub mod error;
pub mod node;
pub mod registry;

pub use batch::{Config, Interpreter};
pub use command::Command;
pub use error::{CommandError, StoreError};
pub use node::{Leaf, NodeStats, Slot, TrieNode};
pub use registry::StoreRegistry;

#[cfg(test)]
mod proptests;
