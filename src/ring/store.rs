//! Storage strategies for ring entries
//!
//! The ring only needs an ordered, unique-keyed set of virtual nodes with a
//! "successor or wrap" query. Two backings are provided:
//! - [`TreeStore`]: balanced ordered tree, cheap mutation
//! - [`SortedStore`]: sorted array with binary search, cheap lookup and compact
//!
//! Both are externally indistinguishable; they differ only in cost profile.

use super::vnode::VirtualNode;
use crate::error::RingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

/// Which backing structure a ring uses for its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStrategy {
    /// Balanced ordered tree, O(log n) add/remove/get
    #[default]
    Tree,
    /// Sorted array, O(n) add/remove, O(log n) get
    Sorted,
}

impl StorageStrategy {
    /// Create an empty store for this strategy
    pub(crate) fn new_store(self) -> Box<dyn EntryStore> {
        match self {
            StorageStrategy::Tree => Box::new(TreeStore::default()),
            StorageStrategy::Sorted => Box::new(SortedStore::default()),
        }
    }
}

impl fmt::Display for StorageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageStrategy::Tree => write!(f, "tree"),
            StorageStrategy::Sorted => write!(f, "sorted"),
        }
    }
}

impl FromStr for StorageStrategy {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(StorageStrategy::Tree),
            "sorted" => Ok(StorageStrategy::Sorted),
            other => Err(RingError::InvalidConfig(format!(
                "unknown storage strategy '{}'",
                other
            ))),
        }
    }
}

/// Ordered container of virtual nodes
pub trait EntryStore: fmt::Debug + Send + Sync {
    /// The strategy implemented by this store
    fn strategy(&self) -> StorageStrategy;

    /// Insert a batch of virtual nodes, ignoring exact duplicates
    fn insert(&mut self, nodes: &[VirtualNode]);

    /// Remove a batch of virtual nodes, ignoring absent ones
    fn remove(&mut self, nodes: &[VirtualNode]);

    /// Smallest node with `position >= position`, wrapping to the first node
    fn successor(&self, position: u32) -> Option<&VirtualNode>;

    /// All nodes in ring order, starting at the successor of `position`
    /// and wrapping around once
    fn walk(&self, position: u32) -> Box<dyn Iterator<Item = &VirtualNode> + '_>;

    /// Number of stored nodes
    fn len(&self) -> usize;

    /// Check if the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone into a new boxed store
    fn clone_box(&self) -> Box<dyn EntryStore>;
}

impl Clone for Box<dyn EntryStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Tree-backed store
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    nodes: BTreeSet<VirtualNode>,
}

impl EntryStore for TreeStore {
    fn strategy(&self) -> StorageStrategy {
        StorageStrategy::Tree
    }

    fn insert(&mut self, nodes: &[VirtualNode]) {
        for node in nodes {
            self.nodes.insert(node.clone());
        }
    }

    fn remove(&mut self, nodes: &[VirtualNode]) {
        for node in nodes {
            self.nodes.remove(node);
        }
    }

    fn successor(&self, position: u32) -> Option<&VirtualNode> {
        let bound = VirtualNode::lower_bound(position);
        self.nodes
            .range((Bound::Included(bound), Bound::Unbounded))
            .next()
            .or_else(|| self.nodes.first())
    }

    fn walk(&self, position: u32) -> Box<dyn Iterator<Item = &VirtualNode> + '_> {
        let bound = VirtualNode::lower_bound(position);
        let after = self
            .nodes
            .range((Bound::Included(bound.clone()), Bound::Unbounded));
        let before = self.nodes.range((Bound::Unbounded, Bound::Excluded(bound)));
        Box::new(after.chain(before))
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clone_box(&self) -> Box<dyn EntryStore> {
        Box::new(self.clone())
    }
}

/// Sorted-array-backed store
///
/// Every mutation rebuilds the array, so it suits rings that change rarely
/// and are queried often.
#[derive(Debug, Clone, Default)]
pub struct SortedStore {
    nodes: Vec<VirtualNode>,
}

impl SortedStore {
    /// Index of the first node with `position >= position`
    fn search(&self, position: u32) -> usize {
        self.nodes.partition_point(|n| n.position < position)
    }
}

impl EntryStore for SortedStore {
    fn strategy(&self) -> StorageStrategy {
        StorageStrategy::Sorted
    }

    fn insert(&mut self, nodes: &[VirtualNode]) {
        self.nodes.reserve(nodes.len());
        self.nodes.extend_from_slice(nodes);
        self.nodes.sort_unstable();
        self.nodes.dedup();
    }

    fn remove(&mut self, nodes: &[VirtualNode]) {
        if nodes.is_empty() {
            return;
        }
        let doomed: BTreeSet<&VirtualNode> = nodes.iter().collect();
        self.nodes.retain(|n| !doomed.contains(n));
    }

    fn successor(&self, position: u32) -> Option<&VirtualNode> {
        let idx = self.search(position);
        // Past the last position: cycle back to the first node
        self.nodes.get(idx).or_else(|| self.nodes.first())
    }

    fn walk(&self, position: u32) -> Box<dyn Iterator<Item = &VirtualNode> + '_> {
        let (before, after) = self.nodes.split_at(self.search(position));
        Box::new(after.iter().chain(before.iter()))
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clone_box(&self) -> Box<dyn EntryStore> {
        Box::new(self.clone())
    }
}
