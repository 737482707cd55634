//! Consistent hashing ring
//!
//! Each member is projected onto `replicas` positions of a `u32` ring. A
//! request key is routed to the owner of the first virtual node at or after
//! the key's own position, wrapping past the largest position back to the
//! smallest. Adding or removing a member only remaps the keys that fall next
//! to that member's virtual nodes.

mod store;
mod vnode;

pub use store::{EntryStore, SortedStore, StorageStrategy, TreeStore};
pub use vnode::{replica_position, VirtualNode};

use crate::error::RingError;
use crate::hash::{default_hash, HashFn};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A consistent hashing ring over string member keys
///
/// Not internally synchronized: wrap it in a `RwLock` to share it between
/// threads that both read and mutate.
#[derive(Clone)]
pub struct Ring {
    /// Virtual nodes per member
    replicas: usize,

    /// Hash used for both virtual node and query positions
    hash: HashFn,

    /// Ordered virtual nodes
    entries: Box<dyn EntryStore>,

    /// Member key -> the virtual nodes it owns
    membership: HashMap<Arc<str>, Vec<VirtualNode>>,
}

impl Ring {
    /// Create an empty tree-backed ring
    pub fn new(replicas: usize, hash: HashFn) -> Result<Self, RingError> {
        Self::with_strategy(replicas, hash, StorageStrategy::Tree)
    }

    /// Create an empty tree-backed ring using the default CRC32 hash
    pub fn with_crc32(replicas: usize) -> Result<Self, RingError> {
        Self::new(replicas, default_hash())
    }

    /// Create an empty ring with an explicit storage strategy
    pub fn with_strategy(
        replicas: usize,
        hash: HashFn,
        strategy: StorageStrategy,
    ) -> Result<Self, RingError> {
        if replicas == 0 {
            return Err(RingError::ZeroReplicas);
        }

        Ok(Ring {
            replicas,
            hash,
            entries: strategy.new_store(),
            membership: HashMap::new(),
        })
    }

    /// Add members to the ring
    ///
    /// Members already present are skipped. The final ring does not depend on
    /// the order in which members were added.
    pub fn add<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if self.membership.contains_key(key) {
                trace!(member = key, "member already on ring, skipping");
                continue;
            }

            let owner: Arc<str> = Arc::from(key);
            let nodes = vnode::replicas_of(&self.hash, self.replicas, &owner);
            self.entries.insert(&nodes);
            self.membership.insert(owner, nodes);

            debug!(
                member = key,
                replicas = self.replicas,
                vnodes = self.entries.len(),
                "added member to ring"
            );
        }
    }

    /// Remove a member and all of its virtual nodes
    ///
    /// Removing an absent member does nothing.
    pub fn remove(&mut self, key: &str) {
        match self.membership.remove(key) {
            Some(nodes) => {
                self.entries.remove(&nodes);
                debug!(member = key, vnodes = self.entries.len(), "removed member from ring");
            }
            None => trace!(member = key, "member not on ring, nothing to remove"),
        }
    }

    /// Route a request key to its owning member
    ///
    /// Returns `None` only when the ring has no members.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.is_empty() {
            return None;
        }

        let position = (self.hash)(key.as_bytes());
        self.entries.successor(position).map(|n| &*n.owner)
    }

    /// Route a request key to up to `n` distinct members
    ///
    /// Walks clockwise from the key's position, collecting owners in the order
    /// they are met. The first element is always [`Ring::get`]'s answer. When
    /// `n` exceeds the member count every member is returned.
    pub fn get_n(&self, key: &str, n: usize) -> Vec<&str> {
        let wanted = n.min(self.membership.len());
        let mut owners: Vec<&str> = Vec::with_capacity(wanted);
        if wanted == 0 {
            return owners;
        }

        let position = (self.hash)(key.as_bytes());
        for node in self.entries.walk(position) {
            let owner = &*node.owner;
            if !owners.contains(&owner) {
                owners.push(owner);
                if owners.len() == wanted {
                    break;
                }
            }
        }

        owners
    }

    /// True if no members are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a member is registered
    pub fn contains(&self, key: &str) -> bool {
        self.membership.contains_key(key)
    }

    /// Number of registered members
    pub fn member_count(&self) -> usize {
        self.membership.len()
    }

    /// Number of virtual nodes on the ring
    ///
    /// Replicas of one member that hash to the same position are stored once,
    /// so this can be lower than `member_count() * replicas()`.
    pub fn vnode_count(&self) -> usize {
        self.entries.len()
    }

    /// Virtual nodes per member
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Storage strategy backing this ring
    pub fn strategy(&self) -> StorageStrategy {
        self.entries.strategy()
    }

    /// All registered members, sorted
    pub fn members(&self) -> Vec<&str> {
        let mut members: Vec<&str> = self.membership.keys().map(|k| &**k).collect();
        members.sort_unstable();
        members
    }

    /// The virtual nodes owned by a member, in replica order
    pub fn vnodes_of(&self, key: &str) -> Option<&[VirtualNode]> {
        self.membership.get(key).map(Vec::as_slice)
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("replicas", &self.replicas)
            .field("strategy", &self.strategy())
            .field("members", &self.member_count())
            .field("vnodes", &self.vnode_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_fn;

    /// Hash that treats every input as its own decimal value
    fn decimal() -> HashFn {
        hash_fn(|data| {
            std::str::from_utf8(data)
                .expect("utf8 key")
                .parse::<u32>()
                .expect("decimal key")
        })
    }

    fn rings(replicas: usize, hash: HashFn) -> Vec<Ring> {
        vec![
            Ring::with_strategy(replicas, hash.clone(), StorageStrategy::Tree).unwrap(),
            Ring::with_strategy(replicas, hash, StorageStrategy::Sorted).unwrap(),
        ]
    }

    #[test]
    fn test_zero_replicas_rejected() {
        assert_eq!(Ring::with_crc32(0).unwrap_err(), RingError::ZeroReplicas);
    }

    #[test]
    fn test_empty_ring_returns_none() {
        for ring in rings(1, default_hash()) {
            assert!(ring.is_empty());
            assert_eq!(ring.get("foo"), None);
            assert!(ring.get_n("foo", 3).is_empty());
        }
    }

    #[test]
    fn test_decimal_scenario() {
        for mut ring in rings(3, decimal()) {
            // Replicas land on 2, 4, 6, 12, 14, 16, 22, 24, 26
            ring.add(["6", "4", "2"]);
            assert_eq!(ring.vnode_count(), 9);

            assert_eq!(ring.get("2"), Some("2"));
            assert_eq!(ring.get("11"), Some("2"));
            assert_eq!(ring.get("23"), Some("4"));
            assert_eq!(ring.get("27"), Some("2"));

            // Adds 8, 18, 28
            ring.add(["8"]);
            assert_eq!(ring.get("27"), Some("8"));

            ring.remove("8");
            assert_eq!(ring.get("27"), Some("2"));
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        for mut ring in rings(3, decimal()) {
            ring.add(["6", "4"]);
            ring.add(["6", "6"]);

            assert_eq!(ring.member_count(), 2);
            assert_eq!(ring.vnode_count(), 6);
        }
    }

    #[test]
    fn test_remove_absent_is_noop() {
        for mut ring in rings(3, decimal()) {
            ring.add(["6"]);
            ring.remove("7");
            assert_eq!(ring.vnode_count(), 3);
            assert_eq!(ring.get("7"), Some("6"));
        }
    }

    #[test]
    fn test_remove_last_member_empties_ring() {
        for mut ring in rings(3, decimal()) {
            ring.add(["6"]);
            ring.remove("6");
            assert!(ring.is_empty());
            assert_eq!(ring.member_count(), 0);
            assert_eq!(ring.get("6"), None);
        }
    }

    #[test]
    fn test_vnodes_of_matches_replica_positions() {
        let mut ring = Ring::new(3, decimal()).unwrap();
        ring.add(["4"]);

        let positions: Vec<u32> = ring
            .vnodes_of("4")
            .unwrap()
            .iter()
            .map(|n| n.position)
            .collect();
        assert_eq!(positions, vec![4, 14, 24]);
        assert!(ring.vnodes_of("5").is_none());
    }

    #[test]
    fn test_self_colliding_replicas_stored_once() {
        // Every replica of every member lands on the same position
        for mut ring in rings(4, hash_fn(|_| 7)) {
            ring.add(["solo"]);

            assert_eq!(ring.vnode_count(), 1);
            assert_eq!(ring.vnodes_of("solo").unwrap().len(), 4);
            assert_eq!(ring.get("anything"), Some("solo"));

            ring.remove("solo");
            assert!(ring.is_empty());
            assert_eq!(ring.vnode_count(), 0);
        }
    }

    #[test]
    fn test_get_n_distinct_owners_in_ring_order() {
        for mut ring in rings(3, decimal()) {
            ring.add(["6", "4", "2"]);

            assert_eq!(ring.get_n("11", 1), vec!["2"]);
            assert_eq!(ring.get_n("11", 2), vec!["2", "4"]);
            assert_eq!(ring.get_n("11", 3), vec!["2", "4", "6"]);
            // Wraps from 26 back to 2
            assert_eq!(ring.get_n("25", 3), vec!["6", "2", "4"]);
            assert_eq!(ring.get_n("25", 10).len(), 3);
        }
    }

    #[test]
    fn test_members_sorted_and_contains() {
        let mut ring = Ring::with_crc32(8).unwrap();
        ring.add(["cache-c", "cache-a", "cache-b"]);

        assert_eq!(ring.members(), vec!["cache-a", "cache-b", "cache-c"]);
        assert!(ring.contains("cache-b"));
        assert!(!ring.contains("cache-d"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut ring = Ring::with_crc32(8).unwrap();
        ring.add(["a", "b"]);

        let mut copy = ring.clone();
        copy.remove("a");

        assert_eq!(ring.member_count(), 2);
        assert_eq!(copy.member_count(), 1);
        assert_eq!(copy.strategy(), ring.strategy());
    }
}
