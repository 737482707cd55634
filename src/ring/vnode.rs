//! Virtual node structure

use crate::hash::HashFn;
use std::sync::Arc;

/// One ring position contributed by a replica of a member
///
/// Ordering is `(position, owner)`: positions compare numerically and owners
/// break ties lexicographically, so the ring has a total order even when two
/// members collide on a position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Ring coordinate
    pub position: u32,

    /// The member this virtual node belongs to
    pub owner: Arc<str>,
}

impl VirtualNode {
    /// Create a new virtual node
    pub fn new(position: u32, owner: Arc<str>) -> Self {
        VirtualNode { position, owner }
    }

    /// Smallest possible node at `position`, used as a lookup bound
    pub(crate) fn lower_bound(position: u32) -> Self {
        VirtualNode {
            position,
            owner: Arc::from(""),
        }
    }
}

/// Ring position of replica `replica` of `key`: `hash(decimal(replica) ++ key)`
pub fn replica_position(hash: &HashFn, replica: usize, key: &str) -> u32 {
    let mut input = replica.to_string().into_bytes();
    input.extend_from_slice(key.as_bytes());
    hash(&input)
}

/// Build the virtual nodes for every replica of `key`
pub(crate) fn replicas_of(hash: &HashFn, replicas: usize, key: &Arc<str>) -> Vec<VirtualNode> {
    (0..replicas)
        .map(|i| VirtualNode::new(replica_position(hash, i, key), Arc::clone(key)))
        .collect()
}
