//! Hash function adapters
//!
//! A ring hash is any function from a byte sequence to a `u32` ring position.
//! This module is independent from the ring itself (loose coupling): the ring
//! only ever sees a [`HashFn`].

mod algorithm;
mod functions;

pub use algorithm::HashAlgorithm;
pub use functions::{crc32, siphash32, xxhash32};

use std::sync::Arc;

/// Shared, thread-safe hash function injected into a ring
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Wrap any closure as a [`HashFn`]
pub fn hash_fn<F>(f: F) -> HashFn
where
    F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The default ring hash (IEEE CRC32)
pub fn default_hash() -> HashFn {
    Arc::new(crc32)
}
