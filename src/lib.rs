//! FerrumRing - A consistent hashing ring
//!
//! Maps an unbounded set of request keys onto a dynamic, named set of members
//! (shards, cache backends, servers) so that adding or removing a member only
//! remaps a small fraction of keys.
//!
//! FerrumRing is designed with strong cohesion and loose coupling principles:
//! - `hash` knows nothing about rings, only bytes -> `u32`
//! - `ring` owns membership and routing, over a pluggable entry store
//! - `config` and `stats` sit on top of the ring's public API
//!
//! ```
//! use ferrumring::Ring;
//!
//! let mut ring = Ring::with_crc32(50).unwrap();
//! ring.add(["cache-a", "cache-b", "cache-c"]);
//!
//! let owner = ring.get("user:1000").unwrap();
//! assert!(ring.contains(owner));
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod ring;
pub mod stats;

/// Re-export commonly used types
pub use config::RingConfig;
pub use error::RingError;
pub use hash::{HashAlgorithm, HashFn};
pub use ring::{Ring, StorageStrategy, VirtualNode};
pub use stats::{Distribution, Migration, RingStats};
