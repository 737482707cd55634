//! Shared helpers for integration tests

#![allow(dead_code)]

use ferrumring::hash::{hash_fn, HashFn};
use ferrumring::{Ring, StorageStrategy};

/// Install a subscriber honouring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Hash that treats every input as its own decimal value
pub fn decimal_hash() -> HashFn {
    hash_fn(|data| {
        std::str::from_utf8(data)
            .expect("utf8 key")
            .parse::<u32>()
            .expect("decimal key")
    })
}

/// One empty ring per storage strategy
pub fn rings(replicas: usize, hash: HashFn) -> Vec<Ring> {
    [StorageStrategy::Tree, StorageStrategy::Sorted]
        .into_iter()
        .map(|strategy| Ring::with_strategy(replicas, hash.clone(), strategy).unwrap())
        .collect()
}

/// `prefix-0`, `prefix-1`, ...
pub fn keys(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}-{}", prefix, i)).collect()
}
