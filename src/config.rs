//! Ring configuration
//!
//! A ring's configuration is immutable once built: replica count, hash
//! algorithm and storage strategy are fixed for the ring's lifetime.

use crate::error::RingError;
use crate::hash::HashAlgorithm;
use crate::ring::{Ring, StorageStrategy};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default number of virtual nodes per member
pub const DEFAULT_REPLICAS: usize = 50;

fn default_replicas() -> usize {
    DEFAULT_REPLICAS
}

/// Ring configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingConfig {
    /// Virtual nodes per member
    #[serde(default = "default_replicas")]
    pub replicas: usize,

    /// Hash used to place members and queries
    #[serde(default)]
    pub hash: HashAlgorithm,

    /// Backing structure for ring entries
    #[serde(default)]
    pub strategy: StorageStrategy,
}

impl Default for RingConfig {
    fn default() -> Self {
        RingConfig {
            replicas: DEFAULT_REPLICAS,
            hash: HashAlgorithm::default(),
            strategy: StorageStrategy::default(),
        }
    }
}

impl RingConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: RingConfig =
            serde_json::from_str(json).context("Failed to parse ring configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can build a ring
    pub fn validate(&self) -> Result<(), RingError> {
        if self.replicas == 0 {
            return Err(RingError::ZeroReplicas);
        }
        Ok(())
    }

    /// Build an empty ring from this configuration
    pub fn build(&self) -> Result<Ring, RingError> {
        self.validate()?;
        let ring = Ring::with_strategy(self.replicas, self.hash.hash_fn(), self.strategy)?;
        info!(
            replicas = self.replicas,
            hash = %self.hash,
            strategy = %self.strategy,
            "built ring from configuration"
        );
        Ok(ring)
    }
}
