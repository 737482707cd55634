//! Named hash algorithms selectable from configuration

use super::{crc32, siphash32, xxhash32, HashFn};
use crate::error::RingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in ring hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// IEEE CRC32 checksum
    #[default]
    Crc32,
    /// XXH32, seed 0
    Xxhash32,
    /// SipHash-1-3 folded to 32 bits
    Siphash32,
}

impl HashAlgorithm {
    /// Resolve the algorithm to a callable hash function
    pub fn hash_fn(self) -> HashFn {
        match self {
            HashAlgorithm::Crc32 => Arc::new(crc32),
            HashAlgorithm::Xxhash32 => Arc::new(xxhash32),
            HashAlgorithm::Siphash32 => Arc::new(siphash32),
        }
    }

    /// Hash a byte sequence directly
    pub fn hash(self, data: &[u8]) -> u32 {
        match self {
            HashAlgorithm::Crc32 => crc32(data),
            HashAlgorithm::Xxhash32 => xxhash32(data),
            HashAlgorithm::Siphash32 => siphash32(data),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Crc32 => write!(f, "crc32"),
            HashAlgorithm::Xxhash32 => write!(f, "xxhash32"),
            HashAlgorithm::Siphash32 => write!(f, "siphash32"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crc32" => Ok(HashAlgorithm::Crc32),
            "xxhash32" => Ok(HashAlgorithm::Xxhash32),
            "siphash32" => Ok(HashAlgorithm::Siphash32),
            other => Err(RingError::InvalidConfig(format!(
                "unknown hash algorithm '{}'",
                other
            ))),
        }
    }
}
