//! Ring construction errors
//!
//! Ring operations never fail once a ring exists: re-adding a member, removing
//! an absent member and querying an empty ring all have defined outcomes.
//! Only building a ring from an invalid configuration is an error.

use std::fmt;

/// Errors raised while constructing a ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// A ring needs at least one virtual node per member
    ZeroReplicas,

    /// Configuration could not be interpreted
    InvalidConfig(String),
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::ZeroReplicas => write!(f, "Replica count must be at least 1"),
            RingError::InvalidConfig(msg) => write!(f, "Invalid ring configuration: {}", msg),
        }
    }
}

impl std::error::Error for RingError {}
