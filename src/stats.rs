//! Ring introspection
//!
//! Snapshot statistics, load distribution over a key sample, and the set of
//! keys that change owner between two ring states.

use crate::ring::{Ring, StorageStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics about a ring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingStats {
    pub strategy: StorageStrategy,
    pub replicas: usize,
    pub members: usize,
    pub vnodes: usize,
}

impl RingStats {
    /// Take a snapshot of a ring
    pub fn of(ring: &Ring) -> Self {
        RingStats {
            strategy: ring.strategy(),
            replicas: ring.replicas(),
            members: ring.member_count(),
            vnodes: ring.vnode_count(),
        }
    }
}

/// How a sample of keys spreads across members
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    /// Keys routed to each member; members with no keys count as zero
    pub counts: BTreeMap<String, usize>,
    /// Number of sampled keys
    pub total: usize,
    pub mean: f64,
    /// Population standard deviation of the per-member counts
    pub std_dev: f64,
    pub min: usize,
    pub max: usize,
}

impl Distribution {
    /// Route every key through the ring and tally the owners
    pub fn measure<I, S>(ring: &Ring, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<String, usize> = ring
            .members()
            .into_iter()
            .map(|m| (m.to_string(), 0))
            .collect();

        let mut total = 0;
        for key in keys {
            total += 1;
            if let Some(owner) = ring.get(key.as_ref()) {
                if let Some(count) = counts.get_mut(owner) {
                    *count += 1;
                }
            }
        }

        let n = counts.len();
        if n == 0 {
            return Distribution {
                counts,
                total,
                mean: 0.0,
                std_dev: 0.0,
                min: 0,
                max: 0,
            };
        }

        let mean = counts.values().sum::<usize>() as f64 / n as f64;
        let variance = counts
            .values()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n as f64;

        Distribution {
            min: counts.values().copied().min().unwrap_or(0),
            max: counts.values().copied().max().unwrap_or(0),
            counts,
            total,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Standard deviation relative to the mean (0 when there is no load)
    pub fn relative_std_dev(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.std_dev / self.mean
        }
    }
}

/// A key whose owner changed between two ring states
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Migration {
    /// The key that must move
    pub key: String,
    /// Owner in the old ring (`None` if the old ring was empty)
    pub from: Option<String>,
    /// Owner in the new ring (`None` if the new ring is empty)
    pub to: Option<String>,
}

/// Compute which keys change owner between two rings
pub fn diff<I, S>(old: &Ring, new: &Ring, keys: I) -> Vec<Migration>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .filter_map(|key| {
            let key = key.as_ref();
            let from = old.get(key);
            let to = new.get(key);
            (from != to).then(|| Migration {
                key: key.to_string(),
                from: from.map(str::to_string),
                to: to.map(str::to_string),
            })
        })
        .collect()
}
