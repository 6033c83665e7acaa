//! Search strategies over the peer overlay.
//!
//! Four strategies are supported: flooding, random walk, and their
//! informed variants that consult and update the per-peer
//! resource-to-owner caches. All of them run synchronously to
//! completion and report their outcome as a [`SearchResult`].
//!
//! The informed variants mutate peer caches as a side effect, and those
//! writes persist across calls on the same [`Topology`] instance.
//! Repeated queries for the same resource therefore get cheaper over
//! time.

pub mod flooding;
pub mod random_walk;
pub mod types;

mod cache;

// Re-export the result type for easier access
pub use types::SearchResult;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::topology::Topology;

/// The four supported search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Bounded breadth-first exploration of every path from the start
    Flooding,
    /// Independent uniformly random walks, one per start-peer neighbor
    RandomWalk,
    /// Flooding augmented by the per-peer owner caches
    InformedFlooding,
    /// Random walks augmented by the per-peer owner caches
    InformedRandomWalk,
}

impl Algorithm {
    /// All strategies, in benchmark order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Flooding,
        Algorithm::RandomWalk,
        Algorithm::InformedFlooding,
        Algorithm::InformedRandomWalk,
    ];

    /// The wire/CLI name of this strategy
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Flooding => "flooding",
            Algorithm::RandomWalk => "random_walk",
            Algorithm::InformedFlooding => "informed_flooding",
            Algorithm::InformedRandomWalk => "informed_random_walk",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when an algorithm name does not match any known strategy
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "unsupported search algorithm '{0}', expected one of: \
     flooding, random_walk, informed_flooding, informed_random_walk"
)]
pub struct UnsupportedAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = UnsupportedAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flooding" => Ok(Algorithm::Flooding),
            "random_walk" => Ok(Algorithm::RandomWalk),
            "informed_flooding" => Ok(Algorithm::InformedFlooding),
            "informed_random_walk" => Ok(Algorithm::InformedRandomWalk),
            other => Err(UnsupportedAlgorithmError(other.to_string())),
        }
    }
}

/// Errors raised while running a search
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The queried start peer is not part of the network
    #[error("start node {0} does not exist in the network")]
    UnknownStartNode(String),
}

/// Run one search with the selected strategy.
///
/// The random source is only consumed by the walk strategies; passing a
/// seeded generator makes a whole run reproducible.
pub fn search<R: Rng>(
    topology: &mut Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
    algorithm: Algorithm,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    match algorithm {
        Algorithm::Flooding => flooding::flooding(topology, start_id, resource_id, ttl),
        Algorithm::RandomWalk => random_walk::random_walk(topology, start_id, resource_id, ttl, rng),
        Algorithm::InformedFlooding => {
            flooding::informed_flooding(topology, start_id, resource_id, ttl)
        }
        Algorithm::InformedRandomWalk => {
            random_walk::informed_random_walk(topology, start_id, resource_id, ttl, rng)
        }
    }
}
