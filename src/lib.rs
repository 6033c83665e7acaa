//! # P2PSearch - Search-strategy simulator for unstructured P2P overlays
//!
//! This library simulates resource-discovery searches over a fixed
//! unstructured peer-to-peer overlay: given a topology where each peer
//! holds a set of resources, it evaluates how different search
//! protocols locate a target resource under a hop-count budget (TTL).
//!
//! ## Overview
//!
//! A caller builds and validates a [`topology::Topology`] from static
//! configuration, then repeatedly invokes [`search::search`] with a
//! start peer, a resource id, a TTL and one of four strategies. Each
//! call returns a [`search::SearchResult`]; the informed strategies
//! additionally leave resource-to-owner entries in peer caches that
//! persist into subsequent calls on the same topology, making repeated
//! queries progressively cheaper.
//!
//! ## Key Features
//!
//! - **Four strategies**: flooding, random walk, and their
//!   cache-informed variants
//! - **Construction invariants**: declared node count, non-empty
//!   resource sets, bounded degrees, connected graph
//! - **Cost accounting**: per-forwarding message counts, global visited
//!   sets, and full explored-path bookkeeping
//! - **Reproducible**: walk randomness comes from an injected, seedable
//!   generator
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: configuration structures, YAML/JSON parsing, topology construction
//! - `topology`: the peer arena, undirected link structure, and validation
//! - `search`: the four search strategies and their shared cache propagation
//! - `stats`: aggregation used by the benchmark harness
//!
//! ## Example Usage
//!
//! ```rust
//! use p2psearch::search::{search, Algorithm};
//! use p2psearch::topology::Topology;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut topology = Topology::new();
//! topology.add_node("n1", ["r1"])?;
//! topology.add_node("n2", ["r2"])?;
//! topology.add_edge("n1", "n2")?;
//! topology.validate(2, 1, 1)?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = search(&mut topology, "n1", "r2", 2, Algorithm::Flooding, &mut rng)?;
//! assert!(result.found);
//! assert_eq!(result.found_at, vec!["n2"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Construction, validation and configuration errors are typed with
//! `thiserror` and fatal: no partially built topology is ever usable.
//! A resource missing from the whole network is not an error; the
//! search simply reports `found = false`. Binaries report failures
//! through `color_eyre`.

pub mod config;
pub mod search;
pub mod stats;
pub mod topology;
