//! Random-walk search variants.
//!
//! A query spawns one independent walk per neighbor of the start peer.
//! Each walk keeps its own visited set so it never doubles back on
//! itself, but walks do not coordinate and may overlap. Every move to a
//! neighbor costs one message and one hop of the shared TTL budget.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::topology::Topology;

use super::cache::{cached_owner_in_network, propagate_owner_paths, write_owner_along_path};
use super::types::SearchResult;
use super::{Algorithm, SearchError};

/// Plain random-walk search.
pub fn random_walk<R: Rng>(
    topology: &Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    let Some(start) = topology.peer(start_id) else {
        return Err(SearchError::UnknownStartNode(start_id.to_string()));
    };

    let mut result = SearchResult::new(Algorithm::RandomWalk, start_id, resource_id);
    let walk_count = start.degree();
    debug!("spawning {walk_count} walks from {start_id} for {resource_id}");

    for _ in 0..walk_count {
        run_walk(topology, start_id, resource_id, ttl, rng, &mut result);
    }
    Ok(result.finish())
}

/// One walk of up to `ttl` steps, merging its outcome into `result`.
fn run_walk<R: Rng>(
    topology: &Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
    rng: &mut R,
    result: &mut SearchResult,
) {
    let mut current = start_id.to_string();
    let mut path = vec![current.clone()];
    let mut walk_visited: HashSet<String> = HashSet::new();
    walk_visited.insert(current.clone());
    let mut hops = ttl;

    loop {
        let Some(peer) = topology.peer(&current) else {
            break;
        };
        if peer.has_resource(resource_id) {
            result.record_owner(&current);
        }
        if hops == 0 {
            break;
        }
        let candidates: Vec<&String> = peer
            .neighbors
            .iter()
            .filter(|n| !walk_visited.contains(*n))
            .collect();
        if candidates.is_empty() {
            break;
        }
        let next = candidates[rng.gen_range(0..candidates.len())].clone();
        result.messages += 1;
        hops -= 1;
        walk_visited.insert(next.clone());
        path.push(next.clone());
        current = next;
    }

    result.visited.extend(walk_visited);
    result.paths.push(path);
}

/// Cache-augmented random-walk search.
///
/// At every step the walk consults the current peer's cache before the
/// ownership check. A hit jumps straight to the cached owner: the owner
/// joins the path, the entry is seeded into every peer walked so far,
/// and the walk ends. After all walks finish, every discovered owner is
/// re-seeded along every recorded path containing it.
pub fn informed_random_walk<R: Rng>(
    topology: &mut Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    let Some(start) = topology.peer(start_id) else {
        return Err(SearchError::UnknownStartNode(start_id.to_string()));
    };

    let mut result = SearchResult::new(Algorithm::InformedRandomWalk, start_id, resource_id);
    let walk_count = start.degree();
    debug!("spawning {walk_count} informed walks from {start_id} for {resource_id}");

    for _ in 0..walk_count {
        run_informed_walk(topology, start_id, resource_id, ttl, rng, &mut result);
    }

    propagate_owner_paths(topology, resource_id, &result.found_at, &result.paths);
    Ok(result.finish())
}

fn run_informed_walk<R: Rng>(
    topology: &mut Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
    rng: &mut R,
    result: &mut SearchResult,
) {
    let mut current = start_id.to_string();
    let mut path = vec![current.clone()];
    let mut walk_visited: HashSet<String> = HashSet::new();
    walk_visited.insert(current.clone());
    let mut hops = ttl;

    loop {
        // Cache consultation before the peer's own resources.
        if let Some(owner) = cached_owner_in_network(topology, &current, resource_id) {
            path.push(owner.clone());
            walk_visited.insert(owner.clone());
            result.record_owner(&owner);
            result.messages += 1;
            write_owner_along_path(topology, &path, resource_id, &owner);
            break;
        }

        let (owns, neighbors) = {
            let Some(peer) = topology.peer(&current) else {
                break;
            };
            (peer.has_resource(resource_id), peer.neighbors.clone())
        };
        if owns {
            result.record_owner(&current);
        }
        if hops == 0 {
            break;
        }
        let candidates: Vec<&String> = neighbors
            .iter()
            .filter(|n| !walk_visited.contains(*n))
            .collect();
        if candidates.is_empty() {
            break;
        }
        let next = candidates[rng.gen_range(0..candidates.len())].clone();
        result.messages += 1;
        hops -= 1;
        walk_visited.insert(next.clone());
        path.push(next.clone());
        current = next;
    }

    result.visited.extend(walk_visited);
    result.paths.push(path);
}
