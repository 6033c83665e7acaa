//! Flooding search variants.
//!
//! Flooding explores every path from the start peer breadth-first, up
//! to the hop budget. Cycle prevention is per path: a peer already on
//! the current path is never re-enqueued from that path, but the same
//! peer may be reached again along a different path. Exploration never
//! stops early on a match; the result characterizes full reachability
//! within the TTL ball.

use std::collections::VecDeque;

use log::debug;

use crate::topology::Topology;

use super::cache::{cached_owner_in_network, propagate_owner_paths, write_owner_along_path};
use super::types::SearchResult;
use super::{Algorithm, SearchError};

/// Queue entry: peer to expand, remaining hop budget, and the full path
/// taken from the start peer (including the peer itself).
type QueueItem = (String, u64, Vec<String>);

/// Plain flooding search.
///
/// One message is counted per query forwarding, i.e. per enqueued
/// neighbor.
pub fn flooding(
    topology: &Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
) -> Result<SearchResult, SearchError> {
    if !topology.contains(start_id) {
        return Err(SearchError::UnknownStartNode(start_id.to_string()));
    }

    let mut result = SearchResult::new(Algorithm::Flooding, start_id, resource_id);
    let mut queue: VecDeque<QueueItem> = VecDeque::new();
    queue.push_back((start_id.to_string(), ttl, vec![start_id.to_string()]));

    while let Some((current, hops, path)) = queue.pop_front() {
        result.paths.push(path.clone());
        result.visited.insert(current.clone());

        let Some(peer) = topology.peer(&current) else {
            continue;
        };
        if peer.has_resource(resource_id) {
            result.record_owner(&current);
        }
        if hops == 0 {
            continue;
        }
        for neighbor in &peer.neighbors {
            if path.contains(neighbor) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(neighbor.clone());
            queue.push_back((neighbor.clone(), hops - 1, next_path));
            result.messages += 1;
        }
    }

    debug!(
        "flooding from {} for {}: {} owners, {} messages",
        start_id,
        resource_id,
        result.found_at.len(),
        result.messages
    );
    Ok(result.finish())
}

/// Cache-augmented flooding search.
///
/// A cache hit at the start peer resolves the query directly in a
/// single message. During exploration each dequeued peer consults its
/// cache; a hit records the cached owner and immediately seeds the
/// entry into every peer on the path that reached the querying peer, as
/// does discovering the resource on the peer itself. Exploration still
/// runs to exhaustion, and a final pass re-seeds every discovered owner
/// along every recorded path containing it.
pub fn informed_flooding(
    topology: &mut Topology,
    start_id: &str,
    resource_id: &str,
    ttl: u64,
) -> Result<SearchResult, SearchError> {
    if !topology.contains(start_id) {
        return Err(SearchError::UnknownStartNode(start_id.to_string()));
    }

    let mut result = SearchResult::new(Algorithm::InformedFlooding, start_id, resource_id);

    // The start peer already knows an owner: go there directly.
    if let Some(owner) = cached_owner_in_network(topology, start_id, resource_id) {
        debug!("cache hit at start peer {start_id}: {resource_id} owned by {owner}");
        result.record_owner(&owner);
        result.visited.insert(start_id.to_string());
        result.visited.insert(owner.clone());
        result.messages = 1;
        result.paths.push(vec![start_id.to_string(), owner]);
        return Ok(result.finish());
    }

    let mut queue: VecDeque<QueueItem> = VecDeque::new();
    queue.push_back((start_id.to_string(), ttl, vec![start_id.to_string()]));

    while let Some((current, hops, path)) = queue.pop_front() {
        result.paths.push(path.clone());
        result.visited.insert(current.clone());

        // Cache consultation before the peer's own resources.
        if let Some(owner) = cached_owner_in_network(topology, &current, resource_id) {
            result.record_owner(&owner);
            result.visited.insert(owner.clone());
            result.messages += 1;
            write_owner_along_path(topology, &path, resource_id, &owner);
        }

        let (owns, neighbors) = {
            let Some(peer) = topology.peer(&current) else {
                continue;
            };
            (peer.has_resource(resource_id), peer.neighbors.clone())
        };
        if owns {
            result.record_owner(&current);
            write_owner_along_path(topology, &path, resource_id, &current);
        }
        if hops == 0 {
            continue;
        }
        for neighbor in neighbors {
            if path.contains(&neighbor) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(neighbor.clone());
            queue.push_back((neighbor, hops - 1, next_path));
            result.messages += 1;
        }
    }

    propagate_owner_paths(topology, resource_id, &result.found_at, &result.paths);
    Ok(result.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ring n1-n2-n3-n4-n1; resource r1 placed only at n3
    fn ring_topology() -> Topology {
        let mut topology = Topology::new();
        topology.add_node("n1", ["a"]).unwrap();
        topology.add_node("n2", ["b"]).unwrap();
        topology.add_node("n3", ["r1"]).unwrap();
        topology.add_node("n4", ["c"]).unwrap();
        topology.add_edge("n1", "n2").unwrap();
        topology.add_edge("n2", "n3").unwrap();
        topology.add_edge("n3", "n4").unwrap();
        topology.add_edge("n4", "n1").unwrap();
        topology
    }

    #[test]
    fn test_flooding_finds_the_owner_in_the_ring() {
        let topology = ring_topology();
        let result = flooding(&topology, "n1", "r1", 4).unwrap();
        assert!(result.found);
        assert_eq!(result.found_at, vec!["n3"]);
    }

    #[test]
    fn test_flooding_with_ttl_over_diameter_visits_everything() {
        let topology = ring_topology();
        let result = flooding(&topology, "n1", "r1", 4).unwrap();
        assert_eq!(result.num_visited(), 4);
    }

    #[test]
    fn test_flooding_message_count_is_deterministic() {
        let topology = ring_topology();
        let first = flooding(&topology, "n1", "r1", 4).unwrap();
        let second = flooding(&topology, "n1", "r1", 4).unwrap();
        assert_eq!(first.messages, second.messages);
        // n1 forwards to both neighbors, each arc forwards on to n3,
        // and both n3 copies forward to the remaining ring peer.
        assert_eq!(first.messages, 6);
    }

    #[test]
    fn test_flooding_does_not_short_circuit() {
        // r1 at n2 as well: exhaustive exploration must report both.
        let mut topology = ring_topology();
        if let Some(peer) = topology.peer_mut("n2") {
            peer.resources.insert("r1".to_string());
        }
        let result = flooding(&topology, "n1", "r1", 4).unwrap();
        assert_eq!(result.found_at, vec!["n2", "n3"]);
    }

    #[test]
    fn test_flooding_with_zero_ttl_checks_only_the_start() {
        let topology = ring_topology();
        let result = flooding(&topology, "n3", "r1", 0).unwrap();
        assert!(result.found);
        assert_eq!(result.messages, 0);
        assert_eq!(result.num_visited(), 1);
        assert_eq!(result.paths, vec![vec!["n3".to_string()]]);
    }

    #[test]
    fn test_flooding_unknown_start_rejected() {
        let topology = ring_topology();
        let err = flooding(&topology, "n9", "r1", 4).unwrap_err();
        assert_eq!(err, SearchError::UnknownStartNode("n9".to_string()));
    }

    #[test]
    fn test_informed_flooding_seeds_caches_on_discovery() {
        let mut topology = ring_topology();
        let result = informed_flooding(&mut topology, "n1", "r1", 4).unwrap();
        assert!(result.found);
        // Every peer on a recorded path through n3 now knows the owner,
        // which includes the start peer.
        assert_eq!(topology.peer("n1").unwrap().cached_owner("r1"), Some("n3"));
        assert_eq!(topology.peer("n2").unwrap().cached_owner("r1"), Some("n3"));
        assert_eq!(topology.peer("n4").unwrap().cached_owner("r1"), Some("n3"));
    }

    #[test]
    fn test_informed_flooding_repeat_query_costs_one_message() {
        let mut topology = ring_topology();
        let first = informed_flooding(&mut topology, "n1", "r1", 4).unwrap();
        let second = informed_flooding(&mut topology, "n1", "r1", 4).unwrap();
        assert!(second.found);
        assert_eq!(second.messages, 1);
        assert!(second.messages <= first.messages);
        assert_eq!(second.found_at, vec!["n3"]);
        assert_eq!(
            second.paths,
            vec![vec!["n1".to_string(), "n3".to_string()]]
        );
    }

    #[test]
    fn test_informed_flooding_ignores_stale_start_cache() {
        let mut topology = ring_topology();
        if let Some(peer) = topology.peer_mut("n1") {
            peer.cache.insert("r1".to_string(), "gone".to_string());
        }
        let result = informed_flooding(&mut topology, "n1", "r1", 4).unwrap();
        // The stale entry is skipped and the real owner is discovered,
        // overwriting the cache along the way.
        assert_eq!(result.found_at, vec!["n3"]);
        assert_eq!(topology.peer("n1").unwrap().cached_owner("r1"), Some("n3"));
    }

    #[test]
    fn test_informed_flooding_mid_path_cache_hit_records_owner() {
        let mut topology = ring_topology();
        // n2 knows the owner but the start peer does not.
        if let Some(peer) = topology.peer_mut("n2") {
            peer.cache.insert("r9".to_string(), "n4".to_string());
        }
        let result = informed_flooding(&mut topology, "n1", "r9", 1).unwrap();
        assert!(result.found);
        assert_eq!(result.found_at, vec!["n4"]);
        assert!(result.visited.contains("n4"));
        // The hit propagated back along the path n1 -> n2.
        assert_eq!(topology.peer("n1").unwrap().cached_owner("r9"), Some("n4"));
    }
}
