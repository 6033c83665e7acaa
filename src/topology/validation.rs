//! Topology validation checks.
//!
//! A topology must pass all checks before any search runs against it:
//! declared node count, non-empty resource sets, degrees within the
//! configured range, and a connected link graph. The first failing
//! check aborts validation.

use std::collections::{HashSet, VecDeque};

use log::info;
use thiserror::Error;

use super::types::Topology;

/// Errors raised by [`Topology::validate`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The network holds a different number of nodes than declared
    #[error("network has {actual} nodes but the configuration declares {expected}")]
    NodeCountMismatch { expected: usize, actual: usize },
    /// A node holds no resources at all
    #[error("node {0} holds no resources")]
    EmptyResourceSet(String),
    /// A node's neighbor count falls outside the configured range
    #[error("node {id} has {degree} neighbors, outside the allowed range [{min}, {max}]")]
    DegreeOutOfRange {
        id: String,
        degree: usize,
        min: usize,
        max: usize,
    },
    /// Not every node is reachable from every other node
    #[error("network is partitioned: only {reachable} of {total} nodes are reachable")]
    DisconnectedGraph { reachable: usize, total: usize },
}

impl Topology {
    /// Run all construction invariant checks, in order.
    ///
    /// # Arguments
    /// * `expected_count` - Node count declared by the configuration
    /// * `min_degree` - Minimum allowed neighbors per node (inclusive)
    /// * `max_degree` - Maximum allowed neighbors per node (inclusive)
    pub fn validate(
        &self,
        expected_count: usize,
        min_degree: usize,
        max_degree: usize,
    ) -> Result<(), ValidationError> {
        self.check_node_count(expected_count)?;
        self.check_resources()?;
        self.check_degrees(min_degree, max_degree)?;
        self.check_connectivity()?;
        info!(
            "Topology validated: {} nodes, degrees within [{}, {}], graph connected",
            self.node_count(),
            min_degree,
            max_degree
        );
        Ok(())
    }

    fn check_node_count(&self, expected: usize) -> Result<(), ValidationError> {
        let actual = self.node_count();
        if actual != expected {
            return Err(ValidationError::NodeCountMismatch { expected, actual });
        }
        Ok(())
    }

    fn check_resources(&self) -> Result<(), ValidationError> {
        for peer in self.peers() {
            if peer.resources.is_empty() {
                return Err(ValidationError::EmptyResourceSet(peer.id.clone()));
            }
        }
        Ok(())
    }

    fn check_degrees(&self, min: usize, max: usize) -> Result<(), ValidationError> {
        for peer in self.peers() {
            let degree = peer.degree();
            if degree < min || degree > max {
                return Err(ValidationError::DegreeOutOfRange {
                    id: peer.id.clone(),
                    degree,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Breadth-first reachability from an arbitrary peer. An empty
    /// network counts as disconnected.
    fn check_connectivity(&self) -> Result<(), ValidationError> {
        let total = self.node_count();
        let Some(start) = self.peer_ids().next() else {
            return Err(ValidationError::DisconnectedGraph {
                reachable: 0,
                total: 0,
            });
        };

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(peer) = self.peer(current) {
                for neighbor in &peer.neighbors {
                    if !visited.contains(neighbor.as_str()) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        if visited.len() != total {
            return Err(ValidationError::DisconnectedGraph {
                reachable: visited.len(),
                total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ring of four nodes, each holding one resource
    fn ring_topology() -> Topology {
        let mut topology = Topology::new();
        for i in 1..=4 {
            topology
                .add_node(format!("n{i}"), [format!("r{i}")])
                .unwrap();
        }
        topology.add_edge("n1", "n2").unwrap();
        topology.add_edge("n2", "n3").unwrap();
        topology.add_edge("n3", "n4").unwrap();
        topology.add_edge("n4", "n1").unwrap();
        topology
    }

    #[test]
    fn test_valid_ring_passes() {
        let topology = ring_topology();
        assert!(topology.validate(4, 2, 2).is_ok());
    }

    #[test]
    fn test_node_count_mismatch() {
        let topology = ring_topology();
        let err = topology.validate(5, 2, 2).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NodeCountMismatch {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_empty_resource_set_names_the_node() {
        let mut topology = Topology::new();
        topology.add_node("n1", ["r1"]).unwrap();
        topology.add_node("n2", Vec::<String>::new()).unwrap();
        topology.add_edge("n1", "n2").unwrap();
        let err = topology.validate(2, 1, 1).unwrap_err();
        assert_eq!(err, ValidationError::EmptyResourceSet("n2".to_string()));
    }

    #[test]
    fn test_degree_out_of_range_for_star_leaf() {
        // Star: hub with degree 4, leaves with degree 1
        let mut topology = Topology::new();
        topology.add_node("hub", ["r0"]).unwrap();
        for i in 1..=4 {
            topology
                .add_node(format!("leaf{i}"), [format!("r{i}")])
                .unwrap();
            topology.add_edge("hub", &format!("leaf{i}")).unwrap();
        }
        let err = topology.validate(5, 2, 4).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DegreeOutOfRange {
                id: "leaf1".to_string(),
                degree: 1,
                min: 2,
                max: 4,
            }
        );
    }

    #[test]
    fn test_disconnected_graph_detected() {
        let mut topology = ring_topology();
        topology.add_node("n5", ["r5"]).unwrap();
        topology.add_node("n6", ["r6"]).unwrap();
        topology.add_edge("n5", "n6").unwrap();
        let err = topology.validate(6, 1, 2).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DisconnectedGraph {
                reachable: 4,
                total: 6
            }
        );
    }

    #[test]
    fn test_empty_network_is_disconnected() {
        let topology = Topology::new();
        let err = topology.validate(0, 0, 0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DisconnectedGraph {
                reachable: 0,
                total: 0
            }
        );
    }
}
