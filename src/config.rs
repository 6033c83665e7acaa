//! Simulation configuration loading and topology construction.
//!
//! Configurations are plain YAML or JSON documents describing one
//! overlay: declared node count, the allowed degree range, the
//! resources held by each peer, and the undirected edges. The file
//! format is picked from the extension; anything unrecognized is tried
//! as JSON first and YAML second.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::topology::Topology;

/// Topology parameters and resource placement for one simulation run.
///
/// All fields are required; a missing field fails the load before any
/// topology construction begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_nodes: usize,
    pub min_neighbors: usize,
    pub max_neighbors: usize,
    /// Peer id -> resources held by that peer
    pub resources: BTreeMap<String, Vec<String>>,
    /// Undirected edges as two-element [a, b] pairs
    pub edges: Vec<(String, String)>,
}

impl SimulationConfig {
    /// Invert the resource placement: resource id -> owning peer ids.
    ///
    /// Useful for callers that sample queries for resources known to
    /// exist somewhere in the network.
    pub fn resource_owners(&self) -> BTreeMap<String, Vec<String>> {
        let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (peer_id, resources) in &self.resources {
            for resource in resources {
                owners
                    .entry(resource.clone())
                    .or_default()
                    .push(peer_id.clone());
            }
        }
        owners
    }
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Load a simulation configuration from a YAML or JSON file.
pub fn load_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    info!("Loading simulation configuration from: {:?}", path);
    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml(&content),
        Some("json") => parse_json(&content),
        _ => parse_json(&content).or_else(|_| parse_yaml(&content)),
    }
}

fn parse_yaml(content: &str) -> Result<SimulationConfig, ConfigError> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))
}

fn parse_json(content: &str) -> Result<SimulationConfig, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))
}

/// Build and validate a topology from a loaded configuration.
///
/// Nodes are created in identifier order and edges in file order, so
/// the resulting neighbor lists, and every search run against them, are
/// deterministic. Any construction or validation failure aborts with no
/// usable topology.
pub fn build_topology(config: &SimulationConfig) -> Result<Topology> {
    let mut topology = Topology::new();

    for (peer_id, resources) in &config.resources {
        topology.add_node(peer_id.clone(), resources.iter().cloned())?;
    }
    for (a, b) in &config.edges {
        topology.add_edge(a, b)?;
    }

    topology.validate(
        config.num_nodes,
        config.min_neighbors,
        config.max_neighbors,
    )?;

    info!(
        "Topology constructed: {} nodes, {} edges",
        topology.node_count(),
        config.edges.len()
    );
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const RING_YAML: &str = r#"
num_nodes: 4
min_neighbors: 2
max_neighbors: 2
resources:
  n1: [a]
  n2: [b]
  n3: [r1]
  n4: [c]
edges:
  - [n1, n2]
  - [n2, n3]
  - [n3, n4]
  - [n4, n1]
"#;

    const RING_JSON: &str = r#"{
  "num_nodes": 4,
  "min_neighbors": 2,
  "max_neighbors": 2,
  "resources": {"n1": ["a"], "n2": ["b"], "n3": ["r1"], "n4": ["c"]},
  "edges": [["n1", "n2"], ["n2", "n3"], ["n3", "n4"], ["n4", "n1"]]
}"#;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_config(".yaml", RING_YAML);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.num_nodes, 4);
        assert_eq!(config.resources["n3"], vec!["r1"]);
        assert_eq!(config.edges.len(), 4);
    }

    #[test]
    fn test_yaml_and_json_load_identically() {
        let yaml = write_config(".yaml", RING_YAML);
        let json = write_config(".json", RING_JSON);
        let from_yaml = load_config(yaml.path()).unwrap();
        let from_json = load_config(json.path()).unwrap();
        assert_eq!(from_yaml.resources, from_json.resources);
        assert_eq!(from_yaml.edges, from_json.edges);
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        let file = write_config(".conf", RING_JSON);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.num_nodes, 4);
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let file = write_config(".yaml", "num_nodes: 4\nmin_neighbors: 2\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_build_topology_from_config() {
        let file = write_config(".yaml", RING_YAML);
        let config = load_config(file.path()).unwrap();
        let topology = build_topology(&config).unwrap();
        assert_eq!(topology.node_count(), 4);
        assert_eq!(topology.peer("n1").unwrap().degree(), 2);
    }

    #[test]
    fn test_build_topology_surfaces_validation_failure() {
        let file = write_config(".yaml", RING_YAML);
        let mut config = load_config(file.path()).unwrap();
        config.num_nodes = 5;
        assert!(build_topology(&config).is_err());
    }

    #[test]
    fn test_resource_owners_inverts_the_placement() {
        let file = write_config(".yaml", RING_YAML);
        let mut config = load_config(file.path()).unwrap();
        config
            .resources
            .get_mut("n1")
            .unwrap()
            .push("r1".to_string());
        let owners = config.resource_owners();
        assert_eq!(owners["r1"], vec!["n1", "n3"]);
    }
}
