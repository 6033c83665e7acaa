//! Peer and topology type definitions.
//!
//! Peers are held in an arena keyed by their string identifier, and
//! neighbor lists store identifiers rather than references. Edges are
//! normalized so each undirected link is recorded exactly once.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use thiserror::Error;

/// Errors raised while assembling a topology
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A node with this identifier is already part of the network
    #[error("node {0} already exists in the network")]
    DuplicateNode(String),
    /// An edge from a node to itself was requested
    #[error("invalid edge: node {0} cannot link to itself")]
    SelfLoop(String),
    /// An edge references a node that has not been added
    #[error("edge references unknown node {0}")]
    UnknownNode(String),
}

/// A single peer of the overlay.
///
/// Each peer holds a unique identifier, the set of resources it owns,
/// the identifiers of its neighbors, and a local cache mapping resource
/// identifiers to the peer last known to own them.
#[derive(Debug, Clone)]
pub struct Peer {
    pub id: String,
    pub resources: HashSet<String>,
    pub neighbors: Vec<String>,
    pub cache: HashMap<String, String>,
}

impl Peer {
    fn new(id: String, resources: impl IntoIterator<Item = String>) -> Self {
        Self {
            id,
            resources: resources.into_iter().collect(),
            neighbors: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Number of neighbors this peer is linked to
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Whether this peer owns the given resource
    pub fn has_resource(&self, resource_id: &str) -> bool {
        self.resources.contains(resource_id)
    }

    /// Owner recorded in the local cache for the given resource, if any
    pub fn cached_owner(&self, resource_id: &str) -> Option<&str> {
        self.cache.get(resource_id).map(String::as_str)
    }

    /// Link another peer id into the neighbor list.
    ///
    /// Self-links and repeated entries are silently skipped; the full
    /// checks live in [`Topology::add_edge`].
    fn add_neighbor(&mut self, other_id: &str) {
        if other_id == self.id {
            return;
        }
        if !self.neighbors.iter().any(|n| n == other_id) {
            self.neighbors.push(other_id.to_string());
        }
    }
}

/// The undirected overlay graph of peers.
///
/// Peers are stored in key order so that iteration, and therefore every
/// search run against a fixed topology, is deterministic. The edge set
/// holds each link once with its endpoints sorted and exists only to
/// make [`Topology::add_edge`] idempotent.
#[derive(Debug, Default)]
pub struct Topology {
    peers: BTreeMap<String, Peer>,
    edges: BTreeSet<(String, String)>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer to the network.
    ///
    /// The resource list is collapsed into a set, so duplicate entries
    /// are tolerated in the input.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        resources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), TopologyError> {
        let id = id.into();
        if self.peers.contains_key(&id) {
            return Err(TopologyError::DuplicateNode(id));
        }
        let resources = resources.into_iter().map(Into::into);
        self.peers.insert(id.clone(), Peer::new(id, resources));
        Ok(())
    }

    /// Link two peers symmetrically.
    ///
    /// The pair is normalized before insertion, so adding the same edge
    /// twice, in either order, is a no-op.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<(), TopologyError> {
        if a == b {
            return Err(TopologyError::SelfLoop(a.to_string()));
        }
        if !self.peers.contains_key(a) {
            return Err(TopologyError::UnknownNode(a.to_string()));
        }
        if !self.peers.contains_key(b) {
            return Err(TopologyError::UnknownNode(b.to_string()));
        }

        let key = if a < b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        if !self.edges.insert(key) {
            return Ok(());
        }

        if let Some(peer) = self.peers.get_mut(a) {
            peer.add_neighbor(b);
        }
        if let Some(peer) = self.peers.get_mut(b) {
            peer.add_neighbor(a);
        }
        Ok(())
    }

    /// Whether a peer with this identifier exists
    pub fn contains(&self, id: &str) -> bool {
        self.peers.contains_key(id)
    }

    pub fn peer(&self, id: &str) -> Option<&Peer> {
        self.peers.get(id)
    }

    pub fn peer_mut(&mut self, id: &str) -> Option<&mut Peer> {
        self.peers.get_mut(id)
    }

    /// Number of peers in the network
    pub fn node_count(&self) -> usize {
        self.peers.len()
    }

    /// Iterate over all peers in identifier order
    pub fn peers(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }

    /// Iterate over all peer identifiers in order
    pub fn peer_ids(&self) -> impl Iterator<Item = &str> {
        self.peers.keys().map(String::as_str)
    }
}
