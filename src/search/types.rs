//! Search outcome type.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Algorithm;

/// Outcome of one search run.
///
/// A search may discover the same resource at several owners across the
/// explored paths; `found_at` keeps each distinct owner once, in
/// discovery order. `visited` is the global set of peers touched by the
/// run, `paths` the ordered peer sequences the exploration followed
/// from the start peer, and `messages` the number of query forwardings.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub found: bool,
    pub start_node: String,
    pub resource_id: String,
    pub found_at: Vec<String>,
    pub visited: BTreeSet<String>,
    pub messages: u64,
    pub paths: Vec<Vec<String>>,
    pub algorithm: Algorithm,
}

impl SearchResult {
    pub(super) fn new(algorithm: Algorithm, start_id: &str, resource_id: &str) -> Self {
        Self {
            found: false,
            start_node: start_id.to_string(),
            resource_id: resource_id.to_string(),
            found_at: Vec::new(),
            visited: BTreeSet::new(),
            messages: 0,
            paths: Vec::new(),
            algorithm,
        }
    }

    /// Record a peer as an owner of the queried resource, keeping each
    /// distinct owner once in discovery order.
    pub(super) fn record_owner(&mut self, owner_id: &str) {
        if !self.found_at.iter().any(|o| o == owner_id) {
            self.found_at.push(owner_id.to_string());
        }
    }

    /// Derive the found flag from the recorded owners.
    pub(super) fn finish(mut self) -> Self {
        self.found = !self.found_at.is_empty();
        self
    }

    /// Number of distinct peers involved in the search
    pub fn num_visited(&self) -> usize {
        self.visited.len()
    }
}
