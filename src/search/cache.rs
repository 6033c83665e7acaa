//! Cache propagation shared by the informed search variants.

use crate::topology::Topology;

/// Write `owner_id` as the known owner of `resource_id` into the local
/// cache of every peer along `path`. Last writer wins per resource id.
pub(super) fn write_owner_along_path(
    topology: &mut Topology,
    path: &[String],
    resource_id: &str,
    owner_id: &str,
) {
    for peer_id in path {
        if let Some(peer) = topology.peer_mut(peer_id) {
            peer.cache
                .insert(resource_id.to_string(), owner_id.to_string());
        }
    }
}

/// Post-exploration reconciliation: for every discovered owner, write
/// its cache entry into every peer of every recorded path that passes
/// through that owner.
///
/// This seeds more broadly than the writes done at discovery time and
/// is quadratic in owners x paths.
pub(super) fn propagate_owner_paths(
    topology: &mut Topology,
    resource_id: &str,
    owners: &[String],
    paths: &[Vec<String>],
) {
    for owner in owners {
        for path in paths {
            if path.iter().any(|id| id == owner) {
                write_owner_along_path(topology, path, resource_id, owner);
            }
        }
    }
}

/// Owner recorded in `peer_id`'s cache for `resource_id`, provided that
/// owner is still part of the network. Stale entries are ignored.
pub(super) fn cached_owner_in_network(
    topology: &Topology,
    peer_id: &str,
    resource_id: &str,
) -> Option<String> {
    let owner = topology.peer(peer_id)?.cached_owner(resource_id)?;
    if topology.contains(owner) {
        Some(owner.to_string())
    } else {
        None
    }
}
