// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::prelude::*;

/// The capabilities [`LoopTopology::build`] needs from a polygon mesh store:
/// which polygons exist, the winding of each one, and which vertices exist.
///
/// Implementors own the ids. The topology never allocates or dereferences
/// them; it only compares them.
pub trait MeshSnapshot {
    /// All valid polygons. The order is the order loops are created in, so a
    /// store that enumerates deterministically gets deterministic loop ids.
    fn polygon_ids(&self) -> Vec<PolygonId>;

    /// The ordered vertex ring of `polygon`. Empty when the polygon does not
    /// exist.
    fn polygon_vertices(&self, polygon: PolygonId) -> SVec<VertexId>;

    fn vertex_valid(&self, vertex: VertexId) -> bool;

    /// A counter that changes every time the store's topology changes. Stores
    /// that don't track this return `None`, and staleness checks are then
    /// entirely up to the caller.
    fn topology_version(&self) -> Option<u64> {
        None
    }
}

/// A missing source behaves like an empty mesh.
impl<S: MeshSnapshot + ?Sized> MeshSnapshot for Option<&S> {
    fn polygon_ids(&self) -> Vec<PolygonId> {
        self.map(|s| s.polygon_ids()).unwrap_or_default()
    }

    fn polygon_vertices(&self, polygon: PolygonId) -> SVec<VertexId> {
        self.map(|s| s.polygon_vertices(polygon))
            .unwrap_or_default()
    }

    fn vertex_valid(&self, vertex: VertexId) -> bool {
        self.map(|s| s.vertex_valid(vertex)).unwrap_or(false)
    }

    fn topology_version(&self) -> Option<u64> {
        self.and_then(|s| s.topology_version())
    }
}
