// Copyright (C) 2022 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

slotmap::new_key_type! { pub struct VertexId; }
slotmap::new_key_type! { pub struct PolygonId; }

/// Index of a loop (directed polygon edge) in a
/// [`LoopTopology`](super::topology::LoopTopology). Only meaningful for the
/// topology that handed it out, and only until that topology is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoopId(pub(crate) u32);

impl LoopId {
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The identity of an undirected edge: its two endpoints, smallest first.
///
/// Meshes have no persistent edge entities, so edges are named by their
/// vertices. `EdgeKey::new(a, b)` and `EdgeKey::new(b, a)` are the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    pub fn first(&self) -> VertexId {
        self.0
    }

    pub fn second(&self) -> VertexId {
        self.1
    }

    pub fn vertices(&self) -> (VertexId, VertexId) {
        (self.0, self.1)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.0 == v || self.1 == v
    }

    /// Returns the endpoint opposite to `v`, if `v` is an endpoint.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.0 == v {
            Some(self.1)
        } else if self.1 == v {
            Some(self.0)
        } else {
            None
        }
    }
}

/// Classification of an undirected edge by the number of distinct polygons
/// using it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// No polygon uses the edge.
    Unused,
    /// Exactly one polygon.
    Boundary,
    /// Exactly two polygons.
    Manifold,
    /// Three or more polygons.
    NonManifold,
}

impl EdgeKind {
    pub fn from_poly_count(count: usize) -> Self {
        match count {
            0 => EdgeKind::Unused,
            1 => EdgeKind::Boundary,
            2 => EdgeKind::Manifold,
            _ => EdgeKind::NonManifold,
        }
    }
}
