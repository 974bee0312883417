// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nonmax::NonMaxU32;
use slotmap::SecondaryMap;

use crate::prelude::*;

/// Iteration ceilings for the walks over the topology
pub mod limits;
pub use limits::*;

/// Constant-time and bounded-walk accessors over a built topology
pub mod queries;

/// Vertex fan rotation and the edge loop ("select loop") traversal
pub mod edge_loop;

/// The edge ring ("select ring") traversal across quad strips
pub mod edge_ring;

/// Invariant checks of a built topology against its source mesh
pub mod validation;
pub use validation::*;

/// Half-edge connectivity derived from a polygon mesh, stored as flat arrays.
/// At position `l` of each array is the data for the loop with index `l`.
///
/// The mesh store only knows the ordered vertex ring of each polygon. This
/// structure recovers the rest: one loop (directed edge) per polygon corner,
/// the `next` / `prev` cycle of each polygon and, where the pairing is
/// unambiguous, the `twin` loop running the opposite way on the neighbouring
/// polygon.
///
/// Differences with a classic halfedge mesh:
/// - Boundary edges have a single loop, whose twin does not exist. There are
///   no boundary halfedges with an empty face.
/// - Edges shared by three or more polygons keep all of their loops
///   twinless. The topology never guesses a pairing.
///
/// The topology is never updated incrementally. It goes stale as soon as the
/// source mesh changes, and must then be rebuilt with [`LoopTopology::build`]
/// before being queried again.
#[derive(Debug, Clone, Default)]
pub struct LoopTopology {
    from: Vec<VertexId>,
    to: Vec<VertexId>,
    poly: Vec<PolygonId>,
    next: Vec<u32>,
    prev: Vec<u32>,
    /// Non-existence is encoded as u32::MAX, via NonMaxU32
    twin: Vec<Option<NonMaxU32>>,
    /// Position of the loop in its polygon's ring, matching the per-corner
    /// order of the source.
    corner: Vec<u32>,

    poly_first_loop: SecondaryMap<PolygonId, LoopId>,
    /// (from, to) -> loop. When several loops share the same direction, the
    /// first one created wins.
    directed: HashMap<(VertexId, VertexId), LoopId>,
    /// All the loops lying on each undirected edge, in creation order.
    undirected: HashMap<EdgeKey, SVec<LoopId>>,

    limits: TraversalLimits,
    built: bool,
    built_version: Option<u64>,
}

impl LoopTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if any ceiling is zero, see [`TraversalLimits::check`].
    pub fn with_limits(limits: TraversalLimits) -> Result<Self> {
        limits.check()?;
        Ok(Self {
            limits,
            ..Default::default()
        })
    }

    pub fn limits(&self) -> &TraversalLimits {
        &self.limits
    }

    /// Replaces the iteration ceilings. Does not require a rebuild. Invalid
    /// limits are rejected and the current ones are kept.
    pub fn set_limits(&mut self, limits: TraversalLimits) -> Result<()> {
        limits.check()?;
        self.limits = limits;
        Ok(())
    }

    /// Discards everything and derives the connectivity of `source` from
    /// scratch.
    ///
    /// Polygons with fewer than three vertices, or that reference vertices
    /// the source reports as invalid, are skipped: they get no loops and
    /// [`LoopTopology::poly_valid`] is false for them. Building never fails.
    #[profiling::function]
    pub fn build<S: MeshSnapshot + ?Sized>(&mut self, source: &S) {
        self.clear();

        let mut skipped = 0;

        // --- First pass: loops, polygon cycles and lookup indices ---
        for p in source.polygon_ids() {
            // A polygon listed twice would get two overlapping rings
            if self.poly_first_loop.contains_key(p) {
                skipped += 1;
                continue;
            }
            let ring = match usable_ring(source, p) {
                Some(ring) => ring,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let first = self.from.len() as u32;
            let n = ring.len() as u32;

            for (corner, (&a, &b)) in ring.iter().circular_tuple_windows().enumerate() {
                let corner = corner as u32;
                let l = LoopId(first + corner);

                self.from.push(a);
                self.to.push(b);
                self.poly.push(p);
                self.next.push(first + (corner + 1) % n);
                self.prev.push(first + (corner + n - 1) % n);
                self.twin.push(None);
                self.corner.push(corner);

                self.directed.entry((a, b)).or_insert(l);
                self.undirected.entry(EdgeKey::new(a, b)).or_default().push(l);
            }

            self.poly_first_loop.insert(p, LoopId(first));
        }

        // --- Second pass: twins ---
        // Only an edge with exactly two loops running in opposite directions
        // gets paired. Anything else is either boundary or ambiguous.
        let mut num_twinned_edges = 0;
        for bucket in self.undirected.values() {
            if let [l0, l1] = bucket.as_slice() {
                let (l0, l1) = (l0.idx(), l1.idx());
                if self.from[l0] == self.to[l1] && self.to[l0] == self.from[l1] {
                    self.twin[l0] = NonMaxU32::new(l1 as u32);
                    self.twin[l1] = NonMaxU32::new(l0 as u32);
                    num_twinned_edges += 1;
                }
            }
        }

        self.built = true;
        self.built_version = source.topology_version();

        log::debug!(
            "Built loop topology: {} loops, {} polygons ({} skipped), {} edges, {} twinned",
            self.from.len(),
            self.poly_first_loop.len(),
            skipped,
            self.undirected.len(),
            num_twinned_edges,
        );
    }

    /// Discards all derived data. Every query answers as on an empty mesh
    /// until the next [`LoopTopology::build`].
    pub fn clear(&mut self) {
        self.from.clear();
        self.to.clear();
        self.poly.clear();
        self.next.clear();
        self.prev.clear();
        self.twin.clear();
        self.corner.clear();
        self.poly_first_loop.clear();
        self.directed.clear();
        self.undirected.clear();
        self.built = false;
        self.built_version = None;
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Returns true when `source` reports a different topology version than
    /// the one this topology was built from. Sources that don't report
    /// versions are never considered stale: tracking their changes is up to
    /// the caller.
    pub fn is_stale_for<S: MeshSnapshot + ?Sized>(&self, source: &S) -> bool {
        if !self.built {
            return true;
        }
        match (self.built_version, source.topology_version()) {
            (Some(built), Some(current)) => built != current,
            _ => false,
        }
    }

    pub fn num_loops(&self) -> usize {
        self.from.len()
    }

    pub fn num_polys(&self) -> usize {
        self.poly_first_loop.len()
    }

    /// Number of distinct undirected edges.
    pub fn num_edges(&self) -> usize {
        self.undirected.len()
    }
}

/// The vertex ring of `polygon`, if the builder should create loops for it.
pub(crate) fn usable_ring<S: MeshSnapshot + ?Sized>(
    source: &S,
    polygon: PolygonId,
) -> Option<SVec<VertexId>> {
    let ring = source.polygon_vertices(polygon);
    if ring.len() < 3 || ring.iter().any(|v| !source.vertex_valid(*v)) {
        None
    } else {
        Some(ring)
    }
}
