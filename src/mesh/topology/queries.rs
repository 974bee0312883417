// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/* ============== */
/*  Loop access   */
/* ============== */

impl LoopTopology {
    pub fn loop_valid(&self, l: LoopId) -> bool {
        l.idx() < self.from.len()
    }

    pub fn loop_from(&self, l: LoopId) -> Option<VertexId> {
        self.from.get(l.idx()).copied()
    }

    pub fn loop_to(&self, l: LoopId) -> Option<VertexId> {
        self.to.get(l.idx()).copied()
    }

    pub fn loop_poly(&self, l: LoopId) -> Option<PolygonId> {
        self.poly.get(l.idx()).copied()
    }

    pub fn loop_next(&self, l: LoopId) -> Option<LoopId> {
        self.next.get(l.idx()).map(|&n| LoopId(n))
    }

    pub fn loop_prev(&self, l: LoopId) -> Option<LoopId> {
        self.prev.get(l.idx()).map(|&p| LoopId(p))
    }

    /// The loop running the other way along the same edge, on the
    /// neighbouring polygon. `None` on boundary and non-manifold edges.
    pub fn loop_twin(&self, l: LoopId) -> Option<LoopId> {
        self.twin
            .get(l.idx())
            .copied()
            .flatten()
            .map(|t| LoopId(t.get()))
    }

    /// Position of the loop in its polygon's vertex ring.
    pub fn loop_corner(&self, l: LoopId) -> Option<usize> {
        self.corner.get(l.idx()).map(|&c| c as usize)
    }

    pub fn loop_edge_key(&self, l: LoopId) -> Option<EdgeKey> {
        Some(EdgeKey::new(self.loop_from(l)?, self.loop_to(l)?))
    }

    pub fn iter_loops(&self) -> impl Iterator<Item = LoopId> {
        (0..self.from.len() as u32).map(LoopId)
    }
}

/* ================= */
/*  Polygon access   */
/* ================= */

impl LoopTopology {
    /// True when the polygon was present in the source at build time and got
    /// a loop ring.
    pub fn poly_valid(&self, p: PolygonId) -> bool {
        self.poly_first_loop.contains_key(p)
    }

    pub fn poly_first_loop(&self, p: PolygonId) -> Option<LoopId> {
        self.poly_first_loop.get(p).copied()
    }

    pub fn poly_ids(&self) -> impl Iterator<Item = PolygonId> + '_ {
        self.poly_first_loop.keys()
    }

    /// The loops of a polygon, in winding order starting at its first loop.
    pub fn poly_loops(&self, p: PolygonId) -> SVec<LoopId> {
        let first = match self.poly_first_loop(p) {
            Some(first) => first,
            None => return SVec::new(),
        };
        let (ring, end) =
            bounded_cycle(first, self.limits.max_ring_len, |l| self.loop_next(l));
        if end == CycleEnd::Ceiling {
            log::warn!(
                "Polygon {p:?} ring was cut at {} loops. Is the topology malformed?",
                self.limits.max_ring_len
            );
        }
        ring
    }

    /// Like [`LoopTopology::poly_loops`], but `None` unless the whole ring
    /// was enumerated back to its first loop.
    pub(crate) fn closed_poly_loops(&self, p: PolygonId) -> Option<SVec<LoopId>> {
        let first = self.poly_first_loop(p)?;
        match bounded_cycle(first, self.limits.max_ring_len, |l| self.loop_next(l)) {
            (ring, CycleEnd::Closed) => Some(ring),
            _ => None,
        }
    }

    /// The vertices of a polygon, in winding order.
    pub fn poly_verts(&self, p: PolygonId) -> SVec<VertexId> {
        self.poly_loops(p)
            .iter()
            .filter_map(|&l| self.loop_from(l))
            .collect_svec()
    }

    /// For each loop of the polygon (in the order of
    /// [`LoopTopology::poly_loops`]), the polygon across that edge.
    pub fn poly_neighbor_polys(&self, p: PolygonId) -> SVec<Option<PolygonId>> {
        self.poly_loops(p)
            .iter()
            .map(|&l| self.loop_twin(l).and_then(|t| self.loop_poly(t)))
            .collect_svec()
    }
}

/* ============== */
/*  Edge lookup   */
/* ============== */

impl LoopTopology {
    /// The loop going exactly from `a` to `b`.
    pub fn find_loop(&self, a: VertexId, b: VertexId) -> Option<LoopId> {
        self.directed.get(&(a, b)).copied()
    }

    /// Some loop lying on the undirected edge `a`-`b`. Prefers the loop going
    /// from `a` to `b`, then the one going from `b` to `a`.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<LoopId> {
        self.find_loop(a, b)
            .or_else(|| self.find_loop(b, a))
            .or_else(|| self.loops_on_edge(a, b).first().copied())
    }

    /// Every loop lying on the undirected edge `a`-`b`, in creation order.
    pub fn loops_on_edge(&self, a: VertexId, b: VertexId) -> &[LoopId] {
        self.undirected
            .get(&EdgeKey::new(a, b))
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// The distinct polygons using the undirected edge `a`-`b`. The length
    /// classifies the edge, see [`LoopTopology::edge_kind`].
    pub fn edge_polys(&self, a: VertexId, b: VertexId) -> SVec<PolygonId> {
        self.loops_on_edge(a, b)
            .iter()
            .filter_map(|&l| self.loop_poly(l))
            .unique()
            .collect_svec()
    }

    pub fn edge_kind(&self, a: VertexId, b: VertexId) -> EdgeKind {
        EdgeKind::from_poly_count(self.edge_polys(a, b).len())
    }

    /// All edges used by exactly one polygon, sorted.
    pub fn boundary_edges(&self) -> Vec<EdgeKey> {
        self.edges_of_kind(EdgeKind::Boundary)
    }

    /// All edges used by three or more polygons, sorted.
    pub fn non_manifold_edges(&self) -> Vec<EdgeKey> {
        self.edges_of_kind(EdgeKind::NonManifold)
    }

    fn edges_of_kind(&self, kind: EdgeKind) -> Vec<EdgeKey> {
        self.undirected
            .keys()
            .filter(|key| self.edge_kind(key.first(), key.second()) == kind)
            .copied()
            .sorted()
            .collect()
    }
}
