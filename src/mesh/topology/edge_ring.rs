// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

impl LoopTopology {
    /// Selects the edge ring through the edge `a`-`b`: starting at the seed,
    /// repeatedly jump to the opposite edge of the quad on the other side,
    /// producing a strip of "parallel" edges.
    ///
    /// Each side of the seed is walked independently and the walk ends at the
    /// first non-quad polygon, at the boundary, or when an edge repeats.
    /// With two polygons on the seed the result is ordered across the strip
    /// with the seed in the middle. With one polygon the seed comes first.
    /// Seeds with no polygon, or with three or more, return only the seed.
    ///
    /// An unbuilt topology returns no edges.
    #[profiling::function]
    pub fn edge_ring(&self, a: VertexId, b: VertexId) -> Vec<EdgeKey> {
        if !self.built {
            return vec![];
        }
        let seed = EdgeKey::new(a, b);
        let mut visited = HashSet::new();
        visited.insert(seed);

        let result = match self.edge_polys(a, b).as_slice() {
            [p] => std::iter::once(seed)
                .chain(self.walk_across(*p, seed, &mut visited))
                .collect_vec(),
            [p0, p1] => {
                let side0 = self.walk_across(*p0, seed, &mut visited);
                let side1 = self.walk_across(*p1, seed, &mut visited);
                side0
                    .into_iter()
                    .rev()
                    .chain(std::iter::once(seed))
                    .chain(side1)
                    .collect_vec()
            }
            _ => vec![seed],
        };
        log::trace!("Edge ring from {seed:?}: {} edges", result.len());
        result
    }

    /// Crosses quads starting at `poly`, entering through `entry`.
    fn walk_across(
        &self,
        poly: PolygonId,
        entry: EdgeKey,
        visited: &mut HashSet<EdgeKey>,
    ) -> Vec<EdgeKey> {
        let mut edges = vec![];
        let (mut poly, mut entry) = (poly, entry);
        for _ in 0..self.limits.max_walk_len {
            let ring = match self.closed_poly_loops(poly) {
                Some(ring) if ring.len() == 4 => ring,
                _ => return edges,
            };
            let idx = match ring
                .iter()
                .position(|&l| self.loop_edge_key(l) == Some(entry))
            {
                Some(idx) => idx,
                None => return edges,
            };

            let opposite = ring[(idx + 2) % 4];
            let key = match self.loop_edge_key(opposite) {
                Some(key) => key,
                None => return edges,
            };
            if !visited.insert(key) {
                return edges;
            }
            edges.push(key);

            match self.loop_twin(opposite).and_then(|t| self.loop_poly(t)) {
                Some(next_poly) => {
                    poly = next_poly;
                    entry = key;
                }
                None => return edges,
            }
        }
        log::warn!(
            "Edge ring walk stopped after {} steps without closing",
            self.limits.max_walk_len
        );
        edges
    }
}
