// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/* ================ */
/*  Vertex fans     */
/* ================ */

impl LoopTopology {
    /// Rotates around the origin vertex of `l`, returning the next loop that
    /// leaves the same vertex. `None` as soon as the fan is open at this
    /// point (boundary or non-manifold edge).
    pub fn vertex_next(&self, l: LoopId) -> Option<LoopId> {
        self.loop_twin(self.loop_prev(l)?)
    }

    /// The outgoing loops around the origin vertex of `l`, starting at `l`.
    /// Only closed fans are returned: `None` when the rotation hits a missing
    /// twin before coming back to `l`.
    pub fn vertex_fan(&self, l: LoopId) -> Option<SVec<LoopId>> {
        if !self.loop_valid(l) {
            return None;
        }
        let (fan, end) = bounded_cycle(l, self.limits.max_fan_len, |h| self.vertex_next(h));
        match end {
            CycleEnd::Closed => Some(fan),
            CycleEnd::Open => None,
            CycleEnd::Ceiling => {
                log::warn!(
                    "Fan around {:?} did not close after {} loops. Is the topology malformed?",
                    self.loop_from(l),
                    self.limits.max_fan_len
                );
                None
            }
        }
    }

    /// Number of edges around the origin vertex of `l`. Returns 0 for open
    /// fans, meaning "do not continue through this vertex".
    pub fn vertex_valence(&self, l: LoopId) -> usize {
        self.vertex_fan(l).map(|fan| fan.len()).unwrap_or(0)
    }

    /// Given `l` going from `x` to `y`, returns the loop leaving `y` straight
    /// ahead: the spoke opposite to `l` in the fan of `y`. Only defined when
    /// `y` has a closed fan of exactly four edges.
    pub fn step_forward(&self, l: LoopId) -> Option<LoopId> {
        let twin = self.loop_twin(l)?;
        if self.vertex_valence(twin) != 4 {
            return None;
        }
        self.vertex_next(self.vertex_next(twin)?)
    }
}

/* ================ */
/*  Edge loops      */
/* ================ */

impl LoopTopology {
    /// Selects the edge loop through the edge `a`-`b`: the chain of edges
    /// obtained by going straight through every vertex of valence four, in
    /// both directions from the seed.
    ///
    /// The walk stops at vertices with any other valence, at the mesh
    /// boundary and at non-manifold edges. Closed loops are returned once,
    /// without repeating the seed. The result is ordered along the loop, with
    /// the seed in the middle. When the seed has a loop going from `a` to
    /// `b`, edges on `a`'s side come first.
    ///
    /// An unbuilt topology returns no edges. A seed edge that doesn't exist
    /// in the mesh returns just the seed.
    #[profiling::function]
    pub fn edge_loop(&self, a: VertexId, b: VertexId) -> Vec<EdgeKey> {
        if !self.built {
            return vec![];
        }
        let seed = EdgeKey::new(a, b);
        let seed_loop = match self.find_edge(a, b) {
            Some(l) => l,
            None => return vec![seed],
        };

        let mut visited = HashSet::new();
        visited.insert(seed);

        let forward = self.walk_straight(seed_loop, &mut visited);
        let backward = match self.loop_twin(seed_loop) {
            Some(twin) => self.walk_straight(twin, &mut visited),
            None => vec![],
        };

        let result = backward
            .into_iter()
            .rev()
            .chain(std::iter::once(seed))
            .chain(forward)
            .collect_vec();
        log::trace!("Edge loop from {seed:?}: {} edges", result.len());
        result
    }

    /// Repeats [`LoopTopology::step_forward`] from `start`, collecting the
    /// edges crossed. Stops at the first edge already in `visited`.
    fn walk_straight(&self, start: LoopId, visited: &mut HashSet<EdgeKey>) -> Vec<EdgeKey> {
        let mut edges = vec![];
        let mut current = start;
        for _ in 0..self.limits.max_walk_len {
            let next = match self.step_forward(current) {
                Some(next) => next,
                None => return edges,
            };
            let key = match self.loop_edge_key(next) {
                Some(key) => key,
                None => return edges,
            };
            if !visited.insert(key) {
                return edges;
            }
            edges.push(key);
            current = next;
        }
        log::warn!(
            "Edge loop walk stopped after {} steps without closing",
            self.limits.max_walk_len
        );
        edges
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::polygon_mesh::fixtures::{self, RawSource};

    fn built(mesh: &PolygonMesh) -> LoopTopology {
        let mut topo = LoopTopology::new();
        topo.build(mesh);
        topo
    }

    #[test]
    fn fan_of_grid_vertices() {
        let (mesh, v) = fixtures::grid(2, 2);
        let topo = built(&mesh);

        // Center vertex (1, 1) is interior
        let center = v[4];
        let out = topo.find_loop(center, v[5]).unwrap();
        let fan = topo.vertex_fan(out).unwrap();
        assert_eq!(fan.len(), 4);
        assert!(fan
            .iter()
            .all(|&l| topo.loop_from(l) == Some(center)));
        let ends = fan.iter().filter_map(|&l| topo.loop_to(l)).sorted().collect_vec();
        assert_eq!(ends, [v[1], v[3], v[5], v[7]].into_iter().sorted().collect_vec());
        assert_eq!(topo.vertex_valence(out), 4);

        // Corner and side vertices have open fans
        let corner = topo.find_loop(v[0], v[1]).unwrap();
        assert_eq!(topo.vertex_fan(corner), None);
        assert_eq!(topo.vertex_valence(corner), 0);
        let side = topo.find_loop(v[1], v[2]).unwrap();
        assert_eq!(topo.vertex_valence(side), 0);
    }

    #[test]
    fn vertex_next_stays_on_the_vertex() {
        let (mesh, _) = fixtures::torus(4, 4);
        let topo = built(&mesh);
        for l in topo.iter_loops() {
            let n = topo.vertex_next(l).unwrap();
            assert_eq!(topo.loop_from(n), topo.loop_from(l));
            assert_ne!(n, l);
            assert_eq!(topo.vertex_valence(l), 4);
        }
    }

    #[test]
    fn cube_vertices_have_valence_three() {
        let (mesh, v) = fixtures::cube();
        let topo = built(&mesh);
        for l in topo.iter_loops() {
            assert_eq!(topo.vertex_valence(l), 3);
            assert_eq!(topo.step_forward(l), None);
        }
        // No straight continuation anywhere: the loop is just the seed
        assert_eq!(topo.edge_loop(v[0], v[1]), vec![EdgeKey::new(v[0], v[1])]);
    }

    #[test]
    fn step_forward_goes_straight() {
        let (mesh, v) = fixtures::grid(3, 3);
        let topo = built(&mesh);
        // (0,1) -> (1,1) continues to (2,1), on a 4x4 lattice
        let l = topo.find_loop(v[4], v[5]).unwrap();
        let next = topo.step_forward(l).unwrap();
        assert_eq!(topo.loop_from(next), Some(v[5]));
        assert_eq!(topo.loop_to(next), Some(v[6]));

        // (2,1) -> (3,1) ends on the boundary
        let last = topo.find_loop(v[6], v[7]).unwrap();
        assert_eq!(topo.step_forward(last), None);
    }

    #[test]
    fn closed_loop_on_torus() {
        let (mesh, v) = fixtures::torus(5, 3);
        let topo = built(&mesh);

        // Around the major circle: edges (i, 0)-(i+1, 0)
        let around = topo.edge_loop(v[0], v[1]);
        assert_eq!(around.len(), 5);
        assert_eq!(around[0], EdgeKey::new(v[0], v[1]));
        let expected = (0..5)
            .map(|i| EdgeKey::new(v[i], v[(i + 1) % 5]))
            .sorted()
            .collect_vec();
        assert_eq!(around.iter().copied().sorted().collect_vec(), expected);

        // Around the tube: edges (0, j)-(0, j+1)
        let tube = topo.edge_loop(v[0], v[5]);
        assert_eq!(tube.len(), 3);
        assert!(tube.iter().all_unique());
    }

    #[test]
    fn tiny_walk_limit_cuts_the_loop() {
        let (mesh, v) = fixtures::torus(8, 3);
        let mut topo = LoopTopology::with_limits(TraversalLimits {
            max_walk_len: 2,
            ..Default::default()
        })
        .unwrap();
        topo.build(&mesh);
        // Two steps on each side plus the seed
        assert_eq!(topo.edge_loop(v[0], v[1]).len(), 5);
    }

    #[test]
    fn fan_ceiling_reports_an_open_fan() {
        // Six triangles around a center vertex: a closed fan of valence 6
        let mut src = RawSource::default();
        let center = src.add_vertices(1)[0];
        let rim = src.add_vertices(6);
        for i in 0..6 {
            src.add_polygon(&[center, rim[i], rim[(i + 1) % 6]]);
        }

        let mut topo = LoopTopology::new();
        topo.build(&src);
        let spoke = topo.find_loop(center, rim[0]).unwrap();
        assert_eq!(topo.vertex_valence(spoke), 6);

        // A fan longer than the ceiling is never reported as closed
        topo.set_limits(TraversalLimits {
            max_fan_len: 4,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(topo.vertex_fan(spoke), None);
        assert_eq!(topo.vertex_valence(spoke), 0);
        assert_eq!(topo.edge_loop(center, rim[0]), vec![EdgeKey::new(center, rim[0])]);
    }
}
