// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slotmap::SlotMap;

use crate::prelude::*;

/// A bare polygon store: vertex positions plus per-polygon vertex rings.
///
/// Freed slots are reused by later inserts, so ids behave like the handles of
/// a real editing store. Every change to the polygon set bumps the
/// topology version reported through [`MeshSnapshot::topology_version`].
#[derive(Debug, Clone, Default)]
pub struct PolygonMesh {
    vertices: SlotMap<VertexId, Vec3>,
    polygons: SlotMap<PolygonId, SVec<VertexId>>,
    topology_version: u64,
}

impl PolygonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from a list of positions and a list of polygons given as
    /// indices into `positions`. Returns the mesh and the vertex ids, in the
    /// same order as `positions`.
    pub fn build_from_polygons<Index, Polygon>(
        positions: &[Vec3],
        polygons: &[Polygon],
    ) -> Result<(Self, Vec<VertexId>)>
    where
        Index: num_traits::AsPrimitive<usize>,
        Polygon: AsRef<[Index]>,
    {
        let mut mesh = Self::new();
        let vertices = positions
            .iter()
            .map(|p| mesh.add_vertex(*p))
            .collect_vec();

        for (i, polygon) in polygons.iter().map(|p| p.as_ref()).enumerate() {
            let ring = polygon
                .iter()
                .map(|index| {
                    vertices.get(index.as_()).copied().ok_or_else(|| {
                        anyhow!("Out-of-bounds index in the polygon array {}", index.as_())
                    })
                })
                .collect::<Result<SVec<_>>>()?;
            mesh.add_polygon(&ring)
                .with_context(|| format!("Invalid polygon at position {i}"))?;
        }

        Ok((mesh, vertices))
    }

    pub fn add_vertex(&mut self, position: Vec3) -> VertexId {
        self.vertices.insert(position)
    }

    /// Removes a vertex, along with every polygon that uses it. Returns false
    /// if the vertex did not exist.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        if self.vertices.remove(vertex).is_none() {
            return false;
        }
        let before = self.polygons.len();
        self.polygons.retain(|_, ring| !ring.contains(&vertex));
        if self.polygons.len() != before {
            self.topology_version += 1;
        }
        true
    }

    /// Adds a polygon with the given winding.
    pub fn add_polygon(&mut self, ring: &[VertexId]) -> Result<PolygonId> {
        if ring.len() < 3 {
            bail!("Cannot add polygons with less than three vertices.")
        }
        if let Some(v) = ring.iter().find(|v| !self.vertices.contains_key(**v)) {
            bail!("Polygon references vertex {v:?}, which does not exist")
        }
        if ring.iter().duplicates().next().is_some() {
            bail!("Cannot add a polygon with duplicate vertices")
        }
        self.topology_version += 1;
        Ok(self.polygons.insert(ring.iter().copied().collect()))
    }

    pub fn remove_polygon(&mut self, polygon: PolygonId) -> bool {
        let removed = self.polygons.remove(polygon).is_some();
        if removed {
            self.topology_version += 1;
        }
        removed
    }

    pub fn position(&self, vertex: VertexId) -> Option<Vec3> {
        self.vertices.get(vertex).copied()
    }

    pub fn set_position(&mut self, vertex: VertexId, position: Vec3) -> bool {
        match self.vertices.get_mut(vertex) {
            Some(p) => {
                *p = position;
                true
            }
            None => false,
        }
    }

    pub fn polygon(&self, polygon: PolygonId) -> Option<&[VertexId]> {
        self.polygons.get(polygon).map(|ring| ring.as_slice())
    }

    pub fn iter_vertices(&self) -> impl Iterator<Item = (VertexId, Vec3)> + '_ {
        self.vertices.iter().map(|(id, p)| (id, *p))
    }

    pub fn iter_polygons(&self) -> impl Iterator<Item = (PolygonId, &[VertexId])> {
        self.polygons.iter().map(|(id, ring)| (id, ring.as_slice()))
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }
}

impl MeshSnapshot for PolygonMesh {
    fn polygon_ids(&self) -> Vec<PolygonId> {
        self.polygons.keys().collect()
    }

    fn polygon_vertices(&self, polygon: PolygonId) -> SVec<VertexId> {
        self.polygons.get(polygon).cloned().unwrap_or_default()
    }

    fn vertex_valid(&self, vertex: VertexId) -> bool {
        self.vertices.contains_key(vertex)
    }

    fn topology_version(&self) -> Option<u64> {
        Some(self.topology_version)
    }
}

/// Small generated meshes used across the test suite.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A source that hands out whatever rings it is given, without the
    /// checks `PolygonMesh` performs.
    #[derive(Default)]
    pub struct RawSource {
        pub vertices: SlotMap<VertexId, ()>,
        pub polygons: SlotMap<PolygonId, SVec<VertexId>>,
    }

    impl RawSource {
        pub fn add_vertices(&mut self, count: usize) -> Vec<VertexId> {
            (0..count).map(|_| self.vertices.insert(())).collect()
        }

        pub fn add_polygon(&mut self, ring: &[VertexId]) -> PolygonId {
            self.polygons.insert(ring.iter().copied().collect())
        }
    }

    impl MeshSnapshot for RawSource {
        fn polygon_ids(&self) -> Vec<PolygonId> {
            self.polygons.keys().collect()
        }

        fn polygon_vertices(&self, polygon: PolygonId) -> SVec<VertexId> {
            self.polygons.get(polygon).cloned().unwrap_or_default()
        }

        fn vertex_valid(&self, vertex: VertexId) -> bool {
            self.vertices.contains_key(vertex)
        }
    }

    /// A flat grid of `nx` by `ny` quads in the XY plane, with unit spacing.
    /// Vertex `(i, j)` is at index `j * (nx + 1) + i` of the returned ids.
    pub fn grid(nx: usize, ny: usize) -> (PolygonMesh, Vec<VertexId>) {
        let positions = (0..=ny)
            .flat_map(|j| (0..=nx).map(move |i| Vec3::new(i as f32, j as f32, 0.0)))
            .collect_vec();
        let idx = |i: usize, j: usize| j * (nx + 1) + i;
        let quads = (0..ny)
            .flat_map(|j| {
                (0..nx).map(move |i| {
                    [idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)]
                })
            })
            .collect_vec();
        PolygonMesh::build_from_polygons(&positions, &quads).unwrap()
    }

    /// A closed torus of `nu` by `nv` quads. Every vertex has valence 4.
    /// Vertex `(i, j)` is at index `j * nu + i`; `i` runs around the major
    /// circle, `j` around the tube.
    pub fn torus(nu: usize, nv: usize) -> (PolygonMesh, Vec<VertexId>) {
        use std::f32::consts::TAU;
        let positions = (0..nv)
            .flat_map(|j| {
                (0..nu).map(move |i| {
                    let u = TAU * i as f32 / nu as f32;
                    let v = TAU * j as f32 / nv as f32;
                    let r = 2.0 + v.cos();
                    Vec3::new(r * u.cos(), r * u.sin(), v.sin())
                })
            })
            .collect_vec();
        let idx = |i: usize, j: usize| (j % nv) * nu + (i % nu);
        let quads = (0..nv)
            .flat_map(|j| {
                (0..nu).map(move |i| {
                    [idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)]
                })
            })
            .collect_vec();
        PolygonMesh::build_from_polygons(&positions, &quads).unwrap()
    }

    /// An open tube of `around` quads per row and `rows` rows, without caps.
    /// Vertex `(i, j)` is at index `j * around + i`.
    pub fn cylinder(around: usize, rows: usize) -> (PolygonMesh, Vec<VertexId>) {
        use std::f32::consts::TAU;
        let positions = (0..=rows)
            .flat_map(|j| {
                (0..around).map(move |i| {
                    let a = TAU * i as f32 / around as f32;
                    Vec3::new(a.cos(), a.sin(), j as f32)
                })
            })
            .collect_vec();
        let idx = |i: usize, j: usize| j * around + (i % around);
        let quads = (0..rows)
            .flat_map(|j| {
                (0..around).map(move |i| {
                    [idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)]
                })
            })
            .collect_vec();
        PolygonMesh::build_from_polygons(&positions, &quads).unwrap()
    }

    /// A unit cube made of six outward-facing quads. All vertices have
    /// valence 3.
    pub fn cube() -> (PolygonMesh, Vec<VertexId>) {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        let quads: [[u32; 4]; 6] = [
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ];
        PolygonMesh::build_from_polygons(&positions, &quads).unwrap()
    }
}
