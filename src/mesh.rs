// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Type-safe wrappers over vertex, polygon and loop handles, and edge keys
pub mod id_types;

/// The read-only view of a polygon mesh that connectivity is built from
pub mod snapshot;

/// A minimal in-memory polygon store implementing [`snapshot::MeshSnapshot`]
pub mod polygon_mesh;

/// The derived half-edge (loop) connectivity, adjacency queries and edge
/// loop / edge ring traversals.
pub mod topology;
