pub use anyhow::{anyhow, bail, Context, Result};

pub use glam::Vec3;

pub use itertools::Itertools;
pub use std::collections::{HashMap, HashSet};

pub use crate::mesh::id_types::*;
pub use crate::mesh::polygon_mesh::PolygonMesh;
pub use crate::mesh::snapshot::MeshSnapshot;
pub use crate::mesh::topology::*;

pub use crate::utils::*;
