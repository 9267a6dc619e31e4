// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Processors
//!
//! Each sub-module narrows one family of host geometry into topology:
//!
//! - `curve`: lines, NURBS, arcs, brep edges, polylines and poly-curves into edges and wires
//! - `surface`: every surface kind into an untrimmed NURBS face
//! - `brep`: trimmed faces from boundary loops, and the face/shell/cell decision for a brep
//! - `mesh`: indexed meshes into a self-merged cluster of polygonal faces

mod brep;
mod curve;
mod mesh;
mod surface;

pub use brep::BrepProcessor;
pub use curve::CurveProcessor;
pub use mesh::MeshProcessor;
pub use surface::SurfaceProcessor;

use topobridge_topology::{EdgeKey, TopologyArena, TopologyKey};

use crate::{Error, Result};

/// Edges of an edge or wire result, in wire order
pub(crate) fn flatten_edges(arena: &TopologyArena, key: TopologyKey) -> Result<Vec<EdgeKey>> {
    match key {
        TopologyKey::Edge(edge) => Ok(vec![edge]),
        TopologyKey::Wire(wire) => Ok(arena
            .wire_edges(wire)
            .ok_or(topobridge_topology::Error::WireNotFound(wire))?
            .to_vec()),
        other => Err(Error::DegenerateCurve(format!(
            "curve produced a {} instead of edges",
            other.topology_type().as_str()
        ))),
    }
}
