// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh processor: indexed meshes into merged polygonal topology.

use topobridge_topology::{TopologyArena, TopologyKey};

use crate::mesh::{Mesh, MeshFace};
use crate::options::ConvertOptions;
use crate::router::GeometryProcessor;
use crate::{Error, Result};

/// Mesh processor
/// One polygonal face per mesh face, self-merged so that faces sharing
/// vertices end up in a shell (or cell) instead of a loose cluster
pub struct MeshProcessor;

impl MeshProcessor {
    pub fn new() -> Self {
        Self
    }

    fn validate(&self, mesh: &Mesh) -> Result<()> {
        if mesh.is_empty() {
            return Err(Error::InvalidMesh("mesh has no faces".into()));
        }
        let len = mesh.vertices.len();
        for (face, indices) in mesh.faces.iter().map(MeshFace::indices).enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                return Err(Error::InvalidMesh(format!(
                    "face {face} refers to vertex {index} of {len}"
                )));
            }
        }
        Ok(())
    }
}

impl GeometryProcessor for MeshProcessor {
    type Input = Mesh;
    type Output = TopologyKey;

    fn process(
        &self,
        mesh: &Mesh,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<TopologyKey> {
        self.validate(mesh)?;

        let mut cycles: Vec<Vec<usize>> = Vec::with_capacity(mesh.faces.len());
        for (index, face) in mesh.faces.iter().enumerate() {
            if face.is_degenerate() {
                tracing::warn!(face = index, indices = ?face.indices(), "Skipping degenerate mesh face");
                continue;
            }
            cycles.push(face.index_cycle());
        }
        if cycles.is_empty() {
            return Err(Error::InvalidMesh("every face is degenerate".into()));
        }

        let vertices: Vec<_> = mesh.vertices.iter().map(|p| arena.add_vertex_at(p)).collect();

        let topologies = arena.add_by_vertices_indices(&vertices, &cycles)?;
        let cluster = arena.add_cluster(&topologies)?;
        let merged = arena.self_merge(cluster, options.tolerance)?;

        tracing::debug!(
            vertices = mesh.vertices.len(),
            faces = topologies.len(),
            skipped = mesh.faces.len() - topologies.len(),
            result = merged.topology_type().as_str(),
            "Merged mesh faces"
        );
        Ok(merged)
    }
}

impl Default for MeshProcessor {
    fn default() -> Self {
        Self::new()
    }
}
