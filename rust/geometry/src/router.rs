// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Router - dispatch from host geometry to processors
//!
//! Classifies an incoming [`Geometry`] by kind and hands it to the processor
//! that narrows it into topology. The match is exhaustive: a kind without a
//! conversion rule is reported as unsupported, never guessed at.

use topobridge_topology::{TopologyArena, TopologyKey};

use crate::model::Geometry;
use crate::options::ConvertOptions;
use crate::processors::{BrepProcessor, CurveProcessor, MeshProcessor, SurfaceProcessor};
use crate::{Error, Result};

/// Geometry processor trait
/// Each processor converts one family of host geometry into topology
pub trait GeometryProcessor {
    type Input: ?Sized;
    type Output;

    /// Build the topology for `input` in `arena`
    fn process(
        &self,
        input: &Self::Input,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<Self::Output>;
}

/// Geometry router - routes geometry kinds to processors
pub struct GeometryRouter {
    options: ConvertOptions,
    curves: CurveProcessor,
    surfaces: SurfaceProcessor,
    breps: BrepProcessor,
    meshes: MeshProcessor,
}

impl GeometryRouter {
    /// Create new router with default options
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            curves: CurveProcessor::new(),
            surfaces: SurfaceProcessor::new(),
            breps: BrepProcessor::new(),
            meshes: MeshProcessor::new(),
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one geometry into topology.
    ///
    /// Returns `Ok(None)` only for a brep without faces.
    pub fn convert(
        &self,
        arena: &mut TopologyArena,
        geometry: &Geometry,
    ) -> Result<Option<TopologyKey>> {
        let options = &self.options;
        tracing::debug!(
            kind = geometry.kind(),
            tolerance = options.tolerance,
            "Converting geometry"
        );

        let topology = match geometry {
            Geometry::Point(point) => Some(TopologyKey::Vertex(arena.add_vertex_at(point))),
            Geometry::Line(line) => Some(TopologyKey::Edge(self.curves.by_line(arena, line)?)),
            Geometry::Curve(curve) => Some(self.curves.process(curve, arena, options)?),
            Geometry::Surface(surface) => {
                Some(TopologyKey::Face(self.surfaces.process(surface, arena, options)?))
            }
            Geometry::Brep(brep) => self.breps.process(brep, arena, options)?,
            Geometry::Box(bx) => self.breps.process(&bx.to_brep()?, arena, options)?,
            Geometry::Mesh(mesh) => Some(self.meshes.process(mesh, arena, options)?),
            Geometry::Other(kind) => return Err(Error::UnsupportedGeometry(kind.clone())),
        };

        if let Some(key) = topology {
            tracing::debug!(
                kind = geometry.kind(),
                result = key.topology_type().as_str(),
                "Converted geometry"
            );
        }
        Ok(topology)
    }
}

impl Default for GeometryRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one geometry at `tolerance` with a fresh router
pub fn topology_by_geometry(
    arena: &mut TopologyArena,
    geometry: &Geometry,
    tolerance: f64,
) -> Result<Option<TopologyKey>> {
    GeometryRouter::with_options(ConvertOptions::new(tolerance)).convert(arena, geometry)
}
