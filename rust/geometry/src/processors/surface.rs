// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface processor: any host surface into an untrimmed NURBS face.

use topobridge_topology::{FaceKey, KnotVector, NurbsSurface, TopologyArena};

use crate::options::ConvertOptions;
use crate::router::GeometryProcessor;
use crate::surface::{NurbsSurfaceData, Surface};
use crate::Result;

/// Surface processor
/// Reduces every surface kind to NURBS parameters and builds a face spanning
/// the full parametric domain
pub struct SurfaceProcessor;

impl SurfaceProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Untrimmed face from host NURBS parameters.
    ///
    /// Both knot vectors are corrected here and nowhere else.
    pub fn by_nurbs_surface(
        &self,
        arena: &mut TopologyArena,
        data: &NurbsSurfaceData,
    ) -> Result<FaceKey> {
        let u_knots = KnotVector::from_host_knots(&data.u_knots)?;
        let v_knots = KnotVector::from_host_knots(&data.v_knots)?;

        let control_points = data
            .points
            .iter()
            .map(|row| row.iter().map(|p| p.location).collect())
            .collect();
        let weights = data
            .points
            .iter()
            .map(|row| row.iter().map(|p| p.weight).collect())
            .collect();

        let surface = NurbsSurface::new(
            control_points,
            weights,
            u_knots,
            v_knots,
            data.is_rational(),
            data.u_periodic,
            data.v_periodic,
            data.u_degree,
            data.v_degree,
        )?;
        Ok(arena.add_nurbs_face(surface)?)
    }
}

impl GeometryProcessor for SurfaceProcessor {
    type Input = Surface;
    type Output = FaceKey;

    fn process(
        &self,
        surface: &Surface,
        arena: &mut TopologyArena,
        _options: &ConvertOptions,
    ) -> Result<FaceKey> {
        let data = surface.to_nurbs()?;
        tracing::debug!(
            kind = surface.kind(),
            u_degree = data.u_degree,
            v_degree = data.v_degree,
            rational = data.is_rational(),
            "Converted surface to NURBS"
        );
        self.by_nurbs_surface(arena, &data)
    }
}

impl Default for SurfaceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::model::{Interval, Line, Plane};
    use crate::Error;
    use nalgebra::{Point3, Vector3};
    use std::f64::consts::TAU;
    use topobridge_topology::FaceSurface;

    fn process(arena: &mut TopologyArena, surface: &Surface) -> Result<FaceKey> {
        SurfaceProcessor::new().process(surface, arena, &ConvertOptions::default())
    }

    #[test]
    fn plane_becomes_four_sided_face() {
        let mut arena = TopologyArena::new();
        let surface = Surface::Plane {
            plane: Plane::world_xy(),
            x: Interval::new(0.0, 3.0),
            y: Interval::new(0.0, 2.0),
        };
        let face = process(&mut arena, &surface).unwrap();

        assert_eq!(arena.face_vertices(face).unwrap().len(), 4);
        assert_eq!(arena.face_edges(face).unwrap().len(), 4);
        let FaceSurface::Nurbs(nurbs) = &arena.face(face).unwrap().surface else {
            panic!("expected a NURBS face");
        };
        assert_eq!(nurbs.u_knots().len(), 4);
        assert_eq!(nurbs.u_knots().as_slice()[0], nurbs.u_knots().as_slice()[1]);
    }

    #[test]
    fn cylinder_face_closes_on_its_seam() {
        let mut arena = TopologyArena::new();
        let surface = Surface::Revolution {
            profile: Curve::Line(Line::new(
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 1.0),
            )),
            axis_origin: Point3::origin(),
            axis_direction: Vector3::z(),
            angle: Interval::new(0.0, TAU),
        };
        let face = process(&mut arena, &surface).unwrap();

        // The seam edges coincide, so only the two seam corners remain
        assert_eq!(arena.face_vertices(face).unwrap().len(), 2);
        let outer = arena.face_outer_wire(face).unwrap();
        assert!(arena.wire_is_closed(outer));
    }

    #[test]
    fn knot_count_mismatch_is_reported() {
        let mut arena = TopologyArena::new();
        let mut data = Surface::Plane {
            plane: Plane::world_xy(),
            x: Interval::new(0.0, 1.0),
            y: Interval::new(0.0, 1.0),
        }
        .to_nurbs()
        .unwrap();
        data.u_knots.push(2.0);

        let result = process(&mut arena, &Surface::Nurbs(data));
        assert!(matches!(
            result,
            Err(Error::Topology(topobridge_topology::Error::InvalidNurbs(_)))
        ));
    }
}
