// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve processor: host curves into edges and wires.

use nalgebra::Point3;
use topobridge_topology::{
    EdgeKey, KnotVector, NurbsCurve, TopologyArena, TopologyKey, WireKey, LINEAR_PRECISION,
};

use super::flatten_edges;
use crate::curve::{Curve, NurbsCurveData};
use crate::model::Line;
use crate::options::ConvertOptions;
use crate::router::GeometryProcessor;
use crate::{Error, Result};

/// Curve processor
/// Produces an edge for single-span curves and a wire for chains
pub struct CurveProcessor;

impl CurveProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Straight edge between the line's end points
    pub fn by_line(&self, arena: &mut TopologyArena, line: &Line) -> Result<EdgeKey> {
        if line.length() <= LINEAR_PRECISION {
            return Err(Error::DegenerateCurve("line has zero length".into()));
        }
        let start = arena.add_vertex_at(&line.from);
        let end = arena.add_vertex_at(&line.to);
        Ok(arena.add_edge(start, end)?)
    }

    /// NURBS edge from host parameters.
    ///
    /// This is where host knots become kernel knots; nothing upstream may
    /// touch the knot vector.
    pub fn by_nurbs_curve(&self, arena: &mut TopologyArena, data: &NurbsCurveData) -> Result<EdgeKey> {
        tracing::debug!(
            degree = data.degree,
            points = data.points.len(),
            rational = data.is_rational(),
            closed = data.is_closed(LINEAR_PRECISION),
            "Converting NURBS curve"
        );
        let knots = KnotVector::from_host_knots(&data.knots)?;
        let curve = NurbsCurve::new(
            data.points.iter().map(|p| p.location).collect(),
            data.points.iter().map(|p| p.weight).collect(),
            knots,
            data.is_rational(),
            data.periodic,
            data.degree,
        )?;
        Ok(arena.add_nurbs_edge(curve))
    }

    /// Edge or wire through the polyline's points.
    ///
    /// A closed polyline drops its repeated end point and is built as an
    /// index cycle, so the wire closes on its first vertex.
    fn by_polyline(
        &self,
        arena: &mut TopologyArena,
        points: &[Point3<f64>],
        options: &ConvertOptions,
    ) -> Result<TopologyKey> {
        if points.len() < 2 {
            return Err(Error::DegenerateCurve(format!(
                "polyline with {} points",
                points.len()
            )));
        }

        let closed = points.len() > 3
            && (points[0] - points[points.len() - 1]).norm() <= options.tolerance;
        let distinct = if closed { &points[..points.len() - 1] } else { points };

        let vertices: Vec<_> = distinct.iter().map(|p| arena.add_vertex_at(p)).collect();
        let mut indices: Vec<usize> = (0..vertices.len()).collect();
        if closed {
            indices.push(0);
        }

        let topologies = arena.add_by_vertices_indices(&vertices, &[indices])?;
        match topologies.first() {
            Some(&TopologyKey::Face(face)) => arena
                .face_outer_wire(face)
                .map(TopologyKey::Wire)
                .ok_or_else(|| Error::DegenerateCurve("closed polyline has no boundary".into())),
            Some(&key) => Ok(key),
            None => Err(Error::DegenerateCurve("polyline produced no topology".into())),
        }
    }

    /// One wire from the segments' edges, chained by location.
    fn by_poly_curve(
        &self,
        arena: &mut TopologyArena,
        segments: &[Curve],
        options: &ConvertOptions,
    ) -> Result<WireKey> {
        if segments.is_empty() {
            return Err(Error::DegenerateCurve("poly-curve has no segments".into()));
        }

        let mut edges = Vec::with_capacity(segments.len());
        for segment in segments {
            let topology = self.process(segment, arena, options)?;
            edges.extend(flatten_edges(arena, topology)?);
        }
        Ok(arena.add_wire_by_edges(&edges, options.tolerance)?)
    }
}

impl GeometryProcessor for CurveProcessor {
    type Input = Curve;
    type Output = TopologyKey;

    fn process(
        &self,
        curve: &Curve,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<TopologyKey> {
        match curve {
            Curve::Line(line) => self.by_line(arena, line).map(TopologyKey::Edge),
            Curve::Nurbs(data) => self.by_nurbs_curve(arena, data).map(TopologyKey::Edge),
            Curve::Arc(_) | Curve::BrepEdge { .. } => {
                let data = curve.to_nurbs()?;
                self.by_nurbs_curve(arena, &data).map(TopologyKey::Edge)
            }
            Curve::Polyline { points } => self.by_polyline(arena, points, options),
            Curve::PolyCurve { segments } => {
                self.by_poly_curve(arena, segments, options).map(TopologyKey::Wire)
            }
            Curve::Other(kind) => Err(Error::UnsupportedCurve(kind.clone())),
        }
    }
}

impl Default for CurveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Arc, ControlPoint};
    use crate::model::{Interval, Plane};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use topobridge_topology::EdgeCurve;

    fn process(arena: &mut TopologyArena, curve: &Curve) -> Result<TopologyKey> {
        CurveProcessor::new().process(curve, arena, &ConvertOptions::default())
    }

    fn cubic(k: usize) -> NurbsCurveData {
        let points = (0..k)
            .map(|i| ControlPoint::new(Point3::new(i as f64, (i % 2) as f64, 0.0), 1.0 + (i % 2) as f64))
            .collect();
        // Clamped host knots: k + 2 values with the end values repeated three times
        let mut knots = vec![0.0, 0.0];
        knots.extend((0..=(k - 3)).map(|i| i as f64));
        knots.extend([(k - 3) as f64, (k - 3) as f64]);
        NurbsCurveData {
            degree: 3,
            points,
            knots,
            periodic: false,
        }
    }

    #[test]
    fn line_becomes_straight_edge() {
        let mut arena = TopologyArena::new();
        let line = Line::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));
        let key = process(&mut arena, &Curve::Line(line)).unwrap();

        let edge = key.as_edge().unwrap();
        let (start, end) = arena.edge_vertices(edge).unwrap();
        assert_relative_eq!(arena.vertex_point(start).unwrap(), line.from);
        assert_relative_eq!(arena.vertex_point(end).unwrap(), line.to);
        assert_eq!(arena.edge(edge).unwrap().curve, EdgeCurve::Line);
    }

    #[test]
    fn rational_cubic_gets_kernel_knots() {
        let mut arena = TopologyArena::new();
        for k in [4, 5, 7] {
            let data = cubic(k);
            assert_eq!(data.knots.len(), k + 2);
            let key = process(&mut arena, &Curve::Nurbs(data.clone())).unwrap();

            let curve = arena.edge_nurbs(key.as_edge().unwrap()).unwrap();
            let knots = curve.knots().as_slice();
            assert!(curve.is_rational());
            assert_eq!(knots.len(), k + 4);
            assert_eq!(knots.len(), data.knots.len() + 2);
            assert_eq!(knots[0], knots[1]);
            assert_eq!(knots[knots.len() - 1], knots[knots.len() - 2]);
        }
    }

    #[test]
    fn arc_edge_ends_on_arc() {
        let mut arena = TopologyArena::new();
        let arc = Arc::circular(Plane::world_xy(), 2.0, Interval::new(0.0, PI));
        let key = process(&mut arena, &Curve::Arc(arc)).unwrap();

        let (start, end) = arena.edge_vertices(key.as_edge().unwrap()).unwrap();
        assert_relative_eq!(arena.vertex_point(start).unwrap(), Point3::new(2.0, 0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(arena.vertex_point(end).unwrap(), Point3::new(-2.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn full_circle_shares_one_vertex() {
        let mut arena = TopologyArena::new();
        let arc = Arc::circular(Plane::world_xy(), 1.0, Interval::new(0.0, 2.0 * PI));
        let key = process(&mut arena, &Curve::Arc(arc)).unwrap();

        let (start, end) = arena.edge_vertices(key.as_edge().unwrap()).unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn closed_polyline_does_not_repeat_first_vertex() {
        let mut arena = TopologyArena::new();
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        let key = process(&mut arena, &Curve::Polyline { points }).unwrap();

        let wire = key.as_wire().unwrap();
        assert!(arena.wire_is_closed(wire));
        assert_eq!(arena.wire_edges(wire).unwrap().len(), 4);
        assert_eq!(arena.wire_vertices(wire).unwrap().len(), 4);
    }

    #[test]
    fn open_polyline_is_wire() {
        let mut arena = TopologyArena::new();
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let key = process(&mut arena, &Curve::Polyline { points }).unwrap();

        let wire = key.as_wire().unwrap();
        assert!(!arena.wire_is_closed(wire));
        assert_eq!(arena.wire_edges(wire).unwrap().len(), 2);
    }

    #[test]
    fn short_polyline_is_degenerate() {
        let mut arena = TopologyArena::new();
        let curve = Curve::Polyline {
            points: vec![Point3::origin()],
        };
        assert!(matches!(process(&mut arena, &curve), Err(Error::DegenerateCurve(_))));
    }

    #[test]
    fn poly_curve_chains_segments_out_of_order() {
        let mut arena = TopologyArena::new();
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(2.0, 2.0, 0.0);
        let d = Point3::new(0.0, 2.0, 0.0);
        let curve = Curve::PolyCurve {
            segments: vec![
                Curve::Line(Line::new(c, d)),
                Curve::Polyline {
                    points: vec![a, b, c],
                },
                Curve::BrepEdge {
                    curve: Box::new(Curve::Line(Line::new(d, a))),
                },
            ],
        };
        let key = process(&mut arena, &curve).unwrap();

        let wire = key.as_wire().unwrap();
        assert_eq!(arena.wire_edges(wire).unwrap().len(), 4);
        assert!(arena.wire_is_closed(wire));
    }

    #[test]
    fn unknown_curve_is_unsupported() {
        let mut arena = TopologyArena::new();
        let curve = Curve::Other("Spiral".into());
        assert!(matches!(
            process(&mut arena, &curve),
            Err(Error::UnsupportedCurve(kind)) if kind == "Spiral"
        ));
    }
}
