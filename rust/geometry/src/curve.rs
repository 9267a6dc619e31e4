// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host curve kinds and their NURBS forms
//!
//! Host NURBS data keeps each end knot once
//! (`knots.len() == points.len() + degree - 1`). Conversions in this module
//! produce data in that same host convention; the kernel correction happens
//! later, in the curve processor.

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::{Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Interval, Line, Plane};
use crate::options::DEFAULT_TOLERANCE;

/// Parametric curve as handed over by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    Line(Line),
    Nurbs(NurbsCurveData),
    Arc(Arc),
    /// Edge curve of a brep, bound to a parent surface
    BrepEdge { curve: Box<Curve> },
    Polyline { points: Vec<Point3<f64>> },
    /// Chain of segments joined end to end
    PolyCurve { segments: Vec<Curve> },
    /// A host kind with no conversion rule
    Other(String),
}

impl Curve {
    pub fn kind(&self) -> &str {
        match self {
            Curve::Line(_) => "Line",
            Curve::Nurbs(_) => "Nurbs",
            Curve::Arc(_) => "Arc",
            Curve::BrepEdge { .. } => "BrepEdge",
            Curve::Polyline { .. } => "Polyline",
            Curve::PolyCurve { .. } => "PolyCurve",
            Curve::Other(kind) => kind,
        }
    }

    /// Host NURBS form of the curve.
    ///
    /// Poly-curve segments are joined into one curve of their highest degree;
    /// see [`join_segments`].
    pub fn to_nurbs(&self) -> Result<NurbsCurveData> {
        match self {
            Curve::Line(line) => Ok(NurbsCurveData::polyline(&[line.from, line.to])),
            Curve::Nurbs(data) => Ok(data.clone()),
            Curve::Arc(arc) => arc.to_nurbs(),
            Curve::BrepEdge { curve } => curve.to_nurbs(),
            Curve::Polyline { points } => {
                if points.len() < 2 {
                    return Err(Error::DegenerateCurve(format!(
                        "polyline with {} points",
                        points.len()
                    )));
                }
                Ok(NurbsCurveData::polyline(points))
            }
            Curve::PolyCurve { segments } => join_segments(segments),
            Curve::Other(_) => Err(Error::UnsupportedCurve(self.kind().to_string())),
        }
    }
}

/// Weighted control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub location: Point3<f64>,
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

fn unit_weight() -> f64 {
    1.0
}

impl ControlPoint {
    pub fn new(location: Point3<f64>, weight: f64) -> Self {
        Self { location, weight }
    }

    pub fn unweighted(location: Point3<f64>) -> Self {
        Self::new(location, 1.0)
    }
}

/// NURBS curve parameters in host knot convention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsCurveData {
    pub degree: usize,
    pub points: Vec<ControlPoint>,
    pub knots: Vec<f64>,
    #[serde(default)]
    pub periodic: bool,
}

impl NurbsCurveData {
    /// Rational when any weight differs from one
    pub fn is_rational(&self) -> bool {
        self.points.iter().any(|p| (p.weight - 1.0).abs() > f64::EPSILON)
    }

    /// First and last control points coincide within `tolerance`
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 2 => {
                (a.location - b.location).norm() <= tolerance
            }
            _ => false,
        }
    }

    /// Degree-1 curve through `points`, parameterized by point index
    pub(crate) fn polyline(points: &[Point3<f64>]) -> Self {
        Self {
            degree: 1,
            points: points.iter().copied().map(ControlPoint::unweighted).collect(),
            knots: (0..points.len()).map(|i| i as f64).collect(),
            periodic: false,
        }
    }
}

/// Circular or elliptical arc in a plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub plane: Plane,
    pub x_radius: f64,
    pub y_radius: f64,
    /// Angular range in radians, measured from the plane's x axis
    pub angle: Interval,
}

impl Arc {
    pub fn circular(plane: Plane, radius: f64, angle: Interval) -> Self {
        Self {
            plane,
            x_radius: radius,
            y_radius: radius,
            angle,
        }
    }

    pub fn point_at(&self, angle: f64) -> Point3<f64> {
        self.plane.point_at(
            self.x_radius * angle.cos(),
            self.y_radius * angle.sin(),
        )
    }

    /// Rational quadratic form with spans of at most 90 degrees.
    pub fn to_nurbs(&self) -> Result<NurbsCurveData> {
        if self.x_radius <= 0.0 || self.y_radius <= 0.0 {
            return Err(Error::DegenerateCurve(format!(
                "arc radii {} and {}",
                self.x_radius, self.y_radius
            )));
        }
        let sweep = self.angle.length();
        if sweep <= 0.0 || sweep > TAU + 1e-12 {
            return Err(Error::DegenerateCurve(format!("arc sweep {sweep}")));
        }

        let arc = UnitArc::new(self.angle.t0, sweep.min(TAU));
        let points = arc
            .poles
            .iter()
            .zip(&arc.weights)
            .map(|(&(c, s), &w)| {
                ControlPoint::new(
                    self.plane.point_at(self.x_radius * c, self.y_radius * s),
                    w,
                )
            })
            .collect();

        Ok(NurbsCurveData {
            degree: 2,
            points,
            knots: arc.knots,
            periodic: false,
        })
    }
}

/// Rational quadratic unit circle arc in plane coordinates.
///
/// Shared by arcs and surfaces of revolution: poles are `(cos, sin)` pairs
/// of the unit circle frame, middle poles pushed out by `1 / cos(span / 2)`.
pub(crate) struct UnitArc {
    pub poles: Vec<(f64, f64)>,
    pub weights: Vec<f64>,
    /// Host convention knots
    pub knots: Vec<f64>,
}

impl UnitArc {
    pub fn new(start: f64, sweep: f64) -> Self {
        let spans = ((sweep / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
        let step = sweep / spans as f64;
        let mid_weight = (step / 2.0).cos();

        let mut poles = Vec::with_capacity(2 * spans + 1);
        let mut weights = Vec::with_capacity(2 * spans + 1);
        let mut knots = Vec::with_capacity(2 * spans + 2);

        poles.push((start.cos(), start.sin()));
        weights.push(1.0);
        knots.extend([start, start]);
        for i in 0..spans {
            let a = start + step * i as f64;
            let mid = a + step / 2.0;
            let b = a + step;
            poles.push((mid.cos() / mid_weight, mid.sin() / mid_weight));
            weights.push(mid_weight);
            poles.push((b.cos(), b.sin()));
            weights.push(1.0);
            knots.extend([b, b]);
        }

        Self {
            poles,
            weights,
            knots,
        }
    }
}

/// Weighted control point in homogeneous coordinates `(w x, w y, w z, w)`
type Homogeneous = Vector4<f64>;

/// Joins poly-curve segments into a single curve.
///
/// Each segment is split into Bezier spans, raised to the highest segment
/// degree and shifted in parameter so that it starts where the previous one
/// ends. A segment is rescaled in homogeneous space so its first weight
/// matches the weight of the joint it shares with its predecessor; this
/// leaves its shape unchanged. Segments must meet within
/// [`DEFAULT_TOLERANCE`] and have clamped knots.
pub fn join_segments(segments: &[Curve]) -> Result<NurbsCurveData> {
    let parts = segments
        .iter()
        .map(|segment| segment.to_nurbs().and_then(|data| bezier_spans(&data)))
        .collect::<Result<Vec<_>>>()?;
    let degree = parts
        .iter()
        .flat_map(|(spans, _)| spans.iter().map(|span| span.len() - 1))
        .max()
        .ok_or_else(|| Error::DegenerateCurve("poly-curve without segments".into()))?;

    let mut points: Vec<Homogeneous> = Vec::new();
    let mut breaks: Vec<f64> = Vec::new();
    for (spans, part_breaks) in parts {
        let first = spans[0][0];
        let (scale, shift) = match (points.last(), breaks.last()) {
            (Some(joint), Some(&end)) => {
                let gap = (project(joint)? - project(&first)?).norm();
                if gap > DEFAULT_TOLERANCE {
                    return Err(Error::DegenerateCurve(format!(
                        "poly-curve segments are {gap:.3e} apart"
                    )));
                }
                (joint.w / first.w, end - part_breaks[0])
            }
            _ => (1.0, 0.0),
        };

        for mut span in spans {
            while span.len() - 1 < degree {
                span = elevate(&span);
            }
            let skip = usize::from(!points.is_empty());
            points.extend(span.iter().skip(skip).map(|&h| h * scale));
        }
        let skip = usize::from(!breaks.is_empty());
        breaks.extend(part_breaks.iter().skip(skip).map(|t| t + shift));
    }

    let mut knots = Vec::with_capacity(degree * breaks.len());
    for &t in &breaks {
        knots.extend(std::iter::repeat(t).take(degree));
    }
    let points = points
        .iter()
        .map(|h| Ok(ControlPoint::new(project(h)?, h.w)))
        .collect::<Result<Vec<_>>>()?;

    Ok(NurbsCurveData {
        degree,
        points,
        knots,
        periodic: false,
    })
}

/// Bezier spans of a clamped curve with the distinct knot values bounding them.
fn bezier_spans(data: &NurbsCurveData) -> Result<(Vec<Vec<Homogeneous>>, Vec<f64>)> {
    let p = data.degree;
    let n = data.points.len();
    if p == 0 || data.periodic {
        return Err(Error::UnsupportedCurve(format!(
            "poly-curve segment of degree {p}{}",
            if data.periodic { ", periodic" } else { "" }
        )));
    }
    if n < 2 || data.knots.len() != n + p - 1 {
        return Err(Error::DegenerateCurve(format!(
            "segment with {n} points and {} knots",
            data.knots.len()
        )));
    }
    // Host knots of a clamped curve repeat each end value `degree` times
    let host = &data.knots;
    let clamped = host[..p].iter().all(|&k| k == host[0])
        && host[host.len() - p..].iter().all(|&k| k == host[host.len() - 1]);
    if !clamped || host[0] >= host[host.len() - 1] {
        return Err(Error::UnsupportedCurve(
            "poly-curve segment with unclamped knots".into(),
        ));
    }

    let mut knots = Vec::with_capacity(host.len() + 2);
    knots.push(host[0]);
    knots.extend_from_slice(host);
    knots.push(host[host.len() - 1]);
    let mut points: Vec<Homogeneous> = data
        .points
        .iter()
        .map(|cp| {
            let w = cp.weight;
            Vector4::new(cp.location.x * w, cp.location.y * w, cp.location.z * w, w)
        })
        .collect();

    let mut breaks: Vec<f64> = host.to_vec();
    breaks.dedup();
    for &u in &breaks[1..breaks.len() - 1] {
        let multiplicity = knots.iter().filter(|&&k| k == u).count();
        for _ in multiplicity..p {
            insert_knot(&mut knots, &mut points, p, u);
        }
    }

    let spans = (0..breaks.len() - 1)
        .map(|j| points[j * p..=j * p + p].to_vec())
        .collect();
    Ok((spans, breaks))
}

/// Inserts `u` once into a clamped knot vector, keeping the curve's shape.
fn insert_knot(knots: &mut Vec<f64>, points: &mut Vec<Homogeneous>, p: usize, u: f64) {
    let k = knots.iter().rposition(|&x| x <= u).unwrap_or(0);
    let s = knots[..=k].iter().rev().take_while(|&&x| x == u).count();

    let inserted = (0..=points.len())
        .map(|i| {
            if i + p <= k {
                points[i]
            } else if i + s > k {
                points[i - 1]
            } else {
                let a = (u - knots[i]) / (knots[i + p] - knots[i]);
                points[i - 1] * (1.0 - a) + points[i] * a
            }
        })
        .collect();
    *points = inserted;
    knots.insert(k + 1, u);
}

/// Raises a Bezier span by one degree.
fn elevate(span: &[Homogeneous]) -> Vec<Homogeneous> {
    let p = span.len() - 1;
    let mut raised = Vec::with_capacity(span.len() + 1);
    raised.push(span[0]);
    for i in 1..=p {
        let a = i as f64 / (p + 1) as f64;
        raised.push(span[i - 1] * a + span[i] * (1.0 - a));
    }
    raised.push(span[p]);
    raised
}

fn project(h: &Homogeneous) -> Result<Point3<f64>> {
    if h.w <= 0.0 {
        return Err(Error::DegenerateCurve(format!("control point weight {}", h.w)));
    }
    Ok(Point3::new(h.x / h.w, h.y / h.w, h.z / h.w))
}

/// Unit vector of `v`, or `None` when it has no usable length
pub(crate) fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let n = v.norm();
    (n > f64::EPSILON).then(|| v / n)
}
