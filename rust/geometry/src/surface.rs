// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host surface kinds and their NURBS forms
//!
//! Every kind is reduced to a [`NurbsSurfaceData`] in host knot convention.
//! Control grids are row-major with `u` outer and `v` inner.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::curve::{unit, ControlPoint, Curve, NurbsCurveData, UnitArc};
use crate::error::{Error, Result};
use crate::model::{Interval, Plane};

/// Parametric surface as handed over by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    /// `S(u, v) = A(u) + B(v) - B(v0)`
    Sum { a: Curve, b: Curve },
    /// Profile swept around an axis
    Revolution {
        profile: Curve,
        axis_origin: Point3<f64>,
        axis_direction: Vector3<f64>,
        angle: Interval,
    },
    /// Rectangular patch of a plane
    Plane { plane: Plane, x: Interval, y: Interval },
    /// Profile swept along a straight direction
    Extrusion {
        profile: Curve,
        direction: Vector3<f64>,
    },
    Nurbs(NurbsSurfaceData),
    /// A host kind with no conversion rule
    Other(String),
}

impl Surface {
    pub fn kind(&self) -> &str {
        match self {
            Surface::Sum { .. } => "Sum",
            Surface::Revolution { .. } => "Revolution",
            Surface::Plane { .. } => "Plane",
            Surface::Extrusion { .. } => "Extrusion",
            Surface::Nurbs(_) => "Nurbs",
            Surface::Other(kind) => kind,
        }
    }

    /// Host NURBS form of the surface
    pub fn to_nurbs(&self) -> Result<NurbsSurfaceData> {
        match self {
            Surface::Sum { a, b } => sum_surface(a, b),
            Surface::Revolution {
                profile,
                axis_origin,
                axis_direction,
                angle,
            } => revolution(profile, axis_origin, axis_direction, angle),
            Surface::Plane { plane, x, y } => Ok(plane_patch(plane, x, y)),
            Surface::Extrusion { profile, direction } => extrusion(profile, direction),
            Surface::Nurbs(data) => Ok(data.clone()),
            Surface::Other(kind) => Err(Error::UnsupportedSurface(kind.clone())),
        }
    }
}

/// NURBS surface parameters in host knot convention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsSurfaceData {
    pub u_degree: usize,
    pub v_degree: usize,
    /// `points[u][v]`
    pub points: Vec<Vec<ControlPoint>>,
    pub u_knots: Vec<f64>,
    pub v_knots: Vec<f64>,
    #[serde(default)]
    pub u_periodic: bool,
    #[serde(default)]
    pub v_periodic: bool,
}

impl NurbsSurfaceData {
    pub fn is_rational(&self) -> bool {
        self.points
            .iter()
            .flatten()
            .any(|p| (p.weight - 1.0).abs() > f64::EPSILON)
    }
}

fn sum_surface(a: &Curve, b: &Curve) -> Result<NurbsSurfaceData> {
    let a = a.to_nurbs()?;
    let b = b.to_nurbs()?;
    // The pole-wise sum only reproduces A(u) + B(v) for polynomial curves
    if a.is_rational() || b.is_rational() {
        return Err(Error::UnsupportedSurface(
            "sum surface with rational curves".into(),
        ));
    }
    let base = b
        .points
        .first()
        .map(|p| p.location.coords)
        .ok_or_else(|| Error::DegenerateCurve("sum surface curve has no points".into()))?;

    let points = a
        .points
        .iter()
        .map(|pa| {
            b.points
                .iter()
                .map(|pb| ControlPoint::unweighted(pa.location + (pb.location.coords - base)))
                .collect()
        })
        .collect();

    Ok(NurbsSurfaceData {
        u_degree: a.degree,
        v_degree: b.degree,
        points,
        u_knots: a.knots,
        v_knots: b.knots,
        u_periodic: a.periodic,
        v_periodic: b.periodic,
    })
}

/// Angular direction is `u`, the profile runs along `v`.
fn revolution(
    profile: &Curve,
    axis_origin: &Point3<f64>,
    axis_direction: &Vector3<f64>,
    angle: &Interval,
) -> Result<NurbsSurfaceData> {
    let axis = unit(axis_direction)
        .ok_or_else(|| Error::UnsupportedSurface("revolution axis has zero length".into()))?;
    let sweep = angle.length();
    if sweep <= 0.0 {
        return Err(Error::UnsupportedSurface(format!("revolution sweep {sweep}")));
    }
    let profile: NurbsCurveData = profile.to_nurbs()?;
    let arc = UnitArc::new(angle.t0, sweep.min(std::f64::consts::TAU));

    let points = arc
        .poles
        .iter()
        .zip(&arc.weights)
        .map(|(&(c, s), &wa)| {
            profile
                .points
                .iter()
                .map(|p| {
                    let offset = p.location - axis_origin;
                    let foot = axis_origin + axis * offset.dot(&axis);
                    let radial = p.location - foot;
                    let tangent = axis.cross(&radial);
                    ControlPoint::new(foot + radial * c + tangent * s, wa * p.weight)
                })
                .collect()
        })
        .collect();

    Ok(NurbsSurfaceData {
        u_degree: 2,
        v_degree: profile.degree,
        points,
        u_knots: arc.knots,
        v_knots: profile.knots,
        u_periodic: false,
        v_periodic: profile.periodic,
    })
}

fn plane_patch(plane: &Plane, x: &Interval, y: &Interval) -> NurbsSurfaceData {
    let points = [x.t0, x.t1]
        .iter()
        .map(|&u| {
            [y.t0, y.t1]
                .iter()
                .map(|&v| ControlPoint::unweighted(plane.point_at(u, v)))
                .collect()
        })
        .collect();

    NurbsSurfaceData {
        u_degree: 1,
        v_degree: 1,
        points,
        u_knots: vec![x.t0, x.t1],
        v_knots: vec![y.t0, y.t1],
        u_periodic: false,
        v_periodic: false,
    }
}

/// Profile along `u`, straight path along `v`.
fn extrusion(profile: &Curve, direction: &Vector3<f64>) -> Result<NurbsSurfaceData> {
    let length = direction.norm();
    if length <= f64::EPSILON {
        return Err(Error::UnsupportedSurface(
            "extrusion direction has zero length".into(),
        ));
    }
    let profile = profile.to_nurbs()?;

    let points = profile
        .points
        .iter()
        .map(|p| {
            vec![
                *p,
                ControlPoint::new(p.location + direction, p.weight),
            ]
        })
        .collect();

    Ok(NurbsSurfaceData {
        u_degree: profile.degree,
        v_degree: 1,
        points,
        u_knots: profile.knots,
        v_knots: vec![0.0, length],
        u_periodic: profile.periodic,
        v_periodic: false,
    })
}
