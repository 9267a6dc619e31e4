// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host geometry model
//!
//! Owned, serializable stand-ins for the objects a host authoring
//! environment hands to the converter. Every kind the router knows how to
//! convert has its own variant; anything else arrives as `Other` carrying
//! the host's type name so it can be reported.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::brep::{BoxGeometry, Brep};
use crate::curve::Curve;
use crate::mesh::Mesh;
use crate::surface::Surface;

/// Any geometric object accepted by [`GeometryRouter::convert`](crate::GeometryRouter::convert)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point3<f64>),
    Line(Line),
    Curve(Curve),
    Surface(Surface),
    Brep(Brep),
    Box(BoxGeometry),
    Mesh(Mesh),
    /// A host kind with no conversion rule
    Other(String),
}

impl Geometry {
    /// Short name of the geometry kind, used in logs and errors
    pub fn kind(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Line(_) => "Line",
            Geometry::Curve(_) => "Curve",
            Geometry::Surface(_) => "Surface",
            Geometry::Brep(_) => "Brep",
            Geometry::Box(_) => "Box",
            Geometry::Mesh(_) => "Mesh",
            Geometry::Other(kind) => kind,
        }
    }
}

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point3<f64>,
    pub to: Point3<f64>,
}

impl Line {
    pub fn new(from: Point3<f64>, to: Point3<f64>) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        (self.to - self.from).norm()
    }
}

/// Oriented plane with an in-plane frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
}

impl Plane {
    pub fn new(origin: Point3<f64>, x_axis: Vector3<f64>, y_axis: Vector3<f64>) -> Self {
        Self {
            origin,
            x_axis,
            y_axis,
        }
    }

    /// World XY plane at the origin
    pub fn world_xy() -> Self {
        Self::new(Point3::origin(), Vector3::x(), Vector3::y())
    }

    /// Point at plane coordinates `(u, v)`
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        self.origin + self.x_axis * u + self.y_axis * v
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.x_axis.cross(&self.y_axis)
    }
}

/// Closed parameter or coordinate range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub t0: f64,
    pub t1: f64,
}

impl Interval {
    pub fn new(t0: f64, t1: f64) -> Self {
        Self { t0, t1 }
    }

    pub fn length(&self) -> f64 {
        self.t1 - self.t0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plane_point_and_normal() {
        let plane = Plane::new(Point3::new(1.0, 2.0, 3.0), Vector3::y(), Vector3::z());
        let p = plane.point_at(2.0, -1.0);
        assert_relative_eq!(p, Point3::new(1.0, 4.0, 2.0));
        assert_relative_eq!(plane.normal(), Vector3::x());
    }

    #[test]
    fn other_kind_keeps_host_name() {
        assert_eq!(Geometry::Other("PointCloud".into()).kind(), "PointCloud");
        assert_eq!(Geometry::Point(Point3::origin()).kind(), "Point");
    }
}
