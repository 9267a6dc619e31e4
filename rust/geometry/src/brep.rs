// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary representations and boxes

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::model::{Interval, Line, Plane};
use crate::surface::Surface;

/// Multi-face boundary representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brep {
    pub faces: Vec<BrepFace>,
    /// Whether the host knows the faces to enclose a volume
    #[serde(default)]
    pub is_solid: bool,
}

/// Surface patch bounded by trimming loops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrepFace {
    pub surface: Surface,
    pub loops: Vec<BrepLoop>,
    /// Index into `loops` of the outer boundary
    #[serde(default)]
    pub outer_loop: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrepLoop {
    pub trims: Vec<BrepTrim>,
}

/// Trimming segment of a loop
///
/// `edge` is the 3D curve backing the segment; malformed host data may
/// leave it out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrepTrim {
    #[serde(default)]
    pub edge: Option<Curve>,
}

impl BrepTrim {
    pub fn new(edge: Curve) -> Self {
        Self { edge: Some(edge) }
    }

    pub fn missing() -> Self {
        Self { edge: None }
    }
}

/// Box spanned by three intervals in a plane frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub plane: Plane,
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl BoxGeometry {
    pub fn new(plane: Plane, x: Interval, y: Interval, z: Interval) -> Self {
        Self { plane, x, y, z }
    }

    /// Six planar faces, each trimmed by its four box edges.
    pub fn to_brep(&self) -> Result<Brep> {
        for (axis, interval) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if interval.length().abs() <= f64::EPSILON {
                return Err(Error::DegenerateBoundary(format!(
                    "box has no extent along {axis}"
                )));
            }
        }

        let normal = self.plane.normal();
        let corner = |i: usize, j: usize, k: usize| {
            let x = if i == 0 { self.x.t0 } else { self.x.t1 };
            let y = if j == 0 { self.y.t0 } else { self.y.t1 };
            let z = if k == 0 { self.z.t0 } else { self.z.t1 };
            self.plane.point_at(x, y) + normal * z
        };

        // Corner index triples per face, each listed as a ring
        let rings: [[(usize, usize, usize); 4]; 6] = [
            [(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 0, 0)],
            [(0, 0, 1), (1, 0, 1), (1, 1, 1), (0, 1, 1)],
            [(0, 0, 0), (1, 0, 0), (1, 0, 1), (0, 0, 1)],
            [(1, 0, 0), (1, 1, 0), (1, 1, 1), (1, 0, 1)],
            [(1, 1, 0), (0, 1, 0), (0, 1, 1), (1, 1, 1)],
            [(0, 1, 0), (0, 0, 0), (0, 0, 1), (0, 1, 1)],
        ];

        let faces = rings
            .iter()
            .map(|ring| {
                let points = ring.map(|(i, j, k)| corner(i, j, k));
                let x_axis = points[1] - points[0];
                let y_axis = points[3] - points[0];
                let trims = (0..4)
                    .map(|n| {
                        BrepTrim::new(Curve::Line(Line::new(points[n], points[(n + 1) % 4])))
                    })
                    .collect();
                BrepFace {
                    surface: Surface::Plane {
                        plane: Plane::new(points[0], x_axis, y_axis),
                        x: Interval::new(0.0, 1.0),
                        y: Interval::new(0.0, 1.0),
                    },
                    loops: vec![BrepLoop { trims }],
                    outer_loop: 0,
                }
            })
            .collect();

        Ok(Brep {
            faces,
            is_solid: true,
        })
    }
}
