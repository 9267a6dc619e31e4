// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TopoBridge Geometry
//!
//! Converts host geometry (points, lines, curves, surfaces, breps, boxes and
//! meshes) into boundary-representation topology built in a
//! [`TopologyArena`].
//!
//! ```text
//! Geometry ─► GeometryRouter ─┬─► CurveProcessor    ─► Edge | Wire
//!                             ├─► SurfaceProcessor  ─► Face (untrimmed)
//!                             ├─► BrepProcessor     ─► Face | Shell | Cell
//!                             └─► MeshProcessor     ─► Face | Shell | Cell | Cluster
//! ```
//!
//! Host NURBS data keeps each end knot once. The curve and surface
//! processors are the only places where it is turned into kernel knots.

pub mod brep;
pub mod curve;
pub mod error;
pub mod mesh;
pub mod model;
pub mod options;
pub mod processors;
pub mod router;
pub mod surface;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use brep::{BoxGeometry, Brep, BrepFace, BrepLoop, BrepTrim};
pub use curve::{Arc, ControlPoint, Curve, NurbsCurveData};
pub use error::{Error, Result};
pub use mesh::{Mesh, MeshFace};
pub use model::{Geometry, Interval, Line, Plane};
pub use options::{ConvertOptions, DEFAULT_TOLERANCE};
pub use processors::{BrepProcessor, CurveProcessor, MeshProcessor, SurfaceProcessor};
pub use router::{topology_by_geometry, GeometryProcessor, GeometryRouter};
pub use surface::{NurbsSurfaceData, Surface};
pub use topobridge_topology::{TopologyArena, TopologyKey};
