// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # TopoBridge Topology
//!
//! Boundary-representation topology kernel used by the geometry conversion
//! pipeline in `topobridge-geometry`.
//!
//! Entities (vertices, edges, wires, faces, shells, cells, clusters) are stored
//! in slot maps owned by a [`TopologyArena`], with upward adjacency indices.
//! Edges carry either a straight segment or a NURBS curve, faces either a flat
//! polygon or a NURBS surface. On top of the plain constructors the arena
//! offers the higher-level primitives a conversion pipeline needs: wires from
//! unordered edges, trimming, index-based construction, tolerance-based
//! sewing, and cluster self-merge.

pub mod arena;
pub mod builders;
pub mod construction;
pub mod error;
pub mod keys;
pub mod merge;
pub mod nurbs;
pub mod spatial;
pub mod traversal;

pub use arena::{EdgeCurve, FaceSurface, TopologyArena};
pub use error::{Error, Result};
pub use keys::{
    CellKey, ClusterKey, EdgeKey, FaceKey, ShellKey, TopologyKey, TopologyType, VertexKey,
    WireKey,
};
pub use nurbs::{KnotVector, NurbsCurve, NurbsSurface};

/// Distance below which two points are the same location for the kernel.
pub const LINEAR_PRECISION: f64 = 1e-7;
