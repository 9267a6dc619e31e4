// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology operations.

use crate::keys::TopologyKey;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during topology operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced topology entity was not found in the arena.
    #[error("topology entity not found: {0:?}")]
    NotFound(TopologyKey),

    /// Edges in a wire are not connected end-to-end.
    #[error("wire edges are not connected: edge {0} endpoint does not match edge {1} startpoint")]
    DisconnectedWire(usize, usize),

    /// Some edges could not be chained onto the wire by endpoint location.
    #[error("{0} edges could not be connected to the wire")]
    UnconnectedEdges(usize),

    /// A wire must have at least one edge.
    #[error("wire must have at least one edge")]
    EmptyWire,

    /// A boundary wire does not end where it starts.
    #[error("boundary wire is not closed")]
    OpenWire,

    /// A polygonal outer wire needs at least 3 edges.
    #[error("face outer wire has fewer than 3 edges")]
    DegenerateFace,

    /// A trimming wire does not lie on the surface it trims.
    #[error("trimming wire lies {0:.3e} away from the surface")]
    BoundaryOffSurface(f64),

    /// A shell must have at least one face.
    #[error("shell must have at least one face")]
    EmptyShell,

    /// The shell is not closed: some edges are not shared by exactly two faces.
    #[error("shell is not closed: {0} edges are not shared by exactly two faces")]
    OpenShell(usize),

    /// A cluster must have at least one member to be merged.
    #[error("cluster has no members")]
    EmptyCluster,

    /// NURBS parameters violate a structural invariant.
    #[error("invalid NURBS parameters: {0}")]
    InvalidNurbs(String),

    /// An index list refers past the end of the vertex list.
    #[error("vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    /// Vertex key not found in the arena.
    #[error("vertex not found: {0:?}")]
    VertexNotFound(crate::keys::VertexKey),

    /// Edge key not found in the arena.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(crate::keys::EdgeKey),

    /// Wire key not found in the arena.
    #[error("wire not found: {0:?}")]
    WireNotFound(crate::keys::WireKey),

    /// Face key not found in the arena.
    #[error("face not found: {0:?}")]
    FaceNotFound(crate::keys::FaceKey),

    /// Shell key not found in the arena.
    #[error("shell not found: {0:?}")]
    ShellNotFound(crate::keys::ShellKey),

    /// Cluster key not found in the arena.
    #[error("cluster not found: {0:?}")]
    ClusterNotFound(crate::keys::ClusterKey),
}
