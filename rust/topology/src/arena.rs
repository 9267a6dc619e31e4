// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for boundary-representation topology entities.
//!
//! The [`TopologyArena`] is the central owner of all topology data. Every entity
//! (vertex, edge, wire, face, shell, cell, cluster) lives inside slot maps
//! with stable, generational keys. Upward adjacency indices record which
//! parents use each child, so queries can walk from a vertex to the edges
//! and faces that reference it.
//!
//! Entities are never edited after insertion. Operations that need a changed
//! entity (trimming, sewing, fusing endpoints) insert a new one and leave the
//! original untouched.

use nalgebra::Point3;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::keys::*;
use crate::nurbs::{NurbsCurve, NurbsSurface};

/// Data stored for a vertex: a point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Geometry carried by an edge between its two vertices.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeCurve {
    /// Straight segment from start to end vertex.
    Line,
    /// Free-form curve; its domain ends coincide with the edge vertices.
    Nurbs(NurbsCurve),
}

/// Data stored for an edge.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
    pub curve: EdgeCurve,
}

/// Data stored for a wire: an ordered chain of connected edges.
#[derive(Debug, Clone)]
pub struct WireData {
    /// Edges in order. Each edge's end vertex must equal the next edge's start
    /// vertex (or the reverse, tracked by `orientations`).
    pub edges: Vec<EdgeKey>,
    /// `true` if edge[i] is traversed forward (start→end), `false` if reversed.
    pub orientations: Vec<bool>,
}

/// The surface a face lies on.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceSurface {
    /// Flat polygon spanned by its outer wire.
    Polygon,
    /// Free-form surface; wires bound a region of it.
    Nurbs(NurbsSurface),
}

/// Data stored for a face: a surface region bounded by one outer wire and
/// zero or more inner wires (holes).
#[derive(Debug, Clone)]
pub struct FaceData {
    pub outer_wire: WireKey,
    pub inner_wires: Vec<WireKey>,
    pub surface: FaceSurface,
}

/// Data stored for a shell: a connected surface made of faces.
#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceKey>,
}

/// Data stored for a cell: a closed 3D volume bounded by a shell.
#[derive(Debug, Clone)]
pub struct CellData {
    pub shell: ShellKey,
}

/// Data stored for a cluster: an unordered aggregate of any topologies.
#[derive(Debug, Clone)]
pub struct ClusterData {
    pub members: Vec<TopologyKey>,
}

/// The central arena that owns all topology entities and their adjacency indices.
///
/// # Example
///
/// ```
/// use topobridge_topology::TopologyArena;
///
/// let mut arena = TopologyArena::new();
/// let v0 = arena.add_vertex(0.0, 0.0, 0.0);
/// let v1 = arena.add_vertex(1.0, 0.0, 0.0);
/// let edge = arena.add_edge(v0, v1).unwrap();
///
/// assert_eq!(arena.edge_vertices(edge), Some((v0, v1)));
/// ```
#[derive(Debug)]
pub struct TopologyArena {
    // Entity storage
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) wires: SlotMap<WireKey, WireData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) shells: SlotMap<ShellKey, ShellData>,
    pub(crate) cells: SlotMap<CellKey, CellData>,
    pub(crate) clusters: SlotMap<ClusterKey, ClusterData>,

    // Upward adjacency: child → parents
    pub(crate) vertex_to_edges: FxHashMap<VertexKey, FxHashSet<EdgeKey>>,
    pub(crate) edge_to_wires: FxHashMap<EdgeKey, FxHashSet<WireKey>>,
    pub(crate) wire_to_faces: FxHashMap<WireKey, FxHashSet<FaceKey>>,
    pub(crate) face_to_shells: FxHashMap<FaceKey, FxHashSet<ShellKey>>,
    pub(crate) shell_to_cells: FxHashMap<ShellKey, FxHashSet<CellKey>>,
}

impl TopologyArena {
    /// Creates a new, empty topology arena.
    pub fn new() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            wires: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            shells: SlotMap::with_key(),
            cells: SlotMap::with_key(),
            clusters: SlotMap::with_key(),

            vertex_to_edges: FxHashMap::default(),
            edge_to_wires: FxHashMap::default(),
            wire_to_faces: FxHashMap::default(),
            face_to_shells: FxHashMap::default(),
            shell_to_cells: FxHashMap::default(),
        }
    }

    // --- Vertex operations ---

    /// Adds a vertex at the given 3D coordinates.
    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        self.vertices.insert(VertexData { x, y, z })
    }

    /// Adds a vertex at a nalgebra point.
    pub fn add_vertex_at(&mut self, point: &Point3<f64>) -> VertexKey {
        self.add_vertex(point.x, point.y, point.z)
    }

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Returns the number of vertices in the arena.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the coordinates of a vertex as `[x, y, z]`.
    pub fn vertex_coords(&self, key: VertexKey) -> Option<[f64; 3]> {
        self.vertices.get(key).map(|v| [v.x, v.y, v.z])
    }

    /// Returns the 3D position of a vertex as a nalgebra Point3.
    pub fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices
            .get(key)
            .map(|v| Point3::new(v.x, v.y, v.z))
    }

    // --- Edge operations ---

    /// Returns the edge data for the given key, or `None` if not found.
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Returns the number of edges in the arena.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the NURBS curve of an edge, or `None` for straight edges.
    pub fn edge_nurbs(&self, key: EdgeKey) -> Option<&NurbsCurve> {
        match &self.edges.get(key)?.curve {
            EdgeCurve::Nurbs(curve) => Some(curve),
            EdgeCurve::Line => None,
        }
    }

    /// Evaluates an edge at a fraction of its length parameter, following
    /// the edge's own direction.
    pub fn edge_point_at(&self, key: EdgeKey, fraction: f64) -> Option<Point3<f64>> {
        let edge = self.edges.get(key)?;
        match &edge.curve {
            EdgeCurve::Line => {
                let p0 = self.vertex_point(edge.start)?;
                let p1 = self.vertex_point(edge.end)?;
                Some(p0 + (p1 - p0) * fraction)
            }
            EdgeCurve::Nurbs(curve) => Some(curve.point_at_fraction(fraction)),
        }
    }

    // --- Wire operations ---

    /// Returns the wire data for the given key, or `None` if not found.
    pub fn wire(&self, key: WireKey) -> Option<&WireData> {
        self.wires.get(key)
    }

    /// Returns the number of wires in the arena.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    // --- Face operations ---

    /// Returns the face data for the given key, or `None` if not found.
    pub fn face(&self, key: FaceKey) -> Option<&FaceData> {
        self.faces.get(key)
    }

    /// Returns the number of faces in the arena.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // --- Shell operations ---

    /// Returns the shell data for the given key, or `None` if not found.
    pub fn shell(&self, key: ShellKey) -> Option<&ShellData> {
        self.shells.get(key)
    }

    /// Returns the number of shells in the arena.
    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    // --- Cell operations ---

    /// Returns the cell data for the given key, or `None` if not found.
    pub fn cell(&self, key: CellKey) -> Option<&CellData> {
        self.cells.get(key)
    }

    /// Returns the number of cells in the arena.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    // --- Cluster operations ---

    /// Returns the cluster data for the given key, or `None` if not found.
    pub fn cluster(&self, key: ClusterKey) -> Option<&ClusterData> {
        self.clusters.get(key)
    }

    /// Returns the number of clusters in the arena.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    // --- Entity existence checks ---

    /// Returns `true` if the given topology key references a valid entity.
    pub fn contains(&self, key: TopologyKey) -> bool {
        match key {
            TopologyKey::Vertex(k) => self.vertices.contains_key(k),
            TopologyKey::Edge(k) => self.edges.contains_key(k),
            TopologyKey::Wire(k) => self.wires.contains_key(k),
            TopologyKey::Face(k) => self.faces.contains_key(k),
            TopologyKey::Shell(k) => self.shells.contains_key(k),
            TopologyKey::Cell(k) => self.cells.contains_key(k),
            TopologyKey::Cluster(k) => self.clusters.contains_key(k),
        }
    }

    // --- Adjacency index helpers ---

    /// Register that an edge uses a vertex (upward adjacency).
    pub(crate) fn link_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        self.vertex_to_edges
            .entry(vertex)
            .or_default()
            .insert(edge);
    }

    /// Register that a wire uses an edge (upward adjacency).
    pub(crate) fn link_edge_wire(&mut self, edge: EdgeKey, wire: WireKey) {
        self.edge_to_wires.entry(edge).or_default().insert(wire);
    }

    /// Register that a face uses a wire (upward adjacency).
    pub(crate) fn link_wire_face(&mut self, wire: WireKey, face: FaceKey) {
        self.wire_to_faces.entry(wire).or_default().insert(face);
    }

    /// Register that a shell uses a face (upward adjacency).
    pub(crate) fn link_face_shell(&mut self, face: FaceKey, shell: ShellKey) {
        self.face_to_shells.entry(face).or_default().insert(shell);
    }

    /// Register that a cell uses a shell (upward adjacency).
    pub(crate) fn link_shell_cell(&mut self, shell: ShellKey, cell: CellKey) {
        self.shell_to_cells.entry(shell).or_default().insert(cell);
    }
}

impl Default for TopologyArena {
    fn default() -> Self {
        Self::new()
    }
}
