// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology key types for arena-based storage.
//!
//! Each topology entity gets a unique, type-safe key for O(1) lookup in the
//! arena. Keys are created by `slotmap::SlotMap` and remain valid even after
//! other entities are removed (generational indices).

use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (line segment or NURBS curve between two vertices).
    pub struct EdgeKey;

    /// Key for a wire (ordered chain of connected edges).
    pub struct WireKey;

    /// Key for a face (surface bounded by wires).
    pub struct FaceKey;

    /// Key for a shell (connected set of faces).
    pub struct ShellKey;

    /// Key for a cell (closed volume bounded by a shell).
    pub struct CellKey;

    /// Key for a cluster (unordered aggregate of any topologies).
    pub struct ClusterKey;
}

/// A key that can reference any topology entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKey {
    Vertex(VertexKey),
    Edge(EdgeKey),
    Wire(WireKey),
    Face(FaceKey),
    Shell(ShellKey),
    Cell(CellKey),
    Cluster(ClusterKey),
}

impl TopologyKey {
    /// Returns the topology type of this key.
    pub fn topology_type(&self) -> TopologyType {
        match self {
            TopologyKey::Vertex(_) => TopologyType::Vertex,
            TopologyKey::Edge(_) => TopologyType::Edge,
            TopologyKey::Wire(_) => TopologyType::Wire,
            TopologyKey::Face(_) => TopologyType::Face,
            TopologyKey::Shell(_) => TopologyType::Shell,
            TopologyKey::Cell(_) => TopologyType::Cell,
            TopologyKey::Cluster(_) => TopologyType::Cluster,
        }
    }

    pub fn as_vertex(&self) -> Option<VertexKey> {
        match *self {
            TopologyKey::Vertex(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<EdgeKey> {
        match *self {
            TopologyKey::Edge(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> Option<WireKey> {
        match *self {
            TopologyKey::Wire(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_face(&self) -> Option<FaceKey> {
        match *self {
            TopologyKey::Face(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_shell(&self) -> Option<ShellKey> {
        match *self {
            TopologyKey::Shell(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_cell(&self) -> Option<CellKey> {
        match *self {
            TopologyKey::Cell(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_cluster(&self) -> Option<ClusterKey> {
        match *self {
            TopologyKey::Cluster(k) => Some(k),
            _ => None,
        }
    }
}

/// Discriminant for topology entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TopologyType {
    Vertex = 0,
    Edge = 1,
    Wire = 2,
    Face = 3,
    Shell = 4,
    Cell = 5,
    Cluster = 6,
}

impl TopologyType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyType::Vertex => "Vertex",
            TopologyType::Edge => "Edge",
            TopologyType::Wire => "Wire",
            TopologyType::Face => "Face",
            TopologyType::Shell => "Shell",
            TopologyType::Cell => "Cell",
            TopologyType::Cluster => "Cluster",
        }
    }
}

impl std::fmt::Display for TopologyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Conversion impls from specific keys to TopologyKey
impl From<VertexKey> for TopologyKey {
    fn from(k: VertexKey) -> Self {
        TopologyKey::Vertex(k)
    }
}

impl From<EdgeKey> for TopologyKey {
    fn from(k: EdgeKey) -> Self {
        TopologyKey::Edge(k)
    }
}

impl From<WireKey> for TopologyKey {
    fn from(k: WireKey) -> Self {
        TopologyKey::Wire(k)
    }
}

impl From<FaceKey> for TopologyKey {
    fn from(k: FaceKey) -> Self {
        TopologyKey::Face(k)
    }
}

impl From<ShellKey> for TopologyKey {
    fn from(k: ShellKey) -> Self {
        TopologyKey::Shell(k)
    }
}

impl From<CellKey> for TopologyKey {
    fn from(k: CellKey) -> Self {
        TopologyKey::Cell(k)
    }
}

impl From<ClusterKey> for TopologyKey {
    fn from(k: ClusterKey) -> Self {
        TopologyKey::Cluster(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_type_ordering() {
        assert!(TopologyType::Vertex < TopologyType::Edge);
        assert!(TopologyType::Edge < TopologyType::Wire);
        assert!(TopologyType::Wire < TopologyType::Face);
        assert!(TopologyType::Face < TopologyType::Shell);
        assert!(TopologyType::Shell < TopologyType::Cell);
        assert!(TopologyType::Cell < TopologyType::Cluster);
    }

    #[test]
    fn key_accessors_discriminate() {
        let mut vertices: slotmap::SlotMap<VertexKey, ()> = slotmap::SlotMap::with_key();
        let vk = vertices.insert(());
        let key = TopologyKey::from(vk);

        assert_eq!(key.topology_type(), TopologyType::Vertex);
        assert_eq!(key.as_vertex(), Some(vk));
        assert!(key.as_face().is_none());
        assert_eq!(key.topology_type().to_string(), "Vertex");
    }
}
