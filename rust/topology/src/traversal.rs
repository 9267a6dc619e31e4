// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal methods for navigating the topology hierarchy.
//!
//! Supports both downward traversal (cluster → cells → faces → edges → vertices)
//! and upward traversal (vertex → edges → wires → faces → shells → cells) via
//! the adjacency index.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::TopologyArena;
use crate::keys::*;

// =============================================================================
// Downward traversal: extract sub-topologies
// =============================================================================

impl TopologyArena {
    /// Returns the start and end vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the vertex keys of a wire in traversal order, one per edge.
    ///
    /// For an open wire the final end vertex is appended as well.
    pub fn wire_vertices_ordered(&self, key: WireKey) -> Option<Vec<VertexKey>> {
        let wire = self.wires.get(key)?;
        let mut vertices = Vec::with_capacity(wire.edges.len() + 1);

        for (i, &ek) in wire.edges.iter().enumerate() {
            let edge = self.edges.get(ek)?;
            let start = if wire.orientations[i] {
                edge.start
            } else {
                edge.end
            };
            vertices.push(start);
        }

        if !self.wire_is_closed(key) {
            vertices.push(self.wire_end(key)?);
        }

        Some(vertices)
    }

    /// Returns all unique vertex keys referenced by a wire.
    pub fn wire_vertices(&self, key: WireKey) -> Option<FxHashSet<VertexKey>> {
        let wire = self.wires.get(key)?;
        let mut set = FxHashSet::default();
        for &ek in &wire.edges {
            let edge = self.edges.get(ek)?;
            set.insert(edge.start);
            set.insert(edge.end);
        }
        Some(set)
    }

    /// Returns the edge keys of a wire.
    pub fn wire_edges(&self, key: WireKey) -> Option<&[EdgeKey]> {
        self.wires.get(key).map(|w| w.edges.as_slice())
    }

    /// First vertex of a wire, respecting the first edge's orientation.
    pub fn wire_start(&self, key: WireKey) -> Option<VertexKey> {
        let wire = self.wires.get(key)?;
        let edge = self.edges.get(*wire.edges.first()?)?;
        Some(if wire.orientations[0] {
            edge.start
        } else {
            edge.end
        })
    }

    /// Last vertex of a wire, respecting the last edge's orientation.
    pub fn wire_end(&self, key: WireKey) -> Option<VertexKey> {
        let wire = self.wires.get(key)?;
        let edge = self.edges.get(*wire.edges.last()?)?;
        Some(if *wire.orientations.last()? {
            edge.end
        } else {
            edge.start
        })
    }

    /// Returns all unique vertex keys in a face.
    pub fn face_vertices(&self, key: FaceKey) -> Option<FxHashSet<VertexKey>> {
        let face = self.faces.get(key)?;
        let mut set = self.wire_vertices(face.outer_wire)?;
        for &iw in &face.inner_wires {
            if let Some(verts) = self.wire_vertices(iw) {
                set.extend(verts);
            }
        }
        Some(set)
    }

    /// Returns all unique edge keys in a face.
    pub fn face_edges(&self, key: FaceKey) -> Option<FxHashSet<EdgeKey>> {
        let face = self.faces.get(key)?;
        let mut set = FxHashSet::default();
        for wk in std::iter::once(face.outer_wire).chain(face.inner_wires.iter().copied()) {
            if let Some(wire) = self.wires.get(wk) {
                set.extend(&wire.edges);
            }
        }
        Some(set)
    }

    /// Returns the outer wire of a face.
    pub fn face_outer_wire(&self, key: FaceKey) -> Option<WireKey> {
        self.faces.get(key).map(|f| f.outer_wire)
    }

    /// Returns the inner (hole) wires of a face.
    pub fn face_inner_wires(&self, key: FaceKey) -> Option<&[WireKey]> {
        self.faces.get(key).map(|f| f.inner_wires.as_slice())
    }

    /// Returns the face keys of a shell.
    pub fn shell_faces(&self, key: ShellKey) -> Option<&[FaceKey]> {
        self.shells.get(key).map(|s| s.faces.as_slice())
    }

    /// Returns all unique edge keys in a shell.
    pub fn shell_edges(&self, key: ShellKey) -> Option<FxHashSet<EdgeKey>> {
        let shell = self.shells.get(key)?;
        let mut set = FxHashSet::default();
        for &fk in &shell.faces {
            if let Some(edges) = self.face_edges(fk) {
                set.extend(edges);
            }
        }
        Some(set)
    }

    /// Returns all unique vertex keys in a shell.
    pub fn shell_vertices(&self, key: ShellKey) -> Option<FxHashSet<VertexKey>> {
        let shell = self.shells.get(key)?;
        let mut set = FxHashSet::default();
        for &fk in &shell.faces {
            if let Some(verts) = self.face_vertices(fk) {
                set.extend(verts);
            }
        }
        Some(set)
    }

    /// Returns the bounding shell of a cell.
    pub fn cell_shell(&self, key: CellKey) -> Option<ShellKey> {
        self.cells.get(key).map(|c| c.shell)
    }

    /// Returns all face keys of a cell.
    pub fn cell_faces(&self, key: CellKey) -> Option<&[FaceKey]> {
        self.shell_faces(self.cell_shell(key)?)
    }

    /// Returns all unique vertex keys in a cell.
    pub fn cell_vertices(&self, key: CellKey) -> Option<FxHashSet<VertexKey>> {
        self.shell_vertices(self.cell_shell(key)?)
    }

    /// Returns the direct members of a cluster.
    pub fn cluster_members(&self, key: ClusterKey) -> Option<&[TopologyKey]> {
        self.clusters.get(key).map(|c| c.members.as_slice())
    }

    /// Returns all unique vertex keys under any topology, recursing through
    /// nested clusters.
    pub fn topology_vertices(&self, key: TopologyKey) -> Option<FxHashSet<VertexKey>> {
        match key {
            TopologyKey::Vertex(v) => {
                self.vertices.get(v)?;
                Some(std::iter::once(v).collect())
            }
            TopologyKey::Edge(e) => {
                let (start, end) = self.edge_vertices(e)?;
                Some([start, end].into_iter().collect())
            }
            TopologyKey::Wire(w) => self.wire_vertices(w),
            TopologyKey::Face(f) => self.face_vertices(f),
            TopologyKey::Shell(s) => self.shell_vertices(s),
            TopologyKey::Cell(c) => self.cell_vertices(c),
            TopologyKey::Cluster(c) => {
                let mut set = FxHashSet::default();
                for &member in self.cluster_members(c)? {
                    set.extend(self.topology_vertices(member)?);
                }
                Some(set)
            }
        }
    }

    // =========================================================================
    // Upward traversal: find parents via adjacency index
    // =========================================================================

    /// Returns edges that use a given vertex.
    pub fn vertex_edges(&self, key: VertexKey) -> Vec<EdgeKey> {
        self.vertex_to_edges
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns wires that contain a given edge.
    pub fn edge_wires(&self, key: EdgeKey) -> Vec<WireKey> {
        self.edge_to_wires
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns faces that use a given wire.
    pub fn wire_faces(&self, key: WireKey) -> Vec<FaceKey> {
        self.wire_to_faces
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns shells that contain a given face.
    pub fn face_shells(&self, key: FaceKey) -> Vec<ShellKey> {
        self.face_to_shells
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns cells bounded by a given shell.
    pub fn shell_cells(&self, key: ShellKey) -> Vec<CellKey> {
        self.shell_to_cells
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // Closure checks
    // =========================================================================

    /// Checks if a wire is closed (last edge connects back to first edge).
    pub fn wire_is_closed(&self, key: WireKey) -> bool {
        match (self.wire_start(key), self.wire_end(key)) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    /// Edges of a shell not used exactly twice by its face boundaries.
    ///
    /// An edge bounding the same face twice (a seam) counts twice.
    pub fn shell_unpaired_edges(&self, key: ShellKey) -> Vec<EdgeKey> {
        let Some(shell) = self.shells.get(key) else {
            return Vec::new();
        };

        let mut edge_count: FxHashMap<EdgeKey, usize> = FxHashMap::default();
        for &fk in &shell.faces {
            let Some(face) = self.faces.get(fk) else {
                continue;
            };
            for wk in std::iter::once(face.outer_wire).chain(face.inner_wires.iter().copied()) {
                if let Some(wire) = self.wires.get(wk) {
                    for &ek in &wire.edges {
                        *edge_count.entry(ek).or_insert(0) += 1;
                    }
                }
            }
        }

        edge_count
            .into_iter()
            .filter(|&(_, count)| count != 2)
            .map(|(ek, _)| ek)
            .collect()
    }

    /// Checks if a shell is closed (every edge is shared by exactly 2 faces).
    pub fn shell_is_closed(&self, key: ShellKey) -> bool {
        self.shells.get(key).is_some_and(|s| !s.faces.is_empty())
            && self.shell_unpaired_edges(key).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::quad_face;

    fn make_triangle(arena: &mut TopologyArena) -> (FaceKey, WireKey, [VertexKey; 3]) {
        let v0 = arena.add_vertex(0.0, 0.0, 0.0);
        let v1 = arena.add_vertex(1.0, 0.0, 0.0);
        let v2 = arena.add_vertex(0.0, 1.0, 0.0);

        let e0 = arena.add_edge(v0, v1).unwrap();
        let e1 = arena.add_edge(v1, v2).unwrap();
        let e2 = arena.add_edge(v2, v0).unwrap();

        let wire = arena.add_wire(&[e0, e1, e2]).unwrap();
        let face = arena.add_face(wire).unwrap();

        (face, wire, [v0, v1, v2])
    }

    // --- Downward traversal ---

    #[test]
    fn wire_vertices_ordered_triangle() {
        let mut arena = TopologyArena::new();
        let (_, wire, [v0, v1, v2]) = make_triangle(&mut arena);

        let verts = arena.wire_vertices_ordered(wire).unwrap();
        assert_eq!(verts, vec![v0, v1, v2]);
    }

    #[test]
    fn wire_vertices_ordered_open_chain_includes_end() {
        let mut arena = TopologyArena::new();
        let v0 = arena.add_vertex(0.0, 0.0, 0.0);
        let v1 = arena.add_vertex(1.0, 0.0, 0.0);
        let v2 = arena.add_vertex(1.0, 1.0, 0.0);
        let e0 = arena.add_edge(v0, v1).unwrap();
        let e1 = arena.add_edge(v2, v1).unwrap();
        let wire = arena.add_wire(&[e0, e1]).unwrap();

        assert_eq!(arena.wire_vertices_ordered(wire).unwrap(), vec![v0, v1, v2]);
        assert_eq!(arena.wire_start(wire), Some(v0));
        assert_eq!(arena.wire_end(wire), Some(v2));
    }

    #[test]
    fn face_vertices_and_edges() {
        let mut arena = TopologyArena::new();
        let (face, _, [v0, v1, v2]) = make_triangle(&mut arena);

        let verts = arena.face_vertices(face).unwrap();
        assert_eq!(verts.len(), 3);
        assert!(verts.contains(&v0));
        assert!(verts.contains(&v1));
        assert!(verts.contains(&v2));
        assert_eq!(arena.face_edges(face).unwrap().len(), 3);
    }

    #[test]
    fn topology_vertices_recurses_into_clusters() {
        let mut arena = TopologyArena::new();
        let (face, _, _) = make_triangle(&mut arena);
        let lone = arena.add_vertex(9.0, 9.0, 9.0);
        let inner = arena.add_cluster(&[TopologyKey::Vertex(lone)]).unwrap();
        let outer = arena
            .add_cluster(&[TopologyKey::Face(face), TopologyKey::Cluster(inner)])
            .unwrap();

        let verts = arena.topology_vertices(TopologyKey::Cluster(outer)).unwrap();
        assert_eq!(verts.len(), 4);
        assert!(verts.contains(&lone));
    }

    // --- Upward traversal ---

    #[test]
    fn vertex_edges_returns_incident() {
        let mut arena = TopologyArena::new();
        let v0 = arena.add_vertex(0.0, 0.0, 0.0);
        let v1 = arena.add_vertex(1.0, 0.0, 0.0);
        let v2 = arena.add_vertex(0.0, 1.0, 0.0);

        let e0 = arena.add_edge(v0, v1).unwrap();
        let e1 = arena.add_edge(v0, v2).unwrap();

        let edges = arena.vertex_edges(v0);
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&e0));
        assert!(edges.contains(&e1));
    }

    #[test]
    fn face_shells_upward() {
        let mut arena = TopologyArena::new();
        let v0 = arena.add_vertex(0.0, 0.0, 0.0);
        let v1 = arena.add_vertex(1.0, 0.0, 0.0);
        let v2 = arena.add_vertex(1.0, 1.0, 0.0);
        let v3 = arena.add_vertex(0.0, 1.0, 0.0);

        let (face, wire, edges) = quad_face(&mut arena, v0, v1, v2, v3).unwrap();
        let shell = arena.add_shell(&[face]).unwrap();

        assert_eq!(arena.face_shells(face), vec![shell]);
        assert_eq!(arena.wire_faces(wire), vec![face]);
        assert_eq!(arena.edge_wires(edges[0]), vec![wire]);
    }

    // --- Closure checks ---

    #[test]
    fn closed_wire_triangle() {
        let mut arena = TopologyArena::new();
        let (_, wire, _) = make_triangle(&mut arena);
        assert!(arena.wire_is_closed(wire));
    }

    #[test]
    fn open_wire_two_edges() {
        let mut arena = TopologyArena::new();
        let v0 = arena.add_vertex(0.0, 0.0, 0.0);
        let v1 = arena.add_vertex(1.0, 0.0, 0.0);
        let v2 = arena.add_vertex(1.0, 1.0, 0.0);

        let e0 = arena.add_edge(v0, v1).unwrap();
        let e1 = arena.add_edge(v1, v2).unwrap();

        let wire = arena.add_wire(&[e0, e1]).unwrap();
        assert!(!arena.wire_is_closed(wire));
    }

    #[test]
    fn unshared_box_faces_do_not_close_a_shell() {
        let mut arena = TopologyArena::new();
        let v = [
            arena.add_vertex(0.0, 0.0, 0.0),
            arena.add_vertex(1.0, 0.0, 0.0),
            arena.add_vertex(1.0, 1.0, 0.0),
            arena.add_vertex(0.0, 1.0, 0.0),
            arena.add_vertex(0.0, 0.0, 1.0),
            arena.add_vertex(1.0, 0.0, 1.0),
            arena.add_vertex(1.0, 1.0, 1.0),
            arena.add_vertex(0.0, 1.0, 1.0),
        ];

        // Each rectangle owns its edges, so no edge is shared.
        let mut faces = Vec::new();
        for [a, b, c, d] in [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [0, 3, 7, 4],
            [1, 2, 6, 5],
        ] {
            let (face, _, _) = quad_face(&mut arena, v[a], v[b], v[c], v[d]).unwrap();
            faces.push(face);
        }
        let shell = arena.add_shell(&faces).unwrap();

        assert!(!arena.shell_is_closed(shell));
        assert_eq!(arena.shell_unpaired_edges(shell).len(), 24);
    }
}
