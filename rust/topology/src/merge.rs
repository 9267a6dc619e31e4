// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cluster self-merge.
//!
//! Fuses the members of a cluster along coincident vertices and edges and
//! regroups the result by connectivity: faces joined by shared edges become
//! shells (cells when closed), edges joined by shared vertices become wires,
//! and whatever stays isolated is returned as is.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::TopologyArena;
use crate::builders::Sewing;
use crate::error::{Error, Result};
use crate::keys::*;

/// Lowest-dimension pieces of a cluster: what remains after unwrapping
/// wires, shells, cells and nested clusters.
#[derive(Debug, Default)]
struct Pieces {
    faces: Vec<FaceKey>,
    edges: Vec<EdgeKey>,
    vertices: Vec<VertexKey>,
}

impl TopologyArena {
    /// Merges the members of a cluster into connected topologies.
    ///
    /// Vertices within `tolerance` are fused and coincident edges shared.
    /// Faces connected through shared edges form a shell, which becomes a
    /// cell when it is closed; a lone face stays a face. Free edges connected
    /// through shared vertices form a wire where they chain. Free vertices
    /// not touching anything else are kept.
    ///
    /// A single resulting topology is returned directly; several are wrapped
    /// in a new cluster.
    pub fn self_merge(&mut self, cluster: ClusterKey, tolerance: f64) -> Result<TopologyKey> {
        if !self.clusters.contains_key(cluster) {
            return Err(Error::ClusterNotFound(cluster));
        }

        let mut pieces = Pieces::default();
        self.collect_pieces(TopologyKey::Cluster(cluster), &mut pieces)?;

        let mut sewing = Sewing::new(tolerance);
        let mut faces = Vec::with_capacity(pieces.faces.len());
        let mut seen_faces = FxHashSet::default();
        for &fk in &pieces.faces {
            let sewn = sewing.face(self, fk)?;
            if seen_faces.insert(sewn) {
                faces.push(sewn);
            }
        }

        let mut edges = Vec::new();
        let mut seen_edges = FxHashSet::default();
        for &ek in &pieces.edges {
            if let Some(sewn) = sewing.edge(self, ek)? {
                if seen_edges.insert(sewn) {
                    edges.push(sewn);
                }
            }
        }

        let mut results = Vec::new();

        // Faces grouped by shared edges
        let mut face_edges = FxHashSet::default();
        let mut used_vertices = FxHashSet::default();
        let face_groups = self.group_by(&faces, |arena, fk| {
            arena
                .face_edges(fk)
                .map(|edges| edges.into_iter().collect::<Vec<EdgeKey>>())
                .unwrap_or_default()
        });
        for group in face_groups {
            for &fk in &group {
                face_edges.extend(self.face_edges(fk).unwrap_or_default());
                used_vertices.extend(self.face_vertices(fk).unwrap_or_default());
            }
            results.push(self.assemble_faces(&group)?);
        }

        // Free edges grouped by shared vertices
        let free_edges: Vec<EdgeKey> = edges
            .into_iter()
            .filter(|ek| !face_edges.contains(ek))
            .collect();
        let edge_groups = self.group_by(&free_edges, |arena, ek| {
            arena
                .edge_vertices(ek)
                .map(|(s, e)| vec![s, e])
                .unwrap_or_default()
        });
        for group in edge_groups {
            for &ek in &group {
                if let Some((s, e)) = self.edge_vertices(ek) {
                    used_vertices.insert(s);
                    used_vertices.insert(e);
                }
            }
            if let [single] = group.as_slice() {
                results.push(TopologyKey::Edge(*single));
                continue;
            }
            match self.add_wire_by_edges(&group, tolerance) {
                Ok(wire) => results.push(TopologyKey::Wire(wire)),
                // Branching edges do not chain into a single wire.
                Err(Error::UnconnectedEdges(_)) => {
                    results.extend(group.into_iter().map(TopologyKey::Edge));
                }
                Err(e) => return Err(e),
            }
        }

        for &vk in &pieces.vertices {
            let fused = sewing.vertex(self, vk);
            if used_vertices.insert(fused) {
                results.push(TopologyKey::Vertex(fused));
            }
        }

        match results.as_slice() {
            [] => Err(Error::EmptyCluster),
            [single] => Ok(*single),
            _ => Ok(TopologyKey::Cluster(self.add_cluster(&results)?)),
        }
    }

    fn collect_pieces(&self, key: TopologyKey, pieces: &mut Pieces) -> Result<()> {
        match key {
            TopologyKey::Vertex(v) => pieces.vertices.push(v),
            TopologyKey::Edge(e) => pieces.edges.push(e),
            TopologyKey::Wire(w) => {
                let edges = self.wire_edges(w).ok_or(Error::WireNotFound(w))?;
                pieces.edges.extend_from_slice(edges);
            }
            TopologyKey::Face(f) => pieces.faces.push(f),
            TopologyKey::Shell(s) => {
                let faces = self.shell_faces(s).ok_or(Error::ShellNotFound(s))?;
                pieces.faces.extend_from_slice(faces);
            }
            TopologyKey::Cell(c) => {
                let faces = self.cell_faces(c).ok_or(Error::NotFound(key))?;
                pieces.faces.extend_from_slice(faces);
            }
            TopologyKey::Cluster(c) => {
                let members = self
                    .cluster_members(c)
                    .ok_or(Error::ClusterNotFound(c))?
                    .to_vec();
                for member in members {
                    self.collect_pieces(member, pieces)?;
                }
            }
        }
        Ok(())
    }

    /// One face, an open shell, or a cell when the shell closes.
    fn assemble_faces(&mut self, faces: &[FaceKey]) -> Result<TopologyKey> {
        if let [single] = faces {
            return Ok(TopologyKey::Face(*single));
        }
        let shell = self.add_shell(faces)?;
        if self.shell_is_closed(shell) {
            return Ok(TopologyKey::Cell(self.add_cell(shell)?));
        }
        Ok(TopologyKey::Shell(shell))
    }

    /// Partitions `items` into groups connected through shared links, keeping
    /// the input order inside each group and across groups.
    fn group_by<T, L>(&self, items: &[T], links: impl Fn(&Self, T) -> Vec<L>) -> Vec<Vec<T>>
    where
        T: Copy,
        L: std::hash::Hash + Eq,
    {
        let n = items.len();
        let mut parent: Vec<usize> = (0..n).collect();
        let mut rank = vec![0usize; n];
        let mut owner: FxHashMap<L, usize> = FxHashMap::default();

        for (i, &item) in items.iter().enumerate() {
            for link in links(self, item) {
                match owner.get(&link) {
                    Some(&j) => {
                        union(&mut parent, &mut rank, i, j);
                    }
                    None => {
                        owner.insert(link, i);
                    }
                }
            }
        }

        let mut slots: FxHashMap<usize, usize> = FxHashMap::default();
        let mut groups: Vec<Vec<T>> = Vec::new();
        for (i, &item) in items.iter().enumerate() {
            let root = find(&mut parent, i);
            let slot = *slots.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(item);
        }
        groups
    }
}

fn find(parent: &mut [usize], x: usize) -> usize {
    if parent[x] != x {
        parent[x] = find(parent, parent[x]);
    }
    parent[x]
}

fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) -> bool {
    let rx = find(parent, x);
    let ry = find(parent, y);
    if rx == ry {
        return false;
    }
    if rank[rx] < rank[ry] {
        parent[rx] = ry;
    } else if rank[rx] > rank[ry] {
        parent[ry] = rx;
    } else {
        parent[ry] = rx;
        rank[rx] += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(arena: &mut TopologyArena, coords: &[[f64; 3]]) -> Vec<VertexKey> {
        coords
            .iter()
            .map(|c| arena.add_vertex(c[0], c[1], c[2]))
            .collect()
    }

    #[test]
    fn two_triangles_merge_into_one_shell() {
        let mut arena = TopologyArena::new();
        let v = vertices(
            &mut arena,
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        );
        let faces = arena
            .add_by_vertices_indices(&v, &[vec![0, 1, 2, 0], vec![0, 2, 3, 0]])
            .unwrap();
        let cluster = arena.add_cluster(&faces).unwrap();

        let merged = arena.self_merge(cluster, 1e-4).unwrap();

        let shell = merged.as_shell().expect("connected faces form a shell");
        assert_eq!(arena.shell_faces(shell).unwrap().len(), 2);
        assert_eq!(arena.shell_vertices(shell).unwrap().len(), 4);
        assert_eq!(arena.shell_edges(shell).unwrap().len(), 5);
    }

    #[test]
    fn closed_faces_merge_into_a_cell() {
        let mut arena = TopologyArena::new();
        let v = vertices(
            &mut arena,
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );
        let faces = arena
            .add_by_vertices_indices(
                &v,
                &[vec![0, 2, 1, 0], vec![0, 1, 3, 0], vec![1, 2, 3, 1], vec![2, 0, 3, 2]],
            )
            .unwrap();
        let cluster = arena.add_cluster(&faces).unwrap();

        let merged = arena.self_merge(cluster, 1e-4).unwrap();

        let cell = merged.as_cell().expect("closed shell forms a cell");
        assert_eq!(arena.cell_faces(cell).unwrap().len(), 4);
    }

    #[test]
    fn disjoint_members_stay_in_a_cluster() {
        let mut arena = TopologyArena::new();
        let v = vertices(
            &mut arena,
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [5.0, 0.0, 0.0],
                [6.0, 0.0, 0.0],
                [9.0, 9.0, 9.0],
            ],
        );
        let built = arena
            .add_by_vertices_indices(&v, &[vec![0, 1, 2, 0], vec![3, 4], vec![5]])
            .unwrap();
        let cluster = arena.add_cluster(&built).unwrap();

        let merged = arena.self_merge(cluster, 1e-4).unwrap();

        let result = merged.as_cluster().expect("disconnected pieces stay clustered");
        let kinds: Vec<TopologyType> = arena
            .cluster_members(result)
            .unwrap()
            .iter()
            .map(|k| k.topology_type())
            .collect();
        assert_eq!(
            kinds,
            vec![TopologyType::Face, TopologyType::Edge, TopologyType::Vertex]
        );
    }

    #[test]
    fn touching_edges_chain_into_a_wire() {
        let mut arena = TopologyArena::new();
        let a = vertices(&mut arena, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let b = vertices(&mut arena, &[[1.00001, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        let e0 = arena.add_edge(a[0], a[1]).unwrap();
        let e1 = arena.add_edge(b[0], b[1]).unwrap();
        let cluster = arena
            .add_cluster(&[TopologyKey::Edge(e0), TopologyKey::Edge(e1)])
            .unwrap();

        let merged = arena.self_merge(cluster, 1e-4).unwrap();

        let wire = merged.as_wire().expect("touching edges chain");
        assert_eq!(arena.wire_vertices_ordered(wire).unwrap().len(), 3);
    }

    #[test]
    fn vertex_on_a_face_is_absorbed() {
        let mut arena = TopologyArena::new();
        let v = vertices(&mut arena, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let built = arena.add_by_vertices_indices(&v, &[vec![0, 1, 2, 0]]).unwrap();
        let extra = arena.add_vertex(1.0, 0.0, 0.00001);
        let cluster = arena
            .add_cluster(&[built[0], TopologyKey::Vertex(extra)])
            .unwrap();

        let merged = arena.self_merge(cluster, 1e-4).unwrap();
        assert_eq!(merged, built[0]);
    }

    #[test]
    fn empty_cluster_fails() {
        let mut arena = TopologyArena::new();
        let cluster = arena.add_cluster(&[]).unwrap();
        assert!(matches!(
            arena.self_merge(cluster, 1e-4),
            Err(Error::EmptyCluster)
        ));
    }
}
