// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for topology entities.
//!
//! Each topology entity is created through the arena, which ensures referential
//! integrity (all referenced sub-entities must exist) and maintains the
//! upward adjacency index.

use nalgebra::Point3;

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;
use crate::nurbs::{NurbsCurve, NurbsSurface};
use crate::LINEAR_PRECISION;

impl TopologyArena {
    /// Creates a straight edge between two existing vertices.
    ///
    /// Returns an error if either vertex does not exist in the arena.
    pub fn add_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        if !self.vertices.contains_key(start) {
            return Err(Error::VertexNotFound(start));
        }
        if !self.vertices.contains_key(end) {
            return Err(Error::VertexNotFound(end));
        }

        Ok(self.insert_edge(start, end, EdgeCurve::Line))
    }

    /// Creates a curved edge from a NURBS curve.
    ///
    /// The edge vertices are placed at the curve evaluated at the ends of its
    /// domain. When both ends coincide the edge is closed and uses a single
    /// vertex for start and end.
    pub fn add_nurbs_edge(&mut self, curve: NurbsCurve) -> EdgeKey {
        let p0 = curve.start_point();
        let p1 = curve.end_point();

        let start = self.add_vertex_at(&p0);
        let end = if (p1 - p0).norm() <= LINEAR_PRECISION {
            start
        } else {
            self.add_vertex_at(&p1)
        };

        self.insert_edge(start, end, EdgeCurve::Nurbs(curve))
    }

    pub(crate) fn insert_edge(
        &mut self,
        start: VertexKey,
        end: VertexKey,
        curve: EdgeCurve,
    ) -> EdgeKey {
        let key = self.edges.insert(EdgeData { start, end, curve });
        self.link_vertex_edge(start, key);
        self.link_vertex_edge(end, key);
        key
    }

    /// Creates a wire from an ordered list of edges.
    ///
    /// The edges must form a connected chain: each edge shares a vertex with
    /// the next edge. The wire tracks the orientation of each edge to maintain
    /// a consistent traversal direction.
    ///
    /// Returns an error if the edge list is empty or edges are not connected.
    pub fn add_wire(&mut self, edge_keys: &[EdgeKey]) -> Result<WireKey> {
        if edge_keys.is_empty() {
            return Err(Error::EmptyWire);
        }

        for &ek in edge_keys {
            if !self.edges.contains_key(ek) {
                return Err(Error::EdgeNotFound(ek));
            }
        }

        let mut orientations = Vec::with_capacity(edge_keys.len());

        if edge_keys.len() == 1 {
            orientations.push(true);
        } else {
            // First edge orientation follows from the second edge
            let first = &self.edges[edge_keys[0]];
            let second = &self.edges[edge_keys[1]];

            if first.end == second.start || first.end == second.end {
                orientations.push(true);
            } else if first.start == second.start || first.start == second.end {
                orientations.push(false);
            } else {
                return Err(Error::DisconnectedWire(0, 1));
            }

            for i in 1..edge_keys.len() {
                let prev_edge = &self.edges[edge_keys[i - 1]];
                let curr_edge = &self.edges[edge_keys[i]];

                let prev_end = if orientations[i - 1] {
                    prev_edge.end
                } else {
                    prev_edge.start
                };

                if prev_end == curr_edge.start {
                    orientations.push(true);
                } else if prev_end == curr_edge.end {
                    orientations.push(false);
                } else {
                    return Err(Error::DisconnectedWire(i - 1, i));
                }
            }
        }

        Ok(self.insert_wire(edge_keys.to_vec(), orientations))
    }

    pub(crate) fn insert_wire(&mut self, edges: Vec<EdgeKey>, orientations: Vec<bool>) -> WireKey {
        let linked = edges.clone();
        let key = self.wires.insert(WireData {
            edges,
            orientations,
        });
        for ek in linked {
            self.link_edge_wire(ek, key);
        }
        key
    }

    /// Creates a polygonal face from a closed outer boundary wire.
    ///
    /// A wire made only of straight edges needs at least 3 of them.
    pub fn add_face(&mut self, outer_wire: WireKey) -> Result<FaceKey> {
        self.add_face_with_holes(outer_wire, &[])
    }

    /// Creates a polygonal face with an outer boundary and inner boundary
    /// wires (holes).
    pub fn add_face_with_holes(
        &mut self,
        outer_wire: WireKey,
        inner_wires: &[WireKey],
    ) -> Result<FaceKey> {
        self.check_outer_wire(outer_wire)?;
        self.check_inner_wires(inner_wires)?;
        Ok(self.insert_face(outer_wire, inner_wires.to_vec(), FaceSurface::Polygon))
    }

    /// Creates an untrimmed face spanning the whole domain of a NURBS surface.
    ///
    /// The outer wire is made of the four iso-parametric boundary curves,
    /// in the order `v = v0`, `u = u1`, `v = v1`, `u = u0`. Boundaries that
    /// collapse to a point (poles of a revolution, apex of a cone) are left
    /// out of the wire.
    pub fn add_nurbs_face(&mut self, surface: NurbsSurface) -> Result<FaceKey> {
        let (u0, u1) = surface.u_domain();
        let (v0, v1) = surface.v_domain();

        let mut corners: Vec<(Point3<f64>, VertexKey)> = Vec::with_capacity(4);
        let mut corner = |arena: &mut Self, p: Point3<f64>| -> VertexKey {
            if let Some((_, key)) = corners
                .iter()
                .find(|(q, _)| (q - p).norm() <= LINEAR_PRECISION)
            {
                return *key;
            }
            let key = arena.add_vertex_at(&p);
            corners.push((p, key));
            key
        };

        let c00 = corner(self, surface.point_at(u0, v0));
        let c10 = corner(self, surface.point_at(u1, v0));
        let c11 = corner(self, surface.point_at(u1, v1));
        let c01 = corner(self, surface.point_at(u0, v1));

        let boundaries = [
            (surface.iso_curve_at_v(v0)?, c00, c10),
            (surface.iso_curve_at_u(u1)?, c10, c11),
            (surface.iso_curve_at_v(v1)?, c01, c11),
            (surface.iso_curve_at_u(u0)?, c00, c01),
        ];

        let mut edges = Vec::with_capacity(4);
        for (curve, start, end) in boundaries {
            if start == end && curve_is_collapsed(&curve) {
                continue;
            }
            edges.push(self.insert_edge(start, end, EdgeCurve::Nurbs(curve)));
        }

        if edges.is_empty() {
            return Err(Error::DegenerateFace);
        }

        let wire = self.add_wire(&edges)?;
        Ok(self.insert_face(wire, Vec::new(), FaceSurface::Nurbs(surface)))
    }

    pub(crate) fn check_outer_wire(&self, outer_wire: WireKey) -> Result<()> {
        let wire = self
            .wires
            .get(outer_wire)
            .ok_or(Error::WireNotFound(outer_wire))?;

        let all_lines = wire
            .edges
            .iter()
            .all(|&ek| matches!(self.edges.get(ek).map(|e| &e.curve), Some(EdgeCurve::Line)));
        if all_lines && wire.edges.len() < 3 {
            return Err(Error::DegenerateFace);
        }
        if !self.wire_is_closed(outer_wire) {
            return Err(Error::OpenWire);
        }
        Ok(())
    }

    pub(crate) fn check_inner_wires(&self, inner_wires: &[WireKey]) -> Result<()> {
        for &iw in inner_wires {
            if !self.wires.contains_key(iw) {
                return Err(Error::WireNotFound(iw));
            }
            if !self.wire_is_closed(iw) {
                return Err(Error::OpenWire);
            }
        }
        Ok(())
    }

    pub(crate) fn insert_face(
        &mut self,
        outer_wire: WireKey,
        inner_wires: Vec<WireKey>,
        surface: FaceSurface,
    ) -> FaceKey {
        let holes = inner_wires.clone();
        let key = self.faces.insert(FaceData {
            outer_wire,
            inner_wires,
            surface,
        });

        self.link_wire_face(outer_wire, key);
        for iw in holes {
            self.link_wire_face(iw, key);
        }
        key
    }

    /// Creates a shell from a list of faces, used as given.
    ///
    /// At minimum, one face is required. Use
    /// [`add_shell_by_faces`](TopologyArena::add_shell_by_faces) to fuse
    /// faces that only touch geometrically.
    pub fn add_shell(&mut self, face_keys: &[FaceKey]) -> Result<ShellKey> {
        if face_keys.is_empty() {
            return Err(Error::EmptyShell);
        }

        for &fk in face_keys {
            if !self.faces.contains_key(fk) {
                return Err(Error::FaceNotFound(fk));
            }
        }

        let key = self.shells.insert(ShellData {
            faces: face_keys.to_vec(),
        });

        for &fk in face_keys {
            self.link_face_shell(fk, key);
        }

        Ok(key)
    }

    /// Creates a cell bounded by a closed shell.
    ///
    /// Returns [`Error::OpenShell`] with the number of edges not shared by
    /// exactly two faces when the shell does not enclose a volume.
    pub fn add_cell(&mut self, shell: ShellKey) -> Result<CellKey> {
        if !self.shells.contains_key(shell) {
            return Err(Error::ShellNotFound(shell));
        }

        let unpaired = self.shell_unpaired_edges(shell).len();
        if unpaired > 0 {
            return Err(Error::OpenShell(unpaired));
        }

        let key = self.cells.insert(CellData { shell });
        self.link_shell_cell(shell, key);
        Ok(key)
    }

    /// Creates a cluster holding arbitrary existing topologies.
    pub fn add_cluster(&mut self, members: &[TopologyKey]) -> Result<ClusterKey> {
        for &member in members {
            if !self.contains(member) {
                return Err(Error::NotFound(member));
            }
        }

        Ok(self.clusters.insert(ClusterData {
            members: members.to_vec(),
        }))
    }
}

fn curve_is_collapsed(curve: &NurbsCurve) -> bool {
    let points = curve.control_points();
    points
        .iter()
        .all(|p| (p - points[0]).norm() <= LINEAR_PRECISION)
}

/// Straight-edged quadrilateral face over four vertices, in ring order.
#[cfg(test)]
pub(crate) fn quad_face(
    arena: &mut TopologyArena,
    v0: VertexKey,
    v1: VertexKey,
    v2: VertexKey,
    v3: VertexKey,
) -> Result<(FaceKey, WireKey, [EdgeKey; 4])> {
    let e0 = arena.add_edge(v0, v1)?;
    let e1 = arena.add_edge(v1, v2)?;
    let e2 = arena.add_edge(v2, v3)?;
    let e3 = arena.add_edge(v3, v0)?;
    let wire = arena.add_wire(&[e0, e1, e2, e3])?;
    let face = arena.add_face(wire)?;
    Ok((face, wire, [e0, e1, e2, e3]))
}
