// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level builder methods for constructing topology with tolerance-based
//! vertex and edge sharing.
//!
//! These are the primitives a geometry conversion pipeline is written
//! against: wires from unordered edges, face trimming, batch construction
//! from vertex index lists, and face sewing. None of them edits an existing
//! entity; whenever an edge has to move onto a fused vertex a new edge with
//! the same curve is derived from it.

use std::collections::VecDeque;

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::arena::{EdgeCurve, FaceSurface, TopologyArena};
use crate::error::{Error, Result};
use crate::keys::*;
use crate::spatial::SpatialIndex;

/// Fractions at which two edges are compared for geometric coincidence.
const COINCIDENCE_SAMPLES: [f64; 3] = [0.25, 0.5, 0.75];

impl TopologyArena {
    /// Creates a wire from edges given in any order.
    ///
    /// Edges are chained onto either end of the growing wire when one of
    /// their vertices is the same vertex, or lies within `tolerance` of the
    /// open end. Vertices joined by distance are fused onto the vertex that
    /// was reached first, and the chain is closed when its last vertex comes
    /// back within `tolerance` of its first.
    ///
    /// Fails with [`Error::EmptyWire`] for no edges and with
    /// [`Error::UnconnectedEdges`] when some edges cannot be reached.
    pub fn add_wire_by_edges(&mut self, edge_keys: &[EdgeKey], tolerance: f64) -> Result<WireKey> {
        let Some((&first, rest)) = edge_keys.split_first() else {
            return Err(Error::EmptyWire);
        };
        for &ek in edge_keys {
            if !self.edges.contains_key(ek) {
                return Err(Error::EdgeNotFound(ek));
            }
        }

        // (edge, forward, first vertex, last vertex) in traversal order
        let mut chain: VecDeque<(EdgeKey, bool, VertexKey, VertexKey)> = VecDeque::new();
        let (s, e) = self.endpoints(first)?;
        chain.push_back((first, true, s, e));
        let mut remaining: Vec<EdgeKey> = rest.to_vec();

        while !remaining.is_empty() {
            let (_, _, head, _) = chain[0];
            let (_, _, _, tail) = chain[chain.len() - 1];

            // (index in remaining, chain entry, goes at the back)
            let mut placement = None;
            for (i, &ek) in remaining.iter().enumerate() {
                let (s, e) = self.endpoints(ek)?;
                placement = if self.coincident(tail, s, tolerance) {
                    Some((i, (ek, true, s, e), true))
                } else if self.coincident(tail, e, tolerance) {
                    Some((i, (ek, false, e, s), true))
                } else if self.coincident(head, e, tolerance) {
                    Some((i, (ek, true, s, e), false))
                } else if self.coincident(head, s, tolerance) {
                    Some((i, (ek, false, e, s), false))
                } else {
                    None
                };
                if placement.is_some() {
                    break;
                }
            }

            match placement {
                Some((i, entry, true)) => {
                    remaining.swap_remove(i);
                    chain.push_back(entry);
                }
                Some((i, entry, false)) => {
                    remaining.swap_remove(i);
                    chain.push_front(entry);
                }
                None => return Err(Error::UnconnectedEdges(remaining.len())),
            }
        }

        // Junction vertices: the earlier vertex of each joint wins.
        let mut joints = Vec::with_capacity(chain.len() + 1);
        joints.push(chain[0].2);
        joints.extend(chain.iter().map(|&(_, _, _, last)| last));

        let n = chain.len();
        let closes = joints[0] == joints[n]
            || ((n > 1 || self.edge_nurbs(chain[0].0).is_some())
                && self.coincident(joints[0], joints[n], tolerance));
        if closes {
            joints[n] = joints[0];
        }

        let mut edges = Vec::with_capacity(n);
        let mut orientations = Vec::with_capacity(n);
        for (i, &(ek, forward, _, _)) in chain.iter().enumerate() {
            let (start, end) = if forward {
                (joints[i], joints[i + 1])
            } else {
                (joints[i + 1], joints[i])
            };
            edges.push(self.rebind_edge(ek, start, end)?);
            orientations.push(forward);
        }

        Ok(self.insert_wire(edges, orientations))
    }

    /// Creates a wire traversing the same edges in the opposite direction.
    pub fn reversed_wire(&mut self, wire: WireKey) -> Result<WireKey> {
        let data = self.wires.get(wire).ok_or(Error::WireNotFound(wire))?;
        let edges = data.edges.iter().rev().copied().collect();
        let orientations = data.orientations.iter().rev().map(|o| !o).collect();
        Ok(self.insert_wire(edges, orientations))
    }

    /// Creates a face on the surface of `face`, bounded by `wire`.
    ///
    /// The wire replaces all boundaries of the source face; with `reverse`
    /// set it is traversed in the opposite direction. The wire must be
    /// closed, and on a NURBS surface every wire vertex and edge midpoint
    /// must lie within `tolerance` of the surface patch.
    pub fn trim_face_by_wire(
        &mut self,
        face: FaceKey,
        wire: WireKey,
        reverse: bool,
        tolerance: f64,
    ) -> Result<FaceKey> {
        let surface = self
            .faces
            .get(face)
            .ok_or(Error::FaceNotFound(face))?
            .surface
            .clone();
        self.check_outer_wire(wire)?;

        if let FaceSurface::Nurbs(nurbs) = &surface {
            let samples = self.wire_samples(wire);
            // Distance to the carrier plane is cheap and rejects most strays
            if let Some((origin, normal)) = nurbs.plane(tolerance) {
                let deviation = samples
                    .iter()
                    .map(|p| (p - origin).dot(&normal).abs())
                    .fold(0.0, f64::max);
                if deviation > tolerance {
                    return Err(Error::BoundaryOffSurface(deviation));
                }
            }
            let deviation = samples
                .iter()
                .map(|p| nurbs.distance_to(p))
                .fold(0.0, f64::max);
            if deviation > tolerance {
                return Err(Error::BoundaryOffSurface(deviation));
            }
        }

        let outer = if reverse {
            self.reversed_wire(wire)?
        } else {
            wire
        };
        Ok(self.insert_face(outer, Vec::new(), surface))
    }

    /// Vertex points and edge midpoints of a wire.
    fn wire_samples(&self, wire: WireKey) -> Vec<Point3<f64>> {
        let Some(data) = self.wires.get(wire) else {
            return Vec::new();
        };
        let mut samples: Vec<Point3<f64>> = self
            .wire_vertices(wire)
            .into_iter()
            .flatten()
            .filter_map(|v| self.vertex_point(v))
            .collect();
        samples.extend(
            data.edges
                .iter()
                .filter_map(|&ek| self.edge_point_at(ek, 0.5)),
        );
        samples
    }

    /// Creates a face equal to `face` with `wires` added as holes.
    ///
    /// Every hole must be a closed wire. With no wires the face itself is
    /// returned.
    pub fn add_internal_boundaries(&mut self, face: FaceKey, wires: &[WireKey]) -> Result<FaceKey> {
        let data = self.faces.get(face).ok_or(Error::FaceNotFound(face))?;
        if wires.is_empty() {
            return Ok(face);
        }

        let outer = data.outer_wire;
        let surface = data.surface.clone();
        let mut holes = data.inner_wires.clone();

        self.check_inner_wires(wires)?;
        holes.extend_from_slice(wires);
        Ok(self.insert_face(outer, holes, surface))
    }

    /// Builds one topology per index list over a shared vertex list.
    ///
    /// A single index yields the vertex, two indices an edge, and a longer
    /// list an open wire of straight edges. A list whose last index repeats
    /// the first describes a closed polygon and yields a face. Empty lists
    /// are skipped.
    pub fn add_by_vertices_indices(
        &mut self,
        vertices: &[VertexKey],
        index_lists: &[Vec<usize>],
    ) -> Result<Vec<TopologyKey>> {
        for &vk in vertices {
            if !self.vertices.contains_key(vk) {
                return Err(Error::VertexNotFound(vk));
            }
        }

        let mut results = Vec::with_capacity(index_lists.len());
        for indices in index_lists {
            let mut keys = Vec::with_capacity(indices.len());
            for &index in indices {
                let key = vertices.get(index).ok_or(Error::IndexOutOfRange {
                    index,
                    len: vertices.len(),
                })?;
                keys.push(*key);
            }

            let topology = match keys.as_slice() {
                [] => continue,
                [single] => TopologyKey::Vertex(*single),
                [start, end] if start != end => TopologyKey::Edge(self.add_edge(*start, *end)?),
                [first, .., last] if first == last => {
                    let mut ring = keys[..keys.len() - 1].to_vec();
                    ring.dedup();
                    if ring.len() > 1 && ring.first() == ring.last() {
                        ring.pop();
                    }
                    if ring.len() < 3 {
                        return Err(Error::DegenerateFace);
                    }
                    let mut edges = Vec::with_capacity(ring.len());
                    for i in 0..ring.len() {
                        edges.push(self.add_edge(ring[i], ring[(i + 1) % ring.len()])?);
                    }
                    let wire = self.add_wire(&edges)?;
                    TopologyKey::Face(self.add_face(wire)?)
                }
                _ => {
                    let mut chain = keys.clone();
                    chain.dedup();
                    let mut edges = Vec::with_capacity(chain.len());
                    for pair in chain.windows(2) {
                        edges.push(self.add_edge(pair[0], pair[1])?);
                    }
                    TopologyKey::Wire(self.add_wire(&edges)?)
                }
            };
            results.push(topology);
        }

        Ok(results)
    }

    /// Creates a shell from faces, sewing them along coincident boundaries.
    ///
    /// Vertices within `tolerance` of each other are fused, and edges that
    /// join the same fused vertices along the same path become one edge, so
    /// adjacent faces share it. Faces that already share their boundaries
    /// are kept as they are.
    pub fn add_shell_by_faces(&mut self, faces: &[FaceKey], tolerance: f64) -> Result<ShellKey> {
        if faces.is_empty() {
            return Err(Error::EmptyShell);
        }

        let mut sewing = Sewing::new(tolerance);
        let mut sewn = Vec::with_capacity(faces.len());
        for &fk in faces {
            sewn.push(sewing.face(self, fk)?);
        }
        self.add_shell(&sewn)
    }

    /// Derives an edge with the curve of `edge` running between `start` and
    /// `end`, or returns `edge` itself when it already does.
    pub(crate) fn rebind_edge(
        &mut self,
        edge: EdgeKey,
        start: VertexKey,
        end: VertexKey,
    ) -> Result<EdgeKey> {
        let data = self.edges.get(edge).ok_or(Error::EdgeNotFound(edge))?;
        if data.start == start && data.end == end {
            return Ok(edge);
        }
        let curve = data.curve.clone();
        Ok(self.insert_edge(start, end, curve))
    }

    fn endpoints(&self, edge: EdgeKey) -> Result<(VertexKey, VertexKey)> {
        self.edge_vertices(edge).ok_or(Error::EdgeNotFound(edge))
    }

    pub(crate) fn coincident(&self, a: VertexKey, b: VertexKey, tolerance: f64) -> bool {
        if a == b {
            return true;
        }
        match (self.vertex_point(a), self.vertex_point(b)) {
            (Some(pa), Some(pb)) => (pa - pb).norm() <= tolerance,
            _ => false,
        }
    }

    /// Whether two edges follow the same path, `same_direction` telling how
    /// their parameterizations line up.
    fn edges_coincide(&self, a: EdgeKey, b: EdgeKey, same_direction: bool, tolerance: f64) -> bool {
        let both_lines = matches!(
            (self.edge(a).map(|e| &e.curve), self.edge(b).map(|e| &e.curve)),
            (Some(EdgeCurve::Line), Some(EdgeCurve::Line))
        );
        if both_lines {
            return true;
        }
        COINCIDENCE_SAMPLES.iter().all(|&t| {
            let u = if same_direction { t } else { 1.0 - t };
            match (self.edge_point_at(a, t), self.edge_point_at(b, u)) {
                (Some(pa), Some(pb)) => (pa - pb).norm() <= tolerance,
                _ => false,
            }
        })
    }
}

/// Incremental sewing state shared by a batch of faces.
///
/// Vertices map to the first vertex seen within tolerance, edges to the first
/// edge joining the same fused vertices along the same path.
pub(crate) struct Sewing {
    tolerance: f64,
    index: SpatialIndex,
    vertices: FxHashMap<VertexKey, VertexKey>,
    edges: FxHashMap<EdgeKey, Option<EdgeKey>>,
    // (min vertex, max vertex) → fused edges joining them
    edge_map: FxHashMap<(VertexKey, VertexKey), Vec<EdgeKey>>,
}

impl Sewing {
    pub(crate) fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            index: SpatialIndex::new(tolerance),
            vertices: FxHashMap::default(),
            edges: FxHashMap::default(),
            edge_map: FxHashMap::default(),
        }
    }

    pub(crate) fn vertex(&mut self, arena: &TopologyArena, vertex: VertexKey) -> VertexKey {
        if let Some(&fused) = self.vertices.get(&vertex) {
            return fused;
        }
        let fused = self.index.canonical(arena, vertex, self.tolerance);
        self.vertices.insert(vertex, fused);
        fused
    }

    /// Fused counterpart of `edge`, or `None` when a straight edge collapsed
    /// onto a single vertex.
    pub(crate) fn edge(&mut self, arena: &mut TopologyArena, edge: EdgeKey) -> Result<Option<EdgeKey>> {
        if let Some(&fused) = self.edges.get(&edge) {
            return Ok(fused);
        }

        let (start, end) = arena.endpoints(edge)?;
        let start = self.vertex(arena, start);
        let end = self.vertex(arena, end);

        let is_line = matches!(arena.edge(edge).map(|e| &e.curve), Some(EdgeCurve::Line));
        if start == end && is_line {
            self.edges.insert(edge, None);
            return Ok(None);
        }

        let slot = if start <= end { (start, end) } else { (end, start) };
        let candidates = self.edge_map.get(&slot).cloned().unwrap_or_default();
        for candidate in candidates {
            let Some((cs, _)) = arena.edge_vertices(candidate) else {
                continue;
            };
            let closed = start == end;
            let same = cs == start;
            let found = if closed {
                arena.edges_coincide(edge, candidate, true, self.tolerance)
                    || arena.edges_coincide(edge, candidate, false, self.tolerance)
            } else {
                arena.edges_coincide(edge, candidate, same, self.tolerance)
            };
            if found {
                self.edges.insert(edge, Some(candidate));
                return Ok(Some(candidate));
            }
        }

        let fused = arena.rebind_edge(edge, start, end)?;
        self.edge_map.entry(slot).or_default().push(fused);
        self.edges.insert(edge, Some(fused));
        Ok(Some(fused))
    }

    fn wire(&mut self, arena: &mut TopologyArena, wire: WireKey) -> Result<Option<WireKey>> {
        let data = arena.wire(wire).ok_or(Error::WireNotFound(wire))?.clone();

        let mut edges = Vec::with_capacity(data.edges.len());
        let mut orientations = Vec::with_capacity(data.edges.len());
        for (&ek, &forward) in data.edges.iter().zip(&data.orientations) {
            let Some(fused) = self.edge(arena, ek)? else {
                continue;
            };
            let (s, e) = arena.endpoints(ek)?;
            let first = self.vertex(arena, if forward { s } else { e });
            let (fs, fe) = arena.endpoints(fused)?;
            edges.push(fused);
            orientations.push(if fs == fe { forward } else { fs == first });
        }

        if edges.is_empty() {
            return Ok(None);
        }
        if edges == data.edges && orientations == data.orientations {
            return Ok(Some(wire));
        }
        Ok(Some(arena.insert_wire(edges, orientations)))
    }

    pub(crate) fn face(&mut self, arena: &mut TopologyArena, face: FaceKey) -> Result<FaceKey> {
        let data = arena.face(face).ok_or(Error::FaceNotFound(face))?.clone();

        let outer = self.wire(arena, data.outer_wire)?.ok_or(Error::DegenerateFace)?;
        let mut holes = Vec::with_capacity(data.inner_wires.len());
        for &iw in &data.inner_wires {
            if let Some(hole) = self.wire(arena, iw)? {
                holes.push(hole);
            }
        }

        if outer == data.outer_wire && holes == data.inner_wires {
            return Ok(face);
        }
        Ok(arena.insert_face(outer, holes, data.surface))
    }
}
