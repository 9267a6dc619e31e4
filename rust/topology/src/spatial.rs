// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial index for tolerance-based vertex lookup.
//!
//! Uses a grid-based spatial hash for O(1) average-case nearest-vertex queries.
//! This is the foundation for sewing and self-merge, where vertices within a
//! tolerance are identified as the same point.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::arena::TopologyArena;
use crate::keys::VertexKey;
use crate::LINEAR_PRECISION;

/// A spatial hash grid for fast tolerance-based vertex lookup.
///
/// The grid divides 3D space into cubic cells of side `cell_size`. Vertex
/// lookups check the 27 neighboring cells (3x3x3 neighborhood) for candidates
/// within tolerance.
#[derive(Debug)]
pub struct SpatialIndex {
    cell_size: f64,
    grid: FxHashMap<(i64, i64, i64), Vec<VertexKey>>,
}

impl SpatialIndex {
    /// Creates a new spatial index for queries at `tolerance`.
    ///
    /// The cell size never drops below [`LINEAR_PRECISION`].
    pub fn new(tolerance: f64) -> Self {
        Self {
            cell_size: tolerance.max(LINEAR_PRECISION),
            grid: FxHashMap::default(),
        }
    }

    /// Inserts a vertex key at the given position.
    pub fn insert(&mut self, key: VertexKey, point: &Point3<f64>) {
        let cell = self.cell_coords(point);
        self.grid.entry(cell).or_default().push(key);
    }

    /// Finds the indexed vertex nearest to `point`, if one lies within
    /// `tolerance`.
    pub fn find_near(
        &self,
        arena: &TopologyArena,
        point: &Point3<f64>,
        tolerance: f64,
    ) -> Option<VertexKey> {
        let (cx, cy, cz) = self.cell_coords(point);
        let tol_sq = tolerance * tolerance;
        let mut best: Option<(VertexKey, f64)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(keys) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &vk in keys {
                        let Some(v) = arena.vertex_point(vk) else {
                            continue;
                        };
                        let dist_sq = (v - point).norm_squared();
                        if dist_sq <= tol_sq && best.map_or(true, |(_, d)| dist_sq < d) {
                            best = Some((vk, dist_sq));
                        }
                    }
                }
            }
        }

        best.map(|(k, _)| k)
    }

    /// Returns the indexed vertex standing in for `key`: an earlier vertex
    /// within `tolerance`, or `key` itself, which is then indexed.
    pub fn canonical(
        &mut self,
        arena: &TopologyArena,
        key: VertexKey,
        tolerance: f64,
    ) -> VertexKey {
        let Some(point) = arena.vertex_point(key) else {
            return key;
        };
        if let Some(existing) = self.find_near(arena, &point, tolerance) {
            return existing;
        }
        self.insert(key, &point);
        key
    }

    fn cell_coords(&self, point: &Point3<f64>) -> (i64, i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
            (point.z / self.cell_size).floor() as i64,
        )
    }
}

impl TopologyArena {
    /// Returns an existing indexed vertex within `tolerance` of `point`, or
    /// creates and indexes a new one.
    pub fn find_or_add_vertex(
        &mut self,
        index: &mut SpatialIndex,
        point: &Point3<f64>,
        tolerance: f64,
    ) -> VertexKey {
        if let Some(existing) = index.find_near(self, point, tolerance) {
            return existing;
        }

        let key = self.add_vertex_at(point);
        index.insert(key, point);
        key
    }
}
