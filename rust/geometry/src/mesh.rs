// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed triangle/quad meshes

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Indexed polygon mesh
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<MeshFace>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshFace {
    Triangle([usize; 3]),
    Quad([usize; 4]),
}

impl MeshFace {
    pub fn indices(&self) -> &[usize] {
        match self {
            MeshFace::Triangle(indices) => indices,
            MeshFace::Quad(indices) => indices,
        }
    }

    /// Fewer than three distinct vertices, so no polygon
    pub fn is_degenerate(&self) -> bool {
        let mut indices = self.indices().to_vec();
        indices.sort_unstable();
        indices.dedup();
        indices.len() < 3
    }

    /// Indices with the first one repeated at the end, marking a closed polygon
    pub fn index_cycle(&self) -> Vec<usize> {
        let indices = self.indices();
        let mut cycle = Vec::with_capacity(indices.len() + 1);
        cycle.extend_from_slice(indices);
        cycle.push(indices[0]);
        cycle
    }
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<MeshFace>) -> Self {
        Self { vertices, faces }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_repeat_first_index() {
        assert_eq!(MeshFace::Triangle([0, 1, 2]).index_cycle(), vec![0, 1, 2, 0]);
        assert_eq!(MeshFace::Quad([4, 5, 6, 7]).index_cycle(), vec![4, 5, 6, 7, 4]);
    }

    #[test]
    fn repeated_indices_make_faces_degenerate() {
        assert!(MeshFace::Triangle([0, 2, 2]).is_degenerate());
        assert!(MeshFace::Quad([1, 3, 1, 3]).is_degenerate());
        assert!(!MeshFace::Quad([0, 1, 1, 2]).is_degenerate());
        assert!(!MeshFace::Triangle([0, 1, 2]).is_degenerate());
    }
}
