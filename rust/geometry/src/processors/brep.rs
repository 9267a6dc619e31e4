// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brep processor.
//!
//! Builds one trimmed face per brep face, then decides what the faces
//! amount to: nothing, a single face, an open shell, or a closed cell.

use topobridge_topology::{FaceKey, TopologyArena, TopologyKey, WireKey};

use super::{flatten_edges, CurveProcessor, SurfaceProcessor};
use crate::brep::{Brep, BrepFace, BrepLoop};
use crate::options::ConvertOptions;
use crate::router::GeometryProcessor;
use crate::{Error, Result};

/// Brep processor
/// Handles multi-face breps and boxes (converted to breps by the router)
pub struct BrepProcessor {
    curves: CurveProcessor,
    surfaces: SurfaceProcessor,
}

impl BrepProcessor {
    pub fn new() -> Self {
        Self {
            curves: CurveProcessor::new(),
            surfaces: SurfaceProcessor::new(),
        }
    }

    /// Trimmed face for one brep face.
    ///
    /// The untrimmed surface face is trimmed by the outer loop's wire, then
    /// every other loop is added as a hole.
    pub fn process_face(
        &self,
        face: &BrepFace,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<FaceKey> {
        if face.outer_loop >= face.loops.len() {
            return Err(Error::DegenerateBoundary(format!(
                "outer loop {} of {} loops",
                face.outer_loop,
                face.loops.len()
            )));
        }

        let untrimmed = self.surfaces.process(&face.surface, arena, options)?;

        let mut outer = None;
        let mut inner = Vec::new();
        for (index, boundary) in face.loops.iter().enumerate() {
            let wire = self.loop_wire(boundary, arena, options)?;
            if index == face.outer_loop {
                outer = wire;
                if outer.is_none() {
                    return Err(Error::DegenerateBoundary(
                        "outer loop has no trims with edges".into(),
                    ));
                }
            } else if let Some(wire) = wire {
                inner.push(wire);
            } else {
                tracing::warn!(loop_index = index, "Skipping inner loop with no edges");
            }
        }

        let Some(outer) = outer else {
            return Err(Error::DegenerateBoundary("outer loop is missing".into()));
        };
        let trimmed = arena.trim_face_by_wire(untrimmed, outer, true, options.tolerance)?;
        Ok(arena.add_internal_boundaries(trimmed, &inner)?)
    }

    /// Wire through the edges of a loop's trims, or `None` when no trim
    /// carries an edge.
    fn loop_wire(
        &self,
        boundary: &BrepLoop,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<Option<WireKey>> {
        let mut edges = Vec::with_capacity(boundary.trims.len());
        for (index, trim) in boundary.trims.iter().enumerate() {
            let Some(curve) = &trim.edge else {
                tracing::warn!(trim = index, "Skipping trim without a backing edge");
                continue;
            };
            let topology = self.curves.process(curve, arena, options)?;
            edges.extend(flatten_edges(arena, topology)?);
        }

        if edges.is_empty() {
            return Ok(None);
        }
        Ok(Some(arena.add_wire_by_edges(&edges, options.tolerance)?))
    }

    /// Face, shell or cell for the faces of one brep.
    ///
    /// Returns `None` for no faces. Closed solids become cells; their shell
    /// must close after sewing.
    pub fn aggregate(
        &self,
        faces: &[FaceKey],
        is_solid: bool,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<Option<TopologyKey>> {
        let result = match faces {
            [] => None,
            [face] => Some(TopologyKey::Face(*face)),
            _ => {
                let shell = arena.add_shell_by_faces(faces, options.tolerance)?;
                if is_solid {
                    Some(TopologyKey::Cell(arena.add_cell(shell)?))
                } else {
                    Some(TopologyKey::Shell(shell))
                }
            }
        };

        tracing::debug!(
            faces = faces.len(),
            is_solid,
            result = result.map(|k| k.topology_type().as_str()),
            "Aggregated brep faces"
        );
        Ok(result)
    }
}

impl GeometryProcessor for BrepProcessor {
    type Input = Brep;
    type Output = Option<TopologyKey>;

    fn process(
        &self,
        brep: &Brep,
        arena: &mut TopologyArena,
        options: &ConvertOptions,
    ) -> Result<Option<TopologyKey>> {
        let mut faces = Vec::with_capacity(brep.faces.len());
        for face in &brep.faces {
            faces.push(self.process_face(face, arena, options)?);
        }
        self.aggregate(&faces, brep.is_solid, arena, options)
    }
}

impl Default for BrepProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brep::BrepTrim;
    use crate::curve::Curve;
    use crate::model::{Interval, Line, Plane};
    use crate::surface::Surface;
    use nalgebra::Point3;

    fn rectangle_trims(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<BrepTrim> {
        let corners = [
            Point3::new(x0, y0, 0.0),
            Point3::new(x1, y0, 0.0),
            Point3::new(x1, y1, 0.0),
            Point3::new(x0, y1, 0.0),
        ];
        (0..4)
            .map(|i| BrepTrim::new(Curve::Line(Line::new(corners[i], corners[(i + 1) % 4]))))
            .collect()
    }

    fn planar_face(loops: Vec<BrepLoop>) -> BrepFace {
        BrepFace {
            surface: Surface::Plane {
                plane: Plane::world_xy(),
                x: Interval::new(-1.0, 11.0),
                y: Interval::new(-1.0, 11.0),
            },
            loops,
            outer_loop: 0,
        }
    }

    #[test]
    fn outer_loop_trims_face() {
        let mut arena = TopologyArena::new();
        let face = planar_face(vec![BrepLoop {
            trims: rectangle_trims(0.0, 0.0, 10.0, 5.0),
        }]);
        let key = BrepProcessor::new()
            .process_face(&face, &mut arena, &ConvertOptions::default())
            .unwrap();

        assert_eq!(arena.face_vertices(key).unwrap().len(), 4);
        assert!(arena.face_inner_wires(key).unwrap().is_empty());
    }

    #[test]
    fn inner_loops_become_holes() {
        let mut arena = TopologyArena::new();
        let face = planar_face(vec![
            BrepLoop {
                trims: rectangle_trims(2.0, 2.0, 4.0, 4.0),
            },
            BrepLoop {
                trims: rectangle_trims(0.0, 0.0, 10.0, 10.0),
            },
        ]);
        let face = BrepFace {
            outer_loop: 1,
            ..face
        };
        let key = BrepProcessor::new()
            .process_face(&face, &mut arena, &ConvertOptions::default())
            .unwrap();

        assert_eq!(arena.face_inner_wires(key).unwrap().len(), 1);
        assert_eq!(arena.face_vertices(key).unwrap().len(), 8);
    }

    #[test]
    fn missing_trims_are_skipped() {
        let mut arena = TopologyArena::new();
        // A polyline trim covers two sides, one trim has no edge
        let mut trims = vec![
            BrepTrim::new(Curve::Polyline {
                points: vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(5.0, 0.0, 0.0),
                    Point3::new(5.0, 5.0, 0.0),
                ],
            }),
            BrepTrim::missing(),
        ];
        trims.push(BrepTrim::new(Curve::Polyline {
            points: vec![
                Point3::new(5.0, 5.0, 0.0),
                Point3::new(0.0, 5.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
            ],
        }));
        let face = planar_face(vec![BrepLoop { trims }]);
        let key = BrepProcessor::new()
            .process_face(&face, &mut arena, &ConvertOptions::default())
            .unwrap();

        assert_eq!(arena.face_vertices(key).unwrap().len(), 4);
    }

    #[test]
    fn empty_outer_loop_is_degenerate() {
        let mut arena = TopologyArena::new();
        let face = planar_face(vec![BrepLoop {
            trims: vec![BrepTrim::missing(), BrepTrim::missing()],
        }]);
        let result = BrepProcessor::new().process_face(&face, &mut arena, &ConvertOptions::default());
        assert!(matches!(result, Err(Error::DegenerateBoundary(_))));
    }

    #[test]
    fn empty_inner_loop_is_ignored() {
        let mut arena = TopologyArena::new();
        let face = planar_face(vec![
            BrepLoop {
                trims: rectangle_trims(0.0, 0.0, 10.0, 10.0),
            },
            BrepLoop {
                trims: vec![BrepTrim::missing()],
            },
        ]);
        let key = BrepProcessor::new()
            .process_face(&face, &mut arena, &ConvertOptions::default())
            .unwrap();
        assert!(arena.face_inner_wires(key).unwrap().is_empty());
    }

    #[test]
    fn outer_loop_index_must_exist() {
        let mut arena = TopologyArena::new();
        let face = BrepFace {
            outer_loop: 3,
            ..planar_face(vec![BrepLoop {
                trims: rectangle_trims(0.0, 0.0, 1.0, 1.0),
            }])
        };
        let result = BrepProcessor::new().process_face(&face, &mut arena, &ConvertOptions::default());
        assert!(matches!(result, Err(Error::DegenerateBoundary(_))));
    }

    #[test]
    fn aggregate_by_face_count() {
        let mut arena = TopologyArena::new();
        let processor = BrepProcessor::new();
        let options = ConvertOptions::default();

        assert_eq!(processor.aggregate(&[], true, &mut arena, &options).unwrap(), None);

        let brep = Brep {
            faces: vec![
                planar_face(vec![BrepLoop {
                    trims: rectangle_trims(0.0, 0.0, 1.0, 1.0),
                }]),
                planar_face(vec![BrepLoop {
                    trims: rectangle_trims(1.0, 0.0, 2.0, 1.0),
                }]),
            ],
            is_solid: false,
        };
        let single = Brep {
            faces: brep.faces[..1].to_vec(),
            is_solid: false,
        };

        let face = processor.process(&single, &mut arena, &options).unwrap();
        assert!(matches!(face, Some(TopologyKey::Face(_))));

        let shell = processor.process(&brep, &mut arena, &options).unwrap();
        let Some(TopologyKey::Shell(shell)) = shell else {
            panic!("expected a shell, got {shell:?}");
        };
        assert_eq!(arena.shell_faces(shell).unwrap().len(), 2);
        assert_eq!(arena.shell_vertices(shell).unwrap().len(), 6);
    }
}
