// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Half-edge analysis graph
//!
//! Each massing solid is decomposed once into an arena of vertices, edges and
//! faces keyed by integer ids. Edges hold an ordered list of vertex ids so
//! that a subdivided edge is still one edge, shared by both of its faces.
//! Faces are loops of (edge id, forward) pairs.
//!
//! Long non-vertical edges are subdivided before projection: a straight edge
//! in model space becomes a curve in angle space, and the extra vertices keep
//! that curve faithful.

use crate::error::{Error, Result};
use crate::settings::MODEL_EPSILON;
use daylight_model::{feet_to_meters, EvaluationConfig, MassingSolid, SolidGeometry};
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// One use of an edge inside a face loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceEdge {
    pub edge: u64,
    /// Traversed from first to last vertex id
    pub forward: bool,
}

/// Decomposed solid, read-only after construction
#[derive(Debug, Clone, Default)]
pub struct AnalysisGraph {
    pub name: String,
    vertices: FxHashMap<u64, Point3<f64>>,
    edges: FxHashMap<u64, Vec<u64>>,
    faces: Vec<Vec<FaceEdge>>,
}

type QuantizedKey = (i64, i64, i64);

fn quantize(p: &Point3<f64>) -> QuantizedKey {
    (
        (p.x / MODEL_EPSILON).round() as i64,
        (p.y / MODEL_EPSILON).round() as i64,
        (p.z / MODEL_EPSILON).round() as i64,
    )
}

/// Parameters along an edge of length `length` at which it is split
///
/// Whole segments of `segment` length are laid out from the middle, with the
/// remainder divided evenly between both ends.
pub fn subdivision_offsets(length: f64, segment: f64) -> Vec<f64> {
    if segment <= 0.0 || length <= segment {
        return Vec::new();
    }
    let n = (length / segment).floor() as usize;
    let remainder = length - n as f64 * segment;
    if remainder > MODEL_EPSILON {
        (0..=n)
            .map(|k| remainder / 2.0 + k as f64 * segment)
            .collect()
    } else {
        (1..n).map(|k| k as f64 * segment).collect()
    }
}

impl AnalysisGraph {
    /// Build the graph of a solid with its placement applied
    pub fn from_solid(solid: &MassingSolid, config: &EvaluationConfig) -> Result<Self> {
        let mut graph = match &solid.geometry {
            SolidGeometry::FaceLoops { faces } => Self::from_face_loops(solid, faces),
            SolidGeometry::Brep(brep) => Self::from_brep(solid, brep)?,
        };
        graph.name = solid.name.clone();

        if !config.skip_subdivision {
            graph.subdivide(feet_to_meters(config.subdivision_length_ft));
        }

        log::debug!(
            "Analysis graph '{}': {} vertices, {} edges, {} faces",
            graph.name,
            graph.vertices.len(),
            graph.edges.len(),
            graph.faces.len()
        );
        Ok(graph)
    }

    fn from_face_loops(solid: &MassingSolid, faces: &[Vec<[f64; 3]>]) -> Self {
        let mut graph = Self::default();
        let mut vertex_ids: FxHashMap<QuantizedKey, u64> = FxHashMap::default();
        let mut edge_ids: FxHashMap<(u64, u64), u64> = FxHashMap::default();

        for face in faces {
            let ids: Vec<u64> = face
                .iter()
                .map(|p| {
                    let pos = Point3::from(solid.transform_point(*p));
                    let next = vertex_ids.len() as u64;
                    *vertex_ids.entry(quantize(&pos)).or_insert_with(|| {
                        graph.vertices.insert(next, pos);
                        next
                    })
                })
                .collect();

            let mut loop_edges = Vec::with_capacity(ids.len());
            for i in 0..ids.len() {
                let a = ids[i];
                let b = ids[(i + 1) % ids.len()];
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                let next = edge_ids.len() as u64;
                let edge = *edge_ids.entry(key).or_insert_with(|| {
                    graph.edges.insert(next, vec![key.0, key.1]);
                    next
                });
                loop_edges.push(FaceEdge {
                    edge,
                    forward: a == key.0,
                });
            }

            if loop_edges.len() >= 3 {
                graph.faces.push(loop_edges);
            }
        }
        graph
    }

    fn from_brep(solid: &MassingSolid, brep: &daylight_model::BrepSolid) -> Result<Self> {
        let mut graph = Self::default();
        for v in &brep.vertices {
            graph
                .vertices
                .insert(v.id, Point3::from(solid.transform_point(v.position)));
        }
        for e in &brep.edges {
            for vertex in [e.start, e.end] {
                if !graph.vertices.contains_key(&vertex) {
                    return Err(Error::MissingVertex {
                        edge: e.id,
                        vertex,
                    });
                }
            }
            graph.edges.insert(e.id, vec![e.start, e.end]);
        }
        for (index, face) in brep.faces.iter().enumerate() {
            let mut loop_edges = Vec::with_capacity(face.edges.len());
            for usage in &face.edges {
                if !graph.edges.contains_key(&usage.edge) {
                    return Err(Error::MissingEdge {
                        face: index,
                        edge: usage.edge,
                    });
                }
                loop_edges.push(FaceEdge {
                    edge: usage.edge,
                    forward: !usage.reversed,
                });
            }
            graph.faces.push(loop_edges);
        }
        Ok(graph)
    }

    /// Split long non-vertical edges into segments no longer than `segment`
    fn subdivide(&mut self, segment: f64) {
        let mut next_id = self.vertices.keys().max().map_or(0, |m| m + 1);
        let mut edge_ids: Vec<u64> = self.edges.keys().copied().collect();
        edge_ids.sort_unstable();

        for id in edge_ids {
            let Some(ids) = self.edges.get(&id) else {
                continue;
            };
            let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
                continue;
            };
            let (Some(a), Some(b)) = (self.vertices.get(&first), self.vertices.get(&last)) else {
                continue;
            };
            let (a, b) = (*a, *b);
            let dir = b - a;
            if dir.xy().norm() <= MODEL_EPSILON {
                continue;
            }
            let length = dir.norm();
            let offsets = subdivision_offsets(length, segment);
            if offsets.is_empty() {
                continue;
            }

            let mut chain = Vec::with_capacity(offsets.len() + 2);
            chain.push(first);
            for t in offsets {
                self.vertices.insert(next_id, a + dir * (t / length));
                chain.push(next_id);
                next_id += 1;
            }
            chain.push(last);
            self.edges.insert(id, chain);
        }
    }

    pub fn vertex(&self, id: u64) -> Option<&Point3<f64>> {
        self.vertices.get(&id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (&u64, &Point3<f64>)> {
        self.vertices.iter()
    }

    /// Ordered vertex ids of an edge
    pub fn edge(&self, id: u64) -> Option<&[u64]> {
        self.edges.get(&id).map(|v| v.as_slice())
    }

    /// Edge vertex chains in ascending edge id order
    pub fn edge_chains(&self) -> Vec<&[u64]> {
        let mut ids: Vec<&u64> = self.edges.keys().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.edge(*id))
            .collect()
    }

    pub fn faces(&self) -> &[Vec<FaceEdge>] {
        &self.faces
    }

    /// Vertex ids around a face in traversal order
    ///
    /// Each edge contributes its points in traversal direction minus the last,
    /// which is the first point of the following edge.
    pub fn face_loop(&self, face: &[FaceEdge]) -> Vec<u64> {
        let mut ids = Vec::new();
        for usage in face {
            let Some(chain) = self.edge(usage.edge) else {
                continue;
            };
            let take = chain.len().saturating_sub(1);
            if usage.forward {
                ids.extend(chain.iter().take(take));
            } else {
                ids.extend(chain.iter().rev().take(take));
            }
        }
        ids
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
