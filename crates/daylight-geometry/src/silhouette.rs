// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Silhouettes of massing as seen from a vantage point

use crate::analysis::AnalysisGraph;
use crate::overlay::{is_self_intersecting, normalize_ccw, signed_area, union_all, Contour, Region};
use crate::projection::{AnalysisPoint, ChartProjection, VantageFrame};
use crate::settings::ANGLE_EPSILON;
use daylight_model::Diagnostics;
use rustc_hash::FxHashMap;

/// Face polygons of every graph, projected from one vantage point
#[derive(Debug, Clone, Default)]
pub struct ProjectedFaces {
    /// Rings in raw (plan, section) angles
    pub raw: Vec<Contour>,
    /// Rings in chart coordinates
    pub draw: Vec<Contour>,
    /// Edge chains in chart coordinates
    pub edges: Vec<Vec<[f64; 2]>>,
    pub diagnostics: Diagnostics,
}

/// Why a face ring was rejected, if it was
fn rejection(ring: &[[f64; 2]]) -> Option<&'static str> {
    if ring.len() < 3 {
        Some("fewer than three points")
    } else if signed_area(ring).abs() <= ANGLE_EPSILON {
        Some("zero area")
    } else if is_self_intersecting(ring) {
        Some("self-intersecting")
    } else {
        None
    }
}

impl ProjectedFaces {
    /// Project every face of `graphs`
    ///
    /// Degenerate raw rings are logged, counted and dropped. Draw rings are
    /// dropped silently when their raw counterpart is rejected.
    pub fn project<'a>(
        graphs: impl IntoIterator<Item = &'a AnalysisGraph>,
        frame: &VantageFrame,
        chart: &ChartProjection,
    ) -> Self {
        let mut out = Self::default();

        for graph in graphs {
            let points: FxHashMap<u64, AnalysisPoint> = graph
                .vertices()
                .map(|(id, p)| (*id, frame.project(p, chart)))
                .collect();

            for (index, face) in graph.faces().iter().enumerate() {
                let loop_points: Vec<&AnalysisPoint> = graph
                    .face_loop(face)
                    .iter()
                    .filter_map(|id| points.get(id))
                    .collect();

                let mut raw: Contour = loop_points.iter().map(|p| p.angles()).collect();
                if let Some(reason) = rejection(&raw) {
                    log::warn!(
                        "Skipping face {} of '{}' from vantage point: {}",
                        index,
                        graph.name,
                        reason
                    );
                    out.diagnostics.skipped_faces += 1;
                    continue;
                }
                normalize_ccw(&mut raw);

                let mut draw: Contour = loop_points.iter().map(|p| p.draw).collect();
                if rejection(&draw).is_none() {
                    normalize_ccw(&mut draw);
                    out.draw.push(draw);
                }
                out.raw.push(raw);
            }

            for chain in graph.edge_chains() {
                let line: Vec<[f64; 2]> = chain
                    .iter()
                    .filter_map(|id| points.get(id).map(|p| p.draw))
                    .collect();
                if line.len() >= 2 {
                    out.edges.push(line);
                }
            }
        }
        out
    }
}

/// Unioned outlines of the massing
#[derive(Debug, Clone)]
pub struct Silhouette {
    /// Scoring outline in raw angles
    pub raw: Region,
    /// Outline in chart coordinates
    pub draw: Region,
    pub diagnostics: Diagnostics,
}

fn union_or_empty(rings: Vec<Contour>, what: &str, diagnostics: &mut Diagnostics) -> Region {
    match union_all(rings) {
        Ok(shape) => Region::new(shape),
        Err(e) => {
            log::warn!("{} silhouette: {}", what, e);
            diagnostics.failed_booleans += 1;
            Region::empty()
        }
    }
}

impl Silhouette {
    /// Union projected faces into raw and draw outlines
    ///
    /// With a debug chart the draw outline is the raw outline.
    pub fn from_faces(faces: ProjectedFaces, chart: &ChartProjection) -> Self {
        let mut diagnostics = faces.diagnostics;
        let raw = union_or_empty(faces.raw, "Raw", &mut diagnostics);
        let draw = if chart.is_debug() {
            raw.clone()
        } else {
            union_or_empty(faces.draw, "Draw", &mut diagnostics)
        };
        Self {
            raw,
            draw,
            diagnostics,
        }
    }

    /// Raw outline only, for scoring against a subset of the massing
    pub fn raw_only(faces: ProjectedFaces) -> (Region, Diagnostics) {
        let mut diagnostics = faces.diagnostics;
        let raw = union_or_empty(faces.raw, "Raw", &mut diagnostics);
        (raw, diagnostics)
    }
}
