// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Evaluation results handed back to collaborators
//!
//! Everything here is plain data. Diagram geometry is expressed as raw
//! coordinate lists so that renderers need no knowledge of the engine's types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score components for one vantage point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Sum of blocked square weights (≤ 0)
    pub daylight_blockage: f64,
    /// Credit for clear squares below the cutoff (≥ 0)
    pub unblocked_daylight_credit: f64,
    /// Penalty for encroachment beyond the profile curves (≤ 0)
    pub profile_penalty: f64,
    /// Theoretical ceiling: sky area available to this point
    pub available_daylight: f64,
    pub daylight_remaining: f64,
    /// Remaining daylight as a percentage of available daylight
    pub daylight_score: f64,
}

impl ScoreBreakdown {
    /// Combine the four measured components into remaining daylight and score
    ///
    /// A point with no available daylight scores 0.
    pub fn from_components(blockage: f64, credit: f64, penalty: f64, available: f64) -> Self {
        let remaining = blockage + credit + penalty + available;
        let score = if available > 0.0 {
            remaining / available * 100.0
        } else {
            0.0
        };
        Self {
            daylight_blockage: blockage,
            unblocked_daylight_credit: credit,
            profile_penalty: penalty,
            available_daylight: available,
            daylight_remaining: remaining,
            daylight_score: score,
        }
    }
}

/// Counts of recoverable problems met while scoring a point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Face polygons dropped for zero area or self-intersection
    pub skipped_faces: usize,
    /// Boolean operations that produced no result for non-empty input
    pub failed_booleans: usize,
}

impl Diagnostics {
    pub fn merge(&mut self, other: Diagnostics) {
        self.skipped_faces += other.skipped_faces;
        self.failed_booleans += other.failed_booleans;
    }

    pub fn is_clean(&self) -> bool {
        self.skipped_faces == 0 && self.failed_booleans == 0
    }
}

/// Polygon with holes as raw coordinates
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonData {
    pub exterior: Vec<[f64; 2]>,
    #[serde(default)]
    pub holes: Vec<Vec<[f64; 2]>>,
}

/// A scoring cell as drawn on the chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquareData {
    /// Plan band (1 = outermost)
    pub plan_id: u8,
    /// Lower bound of the section band, degrees
    pub section_id: f64,
    /// Angle-space rectangle `[min, max]` as (plan, section)
    pub bounds: [[f64; 2]; 2],
    pub multiplier: f64,
    pub potential_score: f64,
    pub potential_profile_penalty: f64,
    #[serde(default)]
    pub sub_squares: Vec<SquareData>,
}

/// Plain geometry for one vantage point's diagram
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramData {
    /// Silhouette in raw (plan, section) angles, used for scoring
    pub raw_silhouette: Vec<PolygonData>,
    /// Silhouette in chart coordinates
    pub draw_silhouette: Vec<PolygonData>,
    pub squares: Vec<SquareData>,
    /// Profile curves in chart coordinates
    pub profile_curves: Vec<Vec<[f64; 2]>>,
    pub major_grid_lines: Vec<Vec<[f64; 2]>>,
    pub minor_grid_lines: Vec<Vec<[f64; 2]>>,
    pub boundary_lines: Vec<Vec<[f64; 2]>>,
    /// Projected massing edges in chart coordinates
    pub building_edges: Vec<Vec<[f64; 2]>>,
}

/// Result for one vantage point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VantagePointReport {
    /// `"{street}: VP {n}"`
    pub name: String,
    pub position: [f64; 3],
    /// Ordered (min, max) plan-angle interval scored by this point
    pub daylight_boundaries: [f64; 2],
    pub score: ScoreBreakdown,
    pub diagnostics: Diagnostics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<DiagramData>,
}

/// Result for one vantage street
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreetReport {
    pub name: String,
    /// Mean of the street's vantage point scores
    pub score: f64,
    pub vantage_point_count: usize,
    pub centerline_offset: f64,
    /// Front lot line length, the street's weight in the overall score
    pub length: f64,
    pub vantage_points: Vec<VantagePointReport>,
}

/// Pass/fail verdict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("PASS"),
            Verdict::Fail => f.write_str("FAIL"),
        }
    }
}

/// Complete evaluation outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub lowest_street_score: f64,
    pub overall_score: f64,
    pub result: Verdict,
    pub streets: Vec<StreetReport>,
}

impl EvaluationReport {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All vantage point reports across streets
    pub fn vantage_points(&self) -> impl Iterator<Item = &VantagePointReport> {
        self.streets.iter().flat_map(|s| s.vantage_points.iter())
    }
}
