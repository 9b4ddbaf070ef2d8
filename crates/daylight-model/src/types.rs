// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core input types: sites, streets and line segments
//!
//! All coordinates are in model units (meters). Regulation distances that are
//! stated in feet are converted with [`feet_to_meters`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters per foot
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Convert a length in feet to model units
#[inline]
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

/// Convert a length in model units to feet
#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

/// A straight segment between two 3D points
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

impl LineSegment {
    pub fn new(start: [f64; 3], end: [f64; 3]) -> Self {
        Self { start, end }
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        let dz = self.end[2] - self.start[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Point at normalized parameter `t` (0 = start, 1 = end)
    pub fn point_at(&self, t: f64) -> [f64; 3] {
        [
            self.start[0] + (self.end[0] - self.start[0]) * t,
            self.start[1] + (self.end[1] - self.start[1]) * t,
            self.start[2] + (self.end[2] - self.start[2]) * t,
        ]
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> [f64; 3] {
        self.point_at(0.5)
    }
}

/// A site boundary
///
/// Only the axis-aligned bounding rectangle of the perimeter is used by the
/// evaluation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Site {
    /// Name of the site (informational)
    #[serde(default)]
    pub name: Option<String>,
    /// Closed perimeter, last point not repeated
    pub perimeter: Vec<[f64; 3]>,
}

impl Site {
    pub fn new(perimeter: Vec<[f64; 3]>) -> Self {
        Self {
            name: None,
            perimeter,
        }
    }

    /// Axis-aligned rectangle `(min, max)` in plan, or `None` for an empty perimeter
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.perimeter.first()?;
        let mut min = [first[0], first[1]];
        let mut max = min;
        for p in &self.perimeter[1..] {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        Some((min, max))
    }

    /// Plan area of the perimeter (shoelace)
    pub fn area(&self) -> f64 {
        let n = self.perimeter.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.perimeter[i];
            let b = self.perimeter[(i + 1) % n];
            twice += a[0] * b[1] - b[0] * a[1];
        }
        (twice / 2.0).abs()
    }

    /// Pick the largest site by area
    pub fn largest(sites: impl IntoIterator<Item = Site>) -> Option<Site> {
        sites
            .into_iter()
            .max_by(|a, b| a.area().total_cmp(&b.area()))
    }
}

/// Width class of a vantage street
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StreetWidth {
    #[serde(rename = "60ft")]
    Ft60,
    #[serde(rename = "75ft")]
    Ft75,
    #[serde(rename = "80ft")]
    Ft80,
    #[serde(rename = "100ft")]
    Ft100,
    #[serde(rename = "140ft")]
    Ft140,
}

impl StreetWidth {
    /// Centerline distance used for the street, in feet
    ///
    /// The 75 ft class is evaluated with the 80 ft distance.
    pub fn centerline_distance_ft(self) -> f64 {
        match self {
            StreetWidth::Ft60 => 60.0,
            StreetWidth::Ft75 | StreetWidth::Ft80 => 80.0,
            StreetWidth::Ft100 => 100.0,
            StreetWidth::Ft140 => 140.0,
        }
    }

    /// Distance from the front lot line to the street centerline, in model units
    pub fn centerline_offset(self) -> f64 {
        feet_to_meters(self.centerline_distance_ft()) / 2.0
    }
}

impl fmt::Display for StreetWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StreetWidth::Ft60 => "60ft",
            StreetWidth::Ft75 => "75ft",
            StreetWidth::Ft80 => "80ft",
            StreetWidth::Ft100 => "100ft",
            StreetWidth::Ft140 => "140ft",
        };
        f.write_str(label)
    }
}

/// A street from which the massing is evaluated
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VantageStreet {
    pub name: String,
    pub width: StreetWidth,
    /// Rough location of the street; need not be straight or parallel to the lot
    pub line: Option<LineSegment>,
    /// Depth of the block (not the lot) measured from this street
    #[serde(default = "default_block_depth")]
    pub block_depth_ft: f64,
    #[serde(default)]
    pub street_wall_continuity: bool,
    /// Replaces the resolved front lot line when present
    #[serde(default)]
    pub front_lot_line_override: Option<LineSegment>,
}

fn default_block_depth() -> f64 {
    200.0
}

impl VantageStreet {
    pub fn new(name: impl Into<String>, width: StreetWidth, line: LineSegment) -> Self {
        Self {
            name: name.into(),
            width,
            line: Some(line),
            block_depth_ft: default_block_depth(),
            street_wall_continuity: false,
            front_lot_line_override: None,
        }
    }

    pub fn with_block_depth_ft(mut self, depth: f64) -> Self {
        self.block_depth_ft = depth;
        self
    }

    pub fn with_street_wall_continuity(mut self, continuity: bool) -> Self {
        self.street_wall_continuity = continuity;
        self
    }
}
