// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile curves
//!
//! A profile curve starts at the 72° section line where the far lot line
//! meets the front lot line and climbs one degree for every 5 ft it moves
//! back along the far lot line. Blockage beyond the curve, toward the street
//! ends of the view, is penalized.

use crate::grid::Interval;
use crate::overlay::Contour;
use crate::projection::plan_angle;
use crate::settings::{
    PROFILE_BASE_SECTION, PROFILE_RUN_FT, PROFILE_SECTION_PER_FT, VANTAGE_POINT_DISTANCE_FT,
};
use daylight_model::feet_to_meters;
use nalgebra::Point2;

/// Side of the line of sight a curve lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Negative plan angles
    Left,
    /// Positive plan angles
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// One profile curve in raw (plan, section) angles
#[derive(Debug, Clone)]
pub struct ProfileCurve {
    pub side: Side,
    /// Ordered from the front lot line back
    pub points: Vec<Point2<f64>>,
}

impl ProfileCurve {
    /// Build the curve for a point `offset` (model units) from the front lot line
    pub fn new(side: Side, offset: f64) -> Self {
        let steps = PROFILE_RUN_FT as usize;
        let reach = feet_to_meters(VANTAGE_POINT_DISTANCE_FT);
        let points = (0..=steps)
            .map(|x| {
                let x = x as f64;
                let section = PROFILE_BASE_SECTION + x * PROFILE_SECTION_PER_FT;
                let plan = plan_angle(offset + feet_to_meters(x), reach);
                Point2::new(side.sign() * plan, section)
            })
            .collect();
        Self { side, points }
    }

    /// Plan extent of the curve
    pub fn plan_range(&self) -> Interval {
        let first = self.points.first().map_or(0.0, |p| p.x);
        let last = self.points.last().map_or(0.0, |p| p.x);
        Interval::new(first, last)
    }

    /// Curve points as raw coordinates
    pub fn polyline(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Closed region between the curve and the outer edge of the view
    pub fn polygon(&self) -> Contour {
        let edge = self.side.sign() * 90.0;
        let mut ring = self.polyline();
        ring.push([edge, 90.0]);
        ring.push([edge, PROFILE_BASE_SECTION]);
        ring
    }
}

/// Profile curves whose plan range touches `domain`
pub fn profile_curves(offset: f64, domain: &Interval) -> Vec<ProfileCurve> {
    [Side::Left, Side::Right]
        .into_iter()
        .map(|side| ProfileCurve::new(side, offset))
        .filter(|curve| {
            let range = curve.plan_range();
            range.min <= domain.max && range.max >= domain.min
        })
        .collect()
}
