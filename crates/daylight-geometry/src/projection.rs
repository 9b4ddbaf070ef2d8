// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Angular projection
//!
//! A vantage point sees the world as (plan, section) angles. Plan is the
//! horizontal angle left or right of the line of sight toward the site, in
//! [-90, 90]. Section is the elevation angle above the vantage point, in
//! [0, 90] for points above grade. The chart mapping squashes the section
//! axis so that the whole upper hemisphere fits a fixed-height diagram.

use nalgebra::{Point3, Vector3};

/// Plan angle in degrees from a perpendicular distance `s` and a signed
/// along-street offset `d`
///
/// 0 is straight toward the site, ±90 along the street. `(0, 0)` maps to 0.
pub fn plan_angle(s: f64, d: f64) -> f64 {
    if s == 0.0 && d == 0.0 {
        return 0.0;
    }
    let raw = (s / d).atan().to_degrees();
    if raw > 0.0 {
        90.0 - raw
    } else {
        -90.0 - raw
    }
}

/// Section angle in degrees from a height `h` over a perpendicular distance `s`
///
/// `(0, 0)` maps to 0.
pub fn section_angle(h: f64, s: f64) -> f64 {
    if h == 0.0 && s == 0.0 {
        return 0.0;
    }
    (h / s).atan().to_degrees()
}

/// Unscaled chart height for a (plan, section) pair
fn chart_y_raw(plan: f64, section: f64) -> f64 {
    let a = (section.to_radians().tan() * plan.to_radians().cos()).atan();
    (0.625 * (a + 0.13 * a * a)).tan()
}

/// Maps raw angles to chart draw coordinates
#[derive(Debug, Clone, Copy)]
pub struct ChartProjection {
    factor: f64,
    debug: bool,
}

impl ChartProjection {
    /// Chart whose 90° section line sits at `chart_height` straight ahead
    pub fn new(chart_height: f64) -> Self {
        Self {
            factor: chart_height / chart_y_raw(0.0, 90.0),
            debug: false,
        }
    }

    /// Identity mapping: draw coordinates are the raw angles
    pub fn debug() -> Self {
        Self {
            factor: 1.0,
            debug: true,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Draw coordinates `[x, y]` for a (plan, section) pair
    #[inline]
    pub fn map(&self, plan: f64, section: f64) -> [f64; 2] {
        if self.debug {
            [plan, section]
        } else {
            [plan, chart_y_raw(plan, section) * self.factor]
        }
    }
}

/// A projected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisPoint {
    pub plan: f64,
    pub section: f64,
    /// Chart draw coordinates
    pub draw: [f64; 2],
    /// Source point in model space
    pub position: Point3<f64>,
}

impl AnalysisPoint {
    /// Raw angle-space coordinate
    #[inline]
    pub fn angles(&self) -> [f64; 2] {
        [self.plan, self.section]
    }
}

/// Reference frame of a vantage point
#[derive(Debug, Clone, Copy)]
pub struct VantageFrame {
    pub origin: Point3<f64>,
    /// Unit direction along the street
    pub start: Vector3<f64>,
    /// Unit direction toward the site
    pub front: Vector3<f64>,
}

impl VantageFrame {
    pub fn new(origin: Point3<f64>, start: Vector3<f64>, front: Vector3<f64>) -> Self {
        Self {
            origin,
            start,
            front,
        }
    }

    /// Perpendicular distance, along-street offset and height of `p`
    #[inline]
    pub fn components(&self, p: &Point3<f64>) -> (f64, f64, f64) {
        let rel = p - self.origin;
        (rel.dot(&self.front).abs(), rel.dot(&self.start), p.z - self.origin.z)
    }

    /// Raw (plan, section) angles of `p`
    pub fn angles(&self, p: &Point3<f64>) -> (f64, f64) {
        let (s, d, h) = self.components(p);
        (plan_angle(s, d), section_angle(h, s))
    }

    /// Project `p` into an analysis point
    pub fn project(&self, p: &Point3<f64>, chart: &ChartProjection) -> AnalysisPoint {
        let (plan, section) = self.angles(p);
        AnalysisPoint {
            plan,
            section,
            draw: chart.map(plan, section),
            position: *p,
        }
    }
}
