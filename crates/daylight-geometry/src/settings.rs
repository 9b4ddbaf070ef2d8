// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regulation constants
//!
//! Distances are in feet; convert with [`daylight_model::feet_to_meters`]
//! before mixing them with model coordinates.

/// Distance from a centerline end to its vantage point
pub const VANTAGE_POINT_DISTANCE_FT: f64 = 250.0;

/// Centerlines longer than this get a third, middle vantage point
pub const LONG_CENTERLINE_FT: f64 = 500.0;

/// Section angle dividing the credit zone from the blockage zone
pub const SECTION_CUTOFF: f64 = 70.0;

/// Upper bound of the near daylight boundary push
pub const MAX_BOUNDARY_PUSH_FT: f64 = 100.0;

/// Only solids reaching this height block daylight on subdistrict sites
pub const SUBDISTRICT_CUT_HEIGHT_FT: f64 = 150.0;

/// Spacing of plan grid offsets along the front lot line
pub const PLAN_STEP_FT: f64 = 5.0;

/// Plan grid extends this far either side of the vantage point axis
pub const PLAN_EXTENT_FT: f64 = 250.0;

/// Minor plan cells per major plan cell
pub const PLAN_MINORS_PER_MAJOR: usize = 5;

/// Section major bands: (start, end, major step, minor step)
pub const SECTION_BANDS: [(f64, f64, f64, f64); 2] = [
    (0.0, SECTION_CUTOFF, 10.0, 5.0),
    (SECTION_CUTOFF, 90.0, 2.0, 1.0),
];

/// Full-cell potential scores
pub const BLOCKED_SCORE: f64 = -1.0;
pub const CREDIT_SCORE: f64 = 0.3;

/// Share of a full cell carried by one sub cell (plan minor weight)
pub const SUB_MULTIPLIER: f64 = 1.0 / PLAN_MINORS_PER_MAJOR as f64;

/// Sub cells score one tenth of their parent
pub const SUB_SCORE_RATIO: f64 = 0.1;

/// Profile curves run along the far lot line for this distance
pub const PROFILE_RUN_FT: f64 = 90.0;

/// Section angle at the front lot line end of a profile curve
pub const PROFILE_BASE_SECTION: f64 = 72.0;

/// Section degrees gained per foot along a profile curve
pub const PROFILE_SECTION_PER_FT: f64 = 0.2;

/// Angle-space tolerance
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Model-space tolerance for geometric coincidence
pub const MODEL_EPSILON: f64 = 1e-6;

/// Lowest street score allowed to pass
pub const MIN_STREET_SCORE: f64 = 66.0;

/// Overall score required to pass
pub const MIN_OVERALL_SCORE: f64 = 75.0;

/// Overall score required to pass on subdistrict sites
pub const MIN_OVERALL_SCORE_SUBDISTRICT: f64 = 66.0;

/// First section band carrying a profile penalty
const PENALTY_SECTION_START: u32 = 72;
const PENALTY_SECTION_STEP: u32 = 2;
const PENALTY_SECTION_ROWS: u32 = 9;
const PENALTY_PLAN_COLUMNS: u8 = 8;

/// Profile encroachment penalty for a full cell
///
/// Keyed on plan id (1 = outermost) and the lower bound of the section band.
/// Rows cover sections 72..=88 in 2° steps, columns plan ids 1..=8. Returns
/// `None` outside the table. Values grow with height and fall toward the
/// center of the view.
pub fn profile_encroachment(plan_id: u8, section_band: f64) -> Option<f64> {
    if plan_id == 0 || plan_id > PENALTY_PLAN_COLUMNS {
        return None;
    }
    let band = section_band.floor();
    if band < 0.0 || (band - section_band).abs() > ANGLE_EPSILON {
        return None;
    }
    let band = band as u32;
    if band < PENALTY_SECTION_START || (band - PENALTY_SECTION_START) % PENALTY_SECTION_STEP != 0
    {
        return None;
    }
    let row = (band - PENALTY_SECTION_START) / PENALTY_SECTION_STEP;
    if row >= PENALTY_SECTION_ROWS {
        return None;
    }
    let column = f64::from(plan_id - 1);
    Some((0.2 + 0.1 * f64::from(row)) * (1.0 - 0.1 * column))
}
