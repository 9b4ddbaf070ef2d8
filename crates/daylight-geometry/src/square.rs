// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoring cells
//!
//! A [`Square`] crosses one clipped plan major with one section major. Its
//! [`SubSquare`]s cross the plan minors with the section minors, so a full
//! Square has ten of them. Sub cells carry one tenth of the parent's potential
//! score and penalty; their contribution is further scaled by
//! [`SubSquare::share`] so that clipped minors count in proportion to their
//! width.

use crate::grid::{Interval, PlanCell, PlanGrid, SectionCell, SectionGrid};
use crate::settings::{
    profile_encroachment, ANGLE_EPSILON, BLOCKED_SCORE, CREDIT_SCORE, SUB_MULTIPLIER,
    SUB_SCORE_RATIO,
};
use daylight_model::SquareData;
use geo::{coord, Rect};

/// A sub cell of a [`Square`]
#[derive(Debug, Clone)]
pub struct SubSquare {
    /// Angle-space rectangle, x = plan, y = section
    pub rect: Rect<f64>,
    pub multiplier: f64,
    pub potential_score: f64,
    pub potential_profile_penalty: f64,
}

impl SubSquare {
    /// Fraction of a full-width sub cell this one covers
    #[inline]
    pub fn share(&self) -> f64 {
        self.multiplier / SUB_MULTIPLIER
    }

    /// Potential score weighted by share
    #[inline]
    pub fn weighted_score(&self) -> f64 {
        self.potential_score * self.share()
    }

    /// Profile penalty weighted by share
    #[inline]
    pub fn weighted_penalty(&self) -> f64 {
        self.potential_profile_penalty * self.share()
    }
}

/// A graded scoring cell
#[derive(Debug, Clone)]
pub struct Square {
    pub plan_id: u8,
    /// Lower bound of the section band
    pub section_id: f64,
    pub rect: Rect<f64>,
    pub multiplier: f64,
    pub potential_score: f64,
    pub potential_profile_penalty: f64,
    pub above_cutoff: bool,
    pub sub_squares: Vec<SubSquare>,
}

fn rect(plan: Interval, section: Interval) -> Rect<f64> {
    Rect::new(
        coord! { x: plan.min, y: section.min },
        coord! { x: plan.max, y: section.max },
    )
}

fn potential_score(above_cutoff: bool, credit_eligible: bool, full: bool, ratio: f64) -> f64 {
    if above_cutoff {
        BLOCKED_SCORE * ratio
    } else if credit_eligible && full {
        CREDIT_SCORE * ratio
    } else {
        0.0
    }
}

impl Square {
    /// Cross a plan cell with a section cell
    ///
    /// `credit_eligible` is false when street wall continuity removes the
    /// unblocked credit.
    pub fn new(plan: &PlanCell, section: &SectionCell, credit_eligible: bool) -> Self {
        let above_cutoff = section.is_above_cutoff();
        let section_id = section.id();
        let table = profile_encroachment(plan.id, section_id).unwrap_or(0.0);

        let parent_full = (plan.multiplier - 1.0).abs() <= ANGLE_EPSILON;
        let mut sub_squares = Vec::with_capacity(plan.minors.len() * section.minors.len());
        for minor in &plan.minors {
            // Sub cells of a clipped Square never earn credit
            let full = parent_full && (minor.multiplier - SUB_MULTIPLIER).abs() <= ANGLE_EPSILON;
            for sec in &section.minors {
                sub_squares.push(SubSquare {
                    rect: rect(minor.interval, *sec),
                    multiplier: minor.multiplier,
                    potential_score: potential_score(
                        above_cutoff,
                        credit_eligible,
                        full,
                        SUB_SCORE_RATIO,
                    ),
                    potential_profile_penalty: -table * SUB_SCORE_RATIO,
                });
            }
        }

        Self {
            plan_id: plan.id,
            section_id,
            rect: rect(plan.interval, section.interval),
            multiplier: plan.multiplier,
            potential_score: potential_score(above_cutoff, credit_eligible, parent_full, 1.0),
            potential_profile_penalty: -table,
            above_cutoff,
            sub_squares,
        }
    }

    pub fn has_penalty(&self) -> bool {
        self.potential_profile_penalty != 0.0
    }

    /// Plain data for reports
    pub fn to_data(&self) -> SquareData {
        SquareData {
            plan_id: self.plan_id,
            section_id: self.section_id,
            bounds: rect_bounds(&self.rect),
            multiplier: self.multiplier,
            potential_score: self.potential_score,
            potential_profile_penalty: self.potential_profile_penalty,
            sub_squares: self
                .sub_squares
                .iter()
                .map(|sub| SquareData {
                    plan_id: self.plan_id,
                    section_id: sub.rect.min().y,
                    bounds: rect_bounds(&sub.rect),
                    multiplier: sub.multiplier,
                    potential_score: sub.potential_score,
                    potential_profile_penalty: sub.potential_profile_penalty,
                    sub_squares: Vec::new(),
                })
                .collect(),
        }
    }
}

fn rect_bounds(rect: &Rect<f64>) -> [[f64; 2]; 2] {
    [[rect.min().x, rect.min().y], [rect.max().x, rect.max().y]]
}

/// Every Square of a vantage point's grid
pub fn build_squares(plan: &PlanGrid, section: &SectionGrid, credit_eligible: bool) -> Vec<Square> {
    plan.cells
        .iter()
        .flat_map(|p| {
            section
                .cells
                .iter()
                .map(move |s| Square::new(p, s, credit_eligible))
        })
        .collect()
}

/// Sky available to the vantage point: Σ multiplier over blockage-zone Squares
pub fn available_daylight(squares: &[Square]) -> f64 {
    squares
        .iter()
        .filter(|s| s.above_cutoff)
        .map(|s| s.multiplier)
        .sum()
}
