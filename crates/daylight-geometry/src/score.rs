// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per vantage point scoring
//!
//! Sub cells contribute `potential × share`, so a clipped minor counts in
//! proportion to its width.

use crate::overlay::{intersection, Contour, Region};
use crate::square::{available_daylight, Square};
use daylight_model::ScoreBreakdown;

/// Silhouettes and rules applied to one vantage point's squares
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Outline scored for blockage; a subset of the massing on subdistrict sites
    pub blockage: &'a Region,
    /// Outline of the full massing
    pub silhouette: &'a Region,
    /// Closed profile curve polygons
    pub profiles: &'a [Contour],
    /// Unblocked credit applies
    pub credit: bool,
    /// Profile penalty applies
    pub penalty: bool,
}

/// Σ over blockage-zone squares touched by `blockage` of their touched sub cells
pub fn daylight_blockage(squares: &[Square], blockage: &Region) -> f64 {
    squares
        .iter()
        .filter(|sq| sq.above_cutoff && blockage.interior_intersects(&sq.rect))
        .flat_map(|sq| sq.sub_squares.iter())
        .filter(|sub| blockage.interior_intersects(&sub.rect))
        .map(|sub| sub.weighted_score())
        .sum()
}

/// Credit for clear sub cells of creditable squares below the cutoff
pub fn unblocked_credit(squares: &[Square], silhouette: &Region) -> f64 {
    squares
        .iter()
        .filter(|sq| !sq.above_cutoff && sq.potential_score > 0.0)
        .filter(|sq| !silhouette.contains(&sq.rect))
        .flat_map(|sq| sq.sub_squares.iter())
        .filter(|sub| !silhouette.interior_intersects(&sub.rect))
        .map(|sub| sub.weighted_score())
        .sum()
}

/// Penalty for massing that crosses the profile curves
pub fn profile_penalty(squares: &[Square], silhouette: &Region, profiles: &[Contour]) -> f64 {
    if silhouette.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for profile in profiles {
        let overlap = Region::new(intersection(silhouette.shape(), profile));
        if overlap.is_empty() {
            continue;
        }
        for sq in squares.iter().filter(|sq| sq.has_penalty()) {
            if !overlap.interior_intersects(&sq.rect) {
                continue;
            }
            if overlap.contains(&sq.rect) {
                total += sq.sub_squares.iter().map(|s| s.weighted_penalty()).sum::<f64>();
            } else {
                total += sq
                    .sub_squares
                    .iter()
                    .filter(|s| overlap.interior_intersects(&s.rect))
                    .map(|s| s.weighted_penalty())
                    .sum::<f64>();
            }
        }
    }
    total
}

/// Score one vantage point
pub fn score_point(squares: &[Square], ctx: &ScoringContext<'_>) -> ScoreBreakdown {
    let blockage = daylight_blockage(squares, ctx.blockage);
    let credit = if ctx.credit {
        unblocked_credit(squares, ctx.silhouette)
    } else {
        0.0
    };
    let penalty = if ctx.penalty {
        profile_penalty(squares, ctx.silhouette, ctx.profiles)
    } else {
        0.0
    };
    let available = available_daylight(squares);
    if available <= 0.0 {
        log::warn!("No daylight available to vantage point, scoring 0");
    }
    ScoreBreakdown::from_components(blockage, credit, penalty, available)
}
