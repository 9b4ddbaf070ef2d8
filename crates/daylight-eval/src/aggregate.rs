// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Street and site aggregation

use daylight_geometry::settings::{
    MIN_OVERALL_SCORE, MIN_OVERALL_SCORE_SUBDISTRICT, MIN_STREET_SCORE,
};
use daylight_geometry::ResolvedStreet;
use daylight_model::{EvaluationReport, StreetReport, VantagePointReport, Verdict};

/// Mean of the point scores of one street
pub fn street_report(resolved: &ResolvedStreet, points: Vec<VantagePointReport>) -> StreetReport {
    let score = if points.is_empty() {
        0.0
    } else {
        points.iter().map(|p| p.score.daylight_score).sum::<f64>() / points.len() as f64
    };
    StreetReport {
        name: resolved.name.clone(),
        score,
        vantage_point_count: points.len(),
        centerline_offset: resolved.centerline_offset,
        length: resolved.length(),
        vantage_points: points,
    }
}

/// Street scores weighted by front lot line length
pub fn overall_score(streets: &[StreetReport]) -> f64 {
    let total: f64 = streets.iter().map(|s| s.length).sum();
    if total <= 0.0 {
        return 0.0;
    }
    streets.iter().map(|s| s.score * s.length).sum::<f64>() / total
}

/// Lowest street score, 0 with no streets
pub fn lowest_street_score(streets: &[StreetReport]) -> f64 {
    streets
        .iter()
        .map(|s| s.score)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Pass/fail against the regulation thresholds
pub fn verdict(lowest: f64, overall: f64, subdistrict: bool) -> Verdict {
    let required = if subdistrict {
        MIN_OVERALL_SCORE_SUBDISTRICT
    } else {
        MIN_OVERALL_SCORE
    };
    if lowest >= MIN_STREET_SCORE && overall >= required {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

/// Combine street reports into the final report
pub fn aggregate(streets: Vec<StreetReport>, subdistrict: bool) -> EvaluationReport {
    let lowest = lowest_street_score(&streets);
    let overall = overall_score(&streets);
    let result = verdict(lowest, overall, subdistrict);
    log::info!(
        "Daylight evaluation: lowest street {:.4}, overall {:.4}, {}",
        lowest,
        overall,
        result
    );
    EvaluationReport {
        lowest_street_score: lowest,
        overall_score: overall,
        result,
        streets,
    }
}
