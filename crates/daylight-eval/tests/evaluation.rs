// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end evaluations of a synthetic block
//!
//! A 200 ft x 100 ft lot fronts a 100 ft street to the south; the block is
//! 200 ft deep and the street has no street wall continuity.

use approx::assert_relative_eq;
use daylight_eval::{
    evaluate, feet_to_meters, BrepEdge, BrepFace, BrepSolid, BrepVertex, EdgeUse,
    EvaluationConfig, EvaluationError, EvaluationInput, EvaluationReport, InputSource,
    LineSegment, MassingSolid, Site, StreetWidth, VantageStreet, Verdict,
};

fn lot(width_ft: f64, depth_ft: f64) -> Site {
    let w = feet_to_meters(width_ft);
    let d = feet_to_meters(depth_ft);
    Site::new(vec![
        [0.0, 0.0, 0.0],
        [w, 0.0, 0.0],
        [w, d, 0.0],
        [0.0, d, 0.0],
    ])
}

fn south_street(width_ft: f64) -> VantageStreet {
    let w = feet_to_meters(width_ft);
    VantageStreet::new(
        "South Street",
        StreetWidth::Ft100,
        LineSegment::new([-3.0, -15.0, 0.0], [w + 3.0, -15.0, 0.0]),
    )
    .with_block_depth_ft(200.0)
}

fn west_avenue(depth_ft: f64) -> VantageStreet {
    let d = feet_to_meters(depth_ft);
    VantageStreet::new(
        "West Avenue",
        StreetWidth::Ft60,
        LineSegment::new([-9.0, -2.0, 0.0], [-9.0, d + 2.0, 0.0]),
    )
}

/// Block covering the whole lot footprint
fn block(name: &str, width_ft: f64, depth_ft: f64, height_ft: f64) -> MassingSolid {
    let w = feet_to_meters(width_ft);
    let d = feet_to_meters(depth_ft);
    MassingSolid::extrusion(
        name,
        &[[0.0, 0.0], [w, 0.0], [w, d], [0.0, d]],
        0.0,
        feet_to_meters(height_ft),
    )
}

fn run(input: &EvaluationInput, config: &EvaluationConfig) -> EvaluationReport {
    evaluate(input, config).unwrap()
}

#[test]
fn test_low_building_passes() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![south_street(200.0)],
    );
    let report = run(&input, &EvaluationConfig::default());

    assert_eq!(report.streets.len(), 1);
    let street = &report.streets[0];
    assert_eq!(street.vantage_point_count, 2);
    assert_relative_eq!(street.centerline_offset, feet_to_meters(50.0));
    assert_relative_eq!(street.length, feet_to_meters(200.0), epsilon = 1e-9);

    for vp in report.vantage_points() {
        // Nothing reaches the blockage zone
        assert_eq!(vp.score.daylight_blockage, 0.0);
        assert_eq!(vp.score.profile_penalty, 0.0);
        assert!(vp.score.unblocked_daylight_credit > 0.0);
        assert!(vp.score.available_daylight > 0.0);
        assert!(vp.score.daylight_score > 100.0);
        assert!(vp.diagram.is_some());
    }
    assert_eq!(report.result, Verdict::Pass);
}

#[test]
fn test_tall_tower_fails() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("tower", 200.0, 100.0, 1500.0)],
        vec![south_street(200.0)],
    );
    let report = run(&input, &EvaluationConfig::default());

    for vp in report.vantage_points() {
        assert!(vp.score.daylight_blockage < 0.0);
        assert!(vp.score.profile_penalty <= 0.0);
        assert!(vp.score.daylight_score < 66.0);
    }
    assert!(report.lowest_street_score < 66.0);
    assert_eq!(report.result, Verdict::Fail);
}

#[test]
fn test_vantage_point_names_and_boundaries() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![south_street(200.0)],
    );
    let report = run(&input, &EvaluationConfig::default());
    let names: Vec<&str> = report.vantage_points().map(|vp| vp.name.as_str()).collect();
    assert_eq!(names, vec!["South Street: VP 1", "South Street: VP 2"]);

    for vp in report.vantage_points() {
        let [lo, hi] = vp.daylight_boundaries;
        assert!(lo <= hi);
        assert!((-90.0..=90.0).contains(&lo));
        assert!((-90.0..=90.0).contains(&hi));
    }

    // VP 1 stands 250 ft along the centerline from its start
    let first = &report.streets[0].vantage_points[0];
    assert_relative_eq!(first.position[0], feet_to_meters(250.0), epsilon = 1e-9);
    assert_relative_eq!(first.position[1], -feet_to_meters(50.0), epsilon = 1e-9);
}

#[test]
fn test_long_street_has_three_points() {
    let input = EvaluationInput::new(
        lot(600.0, 100.0),
        vec![block("podium", 600.0, 100.0, 20.0)],
        vec![south_street(600.0)],
    );
    let report = run(&input, &EvaluationConfig::default().with_skip_subdivision(true));
    let street = &report.streets[0];
    assert_eq!(street.vantage_point_count, 3);
    assert_eq!(street.vantage_points[2].name, "South Street: VP 3");

    let mean = street
        .vantage_points
        .iter()
        .map(|vp| vp.score.daylight_score)
        .sum::<f64>()
        / 3.0;
    assert_relative_eq!(street.score, mean, epsilon = 1e-9);
}

#[test]
fn test_street_wall_continuity_removes_credit() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![south_street(200.0).with_street_wall_continuity(true)],
    );
    let report = run(&input, &EvaluationConfig::default());
    for vp in report.vantage_points() {
        assert_eq!(vp.score.unblocked_daylight_credit, 0.0);
        assert_relative_eq!(vp.score.daylight_score, 100.0, epsilon = 1e-9);
    }

    // Subdistrict qualification does not restore it
    let report = run(&input, &EvaluationConfig::default().with_subdistrict(true));
    for vp in report.vantage_points() {
        assert_eq!(vp.score.unblocked_daylight_credit, 0.0);
        assert_eq!(vp.score.profile_penalty, 0.0);
    }
}

#[test]
fn test_subdistrict_keeps_credit_without_continuity() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![south_street(200.0)],
    );
    let report = run(&input, &EvaluationConfig::default().with_subdistrict(true));
    for vp in report.vantage_points() {
        assert!(vp.score.unblocked_daylight_credit > 0.0);
    }
}

#[test]
fn test_subdistrict_removes_profile_penalty() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("tower", 200.0, 100.0, 1500.0)],
        vec![south_street(200.0)],
    );
    let config = EvaluationConfig::default().with_skip_subdivision(true);
    let regular = run(&input, &config);
    let subdistrict = run(&input, &config.clone().with_subdistrict(true));

    for (a, b) in regular.vantage_points().zip(subdistrict.vantage_points()) {
        assert_eq!(b.score.profile_penalty, 0.0);
        // The tower reaches the cut height, so blockage is unchanged
        assert_relative_eq!(a.score.daylight_blockage, b.score.daylight_blockage);
        assert!(b.score.daylight_score >= a.score.daylight_score);
    }
}

#[test]
fn test_subdistrict_blockage_ignores_low_solids() {
    // A 140 ft block right at the vantage point fills the blockage zone
    let vp_x = feet_to_meters(250.0);
    let vp_y = -feet_to_meters(50.0);
    let kiosk = MassingSolid::extrusion(
        "kiosk",
        &[
            [vp_x - 6.0, vp_y + 2.0],
            [vp_x - 2.0, vp_y + 2.0],
            [vp_x - 2.0, vp_y + 6.0],
            [vp_x - 6.0, vp_y + 6.0],
        ],
        0.0,
        feet_to_meters(140.0),
    );
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0), kiosk],
        vec![south_street(200.0)],
    );
    let config = EvaluationConfig::default().with_skip_subdivision(true);

    let regular = run(&input, &config);
    let vp1 = &regular.streets[0].vantage_points[0];
    assert!(vp1.score.daylight_blockage < 0.0);

    let subdistrict = run(&input, &config.with_subdistrict(true));
    let vp1 = &subdistrict.streets[0].vantage_points[0];
    assert_eq!(vp1.score.daylight_blockage, 0.0);
}

#[test]
fn test_overall_score_is_length_weighted() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("tower", 120.0, 60.0, 300.0)],
        vec![south_street(200.0), west_avenue(100.0)],
    );
    let report = run(&input, &EvaluationConfig::default().with_skip_subdivision(true));
    assert_eq!(report.streets.len(), 2);

    let total: f64 = report.streets.iter().map(|s| s.length).sum();
    let weighted = report
        .streets
        .iter()
        .map(|s| s.score * s.length)
        .sum::<f64>()
        / total;
    assert_relative_eq!(report.overall_score, weighted, epsilon = 1e-9);

    let lowest = report
        .streets
        .iter()
        .map(|s| s.score)
        .fold(f64::INFINITY, f64::min);
    assert_relative_eq!(report.lowest_street_score, lowest);

    let pass = report.lowest_street_score >= 66.0 && report.overall_score >= 75.0;
    assert_eq!(report.result.is_pass(), pass);
}

#[test]
fn test_report_json() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![south_street(200.0)],
    );
    let report = run(&input, &EvaluationConfig::default().with_skip_subdivision(true));
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["result"], "PASS");
    assert_eq!(value["streets"][0]["vantage_point_count"], 2);
}

#[test]
fn test_input_source_seam() {
    let input = EvaluationInput {
        sites: vec![lot(20.0, 20.0), lot(200.0, 100.0)],
        massing: vec![block("podium", 200.0, 100.0, 20.0)],
        streets: vec![south_street(200.0)],
    };
    let source: &dyn InputSource = &input;
    let report = evaluate(source, &EvaluationConfig::default().with_skip_subdivision(true)).unwrap();

    // The larger site is evaluated
    assert_relative_eq!(report.streets[0].length, feet_to_meters(200.0), epsilon = 1e-9);
}

#[test]
fn test_missing_site() {
    let input = EvaluationInput {
        sites: Vec::new(),
        massing: vec![block("podium", 200.0, 100.0, 20.0)],
        streets: vec![south_street(200.0)],
    };
    let err = evaluate(&input, &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(err, EvaluationError::MissingDependency(_)));
}

#[test]
fn test_missing_massing() {
    let input = EvaluationInput::new(lot(200.0, 100.0), Vec::new(), vec![south_street(200.0)]);
    let err = evaluate(&input, &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(err, EvaluationError::MissingDependency(_)));
}

#[test]
fn test_no_streets() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        Vec::new(),
    );
    let err = evaluate(&input, &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(err, EvaluationError::InvalidInput(_)));
}

#[test]
fn test_street_without_locating_line() {
    let mut street = south_street(200.0);
    street.line = None;
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![street],
    );
    let err = evaluate(&input, &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(err, EvaluationError::InvalidInput(_)));
}

#[test]
fn test_invalid_config() {
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![block("podium", 200.0, 100.0, 20.0)],
        vec![south_street(200.0)],
    );
    let config = EvaluationConfig {
        chart_height: 0.0,
        ..EvaluationConfig::default()
    };
    let err = evaluate(&input, &config).unwrap_err();
    assert!(matches!(err, EvaluationError::InvalidInput(_)));
}

#[test]
fn test_corrupt_brep_aborts() {
    let brep = BrepSolid {
        vertices: vec![
            BrepVertex { id: 1, position: [0.0, 0.0, 0.0] },
            BrepVertex { id: 2, position: [10.0, 0.0, 0.0] },
            BrepVertex { id: 3, position: [10.0, 0.0, 10.0] },
        ],
        edges: vec![
            BrepEdge { id: 10, start: 1, end: 2 },
            BrepEdge { id: 11, start: 2, end: 3 },
            BrepEdge { id: 12, start: 3, end: 99 },
        ],
        faces: vec![BrepFace {
            edges: vec![
                EdgeUse { edge: 10, reversed: false },
                EdgeUse { edge: 11, reversed: false },
                EdgeUse { edge: 12, reversed: false },
            ],
        }],
    };
    let input = EvaluationInput::new(
        lot(200.0, 100.0),
        vec![MassingSolid::from_brep("broken", brep)],
        vec![south_street(200.0)],
    );
    match evaluate(&input, &EvaluationConfig::default()).unwrap_err() {
        EvaluationError::CorruptGeometry { solid, .. } => assert_eq!(solid, "broken"),
        other => panic!("unexpected error: {other}"),
    }
}
