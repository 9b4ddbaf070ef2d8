// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagram geometry
//!
//! Plain chart-space lines and polygons for renderers. Nothing here feeds back
//! into scoring.

use crate::grid::{Interval, PlanGrid, SectionGrid};
use crate::overlay::polygon_data;
use crate::profile::ProfileCurve;
use crate::projection::ChartProjection;
use crate::silhouette::Silhouette;
use crate::square::Square;
use daylight_model::DiagramData;

/// Everything a vantage point diagram is drawn from
pub struct DiagramSources<'a> {
    pub chart: &'a ChartProjection,
    pub plan: &'a PlanGrid,
    pub section: &'a SectionGrid,
    pub domain: Interval,
    pub silhouette: &'a Silhouette,
    pub squares: &'a [Square],
    pub profiles: &'a [ProfileCurve],
    /// Massing edges already in chart coordinates
    pub building_edges: Vec<Vec<[f64; 2]>>,
}

/// Constant-section line across `[from, to]` sampled every degree of plan
fn section_line(chart: &ChartProjection, section: f64, from: f64, to: f64) -> Vec<[f64; 2]> {
    let mut line = vec![chart.map(from, section)];
    let mut plan = from.floor() + 1.0;
    while plan < to {
        line.push(chart.map(plan, section));
        plan += 1.0;
    }
    line.push(chart.map(to, section));
    line
}

/// Constant-plan line from the horizon to the chart top
fn plan_line(chart: &ChartProjection, plan: f64, top: f64) -> Vec<[f64; 2]> {
    let bottom = chart.map(plan, 0.0);
    vec![bottom, [bottom[0], top]]
}

/// Build the diagram of one vantage point
pub fn build_diagram(sources: DiagramSources<'_>) -> DiagramData {
    let chart = sources.chart;
    let (from, to) = (-90.0, 90.0);
    let top = chart.map(0.0, 90.0)[1];

    let mut major_grid_lines: Vec<Vec<[f64; 2]>> = sources
        .section
        .major_lines()
        .into_iter()
        .map(|s| section_line(chart, s, from, to))
        .collect();
    major_grid_lines.extend(
        sources
            .plan
            .major_boundaries()
            .into_iter()
            .chain([from, to])
            .map(|p| plan_line(chart, p, top)),
    );

    let mut minor_grid_lines: Vec<Vec<[f64; 2]>> = sources
        .section
        .minor_lines()
        .into_iter()
        .map(|s| section_line(chart, s, from, to))
        .collect();
    minor_grid_lines.extend(
        sources
            .plan
            .minor_boundaries()
            .into_iter()
            .map(|p| plan_line(chart, p, top)),
    );

    let boundary_lines = [sources.domain.min, sources.domain.max]
        .into_iter()
        .map(|p| plan_line(chart, p, top))
        .collect();

    let profile_curves = sources
        .profiles
        .iter()
        .map(|curve| curve.points.iter().map(|p| chart.map(p.x, p.y)).collect())
        .collect();

    DiagramData {
        raw_silhouette: polygon_data(sources.silhouette.raw.shape()),
        draw_silhouette: polygon_data(sources.silhouette.draw.shape()),
        squares: sources.squares.iter().map(Square::to_data).collect(),
        profile_curves,
        major_grid_lines,
        minor_grid_lines,
        boundary_lines,
        building_edges: sources.building_edges,
    }
}
