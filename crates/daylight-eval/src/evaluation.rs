// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Evaluation pipeline
//!
//! Streets are resolved first; every vantage point of every street is then
//! scored in parallel against analysis graphs built once and shared.

use crate::aggregate::{aggregate, street_report};
use daylight_geometry::settings::{MODEL_EPSILON, SUBDISTRICT_CUT_HEIGHT_FT};
use daylight_geometry::{
    build_diagram, build_squares, profile_curves, resolve_street, score_point, AnalysisGraph,
    ChartProjection, Contour, DiagramSources, PlanGrid, ProjectedFaces, ResolvedStreet,
    ScoringContext, SectionGrid, Silhouette, VantagePoint,
};
use daylight_model::{
    feet_to_meters, EvaluationConfig, EvaluationError, EvaluationReport, InputSource,
    MassingSolid, Result, Site, VantagePointReport,
};
use rayon::prelude::*;

/// Analysis graphs shared by every vantage point
struct MassingGraphs {
    all: Vec<AnalysisGraph>,
    /// Indices into `all` scored for blockage when subdistrict-qualified
    tall: Vec<usize>,
}

impl MassingGraphs {
    fn build(massing: &[MassingSolid], site: &Site, config: &EvaluationConfig) -> Result<Self> {
        let all = massing
            .par_iter()
            .map(|solid| {
                AnalysisGraph::from_solid(solid, config).map_err(|e| e.into_evaluation(&solid.name))
            })
            .collect::<Result<Vec<_>>>()?;

        let base = site
            .perimeter
            .iter()
            .map(|p| p[2])
            .reduce(f64::min)
            .unwrap_or(0.0);
        let cut = base + feet_to_meters(SUBDISTRICT_CUT_HEIGHT_FT);
        let tall = massing
            .iter()
            .enumerate()
            .filter(|(_, solid)| {
                solid
                    .elevation_range()
                    .is_some_and(|(_, top)| top >= cut - MODEL_EPSILON)
            })
            .map(|(i, _)| i)
            .collect();

        Ok(Self { all, tall })
    }

    fn tall(&self) -> impl Iterator<Item = &AnalysisGraph> {
        self.tall.iter().map(|&i| &self.all[i])
    }
}

/// Score one vantage point
fn evaluate_point(
    vp: &VantagePoint,
    graphs: &MassingGraphs,
    section: &SectionGrid,
    config: &EvaluationConfig,
) -> VantagePointReport {
    let chart = if config.debug_visualization {
        ChartProjection::debug()
    } else {
        ChartProjection::new(config.chart_height)
    };
    let subdistrict = config.subdistrict_qualified;
    // Squares carry credit only without continuity; the pass itself runs
    // without continuity or on subdistrict sites
    let credit = !vp.street_wall_continuity || subdistrict;

    let plan = PlanGrid::new(vp.centerline_offset, vp.domain);
    let squares = build_squares(&plan, section, !vp.street_wall_continuity);

    let mut faces = ProjectedFaces::project(&graphs.all, &vp.frame, &chart);
    let building_edges = std::mem::take(&mut faces.edges);
    let silhouette = Silhouette::from_faces(faces, &chart);
    let mut diagnostics = silhouette.diagnostics;

    let tall = if subdistrict {
        let (region, tall_diagnostics) =
            Silhouette::raw_only(ProjectedFaces::project(graphs.tall(), &vp.frame, &chart));
        diagnostics.merge(tall_diagnostics);
        Some(region)
    } else {
        None
    };

    let curves = profile_curves(vp.centerline_offset, &vp.domain);
    let profiles: Vec<Contour> = curves.iter().map(|c| c.polygon()).collect();

    let ctx = ScoringContext {
        blockage: tall.as_ref().unwrap_or(&silhouette.raw),
        silhouette: &silhouette.raw,
        profiles: &profiles,
        credit,
        penalty: !subdistrict,
    };
    let score = score_point(&squares, &ctx);
    log::debug!(
        "{}: domain [{:.3}, {:.3}], score {:.4}",
        vp.name,
        vp.domain.min,
        vp.domain.max,
        score.daylight_score
    );

    let diagram = build_diagram(DiagramSources {
        chart: &chart,
        plan: &plan,
        section,
        domain: vp.domain,
        silhouette: &silhouette,
        squares: &squares,
        profiles: &curves,
        building_edges,
    });

    let origin = vp.frame.origin;
    VantagePointReport {
        name: vp.name.clone(),
        position: [origin.x, origin.y, origin.z],
        daylight_boundaries: vp.domain.as_array(),
        score,
        diagnostics,
        diagram: Some(diagram),
    }
}

/// Run a full evaluation
///
/// Fatal errors abort with no partial result; degenerate faces and failed
/// booleans are logged and counted in each point's diagnostics.
pub fn evaluate<S: InputSource + ?Sized>(
    source: &S,
    config: &EvaluationConfig,
) -> Result<EvaluationReport> {
    config.validate()?;

    let site = source
        .site()
        .ok_or_else(|| EvaluationError::missing("no site was supplied"))?;
    let massing = source.massing();
    if massing.is_empty() {
        return Err(EvaluationError::missing("no massing solids were supplied"));
    }
    let streets = source.streets();
    if streets.is_empty() {
        return Err(EvaluationError::invalid_input("no vantage streets were supplied"));
    }

    let graphs = MassingGraphs::build(&massing, &site, config)?;
    log::debug!(
        "Built {} analysis graphs ({} reach the subdistrict cut height)",
        graphs.all.len(),
        graphs.tall.len()
    );

    let resolved = streets
        .iter()
        .map(|street| resolve_street(&site, street).map_err(EvaluationError::from))
        .collect::<Result<Vec<ResolvedStreet>>>()?;
    for street in &resolved {
        log::debug!(
            "Street '{}': {} vantage points, front lot line {:.3}",
            street.name,
            street.vantage_points.len(),
            street.length()
        );
    }

    let section = SectionGrid::new();
    let jobs: Vec<(usize, &VantagePoint)> = resolved
        .iter()
        .enumerate()
        .flat_map(|(i, street)| street.vantage_points.iter().map(move |vp| (i, vp)))
        .collect();
    let scored: Vec<(usize, VantagePointReport)> = jobs
        .par_iter()
        .map(|&(i, vp)| (i, evaluate_point(vp, &graphs, &section, config)))
        .collect();

    let mut per_street: Vec<Vec<VantagePointReport>> = vec![Vec::new(); resolved.len()];
    for (i, report) in scored {
        per_street[i].push(report);
    }

    let reports = resolved
        .iter()
        .zip(per_street)
        .map(|(street, points)| street_report(street, points))
        .collect();
    Ok(aggregate(reports, config.subdistrict_qualified))
}
