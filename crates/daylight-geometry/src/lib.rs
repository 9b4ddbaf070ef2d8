// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Daylight Geometry
//!
//! Angle-space geometry for daylight evaluation. Massing is seen from vantage
//! points on the surrounding streets, projected into (plan, section) angles
//! and scored against a graded grid of cells.
//!
//! ## Overview
//!
//! - **Projection**: raw plan/section angles and the nonlinear chart mapping
//! - **Grid**: fixed section bands, per-point plan cells clipped to the
//!   daylight boundary, and the [`Square`]s crossing them
//! - **Vantage points**: front lot line, centerline, two or three points per
//!   street and their daylight boundaries
//! - **Silhouettes**: half-edge [`AnalysisGraph`]s projected face by face and
//!   unioned with `i_overlay`
//! - **Scoring**: blockage, unblocked credit, profile penalty and available
//!   daylight for one point
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use daylight_geometry::{
//!     build_squares, resolve_street, score_point, AnalysisGraph, ChartProjection,
//!     PlanGrid, ProjectedFaces, ScoringContext, SectionGrid, Silhouette,
//! };
//!
//! let street = resolve_street(&site, &vantage_street)?;
//! let graph = AnalysisGraph::from_solid(&solid, &config)?;
//! let chart = ChartProjection::new(config.chart_height);
//!
//! for vp in &street.vantage_points {
//!     let plan = PlanGrid::new(vp.centerline_offset, vp.domain);
//!     let squares = build_squares(&plan, &SectionGrid::new(), true);
//!     let faces = ProjectedFaces::project([&graph], &vp.frame, &chart);
//!     let silhouette = Silhouette::from_faces(faces, &chart);
//!     let ctx = ScoringContext {
//!         blockage: &silhouette.raw,
//!         silhouette: &silhouette.raw,
//!         profiles: &[],
//!         credit: true,
//!         penalty: false,
//!     };
//!     println!("{}: {:.2}", vp.name, score_point(&squares, &ctx).daylight_score);
//! }
//! ```

pub mod analysis;
pub mod diagram;
pub mod error;
pub mod grid;
pub mod overlay;
pub mod profile;
pub mod projection;
pub mod score;
pub mod settings;
pub mod silhouette;
pub mod square;
pub mod vantage;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

// Re-export main types
pub use analysis::{subdivision_offsets, AnalysisGraph, FaceEdge};
pub use diagram::{build_diagram, DiagramSources};
pub use error::{Error, Result};
pub use grid::{Interval, PlanCell, PlanGrid, PlanMinor, SectionCell, SectionGrid};
pub use overlay::{intersection, polygon_data, union_all, Contour, Region};
pub use profile::{profile_curves, ProfileCurve, Side};
pub use projection::{plan_angle, section_angle, AnalysisPoint, ChartProjection, VantageFrame};
pub use score::{
    daylight_blockage, profile_penalty, score_point, unblocked_credit, ScoringContext,
};
pub use silhouette::{ProjectedFaces, Silhouette};
pub use square::{available_daylight, build_squares, Square, SubSquare};
pub use vantage::{
    resolve_street, vantage_point_count, LotLines, ResolvedStreet, Segment, VantagePoint,
};
