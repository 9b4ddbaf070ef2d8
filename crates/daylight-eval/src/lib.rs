// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Daylight Evaluation
//!
//! Scores building massing against the daylight evaluation: every vantage
//! street is resolved into two or three vantage points, each point is scored
//! in parallel, and street scores are combined into the overall score and a
//! PASS/FAIL verdict.
//!
//! ## Example
//!
//! ```rust,ignore
//! use daylight_eval::evaluate;
//! use daylight_model::{EvaluationConfig, EvaluationInput};
//!
//! let input = EvaluationInput::from_json(&std::fs::read_to_string("input.json")?)?;
//! let report = evaluate(&input, &EvaluationConfig::default())?;
//! println!("{:.4} {}", report.overall_score, report.result);
//! ```

pub mod aggregate;
pub mod evaluation;

pub use aggregate::{aggregate, lowest_street_score, overall_score, street_report, verdict};
pub use evaluation::evaluate;

// Re-export the model so hosts need a single dependency
pub use daylight_model::*;
