// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Daylight Model - Shared types for daylight evaluation
//!
//! This crate holds the data exchanged between the scoring engine and its
//! collaborators: sites, vantage streets, massing solids, configuration and
//! reports. It carries no geometry algorithms.
//!
//! # Overview
//!
//! - [`Site`], [`VantageStreet`], [`MassingSolid`] - evaluation inputs
//! - [`EvaluationConfig`] - immutable flags threaded through every entry point
//! - [`EvaluationReport`] - per point, per street and overall results
//! - [`InputSource`] - seam for hosts that resolve inputs from their own models
//! - [`EvaluationError`] - fatal and recoverable error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use daylight_model::{EvaluationConfig, EvaluationInput};
//!
//! let input = EvaluationInput::from_json(&std::fs::read_to_string("input.json")?)?;
//! let config = EvaluationConfig::from_json(r#"{ "skip_subdivision": true }"#)?;
//! ```

pub mod config;
pub mod error;
pub mod massing;
pub mod report;
pub mod traits;
pub mod types;

// Re-export all public types
pub use config::*;
pub use error::*;
pub use massing::*;
pub use report::*;
pub use traits::*;
pub use types::*;
