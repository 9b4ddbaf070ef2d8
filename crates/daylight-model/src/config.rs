// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Evaluation configuration and inputs
//!
//! Configuration is an immutable value passed to every entry point; nothing in
//! the engine reads global state.

use crate::{EvaluationError, MassingSolid, Result, Site, VantageStreet};
use serde::{Deserialize, Serialize};

/// Flags and tunables for one evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Do not subdivide long edges (fast/debug runs)
    pub skip_subdivision: bool,
    /// Maximum segment length after subdivision, in feet
    pub subdivision_length_ft: f64,
    /// Emit raw angles instead of chart coordinates for all drawable output
    pub debug_visualization: bool,
    /// Site qualifies for the subdistrict rules (lower thresholds, no profile penalty)
    pub subdistrict_qualified: bool,
    /// Height of the projected chart at the 90° section line
    pub chart_height: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            skip_subdivision: false,
            subdivision_length_ft: 10.0,
            debug_visualization: false,
            subdistrict_qualified: false,
            chart_height: 140.0,
        }
    }
}

impl EvaluationConfig {
    /// Parse configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the evaluation meaningless
    pub fn validate(&self) -> Result<()> {
        if !(self.subdivision_length_ft > 0.0) {
            return Err(EvaluationError::invalid_input(format!(
                "subdivision length must be positive, got {}",
                self.subdivision_length_ft
            )));
        }
        if !(self.chart_height > 0.0) {
            return Err(EvaluationError::invalid_input(format!(
                "chart height must be positive, got {}",
                self.chart_height
            )));
        }
        Ok(())
    }

    pub fn with_subdistrict(mut self, qualified: bool) -> Self {
        self.subdistrict_qualified = qualified;
        self
    }

    pub fn with_skip_subdivision(mut self, skip: bool) -> Self {
        self.skip_subdivision = skip;
        self
    }

    pub fn with_debug_visualization(mut self, debug: bool) -> Self {
        self.debug_visualization = debug;
        self
    }
}

/// Everything an evaluation consumes besides its configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Candidate sites; the largest by area is evaluated
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub massing: Vec<MassingSolid>,
    #[serde(default)]
    pub streets: Vec<VantageStreet>,
}

impl EvaluationInput {
    pub fn new(site: Site, massing: Vec<MassingSolid>, streets: Vec<VantageStreet>) -> Self {
        Self {
            sites: vec![site],
            massing,
            streets,
        }
    }

    /// Parse inputs from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
