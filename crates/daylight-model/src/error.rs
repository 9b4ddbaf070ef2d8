// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for daylight evaluation

use thiserror::Error;

/// Result type alias for evaluation operations
pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Errors that can occur while evaluating a massing
///
/// Every variant except [`EvaluationError::DegenerateGeometry`] is fatal and
/// aborts the whole evaluation. Degenerate geometry is reported through this
/// type only by the low-level helpers; the evaluation itself logs and counts
/// it, then carries on.
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// A required input (site or massing) is absent
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// Inputs are present but unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A street resolved to an unsupported number of vantage points
    #[error("Street '{street}' resolved to {count} vantage points (expected 2 or 3)")]
    InvalidTopology { street: String, count: usize },

    /// A solid references ids that do not exist in its own graph
    #[error("Corrupt geometry in solid '{solid}': {message}")]
    CorruptGeometry { solid: String, message: String },

    /// A projected face or boolean result has no usable area
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvaluationError {
    /// Create a missing dependency error
    pub fn missing(msg: impl Into<String>) -> Self {
        EvaluationError::MissingDependency(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        EvaluationError::InvalidInput(msg.into())
    }

    /// Create a corrupt geometry error
    pub fn corrupt(solid: impl Into<String>, msg: impl Into<String>) -> Self {
        EvaluationError::CorruptGeometry {
            solid: solid.into(),
            message: msg.into(),
        }
    }

    /// Create a degenerate geometry error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        EvaluationError::DegenerateGeometry(msg.into())
    }

    /// Whether the evaluation may continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EvaluationError::DegenerateGeometry(_))
    }
}
