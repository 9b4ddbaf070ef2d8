// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry processing

use daylight_model::EvaluationError;
use thiserror::Error;

/// Geometry processing result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry processing errors
#[derive(Error, Debug)]
pub enum Error {
    /// Edge references a vertex id the graph does not hold
    #[error("Edge {edge} references missing vertex {vertex}")]
    MissingVertex { edge: u64, vertex: u64 },

    /// Face references an edge id the graph does not hold
    #[error("Face {face} references missing edge {edge}")]
    MissingEdge { face: usize, edge: u64 },

    /// Boolean operation produced nothing for non-empty input
    #[error("Polygon boolean error: {0}")]
    Overlay(String),

    /// Vantage point count outside 2..=3
    #[error("Street '{street}' resolved to {count} vantage points")]
    VantageCount { street: String, count: usize },

    /// Invalid street or site input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an overlay error
    pub fn overlay(msg: impl Into<String>) -> Self {
        Error::Overlay(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Convert into the evaluation taxonomy, naming the solid for graph errors
    pub fn into_evaluation(self, solid: &str) -> EvaluationError {
        match self {
            Error::MissingVertex { .. } | Error::MissingEdge { .. } => {
                EvaluationError::corrupt(solid, self.to_string())
            }
            other => other.into(),
        }
    }
}

impl From<Error> for EvaluationError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingVertex { .. } | Error::MissingEdge { .. } => {
                EvaluationError::corrupt("<unnamed>", err.to_string())
            }
            Error::Overlay(msg) => EvaluationError::degenerate(msg),
            Error::VantageCount { street, count } => {
                EvaluationError::InvalidTopology { street, count }
            }
            Error::InvalidInput(msg) => EvaluationError::invalid_input(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_taxonomy() {
        let corrupt = Error::MissingVertex { edge: 3, vertex: 9 }.into_evaluation("tower");
        match corrupt {
            EvaluationError::CorruptGeometry { solid, message } => {
                assert_eq!(solid, "tower");
                assert!(message.contains("vertex 9"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let topology: EvaluationError = Error::VantageCount {
            street: "Main".into(),
            count: 4,
        }
        .into();
        assert!(matches!(topology, EvaluationError::InvalidTopology { count: 4, .. }));

        let overlay: EvaluationError = Error::overlay("union of 3 polygons is empty").into();
        assert!(matches!(overlay, EvaluationError::DegenerateGeometry(_)));
        assert!(overlay.is_recoverable());

        let input: EvaluationError = Error::invalid_input("site perimeter is empty").into();
        assert!(matches!(input, EvaluationError::InvalidInput(_)));
        assert!(!input.is_recoverable());
    }
}
