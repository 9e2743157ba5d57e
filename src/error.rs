//! Error types for gapscope
//!
//! One enum per layer: featurization, model inference, startup loading and
//! the user-facing prediction outcome.

use crate::model::composition::CompositionError;
use std::path::PathBuf;
use thiserror::Error;

/// Formula could not be turned into a feature vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeaturizationError {
    #[error("invalid formula {formula:?}: {source}")]
    InvalidFormula {
        formula: String,
        #[source]
        source: CompositionError,
    },
}

/// Failures of the gatekeeper or the specialist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Artifacts failed to load at startup; nothing can be predicted.
    #[error("models are not loaded: {0}")]
    NotLoaded(String),

    #[error("{model} expects {expected} features, got {actual}")]
    FeatureMismatch {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("classifier returned unknown label {0}")]
    UnknownLabel(i64),

    #[error("{model} produced a non-finite output")]
    NonFinite { model: &'static str },
}

/// Schema or model artifacts could not be loaded.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {}: {reason}", .path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("{model} expects {expected} features but the schema has {actual} columns")]
    WidthMismatch {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{model} feature names disagree with the schema at column {index} ({expected:?} vs {found:?})")]
    NameMismatch {
        model: &'static str,
        index: usize,
        expected: String,
        found: String,
    },
}

/// What the caller of `predict` gets back. Messages are user-facing and
/// never carry internal detail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Please enter a chemical formula.")]
    EmptyFormula,

    /// Catch-all; `formula` is kept for logging only.
    #[error("Failed to analyze formula. Check chemical syntax.")]
    AnalysisFailed { formula: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_hide_internals() {
        let err = PredictionError::AnalysisFailed {
            formula: "Xx9Zz".into(),
        };
        assert_eq!(err.to_string(), "Failed to analyze formula. Check chemical syntax.");
        assert!(!err.to_string().contains("Xx9Zz"));
        assert_eq!(
            PredictionError::EmptyFormula.to_string(),
            "Please enter a chemical formula."
        );
    }

    #[test]
    fn startup_errors_name_the_path() {
        let err = StartupError::Io {
            path: PathBuf::from("models/features.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("features.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn featurization_error_carries_cause() {
        let err = FeaturizationError::InvalidFormula {
            formula: "Qq".into(),
            source: CompositionError::UnknownElement("Qq".into()),
        };
        assert!(err.to_string().contains("unknown element"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
