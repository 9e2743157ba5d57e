// src/pipeline/predictor.rs
//! Request orchestration: validate, vectorize, classify, then either the
//! metallic short-circuit or regression followed by scoring.

use super::models::Models;
use super::stage::{Stage, Tracker};
use crate::config::Config;
use crate::error::{FeaturizationError, ModelError, PredictionError, StartupError};
use crate::features::vectorize;
use crate::inference::ConductivityClass;
use crate::scoring::{self, Assessment, RadarVector};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Scored prediction for one formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub class: ConductivityClass,
    /// eV; 0.0 for metals, never negative.
    pub gap: f64,
    pub score: f64,
    pub radar: RadarVector,
}

impl PredictionResult {
    fn new(class: ConductivityClass, assessment: Assessment) -> Self {
        Self {
            class,
            gap: assessment.gap,
            score: assessment.score,
            radar: assessment.radar,
        }
    }
}

/// Readiness as reported to operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Health {
    Ready { n_features: usize },
    Unavailable { reason: String },
}

impl Health {
    pub fn is_ready(&self) -> bool {
        matches!(self, Health::Ready { .. })
    }
}

/// Internal cause of a failed analysis; logged, never returned.
#[derive(Debug, Error)]
enum AnalysisError {
    #[error(transparent)]
    Featurization(#[from] FeaturizationError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone)]
enum Readiness {
    Ready(Arc<Models>),
    Unavailable(String),
}

/// Shared entry point. Cloning is cheap; clones share the loaded models.
#[derive(Debug, Clone)]
pub struct Predictor {
    readiness: Readiness,
}

impl Predictor {
    pub fn new(models: Models) -> Self {
        Self {
            readiness: Readiness::Ready(Arc::new(models)),
        }
    }

    /// A predictor that answers every request with `AnalysisFailed`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            readiness: Readiness::Unavailable(reason.into()),
        }
    }

    /// Loads all artifacts, surfacing the first failure.
    pub fn try_load(config: &Config) -> Result<Self, StartupError> {
        Models::load(config).map(Self::new)
    }

    /// Loads all artifacts. A failure is logged and leaves the predictor
    /// unavailable instead of aborting the process.
    pub fn load(config: &Config) -> Self {
        match Self::try_load(config) {
            Ok(p) => {
                log::info!("Predictor ready ({} features)", p.n_features().unwrap_or(0));
                p
            }
            Err(e) => {
                log::error!("CRITICAL: model loading failed, predictions disabled: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn health(&self) -> Health {
        match &self.readiness {
            Readiness::Ready(models) => Health::Ready {
                n_features: models.schema().len(),
            },
            Readiness::Unavailable(reason) => Health::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.readiness, Readiness::Ready(_))
    }

    pub fn n_features(&self) -> Option<usize> {
        match &self.readiness {
            Readiness::Ready(models) => Some(models.schema().len()),
            Readiness::Unavailable(_) => None,
        }
    }

    /// Runs the full pipeline for one formula.
    ///
    /// Empty input is rejected before any model is touched; every other
    /// failure is logged with its cause and reported as `AnalysisFailed`.
    pub fn predict(&self, formula: &str) -> Result<PredictionResult, PredictionError> {
        let mut tracker = Tracker::new(formula);
        tracker.advance(Stage::Validating);

        // Only the empty string counts as missing input; whitespace-only
        // input goes on to featurization and fails there.
        if formula.is_empty() {
            tracker.advance(Stage::Failed);
            return Err(PredictionError::EmptyFormula);
        }
        let trimmed = formula.trim();

        match self.analyze(trimmed, &mut tracker) {
            Ok(result) => {
                tracker.advance(Stage::Done);
                log::debug!(
                    "{:?}: {} gap={:.3} score={:.1}",
                    trimmed,
                    result.class,
                    result.gap,
                    result.score
                );
                Ok(result)
            }
            Err(cause) => {
                log::warn!(
                    "analysis of {:?} failed while {}: {}",
                    formula,
                    tracker.stage(),
                    cause
                );
                tracker.advance(Stage::Failed);
                Err(PredictionError::AnalysisFailed {
                    formula: formula.to_string(),
                })
            }
        }
    }

    fn analyze(&self, formula: &str, tracker: &mut Tracker<'_>) -> Result<PredictionResult, AnalysisError> {
        let models = match &self.readiness {
            Readiness::Ready(models) => models,
            Readiness::Unavailable(reason) => return Err(ModelError::NotLoaded(reason.clone()).into()),
        };

        tracker.advance(Stage::Featurizing);
        let features = vectorize(formula, models.schema())?;

        tracker.advance(Stage::Classifying);
        let class = models.gatekeeper().classify(&features)?;

        let assessment = match class {
            ConductivityClass::Metallic => {
                tracker.advance(Stage::MetallicScoring);
                scoring::score_metallic()
            }
            ConductivityClass::Insulating => {
                tracker.advance(Stage::Regressing);
                let gap = models.specialist().predict_gap(&features)?;
                if gap < 0.0 {
                    log::debug!("{:?}: negative gap {:.4} floored to 0", formula, gap);
                }
                tracker.advance(Stage::InsulatorScoring);
                scoring::score_insulator(gap)
            }
        };

        Ok(PredictionResult::new(class, assessment))
    }

    /// Predicts many formulas in parallel; results keep input order.
    pub fn predict_batch<S>(&self, formulas: &[S]) -> Vec<Result<PredictionResult, PredictionError>>
    where
        S: AsRef<str> + Sync,
    {
        formulas.par_iter().map(|f| self.predict(f.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{magpie_feature_labels, FeatureSchema};
    use crate::inference::{Classifier, Gatekeeper, Regressor, Specialist};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const EN_RANGE: &str = "MagpieData range Electronegativity";

    /// Insulating when the electronegativity spread exceeds 0.5.
    #[derive(Debug)]
    struct Ionicity {
        width: usize,
        column: usize,
    }

    impl Classifier for Ionicity {
        fn n_features(&self) -> usize {
            self.width
        }

        fn predict_label(&self, features: &[f64]) -> i64 {
            i64::from(features[self.column] > 0.5)
        }
    }

    /// Returns a fixed gap and counts calls.
    #[derive(Debug)]
    struct FixedGap {
        width: usize,
        gap: f64,
        calls: Arc<AtomicUsize>,
    }

    impl Regressor for FixedGap {
        fn n_features(&self) -> usize {
            self.width
        }

        fn predict_value(&self, _features: &[f64]) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gap
        }
    }

    fn predictor(gap: f64) -> (Predictor, Arc<AtomicUsize>) {
        let mut cols = magpie_feature_labels();
        cols.push("Symmetry_Cubic".into());
        let schema = FeatureSchema::new(cols).unwrap();
        let width = schema.len();
        let column = schema.position(EN_RANGE).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let models = Models::new(
            schema,
            Gatekeeper::new(Arc::new(Ionicity { width, column })),
            Specialist::new(Arc::new(FixedGap {
                width,
                gap,
                calls: Arc::clone(&calls),
            })),
        )
        .unwrap();
        (Predictor::new(models), calls)
    }

    #[test]
    fn metallic_short_circuit() {
        let (p, calls) = predictor(9.9);
        let r = p.predict("Fe").unwrap();
        assert_eq!(r.class, ConductivityClass::Metallic);
        assert_eq!(r.gap, 0.0);
        assert_eq!(r.score, 25.0);
        assert_eq!(r.radar.as_array(), [0.0, 0.4, 0.2, 0.25]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn insulator_at_peak() {
        let (p, calls) = predictor(1.75);
        let r = p.predict("Fe2O3").unwrap();
        assert_eq!(r.class, ConductivityClass::Insulating);
        assert_eq!(r.score, 85.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wide_gap_insulator() {
        let (p, _) = predictor(3.5);
        assert_eq!(p.predict("NaCl").unwrap().score, 71.7);
    }

    #[test]
    fn negative_gap_floored() {
        let (p, _) = predictor(-0.8);
        let r = p.predict("NaCl").unwrap();
        assert_eq!(r.gap, 0.0);
        assert_eq!(r.radar.gap(), 0.0);
    }

    #[test]
    fn non_finite_gap_fails() {
        let (p, _) = predictor(f64::NAN);
        assert!(matches!(p.predict("NaCl"), Err(PredictionError::AnalysisFailed { .. })));
    }

    #[test]
    fn empty_input_never_reaches_models() {
        let (p, calls) = predictor(1.0);
        assert_eq!(p.predict(""), Err(PredictionError::EmptyFormula));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn whitespace_only_input_is_a_failed_analysis() {
        let (p, calls) = predictor(1.0);
        for blank in ["   ", "\t\n"] {
            assert_eq!(
                p.predict(blank),
                Err(PredictionError::AnalysisFailed {
                    formula: blank.into()
                })
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let (p, _) = predictor(3.5);
        assert_eq!(p.predict("  NaCl "), p.predict("NaCl"));
    }

    #[test]
    fn bad_formula() {
        let (p, _) = predictor(1.0);
        assert_eq!(
            p.predict("Xx9Zz"),
            Err(PredictionError::AnalysisFailed {
                formula: "Xx9Zz".into()
            })
        );
    }

    #[test]
    fn unavailable_predictor() {
        let p = Predictor::unavailable("schema missing");
        assert!(!p.is_ready());
        assert_eq!(
            p.health(),
            Health::Unavailable {
                reason: "schema missing".into()
            }
        );
        assert!(matches!(p.predict("NaCl"), Err(PredictionError::AnalysisFailed { .. })));
        assert_eq!(p.predict(""), Err(PredictionError::EmptyFormula));
    }

    #[test]
    fn health_serializes_with_status() {
        let (p, _) = predictor(1.0);
        assert_eq!(p.health(), Health::Ready { n_features: 133 });
        let json = serde_json::to_value(p.health()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ready", "n_features": 133}));
    }

    #[test]
    fn batch_keeps_order() {
        let (p, _) = predictor(1.75);
        let inputs = ["Fe", "", "NaCl", "Xx9Zz", "Fe2O3"];
        let out = p.predict_batch(&inputs);
        assert_eq!(out.len(), inputs.len());
        for (input, result) in inputs.iter().zip(&out) {
            assert_eq!(result, &p.predict(input));
        }
    }

    #[test]
    fn width_mismatch_rejected_at_startup() {
        let schema = FeatureSchema::new(vec!["a".into(), "b".into()]).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let err = Models::new(
            schema,
            Gatekeeper::new(Arc::new(Ionicity { width: 2, column: 0 })),
            Specialist::new(Arc::new(FixedGap { width: 3, gap: 1.0, calls })),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StartupError::WidthMismatch {
                model: "specialist",
                expected: 3,
                actual: 2
            }
        ));
    }
}
