// src/inference/specialist.rs
//! Second stage: band-gap regression, only consulted for insulators.

use super::Regressor;
use crate::error::ModelError;
use crate::features::FeatureVector;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Specialist {
    model: Arc<dyn Regressor>,
}

impl Specialist {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model }
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.model.feature_names()
    }

    /// Raw band-gap estimate in eV. The value is not clamped here; a
    /// negative estimate is passed through for the scorer to handle.
    pub fn predict_gap(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let expected = self.model.n_features();
        if features.len() != expected {
            return Err(ModelError::FeatureMismatch {
                model: "specialist",
                expected,
                actual: features.len(),
            });
        }
        let gap = self.model.predict_value(features.values());
        if gap.is_finite() {
            Ok(gap)
        } else {
            Err(ModelError::NonFinite { model: "specialist" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSchema;

    /// Returns a fixed value regardless of input.
    #[derive(Debug)]
    struct Fixed(usize, f64);

    impl Regressor for Fixed {
        fn n_features(&self) -> usize {
            self.0
        }

        fn predict_value(&self, _features: &[f64]) -> f64 {
            self.1
        }
    }

    fn vector(width: usize) -> FeatureVector {
        let schema = FeatureSchema::new((0..width).map(|i| format!("c{}", i)).collect()).unwrap();
        schema.align(&[])
    }

    #[test]
    fn passes_estimate_through() {
        let sp = Specialist::new(Arc::new(Fixed(2, 1.75)));
        assert_eq!(sp.predict_gap(&vector(2)), Ok(1.75));
        let negative = Specialist::new(Arc::new(Fixed(2, -0.3)));
        assert_eq!(negative.predict_gap(&vector(2)), Ok(-0.3));
    }

    #[test]
    fn rejects_wrong_width() {
        let sp = Specialist::new(Arc::new(Fixed(4, 1.0)));
        assert!(matches!(
            sp.predict_gap(&vector(2)),
            Err(ModelError::FeatureMismatch { expected: 4, actual: 2, .. })
        ));
    }

    #[test]
    fn rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY] {
            let sp = Specialist::new(Arc::new(Fixed(1, bad)));
            assert_eq!(sp.predict_gap(&vector(1)), Err(ModelError::NonFinite { model: "specialist" }));
        }
    }
}
