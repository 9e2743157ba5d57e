// src/inference/gatekeeper.rs
//! First stage: decides whether a composition is metallic.

use super::{Classifier, ConductivityClass};
use crate::error::ModelError;
use crate::features::FeatureVector;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Gatekeeper {
    model: Arc<dyn Classifier>,
}

impl Gatekeeper {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.model.feature_names()
    }

    /// Classifies one vector. The width must match what the model was
    /// trained on; any label other than 0/1 is an error.
    pub fn classify(&self, features: &FeatureVector) -> Result<ConductivityClass, ModelError> {
        let expected = self.model.n_features();
        if features.len() != expected {
            return Err(ModelError::FeatureMismatch {
                model: "gatekeeper",
                expected,
                actual: features.len(),
            });
        }
        let label = self.model.predict_label(features.values());
        ConductivityClass::from_label(label).ok_or(ModelError::UnknownLabel(label))
    }
}
