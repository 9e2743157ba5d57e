// src/inference/mod.rs

pub mod boosted;
pub mod decision_tree;
pub mod gatekeeper;
pub mod random_forest;
pub mod specialist;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use boosted::GradientBoostedTrees;
pub use decision_tree::DecisionTree;
pub use gatekeeper::Gatekeeper;
pub use random_forest::RandomForest;
pub use specialist::Specialist;

/// Outcome of the gatekeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductivityClass {
    Metallic,
    Insulating,
}

impl ConductivityClass {
    /// Maps the training label (0 = metallic, 1 = insulating).
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Self::Metallic),
            1 => Some(Self::Insulating),
            _ => None,
        }
    }

    pub fn label(self) -> i64 {
        match self {
            Self::Metallic => 0,
            Self::Insulating => 1,
        }
    }
}

impl fmt::Display for ConductivityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metallic => f.write_str("metallic"),
            Self::Insulating => f.write_str("insulating"),
        }
    }
}

/// A pre-trained binary classifier. Implementations must be read-only
/// during prediction so one instance can serve concurrent requests.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Width of the input vector the model was trained on.
    fn n_features(&self) -> usize;

    fn predict_label(&self, features: &[f64]) -> i64;

    /// Column names recorded in the artifact, if any.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// A pre-trained scalar regressor.
pub trait Regressor: Send + Sync + fmt::Debug {
    fn n_features(&self) -> usize;

    fn predict_value(&self, features: &[f64]) -> f64;

    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for class in [ConductivityClass::Metallic, ConductivityClass::Insulating] {
            assert_eq!(ConductivityClass::from_label(class.label()), Some(class));
        }
        assert_eq!(ConductivityClass::from_label(2), None);
        assert_eq!(ConductivityClass::from_label(-1), None);
    }
}
