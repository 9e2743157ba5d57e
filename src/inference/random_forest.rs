// src/inference/random_forest.rs
//! Random forest classifier used as the conductor/insulator gate.
//!
//! Mirrors sklearn's `RandomForestClassifier.predict`: the class
//! distributions of the reached leaves are averaged across trees and the
//! class with the highest mean probability wins (first class on ties).

use super::decision_tree::{DecisionTree, TreeExport};
use super::Classifier;
use serde::Deserialize;

/// JSON layout of an exported forest.
#[derive(Debug, Clone, Deserialize)]
pub struct ForestExport {
    pub n_features: usize,
    /// Label for each class index (`estimator.classes_`).
    pub classes: Vec<i64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub trees: Vec<TreeExport>,
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    classes: Vec<i64>,
    n_features: usize,
    feature_names: Option<Vec<String>>,
}

impl RandomForest {
    /// # Errors
    ///
    /// Returns `Err` for an empty forest, fewer than two classes, a
    /// feature-name list of the wrong width, or any malformed tree.
    pub fn from_export(export: ForestExport) -> Result<Self, String> {
        if export.trees.is_empty() {
            return Err("empty forest".into());
        }
        if export.classes.len() < 2 {
            return Err("need at least 2 classes".into());
        }
        if let Some(names) = &export.feature_names {
            if names.len() != export.n_features {
                return Err(format!(
                    "{} feature names for {} features",
                    names.len(),
                    export.n_features
                ));
            }
        }

        let n_classes = export.classes.len();
        let trees = export
            .trees
            .iter()
            .enumerate()
            .map(|(i, t)| {
                DecisionTree::from_export(t, export.n_features, n_classes)
                    .map_err(|e| format!("tree {}: {}", i, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            classes: export.classes,
            n_features: export.n_features,
            feature_names: export.feature_names,
        })
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }

    pub fn predict(&self, features: &[f64]) -> i64 {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes[best]
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_label(&self, features: &[f64]) -> i64 {
        self.predict(features)
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}
