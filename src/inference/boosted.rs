// src/inference/boosted.rs
//! Gradient-boosted regression trees read from XGBoost's JSON model
//! format (`Booster.save_model("model.json")`).
//!
//! Prediction is `base_score + Σ leaf`, with the learning rate already
//! folded into the leaf weights by XGBoost. Splits send `x < condition`
//! left; a missing (NaN) feature follows the node's default direction.
//!
//! XGBoost works in single precision: inputs are cast to `f32`, compared
//! against `f32` conditions, and leaves are accumulated in `f32` on top of
//! `base_score`. The same is done here so thresholds written in shortest
//! `f32` form (e.g. `0.33333334`) split exactly as they did in training.

use super::decision_tree::{check_tree_shape, TREE_LEAF};
use super::Regressor;
use serde::Deserialize;

/// Objectives whose prediction is the raw margin.
const IDENTITY_OBJECTIVES: [&str; 5] = [
    "reg:squarederror",
    "reg:linear",
    "reg:squaredlogerror",
    "reg:pseudohubererror",
    "reg:absoluteerror",
];

#[derive(Debug, Clone, Deserialize)]
pub struct XgbModelFile {
    pub learner: XgbLearner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XgbLearner {
    pub learner_model_param: LearnerModelParam,
    pub gradient_booster: GradientBooster,
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub objective: Option<Objective>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LearnerModelParam {
    /// Stored as a string, e.g. `"5E-1"` or `"[5E-1]"` in newer releases.
    pub base_score: String,
    pub num_feature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Objective {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradientBooster {
    pub name: String,
    #[serde(default)]
    pub model: Option<GbTreeModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbTreeModel {
    pub trees: Vec<XgbTreeExport>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XgbTreeExport {
    pub left_children: Vec<i64>,
    pub right_children: Vec<i64>,
    pub split_indices: Vec<i64>,
    /// Split threshold for internal nodes, leaf weight for leaves.
    pub split_conditions: Vec<f32>,
    pub default_left: Vec<Flag>,
}

/// XGBoost has written `default_left` both as 0/1 and as booleans.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RegressionNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
    Leaf {
        value: f32,
    },
}

/// A single boosted regression tree.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<RegressionNode>,
}

impl RegressionTree {
    /// # Errors
    ///
    /// Returns `Err` on inconsistent arrays, invalid child pointers or a
    /// split on a feature at or beyond `n_features`.
    pub fn from_export(export: &XgbTreeExport, n_features: usize) -> Result<Self, String> {
        let n = export.left_children.len();
        if export.right_children.len() != n
            || export.split_indices.len() != n
            || export.split_conditions.len() != n
            || export.default_left.len() != n
        {
            return Err("inconsistent array lengths".into());
        }
        check_tree_shape(&export.left_children, &export.right_children)?;

        let nodes = (0..n)
            .map(|i| {
                if export.left_children[i] == TREE_LEAF {
                    return Ok(RegressionNode::Leaf {
                        value: export.split_conditions[i],
                    });
                }
                let feature = usize::try_from(export.split_indices[i])
                    .ok()
                    .filter(|&f| f < n_features)
                    .ok_or_else(|| {
                        format!("node {} splits on invalid feature {}", i, export.split_indices[i])
                    })?;
                Ok(RegressionNode::Split {
                    feature,
                    threshold: export.split_conditions[i],
                    left: export.left_children[i] as usize,
                    right: export.right_children[i] as usize,
                    default_left: export.default_left[i].is_set(),
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self { nodes })
    }

    pub fn predict(&self, features: &[f64]) -> f32 {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                RegressionNode::Leaf { value } => return *value,
                RegressionNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let v = features.get(*feature).map_or(f32::NAN, |&x| x as f32);
                    let go_left = if v.is_nan() { *default_left } else { v < *threshold };
                    idx = if go_left { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Additive ensemble of regression trees.
#[derive(Debug, Clone)]
pub struct GradientBoostedTrees {
    trees: Vec<RegressionTree>,
    base_score: f32,
    n_features: usize,
    feature_names: Option<Vec<String>>,
}

impl GradientBoostedTrees {
    /// # Errors
    ///
    /// Returns `Err` if the trees are malformed or `base_score` is not finite.
    pub fn new(trees: Vec<RegressionTree>, base_score: f32, n_features: usize) -> Result<Self, String> {
        if !base_score.is_finite() {
            return Err(format!("base_score {} is not finite", base_score));
        }
        Ok(Self {
            trees,
            base_score,
            n_features,
            feature_names: None,
        })
    }

    /// Builds the ensemble from a parsed XGBoost JSON model.
    ///
    /// # Errors
    ///
    /// Returns `Err` for non-tree boosters, objectives with a non-identity
    /// link, unparseable parameters or malformed trees.
    pub fn from_xgboost(file: XgbModelFile) -> Result<Self, String> {
        let learner = file.learner;

        if let Some(obj) = &learner.objective {
            if !IDENTITY_OBJECTIVES.contains(&obj.name.as_str()) {
                return Err(format!("unsupported objective {:?}", obj.name));
            }
        }
        if learner.gradient_booster.name != "gbtree" {
            return Err(format!(
                "unsupported booster {:?}",
                learner.gradient_booster.name
            ));
        }

        let n_features: usize = learner
            .learner_model_param
            .num_feature
            .trim()
            .parse()
            .map_err(|_| format!("bad num_feature {:?}", learner.learner_model_param.num_feature))?;
        let base_score = parse_base_score(&learner.learner_model_param.base_score)?;

        let model = learner
            .gradient_booster
            .model
            .ok_or_else(|| "booster has no model".to_string())?;
        let trees = model
            .trees
            .iter()
            .enumerate()
            .map(|(i, t)| RegressionTree::from_export(t, n_features).map_err(|e| format!("tree {}: {}", i, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let feature_names = if learner.feature_names.is_empty() {
            None
        } else if learner.feature_names.len() != n_features {
            return Err(format!(
                "{} feature names for {} features",
                learner.feature_names.len(),
                n_features
            ));
        } else {
            Some(learner.feature_names)
        };

        let mut gbt = Self::new(trees, base_score, n_features)?;
        gbt.feature_names = feature_names;
        Ok(gbt)
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        let margin = self
            .trees
            .iter()
            .fold(self.base_score, |acc, t| acc + t.predict(features));
        f64::from(margin)
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn base_score(&self) -> f32 {
        self.base_score
    }
}

impl Regressor for GradientBoostedTrees {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_value(&self, features: &[f64]) -> f64 {
        self.predict(features)
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

fn parse_base_score(raw: &str) -> Result<f32, String> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    trimmed
        .parse::<f32>()
        .map_err(|_| format!("bad base_score {:?}", raw))
}
