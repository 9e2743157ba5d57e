// src/inference/decision_tree.rs
//! Classification tree inference over sklearn's array layout.
//!
//! The tree is trained in Python and exported as the parallel arrays of
//! `estimator.tree_` (`children_left`, `children_right`, `feature`,
//! `threshold`, `value`). Only inference lives here.

use serde::Deserialize;

/// Marker sklearn uses for "no child".
pub const TREE_LEAF: i64 = -1;

/// One tree as exported from `tree_`.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeExport {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class counts or fractions.
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: Vec<f64>,
    },
}

/// A decision tree classifier returning per-class probabilities.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    n_features: usize,
    n_classes: usize,
}

impl DecisionTree {
    /// # Errors
    ///
    /// Returns `Err` if arrays disagree in length, a child pointer is out of
    /// range or revisits a node, a split names a feature beyond
    /// `n_features`, or a leaf has no usable class distribution.
    pub fn from_export(export: &TreeExport, n_features: usize, n_classes: usize) -> Result<Self, String> {
        let n = export.children_left.len();
        if export.children_right.len() != n
            || export.feature.len() != n
            || export.threshold.len() != n
            || export.value.len() != n
        {
            return Err("inconsistent array lengths".into());
        }
        check_tree_shape(&export.children_left, &export.children_right)?;

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            if export.children_left[i] == TREE_LEAF {
                let row = &export.value[i];
                if row.len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class values, expected {}",
                        i,
                        row.len(),
                        n_classes
                    ));
                }
                let total: f64 = row.iter().sum();
                if !(total > 0.0) || row.iter().any(|v| *v < 0.0) {
                    return Err(format!("leaf {} has no class distribution", i));
                }
                nodes.push(TreeNode::Leaf {
                    proba: row.iter().map(|v| v / total).collect(),
                });
            } else {
                let feature = usize::try_from(export.feature[i])
                    .ok()
                    .filter(|&f| f < n_features)
                    .ok_or_else(|| format!("node {} splits on invalid feature {}", i, export.feature[i]))?;
                nodes.push(TreeNode::Split {
                    feature,
                    threshold: export.threshold[i],
                    left: export.children_left[i] as usize,
                    right: export.children_right[i] as usize,
                });
            }
        }

        Ok(Self {
            nodes,
            n_features,
            n_classes,
        })
    }

    /// Class probabilities for one sample. Features `<= threshold` go left.
    ///
    /// sklearn casts inputs to `f32` before comparing against its `f64`
    /// thresholds, so features are rounded through `f32` here too.
    pub fn predict_proba(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { proba } => return proba,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = features.get(*feature).map_or(0.0, |&x| f64::from(x as f32));
                    idx = if v <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// Verifies that the child arrays describe a single tree rooted at node 0:
/// every child index is in range and every node is reached exactly once.
/// Traversal over a checked tree always terminates.
pub fn check_tree_shape(left: &[i64], right: &[i64]) -> Result<(), String> {
    let n = left.len();
    if n == 0 {
        return Err("tree has no nodes".into());
    }
    if right.len() != n {
        return Err("child arrays differ in length".into());
    }

    let mut visited = vec![false; n];
    let mut stack = vec![0usize];
    while let Some(idx) = stack.pop() {
        if visited[idx] {
            return Err(format!("node {} is reachable twice", idx));
        }
        visited[idx] = true;

        match (left[idx], right[idx]) {
            (TREE_LEAF, TREE_LEAF) => {}
            (l, r) => {
                for child in [l, r] {
                    let c = usize::try_from(child)
                        .ok()
                        .filter(|&c| c < n)
                        .ok_or_else(|| format!("node {} has invalid child {}", idx, child))?;
                    stack.push(c);
                }
            }
        }
    }

    match visited.iter().position(|v| !v) {
        Some(orphan) => Err(format!("node {} is unreachable", orphan)),
        None => Ok(()),
    }
}
