//! Regression model evaluation.
//!
//! Two families are supported:
//! - linear: `intercept + Σ coefficients_i * x_i`
//! - random forest: mean of per-tree leaf values
//!
//! Trees use flat parallel arrays, one entry per node, with the root at 0.
//! A node whose left child is `-1` is a leaf. Traversal goes left when
//! `x[feature] <= threshold`.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, InferenceError};

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearModel),
    RandomForest(ForestModel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionModel {
    /// Human-readable label for terminal output.
    pub fn display_name(&self) -> &'static str {
        match self {
            RegressionModel::Linear(_) => "linear regression",
            RegressionModel::RandomForest(_) => "random forest",
        }
    }

    /// Number of input features the model was fit on.
    pub fn n_features(&self) -> usize {
        match self {
            RegressionModel::Linear(m) => m.coefficients.len(),
            RegressionModel::RandomForest(m) => m.n_features,
        }
    }

    /// Structural checks run once at load time.
    pub fn validate(&self) -> Result<(), BundleError> {
        match self {
            RegressionModel::Linear(m) => {
                if m.coefficients.is_empty() {
                    return Err(BundleError::InvalidModel("linear model has no coefficients".into()));
                }
                if !(m.intercept.is_finite() && m.coefficients.iter().all(|c| c.is_finite())) {
                    return Err(BundleError::InvalidModel("linear model has non-finite weights".into()));
                }
                Ok(())
            }
            RegressionModel::RandomForest(m) => {
                if m.trees.is_empty() {
                    return Err(BundleError::InvalidModel("random forest has no trees".into()));
                }
                for (idx, tree) in m.trees.iter().enumerate() {
                    tree.validate(m.n_features)
                        .map_err(|msg| BundleError::InvalidModel(format!("tree {idx}: {msg}")))?;
                }
                Ok(())
            }
        }
    }

    /// Predict a single scaled row.
    pub fn predict(&self, x: &DVector<f64>) -> Result<f64, InferenceError> {
        let expected = self.n_features();
        if x.len() != expected {
            return Err(InferenceError::ShapeMismatch {
                stage: "model",
                expected,
                got: x.len(),
            });
        }

        let y = match self {
            RegressionModel::Linear(m) => m.intercept + x.dot(&DVector::from_column_slice(&m.coefficients)),
            RegressionModel::RandomForest(m) => {
                let sum: f64 = m.trees.iter().map(|t| t.predict_row(x.as_slice())).sum();
                sum / m.trees.len() as f64
            }
        };

        if !y.is_finite() {
            return Err(InferenceError::NonFinite("model"));
        }
        Ok(y)
    }
}

impl RegressionTree {
    pub fn num_nodes(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.num_nodes();
        if n == 0 {
            return Err("empty tree".into());
        }
        if [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("node arrays differ in length".into());
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {node} has only a right child"));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }

            // Children strictly after their parent, so traversal always terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} has out-of-order child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {node} splits on feature {feature} (model has {n_features})"));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Assumes `validate` passed and `x` is wide enough.
    fn predict_row(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}
