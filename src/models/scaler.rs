//! Fitted feature scalers.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, InferenceError};

/// Per-column affine transform stored at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `z = (x - mean) / scale`. A zero `scale` entry (constant column) is treated as 1.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `z = x * scale + min`.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    pub fn display_name(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min-max",
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
        }
    }

    pub fn validate(&self) -> Result<(), BundleError> {
        let (offset, scale) = match self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
        };
        if offset.len() != scale.len() {
            return Err(BundleError::InvalidScaler(format!(
                "{} offsets but {} scales",
                offset.len(),
                scale.len()
            )));
        }
        if offset.is_empty() {
            return Err(BundleError::InvalidScaler("no features".into()));
        }
        if !offset.iter().chain(scale.iter()).all(|v| v.is_finite()) {
            return Err(BundleError::InvalidScaler("non-finite parameters".into()));
        }
        Ok(())
    }

    pub fn transform(&self, values: &[f64]) -> Result<DVector<f64>, InferenceError> {
        let expected = self.n_features();
        if values.len() != expected {
            return Err(InferenceError::ShapeMismatch {
                stage: "scaler",
                expected,
                got: values.len(),
            });
        }

        let x = DVector::from_column_slice(values);
        let z = match self {
            Scaler::Standard { mean, scale } => {
                let mean = DVector::from_column_slice(mean);
                let scale = DVector::from_iterator(
                    scale.len(),
                    scale.iter().map(|&s| if s == 0.0 { 1.0 } else { s }),
                );
                (x - mean).component_div(&scale)
            }
            Scaler::MinMax { min, scale } => {
                x.component_mul(&DVector::from_column_slice(scale)) + DVector::from_column_slice(min)
            }
        };

        if z.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::NonFinite("scaler"));
        }
        Ok(z)
    }
}
