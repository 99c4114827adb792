//! Scale an encoded vector and run the regression model on it.

use crate::encode::EncodedVector;
use crate::error::{BundleError, InferenceError};
use crate::models::{RegressionModel, Scaler};

#[derive(Debug, Clone)]
pub struct InferenceAdapter {
    scaler: Scaler,
    model: RegressionModel,
}

impl InferenceAdapter {
    /// Validate both components' internal structure.
    ///
    /// Width agreement with the column schema is deliberately not checked here;
    /// it is enforced on every `predict` call.
    pub fn new(scaler: Scaler, model: RegressionModel) -> Result<Self, BundleError> {
        scaler.validate()?;
        model.validate()?;
        Ok(Self { scaler, model })
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    /// The first width disagreement a vector of `width` columns would hit.
    pub fn check_width(&self, width: usize) -> Result<(), InferenceError> {
        for (stage, expected) in [
            ("scaler", self.scaler.n_features()),
            ("model", self.model.n_features()),
        ] {
            if expected != width {
                return Err(InferenceError::ShapeMismatch {
                    stage,
                    expected,
                    got: width,
                });
            }
        }
        Ok(())
    }

    pub fn predict(&self, vector: &EncodedVector) -> Result<f64, InferenceError> {
        let scaled = self.scaler.transform(vector.values())?;
        self.model.predict(&scaled)
    }
}
