//! Error types.
//!
//! `AppError` is what the binary reports: a message plus a process exit code.
//! The library-level errors (`BundleError`, `InferenceError`) carry structure
//! for callers and tests and convert into `AppError` at the edge.
//!
//! Exit codes:
//! - `2` bundle load / I/O / configuration failures
//! - `3` malformed user input (non-integer year, mileage or engine)
//! - `4` inference failures (shape mismatch, non-finite output)

use thiserror::Error;

pub const EXIT_BUNDLE: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_INFERENCE: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// The trained-model bundle could not be loaded or is internally inconsistent.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Model file '{path}' not found or unreadable: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bundle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bundle has no model columns")]
    EmptySchema,

    #[error("Duplicate model column '{0}'")]
    DuplicateColumn(String),

    #[error("Frequency map for unknown field '{0}'")]
    UnknownFrequencyField(String),

    #[error("Missing frequency map for field '{0}'")]
    MissingFrequencyMap(String),

    #[error("Non-finite frequency score for {field}='{category}'")]
    NonFiniteFrequency { field: String, category: String },

    #[error("Frequency map '{field}' lists '{category}' more than once (case-insensitive)")]
    DuplicateCategory { field: String, category: String },

    #[error("Reference level for unknown indicator field '{0}'")]
    UnknownReferenceField(String),

    #[error("Reference level '{level}' of field '{field}' has its own column '{column}'")]
    ReferenceHasColumn {
        field: String,
        level: String,
        column: String,
    },

    #[error("Invalid unknown-category frequency {0} (must be finite and >= 0)")]
    InvalidFallback(f64),

    #[error("Invalid scaler: {0}")]
    InvalidScaler(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

/// Failure while scaling or predicting a single encoded vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Shape mismatch in {stage}: expected {expected} features, got {got}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Non-finite value produced by {0}")]
    NonFinite(&'static str),
}

impl From<BundleError> for AppError {
    fn from(err: BundleError) -> Self {
        AppError::new(EXIT_BUNDLE, err.to_string())
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::new(
            EXIT_INFERENCE,
            format!(
                "Prediction failed due to an internal error: {err}\n\
                 Ensure the model bundle matches the expected feature columns."
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_errors_map_to_inference_exit_code() {
        let err: AppError = InferenceError::ShapeMismatch {
            stage: "scaler",
            expected: 25,
            got: 24,
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_INFERENCE);
        assert!(err.to_string().contains("expected 25 features, got 24"));
    }

    #[test]
    fn bundle_errors_map_to_bundle_exit_code() {
        let err: AppError = BundleError::EmptySchema.into();
        assert_eq!(err.exit_code(), EXIT_BUNDLE);
    }
}
