//! Write prediction JSON files.
//!
//! A prediction record is the input exactly as entered, the predicted price,
//! the currency label, and when it was produced. The schema is defined by
//! `domain::PredictionRecord`.

use std::fs::File;
use std::path::Path;

use crate::domain::PredictionRecord;
use crate::error::{AppError, EXIT_BUNDLE};

pub fn write_prediction_json(path: &Path, record: &PredictionRecord) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_BUNDLE,
            format!("Failed to create prediction JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, record)
        .map_err(|e| AppError::new(EXIT_BUNDLE, format!("Failed to write prediction JSON: {e}")))?;

    Ok(())
}
