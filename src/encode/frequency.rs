//! Frequency maps for high-cardinality fields.

use std::collections::HashMap;

use crate::domain::FrequencyField;
use crate::error::BundleError;

/// Training-time occurrence frequency per category of one field.
///
/// Keys are lower-cased on construction so lookups only ever see normalized
/// values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyMap {
    scores: HashMap<String, f64>,
}

impl FrequencyMap {
    pub fn new(field: FrequencyField, scores: HashMap<String, f64>) -> Result<Self, BundleError> {
        let mut normalized = HashMap::with_capacity(scores.len());
        for (category, score) in scores {
            if !score.is_finite() {
                return Err(BundleError::NonFiniteFrequency {
                    field: field.column_name().to_string(),
                    category,
                });
            }
            let key = category.to_lowercase();
            if normalized.insert(key, score).is_some() {
                return Err(BundleError::DuplicateCategory {
                    field: field.column_name().to_string(),
                    category,
                });
            }
        }
        Ok(Self { scores: normalized })
    }

    /// Score for an already lower-cased category.
    pub fn score(&self, normalized: &str) -> Option<f64> {
        self.scores.get(normalized).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
