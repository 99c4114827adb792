//! Column schema and the encoding plan compiled from it.
//!
//! The schema is the ordered list of feature columns the model was fit on.
//! Instead of expanding dummies per request and reindexing afterwards, we
//! resolve every column to a slot once, at load time:
//!
//! - `year` / `mileage` / `engine` -> numeric slot
//! - `make` / `model` / `registered` -> frequency slot
//! - `<field>_<Category>` for an indicator field -> category slot
//! - anything else -> unmapped (always 0)
//!
//! A category with no column is the dropped reference level (or was never seen
//! in training); both encode as an all-zero indicator pattern.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{FrequencyField, IndicatorField, NumericField};
use crate::error::BundleError;

/// Ordered, duplicate-free feature column names.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    columns: Arc<[String]>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, BundleError> {
        if columns.is_empty() {
            return Err(BundleError::EmptySchema);
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(BundleError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns: columns.into(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn shared_columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Slots of one indicator field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSlots {
    /// Lower-cased category -> column index.
    categories: BTreeMap<String, usize>,
    reference: Option<String>,
}

impl IndicatorSlots {
    pub fn slot(&self, normalized: &str) -> Option<usize> {
        self.categories.get(normalized).copied()
    }

    /// Categories that own a column, lower-cased, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.categories.values().copied()
    }

    /// Dropped category, when the bundle declares it.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Column slots resolved from a `ColumnSchema`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodingPlan {
    numeric: Vec<(NumericField, usize)>,
    frequency: Vec<(FrequencyField, usize)>,
    indicators: BTreeMap<IndicatorField, IndicatorSlots>,
    unmapped: Vec<usize>,
}

impl EncodingPlan {
    /// Resolve each schema column to the field that feeds it.
    ///
    /// `reference_levels` names the dropped category per indicator field; a
    /// reference level that still owns a column is a bundle error.
    pub fn compile(
        schema: &ColumnSchema,
        reference_levels: &HashMap<String, String>,
    ) -> Result<Self, BundleError> {
        let mut plan = EncodingPlan::default();

        'columns: for (idx, column) in schema.columns().iter().enumerate() {
            if let Some(field) = NumericField::ALL
                .into_iter()
                .find(|f| f.column_name() == column.as_str())
            {
                plan.numeric.push((field, idx));
                continue;
            }
            if let Some(field) = FrequencyField::from_name(column) {
                plan.frequency.push((field, idx));
                continue;
            }
            for field in IndicatorField::ALL {
                if let Some(category) = field.category_of(column) {
                    let slots = plan.indicators.entry(field).or_default();
                    if slots.categories.insert(category.to_lowercase(), idx).is_some() {
                        return Err(BundleError::DuplicateColumn(column.clone()));
                    }
                    continue 'columns;
                }
            }
            debug!(column = %column, "model column is not produced by any input field; encoding as 0");
            plan.unmapped.push(idx);
        }

        for (name, level) in reference_levels {
            let field = IndicatorField::from_name(name)
                .ok_or_else(|| BundleError::UnknownReferenceField(name.clone()))?;
            let level = level.to_lowercase();
            let slots = plan.indicators.entry(field).or_default();
            if let Some(&idx) = slots.categories.get(&level) {
                return Err(BundleError::ReferenceHasColumn {
                    field: name.clone(),
                    level,
                    column: schema.columns()[idx].clone(),
                });
            }
            slots.reference = Some(level);
        }

        debug!(
            numeric = plan.numeric.len(),
            frequency = plan.frequency.len(),
            indicator_fields = plan.indicators.len(),
            unmapped = plan.unmapped.len(),
            "compiled encoding plan"
        );

        Ok(plan)
    }

    pub fn numeric(&self) -> &[(NumericField, usize)] {
        &self.numeric
    }

    pub fn frequency(&self) -> &[(FrequencyField, usize)] {
        &self.frequency
    }

    pub fn indicator(&self, field: IndicatorField) -> Option<&IndicatorSlots> {
        self.indicators.get(&field)
    }

    pub fn indicators(&self) -> impl Iterator<Item = (IndicatorField, &IndicatorSlots)> {
        self.indicators.iter().map(|(f, s)| (*f, s))
    }

    pub fn unmapped(&self) -> &[usize] {
        &self.unmapped
    }
}
