//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - built from prompts, flags, or CSV rows
//! - passed through the encoder by reference
//! - written back out alongside a prediction

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback frequency score for categories that never appeared in training.
pub const DEFAULT_UNKNOWN_FREQUENCY: f64 = 0.001;

/// Default display currency (the bundled models are trained on PKR prices).
pub const DEFAULT_CURRENCY: &str = "PKR";

/// One car as entered by the user.
///
/// Text fields are stored as entered; the encoder lower-cases them before
/// any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub year: i64,
    pub mileage: i64,
    pub engine: i64,
    pub make: String,
    pub model: String,
    pub registered: String,
    pub fuel: String,
    pub transmission: String,
    pub assembly: String,
    pub body: String,
    pub color: String,
}

impl RawInput {
    pub fn numeric(&self, field: NumericField) -> i64 {
        match field {
            NumericField::Year => self.year,
            NumericField::Mileage => self.mileage,
            NumericField::Engine => self.engine,
        }
    }

    pub fn frequency_text(&self, field: FrequencyField) -> &str {
        match field {
            FrequencyField::Make => &self.make,
            FrequencyField::Model => &self.model,
            FrequencyField::Registered => &self.registered,
        }
    }

    pub fn indicator_text(&self, field: IndicatorField) -> &str {
        match field {
            IndicatorField::Fuel => &self.fuel,
            IndicatorField::Transmission => &self.transmission,
            IndicatorField::Assembly => &self.assembly,
            IndicatorField::Body => &self.body,
            IndicatorField::Color => &self.color,
        }
    }
}

/// Parse a user-entered integer field (`year`, `mileage`, `engine`).
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// base-10 integer is rejected.
pub fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Integer fields passed through unchanged as features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Year,
    Mileage,
    Engine,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [NumericField::Year, NumericField::Mileage, NumericField::Engine];

    pub fn column_name(self) -> &'static str {
        match self {
            NumericField::Year => "year",
            NumericField::Mileage => "mileage",
            NumericField::Engine => "engine",
        }
    }
}

/// High-cardinality text fields replaced by their training frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrequencyField {
    Make,
    Model,
    Registered,
}

impl FrequencyField {
    pub const ALL: [FrequencyField; 3] = [
        FrequencyField::Make,
        FrequencyField::Model,
        FrequencyField::Registered,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            FrequencyField::Make => "make",
            FrequencyField::Model => "model",
            FrequencyField::Registered => "registered",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

/// Low-cardinality text fields expanded into drop-first indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorField {
    Fuel,
    Transmission,
    Assembly,
    Body,
    Color,
}

impl IndicatorField {
    pub const ALL: [IndicatorField; 5] = [
        IndicatorField::Fuel,
        IndicatorField::Transmission,
        IndicatorField::Assembly,
        IndicatorField::Body,
        IndicatorField::Color,
    ];

    /// Prefix of this field's dummy columns (`fuel` for `fuel_Diesel`).
    pub fn prefix(self) -> &'static str {
        match self {
            IndicatorField::Fuel => "fuel",
            IndicatorField::Transmission => "transmission",
            IndicatorField::Assembly => "assembly",
            IndicatorField::Body => "body",
            IndicatorField::Color => "color",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.prefix() == name)
    }

    /// Split a dummy column name into this field's category, if it belongs here.
    pub fn category_of<'a>(self, column: &'a str) -> Option<&'a str> {
        column
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|category| !category.is_empty())
    }
}

/// A prediction run's configuration as understood by the pipeline.
///
/// Derived from CLI flags, `.env`, and defaults.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub bundle_path: PathBuf,
    /// Overrides the bundle's unknown-category frequency when set.
    pub unknown_frequency: Option<f64>,
    /// Overrides the bundle's currency label when set.
    pub currency: Option<String>,
    pub export: Option<PathBuf>,
}

/// A saved prediction (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub input: RawInput,
    pub price: f64,
    pub currency: String,
}
