//! Raw record -> schema-aligned feature vector.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::{FrequencyField, RawInput};
use crate::encode::frequency::FrequencyMap;
use crate::encode::schema::{ColumnSchema, EncodingPlan};
use crate::error::BundleError;

/// A feature vector aligned to a `ColumnSchema`: same names, same order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVector {
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl EncodedVector {
    /// Pair raw values with column names. Callers size `values` from the
    /// same schema that supplies `columns`.
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

/// Replays the training-time feature engineering for one record at a time.
///
/// Immutable after construction; share it by reference.
#[derive(Debug, Clone)]
pub struct Encoder {
    schema: ColumnSchema,
    plan: EncodingPlan,
    freq_maps: BTreeMap<FrequencyField, FrequencyMap>,
    unknown_frequency: f64,
}

impl Encoder {
    pub fn new(
        schema: ColumnSchema,
        freq_maps: BTreeMap<FrequencyField, FrequencyMap>,
        reference_levels: &HashMap<String, String>,
        unknown_frequency: f64,
    ) -> Result<Self, BundleError> {
        if !(unknown_frequency.is_finite() && unknown_frequency >= 0.0) {
            return Err(BundleError::InvalidFallback(unknown_frequency));
        }

        let plan = EncodingPlan::compile(&schema, reference_levels)?;

        // Every frequency column needs its map; maps without a column are harmless.
        for (field, _) in plan.frequency() {
            if !freq_maps.contains_key(field) {
                return Err(BundleError::MissingFrequencyMap(field.column_name().to_string()));
            }
        }

        Ok(Self {
            schema,
            plan,
            freq_maps,
            unknown_frequency,
        })
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn plan(&self) -> &EncodingPlan {
        &self.plan
    }

    pub fn freq_map(&self, field: FrequencyField) -> Option<&FrequencyMap> {
        self.freq_maps.get(&field)
    }

    pub fn unknown_frequency(&self) -> f64 {
        self.unknown_frequency
    }

    /// Frequency score for a raw (not yet normalized) category.
    pub fn frequency_score(&self, field: FrequencyField, raw: &str) -> f64 {
        let normalized = raw.to_lowercase();
        self.freq_maps
            .get(&field)
            .and_then(|map| map.score(&normalized))
            .unwrap_or(self.unknown_frequency)
    }

    /// Encode one record.
    ///
    /// Every schema column starts at 0; each input field then writes into the
    /// slot(s) the plan resolved for it. Fields without a slot are dropped.
    pub fn encode(&self, input: &RawInput) -> EncodedVector {
        let mut values = vec![0.0; self.schema.len()];

        for &(field, idx) in self.plan.numeric() {
            values[idx] = input.numeric(field) as f64;
        }

        for &(field, idx) in self.plan.frequency() {
            values[idx] = self.frequency_score(field, input.frequency_text(field));
        }

        for (field, slots) in self.plan.indicators() {
            let normalized = input.indicator_text(field).to_lowercase();
            if let Some(idx) = slots.slot(&normalized) {
                values[idx] = 1.0;
            }
        }

        EncodedVector::new(self.schema.shared_columns(), values)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::domain::IndicatorField;
    use crate::test_support::{
        scenario_columns, scenario_encoder, scenario_freq_maps, scenario_input, scenario_reference_levels,
    };

    #[test]
    fn known_make_uses_its_frequency() {
        let encoder = scenario_encoder();
        let encoded = encoder.encode(&scenario_input());
        assert_eq!(encoded.get("make"), Some(0.041));
        assert_eq!(encoded.get("model"), Some(0.022));
        assert_eq!(encoded.get("registered"), Some(0.18));
    }

    #[test]
    fn unseen_make_falls_back() {
        let encoder = scenario_encoder();
        let input = RawInput {
            make: "Obscuria".to_string(),
            ..scenario_input()
        };
        assert_eq!(encoder.encode(&input).get("make"), Some(0.001));
    }

    #[test]
    fn fallback_is_configurable() {
        let encoder = Encoder::new(
            ColumnSchema::new(scenario_columns()).unwrap(),
            scenario_freq_maps(),
            &HashMap::new(),
            0.0005,
        )
        .unwrap();
        assert_eq!(encoder.frequency_score(FrequencyField::Model, "Tesla Roadster"), 0.0005);
    }

    #[test]
    fn invalid_fallback_rejected() {
        for bad in [f64::NAN, f64::INFINITY, -0.1] {
            let err = Encoder::new(
                ColumnSchema::new(scenario_columns()).unwrap(),
                scenario_freq_maps(),
                &HashMap::new(),
                bad,
            )
            .unwrap_err();
            assert!(matches!(err, BundleError::InvalidFallback(_)));
        }
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let encoder = scenario_encoder();
        let input = RawInput {
            make: "HONDA".to_string(),
            fuel: "DIESEL".to_string(),
            ..scenario_input()
        };
        let encoded = encoder.encode(&input);
        assert_eq!(encoded.get("make"), Some(0.041));
        assert_eq!(encoded.get("fuel_Diesel"), Some(1.0));
        assert_eq!(encoded.get("fuel_Petrol"), Some(0.0));
    }

    #[test]
    fn other_fuel_dummies_are_zero() {
        let encoder = scenario_encoder();
        let encoded = encoder.encode(&scenario_input());
        assert_eq!(encoded.get("fuel_Diesel"), Some(0.0));
        assert_eq!(encoded.get("fuel_Hybrid"), Some(0.0));
        assert_eq!(encoded.get("fuel_Petrol"), Some(1.0));
    }

    #[test]
    fn scenario_vector_matches_hand_encoding() {
        let encoder = scenario_encoder();
        let encoded = encoder.encode(&scenario_input());

        let ones: Vec<&str> = encoded
            .iter()
            .filter(|(name, v)| *v == 1.0 && name.contains('_'))
            .map(|(name, _)| name)
            .collect();
        assert_eq!(ones, vec!["fuel_Petrol", "assembly_Local", "body_Sedan", "color_White"]);

        assert_eq!(encoded.get("year"), Some(2022.0));
        assert_eq!(encoded.get("mileage"), Some(50000.0));
        assert_eq!(encoded.get("engine"), Some(1800.0));
        // Automatic is the reference level for transmission.
        assert_eq!(encoded.get("transmission_Manual"), Some(0.0));
    }

    #[test]
    fn output_columns_equal_schema() {
        let encoder = scenario_encoder();
        let encoded = encoder.encode(&scenario_input());
        assert_eq!(encoded.columns(), scenario_columns().as_slice());
        assert_eq!(encoded.len(), 25);
        assert_eq!(encoded.values().len(), encoded.columns().len());
    }

    #[test]
    fn reference_levels_encode_all_zero() {
        let encoder = scenario_encoder();
        let references = scenario_reference_levels();

        for field in IndicatorField::ALL {
            let slots = encoder.plan().indicator(field).unwrap();
            let level = slots.reference().unwrap();
            assert_eq!(references.get(field.prefix()).unwrap().to_lowercase(), level);

            let mut input = scenario_input();
            match field {
                IndicatorField::Fuel => input.fuel = level.to_uppercase(),
                IndicatorField::Transmission => input.transmission = level.to_string(),
                IndicatorField::Assembly => input.assembly = level.to_string(),
                IndicatorField::Body => input.body = level.to_string(),
                IndicatorField::Color => input.color = level.to_string(),
            }
            let encoded = encoder.encode(&input);
            for idx in slots.slots() {
                assert_eq!(encoded.values()[idx], 0.0, "{field:?} reference must not set column {idx}");
            }
        }
    }

    #[test]
    fn columns_without_source_stay_zero() {
        let mut columns = scenario_columns();
        columns.push("doors".to_string());
        let encoder = Encoder::new(
            ColumnSchema::new(columns).unwrap(),
            scenario_freq_maps(),
            &HashMap::new(),
            0.001,
        )
        .unwrap();
        assert_eq!(encoder.encode(&scenario_input()).get("doors"), Some(0.0));
    }

    #[test]
    fn fields_missing_from_schema_are_discarded() {
        let schema = ColumnSchema::new(vec!["make".to_string(), "fuel_Diesel".to_string()]).unwrap();
        let encoder = Encoder::new(schema, scenario_freq_maps(), &HashMap::new(), 0.001).unwrap();
        let encoded = encoder.encode(&scenario_input());
        assert_eq!(encoded.columns(), &["make".to_string(), "fuel_Diesel".to_string()]);
        assert_eq!(encoded.values(), &[0.041, 0.0]);
    }

    #[test]
    fn missing_frequency_map_for_schema_column_is_an_error() {
        let mut maps = scenario_freq_maps();
        maps.remove(&FrequencyField::Registered);
        let err = Encoder::new(
            ColumnSchema::new(scenario_columns()).unwrap(),
            maps,
            &HashMap::new(),
            0.001,
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::MissingFrequencyMap(f) if f == "registered"));
    }

    #[test]
    fn random_inputs_are_aligned_and_idempotent() {
        const MAKES: &[&str] = &["Honda", "toyota", "SUZUKI", "Obscuria", ""];
        const FUELS: &[&str] = &["Petrol", "diesel", "Hybrid", "CNG", "electric"];
        const BODIES: &[&str] = &["Sedan", "hatchback", "SUV", "Compact sedan", "Pickup"];
        const COLORS: &[&str] = &["White", "black", "Beige", "Purple"];

        let encoder = scenario_encoder();
        let columns = scenario_columns();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let input = RawInput {
                year: rng.gen_range(1980..2026),
                mileage: rng.gen_range(0..400_000),
                engine: rng.gen_range(600..6000),
                make: MAKES[rng.gen_range(0..MAKES.len())].to_string(),
                fuel: FUELS[rng.gen_range(0..FUELS.len())].to_string(),
                body: BODIES[rng.gen_range(0..BODIES.len())].to_string(),
                color: COLORS[rng.gen_range(0..COLORS.len())].to_string(),
                ..scenario_input()
            };

            let first = encoder.encode(&input);
            let second = encoder.encode(&input);
            assert_eq!(first, second);
            assert_eq!(first.columns(), columns.as_slice());

            let make = first.get("make").unwrap();
            match input.make.to_lowercase().as_str() {
                "honda" => assert_eq!(make, 0.041),
                "toyota" => assert_eq!(make, 0.25),
                "suzuki" => assert_eq!(make, 0.3),
                _ => assert_eq!(make, 0.001),
            }

            // At most one indicator per field.
            for (_, slots) in encoder.plan().indicators() {
                let hot = slots.slots().filter(|&i| first.values()[i] == 1.0).count();
                assert!(hot <= 1);
            }
        }
    }
}
