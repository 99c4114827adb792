//! Fixtures shared by unit tests: a small, hand-checkable bundle.
//!
//! The schema has 25 columns: six pass-through/frequency columns followed by
//! drop-first dummies for the five indicator fields.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{FrequencyField, RawInput};
use crate::encode::{ColumnSchema, Encoder, FrequencyMap};

pub fn scenario_columns() -> Vec<String> {
    [
        "year",
        "mileage",
        "engine",
        "make",
        "model",
        "registered",
        "fuel_Diesel",
        "fuel_Hybrid",
        "fuel_Petrol",
        "transmission_Manual",
        "assembly_Local",
        "body_Cross Over",
        "body_Hatchback",
        "body_Mini Van",
        "body_SUV",
        "body_Sedan",
        "color_Black",
        "color_Blue",
        "color_Gold",
        "color_Green",
        "color_Grey",
        "color_Maroon",
        "color_Red",
        "color_Silver",
        "color_White",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

pub fn scenario_reference_levels() -> HashMap<String, String> {
    HashMap::from([
        ("fuel".to_string(), "CNG".to_string()),
        ("transmission".to_string(), "Automatic".to_string()),
        ("assembly".to_string(), "Imported".to_string()),
        ("body".to_string(), "Compact sedan".to_string()),
        ("color".to_string(), "Beige".to_string()),
    ])
}

pub fn scenario_freq_maps() -> BTreeMap<FrequencyField, FrequencyMap> {
    let raw = [
        (
            FrequencyField::Make,
            vec![("honda", 0.041), ("toyota", 0.25), ("suzuki", 0.3)],
        ),
        (
            FrequencyField::Model,
            vec![("civic", 0.022), ("corolla", 0.09), ("mehran", 0.07)],
        ),
        (
            FrequencyField::Registered,
            vec![("islamabad", 0.18), ("lahore", 0.31), ("un-registered", 0.05)],
        ),
    ];
    raw.into_iter()
        .map(|(field, scores)| {
            let scores = scores.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
            (field, FrequencyMap::new(field, scores).unwrap())
        })
        .collect()
}

pub fn scenario_encoder() -> Encoder {
    Encoder::new(
        ColumnSchema::new(scenario_columns()).unwrap(),
        scenario_freq_maps(),
        &scenario_reference_levels(),
        0.001,
    )
    .unwrap()
}

pub fn scenario_input() -> RawInput {
    RawInput {
        year: 2022,
        mileage: 50000,
        engine: 1800,
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        registered: "Islamabad".to_string(),
        fuel: "Petrol".to_string(),
        transmission: "Automatic".to_string(),
        assembly: "Local".to_string(),
        body: "Sedan".to_string(),
        color: "White".to_string(),
    }
}

/// Bundle JSON with a linear model over the scenario schema.
///
/// The scaler is the identity except for `year`, `mileage` and `engine`, and
/// the model weights only a handful of columns so expected prices can be
/// computed by hand.
pub fn scenario_bundle_json() -> String {
    let columns = scenario_columns();
    let n = columns.len();

    let mut mean = vec![0.0; n];
    let mut scale = vec![1.0; n];
    mean[0] = 2015.0;
    scale[0] = 5.0;
    mean[1] = 100000.0;
    scale[1] = 50000.0;
    mean[2] = 1500.0;
    scale[2] = 0.0;

    let mut coefficients = vec![0.0; n];
    coefficients[0] = 300_000.0; // year
    coefficients[1] = -200_000.0; // mileage
    coefficients[3] = 1_000_000.0; // make
    coefficients[8] = 150_000.0; // fuel_Petrol

    serde_json::json!({
        "model": {
            "kind": "linear",
            "coefficients": coefficients,
            "intercept": 3_000_000.0
        },
        "scaler": {
            "kind": "standard",
            "mean": mean,
            "scale": scale
        },
        "freq_maps": {
            "make": {"honda": 0.041, "toyota": 0.25, "suzuki": 0.3},
            "model": {"civic": 0.022, "corolla": 0.09, "mehran": 0.07},
            "registered": {"islamabad": 0.18, "lahore": 0.31, "un-registered": 0.05}
        },
        "model_columns": columns,
        "reference_levels": scenario_reference_levels(),
        "currency": "PKR"
    })
    .to_string()
}

/// Expected price of `scenario_input()` under `scenario_bundle_json()`.
///
/// year: (2022 - 2015) / 5 = 1.4; mileage: (50000 - 100000) / 50000 = -1.0;
/// make: 0.041; fuel_Petrol: 1.0.
pub fn scenario_expected_price() -> f64 {
    3_000_000.0 + 300_000.0 * 1.4 + -200_000.0 * -1.0 + 1_000_000.0 * 0.041 + 150_000.0
}
