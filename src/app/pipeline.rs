//! Shared prediction workflow used by the `predict` and `batch` commands.
//!
//! bundle load -> (per request) encode -> scale -> predict
//!
//! The front-ends only deal with acquiring input and presenting results.

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{PredictConfig, PredictionRecord, RawInput};
use crate::error::AppError;
use crate::io::batch::{BatchInput, BatchResult};
use crate::io::bundle::{BundleOverrides, load_predictor};
use crate::predict::PricePredictor;

pub const TOOL_NAME: &str = "carprice";

/// Load the bundle named by `config` into a ready-to-use predictor.
pub fn load(config: &PredictConfig) -> Result<PricePredictor, AppError> {
    let overrides = BundleOverrides {
        unknown_frequency: config.unknown_frequency,
        currency: config.currency.clone(),
    };
    Ok(load_predictor(&config.bundle_path, &overrides)?)
}

/// Predict one car and wrap the result for display/export.
pub fn run_prediction(predictor: &PricePredictor, input: RawInput) -> Result<PredictionRecord, AppError> {
    let encoded = predictor.encode(&input);
    debug!(features = ?encoded.iter().collect::<Vec<_>>(), "encoded request");

    let price = predictor.adapter().predict(&encoded)?;

    Ok(PredictionRecord {
        tool: TOOL_NAME.to_string(),
        generated_at: Utc::now(),
        input,
        price,
        currency: predictor.currency().to_string(),
    })
}

/// Predict every parsed row in parallel and merge in the ingest row errors.
///
/// A schema/model width mismatch fails the whole batch up front, since every
/// row would hit it. Other per-row inference failures are reported per row.
pub fn run_batch(predictor: &PricePredictor, batch: &BatchInput) -> Result<Vec<BatchResult>, AppError> {
    predictor.shape_check()?;

    let mut results: Vec<BatchResult> = batch
        .rows
        .par_iter()
        .map(|row| BatchResult {
            line: row.line,
            outcome: predictor.predict(&row.input).map_err(|e| e.to_string()),
        })
        .collect();

    results.extend(batch.row_errors.iter().map(|e| BatchResult {
        line: e.line,
        outcome: Err(e.message.clone()),
    }));
    results.sort_by_key(|r| r.line);

    info!(
        rows_read = batch.rows_read,
        predicted = results.iter().filter(|r| r.outcome.is_ok()).count(),
        "batch complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_INFERENCE;
    use crate::io::batch::parse_batch;
    use crate::io::bundle::parse_bundle;
    use crate::test_support::{scenario_bundle_json, scenario_expected_price, scenario_input};

    fn predictor() -> PricePredictor {
        parse_bundle(scenario_bundle_json().as_bytes())
            .unwrap()
            .into_predictor(&BundleOverrides::default())
            .unwrap()
    }

    #[test]
    fn single_prediction_record() {
        let record = run_prediction(&predictor(), scenario_input()).unwrap();
        assert_eq!(record.tool, TOOL_NAME);
        assert_eq!(record.currency, "PKR");
        assert!((record.price - scenario_expected_price()).abs() < 1e-6);
    }

    #[test]
    fn batch_matches_single_predictions() {
        let csv = "year,mileage,engine,make,model,registered,fuel,transmission,assembly,body,color\n\
                   2022,50000,1800,Honda,Civic,Islamabad,Petrol,Automatic,Local,Sedan,White\n\
                   bad,50000,1800,Honda,Civic,Islamabad,Petrol,Automatic,Local,Sedan,White\n\
                   2022,50000,1800,Obscuria,Civic,Islamabad,Diesel,Automatic,Local,Sedan,White\n";
        let batch = parse_batch(csv.as_bytes()).unwrap();
        let predictor = predictor();
        let results = run_batch(&predictor, &batch).unwrap();

        assert_eq!(results.iter().map(|r| r.line).collect::<Vec<_>>(), vec![2, 3, 4]);

        let first = results[0].outcome.clone().unwrap();
        assert!((first - scenario_expected_price()).abs() < 1e-6);
        assert!(results[1].outcome.is_err());

        let obscure = RawInput {
            make: "Obscuria".to_string(),
            fuel: "Diesel".to_string(),
            ..scenario_input()
        };
        let expected = predictor.predict(&obscure).unwrap();
        assert_eq!(results[2].outcome, Ok(expected));
    }

    #[test]
    fn batch_with_stale_bundle_fails_whole_batch() {
        let mut bundle = parse_bundle(scenario_bundle_json().as_bytes()).unwrap();
        bundle.model_columns.pop();
        let predictor = bundle.into_predictor(&BundleOverrides::default()).unwrap();

        let csv = "year,mileage,engine,make,model,registered,fuel,transmission,assembly,body,color\n\
                   2022,50000,1800,Honda,Civic,Islamabad,Petrol,Automatic,Local,Sedan,White\n";
        let batch = parse_batch(csv.as_bytes()).unwrap();
        let err = run_batch(&predictor, &batch).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INFERENCE);
    }
}
