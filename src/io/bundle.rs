//! Load the trained-model bundle (JSON) and turn it into a `PricePredictor`.
//!
//! The bundle carries four required members (`model`, `scaler`, `freq_maps`,
//! `model_columns`) and three optional ones (`reference_levels`,
//! `unknown_frequency`, `currency`). Everything that can be checked without a
//! request is checked here, once.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{DEFAULT_CURRENCY, DEFAULT_UNKNOWN_FREQUENCY, FrequencyField};
use crate::encode::{ColumnSchema, Encoder, FrequencyMap};
use crate::error::BundleError;
use crate::models::{RegressionModel, Scaler};
use crate::predict::{InferenceAdapter, PricePredictor};

/// On-disk bundle layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModelBundle {
    pub model: RegressionModel,
    pub scaler: Scaler,
    pub freq_maps: HashMap<String, HashMap<String, f64>>,
    pub model_columns: Vec<String>,
    #[serde(default)]
    pub reference_levels: HashMap<String, String>,
    #[serde(default)]
    pub unknown_frequency: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Run-time overrides applied on top of the bundle's own settings.
#[derive(Debug, Clone, Default)]
pub struct BundleOverrides {
    pub unknown_frequency: Option<f64>,
    pub currency: Option<String>,
}

/// Read and parse a bundle file.
pub fn read_bundle(path: &Path) -> Result<TrainedModelBundle, BundleError> {
    let file = File::open(path).map_err(|source| BundleError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bundle(BufReader::new(file))
}

pub fn parse_bundle<R: Read>(reader: R) -> Result<TrainedModelBundle, BundleError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read a bundle file and build the predictor from it.
pub fn load_predictor(path: &Path, overrides: &BundleOverrides) -> Result<PricePredictor, BundleError> {
    let bundle = read_bundle(path)?;
    let predictor = bundle.into_predictor(overrides)?;
    info!(
        path = %path.display(),
        columns = predictor.encoder().schema().len(),
        model = predictor.adapter().model().display_name(),
        "loaded model bundle"
    );
    Ok(predictor)
}

impl TrainedModelBundle {
    pub fn into_predictor(self, overrides: &BundleOverrides) -> Result<PricePredictor, BundleError> {
        let schema = ColumnSchema::new(self.model_columns)?;

        let mut freq_maps = BTreeMap::new();
        for (name, scores) in self.freq_maps {
            let field =
                FrequencyField::from_name(&name).ok_or(BundleError::UnknownFrequencyField(name))?;
            freq_maps.insert(field, FrequencyMap::new(field, scores)?);
        }

        let unknown_frequency = overrides
            .unknown_frequency
            .or(self.unknown_frequency)
            .unwrap_or(DEFAULT_UNKNOWN_FREQUENCY);

        let encoder = Encoder::new(schema, freq_maps, &self.reference_levels, unknown_frequency)?;
        let adapter = InferenceAdapter::new(self.scaler, self.model)?;

        let currency = overrides
            .currency
            .clone()
            .or(self.currency)
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let predictor = PricePredictor::new(encoder, adapter, currency);
        if let Err(err) = predictor.shape_check() {
            warn!("bundle is internally inconsistent; every prediction will fail: {err}");
        }
        Ok(predictor)
    }
}
