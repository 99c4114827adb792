//! The prediction context: one encoder plus one inference adapter, loaded once.
//!
//! `PricePredictor` is immutable after construction, so a single instance can
//! serve any number of requests, sequentially or from several threads.

use crate::domain::RawInput;
use crate::encode::{EncodedVector, Encoder};
use crate::error::InferenceError;

pub mod adapter;

pub use adapter::*;

#[derive(Debug, Clone)]
pub struct PricePredictor {
    encoder: Encoder,
    adapter: InferenceAdapter,
    currency: String,
}

impl PricePredictor {
    pub fn new(encoder: Encoder, adapter: InferenceAdapter, currency: impl Into<String>) -> Self {
        Self {
            encoder,
            adapter,
            currency: currency.into(),
        }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn adapter(&self) -> &InferenceAdapter {
        &self.adapter
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Schema width vs scaler/model width.
    pub fn shape_check(&self) -> Result<(), InferenceError> {
        self.adapter.check_width(self.encoder.schema().len())
    }

    pub fn encode(&self, input: &RawInput) -> EncodedVector {
        self.encoder.encode(input)
    }

    pub fn predict(&self, input: &RawInput) -> Result<f64, InferenceError> {
        let encoded = self.encoder.encode(input);
        self.adapter.predict(&encoded)
    }
}
