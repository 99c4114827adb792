//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the raw request record (`RawInput`)
//! - field enums for the three encoding families (`NumericField`,
//!   `FrequencyField`, `IndicatorField`)
//! - run configuration and exported prediction records

pub mod types;

pub use types::*;
