//! Reporting utilities: formatted terminal output.
//!
//! Formatting lives in one place so the encoding and inference code never
//! touches stdout.

pub mod format;

pub use format::*;
