//! `car-price` library crate.
//!
//! The binary (`carprice`) is a thin wrapper around this library so that:
//!
//! - the encoding and inference core is testable without spawning processes
//! - a loaded `PricePredictor` can be reused by other front-ends (services,
//!   batch jobs)

pub mod app;
pub mod cli;
pub mod domain;
pub mod encode;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod predict;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;
