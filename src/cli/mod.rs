//! Command-line parsing for the car price predictor.
//!
//! Argument parsing and command dispatch stay separate from the encoding and
//! inference code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "carprice", version, about = "Predict a used car's price from a trained model bundle")]
pub struct Cli {
    /// Log bundle loading and encoding details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the price of one car (prompts for any field not given as a flag).
    Predict(PredictArgs),
    /// Predict prices for every row of a CSV file.
    Batch(BatchArgs),
    /// Summarize a model bundle: columns, encodings, model and scaler.
    Inspect(BundleArgs),
}

/// Where the bundle lives and how to override its settings.
#[derive(Debug, Args, Clone)]
pub struct BundleArgs {
    /// Model bundle JSON (default: $CARPRICE_BUNDLE, then final_car_price_model.json).
    #[arg(short, long, value_name = "JSON")]
    pub bundle: Option<PathBuf>,

    /// Frequency score for make/model/registration values never seen in training.
    #[arg(long)]
    pub unknown_frequency: Option<f64>,

    /// Currency label for printed prices.
    #[arg(long)]
    pub currency: Option<String>,
}

/// Car attributes. Numbers are kept as text so they are validated like prompt input.
#[derive(Debug, Args, Clone, Default)]
pub struct InputArgs {
    /// Manufacturing year (e.g. 2022).
    #[arg(long)]
    pub year: Option<String>,
    /// Mileage in km (e.g. 50000).
    #[arg(long)]
    pub mileage: Option<String>,
    /// Engine capacity in cc (e.g. 1800).
    #[arg(long)]
    pub engine: Option<String>,
    /// Make (e.g. Honda).
    #[arg(long)]
    pub make: Option<String>,
    /// Model (e.g. Civic).
    #[arg(long)]
    pub model: Option<String>,
    /// Registration city or status (e.g. Islamabad, unregistered).
    #[arg(long)]
    pub registered: Option<String>,
    /// Fuel type (e.g. Petrol, Diesel, Hybrid).
    #[arg(long)]
    pub fuel: Option<String>,
    /// Transmission (Automatic, Manual).
    #[arg(long)]
    pub transmission: Option<String>,
    /// Assembly (Local, Imported).
    #[arg(long)]
    pub assembly: Option<String>,
    /// Body type (e.g. Sedan, Hatchback).
    #[arg(long)]
    pub body: Option<String>,
    /// Color (e.g. White, Black).
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    #[command(flatten)]
    pub input: InputArgs,

    /// Also write the prediction (input, price, timestamp) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// CSV with year, mileage, engine, make, model, registered, fuel,
    /// transmission, assembly, body, color columns.
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write results here instead of stdout.
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}
