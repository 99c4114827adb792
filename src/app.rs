//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the bundle path (flag, `.env`, default)
//! - loads the bundle once
//! - acquires input, predicts, prints, and optionally exports

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::{BatchArgs, BundleArgs, Command, PredictArgs};
use crate::domain::PredictConfig;
use crate::error::{AppError, EXIT_BUNDLE};

pub mod pipeline;

/// Bundle file used when neither `--bundle` nor `CARPRICE_BUNDLE` is set.
pub const DEFAULT_BUNDLE_PATH: &str = "final_car_price_model.json";

/// Environment variable (or `.env` entry) naming the bundle file.
pub const BUNDLE_ENV_VAR: &str = "CARPRICE_BUNDLE";

/// Entry point for the `carprice` binary.
pub fn run() -> Result<(), AppError> {
    // `carprice` alone (or with only flags) means `carprice predict ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Batch(args) => handle_batch(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = predict_config_from_args(&args.bundle, args.export.clone());
    let predictor = pipeline::load(&config)?;

    let input = crate::cli::prompt::acquire_input(&args.input)?;
    let record = pipeline::run_prediction(&predictor, input)?;

    println!();
    println!("{}", crate::report::format_prediction(record.price, &record.currency));

    if let Some(path) = &config.export {
        crate::io::export::write_prediction_json(path, &record)?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = predict_config_from_args(&args.bundle, None);
    let predictor = pipeline::load(&config)?;

    let batch = crate::io::batch::read_batch_csv(&args.input)?;
    let results = pipeline::run_batch(&predictor, &batch)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(
                    EXIT_BUNDLE,
                    format!("Failed to create results CSV '{}': {e}", path.display()),
                )
            })?;
            crate::io::batch::write_results_csv(file, &results)?;
            println!("{}", crate::report::format_batch_summary(&results, batch.rows_read));
        }
        None => {
            crate::io::batch::write_results_csv(io::stdout().lock(), &results)?;
            eprintln!("{}", crate::report::format_batch_summary(&results, batch.rows_read));
        }
    }

    Ok(())
}

fn handle_inspect(args: BundleArgs) -> Result<(), AppError> {
    let config = predict_config_from_args(&args, None);
    let predictor = pipeline::load(&config)?;
    println!(
        "{}",
        crate::report::format_bundle_summary(&config.bundle_path, &predictor)
    );
    Ok(())
}

pub fn predict_config_from_args(args: &BundleArgs, export: Option<PathBuf>) -> PredictConfig {
    dotenvy::dotenv().ok();
    PredictConfig {
        bundle_path: resolve_bundle_path(args.bundle.clone(), std::env::var(BUNDLE_ENV_VAR).ok()),
        unknown_frequency: args.unknown_frequency,
        currency: args.currency.clone(),
        export,
    }
}

/// Flag beats environment beats default. Blank environment values are ignored.
fn resolve_bundle_path(flag: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    flag.or_else(|| {
        env_value
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH))
}

/// Rewrite argv so `carprice` defaults to `carprice predict`.
///
/// Leading global flags (`-v`/`--verbose`) are skipped before deciding.
///
/// Rules:
/// - `carprice`                          -> `carprice predict`
/// - `carprice -v`                       -> `carprice -v predict`
/// - `carprice -b model.json ...`        -> `carprice predict -b model.json ...`
/// - `carprice -v batch ...`             -> unchanged
/// - `carprice --help/--version/-h/-V`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .skip(1)
        .position(|a| !matches!(a.as_str(), "-v" | "--verbose"))
        .map(|i| i + 1);

    let Some(idx) = first else {
        argv.push("predict".to_string());
        return argv;
    };

    let arg = argv[idx].as_str();

    let is_top_level_help_or_version =
        matches!(arg, "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg, "predict" | "batch" | "inspect");
    if is_subcommand {
        return argv;
    }

    // Any other leading flag means "predict flags".
    if arg.starts_with('-') {
        argv.insert(idx, "predict".to_string());
        return argv;
    }

    argv
}
