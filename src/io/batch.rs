//! Batch CSV ingest and prediction export.
//!
//! Input: one car per row, with the eleven `RawInput` fields as headers
//! (any order, case-insensitive). Rows with non-integer `year`, `mileage` or
//! `engine` are skipped and reported; they never abort the batch.
//!
//! Output: `line,price,error`, one row per input row in file order.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;

use crate::domain::{RawInput, parse_integer};
use crate::error::{AppError, EXIT_BUNDLE, EXIT_INPUT};

const REQUIRED_COLUMNS: [&str; 11] = [
    "year",
    "mileage",
    "engine",
    "make",
    "model",
    "registered",
    "fuel",
    "transmission",
    "assembly",
    "body",
    "color",
];

/// A parsed row and its 1-based line number in the file.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub line: usize,
    pub input: RawInput,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct BatchInput {
    pub rows: Vec<BatchRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Outcome for one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub line: usize,
    pub outcome: Result<f64, String>,
}

pub fn read_batch_csv(path: &Path) -> Result<BatchInput, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_BUNDLE,
            format!("Failed to open CSV '{}': {e}", path.display()),
        )
    })?;
    parse_batch(file)
}

pub fn parse_batch<R: Read>(reader: R) -> Result<BatchInput, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("CSV is missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(input) => rows.push(BatchRow { line, input }),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(BatchInput {
        rows,
        row_errors,
        rows_read,
    })
}

/// Write results (predictions and row errors merged, sorted by line).
pub fn write_results_csv<W: Write>(writer: W, results: &[BatchResult]) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["line", "price", "error"])
        .map_err(|e| AppError::new(EXIT_BUNDLE, format!("Failed to write results CSV header: {e}")))?;

    let mut sorted: Vec<&BatchResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.line);

    for r in sorted {
        let (price, error) = match &r.outcome {
            Ok(price) => (format!("{price:.2}"), String::new()),
            Err(message) => (String::new(), message.clone()),
        };
        out.write_record([r.line.to_string(), price, error])
            .map_err(|e| AppError::new(EXIT_BUNDLE, format!("Failed to write results CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(EXIT_BUNDLE, format!("Failed to flush results CSV: {e}")))?;
    Ok(())
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<RawInput, String> {
    let text = |name: &str| -> String {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .unwrap_or("")
            .to_string()
    };
    let integer = |name: &str| -> Result<i64, String> {
        let raw = text(name);
        parse_integer(&raw).ok_or_else(|| format!("{name}: '{raw}' is not an integer"))
    };

    Ok(RawInput {
        year: integer("year")?,
        mileage: integer("mileage")?,
        engine: integer("engine")?,
        make: text("make"),
        model: text("model"),
        registered: text("registered"),
        fuel: text("fuel"),
        transmission: text("transmission"),
        assembly: text("assembly"),
        body: text("body"),
        color: text("color"),
    })
}
