//! Interactive acquisition of car attributes.
//!
//! Fields already supplied as flags are taken as-is; the rest are prompted for
//! in a fixed order. The three numeric fields are validated as integers; a bad
//! value ends the run with a request to re-enter (no re-prompt loop).

use std::io::{self, BufRead, Write};

use crate::cli::InputArgs;
use crate::domain::{RawInput, parse_integer};
use crate::error::{AppError, EXIT_INPUT};

const INVALID_NUMBER: &str = "Invalid input for Year, Mileage, or Engine. Please enter integers.";

/// Prompt on stdin/stdout for every field missing from `given`.
pub fn acquire_input(given: &InputArgs) -> Result<RawInput, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    acquire_with(given, &mut stdin.lock(), &mut stdout.lock())
}

pub fn acquire_with<R: BufRead, W: Write>(
    given: &InputArgs,
    reader: &mut R,
    out: &mut W,
) -> Result<RawInput, AppError> {
    let needs_prompt = [
        &given.year,
        &given.mileage,
        &given.engine,
        &given.make,
        &given.model,
        &given.registered,
        &given.fuel,
        &given.transmission,
        &given.assembly,
        &given.body,
        &given.color,
    ]
    .iter()
    .any(|v| v.is_none());

    if needs_prompt {
        writeln!(out, "\n--- Enter Car Specifications for Prediction ---")
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))?;
    }

    let mut field = |value: &Option<String>, label: &str| -> Result<String, AppError> {
        match value {
            Some(v) => Ok(v.clone()),
            None => prompt_line(reader, out, label),
        }
    };

    let year = integer(field(&given.year, "1. Manufacturing Year (e.g., 2022): ")?)?;
    let mileage = integer(field(&given.mileage, "2. Mileage (km, e.g., 50000): ")?)?;
    let engine = integer(field(&given.engine, "3. Engine Capacity (cc, e.g., 1800): ")?)?;

    Ok(RawInput {
        year,
        mileage,
        engine,
        make: field(&given.make, "4. Make (e.g., Honda): ")?,
        model: field(&given.model, "5. Model (e.g., Civic): ")?,
        registered: field(
            &given.registered,
            "6. Registration City/Status (e.g., Islamabad/unregistered): ",
        )?,
        fuel: field(&given.fuel, "7. Fuel Type (e.g., Petrol/Diesel/Electric): ")?,
        transmission: field(&given.transmission, "8. Transmission (Automatic/Manual): ")?,
        assembly: field(&given.assembly, "9. Assembly (Local/Imported): ")?,
        body: field(&given.body, "10. Body Type (e.g., Sedan/Hatchback): ")?,
        color: field(&given.color, "11. Color (e.g., White/Black): ")?,
    })
}

fn integer(text: String) -> Result<i64, AppError> {
    parse_integer(&text).ok_or_else(|| AppError::new(EXIT_INPUT, INVALID_NUMBER))
}

fn prompt_line<R: BufRead, W: Write>(reader: &mut R, out: &mut W, label: &str) -> Result<String, AppError> {
    write!(out, "{label}").map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = reader
        .read_line(&mut input)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Err(AppError::new(EXIT_INPUT, "No input received. Canceled."));
    }

    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}
