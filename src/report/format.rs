//! Terminal formatting for predictions, batches, and bundle summaries.

use std::path::Path;

use crate::io::batch::BatchResult;
use crate::predict::PricePredictor;

const RULE: &str = "=======================================================";

/// Round to whole currency units and group thousands: `4250000.4` -> `4,250,000`.
pub fn format_price(price: f64) -> String {
    let rounded = price.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// The framed block printed after an interactive prediction.
pub fn format_prediction(price: f64, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Your Predicted Car Price:\n");
    out.push_str(&format!("   {} {}\n", format_price(price), currency));
    out.push_str(RULE);
    out
}

pub fn format_batch_summary(results: &[BatchResult], rows_read: usize) -> String {
    let ok = results.iter().filter(|r| r.outcome.is_ok()).count();
    let failed = results.len() - ok;
    let mut out = format!("Rows: read={rows_read} | predicted={ok} | failed={failed}");
    for r in results.iter().filter(|r| r.outcome.is_err()).take(10) {
        if let Err(message) = &r.outcome {
            out.push_str(&format!("\n  line {}: {}", r.line, message));
        }
    }
    if failed > 10 {
        out.push_str(&format!("\n  ... and {} more", failed - 10));
    }
    out
}

/// Describe what a loaded bundle will do with each input field.
pub fn format_bundle_summary(path: &Path, predictor: &PricePredictor) -> String {
    let encoder = predictor.encoder();
    let schema = encoder.schema();
    let plan = encoder.plan();
    let adapter = predictor.adapter();

    let mut out = String::new();
    out.push_str("=== carprice - model bundle ===\n");
    out.push_str(&format!("Bundle: {}\n", path.display()));
    out.push_str(&format!(
        "Model: {} ({} features) | Scaler: {} ({} features)\n",
        adapter.model().display_name(),
        adapter.model().n_features(),
        adapter.scaler().display_name(),
        adapter.scaler().n_features(),
    ));
    out.push_str(&format!("Columns: {}\n", schema.len()));
    out.push_str(&format!("Currency: {}\n", predictor.currency()));

    let numeric: Vec<&str> = plan.numeric().iter().map(|(f, _)| f.column_name()).collect();
    out.push_str(&format!("\nPass-through: {}\n", join_or_dash(&numeric)));

    out.push_str(&format!(
        "\nFrequency-encoded (unseen -> {}):\n",
        encoder.unknown_frequency()
    ));
    for &(field, _) in plan.frequency() {
        let size = encoder.freq_map(field).map(|m| m.len()).unwrap_or(0);
        out.push_str(&format!("  {:<12} {} categories\n", field.column_name(), size));
    }

    out.push_str("\nIndicator-encoded (drop-first):\n");
    for (field, slots) in plan.indicators() {
        let categories: Vec<&str> = slots.categories().collect();
        out.push_str(&format!(
            "  {:<12} reference={} | {}\n",
            field.prefix(),
            slots.reference().unwrap_or("?"),
            join_or_dash(&categories)
        ));
    }

    if !plan.unmapped().is_empty() {
        let names: Vec<&str> = plan
            .unmapped()
            .iter()
            .map(|&idx| schema.columns()[idx].as_str())
            .collect();
        out.push_str(&format!("\nAlways zero: {}\n", names.join(", ")));
    }

    if let Err(err) = predictor.shape_check() {
        out.push_str(&format!("\nWARNING: {err}\n"));
    }

    out
}

fn join_or_dash(items: &[&str]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
