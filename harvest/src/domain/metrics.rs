use rust_decimal::{Decimal, RoundingStrategy};

use super::Kind;

/// Yield figures derived from one entry's weights and surface.
///
/// A zero surface or raw weight is not guarded against; the result is
/// carried as `Infinity`/`NaN` text into the sheet and the chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedMetrics {
    /// kg per m², three decimals.
    pub raw_ratio: String,
    /// kg per m², three decimals, `"0"` for raw entries.
    pub finished_ratio: String,
    /// Weight lost between raw and finished, e.g. `"25%"`.
    pub loss_percent: String,
}

impl DerivedMetrics {
    pub fn compute(kind: Kind, raw_weight: f64, finished_weight: f64, surface_area: f64) -> Self {
        let raw_ratio = to_fixed(raw_weight / surface_area, 3);

        if kind.is_raw() {
            return Self {
                raw_ratio,
                finished_ratio: "0".to_string(),
                loss_percent: "0%".to_string(),
            };
        }

        let loss = round_half_up((1.0 - finished_weight / raw_weight) * 100.0);
        Self {
            raw_ratio,
            finished_ratio: to_fixed(finished_weight / surface_area, 3),
            loss_percent: format!("{}%", to_fixed(loss, 0)),
        }
    }
}

/// Fixed-point text with the non-finite spellings used by the sheet
/// (`Infinity`, `-Infinity`, `NaN`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Negative zero prints without its sign.
    let value = if value == 0.0 { 0.0 } else { value };
    // Ties are decided on the exact binary value and go away from zero.
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(
                digits as u32,
                RoundingStrategy::MidpointAwayFromZero,
            );
            format!("{rounded:.digits$}")
        }
        None => format!("{value:.digits$}"),
    }
}

/// Nearest integer, halves rounded towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Shortest text for a measurement: `100`, `12.5`, `0.25`.
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Reads the leading decimal number of `text`, ignoring leading whitespace
/// and any trailing garbage (`"12kg"` reads as 12). Returns `None` when no
/// digits are found.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when it carries digits.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}
