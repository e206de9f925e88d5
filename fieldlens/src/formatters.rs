//! Raw-cell formatting and numeric display helpers.
//!
//! The executor returns loosely typed cells; this module narrows each one
//! into a [`SimpleDatum`] exactly once, so the rest of the crate only works
//! with checked shapes. Grid cells use plain textual coercion; captions and
//! stat rows use thousands-grouped rendering.

use serde_json::Value;

use crate::query::RawCell;
use crate::summary::types::SimpleDatum;

/// Normalizes one raw result cell into a display datum.
///
/// The link comes from the cell's first drill link, the display string from
/// the pre-rendered form when present (plain coercion of the value
/// otherwise), and the numeric value is set only when the raw value's
/// runtime type is numeric. Null and missing parts propagate as absence;
/// nothing here fails.
pub fn format_cell(cell: &RawCell) -> SimpleDatum {
    SimpleDatum {
        display: cell
            .rendered
            .clone()
            .unwrap_or_else(|| display_value(&cell.value)),
        link: cell.links.first().map(|link| link.url.clone()),
        numeric: cell.value.as_f64(),
    }
}

/// Plain textual coercion of a raw value.
///
/// Whole numbers render without a decimal point regardless of how the
/// executor encoded them.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(v) if v.fract() == 0.0 && v.is_finite() => format!("{v:.0}"),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// Renders a number with thousands separators, e.g. `1234567.5` as
/// `1,234,567.5`.
pub fn group_thousands(value: f64) -> String {
    let text = if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    };

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    // Non-digit forms (NaN, inf) pass through ungrouped.
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return text;
    }

    let mut chunks: Vec<&str> = int_part
        .as_bytes()
        .rchunks(3)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();
    chunks.reverse();
    let grouped = chunks.join(",");

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Whether a computed statistic carries a usable nonzero value.
///
/// Zero, NaN, and absent values all count as unusable, matching the host
/// surface's display rules.
pub fn is_truthy(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0 && !v.is_nan())
}

/// Thousands-grouped rendering of a statistic, empty when unusable.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if is_truthy(Some(v)) => group_thousands(v),
        _ => String::new(),
    }
}
