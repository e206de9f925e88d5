//! Uniform display-ready result types.

use serde::{Deserialize, Serialize};

/// One display cell.
///
/// Serialized with the host surface's compact field names: `v` for the
/// display string, `l` for the link, `n` for the numeric value. The numeric
/// value is present only when the underlying raw value was numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleDatum {
    /// Display string; always derived, empty only for null values.
    #[serde(rename = "v")]
    pub display: String,
    /// Hyperlink attached to the cell, if any.
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// The raw numeric value, when the cell held one.
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<f64>,
}

impl SimpleDatum {
    /// Creates a text-only datum.
    pub fn text(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            link: None,
            numeric: None,
        }
    }
}

/// Horizontal alignment of one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    /// Text columns.
    Left,
    /// Numeric columns.
    Right,
}

/// One numeric sub-range of a histogram's domain.
///
/// The lower bound is inclusive, the upper bound exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower bound of the bin (inclusive).
    pub lower_bound: f64,
    /// Upper bound of the bin (exclusive).
    pub upper_bound: f64,
    /// Count of rows in this bin.
    pub count: u64,
}

impl HistogramBin {
    /// Creates a new histogram bin.
    pub fn new(lower_bound: f64, upper_bound: f64, count: u64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            count,
        }
    }

    /// Returns the width of the bin.
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// An ordered sequence of contiguous bins in ascending range order.
///
/// Every bin of the configured count is always present; empty bins carry a
/// zero count rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// The bins, ascending and contiguous.
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Total row count across all bins.
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// The uniform output of every summary kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleResult {
    /// Alignment per output column.
    pub align: Vec<ColumnAlign>,
    /// Rectangular grid of display cells, rows by columns.
    pub data: Vec<Vec<SimpleDatum>>,
    /// Per-column maximum used for bar scaling; absent for text columns and
    /// for summaries that do not support scaling.
    pub max: Vec<Option<f64>>,
    /// Auxiliary caption, e.g. a grand-total line.
    #[serde(rename = "aux", default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Histogram, attached only when one was computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
}

impl SimpleResult {
    /// Whether every data row has exactly one cell per column.
    pub fn is_rectangular(&self) -> bool {
        let columns = self.align.len();
        self.max.len() == columns && self.data.iter().all(|row| row.len() == columns)
    }
}
