//! Configuration for summary computation.

/// Tuning knobs for the summarizers.
///
/// The defaults match what interactive hosts expect: ten top values and a
/// twenty-bin histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Maximum number of groups returned by a top-values summary.
    pub top_value_limit: u32,
    /// Number of histogram bins in a distribution summary.
    pub histogram_bins: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            top_value_limit: 10,
            histogram_bins: 20,
        }
    }
}

impl SummarizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compact configuration for constrained display surfaces.
    pub fn compact() -> Self {
        Self {
            top_value_limit: 5,
            histogram_bins: 10,
        }
    }

    /// Sets the top-values row limit.
    pub fn with_top_value_limit(mut self, limit: u32) -> Self {
        self.top_value_limit = limit;
        self
    }

    /// Sets the histogram bin count (clamped between 1 and 1000).
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins.clamp(1, 1000);
        self
    }
}
