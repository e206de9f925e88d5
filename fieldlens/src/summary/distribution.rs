//! Numeric distribution summarizer.

use tracing::{debug, instrument};

use crate::capability::{can_compute_distribution, companion_count_field};
use crate::config::SummarizerConfig;
use crate::error::{Result, SummaryError};
use crate::formatters::{format_stat, is_truthy};
use crate::model::{Explore, Field};
use crate::query::{
    bin_assignment_expr, AggregateFn, AggregateQuery, DynamicField, QueryExecutor,
};
use crate::summary::types::{ColumnAlign, Histogram, HistogramBin, SimpleDatum, SimpleResult};
use crate::summary::SummaryKind;

/// Result-row key for the derived minimum measure.
const MIN_FIELD: &str = "min";
/// Result-row key for the derived maximum measure.
const MAX_FIELD: &str = "max";
/// Result-row key for the derived average measure.
const AVERAGE_FIELD: &str = "average";
/// Result-row key for the derived bin dimension.
const BIN_FIELD: &str = "bin";

/// Builds and interprets min/max/average and histogram queries for a
/// numeric dimension.
///
/// The first query computes the three summary statistics with derived
/// measures. When the minimum is usable, a second query groups the explore's
/// count measure by a derived bin dimension and the results are assembled
/// into a fixed-size histogram with zero counts for empty bins.
#[derive(Debug, Clone)]
pub struct DistributionSummarizer {
    /// Number of histogram bins.
    bins: usize,
}

impl DistributionSummarizer {
    /// Creates a summarizer from the given configuration.
    ///
    /// The bin count is clamped between 1 and 1000.
    pub fn new(config: &SummarizerConfig) -> Self {
        Self {
            bins: config.histogram_bins.clamp(1, 1000),
        }
    }

    /// Computes the distribution summary for `field` within `explore`.
    #[instrument(skip(self, executor, explore), fields(explore = %explore.name, field = %field.name))]
    pub async fn summarize(
        &self,
        executor: &dyn QueryExecutor,
        explore: &Explore,
        field: &Field,
    ) -> Result<SimpleResult> {
        if !can_compute_distribution(field) {
            return Err(SummaryError::unsupported(
                &field.name,
                SummaryKind::Distribution,
                "distributions require a numeric dimension",
            ));
        }

        let stats_query = AggregateQuery::new(&explore.model_name, &explore.name)
            .with_fields([MIN_FIELD, MAX_FIELD, AVERAGE_FIELD])
            .with_dynamic_field(DynamicField::measure(MIN_FIELD, &field.name, AggregateFn::Min))
            .with_dynamic_field(DynamicField::measure(MAX_FIELD, &field.name, AggregateFn::Max))
            .with_dynamic_field(DynamicField::measure(
                AVERAGE_FIELD,
                &field.name,
                AggregateFn::Average,
            ));
        let stats = executor.run_aggregate(&stats_query).await?;

        let row = stats.rows.first();
        let min = stat_value(row, MIN_FIELD);
        let max = stat_value(row, MAX_FIELD);
        let average = stat_value(row, AVERAGE_FIELD);
        debug!(?min, ?max, ?average, "summary statistics computed");

        // A zero minimum skips the histogram too, not just an absent one.
        let histogram = if is_truthy(min) {
            self.histogram(
                executor,
                explore,
                field,
                min.unwrap_or_default(),
                max.unwrap_or_default(),
            )
            .await?
        } else {
            debug!("minimum is unusable, skipping histogram");
            None
        };

        let data = vec![
            vec![SimpleDatum::text("Min"), SimpleDatum::text(format_stat(min))],
            vec![SimpleDatum::text("Max"), SimpleDatum::text(format_stat(max))],
            vec![
                SimpleDatum::text("Average"),
                SimpleDatum::text(format_stat(average)),
            ],
        ];

        Ok(SimpleResult {
            align: vec![ColumnAlign::Left, ColumnAlign::Right],
            data,
            max: vec![None, None],
            caption: None,
            histogram,
        })
    }

    /// Runs the bin-count query and assembles the fixed-size histogram.
    async fn histogram(
        &self,
        executor: &dyn QueryExecutor,
        explore: &Explore,
        field: &Field,
        min: f64,
        max: f64,
    ) -> Result<Option<Histogram>> {
        let Some(count_field) = companion_count_field(explore, field) else {
            debug!("no count measure shares the field's view label, skipping histogram");
            return Ok(None);
        };

        let bounds = bin_bounds(min, max, self.bins);
        let upper_bounds: Vec<f64> = bounds.iter().map(|(_, upper)| *upper).collect();
        let expression = bin_assignment_expr(&field.name, &upper_bounds).render();

        let query = AggregateQuery::new(&explore.model_name, &explore.name)
            .with_fields([BIN_FIELD.to_string(), count_field.name.clone()])
            .with_dynamic_field(DynamicField::dimension(BIN_FIELD, expression));
        let response = executor.run_aggregate(&query).await?;

        let bins = bounds
            .into_iter()
            .enumerate()
            .map(|(index, (lower, upper))| {
                let count = response
                    .rows
                    .iter()
                    .find(|row| {
                        row.cell(BIN_FIELD)
                            .and_then(|cell| cell.value.as_f64())
                            .map(|bin| bin == index as f64)
                            .unwrap_or(false)
                    })
                    .and_then(|row| row.cell(&count_field.name))
                    .and_then(|cell| cell.numeric_value())
                    .map(|count| count as u64)
                    .unwrap_or(0);
                HistogramBin::new(lower, upper, count)
            })
            .collect();

        Ok(Some(Histogram { bins }))
    }
}

/// Derives `bins` contiguous [lower, upper) bounds covering [min, max].
///
/// Bin widths are `|max - min| / bins`; the final upper bound is pinned to
/// the overall maximum so the domain is covered exactly.
pub fn bin_bounds(min: f64, max: f64, bins: usize) -> Vec<(f64, f64)> {
    let range = (max - min).abs();
    let size = range / bins as f64;
    let end = if max >= min { max } else { min + range };

    (0..bins)
        .map(|index| {
            let lower = min + size * index as f64;
            let upper = if index + 1 == bins {
                end
            } else {
                min + size * (index + 1) as f64
            };
            (lower, upper)
        })
        .collect()
}

fn stat_value(row: Option<&crate::query::ResultRow>, field: &str) -> Option<f64> {
    row.and_then(|row| row.cell(field))
        .and_then(|cell| cell.numeric_value())
}
