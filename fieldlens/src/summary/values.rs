//! Top-values frequency summarizer.

use tracing::{debug, instrument};

use crate::capability::companion_count_field;
use crate::config::SummarizerConfig;
use crate::error::{Result, SummaryError};
use crate::formatters::{format_cell, group_thousands};
use crate::model::{Explore, Field, FieldCategory};
use crate::query::{AggregateQuery, QueryExecutor, RawCell, ResultRow, Sort};
use crate::summary::types::{ColumnAlign, SimpleResult};
use crate::summary::SummaryKind;

/// Builds and interprets a grouped top-N frequency query for a dimension.
///
/// The query requests the dimension and its companion count measure, sorted
/// descending by count with a grand total, limited to the configured number
/// of groups. Because rows arrive sorted, the top row's count doubles as the
/// count column's maximum for bar scaling.
#[derive(Debug, Clone)]
pub struct TopValuesSummarizer {
    /// Maximum number of groups to request.
    limit: u32,
}

impl TopValuesSummarizer {
    /// Creates a summarizer from the given configuration.
    pub fn new(config: &SummarizerConfig) -> Self {
        Self {
            limit: config.top_value_limit,
        }
    }

    /// Computes the top-values summary for `field` within `explore`.
    #[instrument(skip(self, executor, explore), fields(explore = %explore.name, field = %field.name))]
    pub async fn summarize(
        &self,
        executor: &dyn QueryExecutor,
        explore: &Explore,
        field: &Field,
    ) -> Result<SimpleResult> {
        if field.category != FieldCategory::Dimension {
            return Err(SummaryError::unsupported(
                &field.name,
                SummaryKind::Values,
                "only dimensions have top values",
            ));
        }
        let count_field = companion_count_field(explore, field).ok_or_else(|| {
            SummaryError::unsupported(
                &field.name,
                SummaryKind::Values,
                "no count measure shares the field's view label",
            )
        })?;

        let query = AggregateQuery::new(&explore.model_name, &explore.name)
            .with_fields([field.name.clone(), count_field.name.clone()])
            .with_sort(Sort::descending(&count_field.name))
            .with_limit(self.limit)
            .with_totals();
        let response = executor.run_aggregate(&query).await?;
        debug!(rows = response.rows.len(), "top values query returned");

        let mut data = Vec::with_capacity(response.rows.len());
        for row in &response.rows {
            let value_cell = required_cell(row, &field.name)?;
            let count_cell = required_cell(row, &count_field.name)?;
            data.push(vec![format_cell(value_cell), format_cell(count_cell)]);
        }

        // Rows are sorted descending by count, so the first row holds the max.
        let top_count = data
            .first()
            .and_then(|row| row.get(1))
            .and_then(|datum| datum.numeric);

        let caption = response
            .totals
            .as_ref()
            .and_then(|totals| totals.cell(&count_field.name))
            .and_then(|cell| cell.numeric_value())
            .map(|total| format!("{} rows", group_thousands(total)));

        Ok(SimpleResult {
            align: vec![ColumnAlign::Left, ColumnAlign::Right],
            data,
            max: vec![None, top_count],
            caption,
            histogram: None,
        })
    }
}

fn required_cell<'a>(row: &'a ResultRow, field: &str) -> Result<&'a RawCell> {
    row.cell(field)
        .ok_or_else(|| SummaryError::malformed_response(format!("row is missing column '{field}'")))
}
