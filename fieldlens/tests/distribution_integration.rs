//! End-to-end tests for the distribution summarizer.

mod common;

use std::sync::Arc;

use common::{orders_explore, price_field, row, MockExecutor};
use fieldlens::prelude::*;
use fieldlens::query::DynamicField;

fn stats_response(min: f64, max: f64, average: f64) -> QueryResponse {
    QueryResponse::with_rows(vec![row(vec![
        ("min", RawCell::number(min)),
        ("max", RawCell::number(max)),
        ("average", RawCell::number(average)),
    ])])
}

fn bin_counts_response(counts: Vec<(i64, f64)>) -> QueryResponse {
    QueryResponse::with_rows(
        counts
            .into_iter()
            .map(|(bin, count)| {
                row(vec![
                    ("bin", RawCell::number(bin as f64)),
                    ("orders.count", RawCell::number(count)),
                ])
            })
            .collect(),
    )
}

#[tokio::test]
async fn test_distribution_end_to_end() {
    let executor = Arc::new(
        MockExecutor::new()
            .respond_with(stats_response(10.0, 30.0, 20.0))
            .respond_with(bin_counts_response(vec![(0, 5.0), (3, 2.0), (19, 1.0)])),
    );
    let summarizer = FieldSummarizer::new(executor.clone());

    let result = summarizer
        .distribution(&orders_explore(), &price_field())
        .await
        .unwrap();

    assert_eq!(result.align, vec![ColumnAlign::Left, ColumnAlign::Right]);
    assert!(result.is_rectangular());
    assert_eq!(result.max, vec![None, None]);
    assert!(result.caption.is_none());

    // The stats grid always has exactly the three summary rows.
    assert_eq!(result.data.len(), 3);
    assert_eq!(result.data[0][0].display, "Min");
    assert_eq!(result.data[0][1].display, "10");
    assert_eq!(result.data[1][0].display, "Max");
    assert_eq!(result.data[1][1].display, "30");
    assert_eq!(result.data[2][0].display, "Average");
    assert_eq!(result.data[2][1].display, "20");

    let histogram = result.histogram.expect("histogram should be computed");
    assert_eq!(histogram.bins.len(), 20);
    assert_eq!(histogram.bins[0].lower_bound, 10.0);
    assert_eq!(histogram.bins[19].upper_bound, 30.0);
    for window in histogram.bins.windows(2) {
        assert_eq!(window[0].upper_bound, window[1].lower_bound);
    }

    assert_eq!(histogram.bins[0].count, 5);
    assert_eq!(histogram.bins[3].count, 2);
    assert_eq!(histogram.bins[19].count, 1);
    // Bins missing from the response count zero rather than being omitted.
    assert_eq!(histogram.bins[1].count, 0);
    assert_eq!(histogram.total_count(), 8);
}

#[tokio::test]
async fn test_distribution_query_shapes() {
    let executor = Arc::new(
        MockExecutor::new()
            .respond_with(stats_response(10.0, 30.0, 20.0))
            .respond_with(bin_counts_response(vec![])),
    );
    let summarizer = FieldSummarizer::new(executor.clone());

    summarizer
        .distribution(&orders_explore(), &price_field())
        .await
        .unwrap();

    let queries = executor.queries();
    assert_eq!(queries.len(), 2);

    let stats_query = &queries[0];
    assert_eq!(stats_query.model, "ecommerce");
    assert_eq!(stats_query.view, "orders");
    assert_eq!(stats_query.fields, vec!["min", "max", "average"]);
    assert_eq!(stats_query.dynamic_fields.len(), 3);
    assert!(stats_query.sorts.is_empty());
    assert!(!stats_query.totals);

    let histogram_query = &queries[1];
    assert_eq!(histogram_query.fields, vec!["bin", "orders.count"]);
    assert_eq!(histogram_query.dynamic_fields.len(), 1);
    match &histogram_query.dynamic_fields[0] {
        DynamicField::Dimension { name, expression } => {
            assert_eq!(name, "bin");
            assert!(expression.starts_with("coalesce("));
            // binSize = 1, so the first upper bound is 11 and yields bin 0.
            assert!(expression.contains("if(${orders.price} <= 11, 0, null)"));
            assert!(expression.contains("if(${orders.price} <= 30, 19, null)"));
        }
        other => panic!("expected a derived bin dimension, got {other:?}"),
    }
}

#[tokio::test]
async fn test_distribution_zero_min_skips_histogram() {
    let executor = Arc::new(MockExecutor::new().respond_with(stats_response(0.0, 30.0, 12.0)));
    let summarizer = FieldSummarizer::new(executor.clone());

    let result = summarizer
        .distribution(&orders_explore(), &price_field())
        .await
        .unwrap();

    assert!(result.histogram.is_none());
    // Only the stats query ran.
    assert_eq!(executor.query_count(), 1);

    // The grid is still returned; a zero minimum renders empty.
    assert_eq!(result.data.len(), 3);
    assert_eq!(result.data[0][1].display, "");
    assert_eq!(result.data[1][1].display, "30");
    assert_eq!(result.data[2][1].display, "12");
}

#[tokio::test]
async fn test_distribution_null_min_skips_histogram() {
    let response = QueryResponse::with_rows(vec![row(vec![
        ("min", RawCell::null()),
        ("max", RawCell::null()),
        ("average", RawCell::null()),
    ])]);
    let executor = Arc::new(MockExecutor::new().respond_with(response));
    let summarizer = FieldSummarizer::new(executor.clone());

    let result = summarizer
        .distribution(&orders_explore(), &price_field())
        .await
        .unwrap();

    assert!(result.histogram.is_none());
    assert_eq!(executor.query_count(), 1);
    assert!(result.data.iter().all(|r| r[1].display.is_empty()));
}

#[tokio::test]
async fn test_distribution_without_count_measure_skips_histogram() {
    let explore = Explore::new("orders", "ecommerce").with_dimension(price_field());
    let executor = Arc::new(MockExecutor::new().respond_with(stats_response(10.0, 30.0, 20.0)));
    let summarizer = FieldSummarizer::new(executor.clone());

    let result = summarizer
        .distribution(&explore, &price_field())
        .await
        .unwrap();

    // Degenerate, not an error: stats grid without a histogram.
    assert!(result.histogram.is_none());
    assert_eq!(result.data.len(), 3);
    assert_eq!(executor.query_count(), 1);
}

#[tokio::test]
async fn test_distribution_rejects_non_numeric_field() {
    let executor = Arc::new(MockExecutor::new());
    let summarizer = FieldSummarizer::new(executor.clone());

    let explore = orders_explore();
    let status = explore.dimensions[0].clone();

    let err = summarizer.distribution(&explore, &status).await.unwrap_err();
    assert!(matches!(err, SummaryError::Unsupported { .. }));
    assert_eq!(executor.query_count(), 0);
}

#[tokio::test]
async fn test_distribution_stats_failure_propagates() {
    let executor = Arc::new(MockExecutor::new().fail_with("timeout"));
    let summarizer = FieldSummarizer::new(executor);

    let err = summarizer
        .distribution(&orders_explore(), &price_field())
        .await
        .unwrap_err();
    assert!(matches!(err, SummaryError::QueryExecution(_)));
}

#[tokio::test]
async fn test_distribution_stat_rendering_groups_thousands() {
    let executor = Arc::new(
        MockExecutor::new()
            .respond_with(stats_response(1000.0, 2500000.0, 1250500.5))
            .respond_with(bin_counts_response(vec![])),
    );
    let summarizer = FieldSummarizer::new(executor);

    let result = summarizer
        .distribution(&orders_explore(), &price_field())
        .await
        .unwrap();

    assert_eq!(result.data[0][1].display, "1,000");
    assert_eq!(result.data[1][1].display, "2,500,000");
    assert_eq!(result.data[2][1].display, "1,250,500.5");
}
