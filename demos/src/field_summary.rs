//! Field summary example demonstrating fieldlens's core functionality.
//!
//! This example shows how to:
//! - Describe an explore's fields with the metadata descriptors
//! - Classify which summary kinds a field supports
//! - Compute a top-values table and a numeric distribution
//! - Render the uniform result grid and histogram
//!
//! The query executor here is an in-process stand-in that answers from
//! canned data; production hosts implement [`QueryExecutor`] over their
//! query service SDK.
//!
//! Run with:
//! ```bash
//! cargo run --example field_summary
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use fieldlens::logging::{init_logging, LoggingConfig};
use fieldlens::prelude::*;
use fieldlens::query::DynamicField;

/// Answers aggregate queries from canned order data.
struct CannedExecutor;

#[async_trait]
impl QueryExecutor for CannedExecutor {
    async fn run_aggregate(&self, query: &AggregateQuery) -> Result<QueryResponse> {
        // Derived bin dimension => the histogram bin-count query.
        if query
            .dynamic_fields
            .iter()
            .any(|field| matches!(field, DynamicField::Dimension { .. }))
        {
            let rows = [(0i64, 14.0), (1, 32.0), (2, 51.0), (5, 23.0), (19, 4.0)]
                .into_iter()
                .map(|(bin, count)| {
                    ResultRow::new()
                        .with_cell("bin", RawCell::number(bin as f64))
                        .with_cell("orders.count", RawCell::number(count))
                })
                .collect();
            return Ok(QueryResponse::with_rows(rows));
        }

        // Derived measures => the min/max/average stats query.
        if !query.dynamic_fields.is_empty() {
            let row = ResultRow::new()
                .with_cell("min", RawCell::number(4.5))
                .with_cell("max", RawCell::number(1250.0))
                .with_cell("average", RawCell::number(87.3));
            return Ok(QueryResponse::with_rows(vec![row]));
        }

        // Otherwise: the grouped top-values query.
        let rows = [
            ("Shipped", 1243.0),
            ("Complete", 987.0),
            ("Pending", 312.0),
            ("Cancelled", 77.0),
        ]
        .into_iter()
        .map(|(status, count)| {
            ResultRow::new()
                .with_cell("orders.status", RawCell::string(status))
                .with_cell("orders.count", RawCell::number(count))
        })
        .collect();
        let totals = ResultRow::new().with_cell("orders.count", RawCell::number(2619.0));
        Ok(QueryResponse::with_rows(rows).with_totals(totals))
    }
}

fn print_result(result: &SimpleResult) {
    for row in &result.data {
        println!("  {:<12} {:>12}", row[0].display, row[1].display);
    }
    if let Some(caption) = &result.caption {
        println!("  ({caption})");
    }
    if let Some(histogram) = &result.histogram {
        println!("  histogram:");
        for bin in &histogram.bins {
            println!(
                "    [{:>8.1}, {:>8.1})  {}",
                bin.lower_bound,
                bin.upper_bound,
                "#".repeat(bin.count as usize)
            );
        }
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::development())?;

    let explore = Explore::new("orders", "ecommerce")
        .with_dimension(
            Field::dimension("orders.status")
                .with_label_short("Status")
                .with_view_label("Orders"),
        )
        .with_dimension(
            Field::dimension("orders.price")
                .with_label_short("Price")
                .with_view_label("Orders")
                .with_type("number"),
        )
        .with_measure(
            Field::measure("orders.count")
                .with_label_short("Count")
                .with_view_label("Orders"),
        );

    let status = explore.dimensions[0].clone();
    let price = explore.dimensions[1].clone();

    let summarizer = FieldSummarizer::new(Arc::new(CannedExecutor));

    println!("Top values for {}:", status.name);
    if can_compute_top_values(&explore, &status) {
        let result = summarizer.top_values(&explore, &status).await?;
        print_result(&result);
    }

    println!("\nDistribution for {}:", price.name);
    if can_compute_distribution(&price) {
        let result = summarizer.distribution(&explore, &price).await?;
        print_result(&result);
    }

    // A second identical request is answered from the memo cache.
    let request = SummaryRequest::new(&explore, &status, SummaryKind::Values);
    let cached = summarizer.cached(&request).await;
    println!(
        "\nCached result for {}: {}",
        status.name,
        if cached.is_some() { "present" } else { "absent" }
    );

    Ok(())
}
