//! # Fieldlens - Field Summaries for Semantic Data Models
//!
//! Fieldlens computes lightweight, display-ready summary statistics for a
//! single field of an analytics explore: top-value frequency tables for
//! dimensions, and min/max/average distributions with histograms for numeric
//! dimensions. It builds the aggregate queries, hands them to an external
//! query executor, and normalizes the heterogeneous result rows into one
//! uniform tabular shape a visualization surface can render directly.
//!
//! ## Overview
//!
//! A host surface (a visualization panel, a data dictionary, a field
//! inspector) lets the user click a field; fieldlens answers "what does this
//! field look like" fast enough for interactive use. Query execution,
//! metadata retrieval, rendering, and authentication all stay with the host
//! and its SDK; this crate owns only the pipeline between them: capability
//! classification, query construction, histogram bin derivation, result
//! formatting, and per-request memoization.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fieldlens::prelude::*;
//!
//! # async fn example(executor: Arc<dyn QueryExecutor>) -> Result<()> {
//! // Metadata comes from the host's semantic-model service.
//! let explore = Explore::new("orders", "ecommerce")
//!     .with_dimension(Field::dimension("orders.status").with_view_label("Orders"))
//!     .with_measure(
//!         Field::measure("orders.count")
//!             .with_label_short("Count")
//!             .with_view_label("Orders"),
//!     );
//! let status = explore.dimensions[0].clone();
//!
//! let summarizer = FieldSummarizer::new(executor);
//! if can_compute_top_values(&explore, &status) {
//!     let result = summarizer.top_values(&explore, &status).await?;
//!     for row in &result.data {
//!         println!("{:<20} {:>8}", row[0].display, row[1].display);
//!     }
//!     if let Some(caption) = &result.caption {
//!         println!("{caption}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Pieces
//!
//! - **Capability classification** ([`capability`]): which summary kinds a
//!   field supports, and which count measure accompanies it. A count measure
//!   pairs with a dimension only when both share a view label.
//! - **Top values** ([`summary::TopValuesSummarizer`]): one grouped query,
//!   sorted descending by count with a grand total; the top row's count
//!   doubles as the bar-scaling maximum.
//! - **Distributions** ([`summary::DistributionSummarizer`]): a stats query
//!   for min/max/average, then a histogram query grouped by a derived bin
//!   dimension built from an expression tree ([`query::expr`]).
//! - **Memoization** ([`cache::ResultCache`]): identical requests share one
//!   query round trip, even when issued concurrently; failures are never
//!   cached.
//!
//! ## Architecture
//!
//! - **`model`**: read-only explore/field descriptors supplied by the host
//! - **`capability`**: summary-kind predicates and companion-measure lookup
//! - **`query`**: aggregate-query boundary types, the executor trait, and
//!   the derived-dimension expression tree
//! - **`formatters`**: raw-cell narrowing and numeric display helpers
//! - **`summary`**: the summarizers, uniform result types, and the
//!   memoizing [`FieldSummarizer`](summary::FieldSummarizer) service
//! - **`cache`**: per-key memoization with in-flight deduplication
//! - **`logging`**: `tracing` subscriber setup for binaries and tests

pub mod cache;
pub mod capability;
pub mod config;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod model;
pub mod prelude;
pub mod query;
pub mod summary;

pub use error::{Result, SummaryError};
pub use summary::FieldSummarizer;
