//! Prelude for commonly used types and traits in fieldlens.

pub use crate::cache::ResultCache;
pub use crate::capability::{can_compute_distribution, can_compute_top_values, companion_count_field};
pub use crate::config::SummarizerConfig;
pub use crate::error::{Result, SummaryError};
pub use crate::logging::LoggingConfig;
pub use crate::model::{Explore, Field, FieldCategory};
pub use crate::query::{AggregateQuery, QueryExecutor, QueryResponse, RawCell, ResultRow};
pub use crate::summary::{
    ColumnAlign, FieldSummarizer, Histogram, HistogramBin, SimpleDatum, SimpleResult, SummaryKind,
    SummaryRequest,
};
