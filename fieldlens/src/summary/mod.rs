//! Summary requests, dispatch, and the memoizing service.
//!
//! [`FieldSummarizer`] is the crate's entry point: it owns the executor
//! handle, the configuration, and the per-request memoization cache, and
//! dispatches each request to the matching summarizer.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cache::ResultCache;
use crate::config::SummarizerConfig;
use crate::error::Result;
use crate::model::{Explore, Field};
use crate::query::QueryExecutor;

pub mod distribution;
pub mod types;
pub mod values;

pub use distribution::DistributionSummarizer;
pub use types::{ColumnAlign, Histogram, HistogramBin, SimpleDatum, SimpleResult};
pub use values::TopValuesSummarizer;

/// The class of summary to compute.
///
/// A closed set: dispatch is by exhaustive match, so adding a kind is a
/// compile-checked change everywhere it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// Top-value frequency table.
    Values,
    /// Min/max/average with histogram.
    Distribution,
}

impl SummaryKind {
    /// Stable lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Distribution => "distribution",
        }
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of summary work, also the memoization key.
///
/// Serialization is canonical: fields serialize in declaration order, so
/// equal requests always produce identical keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Target model name.
    pub model: String,
    /// Target explore name.
    pub explore: String,
    /// Fully scoped field name.
    pub field: String,
    /// The summary kind to compute.
    pub kind: SummaryKind,
}

impl SummaryRequest {
    /// Builds the request identifying `kind` for `field` within `explore`.
    pub fn new(explore: &Explore, field: &Field, kind: SummaryKind) -> Self {
        Self {
            model: explore.model_name.clone(),
            explore: explore.name.clone(),
            field: field.name.clone(),
            kind,
        }
    }

    /// Canonical cache key for this request.
    pub fn cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{}::{}::{}::{}",
                self.model,
                self.explore,
                self.field,
                self.kind.as_str()
            )
        })
    }
}

/// Computes memoized field summaries through an external query executor.
///
/// One service instance carries one cache; construct it with the lifetime
/// the host wants for deduplication (per UI session, typically). Identical
/// requests share a single query round trip, including concurrent ones.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use fieldlens::prelude::*;
///
/// let summarizer = FieldSummarizer::new(Arc::new(executor));
/// let result = summarizer.top_values(&explore, &field).await?;
/// for row in &result.data {
///     println!("{:<20} {:>8}", row[0].display, row[1].display);
/// }
/// ```
pub struct FieldSummarizer {
    executor: Arc<dyn QueryExecutor>,
    config: SummarizerConfig,
    cache: ResultCache<SimpleResult>,
}

impl FieldSummarizer {
    /// Creates a service with the default configuration.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::with_config(executor, SummarizerConfig::default())
    }

    /// Creates a service with a custom configuration.
    pub fn with_config(executor: Arc<dyn QueryExecutor>, config: SummarizerConfig) -> Self {
        Self {
            executor,
            config,
            cache: ResultCache::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Computes (or returns the memoized) summary of `kind` for `field`.
    ///
    /// Concurrent calls for the same request await one underlying
    /// computation. Failures propagate to every waiter and are not cached,
    /// so a later identical request retries.
    #[instrument(
        skip(self, explore, field),
        fields(
            model = %explore.model_name,
            explore = %explore.name,
            field = %field.name,
            kind = %kind,
        )
    )]
    pub async fn summarize(
        &self,
        explore: &Explore,
        field: &Field,
        kind: SummaryKind,
    ) -> Result<SimpleResult> {
        let request = SummaryRequest::new(explore, field, kind);
        self.cache
            .get_or_compute(&request.cache_key(), || async {
                match kind {
                    SummaryKind::Values => {
                        TopValuesSummarizer::new(&self.config)
                            .summarize(self.executor.as_ref(), explore, field)
                            .await
                    }
                    SummaryKind::Distribution => {
                        DistributionSummarizer::new(&self.config)
                            .summarize(self.executor.as_ref(), explore, field)
                            .await
                    }
                }
            })
            .await
    }

    /// Computes (or returns the memoized) top-values summary.
    pub async fn top_values(&self, explore: &Explore, field: &Field) -> Result<SimpleResult> {
        self.summarize(explore, field, SummaryKind::Values).await
    }

    /// Computes (or returns the memoized) distribution summary.
    pub async fn distribution(&self, explore: &Explore, field: &Field) -> Result<SimpleResult> {
        self.summarize(explore, field, SummaryKind::Distribution)
            .await
    }

    /// Returns the stored result for a request without computing anything.
    pub async fn cached(&self, request: &SummaryRequest) -> Option<SimpleResult> {
        self.cache.peek(&request.cache_key()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SummaryRequest {
        SummaryRequest {
            model: "ecommerce".to_string(),
            explore: "orders".to_string(),
            field: "orders.status".to_string(),
            kind: SummaryKind::Values,
        }
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        assert_eq!(request().cache_key(), request().cache_key());
    }

    #[test]
    fn test_cache_key_distinguishes_kinds() {
        let values = request();
        let mut distribution = request();
        distribution.kind = SummaryKind::Distribution;
        assert_ne!(values.cache_key(), distribution.cache_key());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SummaryKind::Values.to_string(), "values");
        assert_eq!(SummaryKind::Distribution.to_string(), "distribution");
    }
}
