//! The external query-execution seam.

use async_trait::async_trait;

use crate::error::Result;
use crate::query::{AggregateQuery, QueryResponse};

/// Executes aggregate queries against the semantic data model.
///
/// This is the library's only suspending collaborator (a network round trip
/// in production hosts). Implementations map their transport or query-service
/// failures into [`SummaryError::QueryExecution`]; the summarizers never
/// retry, so a failed query fails the whole request.
///
/// # Example
///
/// ```rust,ignore
/// use fieldlens::query::{AggregateQuery, QueryExecutor, QueryResponse};
///
/// struct SdkExecutor {
///     client: SdkClient,
/// }
///
/// #[async_trait::async_trait]
/// impl QueryExecutor for SdkExecutor {
///     async fn run_aggregate(&self, query: &AggregateQuery) -> fieldlens::Result<QueryResponse> {
///         self.client
///             .run_inline_query(query)
///             .await
///             .map_err(|e| fieldlens::SummaryError::query_execution(e.to_string()))
///     }
/// }
/// ```
///
/// [`SummaryError::QueryExecution`]: crate::error::SummaryError::QueryExecution
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs one aggregate query and returns its rows (and totals row, when
    /// the query requested one).
    async fn run_aggregate(&self, query: &AggregateQuery) -> Result<QueryResponse>;
}
