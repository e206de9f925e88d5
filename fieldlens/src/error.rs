//! Error types for summary computation.

use thiserror::Error;

use crate::summary::SummaryKind;

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors that can occur while building or interpreting a field summary.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The caller asked for a summary kind the field cannot support.
    ///
    /// Raised before any query is issued; the request is never silently
    /// downgraded to a different kind.
    #[error("{kind} summary is not supported for field '{field}': {reason}")]
    Unsupported {
        /// The fully scoped field name.
        field: String,
        /// The requested summary kind.
        kind: SummaryKind,
        /// Why the field does not qualify.
        reason: String,
    },

    /// The external query executor failed.
    #[error("query execution failed: {0}")]
    QueryExecution(String),

    /// The executor returned rows missing an expected column or shape.
    #[error("malformed query response: {0}")]
    MalformedResponse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SummaryError {
    /// Creates an unsupported-request error for the given field and kind.
    pub fn unsupported(
        field: impl Into<String>,
        kind: SummaryKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            field: field.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Creates a query execution error with the given message.
    pub fn query_execution(msg: impl Into<String>) -> Self {
        Self::QueryExecution(msg.into())
    }

    /// Creates a malformed-response error with the given message.
    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Converts serde_json errors to SummaryError.
impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
