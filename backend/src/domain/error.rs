//! Domain-level failure payload.
//!
//! These errors are transport agnostic. The HTTP adapter maps the [`ErrorCode`]
//! to a status code; the queue adapter only logs them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Closed set of failure categories a service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input is malformed or fails validation.
    BadRequest,
    /// The caller may not perform this action.
    Forbidden,
    /// A referenced issue or event does not exist.
    NotFound,
    /// The request collides with existing state.
    Conflict,
    /// The input is well formed but cannot be processed.
    CannotProcess,
    /// Anything the service could not complete on its own side.
    InternalError,
}

/// Failure branch of an [`Outcome`](super::Outcome).
///
/// Serialises with the same `{status, message}` shape as a successful
/// [`ApiResult`](super::ApiResult), plus optional correlation and details.
///
/// # Examples
/// ```
/// use floofloo::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("event flood-2024 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[serde(rename = "status")]
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary diagnostic payload.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use floofloo::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::internal("Could not add the donations")
    ///     .with_details(json!({ "reason": "source_unavailable" }));
    /// assert_eq!(err.details(), Some(&json!({ "reason": "source_unavailable" })));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::CannotProcess`].
    pub fn cannot_process(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CannotProcess, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
