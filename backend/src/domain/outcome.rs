//! Uniform service return value.
//!
//! Every driving port answers with an [`Outcome`]: `Ok` carries an
//! [`ApiResult`] tagged with a success category, `Err` carries an
//! [`Error`] tagged with a failure category. Inbound adapters only branch on
//! the category; they never inspect the payload.

use serde::{Deserialize, Serialize};

use super::Error;

/// Closed set of success categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessStatus {
    /// The request completed against existing state.
    Ok,
    /// The request created new state.
    Created,
    /// The request was accepted for background processing.
    Processing,
}

/// Successful service payload: a category plus the domain message.
///
/// # Examples
/// ```
/// use floofloo::domain::{ApiResult, SuccessStatus};
///
/// let result = ApiResult::ok(vec![1, 2, 3]);
/// assert_eq!(result.status, SuccessStatus::Ok);
/// assert_eq!(result.map(|items| items.len()).message, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    /// Success category used to pick a transport status.
    pub status: SuccessStatus,
    /// Domain payload.
    pub message: T,
}

impl<T> ApiResult<T> {
    /// Wrap `message` with an explicit category.
    pub fn new(status: SuccessStatus, message: T) -> Self {
        Self { status, message }
    }

    /// Wrap `message` as [`SuccessStatus::Ok`].
    pub fn ok(message: T) -> Self {
        Self::new(SuccessStatus::Ok, message)
    }

    /// Wrap `message` as [`SuccessStatus::Created`].
    pub fn created(message: T) -> Self {
        Self::new(SuccessStatus::Created, message)
    }

    /// Wrap `message` as [`SuccessStatus::Processing`].
    pub fn processing(message: T) -> Self {
        Self::new(SuccessStatus::Processing, message)
    }

    /// Transform the payload while keeping the category.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            status: self.status,
            message: f(self.message),
        }
    }
}

/// Result of one service call: `Ok` is success, `Err` is failure.
pub type Outcome<T> = Result<ApiResult<T>, Error>;
