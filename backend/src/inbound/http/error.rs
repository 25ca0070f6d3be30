//! HTTP adapter mapping for domain outcomes.
//!
//! Purpose: keep [`Outcome`] HTTP-agnostic while giving every handler the same
//! status table and JSON body shape. Success bodies are `{status, message}`;
//! failure bodies are the serialised [`Error`].

use std::future::Future;
use std::panic::AssertUnwindSafe;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use futures_util::FutureExt;
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::transaction::panic_message;
use crate::domain::{ApiResult, Error, ErrorCode, Outcome, SuccessStatus};

/// Status code for a failure category.
pub fn error_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::CannotProcess => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status code for a success category.
pub fn success_status(status: SuccessStatus) -> StatusCode {
    match status {
        SuccessStatus::Ok => StatusCode::OK,
        SuccessStatus::Created => StatusCode::CREATED,
        SuccessStatus::Processing => StatusCode::ACCEPTED,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        error_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

fn success_response<T: Serialize>(result: &ApiResult<T>) -> HttpResponse {
    HttpResponse::build(success_status(result.status)).json(result)
}

/// Await a driving-port call and render its outcome.
///
/// A panic escaping the port is logged and answered with a `302` redirect to
/// the root resource instead of an error body.
pub async fn respond<T, F>(operation: &'static str, call: F) -> HttpResponse
where
    T: Serialize,
    F: Future<Output = Outcome<T>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(result)) => success_response(&result),
        Ok(Err(err)) => {
            warn!(operation, code = ?err.code(), error = %err, "request failed");
            err.error_response()
        }
        Err(panic) => {
            error!(
                operation,
                panic = panic_message(panic.as_ref()),
                "unexpected fault; redirecting to root"
            );
            HttpResponse::Found()
                .insert_header((header::LOCATION, "/"))
                .finish()
        }
    }
}
