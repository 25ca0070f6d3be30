//! Root resource announcing the API version and environment.
//!
//! ```text
//! GET /
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::ApiResult;
use crate::inbound::http::error::respond;
use crate::inbound::http::state::HttpState;

/// Greeting reported by the root resource.
pub fn root_message(environment: &str) -> String {
    format!("Floofloo API v1 at /api/v1/ in {environment} mode")
}

/// Answer `ok` with the API banner.
#[get("/")]
pub async fn root(state: web::Data<HttpState>) -> HttpResponse {
    let message = root_message(&state.environment);
    respond("root", async move { Ok(ApiResult::ok(message)) }).await
}
