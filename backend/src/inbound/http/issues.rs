//! Issue and event registration handlers.
//!
//! ```text
//! POST /api/v1/issue/{issue}
//! POST /api/v1/issue/{issue}/event/{event}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::inbound::http::error::respond;
use crate::inbound::http::state::HttpState;

/// Register an issue; `201` when new, `200` when already known.
#[post("/issue/{issue}")]
pub async fn add_issue(state: web::Data<HttpState>, path: web::Path<String>) -> HttpResponse {
    let issue = path.into_inner();
    respond("add_issue", state.issues.add_issue(&issue)).await
}

/// Register an event under an issue.
#[post("/issue/{issue}/event/{event}")]
pub async fn add_event(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (issue, event) = path.into_inner();
    respond("add_event", state.issues.add_event(&issue, &event)).await
}
