//! Donation handlers.
//!
//! ```text
//! GET  /api/v1/issue/{issue}/event/{event}/donations
//! POST /api/v1/issue/{issue}/event/{event}/donations
//! POST /api/v1/issue/{issue}/event/{event}/donations/queue
//! ```
//!
//! The plain `POST` runs the ingestion workflow synchronously and answers
//! with its outcome. The `queue` variant hands the same work to the queue
//! worker and answers `202` straight away.

use actix_web::{HttpResponse, get, post, web};
use tracing::{info, warn};

use crate::domain::ports::DonationJob;
use crate::domain::{ApiResult, Error, EventName, Outcome};
use crate::inbound::http::error::respond;
use crate::inbound::http::state::HttpState;

/// Failure message when the job cannot be handed to the queue.
pub const QUEUE_DONATIONS_FAILURE: &str = "Could not queue the donations";

/// List the donations stored for an event.
#[get("/issue/{issue}/event/{event}/donations")]
pub async fn list_donations(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (_, event) = path.into_inner();
    respond("list_donations", state.donations_query.list_donations(&event)).await
}

/// Ingest donations for an event and wait for the outcome.
#[post("/issue/{issue}/event/{event}/donations")]
pub async fn add_donations(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (_, event) = path.into_inner();
    respond("add_donations", state.donations.add_donations(&event)).await
}

/// Queue donation ingestion for an event.
#[post("/issue/{issue}/event/{event}/donations/queue")]
pub async fn queue_donations(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (_, event) = path.into_inner();
    respond("queue_donations", enqueue(&state, &event)).await
}

async fn enqueue(state: &HttpState, raw_event: &str) -> Outcome<DonationJob> {
    let event = EventName::new(raw_event).map_err(|err| Error::bad_request(err.to_string()))?;
    let job = DonationJob::new(event.as_str());
    state.donation_queue.enqueue(&job).await.map_err(|err| {
        warn!(event = %event, error = %err, "donation job dispatch failed");
        Error::internal(QUEUE_DONATIONS_FAILURE)
    })?;
    info!(event = %event, "donation job queued");
    Ok(ApiResult::processing(job))
}
