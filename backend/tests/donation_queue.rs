//! Behaviour of the asynchronous donation entry point.
//!
//! Jobs are published through the HTTP queue route or straight onto the
//! in-process queue, then drained by the consumer running the same
//! ingestion workflow as the synchronous route.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use floofloo::domain::ports::{DonationsQuery, FixtureDonationSource};
use floofloo::inbound::queue::ConsumerReport;
use rstest::{fixture, rstest};
use serde_json::Value;

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use support::{Harness, UnreachableSource, flood_records};

const DONATIONS_URI: &str = "/api/v1/issue/climate/event/flood-2024/donations";

#[fixture]
fn flood_harness() -> Harness {
    Harness::new(Arc::new(FixtureDonationSource::new(flood_records())))
}

async fn drain(harness: &Harness, concurrency: usize) -> ConsumerReport {
    harness.queue.close().await;
    harness.consumer(concurrency).run().await
}

#[rstest]
#[actix_rt::test]
async fn queue_route_accepts_the_job_for_background_processing(flood_harness: Harness) {
    flood_harness.seed_event("climate", "flood-2024").await;
    let app = test::init_service(flood_harness.app()).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/issue/climate/event/flood-2024/donations/queue")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "processing");
    assert_eq!(body["message"]["event_name"], "flood-2024");
    assert_eq!(flood_harness.store.donation_count().await, 0);

    let report = drain(&flood_harness, 1).await;
    assert_eq!(report.processed, 1);
    assert_eq!(flood_harness.store.donation_count().await, 2);
}

#[rstest]
#[actix_rt::test]
async fn unknown_event_is_acknowledged_without_storing(flood_harness: Harness) {
    flood_harness
        .queue
        .publish(r#"{"event_name":"unknown-event"}"#)
        .await
        .expect("publish");

    let report = drain(&flood_harness, 2).await;

    assert_eq!(report.failed, 1);
    assert!(flood_harness.queue.in_flight().await.is_empty());
    assert_eq!(flood_harness.store.donation_count().await, 0);
}

#[rstest]
#[actix_rt::test]
async fn mixed_messages_are_all_acknowledged(flood_harness: Harness) {
    flood_harness.seed_event("climate", "flood-2024").await;
    for body in [
        r#"{"event_name":"flood-2024","priority":"high"}"#,
        r#"{"event_name":"flood-2024"}"#,
        "not json",
        r#"{"event_name":"unknown-event"}"#,
    ] {
        flood_harness.queue.publish(body).await.expect("publish");
    }

    let report = drain(&flood_harness, 2).await;

    assert_eq!(
        report,
        ConsumerReport {
            processed: 2,
            failed: 1,
            malformed: 1,
            aborted: 0,
        }
    );
    assert!(flood_harness.queue.in_flight().await.is_empty());
    assert_eq!(flood_harness.store.donation_count().await, 4);
}

#[rstest]
#[actix_rt::test]
async fn source_failure_is_reported_not_raised() {
    let harness = Harness::new(Arc::new(UnreachableSource));
    harness.seed_event("climate", "flood-2024").await;
    harness
        .queue
        .publish(r#"{"event_name":"flood-2024"}"#)
        .await
        .expect("publish");

    let report = drain(&harness, 1).await;

    assert_eq!(report.failed, 1);
    assert_eq!(harness.store.donation_count().await, 0);
}

#[rstest]
#[actix_rt::test]
async fn concurrent_route_and_queue_ingestion_store_both_batches(flood_harness: Harness) {
    flood_harness.seed_event("climate", "flood-2024").await;
    flood_harness
        .queue
        .publish(r#"{"event_name":"flood-2024"}"#)
        .await
        .expect("publish");
    flood_harness.queue.close().await;
    let consumer = flood_harness.consumer(1);
    let app = test::init_service(flood_harness.app()).await;
    let request = test::TestRequest::post().uri(DONATIONS_URI).to_request();

    let (report, response) = tokio::join!(consumer.run(), test::call_service(&app, request));

    assert_eq!(report.processed, 1);
    assert_eq!(response.status(), StatusCode::OK);
    let stored = flood_harness
        .state
        .donations_query
        .list_donations("flood-2024")
        .await
        .expect("listing")
        .message;
    assert_eq!(stored.len(), 2 * flood_records().len());
    for record in flood_records() {
        let copies = stored
            .iter()
            .filter(|donation| donation.source_id == record.source_id)
            .count();
        assert_eq!(copies, 2, "{} should be stored once per entry point", record.source_id);
    }
}
