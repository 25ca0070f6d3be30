//! Tests for the donation ingestion workflow and donation listing.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use async_trait::async_trait;
use crate::domain::ports::{
    DonationSourceError, MockDonationRepository, MockDonationSource, MockEventRepository,
    MockIssueRepository, MockNewsRepository, RepositoryError,
};
use crate::domain::{DonationRecord, EntityId, ErrorCode, SuccessStatus};

#[fixture]
fn flood_event() -> Event {
    Event {
        id: EntityId::random(),
        issue_id: EntityId::random(),
        name: EventName::new("flood-2024").expect("valid name"),
        created_at: Utc::now(),
    }
}

fn events_with(found: Option<Event>) -> MockEventRepository {
    let mut events = MockEventRepository::new();
    events
        .expect_find_name()
        .times(1)
        .returning(move |_| Ok(found.clone()));
    events
}

fn source_returning(records: Vec<DonationRecord>) -> MockDonationSource {
    let mut source = MockDonationSource::new();
    source
        .expect_fetch()
        .times(1)
        .withf(|keyword| keyword == "flood-2024")
        .returning(move |_| Ok(records.clone()));
    source
}

/// Donation repository that stores writes and fails on the `fail_at`-th call.
fn recording_donations(
    fail_at: Option<usize>,
) -> (MockDonationRepository, Arc<Mutex<Vec<Donation>>>) {
    let stored = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(Mutex::new(0_usize));
    let sink = stored.clone();
    let mut donations = MockDonationRepository::new();
    donations.expect_create().returning(move |event, record| {
        let mut count = calls.lock().expect("call counter");
        *count += 1;
        if Some(*count) == fail_at {
            return Err(RepositoryError::query("disk full"));
        }
        let donation = Donation::from_record(EntityId::random(), event.id, record, Utc::now());
        sink.lock().expect("donation sink").push(donation.clone());
        Ok(donation)
    });
    (donations, stored)
}

fn service(
    events: MockEventRepository,
    donations: MockDonationRepository,
    source: MockDonationSource,
) -> DonationIngestionService {
    DonationIngestionService::new(
        Repositories::new(
            Arc::new(MockIssueRepository::new()),
            Arc::new(events),
            Arc::new(MockNewsRepository::new()),
            Arc::new(donations),
        ),
        Arc::new(source),
    )
}

fn reason(err: &Error) -> Option<&serde_json::Value> {
    err.details().and_then(|details| details.get("reason"))
}

#[rstest]
#[tokio::test]
async fn persists_every_fetched_record_against_the_event(flood_event: Event) {
    let event_id = flood_event.id;
    let (donations, stored) = recording_donations(None);
    let records = vec![
        DonationRecord::new("gg-1", 50.0),
        DonationRecord::new("gg-2", 75.0),
    ];

    let result = service(
        events_with(Some(flood_event)),
        donations,
        source_returning(records),
    )
    .add_donations("flood-2024")
    .await
    .expect("ingestion succeeds");

    assert_eq!(result.status, SuccessStatus::Ok);
    let ids: Vec<_> = result
        .message
        .donations
        .iter()
        .map(|d| d.source_id.as_str())
        .collect();
    assert_eq!(ids, ["gg-1", "gg-2"]);
    let stored = stored.lock().expect("donation sink");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|d| d.event_id == event_id));
}

#[rstest]
#[tokio::test]
async fn empty_source_result_is_a_success(flood_event: Event) {
    let mut donations = MockDonationRepository::new();
    donations.expect_create().never();

    let result = service(
        events_with(Some(flood_event)),
        donations,
        source_returning(Vec::new()),
    )
    .add_donations("flood-2024")
    .await
    .expect("ingestion succeeds");

    assert_eq!(result.status, SuccessStatus::Ok);
    assert!(result.message.donations.is_empty());
}

#[tokio::test]
async fn missing_event_fails_fast_without_fetching_or_writing() {
    let mut source = MockDonationSource::new();
    source.expect_fetch().never();
    let mut donations = MockDonationRepository::new();
    donations.expect_create().never();

    let err = service(events_with(None), donations, source)
        .add_donations("unknown-event")
        .await
        .expect_err("missing event");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), ADD_DONATIONS_FAILURE);
    assert_eq!(reason(&err), Some(&json!("event_not_found")));
}

#[rstest]
#[tokio::test]
async fn source_failure_aborts_with_nothing_stored(flood_event: Event) {
    let mut source = MockDonationSource::new();
    source
        .expect_fetch()
        .times(1)
        .returning(|_| Err(DonationSourceError::transport("connection reset")));
    let mut donations = MockDonationRepository::new();
    donations.expect_create().never();

    let err = service(events_with(Some(flood_event)), donations, source)
        .add_donations("flood-2024")
        .await
        .expect_err("source failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), ADD_DONATIONS_FAILURE);
    assert_eq!(reason(&err), Some(&json!("source_unavailable")));
}

#[rstest]
#[tokio::test]
async fn failed_write_keeps_earlier_writes_and_stops_the_batch(flood_event: Event) {
    let (donations, stored) = recording_donations(Some(2));
    let records = vec![
        DonationRecord::new("gg-1", 50.0),
        DonationRecord::new("gg-2", 75.0),
        DonationRecord::new("gg-3", 20.0),
    ];

    let err = service(
        events_with(Some(flood_event)),
        donations,
        source_returning(records),
    )
    .add_donations("flood-2024")
    .await
    .expect_err("write failure");

    assert_eq!(reason(&err), Some(&json!("persistence_failed")));
    let stored = stored.lock().expect("donation sink");
    let ids: Vec<_> = stored.iter().map(|d| d.source_id.as_str()).collect();
    assert_eq!(ids, ["gg-1"]);
}

#[rstest]
#[tokio::test]
async fn event_lookup_failure_is_a_persistence_failure() {
    let mut events = MockEventRepository::new();
    events
        .expect_find_name()
        .returning(|_| Err(RepositoryError::connection("refused")));
    let mut source = MockDonationSource::new();
    source.expect_fetch().never();

    let err = service(events, MockDonationRepository::new(), source)
        .add_donations("flood-2024")
        .await
        .expect_err("lookup failure");

    assert_eq!(reason(&err), Some(&json!("persistence_failed")));
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_event_name_is_a_bad_request(#[case] raw: &str) {
    let mut events = MockEventRepository::new();
    events.expect_find_name().never();

    let err = service(events, MockDonationRepository::new(), MockDonationSource::new())
        .add_donations(raw)
        .await
        .expect_err("invalid input");

    assert_eq!(err.code(), ErrorCode::BadRequest);
}

struct PanickingSource;

#[async_trait]
impl DonationSource for PanickingSource {
    async fn fetch(&self, _keyword: &str) -> Result<Vec<DonationRecord>, DonationSourceError> {
        panic!("client library bug");
    }
}

#[rstest]
#[tokio::test]
async fn panicking_source_is_contained_as_internal_error(flood_event: Event) {
    let service = DonationIngestionService::new(
        Repositories::new(
            Arc::new(MockIssueRepository::new()),
            Arc::new(events_with(Some(flood_event))),
            Arc::new(MockNewsRepository::new()),
            Arc::new(MockDonationRepository::new()),
        ),
        Arc::new(PanickingSource),
    );

    let err = service
        .add_donations("flood-2024")
        .await
        .expect_err("contained panic");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), ADD_DONATIONS_FAILURE);
}

#[rstest]
#[tokio::test]
async fn listing_unknown_event_is_not_found() {
    let query = DonationQueryService::new(Repositories::new(
        Arc::new(MockIssueRepository::new()),
        Arc::new(events_with(None)),
        Arc::new(MockNewsRepository::new()),
        Arc::new(MockDonationRepository::new()),
    ));

    let err = query
        .list_donations("unknown-event")
        .await
        .expect_err("missing event");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
