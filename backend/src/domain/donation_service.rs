//! Donation ingestion workflow and donation listing.
//!
//! Ingestion runs as a two-step [`Transaction`]: `validate_input` parses the
//! event name, then `ingest_donations` looks the event up, fetches records
//! from the donation source with the event name as keyword, and persists each
//! record through the repository resolver.
//!
//! Failure policy:
//! - a missing event fails before the source is called;
//! - a source failure aborts with nothing stored;
//! - the batch stops at the first failed write and earlier writes stay
//!   stored;
//! - records are never de-duplicated, so ingesting twice stores twice.
//!
//! Every ingestion failure is `internal_error` with
//! [`ADD_DONATIONS_FAILURE`]; `details.reason` names the failing stage.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{DonationSource, DonationsCommand, DonationsQuery};
use crate::domain::service_support::{
    ValidateEventName, map_repository_error, parse_event_name, require_event,
};
use crate::domain::{
    ApiResult, Donation, DonationBatch, Error, Event, EventName, Outcome, Repositories, Step, Then,
    Transaction,
};

/// Failure message reported by every ingestion failure.
pub const ADD_DONATIONS_FAILURE: &str = "Could not add the donations";

/// Stage of the ingestion workflow that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFailure {
    /// The event does not exist.
    EventNotFound,
    /// The donation source call failed.
    SourceUnavailable,
    /// A repository read or write failed.
    PersistenceFailed,
}

impl IngestionFailure {
    /// Stable label carried in `details.reason`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventNotFound => "event_not_found",
            Self::SourceUnavailable => "source_unavailable",
            Self::PersistenceFailed => "persistence_failed",
        }
    }

    fn into_error(self) -> Error {
        Error::internal(ADD_DONATIONS_FAILURE).with_details(json!({ "reason": self.as_str() }))
    }
}

struct IngestDonations {
    repositories: Repositories,
    source: Arc<dyn DonationSource>,
}

impl IngestDonations {
    async fn find_event(&self, name: &EventName) -> Result<Event, Error> {
        let found = self
            .repositories
            .for_kind::<Event>()
            .find_name(name)
            .await
            .map_err(|err| {
                warn!(event = %name, error = %err, "event lookup failed");
                IngestionFailure::PersistenceFailed.into_error()
            })?;
        found.ok_or_else(|| {
            warn!(event = %name, "event does not exist");
            IngestionFailure::EventNotFound.into_error()
        })
    }
}

#[async_trait]
impl Step<EventName> for IngestDonations {
    type Output = ApiResult<DonationBatch>;

    fn name(&self) -> &'static str {
        "ingest_donations"
    }

    async fn run(&self, name: EventName) -> Result<Self::Output, Error> {
        let event = self.find_event(&name).await?;
        let records = self.source.fetch(name.as_str()).await.map_err(|err| {
            warn!(
                event = %name,
                retryable = err.is_retryable(),
                error = %err,
                "donation source failed"
            );
            IngestionFailure::SourceUnavailable.into_error()
        })?;

        let mut donations = Vec::with_capacity(records.len());
        for record in &records {
            let donation = self
                .repositories
                .for_entity(record)
                .create(&event, record)
                .await
                .map_err(|err| {
                    warn!(
                        event = %name,
                        source_id = %record.source_id,
                        stored = donations.len(),
                        remaining = records.len() - donations.len(),
                        error = %err,
                        "donation write failed; earlier writes stay stored"
                    );
                    IngestionFailure::PersistenceFailed.into_error()
                })?;
            donations.push(donation);
        }

        info!(event = %name, count = donations.len(), "donations ingested");
        Ok(ApiResult::ok(DonationBatch { donations }))
    }
}

/// Service implementing [`DonationsCommand`].
pub struct DonationIngestionService {
    transaction: Transaction<Then<ValidateEventName, IngestDonations>>,
}

impl DonationIngestionService {
    /// Create the workflow over the resolver and a donation source.
    pub fn new(repositories: Repositories, source: Arc<dyn DonationSource>) -> Self {
        let transaction =
            Transaction::new("add_donations", ADD_DONATIONS_FAILURE, ValidateEventName).then(
                IngestDonations {
                    repositories,
                    source,
                },
            );
        Self { transaction }
    }
}

#[async_trait]
impl DonationsCommand for DonationIngestionService {
    async fn add_donations(&self, event_name: &str) -> Outcome<DonationBatch> {
        self.transaction.call(event_name.to_owned()).await
    }
}

/// Service implementing [`DonationsQuery`].
#[derive(Clone)]
pub struct DonationQueryService {
    repositories: Repositories,
}

impl DonationQueryService {
    /// Create the query service over the resolver.
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl DonationsQuery for DonationQueryService {
    async fn list_donations(&self, event_name: &str) -> Outcome<Vec<Donation>> {
        let name = parse_event_name(event_name)?;
        let event = require_event(&self.repositories, &name).await?;
        let donations = self
            .repositories
            .for_kind::<Donation>()
            .find_for_event(&event)
            .await
            .map_err(map_repository_error)?;
        Ok(ApiResult::ok(donations))
    }
}

#[cfg(test)]
#[path = "donation_service_tests.rs"]
mod tests;
