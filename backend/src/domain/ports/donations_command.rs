//! Driving port for donation ingestion.
//!
//! Both the HTTP handler and the queue worker call this port, so they reach
//! the same outcome through the same workflow.

use async_trait::async_trait;

use crate::domain::{DonationBatch, Outcome};

/// Use-case port running the donation ingestion workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationsCommand: Send + Sync {
    /// Fetch donations for `event_name` from the external source and persist
    /// them against the event.
    ///
    /// Every failure is reported as `internal_error` with the message
    /// "Could not add the donations". Donations created before a persistence
    /// failure stay stored.
    async fn add_donations(&self, event_name: &str) -> Outcome<DonationBatch>;
}
