//! Driving port for reading stored donations.

use async_trait::async_trait;

use crate::domain::{Donation, Outcome};

/// Use-case port listing the donations stored for an event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationsQuery: Send + Sync {
    /// Donations for `event_name` in creation order; `not_found` without the
    /// event.
    async fn list_donations(&self, event_name: &str) -> Outcome<Vec<Donation>>;
}
