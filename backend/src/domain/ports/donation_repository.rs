//! Port abstraction for donation persistence.

use async_trait::async_trait;

use crate::domain::{Donation, DonationRecord, Event};

use super::RepositoryError;

/// Persistence boundary for [`Donation`] entities scoped to an event.
///
/// The store never de-duplicates: creating the same record twice yields two
/// donations with distinct identifiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Donations stored for `event`, in creation order.
    async fn find_for_event(&self, event: &Event) -> Result<Vec<Donation>, RepositoryError>;

    /// Attach `record` to `event` and store it. Each call is atomic on its own.
    async fn create(
        &self,
        event: &Event,
        record: &DonationRecord,
    ) -> Result<Donation, RepositoryError>;
}
