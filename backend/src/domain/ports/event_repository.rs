//! Port abstraction for event persistence.

use async_trait::async_trait;

use crate::domain::{Event, EventName, Issue};

use super::RepositoryError;

/// Persistence boundary for [`Event`] entities.
///
/// Event names are unique across the whole store, not only within one issue,
/// because downstream lookups go by event name alone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Look an event up by name.
    async fn find_name(&self, name: &EventName) -> Result<Option<Event>, RepositoryError>;

    /// Store a new event under `issue`.
    ///
    /// Fails with `MissingParent` when the issue is not stored and with
    /// `Conflict` when the name is already used by any event.
    async fn create(&self, issue: &Issue, name: &EventName) -> Result<Event, RepositoryError>;
}
