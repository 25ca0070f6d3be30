//! Port abstraction for issue persistence.

use async_trait::async_trait;

use crate::domain::{Issue, IssueName};

use super::RepositoryError;

/// Persistence boundary for [`Issue`] entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Look an issue up by its unique name.
    async fn find_name(&self, name: &IssueName) -> Result<Option<Issue>, RepositoryError>;

    /// Store a new issue. Fails with `Conflict` when the name is taken.
    async fn create(&self, name: &IssueName) -> Result<Issue, RepositoryError>;
}
