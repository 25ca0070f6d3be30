//! Port abstraction for news persistence.

use async_trait::async_trait;

use crate::domain::{Event, NewsArticle, NewsItem};

use super::RepositoryError;

/// Persistence boundary for [`NewsItem`] entities scoped to an event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// News stored for `event`, in creation order.
    async fn find_for_event(&self, event: &Event) -> Result<Vec<NewsItem>, RepositoryError>;

    /// Attach `article` to `event` and store it.
    async fn create(
        &self,
        event: &Event,
        article: &NewsArticle,
    ) -> Result<NewsItem, RepositoryError>;
}
