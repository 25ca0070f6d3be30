//! Driving port for reading stored news.

use async_trait::async_trait;

use crate::domain::{NewsItem, Outcome};

/// Use-case port listing the news stored for an event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// News for `event_name` in creation order; `not_found` without the event.
    async fn list_news(&self, event_name: &str) -> Outcome<Vec<NewsItem>>;
}
