//! Driving port for gathering news for an event.

use async_trait::async_trait;

use crate::domain::{NewsItem, Outcome};

/// Use-case port that fetches news for an event and stores it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsCommand: Send + Sync {
    /// Fetch articles using the event name as keyword and store each one.
    async fn add_news(&self, event_name: &str) -> Outcome<Vec<NewsItem>>;
}
