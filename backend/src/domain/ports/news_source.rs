//! Driven port for the external news-discovery service.

use async_trait::async_trait;

use crate::domain::NewsArticle;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the news source.
    pub enum NewsSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "news source transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } => "news source timeout: {message}",
        /// The service rate-limited the request.
        RateLimited { message: String } => "news source rate limited request: {message}",
        /// The response could not be decoded or reported an error.
        Decode { message: String } => "news source response decode failed: {message}",
        /// The service or adapter rejected the request.
        InvalidRequest { message: String } => "news source request invalid: {message}",
    }
}

/// Port for fetching news articles by keyword.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch articles matching `keyword`. All or nothing.
    async fn fetch(&self, keyword: &str) -> Result<Vec<NewsArticle>, NewsSourceError>;
}

/// Fixture source answering every keyword with the same articles.
#[derive(Debug, Clone, Default)]
pub struct FixtureNewsSource {
    articles: Vec<NewsArticle>,
}

impl FixtureNewsSource {
    /// Serve `articles` for every keyword.
    pub fn new(articles: Vec<NewsArticle>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl NewsSource for FixtureNewsSource {
    async fn fetch(&self, _keyword: &str) -> Result<Vec<NewsArticle>, NewsSourceError> {
        Ok(self.articles.clone())
    }
}
