//! Reqwest-backed News API source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::EverythingDto;
use crate::domain::NewsArticle;
use crate::domain::ports::{NewsSource, NewsSourceError};
use crate::outbound::http_support::{
    FailureClass, classify_status, classify_transport, status_message,
};

/// Production News API root.
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/";

const EVERYTHING_PATH: &str = "v2/everything";
const USER_AGENT: &str = "floofloo-backend/0.1";

/// News source backed by the News API `everything` endpoint.
pub struct NewsApiSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl NewsApiSource {
    /// Build an adapter with an access key and an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is unusable or the reqwest client
    /// cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NewsSourceError> {
        let endpoint = base_url
            .join(EVERYTHING_PATH)
            .map_err(|err| NewsSourceError::invalid_request(format!("invalid base url: {err}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| NewsSourceError::invalid_request(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    async fn fetch(&self, keyword: &str) -> Result<Vec<NewsArticle>, NewsSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", keyword), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| map_failure(classify_transport(&err), err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_failure(classify_transport(&err), err.to_string()))?;
        if !status.is_success() {
            return Err(map_failure(
                classify_status(status),
                status_message(status, body.as_ref()),
            ));
        }

        let articles = parse_articles(body.as_ref())?;
        debug!(keyword, count = articles.len(), "news api answered");
        Ok(articles)
    }
}

fn parse_articles(body: &[u8]) -> Result<Vec<NewsArticle>, NewsSourceError> {
    let decoded: EverythingDto = serde_json::from_slice(body).map_err(|error| {
        NewsSourceError::decode(format!("invalid News API JSON payload: {error}"))
    })?;
    decoded
        .into_domain_articles()
        .map_err(NewsSourceError::decode)
}

fn map_failure(class: FailureClass, message: String) -> NewsSourceError {
    match class {
        FailureClass::RateLimited => NewsSourceError::rate_limited(message),
        FailureClass::Timeout => NewsSourceError::timeout(message),
        FailureClass::InvalidRequest => NewsSourceError::invalid_request(message),
        FailureClass::Transport => NewsSourceError::transport(message),
    }
}
