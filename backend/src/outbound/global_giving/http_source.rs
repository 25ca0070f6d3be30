//! Reqwest-backed GlobalGiving donation source.
//!
//! This adapter owns transport details only: request construction, timeout
//! and HTTP error mapping, and JSON decoding into donation records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::SearchEnvelopeDto;
use crate::domain::DonationRecord;
use crate::domain::ports::{DonationSource, DonationSourceError};
use crate::outbound::http_support::{
    FailureClass, classify_status, classify_transport, status_message,
};

/// Production GlobalGiving API root.
pub const DEFAULT_GLOBAL_GIVING_URL: &str = "https://api.globalgiving.org/";

const SEARCH_PATH: &str = "api/public/services/search/projects";

/// Donation source that searches GlobalGiving projects by keyword.
pub struct GlobalGivingSource {
    client: Client,
    search_url: Url,
    api_key: String,
}

impl GlobalGivingSource {
    /// Build an adapter with an access key and an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry the search path or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DonationSourceError> {
        let search_url = search_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DonationSourceError::invalid_request(err.to_string()))?;
        Ok(Self {
            client,
            search_url,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl DonationSource for GlobalGivingSource {
    async fn fetch(&self, keyword: &str) -> Result<Vec<DonationRecord>, DonationSourceError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(DonationSourceError::invalid_request(
                "search keyword must not be blank",
            ));
        }

        let response = self
            .client
            .get(self.search_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str()), ("q", keyword)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_failure(
                classify_status(status),
                status_message(status, body.as_ref()),
            ));
        }

        let records = parse_records(body.as_ref())?;
        debug!(keyword, count = records.len(), "globalgiving search answered");
        Ok(records)
    }
}

fn search_url(base_url: &Url) -> Result<Url, DonationSourceError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SEARCH_PATH)
        .map_err(|err| DonationSourceError::invalid_request(format!("invalid base url: {err}")))
}

fn parse_records(body: &[u8]) -> Result<Vec<DonationRecord>, DonationSourceError> {
    let decoded: SearchEnvelopeDto = serde_json::from_slice(body).map_err(|error| {
        DonationSourceError::decode(format!("invalid GlobalGiving JSON payload: {error}"))
    })?;
    decoded
        .into_domain_records()
        .map_err(DonationSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> DonationSourceError {
    map_failure(classify_transport(&error), error.to_string())
}

fn map_failure(class: FailureClass, message: String) -> DonationSourceError {
    match class {
        FailureClass::RateLimited => DonationSourceError::rate_limited(message),
        FailureClass::Timeout => DonationSourceError::timeout(message),
        FailureClass::InvalidRequest => DonationSourceError::invalid_request(message),
        FailureClass::Transport => DonationSourceError::transport(message),
    }
}
