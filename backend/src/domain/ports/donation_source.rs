//! Driven port for the external donation-discovery service.
//!
//! A fetch is all or nothing: adapters either return every record the service
//! reported for the keyword or fail, never a partial list.

use async_trait::async_trait;

use crate::domain::DonationRecord;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the donation source.
    pub enum DonationSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "donation source transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "donation source timeout: {message}",
        /// The service rate-limited the request.
        RateLimited { message: String } =>
            "donation source rate limited request: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "donation source response decode failed: {message}",
        /// The service or adapter rejected the request.
        InvalidRequest { message: String } =>
            "donation source request invalid: {message}",
    }
}

impl DonationSourceError {
    /// Return whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for fetching donation records by keyword.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationSource: Send + Sync {
    /// Fetch every donation record matching `keyword`.
    ///
    /// An empty list is a successful answer.
    ///
    /// # Examples
    ///
    /// ```
    /// use floofloo::domain::DonationRecord;
    /// use floofloo::domain::ports::{DonationSource, FixtureDonationSource};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let source = FixtureDonationSource::new(vec![DonationRecord::new("gg-1", 50.0)]);
    /// let records = source.fetch("flood-2024").await?;
    /// assert_eq!(records.len(), 1);
    /// # Ok::<(), floofloo::domain::ports::DonationSourceError>(())
    /// # }).unwrap();
    /// ```
    async fn fetch(&self, keyword: &str) -> Result<Vec<DonationRecord>, DonationSourceError>;
}

/// Fixture source answering every keyword with the same records.
#[derive(Debug, Clone, Default)]
pub struct FixtureDonationSource {
    records: Vec<DonationRecord>,
}

impl FixtureDonationSource {
    /// Serve `records` for every keyword.
    pub fn new(records: Vec<DonationRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DonationSource for FixtureDonationSource {
    async fn fetch(&self, _keyword: &str) -> Result<Vec<DonationRecord>, DonationSourceError> {
        Ok(self.records.clone())
    }
}
