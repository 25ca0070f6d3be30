//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DonationQueue, DonationsCommand, DonationsQuery, IssueCommand, NewsCommand, NewsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub issues: Arc<dyn IssueCommand>,
    pub news: Arc<dyn NewsCommand>,
    pub news_query: Arc<dyn NewsQuery>,
    pub donations: Arc<dyn DonationsCommand>,
    pub donations_query: Arc<dyn DonationsQuery>,
    pub donation_queue: Arc<dyn DonationQueue>,
    /// Deployment environment label reported by the root resource.
    pub environment: String,
}
