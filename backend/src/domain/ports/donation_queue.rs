//! Domain port for handing donation ingestion to the background worker.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::define_port_error;

/// Work item asking the worker to ingest donations for one event.
///
/// Serialised as the queue message body, e.g. `{"event_name":"flood-2024"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationJob {
    /// Name of the event whose donations should be ingested.
    pub event_name: String,
}

impl DonationJob {
    /// Job for `event_name`.
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
        }
    }
}

define_port_error! {
    /// Errors surfaced by the queue publisher.
    pub enum JobDispatchError {
        /// Queue infrastructure is unavailable.
        Unavailable { message: String } => "donation queue is unavailable: {message}",
        /// The job could not be encoded or was refused.
        Rejected { message: String } => "donation job was rejected: {message}",
    }
}

/// Publisher side of the donation queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationQueue: Send + Sync {
    /// Enqueue a job for asynchronous processing.
    async fn enqueue(&self, job: &DonationJob) -> Result<(), JobDispatchError>;
}
