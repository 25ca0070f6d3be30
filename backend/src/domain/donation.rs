//! Donation records gathered for an event.
//!
//! Donations are append-only: they are created by the ingestion workflow and
//! never updated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// Record returned by the donation source, not yet attached to an event.
///
/// `source_id` is the identifier assigned by the external source; it is not
/// unique in this system because ingestion does not de-duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub source_id: String,
    pub amount: f64,
    pub title: String,
    pub summary: Option<String>,
    pub project_url: Option<String>,
    pub image_url: Option<String>,
}

impl DonationRecord {
    /// Minimal record with only an identifier and amount.
    ///
    /// # Examples
    /// ```
    /// use floofloo::domain::DonationRecord;
    ///
    /// let record = DonationRecord::new("gg-1", 50.0);
    /// assert_eq!(record.title, "gg-1");
    /// ```
    pub fn new(source_id: impl Into<String>, amount: f64) -> Self {
        let source_id = source_id.into();
        Self {
            title: source_id.clone(),
            source_id,
            amount,
            summary: None,
            project_url: None,
            image_url: None,
        }
    }
}

/// Persisted donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: EntityId,
    pub event_id: EntityId,
    pub source_id: String,
    pub amount: f64,
    pub title: String,
    pub summary: Option<String>,
    pub project_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Attach a source record to its event.
    pub fn from_record(
        id: EntityId,
        event_id: EntityId,
        record: &DonationRecord,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            source_id: record.source_id.clone(),
            amount: record.amount,
            title: record.title.clone(),
            summary: record.summary.clone(),
            project_url: record.project_url.clone(),
            image_url: record.image_url.clone(),
            created_at,
        }
    }
}

/// Success payload of the ingestion workflow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DonationBatch {
    /// Donations persisted by this run, in creation order.
    pub donations: Vec<Donation>,
}
