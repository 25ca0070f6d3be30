//! Message handler running the donation ingestion workflow.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ErrorCode;
use crate::domain::ports::{DonationJob, DonationsCommand};

/// What became of one message. Only logged; never sent back to the
/// publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDisposition {
    /// The workflow succeeded and stored `donations` records.
    Processed { donations: usize },
    /// The workflow answered with a failure outcome.
    Failed { code: ErrorCode, message: String },
    /// The body is not a donation job.
    Malformed { reason: String },
}

/// Handler for donation job messages.
pub struct DonationJobHandler {
    donations: Arc<dyn DonationsCommand>,
}

impl DonationJobHandler {
    /// Create a handler calling the ingestion workflow through `donations`.
    pub fn new(donations: Arc<dyn DonationsCommand>) -> Self {
        Self { donations }
    }

    /// Parse `body` as `{"event_name": ...}` and run the workflow.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use floofloo::domain::{DonationIngestionService, Repositories};
    /// use floofloo::domain::ports::FixtureDonationSource;
    /// use floofloo::inbound::queue::{DonationJobHandler, MessageDisposition};
    /// use floofloo::outbound::persistence::InMemoryStore;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let repositories = Repositories::from_store(Arc::new(InMemoryStore::default()));
    /// let workflow = DonationIngestionService::new(
    ///     repositories,
    ///     Arc::new(FixtureDonationSource::default()),
    /// );
    /// let handler = DonationJobHandler::new(Arc::new(workflow));
    ///
    /// let disposition = handler.handle("not json").await;
    /// assert!(matches!(disposition, MessageDisposition::Malformed { .. }));
    /// # });
    /// ```
    pub async fn handle(&self, body: &str) -> MessageDisposition {
        let job: DonationJob = match serde_json::from_str(body) {
            Ok(job) => job,
            Err(err) => {
                warn!(error = %err, "dropping malformed donation job");
                return MessageDisposition::Malformed {
                    reason: err.to_string(),
                };
            }
        };

        match self.donations.add_donations(&job.event_name).await {
            Ok(result) => {
                let donations = result.message.donations.len();
                info!(event = %job.event_name, donations, "donation job processed");
                MessageDisposition::Processed { donations }
            }
            Err(err) => {
                warn!(
                    event = %job.event_name,
                    code = ?err.code(),
                    details = ?err.details(),
                    error = %err,
                    "donation job failed"
                );
                MessageDisposition::Failed {
                    code: err.code(),
                    message: err.message().to_owned(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDonationsCommand;
    use crate::domain::{ADD_DONATIONS_FAILURE, ApiResult, DonationBatch, Error};
    use rstest::rstest;

    fn handler(mock: MockDonationsCommand) -> DonationJobHandler {
        DonationJobHandler::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn runs_the_workflow_for_the_named_event() {
        let mut mock = MockDonationsCommand::new();
        mock.expect_add_donations()
            .withf(|event| event == "flood-2024")
            .times(1)
            .returning(|_| Ok(ApiResult::ok(DonationBatch::default())));

        let disposition = handler(mock)
            .handle(r#"{"event_name":"flood-2024","sent_by":"scheduler"}"#)
            .await;

        assert_eq!(disposition, MessageDisposition::Processed { donations: 0 });
    }

    #[tokio::test]
    async fn failure_outcomes_are_reported_not_raised() {
        let mut mock = MockDonationsCommand::new();
        mock.expect_add_donations()
            .returning(|_| Err(Error::internal(ADD_DONATIONS_FAILURE)));

        let disposition = handler(mock)
            .handle(r#"{"event_name":"unknown-event"}"#)
            .await;

        assert_eq!(
            disposition,
            MessageDisposition::Failed {
                code: ErrorCode::InternalError,
                message: ADD_DONATIONS_FAILURE.to_owned(),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("flood-2024")]
    #[case(r#"{"event":"flood-2024"}"#)]
    #[case(r#"{"event_name":42}"#)]
    #[tokio::test]
    async fn malformed_bodies_skip_the_workflow(#[case] body: &str) {
        let mut mock = MockDonationsCommand::new();
        mock.expect_add_donations().never();

        let disposition = handler(mock).handle(body).await;

        assert!(matches!(disposition, MessageDisposition::Malformed { .. }));
    }
}
