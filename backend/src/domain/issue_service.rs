//! Issue and event registration service.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{IssueCommand, RepositoryError};
use crate::domain::service_support::{map_repository_error, parse_event_name};
use crate::domain::{ApiResult, Error, Event, Issue, IssueName, Outcome, Repositories};

/// Service implementing [`IssueCommand`].
#[derive(Clone)]
pub struct IssueService {
    repositories: Repositories,
}

impl IssueService {
    /// Create the service over the resolver.
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// Return the stored issue, creating it when absent. The flag is `true`
    /// when this call created it.
    async fn ensure_issue(&self, name: &IssueName) -> Result<(Issue, bool), Error> {
        let issues = self.repositories.for_kind::<Issue>();
        if let Some(existing) = issues.find_name(name).await.map_err(map_repository_error)? {
            return Ok((existing, false));
        }
        match issues.create(name).await {
            Ok(issue) => {
                info!(issue = %issue.name, id = %issue.id, "issue created");
                Ok((issue, true))
            }
            // Lost a race with a concurrent create of the same name.
            Err(RepositoryError::Conflict { .. }) => issues
                .find_name(name)
                .await
                .map_err(map_repository_error)?
                .map(|issue| (issue, false))
                .ok_or_else(|| Error::internal(format!("issue {name} vanished after conflict"))),
            Err(err) => Err(map_repository_error(err)),
        }
    }
}

fn parse_issue_name(raw: &str) -> Result<IssueName, Error> {
    IssueName::new(raw).map_err(|err| Error::bad_request(err.to_string()))
}

#[async_trait]
impl IssueCommand for IssueService {
    async fn add_issue(&self, issue_name: &str) -> Outcome<Issue> {
        let name = parse_issue_name(issue_name)?;
        let (issue, created) = self.ensure_issue(&name).await?;
        Ok(if created {
            ApiResult::created(issue)
        } else {
            ApiResult::ok(issue)
        })
    }

    async fn add_event(&self, issue_name: &str, event_name: &str) -> Outcome<Event> {
        let issue_name = parse_issue_name(issue_name)?;
        let event_name = parse_event_name(event_name)?;
        let (issue, _) = self.ensure_issue(&issue_name).await?;

        let events = self.repositories.for_kind::<Event>();
        if let Some(existing) = events
            .find_name(&event_name)
            .await
            .map_err(map_repository_error)?
        {
            if existing.issue_id == issue.id {
                debug!(event = %existing.name, "event already registered");
                return Ok(ApiResult::ok(existing));
            }
            return Err(Error::conflict(format!(
                "event {event_name} already belongs to another issue"
            )));
        }

        let event = events
            .create(&issue, &event_name)
            .await
            .map_err(map_repository_error)?;
        info!(issue = %issue.name, event = %event.name, id = %event.id, "event created");
        Ok(ApiResult::created(event))
    }
}

#[cfg(test)]
#[path = "issue_service_tests.rs"]
mod tests;
