//! Driving port for creating issues and events.

use async_trait::async_trait;

use crate::domain::{Event, Issue, Outcome};

/// Use-case port for registering issues and their events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueCommand: Send + Sync {
    /// Register an issue.
    ///
    /// Answers `created` with the new issue, or `ok` with the stored one when
    /// the name is already known.
    async fn add_issue(&self, issue_name: &str) -> Outcome<Issue>;

    /// Register an event under an issue, creating the issue on first
    /// reference.
    ///
    /// Answers `created` for a new event and `ok` when the event already
    /// belongs to the same issue. An event name held by another issue is a
    /// `conflict`.
    async fn add_event(&self, issue_name: &str, event_name: &str) -> Outcome<Event>;
}
