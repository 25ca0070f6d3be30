//! Internal helpers shared by the issue, news and donation services.

use async_trait::async_trait;

use crate::domain::ports::RepositoryError;
use crate::domain::{Error, Event, EventName, Repositories, Step};

pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::internal(format!("repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("repository error: {message}"))
        }
        RepositoryError::Conflict { message } => Error::conflict(message),
        err @ RepositoryError::MissingParent { .. } => Error::not_found(err.to_string()),
    }
}

/// Parse a raw path segment into an [`EventName`].
pub(crate) fn parse_event_name(raw: &str) -> Result<EventName, Error> {
    EventName::new(raw).map_err(|err| Error::bad_request(err.to_string()))
}

/// Look an event up by name through the resolver; absence is `not_found`.
pub(crate) async fn require_event(
    repositories: &Repositories,
    name: &EventName,
) -> Result<Event, Error> {
    repositories
        .for_kind::<Event>()
        .find_name(name)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(format!("event {name} does not exist")))
}

/// First step of every event-scoped workflow.
pub(crate) struct ValidateEventName;

#[async_trait]
impl Step<String> for ValidateEventName {
    type Output = EventName;

    fn name(&self) -> &'static str {
        "validate_input"
    }

    async fn run(&self, input: String) -> Result<EventName, Error> {
        parse_event_name(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, ErrorCode};
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::InternalError)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::conflict("name taken"), ErrorCode::Conflict)]
    #[case(
        RepositoryError::missing_parent(EntityKind::Issue, "floods"),
        ErrorCode::NotFound
    )]
    fn repository_errors_map_to_categories(
        #[case] error: RepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_repository_error(error).code(), expected);
    }

    #[tokio::test]
    async fn blank_event_names_are_bad_requests() {
        let err = ValidateEventName
            .run("   ".to_owned())
            .await
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }
}
