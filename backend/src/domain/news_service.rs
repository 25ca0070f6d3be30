//! News gathering and listing services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{NewsCommand, NewsQuery, NewsSource};
use crate::domain::service_support::{
    ValidateEventName, map_repository_error, parse_event_name, require_event,
};
use crate::domain::{
    ApiResult, Error, EventName, NewsItem, Outcome, Repositories, Step, Then, Transaction,
};

/// Failure message reported for every news-gathering failure except a
/// missing event.
pub const ADD_NEWS_FAILURE: &str = "Could not add the news";

struct FetchNews {
    repositories: Repositories,
    source: Arc<dyn NewsSource>,
}

#[async_trait]
impl Step<EventName> for FetchNews {
    type Output = ApiResult<Vec<NewsItem>>;

    fn name(&self) -> &'static str {
        "fetch_news"
    }

    async fn run(&self, name: EventName) -> Result<Self::Output, Error> {
        let event = require_event(&self.repositories, &name).await?;
        let articles = self.source.fetch(name.as_str()).await.map_err(|err| {
            warn!(event = %name, error = %err, "news source failed");
            Error::internal(ADD_NEWS_FAILURE)
        })?;

        let mut items = Vec::with_capacity(articles.len());
        for article in &articles {
            let item = self
                .repositories
                .for_entity(article)
                .create(&event, article)
                .await
                .map_err(|err| {
                    warn!(event = %name, stored = items.len(), error = %err, "news write failed");
                    Error::internal(ADD_NEWS_FAILURE)
                })?;
            items.push(item);
        }
        info!(event = %name, count = items.len(), "news added");
        Ok(ApiResult::created(items))
    }
}

/// Service implementing [`NewsCommand`] and [`NewsQuery`].
pub struct NewsService {
    repositories: Repositories,
    add_news: Transaction<Then<ValidateEventName, FetchNews>>,
}

impl NewsService {
    /// Create the service over the resolver and a news source.
    pub fn new(repositories: Repositories, source: Arc<dyn NewsSource>) -> Self {
        let add_news = Transaction::new("add_news", ADD_NEWS_FAILURE, ValidateEventName).then(
            FetchNews {
                repositories: repositories.clone(),
                source,
            },
        );
        Self {
            repositories,
            add_news,
        }
    }
}

#[async_trait]
impl NewsCommand for NewsService {
    async fn add_news(&self, event_name: &str) -> Outcome<Vec<NewsItem>> {
        self.add_news.call(event_name.to_owned()).await
    }
}

#[async_trait]
impl NewsQuery for NewsService {
    async fn list_news(&self, event_name: &str) -> Outcome<Vec<NewsItem>> {
        let name = parse_event_name(event_name)?;
        let event = require_event(&self.repositories, &name).await?;
        let items = self
            .repositories
            .for_kind::<NewsItem>()
            .find_for_event(&event)
            .await
            .map_err(map_repository_error)?;
        Ok(ApiResult::ok(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockDonationRepository, MockEventRepository, MockIssueRepository, MockNewsRepository,
        MockNewsSource, NewsSourceError, RepositoryError,
    };
    use crate::domain::{EntityId, ErrorCode, Event, NewsArticle, SuccessStatus};
    use chrono::Utc;

    fn event() -> Event {
        Event {
            id: EntityId::random(),
            issue_id: EntityId::random(),
            name: EventName::new("flood-2024").expect("valid name"),
            created_at: Utc::now(),
        }
    }

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_owned(),
            description: None,
            url: format!("https://news.example/{title}"),
            image_url: None,
            source_name: Some("Example Times".to_owned()),
            published_at: None,
        }
    }

    fn events_with(found: Option<Event>) -> MockEventRepository {
        let mut events = MockEventRepository::new();
        events
            .expect_find_name()
            .returning(move |_| Ok(found.clone()));
        events
    }

    fn service(
        events: MockEventRepository,
        news: MockNewsRepository,
        source: MockNewsSource,
    ) -> NewsService {
        NewsService::new(
            Repositories::new(
                Arc::new(MockIssueRepository::new()),
                Arc::new(events),
                Arc::new(news),
                Arc::new(MockDonationRepository::new()),
            ),
            Arc::new(source),
        )
    }

    #[tokio::test]
    async fn stores_every_fetched_article() {
        let mut source = MockNewsSource::new();
        source
            .expect_fetch()
            .withf(|keyword| keyword == "flood-2024")
            .returning(|_| Ok(vec![article("levee"), article("rescue")]));
        let mut news = MockNewsRepository::new();
        news.expect_create()
            .times(2)
            .returning(|event, article| {
                Ok(NewsItem::from_article(EntityId::random(), event.id, article, Utc::now()))
            });

        let result = service(events_with(Some(event())), news, source)
            .add_news("flood-2024")
            .await
            .expect("news added");

        assert_eq!(result.status, SuccessStatus::Created);
        let titles: Vec<_> = result.message.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, ["levee", "rescue"]);
    }

    #[tokio::test]
    async fn missing_event_is_not_found_and_skips_the_source() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().never();

        let err = service(events_with(None), MockNewsRepository::new(), source)
            .add_news("unknown-event")
            .await
            .expect_err("missing event");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn source_failure_is_reported_with_the_fallback_message() {
        let mut source = MockNewsSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(NewsSourceError::rate_limited("429")));
        let mut news = MockNewsRepository::new();
        news.expect_create().never();

        let err = service(events_with(Some(event())), news, source)
            .add_news("flood-2024")
            .await
            .expect_err("source failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), ADD_NEWS_FAILURE);
    }

    #[tokio::test]
    async fn listing_propagates_repository_errors() {
        let mut news = MockNewsRepository::new();
        news.expect_find_for_event()
            .returning(|_| Err(RepositoryError::connection("refused")));

        let err = service(events_with(Some(event())), news, MockNewsSource::new())
            .list_news("flood-2024")
            .await
            .expect_err("repository failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
