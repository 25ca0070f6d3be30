//! In-memory implementation of every repository port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    DonationRepository, EventRepository, IssueRepository, NewsRepository, RepositoryError,
};
use crate::domain::{
    Donation, DonationRecord, EntityId, EntityKind, Event, EventName, Issue, IssueName,
    NewsArticle, NewsItem,
};

#[derive(Default)]
struct Tables {
    issues: Vec<Issue>,
    events: Vec<Event>,
    news: Vec<NewsItem>,
    donations: Vec<Donation>,
}

impl Tables {
    fn require_event(&self, event: &Event) -> Result<(), RepositoryError> {
        if self.events.iter().any(|stored| stored.id == event.id) {
            Ok(())
        } else {
            Err(RepositoryError::missing_parent(
                EntityKind::Event,
                event.name.as_str(),
            ))
        }
    }
}

/// Store shared by all concurrent requests and queue workers.
///
/// Rows keep insertion order, so per-event listings come back in creation
/// order. Identifiers are random UUIDs and timestamps come from the injected
/// clock.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
        }
    }

    /// Number of stored donations across all events.
    pub async fn donation_count(&self) -> usize {
        self.tables.read().await.donations.len()
    }
}

#[async_trait]
impl IssueRepository for InMemoryStore {
    async fn find_name(&self, name: &IssueName) -> Result<Option<Issue>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.issues.iter().find(|issue| &issue.name == name).cloned())
    }

    async fn create(&self, name: &IssueName) -> Result<Issue, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.issues.iter().any(|issue| &issue.name == name) {
            return Err(RepositoryError::conflict(format!(
                "issue {name} already exists"
            )));
        }
        let issue = Issue {
            id: EntityId::random(),
            name: name.clone(),
            created_at: self.clock.utc(),
        };
        tables.issues.push(issue.clone());
        debug!(kind = %EntityKind::Issue, id = %issue.id, "row inserted");
        Ok(issue)
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn find_name(&self, name: &EventName) -> Result<Option<Event>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.events.iter().find(|event| &event.name == name).cloned())
    }

    async fn create(&self, issue: &Issue, name: &EventName) -> Result<Event, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.issues.iter().any(|stored| stored.id == issue.id) {
            return Err(RepositoryError::missing_parent(
                EntityKind::Issue,
                issue.name.as_str(),
            ));
        }
        if tables.events.iter().any(|event| &event.name == name) {
            return Err(RepositoryError::conflict(format!(
                "event {name} already exists"
            )));
        }
        let event = Event {
            id: EntityId::random(),
            issue_id: issue.id,
            name: name.clone(),
            created_at: self.clock.utc(),
        };
        tables.events.push(event.clone());
        debug!(kind = %EntityKind::Event, id = %event.id, "row inserted");
        Ok(event)
    }
}

#[async_trait]
impl NewsRepository for InMemoryStore {
    async fn find_for_event(&self, event: &Event) -> Result<Vec<NewsItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .news
            .iter()
            .filter(|item| item.event_id == event.id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        event: &Event,
        article: &NewsArticle,
    ) -> Result<NewsItem, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_event(event)?;
        let item = NewsItem::from_article(EntityId::random(), event.id, article, self.clock.utc());
        tables.news.push(item.clone());
        debug!(kind = %EntityKind::News, id = %item.id, "row inserted");
        Ok(item)
    }
}

#[async_trait]
impl DonationRepository for InMemoryStore {
    async fn find_for_event(&self, event: &Event) -> Result<Vec<Donation>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .donations
            .iter()
            .filter(|donation| donation.event_id == event.id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        event: &Event,
        record: &DonationRecord,
    ) -> Result<Donation, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.require_event(event)?;
        let donation =
            Donation::from_record(EntityId::random(), event.id, record, self.clock.utc());
        tables.donations.push(donation.clone());
        debug!(kind = %EntityKind::Donation, id = %donation.id, "row inserted");
        Ok(donation)
    }
}
