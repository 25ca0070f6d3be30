//! Shared harness for the integration suites.
//!
//! Wires the in-memory store, the in-process queue and the real services the
//! same way the binary does, with the donation source and optionally the
//! donation repository replaced by test doubles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;

use floofloo::Trace;
use floofloo::domain::ports::{
    DonationRepository, DonationSource, DonationSourceError, FixtureNewsSource, RepositoryError,
};
use floofloo::domain::{
    Donation, DonationIngestionService, DonationQueryService, DonationRecord, Event, IssueService,
    NewsService, Repositories,
};
use floofloo::inbound::http::configure;
use floofloo::inbound::http::state::HttpState;
use floofloo::inbound::queue::{DonationJobHandler, QueueConsumer};
use floofloo::outbound::persistence::InMemoryStore;
use floofloo::outbound::queue::InMemoryQueue;

/// The two project records used across the suites.
pub fn flood_records() -> Vec<DonationRecord> {
    vec![
        DonationRecord::new("gg-1", 50.0),
        DonationRecord::new("gg-2", 25.0),
    ]
}

/// Source that always fails with a transport error.
pub struct UnreachableSource;

#[async_trait]
impl DonationSource for UnreachableSource {
    async fn fetch(&self, _keyword: &str) -> Result<Vec<DonationRecord>, DonationSourceError> {
        Err(DonationSourceError::transport("connection refused"))
    }
}

/// Donation repository that delegates to the store except for the
/// `fail_on`-th create (1-based), which fails with a query error.
pub struct FlakyDonations {
    inner: Arc<InMemoryStore>,
    fail_on: usize,
    creates: AtomicUsize,
}

impl FlakyDonations {
    pub fn new(inner: Arc<InMemoryStore>, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            creates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DonationRepository for FlakyDonations {
    async fn find_for_event(&self, event: &Event) -> Result<Vec<Donation>, RepositoryError> {
        self.inner.find_for_event(event).await
    }

    async fn create(
        &self,
        event: &Event,
        record: &DonationRecord,
    ) -> Result<Donation, RepositoryError> {
        let attempt = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(RepositoryError::query("write rejected"));
        }
        self.inner.create(event, record).await
    }
}

/// Fully wired application over in-memory adapters.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub queue: Arc<InMemoryQueue>,
    pub ingestion: Arc<DonationIngestionService>,
    pub state: HttpState,
}

impl Harness {
    pub fn new(source: Arc<dyn DonationSource>) -> Self {
        let store = Arc::new(InMemoryStore::default());
        Self::with_donations(store.clone(), source, store)
    }

    pub fn with_donations(
        store: Arc<InMemoryStore>,
        source: Arc<dyn DonationSource>,
        donations: Arc<dyn DonationRepository>,
    ) -> Self {
        let repositories =
            Repositories::new(store.clone(), store.clone(), store.clone(), donations);
        let news = Arc::new(NewsService::new(
            repositories.clone(),
            Arc::new(FixtureNewsSource::default()),
        ));
        let ingestion = Arc::new(DonationIngestionService::new(repositories.clone(), source));
        let queue = Arc::new(InMemoryQueue::new());
        let state = HttpState {
            issues: Arc::new(IssueService::new(repositories.clone())),
            news: news.clone(),
            news_query: news,
            donations: ingestion.clone(),
            donations_query: Arc::new(DonationQueryService::new(repositories)),
            donation_queue: queue.clone(),
            environment: "test".to_owned(),
        };
        Self {
            store,
            queue,
            ingestion,
            state,
        }
    }

    /// Actix application serving every route over this harness.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(self.state.clone()))
            .configure(configure)
    }

    /// Consumer draining this harness's queue with `concurrency` permits.
    pub fn consumer(&self, concurrency: usize) -> QueueConsumer {
        QueueConsumer::new(
            self.queue.clone(),
            Arc::new(DonationJobHandler::new(self.ingestion.clone())),
            concurrency,
        )
    }

    /// Create `issue` and `event` through the issue service.
    pub async fn seed_event(&self, issue: &str, event: &str) {
        self.state
            .issues
            .add_event(issue, event)
            .await
            .expect("event should be created");
    }
}
