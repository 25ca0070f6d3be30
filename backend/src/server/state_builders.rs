//! Builders wiring outbound adapters into services and handler state.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use url::Url;

use floofloo::domain::ports::{
    DonationSource, FixtureDonationSource, FixtureNewsSource, NewsSource,
};
use floofloo::domain::{
    DonationIngestionService, DonationQueryService, IssueService, NewsService, Repositories,
};
use floofloo::inbound::http::state::HttpState;
use floofloo::inbound::queue::{DonationJobHandler, QueueConsumer};
use floofloo::outbound::global_giving::{DEFAULT_GLOBAL_GIVING_URL, GlobalGivingSource};
use floofloo::outbound::news_api::{DEFAULT_NEWS_API_URL, NewsApiSource};
use floofloo::outbound::persistence::InMemoryStore;
use floofloo::outbound::queue::InMemoryQueue;
use floofloo::settings::AppSettings;

/// Everything the process needs once settings are loaded.
pub struct AppComponents {
    pub http_state: HttpState,
    pub queue: Arc<InMemoryQueue>,
    pub consumer: QueueConsumer,
}

/// Wire the store, sources, services and queue.
///
/// Both entry points share one [`DonationIngestionService`], so a message
/// consumed from the queue runs exactly the workflow behind the HTTP route.
///
/// # Errors
///
/// Returns an error when a configured source URL is invalid or a source
/// client cannot be built.
pub fn build_components(settings: &AppSettings) -> Result<AppComponents> {
    let repositories = Repositories::from_store(Arc::new(InMemoryStore::default()));
    let donation_source = build_donation_source(settings)?;
    let news_source = build_news_source(settings)?;

    let news = Arc::new(NewsService::new(repositories.clone(), news_source));
    let ingestion = Arc::new(DonationIngestionService::new(
        repositories.clone(),
        donation_source,
    ));
    let queue = Arc::new(InMemoryQueue::new());
    let consumer = QueueConsumer::new(
        queue.clone(),
        Arc::new(DonationJobHandler::new(ingestion.clone())),
        settings.queue_concurrency(),
    );

    let http_state = HttpState {
        issues: Arc::new(IssueService::new(repositories.clone())),
        news: news.clone(),
        news_query: news,
        donations: ingestion,
        donations_query: Arc::new(DonationQueryService::new(repositories)),
        donation_queue: queue.clone(),
        environment: settings.environment().to_owned(),
    };

    Ok(AppComponents {
        http_state,
        queue,
        consumer,
    })
}

fn build_donation_source(settings: &AppSettings) -> Result<Arc<dyn DonationSource>> {
    let Some(api_key) = settings.global_giving_key() else {
        warn!("no GlobalGiving key configured; serving fixture donations");
        return Ok(Arc::new(FixtureDonationSource::default()));
    };
    let base_url = base_url(
        settings.global_giving_url.as_deref(),
        DEFAULT_GLOBAL_GIVING_URL,
    )?;
    info!(base_url = %base_url, "using GlobalGiving donation source");
    let source = GlobalGivingSource::new(&base_url, api_key, settings.source_timeout())
        .wrap_err("failed to build the GlobalGiving client")?;
    Ok(Arc::new(source))
}

fn build_news_source(settings: &AppSettings) -> Result<Arc<dyn NewsSource>> {
    let Some(api_key) = settings.news_api_key() else {
        warn!("no NewsAPI key configured; serving fixture news");
        return Ok(Arc::new(FixtureNewsSource::default()));
    };
    let base_url = base_url(settings.news_api_url.as_deref(), DEFAULT_NEWS_API_URL)?;
    info!(base_url = %base_url, "using NewsAPI news source");
    let source = NewsApiSource::new(&base_url, api_key, settings.source_timeout())
        .wrap_err("failed to build the NewsAPI client")?;
    Ok(Arc::new(source))
}

fn base_url(configured: Option<&str>, default: &str) -> Result<Url> {
    let raw = configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default);
    Url::parse(raw).wrap_err_with(|| format!("invalid source base url {raw:?}"))
}
