//! Repository resolver.
//!
//! Maps each persistable entity kind to the single repository responsible
//! for it. The mapping is closed and static: every kind implements
//! [`RepositoryFor`] exactly once, so asking for a kind without a registered
//! repository does not compile.

use std::sync::Arc;

use super::ports::{DonationRepository, EventRepository, IssueRepository, NewsRepository};
use super::{Donation, DonationRecord, EntityKind, Event, Issue, NewsArticle, NewsItem};

/// One repository per entity kind.
#[derive(Clone)]
pub struct Repositories {
    issues: Arc<dyn IssueRepository>,
    events: Arc<dyn EventRepository>,
    news: Arc<dyn NewsRepository>,
    donations: Arc<dyn DonationRepository>,
}

impl Repositories {
    /// Register the repository of every kind.
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        events: Arc<dyn EventRepository>,
        news: Arc<dyn NewsRepository>,
        donations: Arc<dyn DonationRepository>,
    ) -> Self {
        Self {
            issues,
            events,
            news,
            donations,
        }
    }

    /// Register one store that implements every repository port.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: IssueRepository + EventRepository + NewsRepository + DonationRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Resolve by kind tag.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use floofloo::domain::{Event, Repositories};
    /// use floofloo::outbound::persistence::InMemoryStore;
    ///
    /// let repositories = Repositories::from_store(Arc::new(InMemoryStore::default()));
    /// let _events = repositories.for_kind::<Event>();
    /// ```
    pub fn for_kind<E: RepositoryFor>(&self) -> &E::Repository {
        E::select(self)
    }

    /// Resolve by instance.
    pub fn for_entity<E: RepositoryFor>(&self, _entity: &E) -> &E::Repository {
        E::select(self)
    }

    /// Kind tag of an instance.
    pub fn kind_of<E: RepositoryFor>(_entity: &E) -> EntityKind {
        E::KIND
    }
}

/// Registration of an entity type with its repository.
pub trait RepositoryFor {
    /// Kind tag carried by the type.
    const KIND: EntityKind;

    /// Port persisting this kind.
    type Repository: ?Sized + Send + Sync;

    /// Pick the registered repository.
    fn select(repositories: &Repositories) -> &Self::Repository;
}

macro_rules! register {
    ($($entity:ty => $kind:ident, $field:ident: $port:ty;)*) => {
        $(
            impl RepositoryFor for $entity {
                const KIND: EntityKind = EntityKind::$kind;
                type Repository = $port;

                fn select(repositories: &Repositories) -> &Self::Repository {
                    &*repositories.$field
                }
            }
        )*
    };
}

register! {
    Issue => Issue, issues: dyn IssueRepository;
    Event => Event, events: dyn EventRepository;
    NewsItem => News, news: dyn NewsRepository;
    NewsArticle => News, news: dyn NewsRepository;
    Donation => Donation, donations: dyn DonationRepository;
    DonationRecord => Donation, donations: dyn DonationRepository;
}
