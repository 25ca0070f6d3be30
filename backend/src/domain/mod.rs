//! Domain entities, outcomes, and services.
//!
//! Purpose: hold the business rules for issues, events, news and donations
//! independently of HTTP, queue transport, and storage. Services implement
//! the driving ports in [`ports`] and reach storage only through the
//! [`Repositories`] resolver.
//!
//! Public surface:
//! - Entities: [`Issue`], [`Event`], [`NewsItem`], [`Donation`] and the source
//!   records they are built from.
//! - Results: [`Outcome`], [`ApiResult`], [`Error`].
//! - Pipelines: [`Transaction`] and [`Step`].
//! - Services: [`IssueService`], [`NewsService`],
//!   [`DonationIngestionService`], [`DonationQueryService`].

pub mod donation;
pub mod donation_service;
pub mod entity;
pub mod error;
pub mod issue;
pub mod issue_service;
pub mod news;
pub mod news_service;
pub mod outcome;
pub mod ports;
pub mod repositories;
mod service_support;
pub mod trace_id;
pub mod transaction;

pub use self::donation::{Donation, DonationBatch, DonationRecord};
pub use self::donation_service::{
    ADD_DONATIONS_FAILURE, DonationIngestionService, DonationQueryService, IngestionFailure,
};
pub use self::entity::{EntityId, EntityKind, NameValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::issue::{Event, EventName, Issue, IssueName};
pub use self::issue_service::IssueService;
pub use self::news::{NewsArticle, NewsItem};
pub use self::news_service::{ADD_NEWS_FAILURE, NewsService};
pub use self::outcome::{ApiResult, Outcome, SuccessStatus};
pub use self::repositories::{Repositories, RepositoryFor};
pub use self::trace_id::TraceId;
pub use self::transaction::{Step, Then, Transaction};
