//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, external sources, queue) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod donation_queue;
mod donation_repository;
mod donation_source;
mod donations_command;
mod donations_query;
mod event_repository;
mod issue_command;
mod issue_repository;
mod news_command;
mod news_query;
mod news_repository;
mod news_source;
mod queue_transport;
mod repository_error;

#[cfg(test)]
pub use donation_queue::MockDonationQueue;
pub use donation_queue::{DonationJob, DonationQueue, JobDispatchError};
#[cfg(test)]
pub use donation_repository::MockDonationRepository;
pub use donation_repository::DonationRepository;
#[cfg(test)]
pub use donation_source::MockDonationSource;
pub use donation_source::{DonationSource, DonationSourceError, FixtureDonationSource};
#[cfg(test)]
pub use donations_command::MockDonationsCommand;
pub use donations_command::DonationsCommand;
#[cfg(test)]
pub use donations_query::MockDonationsQuery;
pub use donations_query::DonationsQuery;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::EventRepository;
#[cfg(test)]
pub use issue_command::MockIssueCommand;
pub use issue_command::IssueCommand;
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::IssueRepository;
#[cfg(test)]
pub use news_command::MockNewsCommand;
pub use news_command::NewsCommand;
#[cfg(test)]
pub use news_query::MockNewsQuery;
pub use news_query::NewsQuery;
#[cfg(test)]
pub use news_repository::MockNewsRepository;
pub use news_repository::NewsRepository;
#[cfg(test)]
pub use news_source::MockNewsSource;
pub use news_source::{FixtureNewsSource, NewsSource, NewsSourceError};
#[cfg(test)]
pub use queue_transport::MockQueueTransport;
pub use queue_transport::{QueueDelivery, QueueTransport, QueueTransportError};
pub use repository_error::RepositoryError;
