//! Queue inbound adapter.
//!
//! The consumer drains a `QueueTransport`, hands each message body to the
//! [`DonationJobHandler`] on its own task, and acknowledges every delivery
//! whatever the outcome. Nothing is reported back to the publisher; failures
//! are only visible in logs.

mod consumer;
mod handler;

pub use consumer::{ConsumerReport, QueueConsumer};
pub use handler::{DonationJobHandler, MessageDisposition};
