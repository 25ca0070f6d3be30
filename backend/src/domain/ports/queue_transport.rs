//! Consumer side of an at-least-once message channel.
//!
//! The transport hands out opaque text bodies one at a time. A delivery stays
//! in flight until it is acknowledged; redelivery of unacknowledged messages
//! is the transport's business.

use async_trait::async_trait;

use super::define_port_error;

/// One message handed to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDelivery {
    /// Transport-assigned identifier used for acknowledgement.
    pub id: u64,
    /// Opaque message body.
    pub body: String,
    /// Delivery attempt, starting at 1.
    pub attempt: u32,
}

define_port_error! {
    /// Errors surfaced by the queue transport.
    pub enum QueueTransportError {
        /// Transport infrastructure is unavailable.
        Unavailable { message: String } => "queue transport is unavailable: {message}",
        /// The delivery is not in flight.
        UnknownDelivery { id: u64 } => "delivery {id} is not in flight",
    }
}

/// Source of deliveries for the queue entry point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// Wait for the next delivery. `None` once the transport is closed and
    /// drained.
    async fn receive(&self) -> Option<QueueDelivery>;

    /// Mark a delivery as handled so it is not redelivered.
    async fn acknowledge(&self, id: u64) -> Result<(), QueueTransportError>;
}
