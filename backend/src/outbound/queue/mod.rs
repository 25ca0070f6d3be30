//! In-process queue adapter.
//!
//! One [`InMemoryQueue`] implements both sides of the donation queue: the
//! `DonationQueue` publisher used by the HTTP adapter and the
//! `QueueTransport` drained by the queue consumer. Deliveries stay in an
//! in-flight ledger until acknowledged.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use crate::domain::ports::{
    DonationJob, DonationQueue, JobDispatchError, QueueDelivery, QueueTransport,
    QueueTransportError,
};

/// Unbounded in-process message channel with acknowledgement tracking.
pub struct InMemoryQueue {
    next_id: AtomicU64,
    sender: Mutex<Option<mpsc::UnboundedSender<QueueDelivery>>>,
    receiver: Mutex<mpsc::UnboundedReceiver<QueueDelivery>>,
    in_flight: Mutex<BTreeMap<u64, QueueDelivery>>,
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryQueue {
    /// Create an open, empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            next_id: AtomicU64::new(1),
            sender: Mutex::new(Some(sender)),
            receiver: Mutex::new(receiver),
            in_flight: Mutex::new(BTreeMap::new()),
        }
    }

    /// Publish an opaque text body and return its delivery id.
    ///
    /// # Errors
    ///
    /// Returns [`JobDispatchError::Unavailable`] once the queue is closed.
    pub async fn publish(&self, body: impl Into<String>) -> Result<u64, JobDispatchError> {
        let sender = self.sender.lock().await;
        let Some(sender) = sender.as_ref() else {
            return Err(JobDispatchError::unavailable("queue is closed"));
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        sender
            .send(QueueDelivery {
                id,
                body: body.into(),
                attempt: 1,
            })
            .map_err(|_| JobDispatchError::unavailable("queue receiver dropped"))?;
        debug!(delivery_id = id, "message published");
        Ok(id)
    }

    /// Stop accepting messages. Already published messages are still
    /// delivered; `receive` answers `None` once they are drained.
    pub async fn close(&self) {
        self.sender.lock().await.take();
    }

    /// Ids of delivered but unacknowledged messages.
    pub async fn in_flight(&self) -> Vec<u64> {
        self.in_flight.lock().await.keys().copied().collect()
    }
}

#[async_trait]
impl DonationQueue for InMemoryQueue {
    async fn enqueue(&self, job: &DonationJob) -> Result<(), JobDispatchError> {
        let body = serde_json::to_string(job)
            .map_err(|err| JobDispatchError::rejected(err.to_string()))?;
        self.publish(body).await.map(|_| ())
    }
}

#[async_trait]
impl QueueTransport for InMemoryQueue {
    async fn receive(&self) -> Option<QueueDelivery> {
        let delivery = self.receiver.lock().await.recv().await?;
        self.in_flight
            .lock()
            .await
            .insert(delivery.id, delivery.clone());
        Some(delivery)
    }

    async fn acknowledge(&self, id: u64) -> Result<(), QueueTransportError> {
        if self.in_flight.lock().await.remove(&id).is_some() {
            Ok(())
        } else {
            warn!(delivery_id = id, "acknowledgement for unknown delivery");
            Err(QueueTransportError::unknown_delivery(id))
        }
    }
}
