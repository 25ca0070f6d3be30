//! Bounded consumer loop for the donation queue.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::{DonationJobHandler, MessageDisposition};
use crate::domain::TraceId;
use crate::domain::ports::{QueueDelivery, QueueTransport};

/// Tally of the deliveries handled by one [`QueueConsumer::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    pub processed: usize,
    pub failed: usize,
    pub malformed: usize,
    /// Handler tasks that panicked or were cancelled.
    pub aborted: usize,
}

impl ConsumerReport {
    /// Total deliveries handled.
    pub fn total(&self) -> usize {
        self.processed + self.failed + self.malformed + self.aborted
    }

    fn record(&mut self, disposition: Option<MessageDisposition>) {
        match disposition {
            Some(MessageDisposition::Processed { .. }) => self.processed += 1,
            Some(MessageDisposition::Failed { .. }) => self.failed += 1,
            Some(MessageDisposition::Malformed { .. }) => self.malformed += 1,
            None => self.aborted += 1,
        }
    }
}

/// Pulls deliveries and runs at most `concurrency` handlers at once.
pub struct QueueConsumer {
    transport: Arc<dyn QueueTransport>,
    handler: Arc<DonationJobHandler>,
    permits: Arc<Semaphore>,
}

impl QueueConsumer {
    /// Create a consumer. A `concurrency` of zero is treated as one.
    pub fn new(
        transport: Arc<dyn QueueTransport>,
        handler: Arc<DonationJobHandler>,
        concurrency: usize,
    ) -> Self {
        Self {
            transport,
            handler,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Consume until the transport closes, then wait for in-flight handlers.
    ///
    /// Every delivery is acknowledged once its handler finishes, including
    /// failed, malformed and panicking ones. Messages are not retried here.
    pub async fn run(&self) -> ConsumerReport {
        let mut report = ConsumerReport::default();
        let mut tasks = JoinSet::new();

        while let Some(delivery) = self.transport.receive().await {
            let Ok(permit) = self.permits.clone().acquire_owned().await else {
                error!("consumer semaphore closed; stopping intake");
                break;
            };
            let handler = self.handler.clone();
            let transport = self.transport.clone();
            tasks.spawn(async move {
                let disposition = process(handler, transport, delivery).await;
                drop(permit);
                disposition
            });

            while let Some(joined) = tasks.try_join_next() {
                report.record(flatten(joined));
            }
        }

        debug!(in_flight = tasks.len(), "transport closed; draining handlers");
        while let Some(joined) = tasks.join_next().await {
            report.record(flatten(joined));
        }
        info!(
            processed = report.processed,
            failed = report.failed,
            malformed = report.malformed,
            aborted = report.aborted,
            "queue consumer stopped"
        );
        report
    }
}

async fn process(
    handler: Arc<DonationJobHandler>,
    transport: Arc<dyn QueueTransport>,
    delivery: QueueDelivery,
) -> Option<MessageDisposition> {
    let trace_id = TraceId::fresh();
    let span = info_span!(
        "queue_message",
        trace_id = %trace_id,
        delivery_id = delivery.id,
        attempt = delivery.attempt
    );
    let body = delivery.body;
    let job = tokio::spawn(
        TraceId::scope(trace_id, async move { handler.handle(&body).await })
            .instrument(span.clone()),
    );
    let disposition = match job.await {
        Ok(disposition) => Some(disposition),
        Err(err) => {
            span.in_scope(|| log_abort(&err));
            None
        }
    };

    if let Err(err) = transport.acknowledge(delivery.id).await {
        span.in_scope(|| warn!(error = %err, "acknowledgement failed"));
    }
    disposition
}

fn log_abort(err: &JoinError) {
    if err.is_panic() {
        error!(error = %err, "donation job handler panicked; message dropped");
    } else {
        warn!(error = %err, "donation job handler cancelled; message dropped");
    }
}

fn flatten(
    joined: Result<Option<MessageDisposition>, JoinError>,
) -> Option<MessageDisposition> {
    joined.unwrap_or_else(|err| {
        log_abort(&err);
        None
    })
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod tests;
