// Alert broadcast fan-out. Delivery is chunked with a pause between
// batches to respect downstream limits on the delivery channel; failures
// are isolated per recipient.

use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::SubscriberId;

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("delivery to subscriber {subscriber} failed: {reason}")]
    Delivery {
        subscriber: SubscriberId,
        reason: String,
    },
}

/// Transport seam for alert delivery; the chat layer owns the
/// implementation.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, subscriber: SubscriberId, message: &str) -> Result<(), BroadcastError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub delivered: usize,
    pub failed: usize,
}

pub struct AlertBroadcaster {
    sink: Arc<dyn AlertSink>,
    batch_size: usize,
    batch_pause: Duration,
}

impl AlertBroadcaster {
    pub fn new(sink: Arc<dyn AlertSink>, batch_size: usize, batch_pause: Duration) -> Self {
        Self {
            sink,
            batch_size: batch_size.max(1),
            batch_pause,
        }
    }

    /// Deliver one alert message to every subscriber. A failed delivery is
    /// logged and counted, never aborting the batch or the broadcast.
    pub async fn broadcast(&self, subscribers: &[SubscriberId], message: &str) -> BroadcastOutcome {
        let mut outcome = BroadcastOutcome::default();

        for batch in subscribers.chunks(self.batch_size) {
            let deliveries = batch
                .iter()
                .map(|&subscriber| self.sink.deliver(subscriber, message));

            for result in join_all(deliveries).await {
                match result {
                    Ok(()) => outcome.delivered += 1,
                    Err(err) => {
                        warn!("alert delivery failed: {}", err);
                        outcome.failed += 1;
                    },
                }
            }

            tokio::time::sleep(self.batch_pause).await;
        }

        info!(
            delivered = outcome.delivered,
            failed = outcome.failed,
            "alert broadcast complete"
        );
        outcome
    }
}
