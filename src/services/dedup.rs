// Alert deduplication: suppress repeat broadcasts for the same normalized
// URL within a trailing time window.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::models::AlertRecord;

/// Tracks the most recent alert per URL. Consulted only for alertable
/// verdicts; the caller records an entry immediately after a successful
/// broadcast (at-most-once intent, both halves behind the same mutex).
pub struct AlertDeduplicator {
    window: Duration,
    last_alerts: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl AlertDeduplicator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_alerts: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a broadcast may go out for this exact normalized URL.
    /// False iff one was already recorded within the dedup window.
    pub async fn should_alert(&self, url: &str) -> bool {
        let cutoff = Utc::now() - self.window;
        let mut last_alerts = self.last_alerts.lock().await;
        last_alerts.retain(|_, sent_at| *sent_at >= cutoff);
        !last_alerts.contains_key(url)
    }

    /// Record that an alert went out at the given time
    pub async fn record(&self, record: AlertRecord) {
        self.last_alerts
            .lock()
            .await
            .insert(record.url, record.sent_at);
    }
}
