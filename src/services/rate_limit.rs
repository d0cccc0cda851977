// Per-submitter sliding-window rate limiting for URL submissions.
// Checked synchronously before any verification work is dispatched, so a
// rejected submission costs no network calls.

use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::debug;

use crate::models::SubmitterId;

/// Sliding window of the last N submission timestamps per submitter over
/// a window of W seconds. State lives in process memory only; the mutex
/// keeps the prune-check-append sequence atomic on a multi-threaded
/// runtime.
pub struct SlidingWindowLimiter {
    max_submissions: usize,
    window: Duration,
    windows: Mutex<HashMap<SubmitterId, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_submissions: usize, window: Duration) -> Self {
        Self {
            max_submissions,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns whether the submitter may trigger verification right now.
    /// Accepting records the attempt; rejecting does not.
    pub async fn allow(&self, submitter_id: SubmitterId) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let bucket = windows.entry(submitter_id).or_default();

        while let Some(oldest) = bucket.front() {
            if now.duration_since(*oldest) >= self.window {
                bucket.pop_front();
            } else {
                break;
            }
        }

        if bucket.len() >= self.max_submissions {
            debug!(submitter_id, "submission rejected by rate limiter");
            return false;
        }

        bucket.push_back(now);
        true
    }
}
