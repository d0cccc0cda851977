// Alert fan-out driven by engine decisions: a flagged submission is
// broadcast to subscribers, recorded, and not re-broadcast within the
// dedup window.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use phishguard_core::{
    AlertBroadcaster, AlertDeduplicator, AlertSink, BroadcastError, Evidence, InMemoryReportStore,
    ReputationEngine, SlidingWindowLimiter, SubmissionOutcome, SubscriberId, UrlVerifier, Verdict,
    VerdictAggregator, VerifierResult,
};

struct PhishVerifier;

#[async_trait]
impl UrlVerifier for PhishVerifier {
    fn source_name(&self) -> &'static str {
        "URLhaus"
    }

    async fn check(&self, _url: &str) -> VerifierResult {
        VerifierResult::new(Verdict::Phish, "URLhaus", Evidence::new())
    }
}

struct CountingSink {
    delivered: Mutex<Vec<SubscriberId>>,
    failing: Vec<SubscriberId>,
}

#[async_trait]
impl AlertSink for CountingSink {
    async fn deliver(&self, subscriber: SubscriberId, _message: &str) -> Result<(), BroadcastError> {
        if self.failing.contains(&subscriber) {
            return Err(BroadcastError::Delivery {
                subscriber,
                reason: "unreachable".to_string(),
            });
        }
        self.delivered.lock().await.push(subscriber);
        Ok(())
    }
}

fn build_engine(store: Arc<InMemoryReportStore>) -> ReputationEngine {
    ReputationEngine::new(
        VerdictAggregator::new(vec![Arc::new(PhishVerifier)], Duration::from_secs(12)),
        SlidingWindowLimiter::new(5, Duration::from_secs(60)),
        AlertDeduplicator::new(chrono::Duration::hours(24)),
        store,
        25,
    )
}

#[tokio::test(start_paused = true)]
async fn test_flagged_submission_is_broadcast_once() {
    let store = Arc::new(InMemoryReportStore::new());
    let engine = build_engine(store);

    let sink = Arc::new(CountingSink {
        delivered: Mutex::new(Vec::new()),
        failing: vec![30],
    });
    let broadcaster = AlertBroadcaster::new(sink.clone(), 25, Duration::from_millis(300));
    let subscribers: Vec<SubscriberId> = (1..=60).collect();

    let url = "http://evil.example.com/login";
    let outcome = engine.submit(9, url, &[]).await.unwrap();
    let assessments = match outcome {
        SubmissionOutcome::Checked(assessments) => assessments,
        other => panic!("expected Checked outcome, got {:?}", other),
    };
    assert!(assessments[0].needs_alert);

    let message = format!(
        "Active phishing detected: {} (source: {})",
        assessments[0].url, assessments[0].result.source
    );
    let broadcast = broadcaster.broadcast(&subscribers, &message).await;
    assert_eq!(broadcast.delivered, 59);
    assert_eq!(broadcast.failed, 1);

    engine.confirm_alert(url).await;

    // A second sighting of the same URL is persisted but not re-flagged.
    let repeat = engine.submit(10, url, &[]).await.unwrap();
    match repeat {
        SubmissionOutcome::Checked(assessments) => assert!(!assessments[0].needs_alert),
        other => panic!("expected Checked outcome, got {:?}", other),
    }
    assert_eq!(sink.delivered.lock().await.len(), 59);
}

#[tokio::test]
async fn test_recent_reports_clamped_to_cap() {
    let store = Arc::new(InMemoryReportStore::new());
    let engine = build_engine(store);

    for submitter in 0..3 {
        engine
            .submit(submitter, &format!("http://s{}.example.com", submitter), &[])
            .await
            .unwrap();
    }

    // A zero limit still returns at least one report; an oversized limit
    // is capped to what exists.
    assert_eq!(engine.recent_reports(0).await.unwrap().len(), 1);
    assert_eq!(engine.recent_reports(100).await.unwrap().len(), 3);
}
