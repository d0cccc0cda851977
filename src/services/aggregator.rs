// Verdict aggregation: fan out one URL to every configured verifier and
// reduce the results to the single worst-case verdict.

use futures_util::future::join_all;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::{Evidence, VerifierResult};
use crate::verifiers::UrlVerifier;

/// Runs all adapters concurrently and reduces their results by severity.
///
/// The registration order of the verifiers is the tie-break order: when
/// several adapters report the same maximal severity, the first registered
/// one wins.
pub struct VerdictAggregator {
    verifiers: Vec<Arc<dyn UrlVerifier>>,
    call_timeout: Duration,
}

impl VerdictAggregator {
    pub fn new(verifiers: Vec<Arc<dyn UrlVerifier>>, call_timeout: Duration) -> Self {
        Self {
            verifiers,
            call_timeout,
        }
    }

    /// One aggregation round for a normalized URL.
    ///
    /// Wait-all, never fail-fast: a slow or failing adapter becomes an
    /// Unknown result for that source and never aborts the others. An
    /// empty verifier set or an all-Unknown round yields
    /// `(unknown, "none", {})`.
    pub async fn classify(&self, url: &str) -> VerifierResult {
        let call_timeout = self.call_timeout;
        let checks = self.verifiers.iter().map(|verifier| {
            let verifier = Arc::clone(verifier);
            async move {
                match tokio::time::timeout(call_timeout, verifier.check(url)).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(
                            "verifier {} timed out after {:?}",
                            verifier.source_name(),
                            call_timeout
                        );
                        let mut evidence = Evidence::new();
                        evidence.insert("error".to_string(), json!("timeout"));
                        VerifierResult::unknown(verifier.source_name(), evidence)
                    },
                }
            }
        });

        let results = join_all(checks).await;

        let mut aggregate = VerifierResult::none();
        for result in results {
            debug!(source = %result.source, verdict = %result.verdict, url, "verifier result");
            // Strictly-greater keeps the earliest adapter on severity ties
            // and keeps the neutral "none" aggregate for all-Unknown rounds.
            if result.verdict > aggregate.verdict {
                aggregate = result;
            }
        }
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use async_trait::async_trait;

    struct StaticVerifier {
        name: &'static str,
        verdict: Verdict,
        delay: Option<Duration>,
    }

    impl StaticVerifier {
        fn new(name: &'static str, verdict: Verdict) -> Arc<dyn UrlVerifier> {
            Arc::new(Self {
                name,
                verdict,
                delay: None,
            })
        }

        fn slow(name: &'static str, verdict: Verdict, delay: Duration) -> Arc<dyn UrlVerifier> {
            Arc::new(Self {
                name,
                verdict,
                delay: Some(delay),
            })
        }
    }

    #[async_trait]
    impl UrlVerifier for StaticVerifier {
        fn source_name(&self) -> &'static str {
            self.name
        }

        async fn check(&self, _url: &str) -> VerifierResult {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            VerifierResult::new(self.verdict, self.name, Evidence::new())
        }
    }

    fn aggregator(verifiers: Vec<Arc<dyn UrlVerifier>>) -> VerdictAggregator {
        VerdictAggregator::new(verifiers, Duration::from_secs(12))
    }

    #[tokio::test]
    async fn test_all_unknown_yields_none() {
        let agg = aggregator(vec![
            StaticVerifier::new("A", Verdict::Unknown),
            StaticVerifier::new("B", Verdict::Unknown),
            StaticVerifier::new("C", Verdict::Unknown),
        ]);
        let result = agg.classify("http://example.com").await;
        assert_eq!(result.verdict, Verdict::Unknown);
        assert_eq!(result.source, "none");
        assert!(result.evidence.is_empty());
    }

    #[tokio::test]
    async fn test_empty_verifier_set_yields_none() {
        let agg = aggregator(vec![]);
        let result = agg.classify("http://example.com").await;
        assert_eq!(result.source, "none");
    }

    #[tokio::test]
    async fn test_phish_dominates_regardless_of_order() {
        let agg = aggregator(vec![
            StaticVerifier::new("A", Verdict::Clean),
            StaticVerifier::new("B", Verdict::Phish),
            StaticVerifier::new("C", Verdict::Suspicious),
        ]);
        let result = agg.classify("http://example.com").await;
        assert_eq!(result.verdict, Verdict::Phish);
        assert_eq!(result.source, "B");
    }

    #[tokio::test]
    async fn test_mixed_round_picks_worst_case() {
        let agg = aggregator(vec![
            StaticVerifier::new("A", Verdict::Clean),
            StaticVerifier::new("B", Verdict::Suspicious),
            StaticVerifier::new("C", Verdict::Unknown),
        ]);
        let result = agg.classify("http://example.com").await;
        assert_eq!(result.verdict, Verdict::Suspicious);
        assert_eq!(result.source, "B");
    }

    #[tokio::test]
    async fn test_tie_break_by_registration_order() {
        let agg = aggregator(vec![
            StaticVerifier::new("A", Verdict::Suspicious),
            StaticVerifier::new("B", Verdict::Suspicious),
        ]);
        let result = agg.classify("http://example.com").await;
        assert_eq!(result.source, "A");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_adapter_times_out_without_aborting_others() {
        let agg = aggregator(vec![
            StaticVerifier::slow("slow", Verdict::Phish, Duration::from_secs(60)),
            StaticVerifier::new("fast", Verdict::Suspicious),
        ]);
        let result = agg.classify("http://example.com").await;
        // The slow adapter's Phish never lands; its timeout downgrades it
        // to Unknown and the fast adapter's verdict wins.
        assert_eq!(result.verdict, Verdict::Suspicious);
        assert_eq!(result.source, "fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_adapter_finishing_within_timeout_counts() {
        let agg = aggregator(vec![StaticVerifier::slow(
            "slowish",
            Verdict::Phish,
            Duration::from_secs(5),
        )]);
        let result = agg.classify("http://example.com").await;
        assert_eq!(result.verdict, Verdict::Phish);
    }
}
