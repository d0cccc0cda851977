// Reputation engine: the seam between the chat/persistence/broadcast
// collaborators and the classification pipeline. One instance per
// process, with all collaborators injected.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::app_config::AppConfig;
use crate::models::{
    AlertRecord, NewReport, Report, ReportId, SubmitterId, VerifierResult,
};
use crate::services::aggregator::VerdictAggregator;
use crate::services::dedup::AlertDeduplicator;
use crate::services::rate_limit::SlidingWindowLimiter;
use crate::services::report_store::{ReportStore, StoreError};
use crate::utils::url_normalizer::{domain_of, extract_urls};
use crate::verifiers::{
    default_http_client, OpenPhishVerifier, PhishTankVerifier, SafeBrowsingVerifier, UrlVerifier,
    UrlhausVerifier,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("report store error: {0}")]
    Store(#[from] StoreError),
}

/// Assessment of one submitted URL after an aggregation round
#[derive(Debug, Clone)]
pub struct UrlAssessment {
    pub report_id: ReportId,
    pub url: String,
    pub domain: String,
    pub result: VerifierResult,
    /// Verdict is alertable and no broadcast went out for this URL within
    /// the dedup window. The caller broadcasts and then confirms.
    pub needs_alert: bool,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Submitter exceeded the sliding-window limit; nothing was verified
    /// and nothing was persisted.
    RateLimited,
    /// No valid URLs could be extracted from the submission
    NoValidUrls,
    Checked(Vec<UrlAssessment>),
}

pub struct ReputationEngine {
    aggregator: VerdictAggregator,
    rate_limiter: SlidingWindowLimiter,
    dedup: AlertDeduplicator,
    store: Arc<dyn ReportStore>,
    max_recent: usize,
}

impl ReputationEngine {
    pub fn new(
        aggregator: VerdictAggregator,
        rate_limiter: SlidingWindowLimiter,
        dedup: AlertDeduplicator,
        store: Arc<dyn ReportStore>,
        max_recent: usize,
    ) -> Self {
        Self {
            aggregator,
            rate_limiter,
            dedup,
            store,
            max_recent,
        }
    }

    /// Engine with the full provider set, wired from configuration
    pub fn from_config(config: &AppConfig, store: Arc<dyn ReportStore>) -> Self {
        let call_timeout = Duration::from_secs(config.verifier_timeout_seconds);
        let client = default_http_client(call_timeout);

        // Registration order doubles as the tie-break order on equal
        // severity, so it stays fixed here.
        let verifiers: Vec<Arc<dyn UrlVerifier>> = vec![
            Arc::new(PhishTankVerifier::new(
                client.clone(),
                config.phishtank_api_url.clone(),
                config.phishtank_api_key.clone(),
            )),
            Arc::new(UrlhausVerifier::new(
                client.clone(),
                config.urlhaus_api_url.clone(),
            )),
            Arc::new(OpenPhishVerifier::new(
                client.clone(),
                config.openphish_feed_url.clone(),
            )),
            Arc::new(SafeBrowsingVerifier::new(
                client,
                config.safe_browsing_api_url.clone(),
                config.safe_browsing_api_key.clone(),
            )),
        ];

        Self::new(
            VerdictAggregator::new(verifiers, call_timeout),
            SlidingWindowLimiter::new(
                config.user_rate_limit_n as usize,
                Duration::from_secs(config.user_rate_limit_window),
            ),
            AlertDeduplicator::new(chrono::Duration::hours(
                config.alert_dedup_window_hours as i64,
            )),
            store,
            config.max_recent,
        )
    }

    /// Verify a single URL without rate limiting, persistence or alert
    /// bookkeeping.
    pub async fn classify(&self, url: &str) -> VerifierResult {
        self.aggregator.classify(url).await
    }

    /// Full submission path: extract URLs, gate on the rate limiter, then
    /// classify and persist each URL and decide which ones need an alert.
    pub async fn submit(
        &self,
        submitter_id: SubmitterId,
        text: &str,
        structured_links: &[String],
    ) -> Result<SubmissionOutcome, EngineError> {
        let urls = extract_urls(text, structured_links);
        if urls.is_empty() {
            return Ok(SubmissionOutcome::NoValidUrls);
        }

        if !self.rate_limiter.allow(submitter_id).await {
            info!(submitter_id, "submission rate limited");
            return Ok(SubmissionOutcome::RateLimited);
        }

        let mut assessments = Vec::with_capacity(urls.len());
        for url in urls {
            let result = self.aggregator.classify(&url).await;
            let domain = domain_of(&url);

            let report_id = self
                .store
                .save_report(NewReport {
                    submitter_id,
                    url: url.clone(),
                    domain: domain.clone(),
                    verdict: result.verdict,
                    source: result.source.clone(),
                    evidence: result.evidence.clone(),
                    created_at: Utc::now(),
                })
                .await?;

            let needs_alert =
                result.verdict.is_alertable() && self.dedup.should_alert(&url).await;
            if needs_alert {
                info!(url = %url, verdict = %result.verdict, source = %result.source,
                    "submission flagged for community alert");
            }

            assessments.push(UrlAssessment {
                report_id,
                url,
                domain,
                result,
                needs_alert,
            });
        }

        Ok(SubmissionOutcome::Checked(assessments))
    }

    /// Record that an alert went out for a URL, suppressing repeats for
    /// the dedup window. Called after the broadcast succeeds.
    pub async fn confirm_alert(&self, url: &str) {
        self.dedup
            .record(AlertRecord {
                url: url.to_string(),
                sent_at: Utc::now(),
            })
            .await;
    }

    /// Read path for the most recent reports, capped by configuration
    pub async fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, EngineError> {
        let limit = limit.clamp(1, self.max_recent);
        Ok(self.store.recent_reports(limit).await?)
    }
}
