// Library exports for the phishguard link-reputation engine.
// The engine classifies submitted URLs against external blacklist
// services; chat transport, persistence and broadcast delivery plug in
// through the traits re-exported here.

pub mod app_config;
pub mod models;
pub mod services;
pub mod utils;
pub mod verifiers;

// Re-export commonly used types
pub use app_config::{AppConfig, ConfigError, CONFIG};
pub use models::{
    AlertRecord, Evidence, NewReport, Report, ReportId, SubmitterId, SubscriberId, Verdict,
    VerifierResult,
};
pub use services::{
    AlertBroadcaster, AlertDeduplicator, AlertSink, BroadcastError, BroadcastOutcome, EngineError,
    InMemoryReportStore, ReportStore, ReputationEngine, SlidingWindowLimiter, StoreError,
    SubmissionOutcome, UrlAssessment, VerdictAggregator,
};
pub use utils::url_normalizer::{domain_of, extract_urls, normalize_candidate};
pub use verifiers::{
    default_http_client, OpenPhishVerifier, PhishTankVerifier, SafeBrowsingVerifier, UrlVerifier,
    UrlhausVerifier, VerifierError,
};
