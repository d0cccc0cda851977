// Services for the phishguard engine: aggregation, gating, alerting and
// the persistence seam.

pub mod aggregator;
pub mod broadcast;
pub mod dedup;
pub mod engine;
pub mod rate_limit;
pub mod report_store;

pub use aggregator::VerdictAggregator;
pub use broadcast::{AlertBroadcaster, AlertSink, BroadcastError, BroadcastOutcome};
pub use dedup::AlertDeduplicator;
pub use engine::{EngineError, ReputationEngine, SubmissionOutcome, UrlAssessment};
pub use rate_limit::SlidingWindowLimiter;
pub use report_store::{InMemoryReportStore, ReportStore, StoreError};
