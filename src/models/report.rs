// Report and alert records constructed by the engine, owned by the
// persistence collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::verdict::{Evidence, Verdict};

pub type ReportId = i64;
pub type SubmitterId = i64;
pub type SubscriberId = i64;

/// Persisted record of one URL submission that passed the rate limiter.
/// Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub submitter_id: SubmitterId,
    pub url: String,
    pub domain: String,
    pub verdict: Verdict,
    pub source: String,
    pub evidence: Evidence,
    pub created_at: DateTime<Utc>,
}

/// Report in its insertion form, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewReport {
    pub submitter_id: SubmitterId,
    pub url: String,
    pub domain: String,
    pub verdict: Verdict,
    pub source: String,
    pub evidence: Evidence,
    pub created_at: DateTime<Utc>,
}

/// Marks that a broadcast was issued for a URL; consulted only by the
/// alert deduplicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub url: String,
    pub sent_at: DateTime<Utc>,
}
