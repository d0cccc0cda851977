// Verifier adapters for external link-reputation services.
// Each adapter performs one bounded network call per invocation and maps
// the provider response onto the shared verdict vocabulary. The public
// contract is infallible: every failure mode (timeout, non-200, malformed
// payload, missing credential) degrades to an Unknown verdict carrying
// diagnostic evidence, never an error to the caller.

pub mod openphish;
pub mod phishtank;
pub mod safe_browsing;
pub mod urlhaus;

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Evidence, VerifierResult};

pub use openphish::OpenPhishVerifier;
pub use phishtank::PhishTankVerifier;
pub use safe_browsing::SafeBrowsingVerifier;
pub use urlhaus::UrlhausVerifier;

const USER_AGENT: &str = concat!("phishguard/", env!("CARGO_PKG_VERSION"));

/// Internal failure modes of an adapter's query path. Absorbed into an
/// Unknown result before leaving the adapter.
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("unexpected response schema: {0}")]
    UnexpectedSchema(String),
}

/// One external reputation provider
#[async_trait]
pub trait UrlVerifier: Send + Sync {
    /// Stable provider name, used for tie-breaking and report records
    fn source_name(&self) -> &'static str;

    /// Check one normalized URL. Single attempt, no retries; never fails.
    async fn check(&self, url: &str) -> VerifierResult;
}

/// Shared client for all adapters: per-call timeout and explicit user agent
pub fn default_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
}

pub(crate) fn error_evidence(err: &VerifierError) -> Evidence {
    let mut evidence = Evidence::new();
    evidence.insert("error".to_string(), json!(err.to_string()));
    evidence
}

/// Carry a provider payload through as evidence, whatever its shape
pub(crate) fn evidence_from_value(value: Value) -> Evidence {
    match value {
        Value::Object(map) => map,
        other => {
            let mut evidence = Evidence::new();
            evidence.insert("raw".to_string(), other);
            evidence
        },
    }
}
