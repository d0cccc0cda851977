// URLhaus adapter: abuse.ch malicious URL database, free JSON API.
// A URL still online is confirmed malicious; a known-but-offline entry
// counts as suspicious.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{error_evidence, evidence_from_value, UrlVerifier, VerifierError};
use crate::models::{Verdict, VerifierResult};

pub const SOURCE: &str = "URLhaus";
pub const DEFAULT_API_URL: &str = "https://urlhaus-api.abuse.ch/v1/url/";

pub struct UrlhausVerifier {
    client: reqwest::Client,
    api_url: String,
}

impl UrlhausVerifier {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    async fn query(&self, url: &str) -> Result<VerifierResult, VerifierError> {
        let form = [("url", url)];
        let response = self.client.post(&self.api_url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(VerifierError::HttpStatus(response.status().as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(map_response(&body))
    }
}

fn map_response(body: &Value) -> VerifierResult {
    let verdict = match body["query_status"].as_str() {
        Some("ok") => match body["url_status"].as_str() {
            Some("online") => Verdict::Phish,
            Some("offline") => Verdict::Suspicious,
            _ => Verdict::Unknown,
        },
        Some("no_results") => Verdict::Clean,
        _ => Verdict::Unknown,
    };

    VerifierResult::new(verdict, SOURCE, evidence_from_value(body.clone()))
}

#[async_trait]
impl UrlVerifier for UrlhausVerifier {
    fn source_name(&self) -> &'static str {
        SOURCE
    }

    async fn check(&self, url: &str) -> VerifierResult {
        match self.query(url).await {
            Ok(result) => result,
            Err(err) => {
                debug!("URLhaus lookup failed for {}: {}", url, err);
                VerifierResult::unknown(SOURCE, error_evidence(&err))
            },
        }
    }
}
