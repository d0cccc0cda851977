// PhishTank adapter: community-reported phishing database.
// Classic check API takes a form-urlencoded POST and needs an app key;
// without one this provider degrades to Unknown.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{error_evidence, evidence_from_value, UrlVerifier, VerifierError};
use crate::models::{Evidence, Verdict, VerifierResult};

pub const SOURCE: &str = "PhishTank";
pub const DEFAULT_API_URL: &str = "https://checkurl.phishtank.com/checkurl/";

pub struct PhishTankVerifier {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl PhishTankVerifier {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    async fn query(&self, url: &str, api_key: &str) -> Result<VerifierResult, VerifierError> {
        let form = [("format", "json"), ("app_key", api_key), ("url", url)];
        let response = self.client.post(&self.api_url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(VerifierError::HttpStatus(response.status().as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(map_response(&body))
    }
}

/// In-database and verified valid means a live phish; in-database but not
/// (yet) verified counts as suspicious; anything else is clean.
fn map_response(body: &Value) -> VerifierResult {
    let results = &body["results"];
    let in_database = results["in_database"].as_bool().unwrap_or(false);
    let valid = results["valid"].as_bool().unwrap_or(false);

    let verdict = if in_database && valid {
        Verdict::Phish
    } else if in_database {
        Verdict::Suspicious
    } else {
        Verdict::Clean
    };

    VerifierResult::new(verdict, SOURCE, evidence_from_value(results.clone()))
}

#[async_trait]
impl UrlVerifier for PhishTankVerifier {
    fn source_name(&self) -> &'static str {
        SOURCE
    }

    async fn check(&self, url: &str) -> VerifierResult {
        let Some(api_key) = self.api_key.as_deref() else {
            let mut evidence = Evidence::new();
            evidence.insert("reason".to_string(), json!("no_api_key"));
            return VerifierResult::unknown(SOURCE, evidence);
        };

        match self.query(url, api_key).await {
            Ok(result) => result,
            Err(err) => {
                debug!("PhishTank lookup failed for {}: {}", url, err);
                VerifierResult::unknown(SOURCE, error_evidence(&err))
            },
        }
    }
}
