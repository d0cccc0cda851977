// Google Safe Browsing adapter: v4 threatMatches lookup over JSON.
// Requires an API key; without one this provider degrades to Unknown.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{error_evidence, UrlVerifier, VerifierError};
use crate::models::{Evidence, Verdict, VerifierResult};

pub const SOURCE: &str = "SafeBrowsing";
pub const DEFAULT_API_URL: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

pub struct SafeBrowsingVerifier {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl SafeBrowsingVerifier {
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
        let payload = json!({
            "client": {
                "clientId": "phishguard",
                "clientVersion": env!("CARGO_PKG_VERSION"),
            },
            "threatInfo": {
                "threatTypes": THREAT_TYPES,
                "platformTypes": ["ANY_PLATFORM"],
                "threatEntryTypes": ["URL"],
                "threatEntries": [{"url": url}],
            },
        });

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(VerifierError::HttpStatus(response.status().as_u16()));
        }
        let body: Value = response.json().await?;
        map_response(&body)
    }
}

/// Safe Browsing returns matches only for confirmed threats; an empty
/// object means the URL is not on any requested list.
fn map_response(body: &Value) -> Result<VerifierResult, VerifierError> {
    let Some(object) = body.as_object() else {
        return Err(VerifierError::UnexpectedSchema(
            "response body is not a JSON object".to_string(),
        ));
    };

    match object.get("matches") {
        Some(Value::Array(matches)) if !matches.is_empty() => {
            let mut evidence = Evidence::new();
            evidence.insert("matches".to_string(), json!(matches));
            Ok(VerifierResult::new(Verdict::Phish, SOURCE, evidence))
        },
        Some(Value::Array(_)) | None => {
            Ok(VerifierResult::new(Verdict::Clean, SOURCE, Evidence::new()))
        },
        Some(other) => Err(VerifierError::UnexpectedSchema(format!(
            "matches field has unexpected type: {}",
            other
        ))),
    }
}

#[async_trait]
impl UrlVerifier for SafeBrowsingVerifier {
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
                debug!("Safe Browsing lookup failed for {}: {}", url, err);
                VerifierResult::unknown(SOURCE, error_evidence(&err))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_phish() {
        let body = json!({
            "matches": [{
                "threatType": "SOCIAL_ENGINEERING",
                "platformType": "ANY_PLATFORM",
                "threat": {"url": "http://evil.example.com/login"}
            }]
        });
        let result = map_response(&body).unwrap();
        assert_eq!(result.verdict, Verdict::Phish);
        assert!(result.evidence.contains_key("matches"));
    }

    #[test]
    fn test_empty_body_is_clean() {
        let result = map_response(&json!({})).unwrap();
        assert_eq!(result.verdict, Verdict::Clean);
        assert!(result.evidence.is_empty());
    }

    #[test]
    fn test_empty_matches_array_is_clean() {
        let result = map_response(&json!({"matches": []})).unwrap();
        assert_eq!(result.verdict, Verdict::Clean);
    }

    #[test]
    fn test_unexpected_schema_is_error() {
        assert!(map_response(&json!("nope")).is_err());
        assert!(map_response(&json!({"matches": "yes"})).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_degrades_to_unknown() {
        let verifier = SafeBrowsingVerifier::new(reqwest::Client::new(), DEFAULT_API_URL, None);
        let result = verifier.check("http://example.com").await;
        assert_eq!(result.verdict, Verdict::Unknown);
        assert_eq!(result.evidence["reason"], json!("no_api_key"));
    }
}
