// OpenPhish adapter: lookup against the community feed, a plain-text list
// of confirmed phishing URLs. One bounded GET per invocation; the feed is
// not cached.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{error_evidence, UrlVerifier, VerifierError};
use crate::models::{Evidence, Verdict, VerifierResult};

pub const SOURCE: &str = "OpenPhish";
pub const DEFAULT_FEED_URL: &str = "https://openphish.com/feed.txt";

pub struct OpenPhishVerifier {
    client: reqwest::Client,
    feed_url: String,
}

impl OpenPhishVerifier {
    pub fn new(client: reqwest::Client, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
        }
    }

    async fn query(&self, url: &str) -> Result<VerifierResult, VerifierError> {
        let response = self.client.get(&self.feed_url).send().await?;
        if !response.status().is_success() {
            return Err(VerifierError::HttpStatus(response.status().as_u16()));
        }
        let feed = response.text().await?;
        Ok(match_against_feed(url, &feed))
    }
}

/// Feed entries are confirmed phishing URLs, so an exact match is a phish
/// and anything absent from the feed is clean as far as OpenPhish knows.
fn match_against_feed(url: &str, feed: &str) -> VerifierResult {
    let listed = feed.lines().any(|line| line.trim() == url);

    let mut evidence = Evidence::new();
    evidence.insert("listed".to_string(), json!(listed));

    let verdict = if listed { Verdict::Phish } else { Verdict::Clean };
    VerifierResult::new(verdict, SOURCE, evidence)
}

#[async_trait]
impl UrlVerifier for OpenPhishVerifier {
    fn source_name(&self) -> &'static str {
        SOURCE
    }

    async fn check(&self, url: &str) -> VerifierResult {
        match self.query(url).await {
            Ok(result) => result,
            Err(err) => {
                debug!("OpenPhish feed lookup failed for {}: {}", url, err);
                VerifierResult::unknown(SOURCE, error_evidence(&err))
            },
        }
    }
}
