// URL extraction and normalization for user-submitted text.
// Candidates come from structured link spans when the chat layer provides
// them, plus a permissive scheme scan as fallback. Invalid candidates are
// dropped silently; absence from the output is the signal.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use url::{Host, Url};

lazy_static! {
    /// Permissive scan for http(s) candidates in free-form text
    static ref URL_PATTERN: Regex =
        Regex::new(r"(?i)https?://[^\s]+").expect("Invalid URL pattern regex");
}

/// Punctuation commonly wrapped around links in chat messages
const TRAILING_PUNCTUATION: &[char] = &['.', ')', ',', ';', '>', '"', ']', '}'];

/// Clean and validate one raw candidate into a canonical absolute URL.
///
/// Reverses the `example[.]com` defanging convention, strips enclosing
/// punctuation, and assumes `http://` when no scheme is present. Returns
/// `None` for anything that does not parse as an absolute http(s) URL
/// with a plausible host.
pub fn normalize_candidate(raw: &str) -> Option<String> {
    let refanged = raw.trim().replace("[.]", ".");
    let stripped = refanged.trim_end_matches(TRAILING_PUNCTUATION);
    if stripped.is_empty() {
        return None;
    }

    let lower = stripped.to_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        stripped.to_string()
    } else {
        format!("http://{}", stripped)
    };

    let parsed = Url::parse(&candidate).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    match parsed.host() {
        // Bare labels like "localhost-typo" parse fine but are not
        // routable candidates worth reporting on.
        Some(Host::Domain(domain)) => {
            if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
                return None;
            }
        },
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {},
        None => return None,
    }

    Some(candidate)
}

/// Extract the distinct, validated, absolute URLs from a submission.
///
/// Structured link spans are considered first, then the pattern scan over
/// the raw text; duplicates are removed preserving first-seen order.
pub fn extract_urls(text: &str, structured_links: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    let candidates = structured_links
        .iter()
        .map(String::as_str)
        .chain(URL_PATTERN.find_iter(text).map(|m| m.as_str()));

    for raw in candidates {
        if let Some(normalized) = normalize_candidate(raw) {
            if seen.insert(normalized.clone()) {
                urls.push(normalized);
            }
        }
    }

    urls
}

/// Host portion of a normalized URL, for report records
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_default()
}
