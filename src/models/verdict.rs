// Verdict vocabulary shared by every verifier adapter and the aggregator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unstructured provider-specific diagnostic data attached to a result.
/// The aggregator carries it through without interpreting it.
pub type Evidence = serde_json::Map<String, serde_json::Value>;

/// Classification outcome for a URL.
///
/// Variant order is load-bearing: aggregation reduces a result set to the
/// maximum-severity verdict, so `Clean < Unknown < Suspicious < Phish`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Clean,
    Unknown,
    Suspicious,
    Phish,
}

impl Verdict {
    /// Whether this verdict warrants a community alert
    pub fn is_alertable(self) -> bool {
        matches!(self, Verdict::Suspicious | Verdict::Phish)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Clean => "clean",
            Verdict::Unknown => "unknown",
            Verdict::Suspicious => "suspicious",
            Verdict::Phish => "phish",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(Verdict::Clean),
            "unknown" => Ok(Verdict::Unknown),
            "suspicious" => Ok(Verdict::Suspicious),
            "phish" => Ok(Verdict::Phish),
            other => Err(format!("unrecognized verdict: {}", other)),
        }
    }
}

/// Outcome of one adapter invocation. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierResult {
    pub verdict: Verdict,
    pub source: String,
    pub evidence: Evidence,
}

impl VerifierResult {
    pub fn new(verdict: Verdict, source: impl Into<String>, evidence: Evidence) -> Self {
        Self {
            verdict,
            source: source.into(),
            evidence,
        }
    }

    /// Degraded result for any adapter failure mode
    pub fn unknown(source: impl Into<String>, evidence: Evidence) -> Self {
        Self::new(Verdict::Unknown, source, evidence)
    }

    /// Neutral aggregate used when no adapter produced a usable result
    pub fn none() -> Self {
        Self::new(Verdict::Unknown, "none", Evidence::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Verdict::Clean < Verdict::Unknown);
        assert!(Verdict::Unknown < Verdict::Suspicious);
        assert!(Verdict::Suspicious < Verdict::Phish);

        let max = [Verdict::Suspicious, Verdict::Phish, Verdict::Clean]
            .into_iter()
            .max()
            .unwrap();
        assert_eq!(max, Verdict::Phish);
    }

    #[test]
    fn test_alertable_verdicts() {
        assert!(Verdict::Phish.is_alertable());
        assert!(Verdict::Suspicious.is_alertable());
        assert!(!Verdict::Clean.is_alertable());
        assert!(!Verdict::Unknown.is_alertable());
    }

    #[test]
    fn test_serde_lowercase_round_trip() {
        let json = serde_json::to_string(&Verdict::Suspicious).unwrap();
        assert_eq!(json, "\"suspicious\"");
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Verdict::Suspicious);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("PHISH".parse::<Verdict>().unwrap(), Verdict::Phish);
        assert!("malware".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_none_result_shape() {
        let none = VerifierResult::none();
        assert_eq!(none.verdict, Verdict::Unknown);
        assert_eq!(none.source, "none");
        assert!(none.evidence.is_empty());
    }
}
