//! Verdict types returned by the verify endpoint.
//!
//! A verdict comes from one of two places. The external provider returns
//! free-form generated text that is passed through untouched, while the local
//! heuristic produces a structured [`HeuristicVerdict`]. The two shapes are
//! deliberately kept apart in [`VerdictResult`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verification sources offered to the caller alongside every heuristic verdict.
pub const SUGGESTED_CHECKS: [&str; 3] = [
    "Check reputable news outlets",
    "Search for primary sources",
    "Use fact-checkers like AltNews/BOOM",
];

/// Outcome label for a piece of content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely True")]
    LikelyTrue,
    #[serde(rename = "Likely Misleading")]
    LikelyMisleading,
    #[serde(rename = "Unverified")]
    Unverified,
    #[serde(rename = "Likely False")]
    LikelyFalse,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyTrue => "Likely True",
            Verdict::LikelyMisleading => "Likely Misleading",
            Verdict::Unverified => "Unverified",
            Verdict::LikelyFalse => "Likely False",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of the local keyword heuristic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicVerdict {
    pub verdict: Verdict,
    /// Final score. Not clamped: heavy keyword matches drive it negative.
    pub confidence: i32,
    pub reasons: Vec<String>,
    pub suggested_checks: Vec<String>,
}

/// Where a verdict came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerdictSource {
    ExternalProvider,
    Heuristic,
}

impl VerdictSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictSource::ExternalProvider => "external_provider",
            VerdictSource::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body of the verify endpoint, tagged by `source`.
///
/// ```json
/// {"source":"external_provider","raw":"..."}
/// {"source":"heuristic","verdict":"Unverified","confidence":50,"reasons":[...],"suggestedChecks":[...]}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum VerdictResult {
    /// Provider output, passed through verbatim with no schema guarantee.
    ExternalProvider { raw: String },
    Heuristic(HeuristicVerdict),
}

impl VerdictResult {
    pub fn source(&self) -> VerdictSource {
        match self {
            VerdictResult::ExternalProvider { .. } => VerdictSource::ExternalProvider,
            VerdictResult::Heuristic(_) => VerdictSource::Heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_labels_match_wire_strings() {
        for verdict in [
            Verdict::LikelyTrue,
            Verdict::LikelyMisleading,
            Verdict::Unverified,
            Verdict::LikelyFalse,
        ] {
            let json = serde_json::to_string(&verdict).unwrap();
            assert_eq!(json, format!("\"{}\"", verdict.as_str()));
        }
    }

    #[test]
    fn heuristic_result_is_flattened_under_source_tag() {
        let result = VerdictResult::Heuristic(HeuristicVerdict {
            verdict: Verdict::Unverified,
            confidence: 50,
            reasons: vec!["Mixed signals; recommend further verification.".into()],
            suggested_checks: SUGGESTED_CHECKS.iter().map(|s| s.to_string()).collect(),
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["source"], "heuristic");
        assert_eq!(json["verdict"], "Unverified");
        assert_eq!(json["confidence"], 50);
        assert_eq!(json["suggestedChecks"].as_array().unwrap().len(), 3);
        assert_eq!(result.source(), VerdictSource::Heuristic);
    }

    #[test]
    fn provider_result_carries_raw_text_only() {
        let result = VerdictResult::ExternalProvider {
            raw: "Likely True, 80".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": "external_provider", "raw": "Likely True, 80"})
        );
    }
}
