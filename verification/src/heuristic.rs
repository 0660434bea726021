//! Local keyword heuristic.
//!
//! Starts from [`BASE_SCORE`] and subtracts fixed penalties for sensational
//! wording, sensitive topics, and low-trust source domains. The summary reason
//! and the verdict label use different thresholds (40/65 and 45/70); both sets
//! are kept exactly as they are.

use factcheck_types::{HeuristicVerdict, Verdict, SUGGESTED_CHECKS};

pub const BASE_SCORE: i32 = 50;

/// Checked in this order; matching reasons are reported in the same order.
pub const SENSATIONAL_KEYWORDS: [&str; 8] = [
    "miracle", "shocking", "exclusive", "secret", "won", "scam", "urgent", "alert",
];
pub const KEYWORD_PENALTY: i32 = 8;

/// Any match applies [`TOPIC_PENALTY`] once.
pub const SENSITIVE_TOPICS: [&str; 2] = ["coronavirus", "vaccine"];
pub const TOPIC_PENALTY: i32 = 6;

pub const LOW_TRUST_DOMAIN: &str = "facebook.com";
pub const DOMAIN_PENALTY: i32 = 5;

pub const REASON_RED_FLAGS: &str = "Multiple red flags in language and source.";
pub const REASON_NEUTRAL: &str = "Language appears neutral and factual.";
pub const REASON_MIXED: &str = "Mixed signals; recommend further verification.";

/// Score `text` (and optionally its source URL) without any external call.
///
/// Deterministic: identical inputs always produce identical output.
pub fn heuristic_verdict(text: &str, source_url: Option<&str>) -> HeuristicVerdict {
    let lower = text.to_lowercase();
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    for keyword in SENSATIONAL_KEYWORDS {
        if lower.contains(keyword) {
            score -= KEYWORD_PENALTY;
            reasons.push(format!("Contains sensational word: \"{keyword}\""));
        }
    }

    if SENSITIVE_TOPICS.iter().any(|topic| lower.contains(topic)) {
        score -= TOPIC_PENALTY;
    }

    // Domain match is case-sensitive on the raw URL.
    if source_url.is_some_and(|url| url.contains(LOW_TRUST_DOMAIN)) {
        score -= DOMAIN_PENALTY;
    }

    reasons.push(summary_reason(score).to_string());

    HeuristicVerdict {
        verdict: verdict_for_score(score),
        confidence: score,
        reasons,
        suggested_checks: SUGGESTED_CHECKS.iter().map(|s| s.to_string()).collect(),
    }
}

fn summary_reason(score: i32) -> &'static str {
    if score < 40 {
        REASON_RED_FLAGS
    } else if score > 65 {
        REASON_NEUTRAL
    } else {
        REASON_MIXED
    }
}

fn verdict_for_score(score: i32) -> Verdict {
    if score < 45 {
        Verdict::LikelyMisleading
    } else if score > 70 {
        Verdict::LikelyTrue
    } else {
        Verdict::Unverified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensational_cure_is_misleading() {
        let v = heuristic_verdict("SHOCKING miracle cure!", None);
        assert_eq!(v.confidence, 34);
        assert_eq!(v.verdict, Verdict::LikelyMisleading);
        // Keyword-list order, not text order.
        assert_eq!(
            v.reasons,
            [
                "Contains sensational word: \"miracle\"",
                "Contains sensational word: \"shocking\"",
                REASON_RED_FLAGS,
            ]
        );
    }

    #[test]
    fn plain_sentence_is_unverified() {
        let v = heuristic_verdict("The weather today is mild.", None);
        assert_eq!(v.confidence, 50);
        assert_eq!(v.verdict, Verdict::Unverified);
        assert_eq!(v.reasons, [REASON_MIXED]);
    }

    #[test]
    fn every_penalty_stacks() {
        let v = heuristic_verdict(
            "Exclusive secret vaccine alert",
            Some("http://facebook.com/x"),
        );
        assert_eq!(v.confidence, 15);
        assert_eq!(v.verdict, Verdict::LikelyMisleading);
        assert_eq!(v.reasons.len(), 4);
        assert_eq!(v.reasons.last().map(String::as_str), Some(REASON_RED_FLAGS));
    }

    #[test]
    fn topic_penalty_applies_once_for_both_topics() {
        let v = heuristic_verdict("coronavirus vaccine news", None);
        assert_eq!(v.confidence, 44);
        assert_eq!(v.verdict, Verdict::LikelyMisleading);
        assert_eq!(v.reasons, [REASON_MIXED]);
    }

    #[test]
    fn keyword_inside_a_longer_word_still_matches() {
        // "won" is a substring of "wonderful".
        let v = heuristic_verdict("What a wonderful day", None);
        assert_eq!(v.confidence, 42);
        assert_eq!(v.reasons[0], "Contains sensational word: \"won\"");
    }

    #[test]
    fn threshold_gap_between_reason_and_verdict() {
        // 42: not below 40, so mixed signals, but below 45 so misleading.
        let v = heuristic_verdict("won", None);
        assert_eq!(v.confidence, 42);
        assert_eq!(v.verdict, Verdict::LikelyMisleading);
        assert_eq!(v.reasons.last().map(String::as_str), Some(REASON_MIXED));
    }

    #[test]
    fn domain_check_is_case_sensitive() {
        assert_eq!(heuristic_verdict("x", Some("https://FACEBOOK.COM/p")).confidence, 50);
        assert_eq!(heuristic_verdict("x", Some("https://m.facebook.com/p")).confidence, 45);
    }

    #[test]
    fn score_goes_negative_when_everything_matches() {
        let text = SENSATIONAL_KEYWORDS.join(" ") + " coronavirus";
        let v = heuristic_verdict(&text, Some("facebook.com"));
        assert_eq!(v.confidence, 50 - 8 * 8 - 6 - 5);
        assert!(v.confidence < 0);
    }

    #[test]
    fn suggested_checks_are_fixed() {
        let v = heuristic_verdict("anything", None);
        assert_eq!(v.suggested_checks, SUGGESTED_CHECKS);
    }
}
