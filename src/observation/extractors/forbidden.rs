//! Forbidden-item extraction: technologies the brief explicitly rules out
//! ("LLM is forbidden", "클라우드 사용 불가", "without internet").
//!
//! Every pattern is scanned over the whole text for all occurrences. The
//! captured token is filtered against a stopword list and a minimum length
//! before synonym normalization, so grammar words and two-letter fragments
//! never surface as forbidden items.

use std::sync::LazyLock;

use regex::Regex;

use super::evidence::format_evidence;
use super::Extractor;
use crate::observation::schema::{ExtractResult, ExtractedValue};

// Ordered phrasing patterns; the parenthetical form first so "(LLM is
// forbidden)" credits LLM rather than a surrounding word.
static FORBIDDEN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\((\w+)\s+(?:is\s+)?forbidden\)",
        r"(?i)(\w+)\s+usage\s+is\s+forbidden",
        r"(?i)(\w+)\s+is\s+forbidden",
        r"(?i)(\w+)\s+forbidden",
        r"(?i)(\w+)\s*(?:사용\s*)?금지",
        r"(?i)(\w+)\s+usage\s+is\s+not\s+allowed",
        r"(?i)(\w+)\s+is\s+not\s+allowed",
        r"(?i)(\w+)\s+not\s+allowed",
        r"(?i)(\w+)\s+(?:사용\s*)?불가",
        r"(?i)without\s+(\w+)",
        r"(?i)(\w+)\s+prohibited",
        r"(?i)(?:don't|do\s+not)\s+use\s+(\w+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("invalid forbidden pattern"))
    .collect()
});

/// Grammar words and catch-all nouns a capture group can pick up; never
/// forbidden items themselves.
const IGNORE_WORDS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "a", "an", "the", "usage", "access", "use",
    "it", "this", "that", "internet", "network",
];

const SYNONYMS: &[(&str, &str)] = &[
    ("llm", "LLM"),
    ("llms", "LLM"),
    ("ai", "AI"),
    ("gpt", "GPT"),
    ("chatgpt", "ChatGPT"),
    ("외부 api", "외부 API"),
    ("external api", "External API"),
    ("cloud", "Cloud"),
    ("클라우드", "Cloud"),
];

pub struct ForbiddenExtractor;

impl Extractor for ForbiddenExtractor {
    fn name(&self) -> &'static str {
        "forbidden"
    }

    fn extract(&self, normalized: &str, _sentences: &[String]) -> Option<ExtractResult> {
        let mut items: Vec<String> = Vec::new();
        let mut evidence_parts: Vec<String> = Vec::new();

        for pattern in FORBIDDEN_PATTERNS.iter() {
            for caps in pattern.captures_iter(normalized) {
                let Some(item) = normalize_item(caps[1].trim()) else {
                    continue;
                };
                if !items.contains(&item) {
                    items.push(item);
                    evidence_parts.push(caps[0].trim().to_string());
                }
            }
        }

        if items.is_empty() {
            return None;
        }

        Some(ExtractResult {
            value: ExtractedValue::List(items),
            confidence: 0.9,
            evidence: format_evidence(&evidence_parts.join(" | ")),
            extractor: self.name().to_string(),
        })
    }
}

fn normalize_item(item: &str) -> Option<String> {
    let lower = item.to_lowercase();
    let lower = lower.trim();
    if IGNORE_WORDS.contains(&lower) {
        return None;
    }
    if lower.chars().count() <= 2 {
        return None;
    }
    if let Some((_, canonical)) = SYNONYMS.iter().find(|(k, _)| *k == lower) {
        return Some((*canonical).to_string());
    }
    Some(item.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::normalizer::normalize;

    fn extract(text: &str) -> Option<ExtractResult> {
        let norm = normalize(text);
        ForbiddenExtractor.extract(&norm.normalized, &norm.sentences)
    }

    fn items(text: &str) -> Vec<String> {
        match extract(text).map(|r| r.value) {
            Some(ExtractedValue::List(list)) => list,
            None => Vec::new(),
            Some(other) => panic!("expected forbidden list, got {other:?}"),
        }
    }

    #[test]
    fn parenthetical_form() {
        assert_eq!(items("rule-based analysis (LLM is forbidden)"), vec!["LLM"]);
    }

    #[test]
    fn is_forbidden_form() {
        assert_eq!(items("GPT is forbidden in this project"), vec!["GPT"]);
    }

    #[test]
    fn korean_prohibition() {
        assert_eq!(items("클라우드 사용 금지입니다"), vec!["Cloud"]);
    }

    #[test]
    fn korean_bulga() {
        assert_eq!(items("chatgpt 사용 불가"), vec!["ChatGPT"]);
    }

    #[test]
    fn stopword_captures_dropped() {
        // "without internet" captures a stopword; nothing survives the
        // filter.
        assert!(extract("works without internet").is_none());
    }

    #[test]
    fn two_letter_captures_dropped() {
        // "ai"-style two-letter tokens are filtered before synonym lookup.
        assert!(extract("ai 금지").is_none());
    }

    #[test]
    fn dont_use_form() {
        assert_eq!(items("don't use cloud services"), vec!["Cloud"]);
    }

    #[test]
    fn dedup_across_patterns() {
        // "llm 금지" and "LLM is forbidden" normalize to the same item.
        assert_eq!(items("llm 금지, LLM is forbidden"), vec!["LLM"]);
    }

    #[test]
    fn unknown_token_kept_verbatim() {
        assert_eq!(items("selenium is forbidden"), vec!["selenium"]);
    }

    #[test]
    fn evidence_joins_occurrences() {
        let r = extract("LLM is forbidden. cloud 사용 불가").unwrap();
        assert_eq!(r.value, ExtractedValue::List(vec!["LLM".into(), "Cloud".into()]));
        assert!(r.evidence.contains("LLM is forbidden"));
        assert!(r.evidence.contains(" | "));
    }

    #[test]
    fn no_prohibition_is_absent() {
        assert!(extract("자유롭게 기술을 선택해도 됩니다").is_none());
    }
}
