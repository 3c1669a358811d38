//! Language/framework stack extraction. Unlike platform detection this
//! collects every mentioned technology into an ordered, deduplicated list.
//!
//! Presence tests vary by keyword shape: names carrying `#`, `+` or `.`
//! cannot be bounded by `\b` and use plain substring containment, Korean
//! names likewise, while plain Latin names require word boundaries so "py"
//! never fires inside an unrelated token.

use std::sync::LazyLock;

use regex::Regex;

use super::platform::keyword_evidence;
use super::Extractor;
use crate::observation::schema::{ExtractResult, ExtractedValue};

// Ordered keyword → canonical name table; scan order fixes output order.
const STACK_TABLE: &[(&str, &str)] = &[
    ("python", "Python"),
    ("파이썬", "Python"),
    ("py", "Python"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("c샵", "C#"),
    ("c++", "C++"),
    ("cpp", "C++"),
    ("c언어", "C"),
    ("java", "Java"),
    ("자바", "Java"),
    ("javascript", "JavaScript"),
    ("js", "JavaScript"),
    ("자바스크립트", "JavaScript"),
    ("typescript", "TypeScript"),
    ("ts", "TypeScript"),
    ("golang", "Go"),
    ("go", "Go"),
    ("rust", "Rust"),
    ("러스트", "Rust"),
    ("ruby", "Ruby"),
    ("루비", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kotlin", "Kotlin"),
    ("코틀린", "Kotlin"),
    ("react", "React"),
    ("리액트", "React"),
    ("node.js", "Node.js"),
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    (".net", ".NET"),
    ("dotnet", ".NET"),
];

// "Python only" style single-stack declarations, checked before the table
// scan so their richer evidence is kept.
static ONLY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\w+)\s+only\b").expect("invalid only pattern"));

pub struct StackExtractor;

impl Extractor for StackExtractor {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn extract(&self, normalized: &str, _sentences: &[String]) -> Option<ExtractResult> {
        let mut found: Vec<String> = Vec::new();
        let mut evidence_parts: Vec<String> = Vec::new();
        let text_lower = normalized.to_lowercase();

        if let Some(caps) = ONLY_PATTERN.captures(normalized) {
            let candidate = caps[1].to_lowercase();
            if let Some(stack) = canonical_stack(&candidate) {
                found.push(stack.to_string());
                evidence_parts.push(caps[0].to_string());
            }
        }

        for (keyword, stack) in STACK_TABLE {
            if found.iter().any(|s| s == stack) {
                continue;
            }
            if keyword_present(keyword, &text_lower, normalized) {
                found.push(stack.to_string());
                evidence_parts.push(keyword_evidence(keyword, normalized));
            }
        }

        if found.is_empty() {
            return None;
        }

        Some(ExtractResult {
            value: ExtractedValue::List(found),
            confidence: 0.9,
            evidence: evidence_parts.join(", "),
            extractor: self.name().to_string(),
        })
    }
}

fn canonical_stack(candidate: &str) -> Option<&'static str> {
    STACK_TABLE
        .iter()
        .find(|(keyword, _)| *keyword == candidate)
        .map(|(_, stack)| *stack)
}

fn keyword_present(keyword: &str, text_lower: &str, original: &str) -> bool {
    if keyword.contains(['#', '+', '.']) {
        return text_lower.contains(keyword);
    }
    if keyword.chars().any(|c| ('가'..='힣').contains(&c)) {
        return text_lower.contains(keyword);
    }
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))) {
        Ok(re) => re.is_match(original),
        Err(_) => false,
    }
}
