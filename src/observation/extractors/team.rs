//! Team size extraction: single counts ("인원은 5명", "team of 5") and
//! ranges ("2~3명", "2 to 3 people").
//!
//! Range patterns run first so "2~3명" never collapses to a single number.
//! Partial-allocation phrasing ("담당 1명", "1명 포함") is about staffing a
//! slice of the work, not the team, and suppresses single-value extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::Extractor;
use crate::observation::schema::{ExtractResult, ExtractedValue};

const MAX_TEAM_SIZE: u32 = 1000;

/// Words whose presence nearby makes a bare number more likely to be a head
/// count. Any hit adds a flat confidence bonus.
const CONTEXT_KEYWORDS: &[&str] = &[
    "팀", "team", "인원", "인력", "개발자", "developer", "engineer", "member", "people", "ppl",
    "명",
];

// Range patterns, most specific first, with their base confidences.
static RANGE_PATTERNS: LazyLock<Vec<(Regex, f32)>> = LazyLock::new(|| {
    [
        (r"인원[은이가]?\s*(\d+)\s*[~\-]\s*(\d+)\s*명", 0.95),
        (r"팀[은이가]?\s*(\d+)\s*[~\-]\s*(\d+)\s*명", 0.95),
        (r"(\d+)\s*[~\-]\s*(\d+)\s*명", 0.85),
        (
            r"(?i)(\d+)\s*(?:to|~|\-)\s*(\d+)\s*(?:people|persons?|developers?|engineers?|members?|ppl)",
            0.9,
        ),
        (r"(?i)team\s+(?:size|of)\s+(\d+)\s*[~\-]\s*(\d+)", 0.9),
        (r"(?i)team\s+is\s+(\d+)\s*[~\-]\s*(\d+)", 0.8),
    ]
    .into_iter()
    .map(|(pattern, confidence)| {
        (
            Regex::new(pattern).expect("invalid team range pattern"),
            confidence,
        )
    })
    .collect()
});

// Single-value patterns; the bare "N명" form is handled separately with
// explicit context guards.
static SINGLE_PATTERNS: LazyLock<Vec<(Regex, f32)>> = LazyLock::new(|| {
    [
        (r"인원[은이가]?\s*(\d+)\s*명", 0.95),
        (r"팀[은이가]?\s*(\d+)\s*명", 0.95),
        (r"개발자[는은이가]?\s*(\d+)\s*명", 0.9),
        (r"(?i)team\s+of\s+(\d+)", 0.9),
        (r"(?i)team\s+size\s+(?:will\s+be\s+|is\s+)?(\d+)", 0.95),
        (
            r"(?i)(\d+)\s*(?:developers?|engineers?|members?|people|persons?)",
            0.85,
        ),
        (r"(?i)(\d+)\s*ppl", 0.85),
        (r"(\d+)\s*명\s*(?:이고|정도|으로|이서|이라)", 0.8),
    ]
    .into_iter()
    .map(|(pattern, confidence)| {
        (
            Regex::new(pattern).expect("invalid team size pattern"),
            confidence,
        )
    })
    .collect()
});

static SIMPLE_MYUNG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*명").expect("invalid bare count pattern"));

static EXCLUSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"담당\s*\d+\s*명", r"\d+\s*명\s*(?:포함|투입|배정|배치)"]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("invalid team exclusion pattern"))
        .collect()
});

pub struct TeamSizeExtractor;

impl Extractor for TeamSizeExtractor {
    fn name(&self) -> &'static str {
        "team_size"
    }

    fn extract(&self, normalized: &str, sentences: &[String]) -> Option<ExtractResult> {
        if let Some(result) = self.extract_from_text(normalized) {
            return Some(result);
        }
        for sentence in sentences {
            if let Some(result) = self.extract_from_text(sentence) {
                return Some(result);
            }
        }
        None
    }
}

impl TeamSizeExtractor {
    fn extract_from_text(&self, text: &str) -> Option<ExtractResult> {
        for (pattern, base) in RANGE_PATTERNS.iter() {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let (Ok(min), Ok(max)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
                continue;
            };
            if !valid_range(min, max) {
                continue;
            }
            return Some(ExtractResult {
                value: ExtractedValue::Range { min, max },
                confidence: with_context_bonus(*base, text),
                evidence: caps[0].to_string(),
                extractor: self.name().to_string(),
            });
        }

        if EXCLUSION_PATTERNS.iter().any(|p| p.is_match(text)) {
            return None;
        }

        for (pattern, base) in SINGLE_PATTERNS.iter() {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let Ok(size) = caps[1].parse::<u32>() else {
                continue;
            };
            if !(1..=MAX_TEAM_SIZE).contains(&size) {
                continue;
            }
            return Some(ExtractResult {
                value: ExtractedValue::Int(size),
                confidence: with_context_bonus(*base, text),
                evidence: caps[0].to_string(),
                extractor: self.name().to_string(),
            });
        }

        self.extract_simple_myung(text)
    }

    /// Bare "N명" with no surrounding cue word. Low confidence, and rejected
    /// outright when the context says time unit ("3명... 개월"? no — "2명주"),
    /// partial allocation, or a leading "담당".
    fn extract_simple_myung(&self, text: &str) -> Option<ExtractResult> {
        for caps in SIMPLE_MYUNG.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if !simple_myung_allowed(text, whole.start(), whole.end()) {
                continue;
            }
            let Ok(size) = caps[1].parse::<u32>() else {
                continue;
            };
            if !(1..=MAX_TEAM_SIZE).contains(&size) {
                continue;
            }
            return Some(ExtractResult {
                value: ExtractedValue::Int(size),
                confidence: with_context_bonus(0.6, text),
                evidence: whole.as_str().to_string(),
                extractor: self.name().to_string(),
            });
        }
        None
    }
}

fn simple_myung_allowed(text: &str, start: usize, end: usize) -> bool {
    let before = &text[..start];
    if before.ends_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    // "담당 1명" is a per-role allocation.
    let mut chars = before.chars().rev();
    if let Some(last) = chars.next() {
        if last.is_whitespace() && before[..before.len() - last.len_utf8()].ends_with("담당") {
            return false;
        }
    }

    let after = &text[end..];
    let after_trimmed = after.trim_start();
    for unit in ["개월", "달", "주", "일", "년"] {
        if after_trimmed.starts_with(unit) {
            return false;
        }
    }
    // Rest of the same line mentioning 포함 marks partial staffing.
    let rest_of_line = after.split('\n').next().unwrap_or("");
    if rest_of_line.contains("포함") {
        return false;
    }
    true
}

fn valid_range(min: u32, max: u32) -> bool {
    min >= 1 && min <= max && max <= MAX_TEAM_SIZE
}

fn with_context_bonus(base: f32, text: &str) -> f32 {
    let lower = text.to_lowercase();
    let bonus = if CONTEXT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        0.1
    } else {
        0.0
    };
    (base + bonus).min(1.0)
}
