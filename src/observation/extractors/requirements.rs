//! Requirements extraction: turns "Must have" / "Nice to have" enumerations
//! into discrete item lists instead of raw sentences.
//!
//! Each section family (must / nice) has its own starter patterns, Korean and
//! English. Every starter occurrence is processed, not just the first; the
//! captured span ends at the nearest section terminator, opposite-family
//! starter, same-family starter, or in-line closing clause. Items from all
//! occurrences of a family are merged with first-seen dedup.

use std::sync::LazyLock;

use regex::Regex;

use super::evidence::format_evidence;
use super::Extractor;
use crate::observation::schema::{ExtractResult, ExtractedValue, RequirementsResult};

/// Items longer than this read as whole sentences, not enumeration entries.
const MAX_ITEM_CHARS: usize = 60;

// Section boundaries; content past these belongs to another section.
static SECTION_TERMINATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\n\s*-\s",
        r"(?i)\nConstraints?:",
        r"(?i)\nNice\s+to\s+have:",
        r"(?i)\nMust\s+have:",
        r"(?i)\nteam\b",
        r"(?i)\ntimeline\b",
        r"\n제약",
        r"\n선택",
        r"\n필수",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("invalid section terminator pattern"))
    .collect()
});

static MUST_HAVE_STARTERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "Must have: X, Y, Z."
        r"(?i)must[\s\-]?have\s*:",
        // "Must have features are X and Y"
        r"(?i)must[\s\-]?have\s+(?:features?|requirements?)\s+(?:is|are)",
        // "Must have 기능은 ..."
        r"(?i)must[\s\-]?have[^\n:]*?(?:는|은|기능은)",
        // "Core requirement is ..."
        r"(?i)core\s+requirements?\s+(?:is|are)",
        // "필수 기능:" / "필수:"
        r"필수(?:\s*기능)?[은는]?\s*[:：]?",
        // "핵심 기능은 ..."
        r"핵심\s*기능[은는]?\s*[:：]?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("invalid must-have starter pattern"))
    .collect()
});

static NICE_TO_HAVE_STARTERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "Nice to have: X, Y."
        r"(?i)nice[\s\-]?to[\s\-]?have\s*:",
        // "Nice to have로는 ..."
        r"(?i)nice[\s\-]?to[\s\-]?have[^\n:]*?(?:로는|로|는|은)",
        // "Nice features include ..."
        r"(?i)nice\s+features?\s+includes?",
        // "Optional: ..."
        r"(?i)optional\s*[:：]",
        // "있으면 좋은 기능 ..."
        r"있으면\s*좋[은겠]?\s*(?:기능)?[은는]?\s*[:：]?",
        // "선택 기능:" / "선택:"
        r"선택(?:\s*기능)?[은는]?\s*[:：]?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("invalid nice-to-have starter pattern"))
    .collect()
});

// Enumeration separators within a captured span.
static ITEM_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|、|，|\s+and\s+|\s+및\s+|\s+이고\s*|\s+하고\s*)\s*")
        .expect("invalid item split pattern")
});

// Standalone " - " splits; "SECS-GEM" style hyphenation has no spaces and
// stays intact.
static DASH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-\s+").expect("invalid dash split pattern"));

// In-line closing clause that ends an enumeration mid-sentence.
static ITEM_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s+이고|\s+하고|입니다|가\s*있으면|있으면\s*좋겠습니다|\.(?:\s|$)|\n)")
        .expect("invalid item end pattern")
});

static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("invalid trailing paren pattern"));

pub struct RequirementsExtractor;

impl Extractor for RequirementsExtractor {
    fn name(&self) -> &'static str {
        "requirements"
    }

    fn extract(&self, normalized: &str, _sentences: &[String]) -> Option<ExtractResult> {
        let (must_have, must_have_evidence) =
            extract_section(normalized, &MUST_HAVE_STARTERS, &NICE_TO_HAVE_STARTERS);
        let (nice_to_have, nice_to_have_evidence) =
            extract_section(normalized, &NICE_TO_HAVE_STARTERS, &MUST_HAVE_STARTERS);

        if must_have.is_empty() && nice_to_have.is_empty() {
            return None;
        }

        let mut evidence_parts = Vec::new();
        if !must_have_evidence.is_empty() {
            evidence_parts.push(format!("must_have: {must_have_evidence}"));
        }
        if !nice_to_have_evidence.is_empty() {
            evidence_parts.push(format!("nice_to_have: {nice_to_have_evidence}"));
        }

        Some(ExtractResult {
            value: ExtractedValue::Requirements(RequirementsResult {
                must_have,
                nice_to_have,
                must_have_evidence,
                nice_to_have_evidence,
            }),
            confidence: 0.9,
            evidence: evidence_parts.join(" | "),
            extractor: self.name().to_string(),
        })
    }
}

/// One starter occurrence: where it begins, where its match ends, and the
/// matched starter text (kept for evidence).
struct StarterHit<'t> {
    start: usize,
    end: usize,
    matched: &'t str,
}

/// Collect items from every occurrence of every starter in `starters`.
/// Occurrences falling inside an already-consumed span are skipped so one
/// enumeration is never captured twice. Evidence comes from the first
/// occurrence that yielded items.
fn extract_section(
    text: &str,
    starters: &[Regex],
    opposite_starters: &[Regex],
) -> (Vec<String>, String) {
    let mut hits: Vec<StarterHit<'_>> = Vec::new();
    for starter in starters {
        for m in starter.find_iter(text) {
            hits.push(StarterHit {
                start: m.start(),
                end: m.end(),
                matched: m.as_str(),
            });
        }
    }
    hits.sort_by_key(|h| h.start);

    let mut items: Vec<String> = Vec::new();
    let mut evidence = String::new();
    let mut consumed_end = 0usize;

    for hit in &hits {
        if hit.start < consumed_end {
            continue;
        }

        let tail = &text[hit.end..];
        // Hard boundary: terminators and opposite-family starters.
        let mut hard_end = tail.len();
        for pattern in SECTION_TERMINATORS.iter().chain(opposite_starters.iter()) {
            if let Some(m) = pattern.find(tail) {
                hard_end = hard_end.min(m.start());
            }
        }
        // A same-family starter also ends this span, but the in-line closing
        // clause is still searched up to the hard boundary so idioms like
        // "있으면 좋겠습니다" are consumed with the section they close.
        let mut limit = hard_end;
        for starter in starters.iter() {
            if let Some(m) = starter.find(tail) {
                limit = limit.min(m.start());
            }
        }

        let mut section = &tail[..limit];
        let mut span_end = hit.end + limit;
        if let Some(m) = ITEM_END.find(&tail[..hard_end]) {
            if m.start() <= limit {
                span_end = hit.end + m.end();
                if m.start() < limit {
                    section = &tail[..m.start()];
                }
            }
        }

        let section_items = split_items(section);
        if section_items.is_empty() {
            continue;
        }
        if evidence.is_empty() {
            evidence = format_evidence(&format!("{} {}", hit.matched, section.trim()));
        }
        for item in section_items {
            if !items.contains(&item) {
                items.push(item);
            }
        }
        consumed_end = span_end;
    }

    (items, evidence)
}

fn split_items(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut cleaned: Vec<String> = Vec::new();
    for piece in ITEM_SPLIT.split(text) {
        for part in DASH_SPLIT.split(piece) {
            let item = part.trim().trim_start_matches([':', '-', ' ']).trim();
            if item.is_empty() {
                continue;
            }
            if item.chars().count() > MAX_ITEM_CHARS {
                continue;
            }
            let item = TRAILING_PAREN.replace(item, "");
            let item = item.trim().trim_end_matches('.');
            if item.is_empty() {
                continue;
            }
            // "A + B" enumerates two items, but "C++" is one name.
            if item.contains("++") || !item.contains(" + ") {
                push_unique(&mut cleaned, item.to_string());
            } else {
                for sub in item.split(" + ") {
                    let sub = sub.trim();
                    if !sub.is_empty() {
                        push_unique(&mut cleaned, sub.to_string());
                    }
                }
            }
        }
    }
    cleaned
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}
