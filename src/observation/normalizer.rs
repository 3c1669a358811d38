//! Lossless normalization of mixed Korean/English brief text.
//!
//! Shapes form only — whitespace collapsing, digit/unit spacing, sentence
//! segmentation. No lowercasing, no word substitution: every extractor must
//! be able to trace its evidence back to the original wording.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse classification of one token, kept for diagnostics only.
/// Extractors scan `normalized`/`sentences` directly and never rely on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    Number,
    Unit,
    Symbol,
}

/// A positional tag over the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Substrate all extractors operate on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedText {
    pub original: String,
    pub normalized: String,
    pub sentences: Vec<String>,
    pub tokens: Vec<Token>,
    /// english_chars / (korean_chars + english_chars); 0.0 when both zero.
    pub lang_mix_ratio: f32,
    pub tokens_estimate: usize,
}

/// Time/people unit lexicon. The normalizer never substitutes these; the
/// tokenizer uses them to tag `Unit` tokens and extractors keep their own
/// pattern tables.
const LATIN_UNITS: &[&str] = &[
    "year", "years", "yr", "yrs", "month", "months", "mo", "mos", "week", "weeks", "wk", "wks",
    "day", "days", "d", "ppl", "people", "person", "persons",
];

const HANGUL_UNITS: &[&str] = &["년", "개월", "달", "주", "일", "명"];

static DIGIT_THEN_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([a-zA-Z])").expect("invalid spacing pattern"));
static LETTER_THEN_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z])(\d)").expect("invalid spacing pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\n!?]+").expect("invalid sentence pattern"));
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("invalid word pattern"));
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)|([가-힣]+)|([a-zA-Z]+)|([^\s\w])").expect("invalid token pattern")
});

/// Normalize one brief. Empty or whitespace-only input short-circuits to an
/// all-empty result.
pub fn normalize(text: &str) -> NormalizedText {
    if text.trim().is_empty() {
        return NormalizedText {
            original: text.to_string(),
            ..Default::default()
        };
    }

    NormalizedText {
        original: text.to_string(),
        normalized: normalize_form(text),
        sentences: segment_sentences(text),
        tokens: tokenize(text),
        lang_mix_ratio: lang_mix_ratio(text),
        tokens_estimate: estimate_tokens(text),
    }
}

/// English share of the letter content: 0.0 = all Hangul, 1.0 = all Latin.
fn lang_mix_ratio(text: &str) -> f32 {
    let mut korean = 0u32;
    let mut english = 0u32;
    for ch in text.chars() {
        if ('가'..='힣').contains(&ch) {
            korean += 1;
        } else if ch.is_ascii_alphabetic() {
            english += 1;
        }
    }
    let total = korean + english;
    if total == 0 {
        0.0
    } else {
        english as f32 / total as f32
    }
}

fn estimate_tokens(text: &str) -> usize {
    WORD_TOKEN.find_iter(text).count()
}

/// Split on runs of `.`, newline, `!`, `?`, dropping empty fragments and
/// preserving order. Evidence selection downstream scans in this order.
fn segment_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form-only normalization, applied in this order and only this order:
/// digit→letter spacing ("1year" → "1 year"), letter→digit spacing
/// ("year3" → "year 3"), whitespace collapse, trim.
fn normalize_form(text: &str) -> String {
    let spaced = DIGIT_THEN_LETTER.replace_all(text, "$1 $2");
    let spaced = LETTER_THEN_DIGIT.replace_all(&spaced, "$1 $2");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}

/// Best-effort token classification over the original text.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for caps in TOKEN_PATTERN.captures_iter(text) {
        let Some(m) = caps.get(0) else {
            continue;
        };
        let matched = m.as_str();

        let kind = if caps.get(1).is_some() {
            TokenKind::Number
        } else if caps.get(2).is_some() {
            if HANGUL_UNITS.contains(&matched) {
                TokenKind::Unit
            } else {
                TokenKind::Word
            }
        } else if caps.get(3).is_some() {
            let lower = matched.to_lowercase();
            if LATIN_UNITS.contains(&lower.as_str()) {
                TokenKind::Unit
            } else {
                TokenKind::Word
            }
        } else {
            TokenKind::Symbol
        };

        tokens.push(Token {
            text: matched.to_string(),
            start: m.start(),
            end: m.end(),
            kind,
        });
    }

    tokens
}
