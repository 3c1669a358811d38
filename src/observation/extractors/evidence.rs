//! Display cleanup for evidence strings.
//!
//! Extraction logic never depends on this; it only makes the matched spans
//! read naturally after slicing and joining (glued punctuation, embedded
//! newlines, "6months"-style runs).

use std::sync::LazyLock;

use regex::Regex;

static PUNCT_THEN_GLYPH: LazyLock<Regex> = LazyLock::new(|| {
    // Clause punctuation immediately followed by a non-space glyph that is
    // not itself closing punctuation. Consuming form of the original
    // lookahead rule; the second glyph is re-emitted.
    Regex::new(r"([:;,)\]}])([^\s.:;,)\]}])").expect("invalid punctuation spacing pattern")
});
static DIGIT_THEN_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([a-zA-Z])").expect("invalid digit spacing pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));

/// Post-process an evidence string for human review.
pub fn format_evidence(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let flat = text.replace('\n', " ");
    let spaced = PUNCT_THEN_GLYPH.replace_all(&flat, "$1 $2");
    let spaced = DIGIT_THEN_LETTER.replace_all(&spaced, "$1 $2");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(format_evidence("must_have:\nA, B"), "must_have: A, B");
    }

    #[test]
    fn space_inserted_after_clause_punctuation() {
        assert_eq!(format_evidence("logging,monitoring UI"), "logging, monitoring UI");
        assert_eq!(format_evidence("nice_to_have:dashboard"), "nice_to_have: dashboard");
    }

    #[test]
    fn glued_number_unit_separated() {
        assert_eq!(format_evidence("기간은 6months"), "기간은 6 months");
    }

    #[test]
    fn consecutive_punctuation_left_alone() {
        assert_eq!(format_evidence("(LLM is forbidden)."), "(LLM is forbidden).");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(format_evidence("  a    b \t c "), "a b c");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(format_evidence(""), "");
    }
}
