//! Field extractors.
//!
//! Each extractor scans the normalized text (and/or per-sentence) for one
//! semantic field and returns at most one typed result with a confidence and
//! an evidence span. Extractors are stateless and order-independent; the
//! observer runs all of them unconditionally and collects whatever comes
//! back. Each owns its own lexicon/pattern table — there is no shared
//! grammar, and the selection policy (largest-value-wins, first-valid-range,
//! all-occurrences-union) is a deliberate per-extractor decision.

pub mod evidence;

pub mod deadline;
pub mod forbidden;
pub mod platform;
pub mod requirements;
pub mod stack;
pub mod team;

pub use deadline::DeadlineExtractor;
pub use forbidden::ForbiddenExtractor;
pub use platform::PlatformExtractor;
pub use requirements::RequirementsExtractor;
pub use stack::StackExtractor;
pub use team::TeamSizeExtractor;

use super::schema::ExtractResult;

/// Shared extractor contract.
///
/// Implementations carry no per-call state and may be reused across
/// invocations. An absent result is an expected outcome, not a failure.
pub trait Extractor: Send + Sync {
    /// Stable name used in the audit trail and in critical-field checks.
    fn name(&self) -> &'static str;

    /// Scan the normalized text and segmented sentences for this field.
    fn extract(&self, normalized: &str, sentences: &[String]) -> Option<ExtractResult>;
}

/// The default extractor set, in audit-trail order. Injected into the
/// observer at construction so tests can substitute subsets.
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(DeadlineExtractor),
        Box::new(TeamSizeExtractor),
        Box::new(RequirementsExtractor),
        Box::new(PlatformExtractor),
        Box::new(StackExtractor),
        Box::new(ForbiddenExtractor),
    ]
}

/// Shared boundary guard: true when the character after `end` would not
/// continue a word (i.e. the position behaves like a regex `\b`).
/// The `regex` crate has no lookahead, so unit-suffix patterns check this
/// explicitly after matching.
pub(crate) fn word_boundary_after(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        None => true,
        Some(c) => !(c.is_alphanumeric() || c == '_'),
    }
}

/// Laxer guard used where the original patterns accepted an immediately
/// following Hangul syllable (e.g. "3개월입니다"): only an ASCII letter
/// continues the unit.
pub(crate) fn no_ascii_letter_after(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        None => true,
        Some(c) => !c.is_ascii_alphabetic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_six_extractors_in_order() {
        let names: Vec<&str> = default_extractors().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec!["deadline", "team_size", "requirements", "platform", "stack", "forbidden"]
        );
    }

    #[test]
    fn word_boundary_after_end_of_text() {
        assert!(word_boundary_after("2 weeks", 7));
    }

    #[test]
    fn word_boundary_rejects_letter_continuation() {
        let text = "2 weeksX";
        assert!(!word_boundary_after(text, 7));
    }

    #[test]
    fn word_boundary_rejects_hangul_continuation() {
        let text = "1년이고";
        assert!(!word_boundary_after(text, "1년".len()));
    }

    #[test]
    fn ascii_guard_allows_hangul_continuation() {
        let text = "3개월입니다";
        assert!(no_ascii_letter_after(text, "3개월".len()));
    }

    #[test]
    fn ascii_guard_rejects_ascii_continuation() {
        let text = "3mox";
        assert!(!no_ascii_letter_after(text, 3));
    }
}
