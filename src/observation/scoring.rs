//! Ambiguity scoring: one 0-100 number summarizing how underspecified the
//! brief is. Higher means more clarification is needed before planning.
//!
//! Weighted sum of independently capped terms, so no single signal can
//! dominate. Scale: 0-20 clear, 21-50 medium, 51-100 needs clarification.

use crate::observation::schema::{ExtractResult, Unknown};
use crate::observation::unknowns::LOW_CONFIDENCE;

/// Scoring weights and caps. Calibration constants, not tunables.
pub mod weights {
    /// Points per unknown.
    pub const PER_UNKNOWN: i32 = 15;
    /// Cap on the unknown-count term.
    pub const UNKNOWN_CAP: i32 = 30;
    /// Cap on the uncertainty-keyword term.
    pub const KEYWORD_CAP: i32 = 30;
    /// Points per missing critical extractor (deadline, team size).
    pub const PER_MISSING_CRITICAL: i32 = 10;
    /// Points per low-confidence extraction.
    pub const PER_LOW_CONFIDENCE: i32 = 10;
    /// Cap on the low-confidence term.
    pub const LOW_CONFIDENCE_CAP: i32 = 20;
    /// Deduction when the brief carries five or more structured items.
    pub const STRUCTURED_BONUS: i32 = 15;
    /// Structured-item count at which the deduction applies.
    pub const STRUCTURED_THRESHOLD: usize = 5;
    /// Tie-break addition for compliance/operations signals.
    pub const COMPLIANCE_TIE_BREAK: i32 = 5;
}

/// Hedging and churn vocabulary, both languages. Matched as case-folded
/// substrings of the raw input.
pub const UNCERTAINTY_KEYWORDS: &[&str] = &[
    "maybe",
    "perhaps",
    "possibly",
    "might",
    "could be",
    "likely",
    "probably",
    "prefer",
    "preferred",
    "ideally",
    "within",
    "around",
    "approximately",
    "about",
    "flexible",
    "evolving",
    "changing",
    "tight",
    "scope change",
    "budget tight",
    "sooner",
    "if possible",
    "아마",
    "검토",
    "미정",
    "tbd",
    "확인 필요",
    "논의 필요",
    "불확실",
    "모르",
    "글쎄",
    "아직",
    "예정",
    "가능성",
    "변동",
    "유동적",
];

const COMPLIANCE_SIGNALS_EN: &[&str] = &[
    "no internet",
    "offline",
    "security",
    "compliance",
    "production",
    "forbidden",
];

const COMPLIANCE_SIGNALS_KO: &[&str] = &[
    "인터넷 불가",
    "오프라인",
    "보안",
    "컴플라이언스",
    "운영",
    "현장",
    "프로덕션",
    "금지",
];

const CRITICAL_EXTRACTORS: &[&str] = &["deadline", "team_size"];

pub fn ambiguity_score(
    text: &str,
    extractions: &[ExtractResult],
    unknowns: &[Unknown],
    must_have_count: usize,
    nice_to_have_count: usize,
) -> u8 {
    let mut score: i32 = 0;

    score += weights::UNKNOWN_CAP.min(unknowns.len() as i32 * weights::PER_UNKNOWN);

    let text_lower = text.to_lowercase();
    let uncertainty_hits = UNCERTAINTY_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .count();
    score += weights::KEYWORD_CAP.min(graduated_keyword_score(uncertainty_hits));

    let missing_critical = CRITICAL_EXTRACTORS
        .iter()
        .filter(|name| !extractions.iter().any(|e| e.extractor == **name))
        .count() as i32;
    score += missing_critical * weights::PER_MISSING_CRITICAL;

    let low_confidence = extractions
        .iter()
        .filter(|e| e.confidence < LOW_CONFIDENCE)
        .count() as i32;
    score += weights::LOW_CONFIDENCE_CAP.min(low_confidence * weights::PER_LOW_CONFIDENCE);

    // A brief that enumerates its requirements is presumed clearer.
    if must_have_count + nice_to_have_count >= weights::STRUCTURED_THRESHOLD {
        score -= weights::STRUCTURED_BONUS;
    }

    if has_compliance_signal(&text_lower) {
        score += weights::COMPLIANCE_TIE_BREAK;
    }

    score.clamp(0, 100) as u8
}

/// Hits 1-2 score 3 each, 3-4 score 4 each, 5+ score 5 each. A brief that
/// hedges repeatedly is worse than one that hedges once.
fn graduated_keyword_score(hits: usize) -> i32 {
    (0..hits)
        .map(|i| match i {
            0 | 1 => 3,
            2 | 3 => 4,
            _ => 5,
        })
        .sum()
}

fn has_compliance_signal(text_lower: &str) -> bool {
    if COMPLIANCE_SIGNALS_EN.iter().any(|s| text_lower.contains(s)) {
        return true;
    }
    // Korean signals also match with internal spaces removed.
    let compact: String = text_lower.chars().filter(|c| *c != ' ').collect();
    COMPLIANCE_SIGNALS_KO.iter().any(|s| {
        let s_compact: String = s.chars().filter(|c| *c != ' ').collect();
        text_lower.contains(s) || compact.contains(&s_compact)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::schema::ExtractedValue;

    fn extraction(name: &str, confidence: f32) -> ExtractResult {
        ExtractResult {
            value: ExtractedValue::Int(1),
            confidence,
            evidence: String::new(),
            extractor: name.to_string(),
        }
    }

    fn unknown() -> Unknown {
        Unknown {
            question: "q".into(),
            reason: "r".into(),
            evidence: String::new(),
        }
    }

    #[test]
    fn clear_input_scores_zero() {
        let extractions = vec![extraction("deadline", 0.85), extraction("team_size", 1.0)];
        let score = ambiguity_score("인원은 5명이고 기간은 3개월입니다", &extractions, &[], 0, 0);
        assert_eq!(score, 0);
    }

    #[test]
    fn unknowns_capped_at_thirty() {
        let extractions = vec![extraction("deadline", 0.85), extraction("team_size", 1.0)];
        let unknowns = vec![unknown(), unknown(), unknown(), unknown()];
        assert_eq!(ambiguity_score("clear text", &extractions, &unknowns, 0, 0), 30);
    }

    #[test]
    fn graduated_keyword_weighting() {
        assert_eq!(graduated_keyword_score(0), 0);
        assert_eq!(graduated_keyword_score(2), 6);
        assert_eq!(graduated_keyword_score(3), 10);
        assert_eq!(graduated_keyword_score(4), 14);
        assert_eq!(graduated_keyword_score(6), 24);
    }

    #[test]
    fn missing_critical_extractors_add_twenty() {
        assert_eq!(ambiguity_score("clear text", &[], &[], 0, 0), 20);
    }

    #[test]
    fn low_confidence_term_capped() {
        let extractions = vec![
            extraction("deadline", 0.5),
            extraction("team_size", 0.5),
            extraction("platform", 0.5),
        ];
        // 3 low-confidence hits at 10 each, capped at 20.
        assert_eq!(ambiguity_score("clear text", &extractions, &[], 0, 0), 20);
    }

    #[test]
    fn structured_requirements_deduct() {
        let extractions = vec![extraction("deadline", 0.85), extraction("team_size", 1.0)];
        let unknowns = vec![unknown()];
        let without = ambiguity_score("clear text", &extractions, &unknowns, 0, 0);
        let with = ambiguity_score("clear text", &extractions, &unknowns, 3, 2);
        assert_eq!(without, 15);
        assert_eq!(with, 0);
    }

    #[test]
    fn compliance_signal_adds_five() {
        let extractions = vec![extraction("deadline", 0.85), extraction("team_size", 1.0)];
        assert_eq!(ambiguity_score("보안이 중요합니다", &extractions, &[], 0, 0), 5);
    }

    #[test]
    fn compact_korean_compliance_signal() {
        let extractions = vec![extraction("deadline", 0.85), extraction("team_size", 1.0)];
        assert_eq!(ambiguity_score("인터넷불가 환경", &extractions, &[], 0, 0), 5);
    }

    #[test]
    fn hedged_input_scores_high() {
        // Two hedge words, no extractions: 6 + 20 missing-critical, plus
        // 30 from two unknowns the orchestrator would generate.
        let unknowns = vec![unknown(), unknown()];
        let score = ambiguity_score("아마 뭔가 만들어야 할 것 같은데 글쎄요", &[], &unknowns, 0, 0);
        assert_eq!(score, 56);
    }

    #[test]
    fn score_never_exceeds_bounds() {
        let extractions = vec![
            extraction("platform", 0.1),
            extraction("stack", 0.1),
            extraction("forbidden", 0.1),
        ];
        let unknowns: Vec<Unknown> = (0..10).map(|_| unknown()).collect();
        let text = "maybe perhaps possibly might likely probably tight 아마 미정 글쎄 보안 금지";
        let score = ambiguity_score(text, &extractions, &unknowns, 0, 0);
        assert!(score <= 100);
    }

    #[test]
    fn structured_deduction_cannot_go_negative() {
        // 20 for missing criticals, minus 15 structured bonus; still >= 0
        // after clamping.
        assert_eq!(ambiguity_score("", &[], &[], 10, 10), 5);
        assert_eq!(ambiguity_score("clear", &[extraction("deadline", 0.9), extraction("team_size", 0.9)], &[], 10, 10), 0);
    }
}
