//! Pipeline orchestrator: normalize → segment → extract → validate →
//! quantify, assembled into one immutable [`ObservationResult`].
//!
//! Rule-based end to end; repeated calls on the same input produce
//! byte-identical results.

use tracing::debug;

use crate::observation::extractors::{default_extractors, Extractor};
use crate::observation::normalizer::normalize;
use crate::observation::schema::{ExtractedValue, ObservationResult, Unknown};
use crate::observation::scoring::ambiguity_score;
use crate::observation::unknowns::{generate_unknowns, UnknownsInput};

/// Runs the extractor set over one input. Stateless and reusable across
/// invocations; construct once, call [`Observer::observe`] per brief.
pub struct Observer {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Observer {
    pub fn new() -> Self {
        Self {
            extractors: default_extractors(),
        }
    }

    /// Substitute the extractor set, e.g. a subset under test.
    pub fn with_extractors(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    pub fn observe(&self, input: &str) -> ObservationResult {
        if input.trim().is_empty() {
            return ObservationResult {
                raw_input: input.to_string(),
                unknowns: vec![Unknown {
                    question: "입력을 다시 해주세요.".into(),
                    reason: "입력이 비어 있습니다.".into(),
                    evidence: String::new(),
                }],
                ..ObservationResult::default()
            };
        }

        let norm = normalize(input);

        let mut extractions = Vec::new();
        for extractor in &self.extractors {
            if let Some(result) = extractor.extract(&norm.normalized, &norm.sentences) {
                debug!(
                    extractor = result.extractor.as_str(),
                    confidence = result.confidence,
                    evidence = result.evidence.as_str(),
                    "extractor matched"
                );
                extractions.push(result);
            }
        }

        let mut deadline_days: Option<u32> = None;
        let mut team_size: Option<u32> = None;
        let mut team_size_min: Option<u32> = None;
        let mut team_size_max: Option<u32> = None;
        let mut team_range_evidence = String::new();
        let mut must_have: Vec<String> = Vec::new();
        let mut nice_to_have: Vec<String> = Vec::new();
        let mut platform: Option<String> = None;
        let mut language_stack: Vec<String> = Vec::new();
        let mut forbidden: Vec<String> = Vec::new();

        for extraction in &extractions {
            match (extraction.extractor.as_str(), &extraction.value) {
                ("deadline", ExtractedValue::Int(days)) => deadline_days = Some(*days),
                ("team_size", ExtractedValue::Int(size)) => team_size = Some(*size),
                ("team_size", ExtractedValue::Range { min, max }) => {
                    team_size_min = Some(*min);
                    team_size_max = Some(*max);
                    team_range_evidence = extraction.evidence.clone();
                }
                ("requirements", ExtractedValue::Requirements(req)) => {
                    must_have = req.must_have.clone();
                    nice_to_have = req.nice_to_have.clone();
                }
                ("platform", ExtractedValue::Text(name)) => platform = Some(name.clone()),
                ("stack", ExtractedValue::List(list)) => language_stack = list.clone(),
                ("forbidden", ExtractedValue::List(list)) => forbidden = list.clone(),
                _ => {}
            }
        }

        // Unknowns and the score both read the raw input: hedge words and
        // compliance signals must be judged on what the user actually wrote.
        let unknowns = generate_unknowns(
            input,
            &UnknownsInput {
                extractions: &extractions,
                deadline_days,
                team_size,
                team_size_min,
                team_size_max,
                team_range_evidence: &team_range_evidence,
            },
        );

        // Score before the fallback so the structured-requirements bonus
        // only rewards genuinely enumerated items.
        let score = ambiguity_score(
            input,
            &extractions,
            &unknowns,
            must_have.len(),
            nice_to_have.len(),
        );

        if must_have.is_empty() {
            must_have = norm.sentences.clone();
        }

        debug!(
            ambiguity_score = score,
            unknowns = unknowns.len(),
            extractions = extractions.len(),
            "observation complete"
        );

        ObservationResult {
            raw_input: input.to_string(),
            lang_mix_ratio: norm.lang_mix_ratio,
            tokens_estimate: norm.tokens_estimate,
            deadline_days,
            team_size,
            team_size_min,
            team_size_max,
            must_have,
            nice_to_have,
            platform,
            language_stack,
            forbidden,
            ambiguity_score: score,
            unknowns,
            extractions,
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience over a default [`Observer`].
pub fn observe(input: &str) -> ObservationResult {
    Observer::new().observe(input)
}

/// Render a day count in the largest sensible unit for display
/// ("455" → "1년 3개월").
pub fn format_deadline(days: u32) -> String {
    if days >= 365 {
        let years = days / 365;
        let months = (days % 365) / 30;
        if months > 0 {
            format!("{years}년 {months}개월")
        } else {
            format!("{years}년")
        }
    } else if days >= 30 {
        format!("{}개월", days / 30)
    } else if days >= 7 {
        format!("{}주", days / 7)
    } else {
        format!("{days}일")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_short_circuits() {
        for input in ["", "   \n\t  "] {
            let result = observe(input);
            assert_eq!(result.raw_input, input);
            assert!(result.extractions.is_empty());
            assert_eq!(result.unknowns.len(), 1);
            assert_eq!(result.unknowns[0].question, "입력을 다시 해주세요.");
            assert_eq!(result.ambiguity_score, 0);
        }
    }

    #[test]
    fn clear_korean_brief() {
        let result = observe("인원은 5명이고 기간은 3개월입니다");
        assert_eq!(result.team_size, Some(5));
        assert_eq!(result.deadline_days, Some(90));
        assert!(result.unknowns.is_empty());
        assert!(result.ambiguity_score < 50);
        // No requirements section; sentences stand in as must-haves.
        assert_eq!(result.must_have, vec!["인원은 5명이고 기간은 3개월입니다"]);
    }

    #[test]
    fn hedged_brief_scores_high() {
        let result = observe("아마 뭔가 만들어야 할 것 같은데 글쎄요");
        assert!(result.extractions.is_empty());
        assert_eq!(result.unknowns.len(), 2);
        assert!(result.ambiguity_score > 30);
    }

    #[test]
    fn team_range_is_mutually_exclusive_with_point_value() {
        let result = observe("개발 인원은 2~3명 정도 생각하고 있고, 기간은 1년 정도 예상합니다.");
        assert_eq!(result.team_size, None);
        assert_eq!(result.team_size_min, Some(2));
        assert_eq!(result.team_size_max, Some(3));
        assert_eq!(result.deadline_days, Some(365));
        assert!(result.unknowns.iter().any(|u| u.question.contains("확정")));
    }

    #[test]
    fn point_team_size_leaves_range_empty() {
        let result = observe("팀은 5명입니다. 기간은 2주 남았습니다.");
        assert_eq!(result.team_size, Some(5));
        assert_eq!(result.team_size_min, None);
        assert_eq!(result.team_size_max, None);
        assert_eq!(result.deadline_days, Some(14));
    }

    #[test]
    fn mixed_language_brief_end_to_end() {
        let result = observe(
            "Team size will be 4 people. The expected timeline is 1 year and 3 months. \
             Core requirement is rule-based analysis (LLM is forbidden). \
             Nice features include reporting dashboard and export 기능. \
             Target environment is Linux (WSL) and Python only.",
        );
        assert_eq!(result.team_size, Some(4));
        assert_eq!(result.deadline_days, Some(455));
        assert_eq!(result.forbidden, vec!["LLM"]);
        assert_eq!(result.platform.as_deref(), Some("Linux"));
        assert_eq!(result.language_stack, vec!["Python"]);
        assert_eq!(result.must_have, vec!["rule-based analysis"]);
        assert_eq!(result.nice_to_have, vec!["reporting dashboard", "export 기능"]);
        // Only the WSL domain trigger fires.
        assert_eq!(result.unknowns.len(), 1);
        assert!(result.unknowns[0].question.contains("WSL2"));
        // One unknown (15) plus the compliance tie-break (5).
        assert_eq!(result.ambiguity_score, 20);
    }

    #[test]
    fn repeated_observation_is_deterministic() {
        let input = "아마 3개월 안에 React로 만들어야 할 것 같아요. 보안이 중요합니다.";
        assert_eq!(observe(input), observe(input));
    }

    #[test]
    fn audit_trail_carries_every_match() {
        let result = observe("인원은 5명이고 기간은 3개월입니다. Platform은 Windows 기반.");
        let names: Vec<_> = result.extractions.iter().map(|e| e.extractor.as_str()).collect();
        assert!(names.contains(&"deadline"));
        assert!(names.contains(&"team_size"));
        assert!(names.contains(&"platform"));
    }

    #[test]
    fn substituted_extractor_subset() {
        use crate::observation::extractors::DeadlineExtractor;

        let observer = Observer::with_extractors(vec![Box::new(DeadlineExtractor)]);
        let result = observer.observe("인원은 5명이고 기간은 3개월입니다");
        assert_eq!(result.deadline_days, Some(90));
        // Team size extractor was not run; its absence shows up as an
        // unknown instead.
        assert_eq!(result.team_size, None);
        assert!(result.unknowns.iter().any(|u| u.question.contains("팀 인원")));
    }

    #[test]
    fn deadline_display_units() {
        assert_eq!(format_deadline(455), "1년 3개월");
        assert_eq!(format_deadline(365), "1년");
        assert_eq!(format_deadline(90), "3개월");
        assert_eq!(format_deadline(14), "2주");
        assert_eq!(format_deadline(5), "5일");
    }
}
