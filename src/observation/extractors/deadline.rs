//! Deadline extraction: reduces any temporal expression to a day count.
//!
//! Scans each sentence (and the full text, to catch expressions that span a
//! sentence break) for year/month/week/day quantities independently and sums
//! them. Across all candidates the largest total wins — more complete
//! expressions beat partial ones on overlap. Month = 30 days and
//! year = 365 days exactly; a fixed approximation, not calendar arithmetic.

use std::sync::LazyLock;

use regex::Regex;

use super::{no_ascii_letter_after, word_boundary_after, Extractor};
use crate::observation::schema::{ExtractResult, ExtractedValue};

pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_MONTH: u32 = 30;
pub const DAYS_PER_YEAR: u32 = 365;

// Unit quantity patterns, scanned independently per sentence. Latin suffixes
// need an explicit boundary guard after the match; 개월/달 accept a following
// Hangul syllable ("3개월입니다"), so their guard only rejects ASCII letters.
static YEAR_QTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:년|years?|yrs?)").expect("invalid year pattern"));
static MONTH_QTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:개월|달|months?|mos?)").expect("invalid month pattern")
});
static WEEK_QTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:주|weeks?|wks?|w)").expect("invalid week pattern"));
static DAY_QTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:일|days?|d)").expect("invalid day pattern"));

// "D+14" / "D-7" shorthand. The sign is mandatory so "and 3" can never read
// as "d 3".
static D_PLUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s(])([dD][+\-]\s*\d+)").expect("invalid D+N pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("invalid digit pattern"));

/// Quantities recovered from one scanned span.
#[derive(Debug, Default)]
struct TimeComponents {
    years: u32,
    months: u32,
    weeks: u32,
    days: u32,
    evidence: String,
}

impl TimeComponents {
    fn to_days(&self) -> u32 {
        self.years * DAYS_PER_YEAR
            + self.months * DAYS_PER_MONTH
            + self.weeks * DAYS_PER_WEEK
            + self.days
    }

    fn is_empty(&self) -> bool {
        self.years == 0 && self.months == 0 && self.weeks == 0 && self.days == 0
    }

    fn unit_kinds(&self) -> u32 {
        [self.years, self.months, self.weeks, self.days]
            .iter()
            .filter(|&&v| v > 0)
            .count() as u32
    }
}

pub struct DeadlineExtractor;

impl Extractor for DeadlineExtractor {
    fn name(&self) -> &'static str {
        "deadline"
    }

    fn extract(&self, normalized: &str, sentences: &[String]) -> Option<ExtractResult> {
        let mut best: Option<ExtractResult> = None;
        let mut best_days = 0u32;

        for sentence in sentences {
            if let Some((days, result)) = extract_from_span(sentence, self.name()) {
                if days > best_days {
                    best_days = days;
                    best = Some(result);
                }
            }
        }

        // Full-text pass catches quantities split across sentence breaks.
        if let Some((days, result)) = extract_from_span(normalized, self.name()) {
            if days > best_days {
                best = Some(result);
            }
        }

        best
    }
}

/// Extract a day count from one span; D+N shorthand takes priority, else the
/// four unit quantities are scanned and summed.
fn extract_from_span(text: &str, extractor: &str) -> Option<(u32, ExtractResult)> {
    if let Some(hit) = extract_d_plus(text, extractor) {
        return Some(hit);
    }

    let components = scan_components(text);
    if components.is_empty() {
        return None;
    }

    let days = components.to_days();
    let confidence = confidence_for(&components);
    let result = ExtractResult {
        value: ExtractedValue::Int(days),
        confidence,
        evidence: components.evidence.clone(),
        extractor: extractor.to_string(),
    };
    Some((days, result))
}

fn scan_components(text: &str) -> TimeComponents {
    let mut components = TimeComponents::default();
    let mut evidence_parts: Vec<&str> = Vec::new();

    if let Some((value, span)) = first_quantity(&YEAR_QTY, text, word_boundary_after) {
        components.years = value;
        evidence_parts.push(span);
    }
    if let Some((value, span)) = first_quantity(&MONTH_QTY, text, no_ascii_letter_after) {
        components.months = value;
        evidence_parts.push(span);
    }
    if let Some((value, span)) = first_quantity(&WEEK_QTY, text, word_boundary_after) {
        components.weeks = value;
        evidence_parts.push(span);
    }
    if let Some((value, span)) = first_quantity(&DAY_QTY, text, word_boundary_after) {
        components.days = value;
        evidence_parts.push(span);
    }

    components.evidence = evidence_parts.join(" + ");
    components
}

/// First match whose end position passes the boundary guard. A capture that
/// fails numeric parsing is treated as a non-match and scanning continues.
fn first_quantity<'t>(
    pattern: &Regex,
    text: &'t str,
    guard: fn(&str, usize) -> bool,
) -> Option<(u32, &'t str)> {
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if !guard(text, whole.end()) {
            continue;
        }
        if let Ok(value) = caps[1].parse::<u32>() {
            return Some((value, whole.as_str()));
        }
    }
    None
}

fn extract_d_plus(text: &str, extractor: &str) -> Option<(u32, ExtractResult)> {
    let caps = D_PLUS.captures(text)?;
    let token = caps.get(1)?;
    let digits = DIGITS.find(token.as_str())?;
    let days = digits.as_str().parse::<u32>().ok()?;

    let result = ExtractResult {
        value: ExtractedValue::Int(days),
        confidence: 0.9,
        evidence: token.as_str().trim().to_string(),
        extractor: extractor.to_string(),
    };
    Some((days, result))
}

/// Compound expressions (two or more unit kinds) are the most trustworthy;
/// a bare day count the least, since "일" and "d" collide with other words.
fn confidence_for(components: &TimeComponents) -> f32 {
    if components.unit_kinds() >= 2 {
        0.95
    } else if components.years > 0 || components.months > 0 || components.weeks > 0 {
        0.85
    } else if components.days > 0 {
        0.8
    } else {
        0.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::normalizer::normalize;

    fn extract(text: &str) -> Option<ExtractResult> {
        let norm = normalize(text);
        DeadlineExtractor.extract(&norm.normalized, &norm.sentences)
    }

    fn days(text: &str) -> Option<u32> {
        extract(text).map(|r| match r.value {
            ExtractedValue::Int(d) => d,
            other => panic!("expected day count, got {other:?}"),
        })
    }

    #[test]
    fn korean_months() {
        assert_eq!(days("프로젝트 기간은 3개월입니다"), Some(90));
    }

    #[test]
    fn korean_weeks() {
        assert_eq!(days("마감까지 2주 남았습니다"), Some(14));
    }

    #[test]
    fn korean_year_month_compound() {
        assert_eq!(days("기간은 1년 6개월"), Some(545));
    }

    #[test]
    fn english_weeks() {
        assert_eq!(days("deadline is 2 weeks"), Some(14));
    }

    #[test]
    fn english_months() {
        assert_eq!(days("we have 3 months to complete this"), Some(90));
    }

    #[test]
    fn english_year_and_months() {
        assert_eq!(days("The expected timeline is 1 year and 3 months."), Some(455));
    }

    #[test]
    fn english_years_months_no_connector() {
        assert_eq!(days("Project duration is 2 years 6 months"), Some(910));
    }

    #[test]
    fn abbreviated_units() {
        assert_eq!(days("timeline: 1yr 3mo"), Some(455));
    }

    #[test]
    fn d_plus_shorthand() {
        let r = extract("마감 D+14").unwrap();
        assert_eq!(r.value, ExtractedValue::Int(14));
        assert!((r.confidence - 0.9).abs() < f32::EPSILON);
        assert_eq!(r.evidence, "D+14");
    }

    #[test]
    fn d_minus_shorthand() {
        assert_eq!(days("D-7 출시 예정"), Some(7));
    }

    #[test]
    fn compound_confidence_higher_than_single() {
        let compound = extract("1 year and 3 months").unwrap();
        let single = extract("3 months").unwrap();
        assert!((compound.confidence - 0.95).abs() < f32::EPSILON);
        assert!((single.confidence - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn bare_day_count_lowest_unit_confidence() {
        let r = extract("5 days left").unwrap();
        assert_eq!(r.value, ExtractedValue::Int(5));
        assert!((r.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn largest_candidate_wins_across_sentences() {
        let r = extract("처음 계획은 2개월. 최종 일정은 6개월입니다.").unwrap();
        assert_eq!(r.value, ExtractedValue::Int(180));
    }

    #[test]
    fn full_text_pass_combines_units_across_sentences() {
        // Per-sentence candidates are 14 and 180 days; the full-text pass
        // sees both units at once and its 194-day sum wins.
        let r = extract("준비 기간은 2주. 전체 일정은 6개월입니다.").unwrap();
        assert_eq!(r.value, ExtractedValue::Int(194));
    }

    #[test]
    fn evidence_joins_matched_units() {
        let r = extract("기간은 1년 6개월").unwrap();
        assert_eq!(r.evidence, "1년 + 6개월");
    }

    #[test]
    fn unit_suffix_must_end_at_boundary() {
        // "1년이고" keeps the Hangul word going after 년, so the year unit
        // does not match; "6개월" still does.
        assert_eq!(days("기간은 1년이고"), None);
        assert_eq!(days("기간은 6개월이고"), Some(180));
    }

    #[test]
    fn no_temporal_expression_is_absent() {
        assert_eq!(days("간단한 웹사이트를 만들고 싶어요"), None);
    }
}
