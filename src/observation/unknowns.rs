//! Unknowns generation: the validation layer that turns missing or shaky
//! information into concrete questions for the requester.
//!
//! Rules are independent; several can fire on one input. Output order is
//! fixed: deadline, team size, low-confidence extractions in extraction
//! order, then the domain keyword triggers in declaration order.

use std::sync::LazyLock;

use regex::Regex;

use crate::observation::schema::{ExtractResult, Unknown};

/// Extractions below this confidence get an explicit confirmation question.
pub const LOW_CONFIDENCE: f32 = 0.7;

const PREFERENCE_KEYWORDS: &[&str] = &["ideally", "preferred", "best", "선호", "가능하면", "이상적"];

static IDEALLY_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ideally\s+(\d+)").expect("invalid ideally pattern"));
static PREFERRED_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"prefer(?:red|s)?\s+(\d+)").expect("invalid preferred pattern"));
static KOREAN_PREFERRED_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:선호|이상적)[^\d]*(\d+)").expect("invalid 선호 pattern"));

/// Inputs the generator needs beyond the raw text.
pub struct UnknownsInput<'a> {
    pub extractions: &'a [ExtractResult],
    pub deadline_days: Option<u32>,
    pub team_size: Option<u32>,
    pub team_size_min: Option<u32>,
    pub team_size_max: Option<u32>,
    pub team_range_evidence: &'a str,
}

pub fn generate_unknowns(text: &str, input: &UnknownsInput<'_>) -> Vec<Unknown> {
    let mut unknowns: Vec<Unknown> = Vec::new();

    if input.deadline_days.is_none() {
        unknowns.push(Unknown {
            question: "프로젝트 마감일이나 기간이 어떻게 되나요?".into(),
            reason: "일정 정보가 있어야 적절한 아키텍처 결정이 가능합니다.".into(),
            evidence: "일정 관련 정보를 찾지 못했습니다.".into(),
        });
    }

    if let (Some(min), Some(max)) = (input.team_size_min, input.team_size_max) {
        unknowns.push(Unknown {
            question: team_range_question(text, min, max),
            reason: "인원 확정에 따라 일정/범위/역할 분담이 달라집니다.".into(),
            evidence: input.team_range_evidence.to_string(),
        });
    } else if input.team_size.is_none() {
        unknowns.push(Unknown {
            question: "팀 인원이 몇 명인가요?".into(),
            reason: "인력 규모에 따라 적합한 구조가 달라집니다.".into(),
            evidence: "인원 관련 정보를 찾지 못했습니다.".into(),
        });
    }

    for extraction in input.extractions {
        if extraction.confidence < LOW_CONFIDENCE {
            unknowns.push(Unknown {
                question: format!(
                    "{} 정보가 정확한가요? (추출: {})",
                    extraction.extractor, extraction.evidence
                ),
                reason: "추출 신뢰도가 낮습니다.".into(),
                evidence: extraction.evidence.clone(),
            });
        }
    }

    add_keyword_unknowns(text, &mut unknowns);
    unknowns
}

/// Domain triggers checked by substring presence. Korean phrases are also
/// checked space-collapsed to tolerate spacing variance.
fn add_keyword_unknowns(text: &str, unknowns: &mut Vec<Unknown>) {
    let lower = text.to_lowercase();
    let compact: String = lower.chars().filter(|c| *c != ' ').collect();

    if lower.contains("secs/gem") || lower.contains("secs gem") || compact.contains("secsgem") {
        unknowns.push(Unknown {
            question: "SECS/GEM 연동 대상 장비와 메시지 규격이 확정되었나요?".into(),
            reason: "SECS/GEM은 장비별로 메시지 구조가 다를 수 있어 사전 확인이 필요합니다.".into(),
            evidence: "SECS/GEM integration 언급".into(),
        });
    }

    if lower.contains("traceability") || lower.contains("추적") {
        unknowns.push(Unknown {
            question: "Traceability 요구 범위가 어디까지인가요? (제품 이력, 공정 이력, 작업자 이력 등)"
                .into(),
            reason: "추적 범위에 따라 데이터 모델과 저장 구조가 달라집니다.".into(),
            evidence: "traceability 언급".into(),
        });
    }

    if lower.contains("audit") || lower.contains("감사") {
        unknowns.push(Unknown {
            question: "Audit logging 보관 기간과 조회 요구사항이 있나요?".into(),
            reason: "로그 보관 정책에 따라 스토리지 설계가 달라집니다.".into(),
            evidence: "audit logging 언급".into(),
        });
    }

    if lower.contains("role-based")
        || lower.contains("rbac")
        || lower.contains("권한")
        || lower.contains("access control")
    {
        unknowns.push(Unknown {
            question: "운영자 권한 체계(역할/레벨)가 정의되어 있나요?".into(),
            reason: "권한 구조에 따라 인증/인가 설계가 달라집니다.".into(),
            evidence: "role-based access control / 권한 언급".into(),
        });
    }

    if lower.contains("no internet") || lower.contains("인터넷 불가") || compact.contains("인터넷불가")
    {
        unknowns.push(Unknown {
            question: "인터넷 불가 환경에서 소프트웨어 배포/업데이트 방식이 정해져 있나요?".into(),
            reason: "오프라인 환경은 배포 파이프라인 설계에 영향을 줍니다.".into(),
            evidence: "no internet / 인터넷 불가 언급".into(),
        });
    }

    let has_compliance = lower.contains("compliance") || lower.contains("컴플라이언스");
    if has_compliance {
        unknowns.push(Unknown {
            question: "준수해야 할 컴플라이언스 규정(예: FDA, ISO, 내부 보안 정책)이 있나요?".into(),
            reason: "컴플라이언스 요구사항에 따라 문서화 및 검증 절차가 달라집니다.".into(),
            evidence: "compliance 언급".into(),
        });
    }

    // Suppressed when compliance already fired; the two questions overlap.
    if (lower.contains("security") || lower.contains("보안")) && !lower.contains("compliance") {
        unknowns.push(Unknown {
            question: "보안 요구사항(암호화, 접근 제어, 감사 로그 등)이 구체적으로 정의되어 있나요?"
                .into(),
            reason: "보안 요구 수준에 따라 아키텍처가 달라집니다.".into(),
            evidence: "security / 보안 언급".into(),
        });
    }

    if lower.contains("wsl") {
        unknowns.push(Unknown {
            question: "WSL2 개발환경과 실제 운영환경(Windows) 간 차이로 인한 제약이 있나요?".into(),
            reason: "개발/운영 환경 차이는 CI/CD 및 테스트 전략에 영향을 줍니다.".into(),
            evidence: "WSL2 언급".into(),
        });
    }
}

/// Phrase the range-confirmation question around a stated preferred size
/// when one can be read out of the text and falls inside the range.
fn team_range_question(text: &str, min: u32, max: u32) -> String {
    let lower = text.to_lowercase();

    let preferred = IDEALLY_N
        .captures(&lower)
        .or_else(|| PREFERRED_N.captures(&lower))
        .or_else(|| KOREAN_PREFERRED_N.captures(text))
        .and_then(|caps| caps[1].parse::<u32>().ok());

    if let Some(value) = preferred {
        if value >= min && value <= max {
            return format!(
                "팀 인원은 {min}~{max}명 범위이며, 이상적으로는 {value}명을 선호하는 것으로 보입니다. \
                 초기 기준 인원을 {value}명으로 확정해도 될까요?"
            );
        }
    }

    if PREFERENCE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return format!(
            "팀 인원은 {min}~{max}명 범위로 보입니다. 선호하는 인원 규모가 있다면, \
             그 기준으로 확정해도 될까요?"
        );
    }

    format!(
        "팀 규모가 {min}~{max}명 범위로 되어 있습니다. 초기 계획 기준 인원을 몇 명으로 확정할까요?"
    )
}
