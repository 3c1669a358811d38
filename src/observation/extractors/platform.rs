//! Platform extraction, normalized to a fixed vocabulary
//! (Windows / Linux / macOS / Cross-platform).
//!
//! Contextual phrasings ("Platform은 X", "Target environment is X") are
//! tried first and score higher than the bare keyword fallback. The fallback
//! scans the keyword table in declaration order, so when several platforms
//! are mentioned without context the table order decides, not text order.

use std::sync::LazyLock;

use regex::Regex;

use super::Extractor;
use crate::observation::schema::{ExtractResult, ExtractedValue};

// Ordered keyword → canonical name table. WSL is deliberately mapped to
// Linux: the workload runs in a Linux userland even though the host is
// Windows.
const PLATFORM_TABLE: &[(&str, &str)] = &[
    ("windows", "Windows"),
    ("win", "Windows"),
    ("윈도우", "Windows"),
    ("윈도", "Windows"),
    ("linux", "Linux"),
    ("리눅스", "Linux"),
    ("ubuntu", "Linux"),
    ("centos", "Linux"),
    ("debian", "Linux"),
    ("macos", "macOS"),
    ("mac os", "macOS"),
    ("osx", "macOS"),
    ("mac", "macOS"),
    ("맥", "macOS"),
    ("wsl", "Linux"),
    ("cross-platform", "Cross-platform"),
    ("크로스플랫폼", "Cross-platform"),
    ("멀티플랫폼", "Cross-platform"),
];

static CONTEXT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "Platform은 Windows 기반이고"
        r"(?i)platform[은는]?\s+(\w+)",
        // "Target environment is Linux"
        r"(?i)target\s+environment[은는]?\s+(?:is\s+)?(\w+)",
        // "Windows 기반", "Linux 환경"
        r"(?i)(\w+)\s+(?:기반|환경|based|environment)",
        // "on Windows"
        r"(?i)on\s+(\w+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("invalid platform context pattern"))
    .collect()
});

pub struct PlatformExtractor;

impl Extractor for PlatformExtractor {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn extract(&self, normalized: &str, _sentences: &[String]) -> Option<ExtractResult> {
        let text_lower = normalized.to_lowercase();

        for pattern in CONTEXT_PATTERNS.iter() {
            let Some(caps) = pattern.captures(normalized) else {
                continue;
            };
            let candidate = caps[1].to_lowercase();
            if let Some(platform) = canonical_platform(&candidate) {
                return Some(ExtractResult {
                    value: ExtractedValue::Text(platform.to_string()),
                    confidence: 0.95,
                    evidence: caps[0].trim().to_string(),
                    extractor: self.name().to_string(),
                });
            }
        }

        for (keyword, platform) in PLATFORM_TABLE {
            if text_lower.contains(keyword) {
                return Some(ExtractResult {
                    value: ExtractedValue::Text(platform.to_string()),
                    confidence: 0.85,
                    evidence: keyword_evidence(keyword, normalized),
                    extractor: self.name().to_string(),
                });
            }
        }

        None
    }
}

fn canonical_platform(candidate: &str) -> Option<&'static str> {
    PLATFORM_TABLE
        .iter()
        .find(|(keyword, _)| *keyword == candidate)
        .map(|(_, platform)| *platform)
}

/// The keyword as it appears in the input, preserving its original casing.
pub(crate) fn keyword_evidence(keyword: &str, text: &str) -> String {
    Regex::new(&format!("(?i){}", regex::escape(keyword)))
        .ok()
        .and_then(|re| re.find(text).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| keyword.to_string())
}
