//! Output contract of the observation pipeline.
//!
//! Downstream consumers (trade-off reasoner, recommendation formatter) read
//! only these types. Nothing here is mutated after `observe` returns.

use serde::{Deserialize, Serialize};

/// An open question the pipeline could not answer from the input.
///
/// Questions are terminal output for a human; they are never auto-answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unknown {
    /// The question to put to the user.
    pub question: String,
    /// Why the answer is needed.
    pub reason: String,
    /// Input text (or absence note) that justified asking.
    pub evidence: String,
}

/// The value payload of one extraction, one case per extractor output shape.
///
/// Serialized untagged so the JSON mirrors the loose shape consumers expect:
/// an integer, a `{min, max}` object, a string, a list, or a requirements
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedValue {
    /// A single count (deadline days, team headcount).
    Int(u32),
    /// An inclusive headcount range.
    Range { min: u32, max: u32 },
    /// A single canonical name (platform).
    Text(String),
    /// An ordered, deduplicated list of names (stack, forbidden).
    List(Vec<String>),
    /// Split must-have / nice-to-have requirement items.
    Requirements(RequirementsResult),
}

/// Result of a single extractor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractResult {
    pub value: ExtractedValue,
    /// 0.0 ..= 1.0
    pub confidence: f32,
    /// Substring (or light reconstruction) of the input that justified the
    /// value. Never a synthesized value absent from the input.
    pub evidence: String,
    /// Name of the extractor that produced this result.
    pub extractor: String,
}

/// Requirement items split into the two priority tiers.
///
/// Both lists preserve first-seen order and are deduplicated by exact string
/// equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementsResult {
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
    #[serde(default)]
    pub must_have_evidence: String,
    #[serde(default)]
    pub nice_to_have_evidence: String,
}

/// Final output of one pipeline invocation.
///
/// Invariant: `team_size` and the `team_size_min`/`team_size_max` pair are
/// never both populated — a team-size extraction yields either a point value
/// or a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationResult {
    // Meta
    pub raw_input: String,
    /// 0.0 (all Korean) ..= 1.0 (all English)
    pub lang_mix_ratio: f32,
    pub tokens_estimate: usize,

    // Project facts
    pub deadline_days: Option<u32>,
    pub team_size: Option<u32>,
    pub team_size_min: Option<u32>,
    pub team_size_max: Option<u32>,

    // Requirements
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,

    // Constraints
    pub platform: Option<String>,
    pub language_stack: Vec<String>,
    pub forbidden: Vec<String>,

    // Risk signal, 0..=100
    pub ambiguity_score: u8,

    pub unknowns: Vec<Unknown>,

    /// Full audit trail of every extractor that returned a result.
    pub extractions: Vec<ExtractResult>,
}
