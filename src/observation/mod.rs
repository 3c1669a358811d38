//! Observation pipeline: normalization → segmentation → extraction →
//! validation → ambiguity scoring.
//!
//! A pure, stateless function of one input string. The pipeline never fails
//! in normal operation: missing information is represented as absent values
//! and open questions, not errors.

pub mod extractors;
pub mod normalizer;
pub mod observer;
pub mod schema;
pub mod scoring;
pub mod unknowns;

pub use observer::{observe, Observer};
pub use schema::ObservationResult;
