//! Medication and dosage extraction.
//!
//! Rules are declared as data ([`rules::RuleDef`]) and compiled once; the
//! [`extractor::PatternExtractor`] evaluates them in order and falls back to a
//! stop-word strip when none match.

pub mod extractor;
pub mod rules;
