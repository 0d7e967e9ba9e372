#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Transcript interpretation without a language model.
//!
//! - [`TriggerDetector`] spots announcements like "pill time".
//! - [`PatternExtractor`] turns free text into a medication and dosage using an
//!   ordered list of regex rules, first match wins.
//! - [`QueryAnswerer`] recognises history questions and answers them from a
//!   [`medtrack_core::RecordStore`].

pub mod extraction;
pub mod query;
pub mod trigger;

pub use extraction::extractor::PatternExtractor;
pub use extraction::rules::{ExtractionRule, RuleDef, RuleError, RuleMatch, default_rules};
pub use query::answerer::{
    HistoryQuery, QueryAnswerer, QueryKind, QueryPattern, default_query_patterns,
};
pub use trigger::{DEFAULT_TRIGGER_PHRASES, TriggerDetector};
