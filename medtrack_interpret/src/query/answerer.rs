//! Question detection and answering over logged events.
//!
//! Two families of questions are recognised: when a medication was last
//! taken, and what dose was last taken. The first pattern that matches
//! decides both the family and the medication being asked about.

use std::sync::Arc;

use medtrack_core::{
    MedicationRow, RecordStore, ResponseData, TrackerResponse, normalize_transcript,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::extraction::rules::RuleError;

/// What a history question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// "when did I last take X"
    LastTime,
    /// "how much X did I take last"
    LastDose,
}

impl QueryKind {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::LastTime => "last_time",
            Self::LastDose => "last_dose",
        }
    }
}

/// A question pattern; capture group 1 is the medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPattern {
    pub kind: QueryKind,
    pub pattern: String,
}

impl QueryPattern {
    #[must_use]
    pub fn new(kind: QueryKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }
}

/// Built-in patterns: time questions first, then dosage questions.
#[must_use]
pub fn default_query_patterns() -> Vec<QueryPattern> {
    vec![
        QueryPattern::new(
            QueryKind::LastTime,
            r"when (?:did i|was the last time i) (?:take|took)\s+(.+)",
        ),
        QueryPattern::new(
            QueryKind::LastTime,
            r"when\b.*\blast\b.*?\b(?:take|took)\s+(.+)",
        ),
        QueryPattern::new(
            QueryKind::LastTime,
            r"what time\b.*\blast\b.*?\b(?:take|took)\s+(.+)",
        ),
        QueryPattern::new(QueryKind::LastDose, r"how much\s+(.+?)\s+did i take last"),
        QueryPattern::new(QueryKind::LastDose, r"what (?:was|is) my last dose of\s+(.+)"),
        QueryPattern::new(
            QueryKind::LastDose,
            r"what (?:was|is) the last dosage of\s+(.+)",
        ),
    ]
}

/// A recognised question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub kind: QueryKind,
    /// Medication as spoken, trimmed of trailing `?!.`.
    pub medication: String,
}

/// Answers history questions by searching a [`RecordStore`].
pub struct QueryAnswerer {
    patterns: Vec<(QueryKind, Regex)>,
    store: Arc<dyn RecordStore>,
}

impl QueryAnswerer {
    pub fn new(patterns: &[QueryPattern], store: Arc<dyn RecordStore>) -> Result<Self, RuleError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&p.pattern)
                    .map(|re| (p.kind, re))
                    .map_err(|source| RuleError::Regex {
                        id: format!("query_{}", p.kind.as_str()),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns, store })
    }

    pub fn with_defaults(store: Arc<dyn RecordStore>) -> Result<Self, RuleError> {
        Self::new(&default_query_patterns(), store)
    }

    /// Classify `text` without touching the store.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<HistoryQuery> {
        let text = normalize_transcript(text);
        if text.is_empty() {
            return None;
        }

        self.patterns.iter().find_map(|(kind, re)| {
            let caps = re.captures(&text)?;
            let medication = caps
                .get(1)?
                .as_str()
                .trim()
                .trim_end_matches(['?', '!', '.'])
                .trim_end()
                .to_string();
            Some(HistoryQuery {
                kind: *kind,
                medication,
            })
        })
    }

    /// Answer `text` if it is a history question, otherwise `None`.
    #[must_use]
    pub fn answer(&self, text: &str) -> Option<TrackerResponse> {
        let query = self.parse(text)?;
        info!(kind = query.kind.as_str(), medication = %query.medication, "history question");

        let found = self
            .store
            .most_recent_matching(&query.medication)
            .unwrap_or_else(|e| {
                warn!("Failed to search medication log: {e}");
                None
            });

        Some(found.map_or_else(
            || {
                TrackerResponse::answer(
                    format!("I couldn't find any {} in your log.", query.medication),
                    None,
                )
            },
            |row| Self::describe(query.kind, &row),
        ))
    }

    fn describe(kind: QueryKind, row: &MedicationRow) -> TrackerResponse {
        let data = ResponseData::from_row(row, kind == QueryKind::LastDose);
        let message = match &data.dosage {
            Some(dosage) => format!(
                "Your last dose of {} was {dosage} on {} at {}.",
                data.medication, data.date, data.time
            ),
            None => format!(
                "Your last {} was on {} at {}.",
                data.medication, data.date, data.time
            ),
        };
        TrackerResponse::answer(message, Some(data))
    }
}
