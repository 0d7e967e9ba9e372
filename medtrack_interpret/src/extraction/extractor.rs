//! Ordered, first-match-wins extraction over compiled rules.

use std::sync::Arc;

use medtrack_core::{
    Clock, MedicationEvent, NOT_SPECIFIED, collapse_whitespace, normalize_transcript, title_case,
};
use regex::Regex;
use tracing::debug;

use crate::extraction::rules::{ExtractionRule, RuleDef, RuleError, RuleMatch, default_rules};

/// Words removed before treating leftover text as a bare medication name.
const STOP_WORDS: &str =
    r"\b(?:i am|taking|took|take|some|medication|medicine|pill|tablet|capsule|mg|ml)\b";

/// Leftover text must be longer than this many characters.
const MIN_FALLBACK_LEN: usize = 2;

/// Converts free text into a [`MedicationEvent`].
pub struct PatternExtractor {
    rules: Vec<ExtractionRule>,
    stop_words: Regex,
    clock: Arc<dyn Clock>,
}

impl PatternExtractor {
    /// Compile `defs` in the given priority order.
    pub fn new(defs: &[RuleDef], clock: Arc<dyn Clock>) -> Result<Self, RuleError> {
        let rules = defs
            .iter()
            .map(RuleDef::build)
            .collect::<Result<Vec<_>, _>>()?;

        let stop_words = Regex::new(STOP_WORDS).map_err(|source| RuleError::Regex {
            id: "fallback_stop_words".to_string(),
            source,
        })?;

        Ok(Self {
            rules,
            stop_words,
            clock,
        })
    }

    pub fn with_defaults(clock: Arc<dyn Clock>) -> Result<Self, RuleError> {
        Self::new(&default_rules(), clock)
    }

    #[must_use]
    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Medication and dosage for `text`, without stamping a time.
    ///
    /// Pure: the same input always yields the same result.
    #[must_use]
    pub fn interpret(&self, text: &str) -> Option<RuleMatch> {
        let text = normalize_transcript(text);
        if text.is_empty() {
            return None;
        }

        for rule in &self.rules {
            if let Some(found) = rule.apply(&text) {
                debug!(rule = rule.id(), medication = %found.medication, "extraction rule matched");
                return Some(found);
            }
        }

        self.fallback(&text)
    }

    /// Full extraction: a match stamped with the clock's current time.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<MedicationEvent> {
        let found = self.interpret(text)?;
        MedicationEvent::new(self.clock.now(), &found.medication, &found.dosage)
    }

    fn fallback(&self, text: &str) -> Option<RuleMatch> {
        let stripped = self.stop_words.replace_all(text, "");
        let residue = collapse_whitespace(&stripped);

        if residue.chars().count() <= MIN_FALLBACK_LEN {
            return None;
        }

        debug!(residue = %residue, "no rule matched, using stop-word fallback");
        Some(RuleMatch {
            medication: title_case(&residue),
            dosage: NOT_SPECIFIED.to_string(),
        })
    }
}
