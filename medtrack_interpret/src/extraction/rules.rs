//! Declarative extraction rules.
//!
//! A rule pairs a regex with capture-group templates (`$1`, `$2`, ...) naming
//! where the medication, the amount and the unit come from. Keeping the
//! templates as data lets the rule list be serialized, reordered or extended
//! without touching the matcher code.

use medtrack_core::title_case;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const VERB: &str = r"(?:taking|took|take)";
const AMOUNT: &str = r"(\d+(?:\.\d+)?)";
const UNIT: &str = r"(mg|ml|pills?|tablets?|units?|capsules?)";
const COUNT_WORD: &str = r"(one|two|three|four|five|six|seven|eight|nine|ten|a|an)";
const PILL_NOUN: &str = r"(pill|tablet|capsule)";

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid regex in rule {id}: {source}")]
    Regex {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {id} references capture group ${group} but the pattern has {available}")]
    Template {
        id: String,
        group: usize,
        available: usize,
    },
}

/// Serializable definition of one extraction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Stable identifier, used in logs.
    pub id: String,

    /// Regex applied to case-folded, trimmed text.
    pub pattern: String,

    /// Template for the medication name.
    pub medication: String,

    /// Template for the amount; count words are mapped to digits.
    pub amount: String,

    /// Template for the unit.
    pub unit: String,
}

impl RuleDef {
    fn new(id: &str, pattern: String, medication: &str, amount: &str, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            pattern,
            medication: medication.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
        }
    }

    /// Compile into an [`ExtractionRule`].
    pub fn build(&self) -> Result<ExtractionRule, RuleError> {
        let regex = Regex::new(&self.pattern).map_err(|source| RuleError::Regex {
            id: self.id.clone(),
            source,
        })?;

        let available = regex.captures_len() - 1;
        for template in [&self.medication, &self.amount, &self.unit] {
            if let Some(group) = highest_group(template).filter(|g| *g > available) {
                return Err(RuleError::Template {
                    id: self.id.clone(),
                    group,
                    available,
                });
            }
        }

        Ok(ExtractionRule {
            id: self.id.clone(),
            regex,
            medication: self.medication.clone(),
            amount: self.amount.clone(),
            unit: self.unit.clone(),
        })
    }
}

/// The built-in rules, highest priority first.
#[must_use]
pub fn default_rules() -> Vec<RuleDef> {
    vec![
        // "taking 10mg of aspirin"
        RuleDef::new(
            "verb_amount_unit_name",
            format!(r"{VERB}\s+{AMOUNT}\s*{UNIT}\s+(?:of\s+)?(.+)"),
            "$3",
            "$1",
            "$2",
        ),
        // "taking aspirin 10mg"
        RuleDef::new(
            "verb_name_amount_unit",
            format!(r"{VERB}\s+(.+?)\s+{AMOUNT}\s*{UNIT}"),
            "$1",
            "$2",
            "$3",
        ),
        // "10mg of aspirin"
        RuleDef::new(
            "amount_unit_name",
            format!(r"{AMOUNT}\s*{UNIT}\s+(?:of\s+)?(.+)"),
            "$3",
            "$1",
            "$2",
        ),
        // "aspirin 10mg"
        RuleDef::new(
            "name_amount_unit",
            format!(r"(.+?)\s+{AMOUNT}\s*{UNIT}"),
            "$1",
            "$2",
            "$3",
        ),
        // "took one pill of tylenol"
        RuleDef::new(
            "verb_count_pill_name",
            format!(r"{VERB}\s+{COUNT_WORD}\s+{PILL_NOUN}\s+(?:of\s+)?(.+)"),
            "$3",
            "$1",
            "$2",
        ),
        // "taking aspirin one pill"
        RuleDef::new(
            "verb_name_count_pill",
            format!(r"{VERB}\s+(.+?)\s+{COUNT_WORD}\s+{PILL_NOUN}"),
            "$1",
            "$2",
            "$3",
        ),
    ]
}

/// Medication and dosage recovered from one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Title-cased name.
    pub medication: String,
    /// `"<amount> <unit>"`, or the not-specified marker for fallbacks.
    pub dosage: String,
}

/// A compiled [`RuleDef`].
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    id: String,
    regex: Regex,
    medication: String,
    amount: String,
    unit: String,
}

impl ExtractionRule {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Apply the rule to normalized text.
    ///
    /// A match whose medication template expands to nothing is treated as a
    /// miss so that later rules still get a chance.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = self.regex.captures(text)?;

        let medication = expand_template(&self.medication, &caps);
        if medication.is_empty() {
            return None;
        }

        let amount = expand_template(&self.amount, &caps);
        let amount = count_word_digits(&amount).map_or(amount.clone(), str::to_string);
        let unit = expand_template(&self.unit, &caps);

        Some(RuleMatch {
            medication: title_case(&medication),
            dosage: format!("{amount} {unit}"),
        })
    }
}

/// Digit string for a spoken count; articles count as one.
#[must_use]
pub fn count_word_digits(word: &str) -> Option<&'static str> {
    let digits = match word {
        "one" | "a" | "an" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",
        "ten" => "10",
        _ => return None,
    };
    Some(digits)
}

/// Expand `$1`..`$9` placeholders with capture groups in a single pass over
/// the template; captured text is never re-expanded.
fn expand_template(template: &str, caps: &Captures) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        let group = chars
            .peek()
            .and_then(|next| next.to_digit(10))
            .filter(|digit| (1..=9).contains(digit));
        match (c, group) {
            ('$', Some(group)) => {
                chars.next();
                if let Some(m) = caps.get(group as usize) {
                    result.push_str(m.as_str());
                }
            }
            _ => result.push(c),
        }
    }

    result.trim().to_string()
}

fn highest_group(template: &str) -> Option<usize> {
    (1..=9).rev().find(|i| template.contains(&format!("${i}")))
}
