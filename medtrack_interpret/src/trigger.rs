//! Intake-announcement detection by phrase containment.

/// Phrases that announce an intake is about to happen.
pub const DEFAULT_TRIGGER_PHRASES: &[&str] = &[
    "i am about to take some medication",
    "i'm about to take some medication",
    "about to take medication",
    "taking medication now",
    "i am taking medication",
    "i need to take my medication",
    "time to take my medication",
    "remind me to take my medication",
    "i'm taking my medicine",
    "medicine time",
    "pill time",
    "i'm about to take my pills",
    "time for my medication",
    "i'm going to take my medication",
];

/// Classifies already case-folded, trimmed text as a trigger.
///
/// Any phrase contained in the text is a hit; phrases carry no priority.
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    phrases: Vec<String>,
}

impl TriggerDetector {
    /// Build a detector from custom phrases. Phrases are lower-cased and
    /// blank entries are dropped.
    #[must_use]
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TRIGGER_PHRASES)
    }

    /// The first configured phrase found in `text`.
    #[must_use]
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| text.contains(phrase.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_trigger(&self, text: &str) -> bool {
        self.matched_phrase(text).is_some()
    }

    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for TriggerDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_phrase_triggers() {
        let detector = TriggerDetector::with_defaults();
        for phrase in DEFAULT_TRIGGER_PHRASES {
            assert!(detector.is_trigger(phrase), "{phrase} should trigger");
            let padded = format!("okay so {phrase} right now");
            assert!(detector.is_trigger(&padded), "{padded} should trigger");
        }
    }

    #[test]
    fn test_non_trigger_text() {
        let detector = TriggerDetector::with_defaults();
        assert!(!detector.is_trigger("taking 10mg of aspirin"));
        assert!(!detector.is_trigger("what a lovely day"));
        assert!(!detector.is_trigger(""));
    }

    #[test]
    fn test_detector_does_not_normalize() {
        let detector = TriggerDetector::with_defaults();
        assert!(!detector.is_trigger("PILL TIME"));
    }

    #[test]
    fn test_custom_phrases_are_lowercased() {
        let detector = TriggerDetector::new(["Dose O'Clock", "  "]);
        assert_eq!(detector.phrases().len(), 1);
        assert_eq!(detector.matched_phrase("it's dose o'clock"), Some("dose o'clock"));
    }

    #[test]
    fn test_repeat_calls_agree() {
        let detector = TriggerDetector::with_defaults();
        let text = "alright, medicine time";
        assert_eq!(detector.is_trigger(text), detector.is_trigger(text));
    }
}
