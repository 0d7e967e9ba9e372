//! Structured replies returned to the transport for every transcript.

use serde::{Deserialize, Serialize};

use crate::event::{MedicationEvent, MedicationRow};

/// Outcome tag of processing one transcript fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerStatus {
    /// Nothing actionable; the tracker keeps listening.
    Listening,
    /// A trigger phrase armed the session.
    Triggered,
    /// An event was written to the record store.
    Logged,
    /// A history question was answered.
    Answer,
    /// The record store rejected the write.
    Error,
    /// The armed session expired without usable details.
    Timeout,
    /// The request carried no transcript.
    NoData,
}

impl TrackerStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Listening => "listening",
            Self::Triggered => "triggered",
            Self::Logged => "logged",
            Self::Answer => "answer",
            Self::Error => "error",
            Self::Timeout => "timeout",
            Self::NoData => "no_data",
        }
    }
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event details attached to `logged` and `answer` replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    pub medication: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    pub date: String,
    pub time: String,
}

impl ResponseData {
    #[must_use]
    pub fn from_event(event: &MedicationEvent, with_dosage: bool) -> Self {
        Self {
            medication: event.medication.clone(),
            dosage: with_dosage.then(|| event.dosage.clone()),
            date: event.date_display(),
            time: event.time_display(),
        }
    }

    /// Data echoed from a stored row, text as written.
    #[must_use]
    pub fn from_row(row: &MedicationRow, with_dosage: bool) -> Self {
        Self {
            medication: row.medication.trim().to_string(),
            dosage: with_dosage.then(|| row.dosage.trim().to_string()),
            date: row.date.trim().to_string(),
            time: row.time.trim().to_string(),
        }
    }
}

/// Reply for one transcript: a status tag plus optional human-readable text.
///
/// `message` is the short form shown on the device, `response` the longer
/// spoken form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerResponse {
    pub status: TrackerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl TrackerResponse {
    const fn bare(status: TrackerStatus) -> Self {
        Self {
            status,
            message: None,
            response: None,
            data: None,
        }
    }

    #[must_use]
    pub const fn listening() -> Self {
        Self::bare(TrackerStatus::Listening)
    }

    #[must_use]
    pub const fn no_data() -> Self {
        Self::bare(TrackerStatus::NoData)
    }

    #[must_use]
    pub fn triggered() -> Self {
        Self {
            message: Some("Okay, what medication are you taking?".to_string()),
            response: Some(
                "I'm listening for your medication details. Please tell me what medication and dosage you're taking."
                    .to_string(),
            ),
            ..Self::bare(TrackerStatus::Triggered)
        }
    }

    #[must_use]
    pub fn logged(event: &MedicationEvent) -> Self {
        let time = event.time_display();
        Self {
            message: Some(format!(
                "Perfect! I've logged {} - {} at {time}",
                event.medication, event.dosage
            )),
            response: Some(format!(
                "Great! I've recorded that you took {} {} at {time}. Your medication has been logged.",
                event.medication, event.dosage
            )),
            data: Some(ResponseData::from_event(event, true)),
            ..Self::bare(TrackerStatus::Logged)
        }
    }

    #[must_use]
    pub fn write_failed() -> Self {
        Self {
            message: Some(
                "Sorry, I couldn't save that to your medication log. Please try again.".to_string(),
            ),
            response: Some(
                "I'm sorry, but I couldn't save your medication information right now. Please try again in a moment."
                    .to_string(),
            ),
            ..Self::bare(TrackerStatus::Error)
        }
    }

    #[must_use]
    pub fn timed_out() -> Self {
        Self {
            message: Some("Session timed out. Please try again.".to_string()),
            response: Some(
                "I didn't catch the medication details. Please say 'time for my medication' again and then tell me what you're taking."
                    .to_string(),
            ),
            ..Self::bare(TrackerStatus::Timeout)
        }
    }

    #[must_use]
    pub fn answer(message: String, data: Option<ResponseData>) -> Self {
        Self {
            message: Some(message),
            data,
            ..Self::bare(TrackerStatus::Answer)
        }
    }

    /// Best text to show a person: the message, else the spoken response.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.response.as_deref())
            .unwrap_or("Listening...")
    }
}
