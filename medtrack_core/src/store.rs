//! The durable record store seam.

use chrono::NaiveDate;
use thiserror::Error;

use crate::event::{MedicationEvent, MedicationRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record format error: {0}")]
    Format(String),

    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("medication name is empty")]
    EmptyMedication,
}

/// Append-only, ordered store of medication events.
///
/// Implementations must serialize concurrent appends so that rows are never
/// interleaved, and must not report success before the row is durable.
pub trait RecordStore: Send + Sync {
    /// Append one event at the end of the log.
    fn append(&self, event: &MedicationEvent) -> Result<(), StoreError>;

    /// Latest appended row whose medication loosely matches `query`.
    ///
    /// Matching looks at the medication column only, so a row with an
    /// unreadable date or time is still found and echoed as stored.
    fn most_recent_matching(&self, query: &str) -> Result<Option<MedicationRow>, StoreError>;

    /// Events dated no more than `within_days` before `today`, in append order.
    fn recent(
        &self,
        within_days: i64,
        today: NaiveDate,
    ) -> Result<Vec<MedicationEvent>, StoreError>;
}

/// Case-insensitive containment in either direction.
///
/// "aspirin" matches "Baby Aspirin" and vice versa. Short names can produce
/// false positives; empty input on either side never matches.
#[must_use]
pub fn medication_matches(recorded: &str, queried: &str) -> bool {
    let recorded = recorded.trim().to_lowercase();
    let queried = queried.trim().to_lowercase();
    if recorded.is_empty() || queried.is_empty() {
        return false;
    }
    recorded.contains(&queried) || queried.contains(&recorded)
}
