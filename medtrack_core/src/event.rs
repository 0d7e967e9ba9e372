//! Medication events and their tabular row form.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Calendar date format used in storage and responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 12-hour clock with meridiem, e.g. `09:05 AM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Dosage recorded when only a medication name could be recovered.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A single logged intake. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationEvent {
    pub date: NaiveDate,
    /// Minute precision; seconds are dropped at creation.
    pub time: NaiveTime,
    pub medication: String,
    pub dosage: String,
    pub notes: String,
}

impl MedicationEvent {
    /// Create an event stamped at `at`.
    ///
    /// Returns `None` when the medication name is empty after trimming.
    #[must_use]
    pub fn new(at: NaiveDateTime, medication: &str, dosage: &str) -> Option<Self> {
        let medication = medication.trim();
        if medication.is_empty() {
            return None;
        }

        let time = NaiveTime::from_hms_opt(at.hour(), at.minute(), 0)?;
        Some(Self {
            date: at.date(),
            time,
            medication: medication.to_string(),
            dosage: dosage.trim().to_string(),
            notes: String::new(),
        })
    }

    #[must_use]
    pub fn date_display(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn time_display(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

/// The stored row: every column is plain text, header names are capitalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicationRow {
    pub date: String,
    pub time: String,
    pub medication: String,
    pub dosage: String,
    #[serde(default)]
    pub notes: String,
}

impl MedicationRow {
    /// Column names in storage order.
    pub const HEADER: [&'static str; 5] = ["Date", "Time", "Medication", "Dosage", "Notes"];
}

impl From<&MedicationEvent> for MedicationRow {
    fn from(event: &MedicationEvent) -> Self {
        Self {
            date: event.date_display(),
            time: event.time_display(),
            medication: event.medication.clone(),
            dosage: event.dosage.clone(),
            notes: event.notes.clone(),
        }
    }
}

impl TryFrom<MedicationRow> for MedicationEvent {
    type Error = StoreError;

    fn try_from(row: MedicationRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT)
            .map_err(|e| StoreError::Malformed(format!("date {:?}: {e}", row.date)))?;
        let time = NaiveTime::parse_from_str(row.time.trim(), TIME_FORMAT)
            .map_err(|e| StoreError::Malformed(format!("time {:?}: {e}", row.time)))?;

        let medication = row.medication.trim();
        if medication.is_empty() {
            return Err(StoreError::EmptyMedication);
        }

        Ok(Self {
            date,
            time,
            medication: medication.to_string(),
            dosage: row.dosage,
            notes: row.notes,
        })
    }
}
