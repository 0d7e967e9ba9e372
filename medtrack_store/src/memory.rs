use chrono::NaiveDate;
use medtrack_core::{MedicationEvent, MedicationRow, RecordStore, StoreError, medication_matches};
use parking_lot::RwLock;

/// Process-local record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    events: RwLock<Vec<MedicationEvent>>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<MedicationEvent> {
        self.events.read().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, event: &MedicationEvent) -> Result<(), StoreError> {
        if event.medication.trim().is_empty() {
            return Err(StoreError::EmptyMedication);
        }
        self.events.write().push(event.clone());
        Ok(())
    }

    fn most_recent_matching(&self, query: &str) -> Result<Option<MedicationRow>, StoreError> {
        Ok(self
            .events
            .read()
            .iter()
            .rev()
            .find(|e| medication_matches(&e.medication, query))
            .map(MedicationRow::from))
    }

    fn recent(
        &self,
        within_days: i64,
        today: NaiveDate,
    ) -> Result<Vec<MedicationEvent>, StoreError> {
        Ok(self
            .events
            .read()
            .iter()
            .filter(|e| (today - e.date).num_days() <= within_days)
            .cloned()
            .collect())
    }
}
