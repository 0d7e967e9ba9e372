//! Durable CSV log of medication events.
//!
//! The file has a fixed header (`Date,Time,Medication,Dosage,Notes`) and rows
//! are only ever appended. Appends are serialized inside the process and
//! synced to disk before they are reported as successful.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use medtrack_core::{MedicationEvent, MedicationRow, RecordStore, StoreError, medication_matches};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Directory, relative to the working directory, used when the configured
/// location cannot be prepared.
pub const FALLBACK_DIR: &str = "data";

/// File name used inside [`FALLBACK_DIR`].
pub const FALLBACK_FILE: &str = "medications.csv";

/// Append-only CSV record store.
#[derive(Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    /// Open (creating if needed) the log at `path`, falling back to
    /// `./data/medications.csv` when the location cannot be prepared.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let fallback = std::env::current_dir()?.join(FALLBACK_DIR);
        Self::open_with_fallback(path, &fallback)
    }

    /// Like [`Self::open`] with an explicit fallback directory.
    pub fn open_with_fallback(
        path: impl Into<PathBuf>,
        fallback_dir: &Path,
    ) -> Result<Self, StoreError> {
        let requested = path.into();
        match Self::prepare(&requested) {
            Ok(()) => Ok(Self::at(requested)),
            Err(e) => {
                let fallback = fallback_dir.join(FALLBACK_FILE);
                warn!(
                    "Cannot use medication log at {} ({e}). Falling back to {}",
                    requested.display(),
                    fallback.display()
                );
                Self::prepare(&fallback)?;
                Ok(Self::at(fallback))
            }
        }
    }

    fn at(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Location actually in use, after any fallback.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn prepare(path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let is_empty = match fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if is_empty {
            let mut writer = csv::Writer::from_path(path).map_err(from_csv)?;
            writer
                .write_record(MedicationRow::HEADER)
                .map_err(from_csv)?;
            writer.flush()?;
            info!("Created new medication log: {}", path.display());
        }

        Ok(())
    }

    /// Every readable row in file order, paired with its line number.
    /// Dates and times are not validated here.
    fn load_rows(&self) -> Result<Vec<(usize, MedicationRow)>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(from_csv)?;

        let mut rows = Vec::new();
        for (index, row) in reader.deserialize::<MedicationRow>().enumerate() {
            // Line numbers are 1-based and the header is line 1.
            let line = index + 2;
            match row.map_err(from_csv) {
                Ok(row) => rows.push((line, row)),
                Err(e) => debug!("Skipping line {line} of medication log: {e}"),
            }
        }

        Ok(rows)
    }

    /// Every well-formed event in file order. Malformed rows are skipped.
    fn load(&self) -> Result<Vec<MedicationEvent>, StoreError> {
        Ok(self
            .load_rows()?
            .into_iter()
            .filter_map(|(line, row)| match MedicationEvent::try_from(row) {
                Ok(event) => Some(event),
                Err(e) => {
                    debug!("Skipping line {line} of medication log: {e}");
                    None
                }
            })
            .collect())
    }
}

impl RecordStore for CsvRecordStore {
    fn append(&self, event: &MedicationEvent) -> Result<(), StoreError> {
        if event.medication.trim().is_empty() {
            return Err(StoreError::EmptyMedication);
        }
        let row = MedicationRow::from(event);

        let _guard = self.write_lock.lock();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer
                .write_record(MedicationRow::HEADER)
                .map_err(from_csv)?;
        }
        writer.serialize(&row).map_err(from_csv)?;

        let file = writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_data()?;

        info!("Added medication: {} - {}", row.medication, row.dosage);
        Ok(())
    }

    fn most_recent_matching(&self, query: &str) -> Result<Option<MedicationRow>, StoreError> {
        Ok(self
            .load_rows()?
            .into_iter()
            .rev()
            .map(|(_, row)| row)
            .find(|row| medication_matches(&row.medication, query)))
    }

    fn recent(
        &self,
        within_days: i64,
        today: NaiveDate,
    ) -> Result<Vec<MedicationEvent>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|e| (today - e.date).num_days() <= within_days)
            .collect())
    }
}

fn from_csv(err: csv::Error) -> StoreError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => StoreError::Io(io),
        kind => StoreError::Format(format!("{kind:?}")),
    }
}
