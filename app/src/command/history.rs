use medtrack_config::Config;
use medtrack_core::{Clock, MedicationEvent, RecordStore, SystemClock};

/// Input parameters for the History command strategy.
#[derive(Debug, Clone, Copy)]
pub struct HistoryInput {
    pub days: Option<i64>,
}

/// Strategy for printing recently logged medications.
#[derive(Debug, Clone, Copy)]
pub struct HistoryStrategy;

impl super::CommandStrategy for HistoryStrategy {
    type Input = HistoryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let days = input.days.unwrap_or(config.history.default_days);
        let store = super::open_csv_store(&config)?;
        let events = store.recent(days, SystemClock.now().date())?;

        if events.is_empty() {
            println!("No medications logged in the last {days} days.");
            return Ok(());
        }

        println!("Medications logged in the last {days} days:\n");
        print_table(&events);
        Ok(())
    }
}

fn print_table(events: &[MedicationEvent]) {
    let name_width = events
        .iter()
        .map(|e| e.medication.chars().count())
        .max()
        .unwrap_or(0)
        .max("Medication".len());

    println!("{:<10}  {:<8}  {:<name_width$}  Dosage", "Date", "Time", "Medication");
    for event in events {
        println!(
            "{:<10}  {:<8}  {:<name_width$}  {}",
            event.date_display(),
            event.time_display(),
            event.medication,
            event.dosage
        );
    }
}
