//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input, dispatched
//! statically from `main`.

use std::sync::Arc;

use medtrack_config::Config;
use medtrack_core::{RecordStore, SystemClock};
use medtrack_session::{MedicationTracker, SessionRegistry};
use medtrack_store::{CsvRecordStore, MemoryRecordStore};
use tracing::info;

mod chat;
mod history;
mod info;
mod init;
mod serve;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use history::{HistoryInput, HistoryStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Open the configured CSV log.
fn open_csv_store(config: &Config) -> anyhow::Result<Arc<CsvRecordStore>> {
    let store = CsvRecordStore::open(&config.storage.csv_path)?;
    info!("Medication log: {}", store.path().display());
    Ok(Arc::new(store))
}

/// Build a tracker over the configured store, or an in-memory one for dry runs.
fn build_tracker(config: &Config, dry_run: bool) -> anyhow::Result<Arc<MedicationTracker>> {
    let store: Arc<dyn RecordStore> = if dry_run {
        info!("Dry run: events are kept in memory only");
        Arc::new(MemoryRecordStore::new())
    } else {
        open_csv_store(config)?
    };

    let sessions = Arc::new(SessionRegistry::new(config.session.registry()));
    let tracker = MedicationTracker::new(
        store,
        sessions,
        Arc::new(SystemClock),
        config.session.tracker(),
    )?;
    Ok(Arc::new(tracker))
}
