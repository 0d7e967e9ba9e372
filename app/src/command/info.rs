use medtrack_config::{Config, ENV_CSV_PATH, ENV_PORT};
use medtrack_store::CsvRecordStore;

/// Strategy for displaying the effective configuration.
///
/// Opens the record store so the path shown is the one actually written to,
/// including the fallback location.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== medtrack Configuration ===\n");

        match Config::config_path() {
            Ok(path) if path.exists() => println!("Config file: {}", path.display()),
            Ok(path) => println!("Config file: {} (not found, using defaults)", path.display()),
            Err(e) => println!("Config file: unavailable ({e})"),
        }
        println!();

        println!("Storage:");
        println!("  Configured: {}", config.storage.csv_path.display());
        match CsvRecordStore::open(&config.storage.csv_path) {
            Ok(store) => println!("  Active: {}", store.path().display()),
            Err(e) => {
                println!("  Status: Unavailable");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Server:");
        println!("  Listen: {}:{}", config.server.host, config.server.port);
        println!();

        println!("Sessions:");
        println!("  Detail Timeout: {}s", config.session.timeout_secs);
        println!("  Idle TTL: {}s", config.session.idle_ttl_secs);
        println!("  Max Sessions: {}", config.session.max_sessions);
        println!("  Sweep Interval: {}s", config.session.sweep_interval_secs);
        println!();

        println!("History:");
        println!("  Default Days: {}", config.history.default_days);
        println!();

        println!("Environment overrides: {ENV_CSV_PATH}, {ENV_PORT}");

        Ok(())
    }
}
