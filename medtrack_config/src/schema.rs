use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chrono::Duration;
use medtrack_session::{RegistryConfig, TrackerConfig};
use tracing::{info, warn};

/// Overrides `storage.csv_path`.
pub const ENV_CSV_PATH: &str = "MEDS_CSV_PATH";

/// Overrides `server.port`.
pub const ENV_PORT: &str = "MEDTRACK_PORT";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_csv_path")]
    pub csv_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            csv_path: Self::default_csv_path(),
        }
    }
}

impl StorageConfig {
    fn default_csv_path() -> PathBuf {
        PathBuf::from("medications.csv")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        8000
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    /// Seconds an armed session waits for medication details.
    #[serde(default = "SessionConfig::default_timeout_secs")]
    pub timeout_secs: i64,
    #[serde(default = "SessionConfig::default_idle_ttl_secs")]
    pub idle_ttl_secs: i64,
    #[serde(default = "SessionConfig::default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default = "SessionConfig::default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            idle_ttl_secs: Self::default_idle_ttl_secs(),
            max_sessions: Self::default_max_sessions(),
            sweep_interval_secs: Self::default_sweep_interval_secs(),
        }
    }
}

impl SessionConfig {
    const fn default_timeout_secs() -> i64 {
        30
    }

    const fn default_idle_ttl_secs() -> i64 {
        600
    }

    const fn default_max_sessions() -> usize {
        10_000
    }

    const fn default_sweep_interval_secs() -> u64 {
        60
    }

    #[must_use]
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            detail_timeout: Duration::seconds(self.timeout_secs),
        }
    }

    #[must_use]
    pub fn registry(&self) -> RegistryConfig {
        RegistryConfig {
            idle_ttl: Duration::seconds(self.idle_ttl_secs),
            max_sessions: self.max_sessions.max(1),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_days")]
    pub default_days: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_days: Self::default_days(),
        }
    }
}

impl HistoryConfig {
    const fn default_days() -> i64 {
        7
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("medtrack"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/medtrack/config.json` if present, otherwise defaults, then
    /// apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            info!("No config at {}, using defaults", config_path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Apply `MEDS_CSV_PATH` / `MEDTRACK_PORT` style overrides from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_CSV_PATH).filter(|p| !p.trim().is_empty()) {
            self.storage.csv_path = PathBuf::from(path);
        }

        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Ignoring {ENV_PORT}={port:?}: {e}"),
            }
        }
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set storage.csv_path to where your medication log should live");
        println!("   2. Run 'medtrack serve' and point your device webhook at /medication-tracker");
        println!("   3. Or try it locally with 'medtrack chat'");
        println!();
        println!("🔧 Configuration options:");
        println!("   - session.timeout_secs: how long to wait for details after a trigger");
        println!("   - history.default_days: window used by /medications and 'medtrack history'");
        println!("   - {ENV_CSV_PATH} / {ENV_PORT} environment variables override the file");
        println!();
        Ok(config_path)
    }
}
