#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Runtime configuration loaded from `~/medtrack/config.json` and the environment.

mod schema;

pub use schema::{
    Config, ENV_CSV_PATH, ENV_PORT, HistoryConfig, ServerConfig, SessionConfig, StorageConfig,
};
