#![warn(
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

//! Record store implementations.
//!
//! [`CsvRecordStore`] is the durable log; [`MemoryRecordStore`] keeps events
//! for the life of the process only, for dry runs and tests.

mod csv_store;
mod memory;

pub use csv_store::{CsvRecordStore, FALLBACK_DIR, FALLBACK_FILE};
pub use memory::MemoryRecordStore;
