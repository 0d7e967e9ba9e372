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

//! Per-session sequencing of transcript fragments.
//!
//! A session is either listening or awaiting medication details after a
//! trigger phrase. [`MedicationTracker`] drives one session through
//! question → trigger → details-or-timeout, one fragment at a time, while the
//! [`SessionRegistry`] keeps session state bounded in time and count.

mod registry;
mod state;
mod tracker;

pub use registry::{RegistryConfig, SessionRegistry};
pub use state::{SessionPhase, SessionState};
pub use tracker::{MedicationTracker, TrackerConfig};
