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

//! HTTP transport for the medication tracker.
//!
//! The routes are a thin shell over [`MedicationTracker`]: the webhook hands
//! the newest transcript segment to the tracker on the blocking pool and
//! returns its reply verbatim.
//!
//! [`MedicationTracker`]: medtrack_session::MedicationTracker

pub mod api;
mod server;
mod state;

pub use api::build_router;
pub use server::{SERVICE_NAME, SERVICE_VERSION, serve, spawn_sweeper};
pub use state::AppState;
