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

//! Shared data model for the medication tracker.
//!
//! Every other crate in the workspace speaks in terms of the types defined
//! here: the immutable [`MedicationEvent`], the structured [`TrackerResponse`]
//! handed back to the transport, the [`RecordStore`] seam over durable storage
//! and the [`Clock`] capability used to stamp events.

pub mod clock;
pub mod event;
pub mod response;
pub mod store;
pub mod text;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event::{DATE_FORMAT, MedicationEvent, MedicationRow, NOT_SPECIFIED, TIME_FORMAT};
pub use response::{ResponseData, TrackerResponse, TrackerStatus};
pub use store::{RecordStore, StoreError, medication_matches};
pub use text::{collapse_whitespace, normalize_transcript, title_case};
