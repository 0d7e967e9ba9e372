//! Route table and handlers.

mod error;
mod history;
mod status;
mod transcript;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::ApiError;
pub use transcript::{Segment, TrackerParams, TranscriptPayload};

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .route("/setup-status", get(status::setup_status))
        .route("/medication-tracker", post(transcript::process))
        .route("/medications", get(history::list))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
