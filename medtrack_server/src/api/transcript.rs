use axum::Json;
use axum::extract::{Query, State};
use medtrack_core::TrackerResponse;
use serde::Deserialize;
use tracing::debug;

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrackerParams {
    pub session_id: String,
    pub uid: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TranscriptPayload {
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Echoed by some devices; the query parameter is authoritative.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub text: String,
}

/// `POST /medication-tracker`: feed the newest segment through the tracker.
pub async fn process(
    State(state): State<AppState>,
    Query(params): Query<TrackerParams>,
    payload: Option<Json<TranscriptPayload>>,
) -> Result<Json<TrackerResponse>, ApiError> {
    let Some(Json(mut payload)) = payload else {
        return Ok(Json(TrackerResponse::no_data()));
    };
    let Some(segment) = payload.segments.pop() else {
        return Ok(Json(TrackerResponse::no_data()));
    };

    debug!(uid = %params.uid, session_id = %params.session_id, "Transcript segment received");

    let tracker = state.tracker;
    let session_id = params.session_id;
    let reply =
        tokio::task::spawn_blocking(move || tracker.process(&session_id, &segment.text)).await?;
    Ok(Json(reply))
}
