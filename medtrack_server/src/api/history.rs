use axum::Json;
use axum::extract::{Query, State};
use medtrack_core::{Clock, MedicationRow, RecordStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub uid: String,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub medications: Vec<MedicationRow>,
}

/// `GET /medications`: events from the last `days` days in log order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let days = params.days.unwrap_or(state.history_days);
    debug!(uid = %params.uid, days, "History requested");

    let tracker = state.tracker;
    let events = tokio::task::spawn_blocking(move || {
        let today = tracker.clock().now().date();
        tracker.store().recent(days, today)
    })
    .await??;

    Ok(Json(HistoryResponse {
        medications: events.iter().map(MedicationRow::from).collect(),
    }))
}
