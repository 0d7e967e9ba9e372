use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDateTime;
use medtrack_core::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::server::{SERVICE_NAME, SERVICE_VERSION};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetupParams {
    pub uid: String,
}

#[derive(Debug, Serialize)]
pub struct SetupStatus {
    pub is_setup_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub timestamp: NaiveDateTime,
}

/// No per-user setup is needed.
pub async fn setup_status(Query(params): Query<SetupParams>) -> Json<SetupStatus> {
    debug!(uid = %params.uid, "Setup status checked");
    Json(SetupStatus {
        is_setup_completed: true,
    })
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        storage: "Local CSV",
        timestamp: state.tracker.clock().now(),
    })
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "app": SERVICE_NAME,
        "description": "Medication tracking for wearable transcripts, stored locally in CSV",
        "version": SERVICE_VERSION,
        "storage": "Local CSV file",
        "endpoints": {
            "medication-tracker": "POST - Process medication transcripts",
            "setup-status": "GET - Check app setup status",
            "health": "GET - Health check",
            "medications": "GET - Get medication history"
        },
        "setup_instructions": "No external services required. Run 'medtrack serve' and point your device webhook at /medication-tracker."
    }))
}
