use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medtrack_core::StoreError;
use tokio::task::JoinError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("record store: {0}")]
    Store(#[from] StoreError),
    #[error("worker task failed: {0}")]
    Worker(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}
