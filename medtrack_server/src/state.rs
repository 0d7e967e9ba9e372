use std::sync::Arc;

use medtrack_session::MedicationTracker;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<MedicationTracker>,
    /// Window used by `GET /medications` when `days` is omitted.
    pub history_days: i64,
}

impl AppState {
    #[must_use]
    pub const fn new(tracker: Arc<MedicationTracker>, history_days: i64) -> Self {
        Self {
            tracker,
            history_days,
        }
    }
}
