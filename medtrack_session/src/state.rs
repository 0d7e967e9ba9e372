//! State of a single conversation session.

use chrono::{Duration, NaiveDateTime};

/// Whether a session is waiting for medication details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Listening,
    AwaitingDetails { armed_at: NaiveDateTime },
}

/// Mutable per-session record. Created lazily on the first fragment.
#[derive(Debug, Clone)]
pub struct SessionState {
    session_id: String,
    phase: SessionPhase,
    last_seen_text: String,
    last_activity: NaiveDateTime,
}

impl SessionState {
    #[must_use]
    pub fn new(session_id: &str, now: NaiveDateTime) -> Self {
        Self {
            session_id: session_id.to_string(),
            phase: SessionPhase::Listening,
            last_seen_text: String::new(),
            last_activity: now,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn awaiting_details(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingDetails { .. })
    }

    #[must_use]
    pub const fn armed_at(&self) -> Option<NaiveDateTime> {
        match self.phase {
            SessionPhase::AwaitingDetails { armed_at } => Some(armed_at),
            SessionPhase::Listening => None,
        }
    }

    #[must_use]
    pub fn last_seen_text(&self) -> &str {
        &self.last_seen_text
    }

    #[must_use]
    pub const fn last_activity(&self) -> NaiveDateTime {
        self.last_activity
    }

    pub const fn touch(&mut self, now: NaiveDateTime) {
        self.last_activity = now;
    }

    /// Start waiting for details; `text` is remembered for de-duplication.
    pub fn arm(&mut self, text: &str, now: NaiveDateTime) {
        self.phase = SessionPhase::AwaitingDetails { armed_at: now };
        self.remember(text);
    }

    pub const fn disarm(&mut self) {
        self.phase = SessionPhase::Listening;
    }

    pub fn remember(&mut self, text: &str) {
        text.clone_into(&mut self.last_seen_text);
    }

    /// Identical to the previous fragment of an armed session. Callers only
    /// ignore repeats while the detail window is still open.
    #[must_use]
    pub fn is_repeat(&self, text: &str) -> bool {
        self.awaiting_details() && self.last_seen_text == text
    }

    /// Armed for strictly longer than `timeout`.
    #[must_use]
    pub fn expired(&self, now: NaiveDateTime, timeout: Duration) -> bool {
        self.armed_at().is_some_and(|armed_at| now - armed_at > timeout)
    }

    /// Idle for strictly longer than `ttl`.
    #[must_use]
    pub fn idle_for_longer_than(&self, now: NaiveDateTime, ttl: Duration) -> bool {
        now - self.last_activity > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap_or_default()
    }

    #[test]
    fn test_armed_at_tracks_phase() {
        let mut state = SessionState::new("s1", t0());
        assert!(!state.awaiting_details());
        assert_eq!(state.armed_at(), None);

        state.arm("pill time", t0());
        assert!(state.awaiting_details());
        assert_eq!(state.armed_at(), Some(t0()));
        assert_eq!(state.last_seen_text(), "pill time");

        state.disarm();
        assert!(!state.awaiting_details());
        assert_eq!(state.armed_at(), None);
    }

    #[test]
    fn test_repeat_only_while_armed() {
        let mut state = SessionState::new("s1", t0());
        state.remember("pill time");
        assert!(!state.is_repeat("pill time"));

        state.arm("pill time", t0());
        assert!(state.is_repeat("pill time"));
        assert!(!state.is_repeat("pill time now"));
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut state = SessionState::new("s1", t0());
        let timeout = Duration::seconds(30);
        assert!(!state.expired(t0() + Duration::hours(1), timeout));

        state.arm("pill time", t0());
        assert!(!state.expired(t0() + Duration::seconds(30), timeout));
        assert!(state.expired(t0() + Duration::seconds(31), timeout));
    }
}
