//! Integration tests for the trigger → details → log/timeout cycle.
//!
//! These tests verify that:
//! - a trigger arms the session and a repeated trigger is ignored
//! - valid details inside the window are logged and disarm the session
//! - details arriving after the window produce a timeout
//! - a repeated fragment is only ignored while the window is open
//! - store failures surface as an `error` reply
//! - concurrent fragments for one session log at most one event

use std::sync::Arc;
use std::thread;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use medtrack_core::{
    Clock, FixedClock, MedicationEvent, MedicationRow, RecordStore, StoreError, TrackerStatus,
};
use medtrack_session::{MedicationTracker, SessionRegistry, TrackerConfig};
use medtrack_store::{CsvRecordStore, MemoryRecordStore};

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default()
}

struct Harness {
    tracker: MedicationTracker,
    store: Arc<MemoryRecordStore>,
    clock: Arc<FixedClock>,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryRecordStore::new());
    let clock = Arc::new(FixedClock::new(t0()));
    let tracker = MedicationTracker::new(
        store.clone(),
        Arc::new(SessionRegistry::default()),
        clock.clone(),
        TrackerConfig::default(),
    )
    .unwrap_or_else(|e| panic!("tracker should build: {e}"));
    Harness {
        tracker,
        store,
        clock,
    }
}

fn armed(tracker: &MedicationTracker, session_id: &str) -> bool {
    tracker
        .sessions()
        .snapshot(session_id)
        .is_some_and(|s| s.awaiting_details())
}

#[test]
fn test_trigger_repeat_then_log() {
    let h = harness();

    let reply = h.tracker.process("s1", "Okay, pill time");
    assert_eq!(reply.status, TrackerStatus::Triggered);
    assert!(armed(&h.tracker, "s1"));

    h.clock.advance(Duration::seconds(5));
    let reply = h.tracker.process("s1", "okay, pill time  ");
    assert_eq!(reply.status, TrackerStatus::Listening);
    let state = h.tracker.sessions().snapshot("s1");
    assert_eq!(state.and_then(|s| s.armed_at()), Some(t0()));

    h.clock.advance(Duration::seconds(10));
    let reply = h.tracker.process("s1", "I'm taking 10mg of aspirin");
    assert_eq!(reply.status, TrackerStatus::Logged);
    assert_eq!(
        reply.message.as_deref(),
        Some("Perfect! I've logged Aspirin - 10 mg at 08:00 AM")
    );
    assert!(!armed(&h.tracker, "s1"));
    assert_eq!(h.store.len(), 1);
}

#[test]
fn test_details_without_trigger_are_not_logged() {
    let h = harness();
    let reply = h.tracker.process("s1", "taking 10mg of aspirin");
    assert_eq!(reply.status, TrackerStatus::Listening);
    assert!(h.store.is_empty());
}

#[test]
fn test_miss_within_window_keeps_waiting() {
    let h = harness();
    h.tracker.process("s1", "time for my medication");

    h.clock.advance(Duration::seconds(10));
    let reply = h.tracker.process("s1", "hm");
    assert_eq!(reply.status, TrackerStatus::Listening);
    assert!(armed(&h.tracker, "s1"));

    h.clock.advance(Duration::seconds(10));
    let reply = h.tracker.process("s1", "took a pill of tylenol");
    assert_eq!(reply.status, TrackerStatus::Logged);
    let data = reply.data.unwrap_or_else(|| panic!("logged reply has data"));
    assert_eq!(data.medication, "Tylenol");
    assert_eq!(data.dosage.as_deref(), Some("1 pill"));
}

#[test]
fn test_timeout_after_window() {
    let h = harness();
    h.tracker.process("s1", "medicine time");

    h.clock.advance(Duration::seconds(31));
    let reply = h.tracker.process("s1", "uh");
    assert_eq!(reply.status, TrackerStatus::Timeout);
    assert!(!armed(&h.tracker, "s1"));

    // Back to listening: details alone are no longer logged.
    let reply = h.tracker.process("s1", "aspirin 10mg");
    assert_eq!(reply.status, TrackerStatus::Listening);
    assert!(h.store.is_empty());
}

#[test]
fn test_repeated_miss_still_times_out() {
    let h = harness();
    h.tracker.process("s1", "pill time");

    h.clock.advance(Duration::seconds(5));
    let reply = h.tracker.process("s1", "uh");
    assert_eq!(reply.status, TrackerStatus::Listening);

    h.clock.advance(Duration::seconds(10));
    let reply = h.tracker.process("s1", "uh");
    assert_eq!(reply.status, TrackerStatus::Listening);
    assert!(armed(&h.tracker, "s1"));

    h.clock.advance(Duration::seconds(30));
    let reply = h.tracker.process("s1", "uh");
    assert_eq!(reply.status, TrackerStatus::Timeout);
    assert!(!armed(&h.tracker, "s1"));
}

#[test]
fn test_valid_details_after_window_still_log() {
    let h = harness();
    h.tracker.process("s1", "pill time");

    h.clock.advance(Duration::seconds(45));
    let reply = h.tracker.process("s1", "aspirin 10mg");
    assert_eq!(reply.status, TrackerStatus::Logged);
}

#[test]
fn test_sessions_are_independent() {
    let h = harness();
    h.tracker.process("a", "pill time");

    let reply = h.tracker.process("b", "aspirin 10mg");
    assert_eq!(reply.status, TrackerStatus::Listening);
    assert!(armed(&h.tracker, "a"));
    assert!(!armed(&h.tracker, "b"));
}

#[test]
fn test_questions_answered_in_any_state() {
    let h = harness();
    h.tracker.process("s1", "pill time");
    h.tracker.process("s1", "aspirin 10mg");

    h.clock.advance(Duration::hours(2));
    h.tracker.process("s1", "pill time");
    let reply = h.tracker.process("s1", "when did I last take aspirin?");
    assert_eq!(reply.status, TrackerStatus::Answer);
    assert_eq!(
        reply.message.as_deref(),
        Some("Your last Aspirin was on 2024-03-01 at 08:00 AM.")
    );
    assert!(armed(&h.tracker, "s1"));
}

#[test]
fn test_empty_fragment_is_listening() {
    let h = harness();
    assert_eq!(h.tracker.process("s1", "   ").status, TrackerStatus::Listening);
    assert!(h.tracker.sessions().is_empty());
}

struct BrokenStore;

impl RecordStore for BrokenStore {
    fn append(&self, _event: &MedicationEvent) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )))
    }

    fn most_recent_matching(&self, _query: &str) -> Result<Option<MedicationRow>, StoreError> {
        Err(StoreError::Format("unreadable".to_string()))
    }

    fn recent(
        &self,
        _within_days: i64,
        _today: NaiveDate,
    ) -> Result<Vec<MedicationEvent>, StoreError> {
        Ok(Vec::new())
    }
}

#[test]
fn test_store_failures_become_replies() {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(t0()));
    let tracker = MedicationTracker::new(
        Arc::new(BrokenStore),
        Arc::new(SessionRegistry::default()),
        clock,
        TrackerConfig::default(),
    )
    .unwrap_or_else(|e| panic!("tracker should build: {e}"));

    tracker.process("s1", "pill time");
    let reply = tracker.process("s1", "aspirin 10mg");
    assert_eq!(reply.status, TrackerStatus::Error);
    assert_eq!(
        reply.message.as_deref(),
        Some("Sorry, I couldn't save that to your medication log. Please try again.")
    );
    assert!(!armed(&tracker, "s1"));

    let reply = tracker.process("s1", "when did i last take aspirin");
    assert_eq!(reply.status, TrackerStatus::Answer);
    assert_eq!(
        reply.message.as_deref(),
        Some("I couldn't find any aspirin in your log.")
    );
}

#[test]
fn test_concurrent_details_log_once() {
    let h = harness();
    h.tracker.process("s1", "pill time");

    let tracker = Arc::new(h.tracker);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || tracker.process("s1", &format!("took {} mg of aspirin", i + 1)))
        })
        .collect();

    let logged = handles
        .into_iter()
        .filter_map(|handle| handle.join().ok())
        .filter(|reply| reply.status == TrackerStatus::Logged)
        .count();

    assert_eq!(logged, 1);
    assert_eq!(h.store.len(), 1);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_end_to_end_with_csv_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Arc::new(
        CsvRecordStore::open_with_fallback(dir.path().join("meds.csv"), dir.path())
            .expect("opens"),
    );
    let clock = Arc::new(FixedClock::new(t0()));
    let tracker = MedicationTracker::new(
        store.clone(),
        Arc::new(SessionRegistry::default()),
        clock.clone(),
        TrackerConfig::default(),
    )
    .expect("tracker builds");

    tracker.process("s1", "i need to take my medication");
    clock.advance(Duration::minutes(1) - Duration::seconds(45));
    assert_eq!(
        tracker.process("s1", "taking one pill of tylenol").status,
        TrackerStatus::Logged
    );

    let rows = store
        .recent(3650, clock.now().date())
        .expect("readable");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].medication, "Tylenol");
    assert_eq!(rows[0].dosage, "1 pill");
}
