//! The transcript pipeline and its per-session state machine.

use std::sync::Arc;

use chrono::Duration;
use medtrack_core::{Clock, MedicationEvent, RecordStore, TrackerResponse, normalize_transcript};
use medtrack_interpret::{PatternExtractor, QueryAnswerer, RuleError, TriggerDetector};
use tracing::{debug, error, info};

use crate::registry::SessionRegistry;

#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// How long an armed session waits for usable details.
    pub detail_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detail_timeout: Duration::seconds(30),
        }
    }
}

/// Sequences question answering, trigger detection and extraction for every
/// transcript fragment.
///
/// Per-session transitions are serialized by the session's own lock; the
/// record store is only touched after that lock has been released.
pub struct MedicationTracker {
    triggers: TriggerDetector,
    extractor: PatternExtractor,
    answerer: QueryAnswerer,
    store: Arc<dyn RecordStore>,
    sessions: Arc<SessionRegistry>,
    clock: Arc<dyn Clock>,
    config: TrackerConfig,
}

/// What a locked session decided to do with a fragment.
enum Step {
    Reply(TrackerResponse),
    Log(MedicationEvent),
}

impl MedicationTracker {
    /// Tracker with the built-in phrases, rules and question patterns.
    pub fn new(
        store: Arc<dyn RecordStore>,
        sessions: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
        config: TrackerConfig,
    ) -> Result<Self, RuleError> {
        let extractor = PatternExtractor::with_defaults(Arc::clone(&clock))?;
        let answerer = QueryAnswerer::with_defaults(Arc::clone(&store))?;
        Ok(Self::from_parts(
            TriggerDetector::with_defaults(),
            extractor,
            answerer,
            store,
            sessions,
            clock,
            config,
        ))
    }

    /// Tracker assembled from custom interpreters.
    #[must_use]
    pub fn from_parts(
        triggers: TriggerDetector,
        extractor: PatternExtractor,
        answerer: QueryAnswerer,
        store: Arc<dyn RecordStore>,
        sessions: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            triggers,
            extractor,
            answerer,
            store,
            sessions,
            clock,
            config,
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Process one transcript fragment for `session_id`.
    ///
    /// Never fails: storage problems are reported as an `error` reply.
    pub fn process(&self, session_id: &str, text: &str) -> TrackerResponse {
        let text = normalize_transcript(text);
        if text.is_empty() {
            return TrackerResponse::listening();
        }

        if let Some(answer) = self.answerer.answer(&text) {
            let now = self.clock.now();
            self.sessions.session(session_id, now).lock().touch(now);
            return answer;
        }

        match self.advance(session_id, &text) {
            Step::Reply(reply) => reply,
            Step::Log(event) => self.log(session_id, &event),
        }
    }

    fn advance(&self, session_id: &str, text: &str) -> Step {
        let now = self.clock.now();
        let session = self.sessions.session(session_id, now);
        let mut state = session.lock();
        state.touch(now);

        if state.is_repeat(text) && !state.expired(now, self.config.detail_timeout) {
            debug!("Ignoring repeated fragment for session {session_id}");
            return Step::Reply(TrackerResponse::listening());
        }

        if let Some(phrase) = self.triggers.matched_phrase(text) {
            state.arm(text, now);
            info!("Trigger {phrase:?} detected for session {session_id}. Waiting for medication details...");
            return Step::Reply(TrackerResponse::triggered());
        }

        if !state.awaiting_details() {
            return Step::Reply(TrackerResponse::listening());
        }

        state.remember(text);
        if let Some(event) = self.extractor.extract(text) {
            state.disarm();
            return Step::Log(event);
        }

        if state.expired(now, self.config.detail_timeout) {
            state.disarm();
            info!("Session {session_id} timed out waiting for medication details");
            return Step::Reply(TrackerResponse::timed_out());
        }

        Step::Reply(TrackerResponse::listening())
    }

    fn log(&self, session_id: &str, event: &MedicationEvent) -> TrackerResponse {
        match self.store.append(event) {
            Ok(()) => {
                info!(
                    "Medication logged for session {session_id}: {} - {}",
                    event.medication, event.dosage
                );
                TrackerResponse::logged(event)
            }
            Err(e) => {
                error!("Failed to log medication for session {session_id}: {e}");
                TrackerResponse::write_failed()
            }
        }
    }
}
