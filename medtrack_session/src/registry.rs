//! Process-wide session map with idle-time and capacity eviction.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use parking_lot::Mutex;
use tracing::debug;

use crate::state::SessionState;

#[derive(Debug, Clone, Copy)]
pub struct RegistryConfig {
    /// Sessions idle longer than this are dropped by [`SessionRegistry::sweep`].
    pub idle_ttl: Duration,
    /// Upper bound on tracked sessions.
    pub max_sessions: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::minutes(10),
            max_sessions: 10_000,
        }
    }
}

/// Shared session table.
///
/// The map lock is only held to find or insert an entry. Each session has its
/// own lock, which callers hold for the duration of a state transition.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<Mutex<SessionState>>>>,
    config: RegistryConfig,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get or lazily create the session for `session_id`.
    ///
    /// An existing session is touched at `now` before the map lock is
    /// released, so a sweep racing with this lookup sees it as active.
    pub fn session(&self, session_id: &str, now: NaiveDateTime) -> Arc<Mutex<SessionState>> {
        let mut sessions = self.sessions.lock();
        if let Some(existing) = sessions.get(session_id) {
            let mut state = existing.lock();
            if now > state.last_activity() {
                state.touch(now);
            }
            drop(state);
            return Arc::clone(existing);
        }

        if sessions.len() >= self.config.max_sessions {
            self.make_room(&mut sessions, now);
        }

        let state = Arc::new(Mutex::new(SessionState::new(session_id, now)));
        sessions.insert(session_id.to_string(), Arc::clone(&state));
        state
    }

    /// Copy of the current state, if the session is tracked.
    #[must_use]
    pub fn snapshot(&self, session_id: &str) -> Option<SessionState> {
        let entry = self.sessions.lock().get(session_id).cloned()?;
        let state = entry.lock().clone();
        Some(state)
    }

    /// Drop sessions idle longer than the configured TTL. Returns how many
    /// were removed. Sessions locked by an in-flight request are kept.
    pub fn sweep(&self, now: NaiveDateTime) -> usize {
        let mut sessions = self.sessions.lock();
        Self::remove_idle(&mut sessions, now, self.config.idle_ttl)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    fn make_room(
        &self,
        sessions: &mut HashMap<String, Arc<Mutex<SessionState>>>,
        now: NaiveDateTime,
    ) {
        Self::remove_idle(sessions, now, self.config.idle_ttl);

        while sessions.len() >= self.config.max_sessions {
            let oldest = sessions
                .iter()
                .filter_map(|(id, entry)| {
                    entry
                        .try_lock()
                        .map(|state| (id.clone(), state.last_activity()))
                })
                .min_by_key(|(_, last_activity)| *last_activity)
                .map(|(id, _)| id);

            let Some(id) = oldest else {
                // Every session is busy; allow a temporary overshoot.
                break;
            };
            debug!("Evicting least recently active session {id}");
            sessions.remove(&id);
        }
    }

    fn remove_idle(
        sessions: &mut HashMap<String, Arc<Mutex<SessionState>>>,
        now: NaiveDateTime,
        ttl: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = entry
                .try_lock()
                .is_none_or(|state| !state.idle_for_longer_than(now, ttl));
            if !keep {
                debug!("Evicting idle session {id}");
            }
            keep
        });
        before - sessions.len()
    }
}
