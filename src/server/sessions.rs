use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::view_state::{ViewError, ViewEvent, ViewState};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    View(#[from] ViewError),
}

#[derive(Debug, Clone)]
pub struct Session {
    pub view: ViewState,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            view: ViewState::default(),
            created_at: now,
            last_seen: now,
        }
    }
}

/// One `ViewState` per page session. Sessions never observe each other.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is recovered; sessions hold plain values.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self) -> (Uuid, ViewState) {
        let id = Uuid::new_v4();
        let session = Session::new(Utc::now());
        let view = session.view;
        self.lock().insert(id, session);
        debug!(%id, "session created");
        (id, view)
    }

    pub fn get(&self, id: Uuid) -> Result<ViewState, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.last_seen = Utc::now();
        Ok(session.view)
    }

    /// Applies `event` to the session's state. A rejected event leaves the state untouched.
    pub fn dispatch(&self, id: Uuid, event: &ViewEvent) -> Result<ViewState, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        let next = session.view.apply(event)?;
        session.view = next;
        session.last_seen = Utc::now();
        debug!(%id, ?event, "event applied");
        Ok(next)
    }

    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        let session = self.lock().remove(&id).ok_or(SessionError::NotFound(id))?;
        let age = Utc::now() - session.created_at;
        debug!(%id, age_secs = age.num_seconds(), "session removed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Drops sessions idle for longer than `max_idle` as of `now`. Returns how many were removed.
    pub fn prune_idle(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= max_idle);
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "pruned idle sessions");
        }
        removed
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, id: Uuid, by: Duration) {
        if let Some(session) = self.lock().get_mut(&id) {
            session.last_seen = session.last_seen - by;
            session.created_at = session.created_at - by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::Mode;

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, _) = store.create();
        let (b, _) = store.create();

        store
            .dispatch(a, &ViewEvent::Select { id: "canada".into() })
            .unwrap();
        store.dispatch(a, &ViewEvent::TogglePlayback).unwrap();

        assert!(store.get(a).unwrap().is_playing);
        assert_eq!(store.get(b).unwrap().mode(), Mode::Idle);
    }

    #[test]
    fn unknown_session_is_reported() {
        let store = SessionStore::new();
        let missing = Uuid::new_v4();
        assert!(matches!(store.get(missing), Err(SessionError::NotFound(id)) if id == missing));
        assert!(store.remove(missing).is_err());
    }

    #[test]
    fn rejected_event_keeps_previous_state() {
        let store = SessionStore::new();
        let (id, _) = store.create();
        store
            .dispatch(id, &ViewEvent::Select { id: "dubai".into() })
            .unwrap();

        let err = store
            .dispatch(id, &ViewEvent::Select { id: "nowhere".into() })
            .unwrap_err();
        assert!(matches!(err, SessionError::View(ViewError::UnknownLocation(_))));
        assert_eq!(store.get(id).unwrap().snapshot().selected, Some("dubai"));
    }

    #[test]
    fn prune_drops_only_idle_sessions() {
        let store = SessionStore::new();
        let (stale, _) = store.create();
        let (fresh, _) = store.create();
        store.backdate(stale, Duration::minutes(45));

        let removed = store.prune_idle(Utc::now(), Duration::minutes(30));
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(fresh).is_ok());
        assert!(store.get(stale).is_err());
    }
}
