use crate::domain::{Session, SessionId};
use std::collections::HashMap;

/// In-memory session table owned by the engine
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Generate an id that is not yet a key in the table
    pub fn fresh_id(&self) -> SessionId {
        loop {
            let id = SessionId::generate();
            if !self.sessions.contains_key(&id) {
                return id;
            }
            tracing::warn!(session_id = %id, "Session id collision, regenerating");
        }
    }

    /// Build a session under a fresh id and register it
    pub fn register(&mut self, build: impl FnOnce(SessionId) -> Session) -> SessionId {
        let id = self.fresh_id();
        let session = build(id.clone());
        self.sessions.insert(id.clone(), session);
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}
