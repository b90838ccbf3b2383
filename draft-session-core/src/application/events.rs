use crate::domain::{CandidateId, Session, SessionError, SessionId, TossOutcome};

/// Events emitted by the engine after executing a command
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    SessionCreated { session_id: SessionId },

    /// Party B joined, carries the snapshot for the joiner
    SessionJoined { session: Session },

    TossResolved {
        outcome: TossOutcome,
        session: Session,
    },

    MapBanned {
        candidate_id: CandidateId,
        session: Session,
    },

    MapSelected {
        candidate_id: CandidateId,
        session: Session,
    },

    SideSelected { session: Session },

    /// Session dropped from the table; `existed` is false if it was already gone
    SessionRemoved { session_id: SessionId, existed: bool },

    /// Command was rejected, no state changed
    CommandFailed {
        command: String,
        error: SessionError,
    },
}

impl DomainEvent {
    /// Snapshot to broadcast to the session's group, if this event requires one
    pub fn broadcast_snapshot(&self) -> Option<&Session> {
        match self {
            DomainEvent::TossResolved { session, .. }
            | DomainEvent::MapBanned { session, .. }
            | DomainEvent::MapSelected { session, .. }
            | DomainEvent::SideSelected { session } => Some(session),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DomainEvent::CommandFailed { .. })
    }

    pub fn error(&self) -> Option<&SessionError> {
        match self {
            DomainEvent::CommandFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchFormat;

    fn session() -> Session {
        Session::new(
            SessionId::from("s"),
            MatchFormat::MultiMap,
            "Alpha".to_string(),
            Vec::new(),
        )
    }

    #[test]
    fn test_broadcast_snapshot_only_for_mutations() {
        let side = DomainEvent::SideSelected { session: session() };
        assert!(side.broadcast_snapshot().is_some());

        let joined = DomainEvent::SessionJoined { session: session() };
        assert!(joined.broadcast_snapshot().is_none());

        let created = DomainEvent::SessionCreated {
            session_id: SessionId::from("s"),
        };
        assert!(created.broadcast_snapshot().is_none());
    }

    #[test]
    fn test_command_failed_event() {
        let event = DomainEvent::CommandFailed {
            command: "BanMap".to_string(),
            error: SessionError::AlreadyBanned(CandidateId::new(2)),
        };

        assert!(event.is_failure());
        assert!(event.broadcast_snapshot().is_none());
        assert_eq!(
            event.error(),
            Some(&SessionError::AlreadyBanned(CandidateId::new(2)))
        );
    }
}
