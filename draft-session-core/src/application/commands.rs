use crate::domain::{CandidateId, HeadsOrTails, MatchFormat, PartyLabel, SessionId, Side};

/// Commands that can be executed against the draft engine
#[derive(Debug, Clone, PartialEq)]
pub enum DomainCommand {
    /// Create a new session, the creator becomes party A
    CreateSession {
        match_format: MatchFormat,
        party_name: String,
    },

    /// Join an existing session as party B
    JoinSession {
        session_id: SessionId,
        party_name: String,
    },

    /// Flip the coin, `call` is made by `party`
    HandleToss {
        session_id: SessionId,
        party: PartyLabel,
        call: HeadsOrTails,
    },

    BanMap {
        session_id: SessionId,
        party: PartyLabel,
        candidate_id: CandidateId,
    },

    SelectMap {
        session_id: SessionId,
        party: PartyLabel,
        candidate_id: CandidateId,
    },

    SelectSide {
        session_id: SessionId,
        party: PartyLabel,
        side: Side,
    },

    /// The session's communication group became empty
    DisconnectCleanup { session_id: SessionId },
}

impl DomainCommand {
    /// Command name as used in logs and failure events
    pub fn name(&self) -> &'static str {
        match self {
            DomainCommand::CreateSession { .. } => "CreateSession",
            DomainCommand::JoinSession { .. } => "JoinSession",
            DomainCommand::HandleToss { .. } => "HandleToss",
            DomainCommand::BanMap { .. } => "BanMap",
            DomainCommand::SelectMap { .. } => "SelectMap",
            DomainCommand::SelectSide { .. } => "SelectSide",
            DomainCommand::DisconnectCleanup { .. } => "DisconnectCleanup",
        }
    }

    /// Session targeted by the command, `None` for creation
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            DomainCommand::CreateSession { .. } => None,
            DomainCommand::JoinSession { session_id, .. }
            | DomainCommand::HandleToss { session_id, .. }
            | DomainCommand::BanMap { session_id, .. }
            | DomainCommand::SelectMap { session_id, .. }
            | DomainCommand::SelectSide { session_id, .. }
            | DomainCommand::DisconnectCleanup { session_id } => Some(session_id),
        }
    }
}
