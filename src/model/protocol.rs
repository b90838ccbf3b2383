use draft_session_core::{
    CandidateId, DomainCommand, DomainEvent, HeadsOrTails, MatchFormat, PartyLabel, Session,
    SessionError, SessionId, Side,
};
use serde::{Deserialize, Serialize};

/// Inbound frame: a named event with an optional acknowledgement id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<u64>,
    #[serde(flatten)]
    pub event: ClientEvent,
}

/// Events a party can send. A missing `party` means the session creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    CreateSession {
        match_format: MatchFormat,
        party_name: String,
    },
    #[serde(rename_all = "camelCase")]
    JoinSession {
        session_id: SessionId,
        party_name: String,
    },
    #[serde(rename_all = "camelCase")]
    HandleToss {
        session_id: SessionId,
        #[serde(default)]
        party: PartyLabel,
        call: HeadsOrTails,
    },
    #[serde(rename_all = "camelCase")]
    BanMap {
        session_id: SessionId,
        #[serde(default)]
        party: PartyLabel,
        candidate_id: CandidateId,
    },
    #[serde(rename_all = "camelCase")]
    SelectMap {
        session_id: SessionId,
        #[serde(default)]
        party: PartyLabel,
        candidate_id: CandidateId,
    },
    #[serde(rename_all = "camelCase")]
    SelectSide {
        session_id: SessionId,
        party: PartyLabel,
        side: Side,
    },
}

impl From<ClientEvent> for DomainCommand {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::CreateSession {
                match_format,
                party_name,
            } => DomainCommand::CreateSession {
                match_format,
                party_name,
            },
            ClientEvent::JoinSession {
                session_id,
                party_name,
            } => DomainCommand::JoinSession {
                session_id,
                party_name,
            },
            ClientEvent::HandleToss {
                session_id,
                party,
                call,
            } => DomainCommand::HandleToss {
                session_id,
                party,
                call,
            },
            ClientEvent::BanMap {
                session_id,
                party,
                candidate_id,
            } => DomainCommand::BanMap {
                session_id,
                party,
                candidate_id,
            },
            ClientEvent::SelectMap {
                session_id,
                party,
                candidate_id,
            } => DomainCommand::SelectMap {
                session_id,
                party,
                candidate_id,
            },
            ClientEvent::SelectSide {
                session_id,
                party,
                side,
            } => DomainCommand::SelectSide {
                session_id,
                party,
                side,
            },
        }
    }
}

/// Outbound frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Reply to the inbound frame carrying the same ack id
    Ack { id: u64, result: AckResult },
    /// Full snapshot after an accepted mutation, sent to the whole group
    SessionUpdate(Box<Session>),
    /// Frame could not be parsed
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckResult {
    Ok(AckPayload),
    Error(WireError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AckPayload {
    #[serde(rename_all = "camelCase")]
    Created { session_id: SessionId },
    #[serde(rename_all = "camelCase")]
    Toss {
        result: HeadsOrTails,
        toss_winner: PartyLabel,
    },
    Joined(Box<Session>),
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub code: String,
    pub message: String,
}

impl From<&SessionError> for WireError {
    fn from(error: &SessionError) -> Self {
        WireError {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&DomainEvent> for AckResult {
    fn from(event: &DomainEvent) -> Self {
        match event {
            DomainEvent::SessionCreated { session_id } => AckResult::Ok(AckPayload::Created {
                session_id: session_id.clone(),
            }),
            DomainEvent::SessionJoined { session } => {
                AckResult::Ok(AckPayload::Joined(Box::new(session.clone())))
            }
            DomainEvent::TossResolved { outcome, .. } => AckResult::Ok(AckPayload::Toss {
                result: outcome.result,
                toss_winner: outcome.toss_winner,
            }),
            DomainEvent::MapBanned { .. }
            | DomainEvent::MapSelected { .. }
            | DomainEvent::SideSelected { .. }
            | DomainEvent::SessionRemoved { .. } => AckResult::Ok(AckPayload::Accepted),
            DomainEvent::CommandFailed { error, .. } => AckResult::Error(error.into()),
        }
    }
}
