use crate::domain::{
    Candidate, CandidateId, HeadsOrTails, MatchFormat, Party, PartyLabel, PoolError, Side,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque session identifier: 128 random bits, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        SessionId(id)
    }
}

/// Whether ban/pick requests are checked against `current_turn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPolicy {
    /// Only the party holding the turn may act, and only after the toss
    #[default]
    Enforced,
    /// Any party may act at any time; clients gate their own UI
    Advisory,
}

/// Errors that can occur in session operations
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Candidate {0} is not part of this session's pool")]
    InvalidCandidate(CandidateId),

    #[error("Candidate {0} is already banned")]
    AlreadyBanned(CandidateId),

    #[error("Candidate {0} is already picked")]
    AlreadyPicked(CandidateId),

    #[error("It is not party {0}'s turn")]
    NotYourTurn(PartyLabel),

    #[error("Coin toss already completed")]
    AlreadyTossed,

    #[error("Coin toss has not happened yet")]
    TossPending,

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),
}

impl SessionError {
    /// Stable machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "NotFound",
            SessionError::InvalidCandidate(_) => "InvalidCandidate",
            SessionError::AlreadyBanned(_) => "AlreadyBanned",
            SessionError::AlreadyPicked(_) => "AlreadyPicked",
            SessionError::NotYourTurn(_) => "NotYourTurn",
            SessionError::AlreadyTossed => "AlreadyTossed",
            SessionError::TossPending => "TossPending",
            SessionError::Pool(_) => "PoolError",
        }
    }
}

/// Result of a coin toss, returned to the calling party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TossOutcome {
    pub result: HeadsOrTails,
    pub toss_winner: PartyLabel,
}

/// Session aggregate root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    match_format: MatchFormat,
    /// Fixed at creation, only `banned` flags change
    candidates: Vec<Candidate>,
    banned_order: Vec<CandidateId>,
    picked_order: Vec<CandidateId>,
    current_turn: Option<PartyLabel>,
    toss_winner: Option<PartyLabel>,
    toss_loser: Option<PartyLabel>,
    toss_completed: bool,
    party_a: Party,
    party_b: Party,
}

impl Session {
    pub fn new(
        id: SessionId,
        match_format: MatchFormat,
        creator_name: String,
        candidates: Vec<Candidate>,
    ) -> Self {
        Session {
            id,
            match_format,
            candidates,
            banned_order: Vec::new(),
            picked_order: Vec::new(),
            current_turn: None,
            toss_winner: None,
            toss_loser: None,
            toss_completed: false,
            party_a: Party::new(creator_name),
            party_b: Party::new(String::new()),
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn match_format(&self) -> MatchFormat {
        self.match_format
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, candidate_id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id() == candidate_id)
    }

    pub fn banned_order(&self) -> &[CandidateId] {
        &self.banned_order
    }

    pub fn picked_order(&self) -> &[CandidateId] {
        &self.picked_order
    }

    pub fn current_turn(&self) -> Option<PartyLabel> {
        self.current_turn
    }

    pub fn toss_winner(&self) -> Option<PartyLabel> {
        self.toss_winner
    }

    pub fn toss_loser(&self) -> Option<PartyLabel> {
        self.toss_loser
    }

    pub fn toss_completed(&self) -> bool {
        self.toss_completed
    }

    pub fn party(&self, label: PartyLabel) -> &Party {
        match label {
            PartyLabel::A => &self.party_a,
            PartyLabel::B => &self.party_b,
        }
    }

    pub fn party_a(&self) -> &Party {
        &self.party_a
    }

    pub fn party_b(&self) -> &Party {
        &self.party_b
    }

    /// Candidates that are neither banned nor picked
    pub fn remaining(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates
            .iter()
            .filter(|c| !c.is_banned() && !self.picked_order.contains(&c.id()))
    }

    // ===== Operations =====

    /// Register the second party. A repeated join overwrites the name.
    pub fn join(&mut self, joiner_name: String) {
        if !self.party_b.name().is_empty() {
            tracing::debug!(session_id = %self.id, "Party B name reassigned");
        }
        self.party_b.set_name(joiner_name);
    }

    /// Resolve the coin toss for `caller` against an already drawn `result`
    pub fn toss(
        &mut self,
        caller: PartyLabel,
        call: HeadsOrTails,
        result: HeadsOrTails,
    ) -> Result<TossOutcome, SessionError> {
        if self.toss_completed {
            return Err(SessionError::AlreadyTossed);
        }

        let winner = if call == result { caller } else { caller.other() };

        self.toss_winner = Some(winner);
        self.toss_loser = Some(winner.other());
        self.current_turn = Some(self.match_format.first_turn());
        self.toss_completed = true;

        Ok(TossOutcome {
            result,
            toss_winner: winner,
        })
    }

    /// Ban a candidate on behalf of `party`
    pub fn ban(
        &mut self,
        party: PartyLabel,
        candidate_id: CandidateId,
        policy: TurnPolicy,
    ) -> Result<(), SessionError> {
        self.check_available(candidate_id)?;
        self.check_turn(party, policy)?;

        // Validated above, the candidate exists
        if let Some(candidate) = self.candidates.iter_mut().find(|c| c.id() == candidate_id) {
            candidate.ban();
        }
        self.banned_order.push(candidate_id);
        self.advance_turn();
        Ok(())
    }

    /// Pick a candidate on behalf of `party`
    pub fn pick(
        &mut self,
        party: PartyLabel,
        candidate_id: CandidateId,
        policy: TurnPolicy,
    ) -> Result<(), SessionError> {
        self.check_available(candidate_id)?;
        self.check_turn(party, policy)?;

        self.picked_order.push(candidate_id);
        self.advance_turn();
        Ok(())
    }

    /// Assign `side` to `party` and the opposite side to the other party
    pub fn select_side(&mut self, party: PartyLabel, side: Side) {
        let (chooser, other) = match party {
            PartyLabel::A => (&mut self.party_a, &mut self.party_b),
            PartyLabel::B => (&mut self.party_b, &mut self.party_a),
        };
        chooser.set_side(side);
        other.set_side(side.opposite());
    }

    // ===== Validation =====

    fn check_available(&self, candidate_id: CandidateId) -> Result<(), SessionError> {
        let candidate = self
            .candidate(candidate_id)
            .ok_or(SessionError::InvalidCandidate(candidate_id))?;

        if candidate.is_banned() {
            return Err(SessionError::AlreadyBanned(candidate_id));
        }
        if self.picked_order.contains(&candidate_id) {
            return Err(SessionError::AlreadyPicked(candidate_id));
        }
        Ok(())
    }

    fn check_turn(&self, party: PartyLabel, policy: TurnPolicy) -> Result<(), SessionError> {
        if policy == TurnPolicy::Advisory {
            return Ok(());
        }
        match self.current_turn {
            None => Err(SessionError::TossPending),
            Some(turn) if turn != party => Err(SessionError::NotYourTurn(party)),
            Some(_) => Ok(()),
        }
    }

    fn advance_turn(&mut self) {
        self.current_turn = self.current_turn.map(PartyLabel::other);
    }
}
