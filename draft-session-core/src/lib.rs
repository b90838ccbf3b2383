pub mod application;
pub mod domain;

pub use application::{DomainCommand, DomainEvent, DraftEngine, EngineConfig, SessionStore};
pub use domain::{
    generate_pool, Candidate, CandidateId, HeadsOrTails, MatchFormat, Party, PartyLabel,
    PoolError, Session, SessionError, SessionId, Side, TossOutcome, TurnPolicy, CATALOG,
    DEFAULT_DRAW_SIZE,
};

/// JSON schema of the session snapshot sent to clients
pub fn session_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Session)
}
