pub mod candidate;
pub mod party;
pub mod session;

pub use candidate::{
    generate_pool, Candidate, CandidateId, PoolError, CATALOG, DEFAULT_DRAW_SIZE,
};
pub use party::{HeadsOrTails, MatchFormat, Party, PartyLabel, Side};
pub use session::{Session, SessionError, SessionId, TossOutcome, TurnPolicy};
