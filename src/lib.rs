pub mod config;
pub mod model;
pub mod server;

pub mod prelude {
    pub use crate::config::ServerConfig;
    pub use crate::model::{ClientEnvelope, ClientEvent, NetworkError, ServerEvent};
    pub use crate::server::{
        create_router, ConnectionHandler, EngineHandle, LogConfig, MemoryStorage,
    };
    pub use draft_session_core::{
        CandidateId, DraftEngine, HeadsOrTails, MatchFormat, PartyLabel, Session, SessionId, Side,
    };
}
