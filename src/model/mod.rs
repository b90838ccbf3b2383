mod error;
mod protocol;

pub use error::NetworkError;
pub use protocol::{AckPayload, AckResult, ClientEnvelope, ClientEvent, ServerEvent, WireError};

/// Identifies one websocket connection
pub type ClientId = uuid::Uuid;
