mod commands;
mod engine;
mod events;
mod store;

pub use commands::DomainCommand;
pub use engine::{DraftEngine, EngineConfig};
pub use events::DomainEvent;
pub use store::SessionStore;
