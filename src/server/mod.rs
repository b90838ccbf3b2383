mod connection;
mod connection_handler;
mod connection_repository;
mod engine_runtime;
mod group_repository;
mod memory_storage;
pub mod route;
pub mod telemetry;
pub mod websocket_listener;

pub use connection::Connection;
pub use connection_handler::ConnectionHandler;
pub use connection_repository::ConnectionRepository;
pub use engine_runtime::{EngineHandle, DEFAULT_QUEUE_SIZE};
pub use group_repository::GroupRepository;
pub use memory_storage::MemoryStorage;
pub use route::{create_router, create_session_route};
pub use telemetry::{init_telemetry, LogConfig};
