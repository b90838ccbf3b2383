use clap::Parser;
use draft_session::config::ServerConfig;
use draft_session::model::NetworkError;
use draft_session::server::{
    create_router, init_telemetry, ConnectionHandler, EngineHandle, MemoryStorage,
    DEFAULT_QUEUE_SIZE,
};
use draft_session_core::{DraftEngine, SessionStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
pub async fn main() -> Result<(), NetworkError> {
    let config = ServerConfig::parse();
    init_telemetry(&config.log_config())?;

    let engine_config = config.engine_config()?;
    let engine = DraftEngine::with_config(SessionStore::new(), engine_config)
        .map_err(|e| NetworkError::InvalidConfig(e.to_string()))?;
    let (engine, engine_task) = EngineHandle::spawn(engine, DEFAULT_QUEUE_SIZE);

    let storage = Arc::new(MemoryStorage::new());
    let connection_handler = ConnectionHandler::new(storage.clone(), storage, engine);
    let app = create_router(connection_handler, config.static_dir.clone());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, turn_policy = ?engine_config.turn_policy, "Draft server listening");

    axum::serve(listener, app).await?;

    engine_task.abort();
    Ok(())
}
