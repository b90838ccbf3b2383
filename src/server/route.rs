use crate::server::{websocket_listener, ConnectionHandler};
use axum::extract::WebSocketUpgrade;
use axum::http::Method;
use axum::{routing::get, Router};
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_session_route(connection_handler: ConnectionHandler) -> Router {
    Router::new().route(
        "/session",
        get(move |ws: WebSocketUpgrade| {
            websocket_listener::handle_websocket(
                ws,
                ConnectionHandler::new_from(&connection_handler),
            )
        }),
    )
}

/// Session route plus permissive CORS and an optional static fallback
pub fn create_router(connection_handler: ConnectionHandler, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    let router = create_session_route(connection_handler);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
