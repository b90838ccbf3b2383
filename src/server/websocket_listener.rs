use crate::model::{ClientEnvelope, ServerEvent};
use crate::server::ConnectionHandler;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::response::IntoResponse;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, Receiver};
use tracing::{debug, error, info, warn};

/// Outbound frames buffered per connection
const OUTBOUND_BUFFER: usize = 32;

pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    connection_handler: ConnectionHandler,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| listen(socket, connection_handler))
}

async fn listen(socket: WebSocket, connection_handler: ConnectionHandler) {
    let (ws_sender, ws_receiver) = socket.split();
    let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);

    let connection_handler = match connection_handler.connect(tx).await {
        Ok(handler) => handler,
        Err(e) => {
            error!(?e, "Failed to register connection");
            return;
        }
    };

    let sender_task = handle_outgoing_messages(rx, ws_sender);
    let receiver_task = handle_incoming_messages(ws_receiver, &connection_handler);

    tokio::select! {
        _ = sender_task => {
            info!(client_id = ?connection_handler.client_id(), "Sender task completed");
        }
        _ = receiver_task => {
            info!(client_id = ?connection_handler.client_id(), "Receiver task completed");
        }
    }
    if let Err(e) = connection_handler.disconnect().await {
        error!(?e, "Failed to disconnect");
    }
}

pub async fn handle_outgoing_messages(
    mut rx: Receiver<ServerEvent>,
    mut ws_sender: SplitSink<WebSocket, Message>,
) {
    while let Some(event) = rx.recv().await {
        let text = match serde_json::to_string(&event) {
            Ok(text) => text,
            Err(e) => {
                error!(?e, "Failed to serialize outbound event");
                continue;
            }
        };
        if let Err(e) = ws_sender.send(Message::Text(text)).await {
            error!(?e, "Failed to send message");
            break;
        }
    }
}

pub async fn handle_incoming_messages(
    mut receiver: SplitStream<WebSocket>,
    connection_handler: &ConnectionHandler,
) {
    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Close(_)) => {
                info!(client_id = ?connection_handler.client_id(), "Client closed connection");
                break;
            }
            Ok(message) => handle_message(message, connection_handler).await,
            Err(e) => {
                error!(?e, "Failed to receive message");
                break;
            }
        }
    }
}

pub async fn handle_message(message: Message, connection_handler: &ConnectionHandler) {
    match message {
        Message::Text(text) => match serde_json::from_str::<ClientEnvelope>(&text) {
            Ok(envelope) => {
                if let Err(e) = connection_handler.handle_event(envelope).await {
                    error!(?e, "Failed to handle event");
                }
            }
            Err(e) => {
                warn!(?e, "Failed to parse event");
                reply_error(connection_handler, e.to_string()).await;
            }
        },
        Message::Ping(_) | Message::Pong(_) => {
            debug!(client_id = ?connection_handler.client_id(), "Keepalive");
        }
        _ => {
            warn!(
                client_id = ?connection_handler.client_id(),
                ?message,
                "Unsupported message type"
            );
        }
    }
}

async fn reply_error(connection_handler: &ConnectionHandler, message: String) {
    let Some(client_id) = connection_handler.client_id() else {
        return;
    };
    if let Err(e) = connection_handler
        .send_to_client(client_id, ServerEvent::Error { message })
        .await
    {
        error!(?e, "Failed to report parse error");
    }
}
