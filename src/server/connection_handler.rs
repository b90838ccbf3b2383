use crate::model::{AckResult, ClientEnvelope, ClientEvent, ClientId, NetworkError, ServerEvent};
use crate::server::{Connection, ConnectionRepository, EngineHandle, GroupRepository};
use draft_session_core::{DomainCommand, DomainEvent, SessionId};
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Per-connection glue between websocket frames, the engine runtime and the
/// communication groups
#[derive(Clone)]
pub struct ConnectionHandler {
    client_id: Option<ClientId>,
    connection_repo: Arc<dyn ConnectionRepository>,
    group_repo: Arc<dyn GroupRepository>,
    engine: EngineHandle,
    /// Held across a membership change and the engine command it implies
    membership: Arc<Mutex<()>>,
}

impl ConnectionHandler {
    pub fn new(
        connection_repo: Arc<dyn ConnectionRepository>,
        group_repo: Arc<dyn GroupRepository>,
        engine: EngineHandle,
    ) -> Self {
        ConnectionHandler {
            client_id: None,
            connection_repo,
            group_repo,
            engine,
            membership: Arc::new(Mutex::new(())),
        }
    }

    pub fn new_from(cloneable: &Self) -> Self {
        ConnectionHandler {
            client_id: None,
            connection_repo: cloneable.connection_repo.clone(),
            group_repo: cloneable.group_repo.clone(),
            engine: cloneable.engine.clone(),
            membership: cloneable.membership.clone(),
        }
    }

    pub fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Register a new connection writing to `sender`
    #[instrument(skip(self, sender))]
    pub async fn connect(&self, sender: Sender<ServerEvent>) -> Result<Self, NetworkError> {
        let client_id = ClientId::new_v4();
        self.connection_repo
            .add_connection(Connection::new(client_id, sender))
            .await?;
        info!(?client_id, "Client connected");

        let mut handler = Self::new_from(self);
        handler.client_id = Some(client_id);
        Ok(handler)
    }

    /// Leave the current group and forget the connection
    #[instrument(skip(self), fields(client_id = ?self.client_id))]
    pub async fn disconnect(&self) -> Result<(), NetworkError> {
        let Some(client_id) = self.client_id else {
            return Ok(());
        };
        {
            let _membership = self.membership.lock().await;
            if let Some(session_id) = self.group_repo.get_group_with_client(client_id).await? {
                self.release_group(client_id, session_id).await?;
            }
        }
        self.connection_repo.remove_connection(client_id).await?;
        info!(?client_id, "Client disconnected");
        Ok(())
    }

    #[instrument(skip(self, envelope), fields(client_id = ?self.client_id, ack = ?envelope.ack))]
    pub async fn handle_event(&self, envelope: ClientEnvelope) -> Result<(), NetworkError> {
        let client_id = self.require_client_id()?;
        let ClientEnvelope { ack, event } = envelope;

        let event = match event {
            ClientEvent::JoinSession {
                session_id,
                party_name,
            } => self.join_session(client_id, session_id, party_name).await?,
            ClientEvent::CreateSession { .. } => {
                let _membership = self.membership.lock().await;
                let event = self.engine.execute(DomainCommand::from(event)).await?;
                if let DomainEvent::SessionCreated { session_id } = &event {
                    self.move_to_group(client_id, session_id.clone()).await?;
                }
                event
            }
            other => self.engine.execute(DomainCommand::from(other)).await?,
        };

        if let Some(session) = event.broadcast_snapshot() {
            self.broadcast(
                session.id().clone(),
                ServerEvent::SessionUpdate(Box::new(session.clone())),
            )
            .await?;
        }

        if let Some(id) = ack {
            let reply = ServerEvent::Ack {
                id,
                result: AckResult::from(&event),
            };
            self.send_to_client(client_id, reply).await?;
        } else if let Some(error) = event.error() {
            debug!(%error, "Command failed without ack id");
        }
        Ok(())
    }

    /// Deliver `event` to every member of the session's group without waiting.
    /// A member whose outbound buffer is full or closed misses the update.
    #[instrument(skip(self, event))]
    pub async fn broadcast(
        &self,
        session_id: SessionId,
        event: ServerEvent,
    ) -> Result<(), NetworkError> {
        let clients = self.group_repo.get_clients_in_group(session_id).await?;
        debug!(recipients = clients.len(), "Broadcasting session update");

        for client_id in clients {
            let Some(connection) = self.connection_repo.get_connection(client_id).await? else {
                continue;
            };
            match connection.sender.try_send(event.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(?client_id, "Outbound buffer full, dropping broadcast");
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(?client_id, "Connection closed, dropping broadcast");
                }
            }
        }
        Ok(())
    }

    pub async fn send_to_client(
        &self,
        client_id: ClientId,
        event: ServerEvent,
    ) -> Result<(), NetworkError> {
        let connection = self.connection_repo.get_connection(client_id).await?;

        if let Some(connection) = connection {
            connection
                .sender
                .send(event)
                .await
                .map_err(|e| NetworkError::InternalError(e.to_string()))?;
        }
        Ok(())
    }

    /// Subscribe to the target group, run the join, then settle membership:
    /// a rejected join restores the previous group, an accepted one releases it.
    async fn join_session(
        &self,
        client_id: ClientId,
        session_id: SessionId,
        party_name: String,
    ) -> Result<DomainEvent, NetworkError> {
        let _membership = self.membership.lock().await;
        let previous = self.group_repo.get_group_with_client(client_id).await?;
        let command = DomainCommand::JoinSession {
            session_id: session_id.clone(),
            party_name,
        };

        if previous.as_ref() == Some(&session_id) {
            return self.engine.execute(command).await;
        }

        // Subscribe before the join runs so no update slips past
        self.group_repo
            .add_client_to_group(session_id.clone(), client_id)
            .await?;
        let event = self.engine.execute(command).await?;

        if event.is_failure() {
            debug!(%session_id, "Join rejected, restoring membership");
            self.group_repo
                .remove_client_from_group(session_id, client_id)
                .await?;
            if let Some(previous) = previous {
                self.group_repo
                    .add_client_to_group(previous, client_id)
                    .await?;
            }
        } else if let Some(previous) = previous {
            self.release_group(client_id, previous).await?;
        }
        Ok(event)
    }

    async fn move_to_group(
        &self,
        client_id: ClientId,
        session_id: SessionId,
    ) -> Result<(), NetworkError> {
        let previous = self.group_repo.get_group_with_client(client_id).await?;
        self.group_repo
            .add_client_to_group(session_id.clone(), client_id)
            .await?;
        match previous {
            Some(previous) if previous != session_id => {
                self.release_group(client_id, previous).await
            }
            _ => Ok(()),
        }
    }

    /// Drop the client from `session_id`'s group; the session goes away with its
    /// last member. Callers hold the membership lock.
    async fn release_group(
        &self,
        client_id: ClientId,
        session_id: SessionId,
    ) -> Result<(), NetworkError> {
        let now_empty = self
            .group_repo
            .remove_client_from_group(session_id.clone(), client_id)
            .await?;

        if now_empty {
            debug!(%session_id, "Group empty, cleaning up session");
            self.engine
                .execute(DomainCommand::DisconnectCleanup { session_id })
                .await?;
        }
        Ok(())
    }

    fn require_client_id(&self) -> Result<ClientId, NetworkError> {
        self.client_id
            .ok_or_else(|| NetworkError::InternalError("connection not registered".to_string()))
    }
}
