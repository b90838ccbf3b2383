use super::{Connection, ConnectionRepository, GroupRepository};
use crate::model::{ClientId, NetworkError};
use async_trait::async_trait;
use draft_session_core::SessionId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, instrument};

/// Both directions of the group index, kept under one lock
#[derive(Debug, Default)]
struct Groups {
    members: HashMap<SessionId, Vec<ClientId>>,
    current: HashMap<ClientId, SessionId>,
}

#[derive(Default)]
pub struct MemoryStorage {
    connections: Arc<RwLock<HashMap<ClientId, Connection>>>,
    groups: Arc<RwLock<Groups>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(operation: &'static str, e: PoisonError<T>) -> NetworkError {
    error!(operation, "Storage lock poisoned");
    NetworkError::InternalError(format!("{}: {}", operation, e))
}

#[async_trait]
impl ConnectionRepository for MemoryStorage {
    #[instrument(skip(self, connection), fields(client_id = ?connection.client_id))]
    async fn add_connection(&self, connection: Connection) -> Result<(), NetworkError> {
        let mut connections = self
            .connections
            .write()
            .map_err(|e| poisoned("add connection", e))?;
        connections.insert(connection.client_id, connection);
        debug!(open = connections.len(), "Connection registered");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_connection(&self, id: ClientId) -> Result<(), NetworkError> {
        let mut connections = self
            .connections
            .write()
            .map_err(|e| poisoned("remove connection", e))?;
        if connections.remove(&id).is_none() {
            debug!("Connection was not registered");
        }
        Ok(())
    }

    async fn get_connection(&self, id: ClientId) -> Result<Option<Connection>, NetworkError> {
        let connections = self
            .connections
            .read()
            .map_err(|e| poisoned("get connection", e))?;
        Ok(connections.get(&id).cloned())
    }
}

#[async_trait]
impl GroupRepository for MemoryStorage {
    #[instrument(skip(self))]
    async fn add_client_to_group(
        &self,
        session_id: SessionId,
        client_id: ClientId,
    ) -> Result<(), NetworkError> {
        let mut groups = self
            .groups
            .write()
            .map_err(|e| poisoned("add client to group", e))?;

        let members = groups.members.entry(session_id.clone()).or_default();
        if !members.contains(&client_id) {
            members.push(client_id);
        }
        groups.current.insert(client_id, session_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_client_from_group(
        &self,
        session_id: SessionId,
        client_id: ClientId,
    ) -> Result<bool, NetworkError> {
        let mut groups = self
            .groups
            .write()
            .map_err(|e| poisoned("remove client from group", e))?;

        let now_empty = match groups.members.get_mut(&session_id) {
            Some(members) => {
                members.retain(|&id| id != client_id);
                members.is_empty()
            }
            None => true,
        };
        if now_empty {
            groups.members.remove(&session_id);
            debug!("Group emptied");
        }
        if groups.current.get(&client_id) == Some(&session_id) {
            groups.current.remove(&client_id);
        }
        Ok(now_empty)
    }

    async fn get_clients_in_group(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ClientId>, NetworkError> {
        let groups = self
            .groups
            .read()
            .map_err(|e| poisoned("get clients in group", e))?;
        Ok(groups.members.get(&session_id).cloned().unwrap_or_default())
    }

    async fn get_group_with_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<SessionId>, NetworkError> {
        let groups = self
            .groups
            .read()
            .map_err(|e| poisoned("get group with client", e))?;
        Ok(groups.current.get(&client_id).cloned())
    }
}
