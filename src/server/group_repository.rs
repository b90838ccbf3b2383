use crate::model::{ClientId, NetworkError};
use async_trait::async_trait;
use draft_session_core::SessionId;

/// Communication groups: the connections subscribed to a session's broadcasts.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Add the client to the group and make it the client's current group.
    /// Membership in an earlier group is kept until explicitly removed.
    async fn add_client_to_group(
        &self,
        session_id: SessionId,
        client_id: ClientId,
    ) -> Result<(), NetworkError>;

    /// Returns `true` when the group is empty afterwards. The client's current
    /// group is cleared only if it is this one.
    async fn remove_client_from_group(
        &self,
        session_id: SessionId,
        client_id: ClientId,
    ) -> Result<bool, NetworkError>;

    async fn get_clients_in_group(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ClientId>, NetworkError>;

    async fn get_group_with_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<SessionId>, NetworkError>;
}
