use crate::model::{ClientId, ServerEvent};
use tokio::sync::mpsc::Sender;

/// An open websocket connection and the channel feeding its writer task
#[derive(Debug, Clone)]
pub struct Connection {
    pub client_id: ClientId,
    pub sender: Sender<ServerEvent>,
}

impl Connection {
    pub fn new(client_id: ClientId, sender: Sender<ServerEvent>) -> Self {
        Self { client_id, sender }
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.client_id == other.client_id && self.sender.same_channel(&other.sender)
    }
}
