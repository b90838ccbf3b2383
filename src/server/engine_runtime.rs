use crate::model::NetworkError;
use draft_session_core::{DomainCommand, DomainEvent, DraftEngine};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Inbound commands buffered before callers wait on the channel
pub const DEFAULT_QUEUE_SIZE: usize = 256;

struct EngineRequest {
    command: DomainCommand,
    reply: oneshot::Sender<DomainEvent>,
}

/// Cloneable handle to the task that owns the engine.
///
/// Every command from every connection goes through one task, so operations
/// on a session are applied one at a time in arrival order.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    /// Move `engine` into a background task and return a handle to it
    pub fn spawn(engine: DraftEngine, queue_size: usize) -> (Self, JoinHandle<DraftEngine>) {
        let (sender, receiver) = mpsc::channel(queue_size);
        let task = tokio::spawn(run(engine, receiver));
        (Self { sender }, task)
    }

    #[instrument(skip(self, command), fields(command = command.name()))]
    pub async fn execute(&self, command: DomainCommand) -> Result<DomainEvent, NetworkError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(EngineRequest { command, reply })
            .await
            .map_err(|_| NetworkError::EngineUnavailable)?;
        response.await.map_err(|_| NetworkError::EngineUnavailable)
    }
}

/// Runs until every handle is dropped, then hands the engine back
async fn run(mut engine: DraftEngine, mut receiver: mpsc::Receiver<EngineRequest>) -> DraftEngine {
    info!("Engine runtime started");
    while let Some(EngineRequest { command, reply }) = receiver.recv().await {
        let event = engine.handle_command(command);
        if reply.send(event).is_err() {
            debug!("Requester went away before the reply");
        }
    }
    info!(sessions = engine.session_count(), "Engine runtime stopped");
    engine
}
