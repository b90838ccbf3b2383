use cucumber::World;
use draft_session_core::{
    CandidateId, DomainCommand, DomainEvent, DraftEngine, EngineConfig, PartyLabel, Session,
    SessionId, SessionStore, TossOutcome, TurnPolicy,
};

#[derive(Debug, World, Default)]
pub struct DraftWorld {
    /// Draft engine (the system under test)
    pub engine: DraftEngine,

    /// Session the scenario is working on
    pub session_id: Option<SessionId>,

    /// Last event emitted (for assertions)
    pub last_event: Option<DomainEvent>,

    /// Outcome of the last accepted toss
    pub last_toss: Option<TossOutcome>,

    /// Snapshot remembered before a rejected command
    pub remembered: Option<Session>,
}

impl DraftWorld {
    /// Execute a command and store the result
    pub fn execute(&mut self, command: DomainCommand) -> &DomainEvent {
        let event = self.engine.handle_command(command);

        match &event {
            DomainEvent::SessionCreated { session_id } => {
                self.session_id = Some(session_id.clone());
            }
            DomainEvent::TossResolved { outcome, .. } => {
                self.last_toss = Some(*outcome);
            }
            _ => {}
        }

        self.last_event.insert(event)
    }

    /// Swap in an engine running under `policy`
    pub fn use_turn_policy(&mut self, policy: TurnPolicy) {
        let config = EngineConfig {
            turn_policy: policy,
            ..EngineConfig::default()
        };
        self.engine = DraftEngine::with_config(SessionStore::new(), config)
            .expect("default pool settings are valid");
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id.clone().expect("No session created yet")
    }

    pub fn session(&self) -> &Session {
        self.engine
            .get_session(&self.session_id())
            .expect("Session is gone")
    }

    /// Get the last event (panics if none)
    pub fn last_event(&self) -> &DomainEvent {
        self.last_event.as_ref().expect("No event executed yet")
    }

    pub fn last_command_failed(&self) -> bool {
        self.last_event().is_failure()
    }

    pub fn last_error_code(&self) -> Option<&'static str> {
        self.last_event().error().map(|e| e.code())
    }

    /// Candidate at 1-based `position` in the drawn pool
    pub fn candidate_at(&self, position: usize) -> CandidateId {
        self.session().candidates()[position - 1].id()
    }

    /// A catalog id that was not drawn into this session
    pub fn candidate_outside_pool(&self) -> CandidateId {
        draft_session_core::CATALOG
            .iter()
            .map(|(id, _, _)| CandidateId::new(*id))
            .find(|id| self.session().candidate(*id).is_none())
            .expect("Pool covers the whole catalog")
    }
}

/// Parse a party label as written in feature files
pub fn party(label: &str) -> PartyLabel {
    match label {
        "A" => PartyLabel::A,
        "B" => PartyLabel::B,
        other => panic!("Unknown party '{}'", other),
    }
}
