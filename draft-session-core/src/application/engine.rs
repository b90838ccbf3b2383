use crate::application::{DomainCommand, DomainEvent, SessionStore};
use crate::domain::{
    generate_pool, CandidateId, HeadsOrTails, MatchFormat, PartyLabel, PoolError, Session,
    SessionError, SessionId, Side, TossOutcome, TurnPolicy, CATALOG, DEFAULT_DRAW_SIZE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Engine settings fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Catalog entries taking part in every draw
    pub pool_size: usize,
    /// Candidates per session
    pub draw_size: usize,
    pub turn_policy: TurnPolicy,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.pool_size > CATALOG.len() {
            return Err(PoolError::PoolExceedsCatalog {
                requested: self.pool_size,
                available: CATALOG.len(),
            });
        }
        if self.draw_size > self.pool_size {
            return Err(PoolError::DrawExceedsPool {
                draw_size: self.draw_size,
                pool_size: self.pool_size,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: CATALOG.len(),
            draw_size: DEFAULT_DRAW_SIZE,
            turn_policy: TurnPolicy::Enforced,
        }
    }
}

/// Draft session engine: owns the session store and applies every operation
/// to it all-or-nothing
#[derive(Debug, Clone)]
pub struct DraftEngine {
    store: SessionStore,
    config: EngineConfig,
    rng: StdRng,
}

impl DraftEngine {
    /// Engine with default settings and an entropy-seeded random source
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_config(store: SessionStore, config: EngineConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the random source with a seeded one (for reproducible runs)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process a single command and return the resulting event
    pub fn handle_command(&mut self, command: DomainCommand) -> DomainEvent {
        let name = command.name();

        let result = match command {
            DomainCommand::CreateSession {
                match_format,
                party_name,
            } => self
                .create_session(match_format, party_name)
                .map(|session_id| DomainEvent::SessionCreated { session_id }),

            DomainCommand::JoinSession {
                session_id,
                party_name,
            } => self
                .join_session(&session_id, party_name)
                .map(|session| DomainEvent::SessionJoined { session }),

            DomainCommand::HandleToss {
                session_id,
                party,
                call,
            } => self
                .handle_toss(&session_id, party, call)
                .and_then(|outcome| {
                    Ok(DomainEvent::TossResolved {
                        outcome,
                        session: self.snapshot(&session_id)?,
                    })
                }),

            DomainCommand::BanMap {
                session_id,
                party,
                candidate_id,
            } => self
                .ban_map(&session_id, party, candidate_id)
                .and_then(|_| {
                    Ok(DomainEvent::MapBanned {
                        candidate_id,
                        session: self.snapshot(&session_id)?,
                    })
                }),

            DomainCommand::SelectMap {
                session_id,
                party,
                candidate_id,
            } => self
                .select_map(&session_id, party, candidate_id)
                .and_then(|_| {
                    Ok(DomainEvent::MapSelected {
                        candidate_id,
                        session: self.snapshot(&session_id)?,
                    })
                }),

            DomainCommand::SelectSide {
                session_id,
                party,
                side,
            } => self
                .select_side(&session_id, party, side)
                .and_then(|_| {
                    Ok(DomainEvent::SideSelected {
                        session: self.snapshot(&session_id)?,
                    })
                }),

            DomainCommand::DisconnectCleanup { session_id } => {
                let existed = self.disconnect_cleanup(&session_id);
                Ok(DomainEvent::SessionRemoved {
                    session_id,
                    existed,
                })
            }
        };

        result.unwrap_or_else(|error| {
            debug!(command = name, %error, "Command rejected");
            DomainEvent::CommandFailed {
                command: name.to_string(),
                error,
            }
        })
    }

    // ===== Operations =====

    #[instrument(skip(self))]
    pub fn create_session(
        &mut self,
        match_format: MatchFormat,
        creator_name: String,
    ) -> Result<SessionId, SessionError> {
        let candidates =
            generate_pool(self.config.pool_size, self.config.draw_size, &mut self.rng)?;
        let session_id = self
            .store
            .register(|id| Session::new(id, match_format, creator_name, candidates));

        info!(%session_id, %match_format, "Session created");
        Ok(session_id)
    }

    #[instrument(skip(self))]
    pub fn join_session(
        &mut self,
        session_id: &SessionId,
        joiner_name: String,
    ) -> Result<Session, SessionError> {
        let session = self.session_mut(session_id)?;
        session.join(joiner_name);
        info!(%session_id, "Party B joined session");
        Ok(session.clone())
    }

    #[instrument(skip(self))]
    pub fn handle_toss(
        &mut self,
        session_id: &SessionId,
        party: PartyLabel,
        call: HeadsOrTails,
    ) -> Result<TossOutcome, SessionError> {
        let result = if self.rng.gen_bool(0.5) {
            HeadsOrTails::Heads
        } else {
            HeadsOrTails::Tails
        };

        let outcome = self.session_mut(session_id)?.toss(party, call, result)?;
        info!(%session_id, %result, winner = %outcome.toss_winner, "Coin toss resolved");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub fn ban_map(
        &mut self,
        session_id: &SessionId,
        party: PartyLabel,
        candidate_id: CandidateId,
    ) -> Result<(), SessionError> {
        let policy = self.config.turn_policy;
        self.session_mut(session_id)?
            .ban(party, candidate_id, policy)?;
        debug!(%session_id, %candidate_id, "Map banned");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn select_map(
        &mut self,
        session_id: &SessionId,
        party: PartyLabel,
        candidate_id: CandidateId,
    ) -> Result<(), SessionError> {
        let policy = self.config.turn_policy;
        self.session_mut(session_id)?
            .pick(party, candidate_id, policy)?;
        debug!(%session_id, %candidate_id, "Map selected");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn select_side(
        &mut self,
        session_id: &SessionId,
        party: PartyLabel,
        side: Side,
    ) -> Result<(), SessionError> {
        self.session_mut(session_id)?.select_side(party, side);
        debug!(%session_id, %side, "Side selected");
        Ok(())
    }

    /// Drop the session unconditionally. Returns whether it existed.
    #[instrument(skip(self))]
    pub fn disconnect_cleanup(&mut self, session_id: &SessionId) -> bool {
        let existed = self.store.remove(session_id).is_some();
        if existed {
            info!(%session_id, "Session removed");
        }
        existed
    }

    // ===== Queries =====

    /// Get a session by ID (for testing/inspection)
    pub fn get_session(&self, session_id: &SessionId) -> Option<&Session> {
        self.store.get(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.store.count()
    }

    fn session_mut(&mut self, session_id: &SessionId) -> Result<&mut Session, SessionError> {
        self.store
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))
    }

    fn snapshot(&self, session_id: &SessionId) -> Result<Session, SessionError> {
        self.store
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))
    }
}

impl Default for DraftEngine {
    fn default() -> Self {
        Self::new(SessionStore::new())
    }
}
