use cucumber::{given, then, when};
use draft_session_core::{DomainCommand, DomainEvent, MatchFormat, CATALOG};
use draft_session_tests::DraftWorld;
use std::collections::HashSet;

fn match_format(format: &str) -> MatchFormat {
    serde_json::from_value(serde_json::Value::String(format.to_string()))
        .unwrap_or_else(|e| panic!("Unknown match format '{}': {}", format, e))
}

// ===== Given Steps =====

#[given(expr = "a {string} session created by {string}")]
async fn session_created(world: &mut DraftWorld, format: String, creator: String) {
    world.execute(DomainCommand::CreateSession {
        match_format: match_format(&format),
        party_name: creator,
    });
    assert!(
        matches!(world.last_event(), DomainEvent::SessionCreated { .. }),
        "Expected SessionCreated, got {:?}",
        world.last_event()
    );
}

#[when(expr = "{string} creates a {string} session")]
async fn creates_session(world: &mut DraftWorld, creator: String, format: String) {
    session_created(world, format, creator).await;
}

#[given(expr = "{string} has joined the session")]
#[when(expr = "{string} joins the session")]
async fn party_joins(world: &mut DraftWorld, joiner: String) {
    let session_id = world.session_id();
    world.execute(DomainCommand::JoinSession {
        session_id,
        party_name: joiner,
    });
}

#[given("the advisory turn policy")]
async fn advisory_policy(world: &mut DraftWorld) {
    world.use_turn_policy(draft_session_core::TurnPolicy::Advisory);
}

#[given("I remember the session")]
async fn remember_session(world: &mut DraftWorld) {
    world.remembered = Some(world.session().clone());
}

// ===== Then Steps =====

#[then(expr = "the command fails with {string}")]
async fn command_fails_with(world: &mut DraftWorld, code: String) {
    assert!(
        world.last_command_failed(),
        "Expected failure, got {:?}",
        world.last_event()
    );
    assert_eq!(world.last_error_code(), Some(code.as_str()));
}

#[then("the command succeeds")]
async fn command_succeeds(world: &mut DraftWorld) {
    assert!(
        !world.last_command_failed(),
        "Expected success, got {:?}",
        world.last_event()
    );
}

#[then("the session is unchanged")]
async fn session_unchanged(world: &mut DraftWorld) {
    let remembered = world.remembered.as_ref().expect("No session remembered");
    assert_eq!(world.session(), remembered);
}

#[then(expr = "party A is named {string}")]
async fn party_a_named(world: &mut DraftWorld, name: String) {
    assert_eq!(world.session().party_a().name(), name);
}

#[then(expr = "party B is named {string}")]
async fn party_b_named(world: &mut DraftWorld, name: String) {
    assert_eq!(world.session().party_b().name(), name);
}

#[then(expr = "the session has {int} distinct candidates from the catalog")]
async fn distinct_candidates(world: &mut DraftWorld, count: usize) {
    let candidates = world.session().candidates();
    assert_eq!(candidates.len(), count);

    let ids: HashSet<u32> = candidates.iter().map(|c| c.id().value()).collect();
    assert_eq!(ids.len(), count);
    for candidate in candidates {
        assert!(
            CATALOG
                .iter()
                .any(|(id, name, _)| *id == candidate.id().value() && *name == candidate.name()),
            "{} is not a catalog entry",
            candidate.name()
        );
    }
}

#[then("no candidate is banned")]
async fn no_candidate_banned(world: &mut DraftWorld) {
    assert!(world.session().candidates().iter().all(|c| !c.is_banned()));
    assert!(world.session().banned_order().is_empty());
    assert!(world.session().picked_order().is_empty());
}

#[then("nobody holds the turn")]
async fn nobody_holds_turn(world: &mut DraftWorld) {
    assert_eq!(world.session().current_turn(), None);
}
