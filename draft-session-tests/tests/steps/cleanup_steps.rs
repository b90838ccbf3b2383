use cucumber::{given, then, when};
use draft_session_core::{DomainCommand, DomainEvent, SessionId};
use draft_session_tests::DraftWorld;

#[given("the session is cleaned up")]
#[when("the session is cleaned up")]
async fn session_cleaned_up(world: &mut DraftWorld) {
    let session_id = world.session_id();
    world.execute(DomainCommand::DisconnectCleanup { session_id });
}

#[when(expr = "{string} joins session {string}")]
async fn join_named_session(world: &mut DraftWorld, joiner: String, session_id: String) {
    world.execute(DomainCommand::JoinSession {
        session_id: SessionId::from(session_id),
        party_name: joiner,
    });
}

#[then("the session no longer exists")]
async fn session_gone(world: &mut DraftWorld) {
    assert!(world.engine.get_session(&world.session_id()).is_none());
}

#[then(expr = "the cleanup reports existed {word}")]
async fn cleanup_reports(world: &mut DraftWorld, existed: String) {
    let expected: bool = existed.parse().expect("true or false");
    match world.last_event() {
        DomainEvent::SessionRemoved { existed, .. } => assert_eq!(*existed, expected),
        other => panic!("Expected SessionRemoved, got {:?}", other),
    }
}

#[then(expr = "the engine holds {int} session(s)")]
async fn engine_holds(world: &mut DraftWorld, count: usize) {
    assert_eq!(world.engine.session_count(), count);
}
