use cucumber::{then, when};
use draft_session_core::{DomainCommand, Side};
use draft_session_tests::{party, DraftWorld};

fn side(value: &str) -> Side {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .unwrap_or_else(|e| panic!("Unknown side '{}': {}", value, e))
}

#[when(expr = "party {word} selects {string}")]
async fn party_selects_side(world: &mut DraftWorld, label: String, value: String) {
    let session_id = world.session_id();
    world.execute(DomainCommand::SelectSide {
        session_id,
        party: party(&label),
        side: side(&value),
    });
}

#[then(expr = "party {word} plays {string}")]
async fn party_plays(world: &mut DraftWorld, label: String, value: String) {
    assert_eq!(
        world.session().party(party(&label)).side(),
        Some(side(&value))
    );
}
