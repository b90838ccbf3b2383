use cucumber::{given, then, when};
use draft_session_core::{DomainCommand, HeadsOrTails};
use draft_session_tests::{party, DraftWorld};

fn call(value: &str) -> HeadsOrTails {
    match value {
        "heads" => HeadsOrTails::Heads,
        "tails" => HeadsOrTails::Tails,
        other => panic!("Unknown call '{}'", other),
    }
}

#[given(expr = "party {word} has called {string}")]
#[when(expr = "party {word} calls {string}")]
async fn party_calls(world: &mut DraftWorld, label: String, value: String) {
    let session_id = world.session_id();
    world.execute(DomainCommand::HandleToss {
        session_id,
        party: party(&label),
        call: call(&value),
    });
}

#[then("the toss is completed")]
async fn toss_completed(world: &mut DraftWorld) {
    let session = world.session();
    assert!(session.toss_completed());
    assert!(session.toss_winner().is_some());
    assert_eq!(
        session.toss_loser(),
        session.toss_winner().map(|winner| winner.other())
    );
}

#[then(expr = "the toss winner matches the {string} call of party {word}")]
async fn winner_matches_call(world: &mut DraftWorld, value: String, label: String) {
    let caller = party(&label);
    let outcome = world.last_toss.expect("No toss resolved");
    let expected = if outcome.result == call(&value) {
        caller
    } else {
        caller.other()
    };

    assert_eq!(outcome.toss_winner, expected);
    assert_eq!(world.session().toss_winner(), Some(expected));
}

#[then(expr = "it is party {word}'s turn")]
async fn turn_is(world: &mut DraftWorld, label: String) {
    assert_eq!(world.session().current_turn(), Some(party(&label)));
}
