use cucumber::{then, when};
use draft_session_core::{CandidateId, DomainCommand};
use draft_session_tests::{party, DraftWorld};

fn positions(list: &str) -> Vec<usize> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().expect("candidate position"))
        .collect()
}

fn ban(world: &mut DraftWorld, label: &str, candidate_id: CandidateId) {
    let session_id = world.session_id();
    world.execute(DomainCommand::BanMap {
        session_id,
        party: party(label),
        candidate_id,
    });
}

fn pick(world: &mut DraftWorld, label: &str, candidate_id: CandidateId) {
    let session_id = world.session_id();
    world.execute(DomainCommand::SelectMap {
        session_id,
        party: party(label),
        candidate_id,
    });
}

#[when(expr = "party {word} bans candidate {int}")]
async fn party_bans(world: &mut DraftWorld, label: String, position: usize) {
    let candidate_id = world.candidate_at(position);
    ban(world, &label, candidate_id);
}

#[when(expr = "party {word} picks candidate {int}")]
async fn party_picks(world: &mut DraftWorld, label: String, position: usize) {
    let candidate_id = world.candidate_at(position);
    pick(world, &label, candidate_id);
}

#[when(expr = "party {word} bans a map outside the pool")]
async fn party_bans_outside_pool(world: &mut DraftWorld, label: String) {
    let candidate_id = world.candidate_outside_pool();
    ban(world, &label, candidate_id);
}

#[when(expr = "party {word} picks a map outside the pool")]
async fn party_picks_outside_pool(world: &mut DraftWorld, label: String) {
    let candidate_id = world.candidate_outside_pool();
    pick(world, &label, candidate_id);
}

#[then(expr = "the banned order is candidates {string}")]
async fn banned_order_is(world: &mut DraftWorld, list: String) {
    let expected: Vec<CandidateId> = positions(&list)
        .into_iter()
        .map(|p| world.candidate_at(p))
        .collect();
    assert_eq!(world.session().banned_order(), expected.as_slice());

    for id in &expected {
        let candidate = world.session().candidate(*id).expect("candidate in pool");
        assert!(candidate.is_banned(), "{} should be banned", candidate.name());
    }
}

#[then(expr = "the picked order is candidates {string}")]
async fn picked_order_is(world: &mut DraftWorld, list: String) {
    let expected: Vec<CandidateId> = positions(&list)
        .into_iter()
        .map(|p| world.candidate_at(p))
        .collect();
    assert_eq!(world.session().picked_order(), expected.as_slice());
}

#[then(expr = "{int} candidates remain")]
async fn candidates_remain(world: &mut DraftWorld, count: usize) {
    assert_eq!(world.session().remaining().count(), count);
}
