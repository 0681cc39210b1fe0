//! End-to-end battle scenarios driven through the public API.

use pocket_battle::{
    create_rng, BattleOutcome, BattleSession, BattleState, InputAction, Item, PocketResult,
    Roster, ScriptedRandom, PYTHON, RACCOON, RAVEN,
};
use InputAction::*;

/// Sends one action, then lets the input cooldown run out.
fn press(
    session: &mut BattleSession,
    roster: &mut Roster,
    rng: &mut ScriptedRandom,
    action: InputAction,
) {
    session.handle_events(&[action], roster, rng);
    session.update(1.0, roster);
}

fn party(potions: u32, balls: u32) -> PocketResult<Roster> {
    let mut roster = Roster::with_items(potions, balls);
    roster.add(RACCOON.spawn()?);
    Ok(roster)
}

#[test]
fn test_knockout_then_confirm_ends_battle() -> PocketResult<()> {
    let mut roster = party(0, 0)?;
    let mut session = BattleSession::new(PYTHON.spawn()?.with_hp(5), &roster);
    let mut rng = ScriptedRandom::new();

    press(&mut session, &mut roster, &mut rng, Confirm);
    assert_eq!(session.state(), BattleState::Fight);
    press(&mut session, &mut roster, &mut rng, Confirm);

    assert_eq!(session.enemy().hp(), 0);
    assert_eq!(session.state(), BattleState::Message);
    assert!(session.message().ends_with("fainted!"));

    press(&mut session, &mut roster, &mut rng, Confirm);
    assert_eq!(session.state(), BattleState::End);
    assert_eq!(session.outcome(), Some(BattleOutcome::Won));
    assert_eq!(roster.len(), 1);
    Ok(())
}

#[test]
fn test_capture_without_balls_shows_message() -> PocketResult<()> {
    let mut roster = party(0, 0)?;
    let mut session = BattleSession::new(RAVEN.spawn()?, &roster);
    let mut rng = ScriptedRandom::new();

    press(&mut session, &mut roster, &mut rng, Right);
    press(&mut session, &mut roster, &mut rng, Confirm);
    assert_eq!(session.state(), BattleState::Bag);
    press(&mut session, &mut roster, &mut rng, Down);
    press(&mut session, &mut roster, &mut rng, Confirm);

    assert_eq!(session.message(), "No capture balls!");
    assert_eq!(session.state(), BattleState::Message);
    assert_eq!(roster.count(Item::CaptureBall), 0);

    // Nobody fainted, so the message leads back to the menu
    press(&mut session, &mut roster, &mut rng, Confirm);
    assert_eq!(session.state(), BattleState::Menu);
    Ok(())
}

#[test]
fn test_successful_capture_joins_party_and_ends() -> PocketResult<()> {
    let mut roster = party(0, 3)?;
    let mut session = BattleSession::new(PYTHON.spawn()?.with_hp(1), &roster);
    let mut rng = ScriptedRandom::new().with_chances([0.1]);

    press(&mut session, &mut roster, &mut rng, Right);
    press(&mut session, &mut roster, &mut rng, Confirm);
    press(&mut session, &mut roster, &mut rng, Down);
    press(&mut session, &mut roster, &mut rng, Confirm);

    assert_eq!(roster.len(), 2);
    assert_eq!(roster.get(1).map(|c| c.name.as_str()), Some("Python"));
    assert_eq!(roster.count(Item::CaptureBall), 2);
    assert_eq!(session.state(), BattleState::Message);
    assert!(session.auto_close_message());

    press(&mut session, &mut roster, &mut rng, Confirm);
    assert_eq!(session.state(), BattleState::End);
    assert_eq!(session.outcome(), Some(BattleOutcome::Captured));
    Ok(())
}

#[test]
fn test_fainted_active_freezes_until_switch() -> PocketResult<()> {
    let mut roster = party(0, 0)?;
    roster.add(RAVEN.spawn()?);
    roster.damage_member(0, 95)?;
    let mut session = BattleSession::new(PYTHON.spawn()?, &roster);
    let mut rng = ScriptedRandom::new();

    press(&mut session, &mut roster, &mut rng, Confirm);
    press(&mut session, &mut roster, &mut rng, Confirm);

    assert_eq!(roster.get(0).map(|c| c.hp()), Some(0));
    assert!(session.request_party_overlay());
    assert_eq!(session.state(), BattleState::Menu);

    // Frozen: nothing moves while the overlay request is pending
    press(&mut session, &mut roster, &mut rng, Right);
    press(&mut session, &mut roster, &mut rng, Confirm);
    assert_eq!(session.menu_cursor(), 0);
    assert_eq!(session.state(), BattleState::Menu);

    // The overlay takes the request and picks the survivor
    assert!(session.take_party_request());
    roster.set_active(1)?;
    session.update(1.0, &roster);
    assert_eq!(session.player_index(), Some(1));

    press(&mut session, &mut roster, &mut rng, Right);
    assert_eq!(session.menu_cursor(), 1);
    Ok(())
}

#[test]
fn test_cancel_at_menu_is_idempotent() -> PocketResult<()> {
    let mut roster = party(1, 1)?;
    let mut session = BattleSession::new(RAVEN.spawn()?, &roster);
    let mut rng = ScriptedRandom::new();

    for _ in 0..5 {
        press(&mut session, &mut roster, &mut rng, Cancel);
        assert_eq!(session.state(), BattleState::Menu);
        assert_eq!(session.menu_cursor(), 0);
    }
    Ok(())
}

#[test]
fn test_seeded_slugfest_always_finishes() -> PocketResult<()> {
    for seed in 0..20 {
        let mut roster = party(0, 0)?;
        let mut session = BattleSession::new(PYTHON.spawn()?, &roster);
        let mut rng = create_rng(Some(seed));

        for _ in 0..200 {
            if session.is_over() {
                break;
            }
            session.handle_events(&[Confirm], &mut roster, &mut rng);
            session.update(1.0, &roster);
        }

        assert!(session.is_over(), "seed {seed} never finished");
        assert!(matches!(
            session.outcome(),
            Some(BattleOutcome::Won | BattleOutcome::Lost)
        ));
    }
    Ok(())
}
