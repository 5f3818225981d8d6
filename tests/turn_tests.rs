//! Turn sequencing scenarios driven through `TurnController`.

use ludo_engine::core::{ExtraTurnReason, PassReason, TurnPhase};
use ludo_engine::turn::{pending_moves, RejectionCode};
use ludo_engine::{
    Color, Command, EventTag, GameEvent, GameState, MatchConfig, MatchStatus, PlayerId,
    PlayerSpec, Position, Rejection, SequenceSource, TokenId, TurnController,
};

const RED: PlayerId = PlayerId(1);
const OTHER: PlayerId = PlayerId(2);

fn pos(v: i8) -> Position {
    Position::new(v).unwrap()
}

/// Red in seat 0 against `other` in seat 1, dice scripted with `faces`.
fn setup(other: Color, faces: &[u8]) -> (TurnController<SequenceSource>, GameState) {
    let controller =
        TurnController::with_source(MatchConfig::default(), SequenceSource::faces(faces.to_vec()));
    let roster = vec![PlayerSpec::new(RED, Color::Red), PlayerSpec::new(OTHER, other)];
    let state = controller
        .start_match(&GameState::waiting(), &roster)
        .unwrap()
        .state;
    (controller, state)
}

fn place(state: &GameState, player: PlayerId, token: u8, v: i8) -> GameState {
    state.with_token_at(player, TokenId(token), pos(v)).unwrap()
}

fn tags(events: &[ludo_engine::EventRecord]) -> Vec<EventTag> {
    events.iter().filter_map(|r| r.event.tag()).collect()
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_capture_sends_home_and_grants_extra_turn() {
    let (mut controller, state) = setup(Color::Green, &[2]);
    // Red 12 and Green 25 are both absolute cell 26.
    let state = place(&state, RED, 0, 10);
    let state = place(&state, OTHER, 1, 25);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    assert_eq!(rolled.phase(), Some(TurnPhase::AwaitMove { dice: 2 }));

    let t = controller.move_token(&rolled, RED, TokenId(0)).unwrap();
    assert_eq!(t.state.players()[0].tokens()[0].position, pos(12));
    assert!(t.state.players()[1].tokens()[1].position.is_base());
    assert_eq!(t.state.current_player_index(), 0, "capturer rolls again");
    assert_eq!(t.state.dice_value(), None);
    assert_eq!(
        tags(&t.events),
        vec![EventTag::TokenMoved, EventTag::TokenCaptured, EventTag::ExtraTurnGranted]
    );
    assert!(t.state.event_log().iter().any(|r| matches!(
        r.event,
        GameEvent::TokenCaptured { by: RED, victim: OTHER, token: TokenId(1), .. }
    )));
}

#[test]
fn test_capture_against_blue() {
    let (mut controller, state) = setup(Color::Blue, &[2]);
    // Red 22 and Blue 9 are both absolute cell 36.
    let state = place(&state, RED, 0, 20);
    let state = place(&state, OTHER, 3, 9);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let t = controller.move_token(&rolled, RED, TokenId(0)).unwrap();
    assert!(t.state.players()[1].tokens()[3].position.is_base());
    assert_eq!(t.state.current_player_index(), 0);
}

#[test]
fn test_home_stretch_landing_skips_capture() {
    let (mut controller, state) = setup(Color::Blue, &[4]);
    let state = place(&state, RED, 0, 49);
    // Same raw number, but inside Blue's own lane.
    let state = place(&state, OTHER, 0, 53);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let t = controller.move_token(&rolled, RED, TokenId(0)).unwrap();

    assert_eq!(t.state.players()[0].tokens()[0].position, pos(53));
    assert_eq!(t.state.players()[1].tokens()[0].position, pos(53));
    assert!(!tags(&t.events).contains(&EventTag::TokenCaptured));
    assert_eq!(t.state.current_player_index(), 1, "no capture, no six: turn passes");
}

// =============================================================================
// Rolling
// =============================================================================

#[test]
fn test_base_token_rolls_three_passes_without_move() {
    let (mut controller, state) = setup(Color::Green, &[3]);
    let t = controller.apply(&state, Command::RollDice { player: RED }).unwrap();

    assert_eq!(t.state.current_player_index(), 1);
    assert_eq!(t.state.dice_value(), None);
    assert_eq!(t.state.consecutive_sixes(), 0);
    assert_eq!(tags(&t.events), vec![EventTag::DiceRolled, EventTag::TurnPassed]);
    assert!(matches!(
        t.events[1].event,
        GameEvent::TurnPassed { from: RED, to: OTHER, reason: PassReason::NoLegalMove }
    ));
}

#[test]
fn test_six_without_mobility_still_passes() {
    let (mut controller, state) = setup(Color::Green, &[6]);
    let mut state = state;
    for token in 0..3 {
        state = place(&state, RED, token, 57);
    }
    state = place(&state, RED, 3, 53);

    let t = controller.roll_dice(&state, RED).unwrap();
    assert_eq!(t.state.current_player_index(), 1);
    assert_eq!(t.state.consecutive_sixes(), 0);
    assert_eq!(t.state.dice_value(), None);
}

// =============================================================================
// Sixes
// =============================================================================

#[test]
fn test_three_sixes_force_pass_even_with_capture() {
    let (mut controller, state) = setup(Color::Green, &[6, 6, 6]);
    // Red 28 and Green 41 are both absolute cell 42.
    let state = place(&state, RED, 0, 10);
    let mut state = place(&state, OTHER, 2, 41);

    for expected_sixes in 1..=2u8 {
        state = controller.roll_dice(&state, RED).unwrap().state;
        let t = controller.move_token(&state, RED, TokenId(0)).unwrap();
        assert_eq!(t.state.consecutive_sixes(), expected_sixes);
        assert_eq!(t.state.current_player_index(), 0);
        assert!(matches!(
            t.events.last().unwrap().event,
            GameEvent::ExtraTurnGranted { reason: ExtraTurnReason::RolledSix, .. }
        ));
        state = t.state;
    }

    state = controller.roll_dice(&state, RED).unwrap().state;
    let t = controller.move_token(&state, RED, TokenId(0)).unwrap();

    assert_eq!(t.state.players()[0].tokens()[0].position, pos(28));
    assert!(t.state.players()[1].tokens()[2].position.is_base(), "capture still happens");
    assert_eq!(t.state.current_player_index(), 1, "third six passes the turn");
    assert_eq!(t.state.consecutive_sixes(), 0);
    assert!(!tags(&t.events).contains(&EventTag::ExtraTurnGranted));
    assert!(matches!(
        t.events.last().unwrap().event,
        GameEvent::TurnPassed { reason: PassReason::ConsecutiveSixes, .. }
    ));
}

#[test]
fn test_capture_after_six_resets_counter() {
    let (mut controller, state) = setup(Color::Green, &[6, 2]);
    // Red 18 and Green 31 are both absolute cell 32.
    let state = place(&state, RED, 0, 10);
    let state = place(&state, OTHER, 0, 31);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let after_six = controller.move_token(&rolled, RED, TokenId(0)).unwrap().state;
    assert_eq!(after_six.consecutive_sixes(), 1);

    let rolled = controller.roll_dice(&after_six, RED).unwrap().state;
    let t = controller.move_token(&rolled, RED, TokenId(0)).unwrap();
    assert_eq!(t.state.players()[0].tokens()[0].position, pos(18));
    assert!(t.state.players()[1].tokens()[0].position.is_base());
    assert_eq!(t.state.consecutive_sixes(), 0);
    assert_eq!(t.state.current_player_index(), 0);
}

#[test]
fn test_six_enters_token_from_base() {
    let (mut controller, state) = setup(Color::Green, &[6]);
    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let t = controller.move_token(&rolled, RED, TokenId(2)).unwrap();
    assert_eq!(t.state.players()[0].tokens()[2].position, Position::ENTRY);
}

// =============================================================================
// Winning
// =============================================================================

#[test]
fn test_last_token_home_wins_and_finishes_two_player_match() {
    let (mut controller, state) = setup(Color::Green, &[2]);
    let mut state = state;
    for token in 0..3 {
        state = place(&state, RED, token, 57);
    }
    state = place(&state, RED, 3, 55);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let t = controller.move_token(&rolled, RED, TokenId(3)).unwrap();

    assert_eq!(t.state.status(), MatchStatus::Finished);
    assert_eq!(t.state.winners().iter().copied().collect::<Vec<_>>(), vec![RED]);
    assert_eq!(t.state.standings(), vec![RED, OTHER]);
    assert_eq!(t.state.dice_value(), None);
    assert_eq!(
        tags(&t.events),
        vec![EventTag::TokenMoved, EventTag::PlayerWon, EventTag::MatchFinished]
    );

    let err = controller.roll_dice(&t.state, OTHER).unwrap_err();
    assert_eq!(err.code(), RejectionCode::MatchNotPlaying);
}

#[test]
fn test_three_finished_tokens_is_not_a_win() {
    let (mut controller, state) = setup(Color::Green, &[1]);
    let mut state = state;
    for token in 0..3 {
        state = place(&state, RED, token, 57);
    }
    state = place(&state, RED, 3, 40);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let t = controller.move_token(&rolled, RED, TokenId(3)).unwrap();
    assert!(t.state.winners().is_empty());
    assert_eq!(t.state.status(), MatchStatus::Playing);
}

// =============================================================================
// Rejections and timeouts
// =============================================================================

#[test]
fn test_rejections_leave_state_unchanged() {
    let (mut controller, state) = setup(Color::Green, &[4]);
    let state = place(&state, RED, 0, 5);
    let before = state.clone();

    assert_eq!(
        controller.roll_dice(&state, OTHER).unwrap_err().code(),
        RejectionCode::NotYourTurn
    );
    assert_eq!(
        controller.move_token(&state, RED, TokenId(0)).unwrap_err().code(),
        RejectionCode::NoRollPending
    );
    assert_eq!(state, before);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    let rolled_before = rolled.clone();
    // Token 1 is in base and the roll is 4.
    assert_eq!(
        controller.move_token(&rolled, RED, TokenId(1)),
        Err(Rejection::IllegalMove { player: RED, token: TokenId(1) })
    );
    assert_eq!(
        controller.roll_dice(&rolled, RED).unwrap_err().code(),
        RejectionCode::RollAlreadyPending
    );
    assert_eq!(rolled, rolled_before);
}

#[test]
fn test_finished_token_cannot_move() {
    let (mut controller, state) = setup(Color::Green, &[1]);
    let state = place(&state, RED, 0, 57);
    let state = place(&state, RED, 1, 30);

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    assert_eq!(pending_moves(&rolled).as_slice(), &[TokenId(1)]);
    assert_eq!(
        controller.move_token(&rolled, RED, TokenId(0)).unwrap_err().code(),
        RejectionCode::IllegalMove
    );
}

#[test]
fn test_timeout_during_await_move_clears_dice() {
    let (mut controller, state) = setup(Color::Green, &[6]);
    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    assert_eq!(rolled.dice_value(), Some(6));

    let generation = rolled.turn_deadline().generation;
    let t = controller
        .apply(&rolled, Command::TimeElapsed { generation })
        .unwrap();
    assert_eq!(t.state.current_player_index(), 1);
    assert_eq!(t.state.dice_value(), None);
    assert_eq!(t.state.consecutive_sixes(), 0);

    // The same timer firing again must not pass the turn a second time.
    let stale = controller.apply(&t.state, Command::TimeElapsed { generation });
    assert_eq!(stale.unwrap_err().code(), RejectionCode::StaleTimeout);
}

#[test]
fn test_every_accepted_command_renews_deadline() {
    let (mut controller, state) = setup(Color::Green, &[6, 3]);
    let g0 = state.turn_deadline().generation;

    let rolled = controller.roll_dice(&state, RED).unwrap().state;
    assert_eq!(rolled.turn_deadline().generation, g0 + 1);

    let moved = controller.move_token(&rolled, RED, TokenId(0)).unwrap().state;
    assert_eq!(moved.turn_deadline().generation, g0 + 2);

    // Rejected commands do not.
    let _ = controller.roll_dice(&moved, OTHER);
    assert_eq!(moved.turn_deadline().generation, g0 + 2);
}

#[test]
fn test_replay_is_deterministic() {
    let play = || {
        let mut controller = TurnController::new(MatchConfig::default().with_seed(99));
        let roster = vec![
            PlayerSpec::new(RED, Color::Red),
            PlayerSpec::new(OTHER, Color::Yellow),
        ];
        ludo_engine::sim::play_match(&mut controller, &roster, &ludo_engine::GreedyPolicy, 400)
            .unwrap()
    };
    assert_eq!(play(), play());
}
