//! Property tests for rules that must hold for any input sequence.
//!
//! - the active piece always fits the board while the game is running
//! - score and cleared lines never decrease; level follows lines
//! - the board never keeps a full row
//! - a rejected action changes nothing
//! - garbage exchange in battle keeps all of the above for both players

use proptest::prelude::*;

use duel_tetris::core::{
    cell_offsets, normalize_rotation, route_garbage, ActionOutcome, Board, GameState, Tetromino,
};
use duel_tetris::types::{GameAction, PieceKind, BOARD_HEIGHT};

const PLAYABLE: [GameAction; 6] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
];

/// A step of a simulated match: a key press or a gravity tick
#[derive(Debug, Clone, Copy)]
enum Step {
    Press(GameAction),
    Tick,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => prop::sample::select(PLAYABLE.to_vec()).prop_map(Step::Press),
        1 => Just(Step::Tick),
    ]
}

fn kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn check_state(state: &GameState) -> Result<(), TestCaseError> {
    if !state.game_over() {
        prop_assert!(state.board().is_valid(state.current(), 0, 0, None));
    }
    prop_assert_eq!(state.level(), state.lines() / 10 + 1);
    for y in 0..BOARD_HEIGHT as usize {
        prop_assert!(!state.board().is_row_full(y), "row {} left full", y);
    }
    Ok(())
}

/// Gravity step; locks when the piece cannot fall. Returns lines cleared.
fn gravity(state: &mut GameState) -> Option<u32> {
    if state.game_over() || state.gravity_tick() {
        return None;
    }
    Some(state.lock_current_piece())
}

proptest! {
    #[test]
    fn single_player_rollout_keeps_invariants(
        seed in any::<u32>(),
        steps in prop::collection::vec(step(), 1..300),
    ) {
        let mut state = GameState::new(seed);

        for s in steps {
            let (score, lines) = (state.score(), state.lines());

            match s {
                Step::Press(action) => {
                    let before = state.snapshot();
                    let outcome = state.apply_action(action);
                    if outcome == ActionOutcome::Rejected {
                        prop_assert_eq!(state.snapshot(), before);
                    }
                }
                Step::Tick => {
                    gravity(&mut state);
                }
            }

            prop_assert!(state.score() >= score);
            prop_assert!(state.lines() >= lines);
            prop_assert_eq!(state.pending_garbage(), 0);
            check_state(&state)?;
        }
    }

    #[test]
    fn battle_rollout_keeps_invariants(
        seed in any::<u32>(),
        steps in prop::collection::vec((any::<bool>(), step()), 1..300),
    ) {
        let mut players = vec![GameState::new(seed), GameState::new(seed.wrapping_add(1))];

        for (second, s) in steps {
            let totals: Vec<_> = players.iter().map(|p| (p.score(), p.lines())).collect();

            match s {
                Step::Press(action) => {
                    let idx = usize::from(second);
                    if let Some(lines) = players[idx].apply_action(action).lines_cleared() {
                        route_garbage(idx, lines, &mut players);
                    }
                }
                Step::Tick => {
                    for p in players.iter_mut() {
                        p.apply_pending_garbage();
                    }
                    for idx in 0..players.len() {
                        if let Some(lines) = gravity(&mut players[idx]) {
                            route_garbage(idx, lines, &mut players);
                        }
                    }
                }
            }

            for (p, (score, lines)) in players.iter().zip(totals) {
                prop_assert!(p.score() >= score);
                prop_assert!(p.lines() >= lines);
                check_state(p)?;
            }
        }
    }

    #[test]
    fn normalize_rotation_is_idempotent(k in kind(), r in -50i32..50) {
        let once = normalize_rotation(k, r);
        prop_assert_eq!(normalize_rotation(k, once as i32), once);
        prop_assert_eq!(cell_offsets(k, r), cell_offsets(k, once as i32));
    }

    #[test]
    fn is_valid_has_no_side_effects(
        seed in any::<u32>(),
        drops in 0usize..12,
        k in kind(),
        rotation in 0i32..4,
        x in -3i8..12,
        y in -4i8..22,
        dx in -2i8..3,
        dy in -2i8..3,
    ) {
        let mut state = GameState::new(seed);
        for _ in 0..drops {
            state.hard_drop();
        }
        let board: Board = state.board().clone();
        let piece = Tetromino::at(k, rotation, x, y);

        let first = board.is_valid(&piece, dx, dy, None);
        prop_assert_eq!(board.is_valid(&piece, dx, dy, None), first);
        prop_assert_eq!(&board, state.board());
        let _ = board.is_valid(&piece, dx, dy, Some(rotation + 1));
        prop_assert_eq!(&board, state.board());
    }
}
