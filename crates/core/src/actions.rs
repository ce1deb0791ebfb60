//! Action layer - the transitions a player (or timer) triggers on a game state
//!
//! All of these are no-ops once the game is over, except [`GameAction::Restart`]
//! through [`GameState::apply_action`]. Blocked moves and rotations report
//! `false`; that is the normal signal, not an error.

use crate::game_state::GameState;
use crate::pieces::ROTATION_KICKS;
use crate::scoring::hard_drop_score;
use crate::types::{GameAction, GameEvent, SOFT_DROP_POINTS};

/// Result of dispatching one [`GameAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Blocked, or the game is over; nothing changed
    Rejected,
    /// The current piece moved or rotated
    Applied,
    /// The piece locked and the next one was spawned
    Locked { lines_cleared: u32 },
    /// The game was reinitialized
    Restarted,
}

impl ActionOutcome {
    /// Lines cleared, if this outcome locked a piece
    pub fn lines_cleared(&self) -> Option<u32> {
        match self {
            ActionOutcome::Locked { lines_cleared } => Some(*lines_cleared),
            _ => None,
        }
    }
}

impl GameState {
    /// Try to shift the current piece by (dx, dy) at its current rotation
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over || !self.board.is_valid(&self.current, dx, dy, None) {
            return false;
        }

        self.current.x += dx;
        self.current.y += dy;
        if dx != 0 {
            self.emit(GameEvent::Moved);
        }
        true
    }

    /// Try to rotate the current piece by `direction` steps (+1 or -1).
    ///
    /// Kick offsets are tried in the order of [`ROTATION_KICKS`]; the first one
    /// that fits is applied together with the new rotation.
    pub fn try_rotate(&mut self, direction: i8) -> bool {
        if self.game_over {
            return false;
        }

        let target = self.current.rotated(direction as i32) as i32;
        for (dx, dy) in ROTATION_KICKS {
            if self.board.is_valid(&self.current, dx, dy, Some(target)) {
                self.current.set_rotation(target);
                self.current.x += dx;
                self.current.y += dy;
                self.emit(GameEvent::Rotated);
                return true;
            }
        }

        false
    }

    /// Move down one row. Scoring the step is up to the caller.
    pub fn soft_drop_step(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// One gravity step. When this returns `false` on a live game the piece is
    /// resting and the caller should [`lock_current_piece`](Self::lock_current_piece).
    pub fn gravity_tick(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Lock the current piece, score the cleared lines and spawn the next one.
    ///
    /// Returns the number of lines cleared.
    pub fn lock_current_piece(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        let lines = self.board.lock_piece(&self.current);
        self.emit(GameEvent::Locked { lines });
        self.add_score_for_lines(lines);
        self.spawn_next();
        lines
    }

    /// Drop the current piece as far as it goes, lock it and spawn the next.
    ///
    /// Awards two points per cell fallen. Returns the number of lines cleared.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        let mut distance: u32 = 0;
        while self.board.is_valid(&self.current, 0, 1, None) {
            self.current.y += 1;
            distance += 1;
        }

        self.score = self.score.saturating_add(hard_drop_score(distance));
        self.emit(GameEvent::HardDropped { distance });
        self.lock_current_piece()
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        let applied = match action {
            GameAction::Restart => {
                self.reset();
                return ActionOutcome::Restarted;
            }
            _ if self.game_over => return ActionOutcome::Rejected,
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                let moved = self.soft_drop_step();
                if moved {
                    self.score = self.score.saturating_add(SOFT_DROP_POINTS);
                }
                moved
            }
            GameAction::RotateCw => self.try_rotate(1),
            GameAction::RotateCcw => self.try_rotate(-1),
            GameAction::HardDrop => {
                let lines_cleared = self.hard_drop();
                return ActionOutcome::Locked { lines_cleared };
            }
        };

        if applied {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::pieces::Tetromino;
    use crate::types::{Block, PieceKind};

    use super::*;

    fn state_with(board: Board, piece: Tetromino) -> GameState {
        GameState::from_parts(9, board, piece, PieceKind::O)
    }

    #[test]
    fn test_try_move() {
        let mut state = state_with(Board::new(), Tetromino::spawn(PieceKind::T));
        assert!(state.try_move(1, 0));
        assert_eq!(state.current().x, 4);
        assert!(state.try_move(0, 1));
        assert_eq!(state.current().y, 1);
    }

    #[test]
    fn test_try_move_wall() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::T, 0, 0, 5));
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.current().x, 0);
    }

    #[test]
    fn test_move_emits_only_for_horizontal() {
        let mut state = state_with(Board::new(), Tetromino::spawn(PieceKind::T));
        state.try_move(0, 1);
        assert_eq!(state.drain_events().count(), 0);
        state.try_move(1, 0);
        assert_eq!(state.drain_events().collect::<Vec<_>>(), vec![GameEvent::Moved]);
    }

    #[test]
    fn test_rotate_in_open_field_uses_no_kick() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::T, 0, 4, 5));
        assert!(state.try_rotate(1));
        assert_eq!(state.current().rotation(), 1);
        assert_eq!((state.current().x, state.current().y), (4, 5));
    }

    #[test]
    fn test_rotate_ccw_wraps() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::J, 0, 4, 5));
        assert!(state.try_rotate(-1));
        assert_eq!(state.current().rotation(), 3);
    }

    #[test]
    fn test_o_rotation_is_a_noop_turn() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::O, 0, 4, 5));
        assert!(state.try_rotate(1));
        assert_eq!(state.current().rotation(), 0);
    }

    #[test]
    fn test_rotate_kicks_left_off_right_wall() {
        // Vertical I at x=7 occupies column 9; turning flat needs columns 7..=10.
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::I, 1, 7, 5));
        assert!(state.try_rotate(1));
        assert_eq!(state.current().rotation(), 0);
        assert_eq!(state.current().x, 6);
    }

    #[test]
    fn test_hard_drop_scores_distance() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::O, 0, 4, 0));
        // O occupies rows 0-1; it falls to rows 18-19.
        let lines = state.hard_drop();
        assert_eq!(lines, 0);
        assert_eq!(state.score(), 36);
        assert!(state.board().is_occupied(5, 19));
        assert!(state.board().is_occupied(6, 18));
    }

    #[test]
    fn test_gravity_tick_then_lock() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::O, 0, 4, 18));
        assert!(!state.gravity_tick());
        assert_eq!(state.lock_current_piece(), 0);
        assert_eq!(state.current().kind, PieceKind::O);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_soft_drop_action_awards_point() {
        let mut state = state_with(Board::new(), Tetromino::spawn(PieceKind::T));
        assert_eq!(state.apply_action(GameAction::SoftDrop), ActionOutcome::Applied);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_blocked_soft_drop_awards_nothing() {
        let mut state = state_with(Board::new(), Tetromino::at(PieceKind::O, 0, 4, 18));
        assert_eq!(state.apply_action(GameAction::SoftDrop), ActionOutcome::Rejected);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_actions_rejected_after_game_over() {
        let mut board = Board::new();
        board.set(0, 19, Some(Block::Garbage));
        let mut state = state_with(board, Tetromino::spawn(PieceKind::T));
        state.game_over = true;
        let before = state.clone().snapshot();

        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::HardDrop,
        ] {
            assert_eq!(state.apply_action(action), ActionOutcome::Rejected);
        }
        assert!(!state.gravity_tick());
        assert_eq!(state.lock_current_piece(), 0);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_clears_game_over() {
        let mut state = GameState::new(4);
        state.game_over = true;
        assert_eq!(state.apply_action(GameAction::Restart), ActionOutcome::Restarted);
        assert!(!state.game_over());
    }
}
