//! Game state module - one player's complete game
//!
//! Ties together the board, the current and preview pieces, the RNG, scoring
//! bookkeeping and the pending-garbage queue. The transitions that players
//! trigger live in [`crate::actions`]; this module owns construction, spawning,
//! scoring and garbage application.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::rng::SimpleRng;
use crate::scoring::{level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameEvent, PieceKind, GARBAGE_CEILING_Y};

/// Capacity of the per-state event queue between drains
const EVENT_CAPACITY: usize = 16;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current: Tetromino,
    pub(crate) next: Tetromino,
    pub(crate) rng: SimpleRng,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) game_over: bool,
    pub(crate) pending_garbage: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Undrained notifications; the oldest are kept if observers fall behind.
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Tetromino::spawn(rng.next_kind());
        let next = Tetromino::spawn(rng.next_kind());

        Self {
            board: Board::new(),
            current,
            next,
            rng,
            score: 0,
            level: 1,
            game_over: false,
            pending_garbage: 0,
            episode_id: 0,
            events: ArrayVec::new(),
        }
    }

    /// Build a state around a prepared board and piece, for fixtures and tools.
    ///
    /// The caller is responsible for the usual invariants (the current piece
    /// should fit the board). Level is derived from the board's line counter.
    pub fn from_parts(seed: u32, board: Board, current: Tetromino, next: PieceKind) -> Self {
        let mut state = Self::new(seed);
        state.level = level_for_lines(board.lines_cleared());
        state.board = board;
        state.current = current;
        state.next = Tetromino::spawn(next);
        state
    }

    /// Reinitialize everything except the RNG stream, which continues.
    pub fn reset(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(self.rng.state());
        self.episode_id = next_episode;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for fixtures; callers own the invariants.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Cumulative lines cleared on this board
    pub fn lines(&self) -> u32 {
        self.board.lines_cleared()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        let _ = self.events.try_push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Promote the preview piece and draw a new preview.
    ///
    /// The promoted piece starts at the spawn anchor in rotation 0. If it
    /// already overlaps the stack the game is over.
    pub fn spawn_next(&mut self) {
        self.current = Tetromino::spawn(self.next.kind);
        self.next = Tetromino::spawn(self.rng.next_kind());

        if !self.board.is_valid(&self.current, 0, 0, None) {
            self.game_over = true;
            self.emit(GameEvent::GameOver);
        }
    }

    /// Add the line-clear bonus for one lock and refresh the level.
    pub fn add_score_for_lines(&mut self, lines: u32) {
        if lines == 0 {
            return;
        }
        self.score = self.score.saturating_add(line_clear_score(lines));
        self.level = level_for_lines(self.board.lines_cleared());
    }

    /// Queue garbage rows to be applied at the start of the next tick
    pub fn queue_garbage(&mut self, lines: u32) {
        self.pending_garbage = self.pending_garbage.saturating_add(lines);
    }

    /// Inject all queued garbage rows.
    ///
    /// The current piece is lifted by the queued count first, then nudged up
    /// one row at a time until it fits again. Lifting it above
    /// [`GARBAGE_CEILING_Y`] ends the game.
    pub fn apply_pending_garbage(&mut self) {
        if self.pending_garbage == 0 || self.game_over {
            return;
        }

        let lines = std::mem::take(&mut self.pending_garbage);
        let lift = lines.min(i8::MAX as u32) as i8;
        self.current.y = self.current.y.saturating_sub(lift);
        self.board.add_garbage(lines, &mut self.rng);
        self.emit(GameEvent::GarbageReceived { lines });

        while !self.board.is_valid(&self.current, 0, 0, None) {
            self.current.y -= 1;
            if self.current.y < GARBAGE_CEILING_Y {
                self.game_over = true;
                self.emit(GameEvent::GameOver);
                break;
            }
        }
    }

    /// Row the current piece would land on if dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        if self.game_over {
            return None;
        }
        let mut distance: i8 = 0;
        while self.board.is_valid(&self.current, 0, distance + 1, None) {
            distance += 1;
        }
        Some(self.current.y + distance)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = Some(ActiveSnapshot::from(self.current));
        out.ghost_y = self.ghost_y();
        out.next = self.next.kind;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines();
        out.pending_garbage = self.pending_garbage;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
