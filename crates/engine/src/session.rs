//! Match driver: timers and key handling around one or two game states.
//!
//! The core game state knows nothing about time. A [`Match`] owns one
//! [`PlayerRuntime`] per player and turns wall-clock time (fed in through
//! [`Match::tick`]) and key presses into core transitions:
//!
//! - gravity at `drop_interval_ms(level)`, re-armed after every lock
//! - held-key auto-repeat for move left/right and rotate clockwise
//! - a 50 ms soft-drop repeat while the soft-drop key is held
//! - garbage routing between players in battle mode
//!
//! Pending garbage is always applied at the start of a tick, before any timer
//! for that tick runs.

use duel_tetris_core::{drop_interval_ms, send_garbage, ActionOutcome, GameSnapshot, GameState};

use crate::event_log::EventLog;
use crate::repeat::AutoRepeat;
use crate::types::{
    GameAction, AUTO_REPEAT_INITIAL_MS, AUTO_REPEAT_INTERVAL_MS, SOFT_DROP_INTERVAL_MS,
};

pub use crate::types::GameMode;

/// One player's game plus the timers that drive it
#[derive(Debug, Clone)]
pub struct PlayerRuntime {
    label: &'static str,
    state: GameState,
    drop_elapsed_ms: u32,
    left: Option<AutoRepeat>,
    right: Option<AutoRepeat>,
    rotate: Option<AutoRepeat>,
    soft_drop: Option<AutoRepeat>,
}

impl PlayerRuntime {
    pub fn new(label: &'static str, seed: u32) -> Self {
        Self {
            label,
            state: GameState::new(seed),
            drop_elapsed_ms: 0,
            left: None,
            right: None,
            rotate: None,
            soft_drop: None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for fixtures; timers are not adjusted.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn soft_drop_active(&self) -> bool {
        self.soft_drop.is_some()
    }

    /// Whether `action`'s key is currently treated as held
    pub fn is_held(&self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.left.is_some(),
            GameAction::MoveRight => self.right.is_some(),
            GameAction::RotateCw => self.rotate.is_some(),
            GameAction::SoftDrop => self.soft_drop.is_some(),
            _ => false,
        }
    }

    /// Reinitialize the game and drop every held key and timer
    pub fn reset(&mut self) {
        self.state.reset();
        self.drop_elapsed_ms = 0;
        self.release_all();
    }

    fn release_all(&mut self) {
        self.left = None;
        self.right = None;
        self.rotate = None;
        self.soft_drop = None;
    }

    fn held_slot(&mut self, action: GameAction) -> Option<&mut Option<AutoRepeat>> {
        match action {
            GameAction::MoveLeft => Some(&mut self.left),
            GameAction::MoveRight => Some(&mut self.right),
            GameAction::RotateCw => Some(&mut self.rotate),
            GameAction::SoftDrop => Some(&mut self.soft_drop),
            _ => None,
        }
    }

    /// Handle a key press. Returns the lines cleared if the press locked a piece.
    pub fn press(&mut self, action: GameAction) -> Option<u32> {
        if self.state.game_over() {
            return None;
        }

        match action {
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::RotateCw => {
                if let Some(slot) = self.held_slot(action) {
                    if let Some(repeat) = slot.as_mut() {
                        repeat.touch();
                        return None;
                    }
                    *slot = Some(AutoRepeat::new(AUTO_REPEAT_INITIAL_MS, AUTO_REPEAT_INTERVAL_MS));
                }
                self.state.apply_action(action);
                None
            }
            GameAction::SoftDrop => {
                // A press while the repeat is already running only keeps it alive.
                match self.soft_drop.as_mut() {
                    Some(repeat) => repeat.touch(),
                    None => {
                        self.state.apply_action(GameAction::SoftDrop);
                        self.soft_drop =
                            Some(AutoRepeat::new(SOFT_DROP_INTERVAL_MS, SOFT_DROP_INTERVAL_MS));
                    }
                }
                None
            }
            GameAction::RotateCcw => {
                self.state.apply_action(action);
                None
            }
            GameAction::HardDrop => {
                let lines = self
                    .state
                    .apply_action(GameAction::HardDrop)
                    .lines_cleared()
                    .unwrap_or(0);
                self.after_lock();
                Some(lines)
            }
            GameAction::Restart => {
                self.reset();
                None
            }
        }
    }

    /// Handle a key release
    pub fn release(&mut self, action: GameAction) {
        if let Some(slot) = self.held_slot(action) {
            *slot = None;
        }
    }

    /// Apply queued garbage; called at the start of every tick
    pub fn apply_pending_garbage(&mut self) {
        self.state.apply_pending_garbage();
        if self.state.game_over() {
            self.release_all();
        }
    }

    /// Advance repeat, soft-drop and gravity timers by `elapsed_ms`.
    ///
    /// `release_timeout_ms` releases keys that were not pressed again within
    /// the timeout (for terminals that never report key releases). Returns the
    /// lines cleared if gravity locked a piece.
    pub fn advance(&mut self, elapsed_ms: u32, release_timeout_ms: Option<u32>) -> Option<u32> {
        if self.state.game_over() {
            return None;
        }

        if let Some(timeout) = release_timeout_ms {
            for slot in [
                &mut self.left,
                &mut self.right,
                &mut self.rotate,
                &mut self.soft_drop,
            ] {
                if slot.as_ref().map_or(false, |r| r.idle_ms() > timeout) {
                    *slot = None;
                }
            }
        }

        let left = self.left.as_mut().map_or(0, |r| r.update(elapsed_ms));
        for _ in 0..left {
            self.state.try_move(-1, 0);
        }
        let right = self.right.as_mut().map_or(0, |r| r.update(elapsed_ms));
        for _ in 0..right {
            self.state.try_move(1, 0);
        }
        let rotations = self.rotate.as_mut().map_or(0, |r| r.update(elapsed_ms));
        for _ in 0..rotations {
            self.state.try_rotate(1);
        }

        let steps = self.soft_drop.as_mut().map_or(0, |r| r.update(elapsed_ms));
        for _ in 0..steps {
            if self.state.apply_action(GameAction::SoftDrop) == ActionOutcome::Rejected {
                self.soft_drop = None;
                break;
            }
        }

        self.drop_elapsed_ms = self.drop_elapsed_ms.saturating_add(elapsed_ms);
        let interval = drop_interval_ms(self.state.level());
        while self.drop_elapsed_ms >= interval {
            self.drop_elapsed_ms -= interval;
            if !self.state.gravity_tick() {
                let lines = self.state.lock_current_piece();
                self.drop_elapsed_ms = 0;
                if self.state.game_over() {
                    self.release_all();
                }
                return Some(lines);
            }
        }

        None
    }

    fn after_lock(&mut self) {
        self.soft_drop = None;
        self.drop_elapsed_ms = 0;
        if self.state.game_over() {
            self.release_all();
        }
    }
}

/// A running single-player game or two-player battle
#[derive(Debug)]
pub struct Match {
    mode: GameMode,
    players: Vec<PlayerRuntime>,
    release_timeout_ms: Option<u32>,
    clock_ms: u64,
    event_log: Option<EventLog>,
    result_logged: bool,
}

impl Match {
    /// Create a match; each player gets an independent seed derived from `seed`.
    pub fn new(mode: GameMode, seed: u32) -> Self {
        let mut seeder = duel_tetris_core::SimpleRng::new(seed);
        let players = mode
            .labels()
            .iter()
            .map(|&label| PlayerRuntime::new(label, seeder.next_u32()))
            .collect();

        Self {
            mode,
            players,
            release_timeout_ms: None,
            clock_ms: 0,
            event_log: None,
            result_logged: false,
        }
    }

    /// Release held keys after `timeout_ms` without a repeated press.
    /// `None` means the terminal reports releases itself.
    pub fn with_release_timeout(mut self, timeout_ms: Option<u32>) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn with_event_log(mut self, mut log: EventLog) -> Self {
        log.record_marker(self.clock_ms, "matchStarted", Some(self.mode.as_str()));
        self.event_log = Some(log);
        self
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn players(&self) -> &[PlayerRuntime] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> Option<&PlayerRuntime> {
        self.players.get(idx)
    }

    pub fn player_mut(&mut self, idx: usize) -> Option<&mut PlayerRuntime> {
        self.players.get_mut(idx)
    }

    /// Milliseconds of match time fed through [`tick`](Self::tick)
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn snapshots(&self) -> Vec<GameSnapshot> {
        self.players.iter().map(PlayerRuntime::snapshot).collect()
    }

    /// Key press for `player`. `Restart` restarts every player.
    pub fn press(&mut self, player: usize, action: GameAction) {
        if action == GameAction::Restart {
            self.restart();
            return;
        }

        let locked = match self.players.get_mut(player) {
            Some(p) => p.press(action),
            None => return,
        };
        if let Some(lines) = locked {
            self.route_garbage(player, lines);
        }
        self.flush_events();
    }

    pub fn release(&mut self, player: usize, action: GameAction) {
        if let Some(p) = self.players.get_mut(player) {
            p.release(action);
        }
    }

    /// Advance the match by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.clock_ms += u64::from(elapsed_ms);

        for p in &mut self.players {
            p.apply_pending_garbage();
        }

        for idx in 0..self.players.len() {
            let timeout = self.release_timeout_ms;
            if let Some(lines) = self.players[idx].advance(elapsed_ms, timeout) {
                self.route_garbage(idx, lines);
            }
        }

        self.flush_events();
    }

    /// Reset every player
    pub fn restart(&mut self) {
        for p in &mut self.players {
            p.reset();
        }
        self.result_logged = false;
        self.flush_events();
        if let Some(log) = self.event_log.as_mut() {
            log.record_marker(self.clock_ms, "restarted", None);
        }
    }

    /// In battle, the last player standing once everyone else is out
    pub fn winner(&self) -> Option<usize> {
        if self.mode != GameMode::Battle {
            return None;
        }
        let mut alive = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.state.game_over());
        match (alive.next(), alive.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    /// True once the outcome is decided (a winner, or nobody left playing)
    pub fn is_finished(&self) -> bool {
        self.winner().is_some() || self.players.iter().all(|p| p.state.game_over())
    }

    /// Hand the event log back, e.g. to reuse it for the next match
    pub fn take_event_log(&mut self) -> Option<EventLog> {
        self.event_log.take()
    }

    /// Take the error that disabled the event log, if any
    pub fn take_log_error(&mut self) -> Option<anyhow::Error> {
        self.event_log.as_mut().and_then(EventLog::take_error)
    }

    fn route_garbage(&mut self, attacker: usize, lines: u32) {
        if self.mode != GameMode::Battle {
            return;
        }
        let defenders = self
            .players
            .iter_mut()
            .enumerate()
            .filter(|(idx, _)| *idx != attacker)
            .map(|(_, p)| &mut p.state);
        send_garbage(lines, defenders);
    }

    fn flush_events(&mut self) {
        let winner = self.winner();
        let finished = self.is_finished();

        let Self {
            players,
            event_log,
            clock_ms,
            result_logged,
            ..
        } = self;

        for (idx, p) in players.iter_mut().enumerate() {
            let episode = p.state.episode_id();
            let label = p.label;
            for event in p.state.drain_events() {
                if let Some(log) = event_log.as_mut() {
                    log.record_event(*clock_ms, idx, label, episode, &event);
                }
            }
        }

        if finished && !*result_logged {
            *result_logged = true;
            if let Some(log) = event_log.as_mut() {
                let label = winner.map(|w| players[w].label);
                log.record_winner(*clock_ms, winner, label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_tetris_core::{Board, Tetromino};
    use crate::types::PieceKind;

    fn fixture(mode: GameMode) -> Match {
        Match::new(mode, 7)
    }

    fn place(m: &mut Match, idx: usize, board: Board, piece: Tetromino) {
        let p = m.player_mut(idx).unwrap();
        *p.state_mut() = GameState::from_parts(idx as u32 + 1, board, piece, PieceKind::O);
    }

    #[test]
    fn test_player_counts_and_labels() {
        let single = fixture(GameMode::Single);
        assert_eq!(single.players().len(), 1);
        assert_eq!(single.players()[0].label(), "Player 1");

        let battle = fixture(GameMode::Battle);
        assert_eq!(battle.players().len(), 2);
        assert_eq!(battle.players()[0].label(), "Player 1 (WASD)");
        assert_eq!(battle.players()[1].label(), "Player 2 (Arrows)");
    }

    #[test]
    fn test_gravity_moves_piece_each_interval() {
        let mut m = fixture(GameMode::Single);
        place(&mut m, 0, Board::new(), Tetromino::spawn(PieceKind::T));

        for _ in 0..49 {
            m.tick(16);
        }
        assert_eq!(m.players()[0].state().current().y, 0);
        m.tick(16);
        assert_eq!(m.players()[0].state().current().y, 1);
    }

    #[test]
    fn test_gravity_locks_resting_piece() {
        let mut m = fixture(GameMode::Single);
        place(&mut m, 0, Board::new(), Tetromino::at(PieceKind::O, 0, 4, 18));
        m.tick(800);
        let state = m.players()[0].state();
        assert!(state.board().is_occupied(5, 19));
        assert_eq!(state.current().y, 0);
    }

    #[test]
    fn test_held_move_repeats() {
        let mut m = fixture(GameMode::Single);
        place(&mut m, 0, Board::new(), Tetromino::at(PieceKind::O, 0, 0, 5));

        m.press(0, GameAction::MoveRight);
        assert_eq!(m.players()[0].state().current().x, 1);

        m.tick(179);
        assert_eq!(m.players()[0].state().current().x, 1);
        m.tick(1);
        assert_eq!(m.players()[0].state().current().x, 2);
        m.tick(60);
        assert_eq!(m.players()[0].state().current().x, 3);

        m.release(0, GameAction::MoveRight);
        m.tick(240);
        assert_eq!(m.players()[0].state().current().x, 3);
    }

    #[test]
    fn test_release_timeout_stops_repeat() {
        let mut m = fixture(GameMode::Single).with_release_timeout(Some(150));
        place(&mut m, 0, Board::new(), Tetromino::at(PieceKind::O, 0, 0, 5));

        m.press(0, GameAction::MoveRight);
        m.tick(100);
        m.tick(60);
        assert!(m.players()[0].is_held(GameAction::MoveRight));
        m.tick(16);
        assert!(!m.players()[0].is_held(GameAction::MoveRight));
        assert_eq!(m.players()[0].state().current().x, 1);
    }

    #[test]
    fn test_soft_drop_press_scores_once_while_active() {
        let mut m = fixture(GameMode::Single);
        place(&mut m, 0, Board::new(), Tetromino::spawn(PieceKind::T));

        m.press(0, GameAction::SoftDrop);
        assert_eq!(m.players()[0].state().score(), 1);
        assert!(m.players()[0].soft_drop_active());

        m.press(0, GameAction::SoftDrop);
        assert_eq!(m.players()[0].state().score(), 1);
        assert_eq!(m.players()[0].state().current().y, 1);

        m.tick(50);
        assert_eq!(m.players()[0].state().score(), 2);
        assert_eq!(m.players()[0].state().current().y, 2);
    }

    #[test]
    fn test_soft_drop_stops_when_blocked() {
        let mut m = fixture(GameMode::Single);
        place(&mut m, 0, Board::new(), Tetromino::at(PieceKind::O, 0, 4, 17));

        m.press(0, GameAction::SoftDrop);
        assert_eq!(m.players()[0].state().current().y, 18);
        m.tick(50);
        assert!(!m.players()[0].soft_drop_active());
        assert_eq!(m.players()[0].state().score(), 1);
    }

    #[test]
    fn test_battle_garbage_applied_at_next_tick() {
        let mut m = fixture(GameMode::Battle);
        let board = Board::from_rows(&["GGGG..GGGG", "GGGG..GGGG"]);
        place(&mut m, 0, board, Tetromino::at(PieceKind::O, 0, 3, 0));
        place(&mut m, 1, Board::new(), Tetromino::spawn(PieceKind::T));

        m.press(0, GameAction::HardDrop);
        assert_eq!(m.players()[0].state().lines(), 2);
        assert_eq!(m.players()[1].state().pending_garbage(), 1);
        assert_eq!(m.players()[0].state().pending_garbage(), 0);

        m.tick(16);
        assert_eq!(m.players()[1].state().pending_garbage(), 0);
        let garbage_cells = m.players()[1]
            .state()
            .board()
            .row(19)
            .iter()
            .filter(|c| c.is_some())
            .count();
        assert_eq!(garbage_cells, 9);
    }

    #[test]
    fn test_single_mode_routes_nothing() {
        let mut m = fixture(GameMode::Single);
        let board = Board::from_rows(&["GGGG..GGGG", "GGGG..GGGG"]);
        place(&mut m, 0, board, Tetromino::at(PieceKind::O, 0, 3, 0));
        m.press(0, GameAction::HardDrop);
        assert_eq!(m.players()[0].state().pending_garbage(), 0);
    }

    #[test]
    fn test_restart_resets_every_player() {
        let mut m = fixture(GameMode::Battle);
        m.press(0, GameAction::HardDrop);
        m.press(1, GameAction::HardDrop);
        m.press(1, GameAction::Restart);
        for p in m.players() {
            assert_eq!(p.state().score(), 0);
            assert_eq!(p.state().episode_id(), 1);
            assert!(p.state().board().cells().iter().all(|c| c.is_none()));
        }
    }

    #[test]
    fn test_winner_after_opponent_tops_out() {
        let mut m = fixture(GameMode::Battle);
        assert_eq!(m.winner(), None);

        let mut full = Board::new();
        for y in 0..4 {
            for x in 0..9 {
                full.set(x, y, Some(crate::types::Block::Garbage));
            }
        }
        place(&mut m, 1, full, Tetromino::at(PieceKind::O, 0, 4, 16));
        m.press(1, GameAction::HardDrop);

        assert!(m.players()[1].state().game_over());
        assert_eq!(m.winner(), Some(0));
        assert!(m.is_finished());
    }

    #[test]
    fn test_game_over_player_ignores_input() {
        let mut m = fixture(GameMode::Single);
        let mut stack = Board::new();
        for x in 0..9 {
            stack.set(x, 0, Some(crate::types::Block::Garbage));
            stack.set(x, 1, Some(crate::types::Block::Garbage));
        }
        place(&mut m, 0, stack, Tetromino::at(PieceKind::T, 0, 3, 10));
        m.player_mut(0).unwrap().state_mut().spawn_next();
        assert!(m.players()[0].state().game_over());

        let frozen = m.players()[0].snapshot();
        m.press(0, GameAction::MoveLeft);
        m.press(0, GameAction::HardDrop);
        m.tick(2_000);
        assert_eq!(m.players()[0].snapshot(), frozen);
    }
}
