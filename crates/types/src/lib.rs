//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the rules core, the match driver, input mapping and rendering alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (3, 0), i.e. `BOARD_WIDTH / 2 - 2`
//!
//! Rows above the visible field (negative `y`) are legal for a falling piece.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and are consumed by the driver layer
//! only; the rules core never schedules anything itself.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `BASE_DROP_MS` | 800 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 60 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Held soft-drop step interval |
//! | `AUTO_REPEAT_INITIAL_MS` | 180 | Delay before a held key repeats |
//! | `AUTO_REPEAT_INTERVAL_MS` | 60 | Interval between repeats |
//!
//! # Examples
//!
//! ```
//! use duel_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column for new pieces
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn anchor row for new pieces
pub const SPAWN_Y: i8 = 0;

/// Lowest anchor row a piece may be lifted to while making room for garbage.
///
/// A piece pushed above this row without finding a free position ends the game.
pub const GARBAGE_CEILING_Y: i8 = -4;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by lines cleared in one lock.
///
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Any other non-zero count scores `lines * LINE_SCORE_FALLBACK`.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Per-line score used when a clear count falls outside [`LINE_SCORES`]
pub const LINE_SCORE_FALLBACK: u32 = 100;

/// Points awarded per successful soft-drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points awarded per cell fallen during a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 800;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 60;

/// Absolute minimum gravity interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Step interval while the soft-drop key is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Delay before a held move/rotate key starts repeating
pub const AUTO_REPEAT_INITIAL_MS: u32 = 180;

/// Interval between repeats of a held move/rotate key
pub const AUTO_REPEAT_INTERVAL_MS: u32 = 60;

/// Default key-release timeout for terminals that never report key releases
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 800);
        assert_eq!(DROP_STEP_MS, 60);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(SOFT_DROP_INTERVAL_MS, 50);
        assert_eq!(AUTO_REPEAT_INITIAL_MS, 180);
        assert_eq!(AUTO_REPEAT_INTERVAL_MS, 60);
    }

    #[test]
    fn spawn_anchor_is_centered_for_a_four_wide_box() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn piece_kind_string_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn game_mode_parse_and_labels() {
        assert_eq!("single".parse::<GameMode>(), Ok(GameMode::Single));
        assert_eq!(" Battle ".parse::<GameMode>(), Ok(GameMode::Battle));
        assert!("coop".parse::<GameMode>().is_err());
        assert_eq!(GameMode::Battle.labels()[1], "Player 2 (Arrows)");
        for mode in GameMode::ALL {
            assert_eq!(mode.labels().len(), mode.player_count());
        }
    }

    #[test]
    fn action_string_roundtrip() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}

/// The seven tetromino piece kinds
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Content of an occupied board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Locked mino of the given kind
    Piece(PieceKind),
    /// Mino of an injected garbage row
    Garbage,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Occupied cell
pub type Cell = Option<Block>;

/// Game actions accepted by the rules core
///
/// These are produced by the input layer and consumed by a single dispatch
/// function on the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (awards one point)
    SoftDrop,
    /// Rotate piece to its next orientation
    RotateCw,
    /// Rotate piece to its previous orientation
    RotateCcw,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Reinitialize the game
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::HardDrop,
        GameAction::Restart,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "harddrop" => Some(GameAction::HardDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Restart => "restart",
        }
    }
}

/// Fire-and-forget notifications emitted by a game state.
///
/// Observers (audio, logging) drain these; the rules never depend on anyone
/// consuming them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece moved sideways
    Moved,
    /// The active piece rotated
    Rotated,
    /// A hard drop moved the piece `distance` rows before locking
    HardDropped { distance: u32 },
    /// A piece locked and cleared `lines` rows
    Locked { lines: u32 },
    /// Queued garbage rows were pushed in from the bottom
    GarbageReceived { lines: u32 },
    /// The game ended
    GameOver,
}

impl GameEvent {
    /// Short tag used by the event log
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Moved => "moved",
            GameEvent::Rotated => "rotated",
            GameEvent::HardDropped { .. } => "hardDropped",
            GameEvent::Locked { .. } => "locked",
            GameEvent::GarbageReceived { .. } => "garbageReceived",
            GameEvent::GameOver => "gameOver",
        }
    }
}

/// Single player or two-player battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Single,
    Battle,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Single, GameMode::Battle];

    pub fn player_count(self) -> usize {
        match self {
            GameMode::Single => 1,
            GameMode::Battle => 2,
        }
    }

    /// Display labels, indexed by player
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            GameMode::Single => &["Player 1"],
            GameMode::Battle => &["Player 1 (WASD)", "Player 2 (Arrows)"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Single => "single",
            GameMode::Battle => "battle",
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(GameMode::Single),
            "battle" | "multi" | "2" => Ok(GameMode::Battle),
            other => Err(format!("unknown mode: {} (expected single or battle)", other)),
        }
    }
}
