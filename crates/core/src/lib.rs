//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and the battle
//! garbage exchange. It has **zero dependencies** on UI, timers, or I/O:
//!
//! - **Deterministic**: every game state owns a seedable RNG
//! - **Synchronous**: every operation completes immediately
//! - **Total**: blocked moves return `false`, game over is state, not an error
//!
//! # Module Structure
//!
//! - [`pieces`]: shape catalog, rotation normalization, [`Tetromino`]
//! - [`board`]: 10x20 grid, validity checks, locking, line clears, garbage rows
//! - [`game_state`]: one player's game, spawning, scoring, pending garbage
//! - [`actions`]: move / rotate-with-kicks / drops and the action dispatcher
//! - [`battle`]: stateless routing of garbage between game states
//! - [`scoring`]: point tables, levels and gravity speed
//! - [`snapshot`]: read-only views for renderers
//! - [`rng`]: LCG used for piece draws and garbage holes
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each next piece is drawn independently from 7 kinds
//! - **Simplified kicks**: rotation tries offsets (0,0), (-1,0), (+1,0), (0,-1)
//! - **Scoring**: 100/300/500/800 per clear, 1 per soft-drop step, 2 per hard-drop cell
//! - **Levels**: one level per 10 lines, starting at 1
//! - **Battle**: clearing `L` lines sends `L - 1` garbage rows to the opponent
//!
//! # Example
//!
//! ```
//! use duel_tetris_core::GameState;
//! use duel_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod actions;
pub mod battle;
pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use duel_tetris_types as types;

// Re-export commonly used types for convenience
pub use actions::ActionOutcome;
pub use battle::{garbage_for_lines, route_garbage, send_garbage};
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{cell_offsets, normalize_rotation, rotation_count, Tetromino};
pub use rng::SimpleRng;
pub use scoring::{drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
