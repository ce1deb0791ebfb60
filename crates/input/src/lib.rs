//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events to
//! `(player, GameAction)` pairs per control scheme, plus the menu and
//! quit/back keys. Held-key timing lives in the match engine.

pub mod map;

pub use duel_tetris_types as types;

pub use map::{
    is_back, menu_command, route_key, schemes_for, should_quit, ControlScheme, MenuCommand,
};
