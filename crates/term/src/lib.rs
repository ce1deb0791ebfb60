//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout frameworks and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`fb`]: styled character cells
//! - [`game_view`]: boards, side panels and the mode menu (pure, no I/O)
//! - [`renderer`]: crossterm output with per-run diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use duel_tetris_core as core;
pub use duel_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, PlayerView, Viewport, MENU_ITEMS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
