//! Duel Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `duel_tetris::{core,engine,input,term,types}`
//! and holds the binary's configuration.

pub mod config;

pub use duel_tetris_core as core;
pub use duel_tetris_engine as engine;
pub use duel_tetris_input as input;
pub use duel_tetris_term as term;
pub use duel_tetris_types as types;
