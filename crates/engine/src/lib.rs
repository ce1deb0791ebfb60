//! Match engine: drives core game states through time.
//!
//! The core crate is purely transition-based. This crate adds the parts that
//! depend on elapsed time and on which player a key belongs to:
//!
//! - [`session`]: [`Match`] / [`PlayerRuntime`] with gravity, auto-repeat,
//!   soft-drop timers and battle garbage routing
//! - [`repeat`]: the held-key repeat timer
//! - [`event_log`]: opt-in JSON-lines log of game events
//!
//! Nothing here touches the terminal; front-ends feed key presses and elapsed
//! milliseconds in and read snapshots out.

pub mod event_log;
pub mod repeat;
pub mod session;

pub use duel_tetris_core as core;
pub use duel_tetris_types as types;

pub use event_log::EventLog;
pub use repeat::AutoRepeat;
pub use session::{GameMode, Match, PlayerRuntime};
