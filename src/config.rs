//! Runtime configuration for the terminal binary.
//!
//! Every option can come from the command line or from the environment;
//! command-line values win.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;

use crate::engine::EventLog;
use crate::types::{GameMode, DEFAULT_KEY_RELEASE_TIMEOUT_MS};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about = "Terminal Tetris for one player or a two-player battle", long_about = None)]
pub struct AppConfig {
    /// Start directly in this mode instead of showing the menu: `single` or `battle`.
    #[arg(short, long, env = "DUEL_TETRIS_MODE")]
    pub mode: Option<GameMode>,

    /// Seed for piece and garbage-hole randomness. Replaying with the same seed
    /// and the same inputs gives the same game. Defaults to the current time.
    #[arg(short, long, env = "DUEL_TETRIS_SEED")]
    pub seed: Option<u32>,

    /// Append a JSON-lines log of game events to this file.
    #[arg(long, env = "DUEL_TETRIS_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// For terminals without key-release events: a held key counts as released
    /// when it has not been pressed again within this many milliseconds.
    #[arg(long, env = "DUEL_TETRIS_RELEASE_TIMEOUT_MS", default_value_t = DEFAULT_KEY_RELEASE_TIMEOUT_MS)]
    pub release_timeout_ms: u32,
}

impl AppConfig {
    /// Parse from `std::env::args` and the environment
    pub fn load() -> Self {
        Self::parse()
    }

    /// Parse from an explicit argument list (the first item is the program name)
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?)
    }

    /// The configured seed, or one derived from the clock
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Open the event log if a path is configured
    pub fn open_event_log(&self) -> Result<Option<EventLog>> {
        self.log_path.as_ref().map(EventLog::open).transpose()
    }
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    (nanos ^ (nanos >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_args(["duel-tetris"]).unwrap();
        assert_eq!(config.release_timeout_ms, DEFAULT_KEY_RELEASE_TIMEOUT_MS);
        assert_eq!(config.mode, None);
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_args([
            "duel-tetris",
            "--mode",
            "battle",
            "--seed",
            "42",
            "--release-timeout-ms",
            "90",
        ])
        .unwrap();
        assert_eq!(config.mode, Some(GameMode::Battle));
        assert_eq!(config.seed(), 42);
        assert_eq!(config.release_timeout_ms, 90);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(AppConfig::from_args(["duel-tetris", "--mode", "coop"]).is_err());
    }
}
