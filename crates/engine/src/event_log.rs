//! Opt-in JSON-lines event log.
//!
//! One JSON object per line, appended to a file. Enabled with
//! `DUEL_TETRIS_LOG_PATH` (or `--log-path`). A write failure disables the log
//! for the rest of the session; the error is kept for the caller to report once
//! the terminal has been restored.

use std::fs::OpenOptions;
use std::io::{LineWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

/// Environment variable naming the log file
pub const LOG_PATH_ENV: &str = "DUEL_TETRIS_LOG_PATH";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord<'a> {
    ts_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episode: Option<u32>,
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl<'a> EventRecord<'a> {
    fn marker(ts_ms: u64, event: &'a str) -> Self {
        Self {
            ts_ms,
            player: None,
            label: None,
            episode: None,
            event,
            lines: None,
            distance: None,
            detail: None,
        }
    }
}

/// Append-only JSONL sink for game events
pub struct EventLog {
    out: Box<dyn Write>,
    buf: Vec<u8>,
    disabled: bool,
    failed: Option<std::io::Error>,
    records: u64,
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("records", &self.records)
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl EventLog {
    /// Open (or create) `path` for appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("event log: open {} failed", path.display()))?;
        Ok(Self::from_writer(LineWriter::new(file)))
    }

    /// Open the file named by [`LOG_PATH_ENV`], if set and non-empty
    pub fn from_env() -> Result<Option<Self>> {
        let path = std::env::var(LOG_PATH_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });
        path.map(Self::open).transpose()
    }

    pub fn from_writer(out: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            buf: Vec::with_capacity(256),
            disabled: false,
            failed: None,
            records: 0,
        }
    }

    /// Number of records written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Take the write error that disabled the log, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.failed
            .take()
            .map(|e| anyhow!("event log disabled after write failure: {}", e))
    }

    /// Log one game event for `player`
    pub fn record_event(
        &mut self,
        ts_ms: u64,
        player: usize,
        label: &str,
        episode: u32,
        event: &GameEvent,
    ) {
        let mut rec = EventRecord::marker(ts_ms, event.as_str());
        rec.player = Some(player);
        rec.label = Some(label);
        rec.episode = Some(episode);
        match *event {
            GameEvent::HardDropped { distance } => rec.distance = Some(distance),
            GameEvent::Locked { lines } | GameEvent::GarbageReceived { lines } => {
                rec.lines = Some(lines)
            }
            GameEvent::Moved | GameEvent::Rotated | GameEvent::GameOver => {}
        }
        self.write(&rec);
    }

    /// Log a match-level marker such as `matchStarted` or `restarted`
    pub fn record_marker(&mut self, ts_ms: u64, event: &str, detail: Option<&str>) {
        let mut rec = EventRecord::marker(ts_ms, event);
        rec.detail = detail;
        self.write(&rec);
    }

    /// Log the end of a battle; `player` is the winner, if any
    pub fn record_winner(&mut self, ts_ms: u64, player: Option<usize>, label: Option<&str>) {
        let mut rec = EventRecord::marker(ts_ms, "matchOver");
        rec.player = player;
        rec.label = label;
        self.write(&rec);
    }

    fn write(&mut self, rec: &EventRecord<'_>) {
        if self.disabled {
            return;
        }

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, rec).is_err() {
            return;
        }
        self.buf.push(b'\n');

        match self.out.write_all(&self.buf) {
            Ok(()) => self.records += 1,
            Err(e) => {
                self.disabled = true;
                self.failed = Some(e);
            }
        }
    }
}
