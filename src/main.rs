//! Terminal Tetris runner (default binary).
//!
//! Shows the mode menu, then runs a single-player game or a two-player battle
//! at a fixed frame interval. Esc returns to the menu; Ctrl-C quits.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use duel_tetris::config::AppConfig;
use duel_tetris::core::SimpleRng;
use duel_tetris::engine::{EventLog, Match};
use duel_tetris::input::{is_back, menu_command, route_key, schemes_for, should_quit, MenuCommand};
use duel_tetris::term::{FrameBuffer, GameView, PlayerView, TerminalRenderer, Viewport, MENU_ITEMS};
use duel_tetris::types::{GameAction, GameMode, TICK_MS};

enum Screen {
    Menu { selected: usize },
    Playing(Match),
}

enum Flow {
    Continue,
    Quit,
}

/// Session state that outlives a single match
struct App {
    seeds: SimpleRng,
    release_timeout_ms: Option<u32>,
    event_log: Option<EventLog>,
}

impl App {
    fn start(&mut self, mode: GameMode) -> Screen {
        let mut m = Match::new(mode, self.seeds.next_u32()).with_release_timeout(self.release_timeout_ms);
        if let Some(log) = self.event_log.take() {
            m = m.with_event_log(log);
        }
        Screen::Playing(m)
    }

    fn leave(&mut self, screen: &mut Screen) {
        if let Screen::Playing(m) = screen {
            if let Some(log) = m.take_event_log() {
                self.event_log = Some(log);
            }
        }
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load();
    // Open the log before raw mode so a bad path is reported normally.
    let event_log = config.open_event_log()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut app = App {
        seeds: SimpleRng::new(config.seed()),
        release_timeout_ms: if term.key_releases() {
            None
        } else {
            Some(config.release_timeout_ms)
        },
        event_log,
    };

    let result = run(&mut term, &config, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(err) = app.event_log.as_mut().and_then(EventLog::take_error) {
        eprintln!("warning: {:#}", err);
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, app: &mut App) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut screen = match config.mode {
        Some(mode) => app.start(mode),
        None => Screen::Menu { selected: 0 },
    };

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        match &screen {
            Screen::Menu { selected } => view.render_menu_into(*selected, viewport, &mut fb),
            Screen::Playing(m) => render_match(&view, m, viewport, &mut fb),
        }
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        app.leave(&mut screen);
                        return Ok(());
                    }
                    if let Flow::Quit = handle_key(app, &mut screen, key) {
                        app.leave(&mut screen);
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Screen::Playing(m) = &mut screen {
                m.tick(TICK_MS);
            }
        }
    }
}

fn handle_key(app: &mut App, screen: &mut Screen, key: KeyEvent) -> Flow {
    match screen {
        Screen::Menu { selected } => {
            if key.kind != KeyEventKind::Press {
                return Flow::Continue;
            }
            let mode = match menu_command(key) {
                Some(MenuCommand::Up) => {
                    *selected = (*selected + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
                    None
                }
                Some(MenuCommand::Down) => {
                    *selected = (*selected + 1) % MENU_ITEMS.len();
                    None
                }
                Some(MenuCommand::Confirm) => GameMode::ALL.get(*selected).copied(),
                Some(MenuCommand::Choose(mode)) => Some(mode),
                Some(MenuCommand::Quit) => return Flow::Quit,
                None => None,
            };
            if let Some(mode) = mode {
                *screen = app.start(mode);
            }
        }
        Screen::Playing(m) => match key.kind {
            KeyEventKind::Press if is_back(key) => {
                app.leave(screen);
                *screen = Screen::Menu { selected: 0 };
            }
            KeyEventKind::Press => {
                if let Some((player, action)) = route_key(m.mode(), key) {
                    m.press(player, action);
                }
            }
            KeyEventKind::Repeat => {
                // Terminal auto-repeat only keeps held keys alive; the engine
                // generates its own repeats.
                if let Some((player, action)) = route_key(m.mode(), key) {
                    if is_holdable(action) {
                        m.press(player, action);
                    }
                }
            }
            KeyEventKind::Release => {
                if let Some((player, action)) = route_key(m.mode(), key) {
                    m.release(player, action);
                }
            }
        },
    }
    Flow::Continue
}

fn is_holdable(action: GameAction) -> bool {
    matches!(
        action,
        GameAction::MoveLeft | GameAction::MoveRight | GameAction::RotateCw | GameAction::SoftDrop
    )
}

fn render_match(view: &GameView, m: &Match, viewport: Viewport, fb: &mut FrameBuffer) {
    let snapshots = m.snapshots();
    let winner = m.winner();
    let views: Vec<PlayerView<'_>> = m
        .players()
        .iter()
        .zip(&snapshots)
        .zip(schemes_for(m.mode()))
        .enumerate()
        .map(|(idx, ((player, snapshot), scheme))| PlayerView {
            label: player.label(),
            snapshot,
            hints: scheme.hints(),
            winner: winner == Some(idx),
        })
        .collect();
    view.render_match_into(&views, viewport, fb);
}
