//! Key mapping from terminal events to per-player game actions.
//!
//! Each player owns a [`ControlScheme`]. In battle the left board plays with
//! WASD and the right board with the arrow keys; `r` restarts every board.

use crate::types::{GameAction, GameMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A player's key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlScheme {
    /// ←/→ move, ↓ soft drop, ↑ rotate, `z` counter-rotate, Space hard drop
    Arrows,
    /// `a`/`d` move, `s` soft drop, `w` rotate, `q` counter-rotate, `e` hard drop
    Wasd,
}

const ARROW_HINTS: [&str; 6] = [
    "\u{2190}/\u{2192} move",
    "\u{2193} soft drop",
    "\u{2191} rotate, Z ccw",
    "Space hard drop",
    "R restart",
    "Esc menu",
];

const WASD_HINTS: [&str; 6] = [
    "A/D move",
    "S soft drop",
    "W rotate, Q ccw",
    "E hard drop",
    "R restart",
    "Esc menu",
];

impl ControlScheme {
    /// Game action bound to `code` in this scheme
    pub fn action_for(self, code: KeyCode) -> Option<GameAction> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };

        match (self, code) {
            (ControlScheme::Arrows, KeyCode::Left) => Some(GameAction::MoveLeft),
            (ControlScheme::Arrows, KeyCode::Right) => Some(GameAction::MoveRight),
            (ControlScheme::Arrows, KeyCode::Down) => Some(GameAction::SoftDrop),
            (ControlScheme::Arrows, KeyCode::Up) => Some(GameAction::RotateCw),
            (ControlScheme::Arrows, KeyCode::Char('z')) => Some(GameAction::RotateCcw),
            (ControlScheme::Arrows, KeyCode::Char(' ')) => Some(GameAction::HardDrop),

            (ControlScheme::Wasd, KeyCode::Char('a')) => Some(GameAction::MoveLeft),
            (ControlScheme::Wasd, KeyCode::Char('d')) => Some(GameAction::MoveRight),
            (ControlScheme::Wasd, KeyCode::Char('s')) => Some(GameAction::SoftDrop),
            (ControlScheme::Wasd, KeyCode::Char('w')) => Some(GameAction::RotateCw),
            (ControlScheme::Wasd, KeyCode::Char('q')) => Some(GameAction::RotateCcw),
            (ControlScheme::Wasd, KeyCode::Char('e')) => Some(GameAction::HardDrop),

            _ => None,
        }
    }

    /// Control hint lines for the side panel
    pub fn hints(self) -> &'static [&'static str] {
        match self {
            ControlScheme::Arrows => &ARROW_HINTS,
            ControlScheme::Wasd => &WASD_HINTS,
        }
    }
}

/// Control schemes indexed by player for `mode`
pub fn schemes_for(mode: GameMode) -> &'static [ControlScheme] {
    match mode {
        GameMode::Single => &[ControlScheme::Arrows],
        GameMode::Battle => &[ControlScheme::Wasd, ControlScheme::Arrows],
    }
}

/// Map a key to `(player index, action)`.
///
/// `r` maps to [`GameAction::Restart`], which applies to every player; the
/// index returned with it is always 0. Keys held with Ctrl or Alt are ignored.
pub fn route_key(mode: GameMode, key: KeyEvent) -> Option<(usize, GameAction)> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
        return Some((0, GameAction::Restart));
    }

    schemes_for(mode)
        .iter()
        .enumerate()
        .find_map(|(idx, scheme)| scheme.action_for(key.code).map(|action| (idx, action)))
}

/// Esc leaves the match and returns to the menu.
pub fn is_back(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Menu navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Up,
    Down,
    Confirm,
    Choose(GameMode),
    Quit,
}

/// Map a key on the mode menu
pub fn menu_command(key: KeyEvent) -> Option<MenuCommand> {
    if should_quit(key) {
        return Some(MenuCommand::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(MenuCommand::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(MenuCommand::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuCommand::Confirm),
        KeyCode::Char('1') => Some(MenuCommand::Choose(GameMode::Single)),
        KeyCode::Char('2') => Some(MenuCommand::Choose(GameMode::Battle)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(MenuCommand::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_single_player_uses_arrows() {
        let mode = GameMode::Single;
        assert_eq!(route_key(mode, key(KeyCode::Left)), Some((0, GameAction::MoveLeft)));
        assert_eq!(route_key(mode, key(KeyCode::Right)), Some((0, GameAction::MoveRight)));
        assert_eq!(route_key(mode, key(KeyCode::Down)), Some((0, GameAction::SoftDrop)));
        assert_eq!(route_key(mode, key(KeyCode::Up)), Some((0, GameAction::RotateCw)));
        assert_eq!(route_key(mode, key(KeyCode::Char('z'))), Some((0, GameAction::RotateCcw)));
        assert_eq!(route_key(mode, key(KeyCode::Char(' '))), Some((0, GameAction::HardDrop)));
        assert_eq!(route_key(mode, key(KeyCode::Char('a'))), None);
    }

    #[test]
    fn test_battle_routes_by_scheme() {
        let mode = GameMode::Battle;
        assert_eq!(route_key(mode, key(KeyCode::Char('a'))), Some((0, GameAction::MoveLeft)));
        assert_eq!(route_key(mode, key(KeyCode::Char('D'))), Some((0, GameAction::MoveRight)));
        assert_eq!(route_key(mode, key(KeyCode::Char('s'))), Some((0, GameAction::SoftDrop)));
        assert_eq!(route_key(mode, key(KeyCode::Char('w'))), Some((0, GameAction::RotateCw)));
        assert_eq!(route_key(mode, key(KeyCode::Char('q'))), Some((0, GameAction::RotateCcw)));
        assert_eq!(route_key(mode, key(KeyCode::Char('e'))), Some((0, GameAction::HardDrop)));

        assert_eq!(route_key(mode, key(KeyCode::Left)), Some((1, GameAction::MoveLeft)));
        assert_eq!(route_key(mode, key(KeyCode::Char(' '))), Some((1, GameAction::HardDrop)));
        assert_eq!(route_key(mode, key(KeyCode::Char('z'))), Some((1, GameAction::RotateCcw)));
    }

    #[test]
    fn test_restart_key() {
        for mode in GameMode::ALL {
            assert_eq!(route_key(mode, key(KeyCode::Char('r'))), Some((0, GameAction::Restart)));
            assert_eq!(route_key(mode, key(KeyCode::Char('R'))), Some((0, GameAction::Restart)));
        }
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(route_key(GameMode::Battle, ctrl_a), None);
    }

    #[test]
    fn test_quit_and_back_keys() {
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(key(KeyCode::Char('q'))));
        assert!(is_back(key(KeyCode::Esc)));
        assert!(!is_back(key(KeyCode::Char('r'))));
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(menu_command(key(KeyCode::Up)), Some(MenuCommand::Up));
        assert_eq!(menu_command(key(KeyCode::Down)), Some(MenuCommand::Down));
        assert_eq!(menu_command(key(KeyCode::Enter)), Some(MenuCommand::Confirm));
        assert_eq!(
            menu_command(key(KeyCode::Char('2'))),
            Some(MenuCommand::Choose(GameMode::Battle))
        );
        assert_eq!(menu_command(key(KeyCode::Esc)), Some(MenuCommand::Quit));
    }

    #[test]
    fn test_hints_per_scheme() {
        assert!(ControlScheme::Wasd.hints().iter().any(|h| h.contains("E hard drop")));
        assert!(ControlScheme::Arrows.hints().iter().any(|h| h.contains("Space")));
        assert_eq!(schemes_for(GameMode::Battle).len(), 2);
    }
}
