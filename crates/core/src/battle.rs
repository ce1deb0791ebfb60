//! Battle module - garbage routing between independent game states
//!
//! A clear of `L` lines sends `L - 1` garbage rows to every other player that
//! is still alive. Routing only queues garbage; each defender applies it at the
//! start of its own next tick. Game states never hold references to each other.

use crate::game_state::GameState;

/// Garbage rows sent for a clear of `lines` rows (a single sends nothing)
pub fn garbage_for_lines(lines: u32) -> u32 {
    lines.saturating_sub(1)
}

/// Queue the garbage for one clear onto each defender that is not game over.
///
/// Returns the number of rows queued per defender (0 if none are sent).
pub fn send_garbage<'a>(
    lines_cleared: u32,
    defenders: impl IntoIterator<Item = &'a mut GameState>,
) -> u32 {
    let garbage = garbage_for_lines(lines_cleared);
    if garbage == 0 {
        return 0;
    }

    for defender in defenders {
        if !defender.game_over() {
            defender.queue_garbage(garbage);
        }
    }
    garbage
}

/// Route the garbage for a clear by `players[attacker]` to everyone else.
pub fn route_garbage(attacker: usize, lines_cleared: u32, players: &mut [GameState]) -> u32 {
    let defenders = players
        .iter_mut()
        .enumerate()
        .filter(|(idx, _)| *idx != attacker)
        .map(|(_, state)| state);
    send_garbage(lines_cleared, defenders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_for_lines() {
        assert_eq!(garbage_for_lines(0), 0);
        assert_eq!(garbage_for_lines(1), 0);
        assert_eq!(garbage_for_lines(2), 1);
        assert_eq!(garbage_for_lines(3), 2);
        assert_eq!(garbage_for_lines(4), 3);
    }

    #[test]
    fn test_route_skips_attacker() {
        let mut players = [GameState::new(1), GameState::new(2)];
        assert_eq!(route_garbage(0, 3, &mut players), 2);
        assert_eq!(players[0].pending_garbage(), 0);
        assert_eq!(players[1].pending_garbage(), 2);
    }

    #[test]
    fn test_route_skips_finished_defenders() {
        let mut players = [GameState::new(1), GameState::new(2), GameState::new(3)];
        players[2].game_over = true;
        route_garbage(0, 4, &mut players);
        assert_eq!(players[1].pending_garbage(), 3);
        assert_eq!(players[2].pending_garbage(), 0);
    }

    #[test]
    fn test_garbage_accumulates() {
        let mut players = [GameState::new(1), GameState::new(2)];
        route_garbage(1, 2, &mut players);
        route_garbage(1, 3, &mut players);
        assert_eq!(players[0].pending_garbage(), 3);
    }
}
