//! Shared utilities for two-player game implementations
//!
//! Terminal-value conventions used by every game and by the search engine.

use crate::typed::Player;

/// Terminal value reported for a drawn game.
///
/// Non-zero so that "ended in a draw" can be told apart from "not ended"
/// (`0.0`) by equality.
pub const DRAW_VALUE: f32 = 1e-4;

/// Whether a terminal value is a decisive win for the perspective player.
#[inline]
pub fn is_win(value: f32) -> bool {
    value == 1.0
}

/// Whether a terminal value is a decisive loss for the perspective player.
#[inline]
pub fn is_loss(value: f32) -> bool {
    value == -1.0
}

/// Whether a value returned by `game_ended` marks a finished game that is
/// neither a win nor a loss.
#[inline]
pub fn is_draw(value: f32) -> bool {
    value != 0.0 && !is_win(value) && !is_loss(value)
}

/// Terminal value of a finished game from `perspective`'s point of view.
///
/// # Arguments
/// * `winner` - `Some(player)` for a decisive result, `None` for a draw
/// * `perspective` - The player the value is reported for
///
/// # Example
/// ```
/// use engine_core::game_utils::{terminal_value, DRAW_VALUE};
/// use engine_core::Player;
///
/// assert_eq!(terminal_value(Some(Player::One), Player::One), 1.0);
/// assert_eq!(terminal_value(Some(Player::One), Player::Two), -1.0);
/// assert_eq!(terminal_value(None, Player::Two), DRAW_VALUE);
/// ```
#[inline]
pub fn terminal_value(winner: Option<Player>, perspective: Player) -> f32 {
    match winner {
        Some(w) if w == perspective => 1.0,
        Some(_) => -1.0,
        None => DRAW_VALUE,
    }
}

/// Re-express a terminal value reported for `player` from player one's
/// fixed point of view.
#[inline]
pub fn from_player_one_view(value: f32, player: Player) -> f32 {
    player.sign() * value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        assert!(is_win(1.0));
        assert!(is_loss(-1.0));
        assert!(is_draw(DRAW_VALUE));
        assert!(is_draw(-DRAW_VALUE));
        assert!(!is_draw(0.0));
        assert!(!is_draw(1.0));
    }

    #[test]
    fn test_terminal_value() {
        assert_eq!(terminal_value(Some(Player::Two), Player::Two), 1.0);
        assert_eq!(terminal_value(Some(Player::Two), Player::One), -1.0);
        assert_eq!(terminal_value(None, Player::One), DRAW_VALUE);
    }

    #[test]
    fn test_from_player_one_view() {
        // Player two lost at the end of the game: player one won
        assert_eq!(from_player_one_view(-1.0, Player::Two), 1.0);
        assert_eq!(from_player_one_view(1.0, Player::One), 1.0);
        assert_eq!(from_player_one_view(DRAW_VALUE, Player::Two), -DRAW_VALUE);
    }
}
