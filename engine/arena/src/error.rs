use engine_core::Player;
use mcts::SearchError;
use thiserror::Error;

/// Errors that abort a game or an episode.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("Action {action} is not valid for player {player}")]
    InvalidAction { action: usize, player: Player },

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Player error: {0}")]
    Player(String),
}
