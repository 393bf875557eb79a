//! Agents that choose moves in an [`Arena`](crate::Arena).
//!
//! A player sees the canonical board (the side to move is always player one)
//! and returns an action index. Stateful players can hook into the game
//! lifecycle; the hooks default to no-ops.

use engine_core::policy::{argmax_first, sample_index};
use engine_core::{Game, Player as Side};
use mcts::{Evaluator, Mcts, MctsConfig};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::error::ArenaError;

/// Something that can take a turn.
pub trait Player<G: Game> {
    /// Choose an action for the canonical `board`.
    fn play(&mut self, board: &G::Board) -> Result<usize, ArenaError>;

    /// Called once before the first move of every game.
    fn start_game(&mut self) -> Result<(), ArenaError> {
        Ok(())
    }

    /// Called after the opponent plays `action` on `board` (not canonical,
    /// the position before the move).
    fn notify(&mut self, _board: &G::Board, _action: usize) -> Result<(), ArenaError> {
        Ok(())
    }

    /// Called once after every game, including games aborted by an error.
    fn end_game(&mut self) -> Result<(), ArenaError> {
        Ok(())
    }
}

impl<G: Game, P: Player<G> + ?Sized> Player<G> for Box<P> {
    fn play(&mut self, board: &G::Board) -> Result<usize, ArenaError> {
        (**self).play(board)
    }

    fn start_game(&mut self) -> Result<(), ArenaError> {
        (**self).start_game()
    }

    fn notify(&mut self, board: &G::Board, action: usize) -> Result<(), ArenaError> {
        (**self).notify(board, action)
    }

    fn end_game(&mut self) -> Result<(), ArenaError> {
        (**self).end_game()
    }
}

/// Plays a uniformly random valid move.
pub struct RandomPlayer<'a, G> {
    game: &'a G,
    rng: ChaCha20Rng,
}

impl<'a, G: Game> RandomPlayer<'a, G> {
    pub fn new(game: &'a G, rng: ChaCha20Rng) -> Self {
        Self { game, rng }
    }
}

impl<G: Game> Player<G> for RandomPlayer<'_, G> {
    fn play(&mut self, board: &G::Board) -> Result<usize, ArenaError> {
        let valid: Vec<usize> = self.game.valid_moves(board, Side::One).iter_valid().collect();
        valid
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| ArenaError::Player("random player found no valid move".to_string()))
    }
}

/// Plays the move suggested by an MCTS engine.
///
/// At temperature 0 the most visited action is played; otherwise an action
/// is sampled from the visit distribution. The search tree is kept across
/// games unless [`MctsPlayer::with_fresh_tree`] is set.
pub struct MctsPlayer<'a, G: Game, E> {
    mcts: Mcts<'a, G, E>,
    temperature: f32,
    fresh_tree: bool,
    rng: ChaCha20Rng,
}

impl<'a, G, E> MctsPlayer<'a, G, E>
where
    G: Game,
    E: Evaluator<G::Board>,
{
    pub fn new(game: &'a G, evaluator: E, config: MctsConfig, rng: ChaCha20Rng) -> Self {
        Self {
            mcts: Mcts::new(game, evaluator, config),
            temperature: 0.0,
            fresh_tree: false,
            rng,
        }
    }

    /// Builder pattern: set the move-selection temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Builder pattern: drop search statistics at the start of every game.
    pub fn with_fresh_tree(mut self, fresh: bool) -> Self {
        self.fresh_tree = fresh;
        self
    }

    pub fn mcts(&self) -> &Mcts<'a, G, E> {
        &self.mcts
    }
}

impl<G, E> Player<G> for MctsPlayer<'_, G, E>
where
    G: Game,
    E: Evaluator<G::Board>,
{
    fn play(&mut self, board: &G::Board) -> Result<usize, ArenaError> {
        let probs = self
            .mcts
            .get_action_probabilities(board, self.temperature, &mut self.rng)?;

        let action = if self.temperature == 0.0 {
            argmax_first(&probs)
        } else {
            sample_index(&probs, &mut self.rng)
        };

        let action = action
            .ok_or_else(|| ArenaError::Player("search returned an empty policy".to_string()))?;
        debug!(action, prob = probs[action], "MCTS player move");
        Ok(action)
    }

    fn start_game(&mut self) -> Result<(), ArenaError> {
        if self.fresh_tree {
            self.mcts.reset();
        }
        Ok(())
    }
}

/// Wraps a closure from canonical board to action.
pub struct FnPlayer<F>(pub F);

impl<G, F> Player<G> for FnPlayer<F>
where
    G: Game,
    F: FnMut(&G::Board) -> usize,
{
    fn play(&mut self, board: &G::Board) -> Result<usize, ArenaError> {
        Ok((self.0)(board))
    }
}

/// Turn a closure into a [`Player`].
pub fn policy_fn<F>(f: F) -> FnPlayer<F> {
    FnPlayer(f)
}
