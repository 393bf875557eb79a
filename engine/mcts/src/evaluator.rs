//! Evaluator trait for position evaluation.
//!
//! The evaluator is the policy source consulted when search reaches a board
//! for the first time: it returns a prior over actions and a value estimate.
//! In AlphaZero this is a neural network. For testing and for playing
//! without a trained model we provide a uniform evaluator and a random
//! rollout evaluator.

use std::cell::RefCell;

use engine_core::game_utils::{from_player_one_view, is_draw};
use engine_core::{Game, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Model error: {0}")]
    ModelError(String),
}

/// Result of evaluating a canonical board.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    /// Raw prior over the whole action space (length == action_size).
    /// Entries are non-negative; search masks and renormalizes them.
    pub policy: Vec<f32>,

    /// Value estimate for the player to move on the canonical board.
    /// Range: -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,
}

/// Trait for position evaluators.
///
/// `B` is the board type of the game being searched. Implementations only
/// ever see canonical boards. Search calls [`Evaluator::evaluate`] at most
/// once per distinct board per engine instance.
///
/// Implementations could be:
/// - UniformEvaluator: Returns a uniform prior (for testing)
/// - RolloutEvaluator: Random playouts to a terminal position
/// - A neural network wrapper supplied by the training layer
pub trait Evaluator<B> {
    /// Evaluate a single canonical board.
    fn evaluate(&self, board: &B) -> Result<EvalResult, EvaluatorError>;
}

impl<B, E: Evaluator<B> + ?Sized> Evaluator<B> for &E {
    fn evaluate(&self, board: &B) -> Result<EvalResult, EvaluatorError> {
        (**self).evaluate(board)
    }
}

/// Uniform evaluator that assigns equal probability to every action.
/// Value is always 0.0 (neutral). Useful for testing MCTS without a model.
#[derive(Debug, Clone)]
pub struct UniformEvaluator {
    num_actions: usize,
}

impl UniformEvaluator {
    pub fn new(num_actions: usize) -> Self {
        Self { num_actions }
    }
}

impl<B> Evaluator<B> for UniformEvaluator {
    fn evaluate(&self, _board: &B) -> Result<EvalResult, EvaluatorError> {
        if self.num_actions == 0 {
            return Err(EvaluatorError::InvalidState(
                "action space is empty".to_string(),
            ));
        }

        let prob = 1.0 / self.num_actions as f32;
        Ok(EvalResult {
            policy: vec![prob; self.num_actions],
            value: 0.0,
        })
    }
}

/// Random rollout evaluator that plays random legal moves to a terminal
/// position and returns the outcome as the value estimate.
///
/// The prior is uniform over the action space. Draws and rollouts cut off at
/// `max_depth` count as 0.
#[derive(Debug)]
pub struct RolloutEvaluator<'a, G: Game> {
    game: &'a G,
    max_depth: u32,
    rng: RefCell<ChaCha20Rng>,
}

impl<'a, G: Game> RolloutEvaluator<'a, G> {
    pub fn new(game: &'a G, rng: ChaCha20Rng) -> Self {
        Self {
            game,
            max_depth: 500,
            rng: RefCell::new(rng),
        }
    }

    /// Builder pattern: set the rollout depth cap.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Play random moves from `board` (player one to move) and return the
    /// result from player one's point of view.
    fn rollout(&self, board: &G::Board) -> Result<f32, EvaluatorError> {
        let mut rng = self.rng.borrow_mut();
        let mut board = board.clone();
        let mut player = Player::One;

        for _ in 0..self.max_depth {
            let ended = self.game.game_ended(&board, player);
            if ended != 0.0 {
                if is_draw(ended) {
                    return Ok(0.0);
                }
                return Ok(from_player_one_view(ended, player));
            }

            let valid: Vec<usize> = self.game.valid_moves(&board, player).iter_valid().collect();
            if valid.is_empty() {
                return Err(EvaluatorError::InvalidState(
                    "rollout reached an unresolved board with no valid moves".to_string(),
                ));
            }
            let action = valid[rng.gen_range(0..valid.len())];
            let (next, next_player) = self.game.next_state(&board, player, action);
            board = next;
            player = next_player;
        }

        Ok(0.0)
    }
}

impl<G: Game> Evaluator<G::Board> for RolloutEvaluator<'_, G> {
    fn evaluate(&self, board: &G::Board) -> Result<EvalResult, EvaluatorError> {
        let num_actions = self.game.action_size();
        let value = self.rollout(board)?;
        Ok(EvalResult {
            policy: vec![1.0 / num_actions as f32; num_actions],
            value,
        })
    }
}

/// Evaluator backed by a closure, handy for scripted priors in tests and
/// for wrapping external inference code.
pub struct FnEvaluator<F>(pub F);

impl<B, F> Evaluator<B> for FnEvaluator<F>
where
    F: Fn(&B) -> Result<EvalResult, EvaluatorError>,
{
    fn evaluate(&self, board: &B) -> Result<EvalResult, EvaluatorError> {
        (self.0)(board)
    }
}
