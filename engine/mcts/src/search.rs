//! MCTS search implementation.
//!
//! Each simulation walks from the root by recursion:
//! 1. Terminal check: cached `game_ended`, short-circuits on decided boards
//! 2. Expansion: first visit to a board asks the evaluator for a prior and value
//! 3. Selection: otherwise pick the legal action with the best UCT score
//! 4. Backup: fold the child's value into Q/N and hand the negation upwards
//!
//! Boards are always canonical, so every node is evaluated from player one's
//! point of view and the value changes sign once per ply.

use engine_core::policy::{mask_and_normalize, tied_argmax, Normalization};
use engine_core::{ActionMask, BoardKey, Game, Player};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::node::MctsNode;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("No valid moves on an unfinished board ({actions} actions, no pass)")]
    NoValidMoves { actions: usize },

    #[error("Policy has {actual} entries, game has {expected} actions")]
    PolicySizeMismatch { expected: usize, actual: usize },

    #[error("Valid-move mask has {actual} entries, game has {expected} actions")]
    MaskSizeMismatch { expected: usize, actual: usize },

    #[error("Cannot search from a finished game")]
    TerminalRoot,

    #[error("Temperature must be non-negative, got {0}")]
    InvalidTemperature(f32),
}

/// Monte Carlo Tree Search engine for one game and one evaluator.
///
/// Statistics live as long as the engine: create a fresh instance when
/// positions from an earlier game must not leak into the next one.
pub struct Mcts<'a, G: Game, E> {
    game: &'a G,
    evaluator: E,
    config: MctsConfig,
    tree: MctsTree,
}

impl<'a, G, E> Mcts<'a, G, E>
where
    G: Game,
    E: Evaluator<G::Board>,
{
    pub fn new(game: &'a G, evaluator: E, config: MctsConfig) -> Self {
        Self {
            game,
            evaluator,
            config,
            tree: MctsTree::new(),
        }
    }

    /// Run the configured number of simulations from the canonical `board`
    /// and turn the root visit counts into a policy over the action space.
    ///
    /// With `temperature == 0` the result is one-hot on a most-visited legal
    /// action, ties broken uniformly at random through `rng`. Otherwise each
    /// entry is proportional to `N(s,a)^(1/temperature)`.
    pub fn get_action_probabilities<R: Rng + ?Sized>(
        &mut self,
        board: &G::Board,
        temperature: f32,
        rng: &mut R,
    ) -> Result<Vec<f32>, SearchError> {
        if temperature.is_nan() || temperature < 0.0 {
            return Err(SearchError::InvalidTemperature(temperature));
        }

        let key = self.game.board_identity(board);
        if self.ended(&key, board) != 0.0 {
            return Err(SearchError::TerminalRoot);
        }

        for _ in 0..self.config.num_simulations {
            self.search(board)?;
        }

        let (counts, valid) = match self.tree.get(&key) {
            Some(node) => (node.visit_counts(), node.valid.clone()),
            // Zero simulations requested: nothing has been expanded yet
            None => {
                let valid = self.game.valid_moves(board, Player::One);
                (vec![0; valid.len()], valid)
            }
        };

        let probs = if temperature == 0.0 {
            greedy_policy(&counts, &valid, rng)?
        } else {
            tempered_policy(&counts, &valid, temperature)?
        };

        debug!(
            simulations = self.config.num_simulations,
            temperature,
            counts = ?counts,
            tree = ?self.tree.stats(),
            "Root visit counts"
        );

        Ok(probs)
    }

    /// Run one simulation from the canonical `board`.
    ///
    /// Returns the negated value of `board` for the player to move there, so
    /// a caller one ply up can use it directly as its own value.
    pub fn search(&mut self, board: &G::Board) -> Result<f32, SearchError> {
        let key = self.game.board_identity(board);

        let ended = self.ended(&key, board);
        if ended != 0.0 {
            trace!(value = ended, "Terminal leaf");
            return Ok(-ended);
        }

        let action = match self.tree.get(&key) {
            Some(node) => node
                .select_action(self.config.c_puct)
                .ok_or(SearchError::NoValidMoves {
                    actions: node.valid.len(),
                })?,
            None => {
                let value = self.expand(key, board)?;
                return Ok(-value);
            }
        };

        let (next, next_player) = self.game.next_state(board, Player::One, action);
        let next = self.game.canonical_form(&next, next_player);
        let value = self.search(&next)?;

        if let Some(node) = self.tree.get_mut(&key) {
            node.backup(action, value);
            trace!(
                action,
                value,
                visits = node.visit_count,
                q = node.edges[action].mean_value,
                "Backup"
            );
        }

        Ok(-value)
    }

    /// Evaluate a new leaf and cache its masked prior. Returns the
    /// evaluator's value for the player to move.
    fn expand(&mut self, key: BoardKey, board: &G::Board) -> Result<f32, SearchError> {
        let expected = self.game.action_size();
        let eval = self.evaluator.evaluate(board)?;
        if eval.policy.len() != expected {
            return Err(SearchError::PolicySizeMismatch {
                expected,
                actual: eval.policy.len(),
            });
        }

        let valid = self.game.valid_moves(board, Player::One);
        if valid.len() != expected {
            return Err(SearchError::MaskSizeMismatch {
                expected,
                actual: valid.len(),
            });
        }

        let mut prior = eval.policy;
        match mask_and_normalize(&mut prior, &valid) {
            Some(Normalization::Renormalized) => {}
            Some(Normalization::UniformFallback) => {
                warn!(
                    valid = valid.count(),
                    "All valid moves were masked; using uniform prior over valid moves"
                );
            }
            None => return Err(SearchError::NoValidMoves { actions: expected }),
        }

        trace!(value = eval.value, valid = valid.count(), "Expanded leaf");
        self.tree.insert(key, MctsNode::new(prior, valid));
        Ok(eval.value)
    }

    /// Cached `game_ended(board, 1)`.
    fn ended(&mut self, key: &BoardKey, board: &G::Board) -> f32 {
        let game = self.game;
        self.tree
            .ended_or_insert_with(key, || game.game_ended(board, Player::One))
    }

    /// Forget every statistic gathered so far.
    pub fn reset(&mut self) {
        self.tree.clear();
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// One-hot on a most-visited legal action, chosen uniformly among ties.
fn greedy_policy<R: Rng + ?Sized>(
    counts: &[u32],
    valid: &ActionMask,
    rng: &mut R,
) -> Result<Vec<f32>, SearchError> {
    let best = tied_argmax(counts, valid.iter_valid());
    if best.is_empty() {
        return Err(SearchError::NoValidMoves {
            actions: counts.len(),
        });
    }

    let action = best[rng.gen_range(0..best.len())];
    let mut probs = vec![0.0; counts.len()];
    probs[action] = 1.0;
    Ok(probs)
}

/// Counts raised to `1/temperature` and normalised. Counts are scaled by
/// their maximum first so small temperatures cannot overflow.
fn tempered_policy(
    counts: &[u32],
    valid: &ActionMask,
    temperature: f32,
) -> Result<Vec<f32>, SearchError> {
    let max = counts.iter().copied().max().unwrap_or(0);

    if max == 0 {
        // No edge visited yet: uniform over legal actions
        let n = valid.count();
        if n == 0 {
            return Err(SearchError::NoValidMoves {
                actions: counts.len(),
            });
        }
        let uniform = (0..counts.len()).map(|a| valid.weight(a) / n as f32);
        return Ok(uniform.collect());
    }

    let exponent = 1.0 / temperature as f64;
    let scaled: Vec<f64> = counts
        .iter()
        .map(|&c| {
            if c == 0 {
                0.0
            } else {
                (c as f64 / max as f64).powf(exponent)
            }
        })
        .collect();
    let sum: f64 = scaled.iter().sum();

    Ok(scaled.into_iter().map(|p| (p / sum) as f32).collect())
}
