//! Monte Carlo Tree Search (MCTS) for two-player zero-sum games.
//!
//! This crate provides a game-agnostic MCTS engine that works with any game
//! implementing the `engine-core` [`Game`](engine_core::Game) trait, guided by
//! any policy/value source implementing [`Evaluator`].
//!
//! # Overview
//!
//! Every simulation descends from the root by recursion:
//!
//! 1. **Terminal check**: decided boards return their result immediately
//! 2. **Expansion**: an unseen board is evaluated once; its prior is masked
//!    to legal moves and renormalised
//! 3. **Selection**: otherwise the legal action with the highest UCT score
//!    is followed
//! 4. **Backup**: the child's value updates Q(s,a) and N(s,a) and is
//!    negated on the way up
//!
//! Statistics are keyed by board identity, so transpositions share a node.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_tictactoe::TicTacToe;
//! use mcts::{Mcts, MctsConfig, UniformEvaluator};
//! use engine_core::Game;
//! use rand_chacha::ChaCha20Rng;
//! use rand::SeedableRng;
//!
//! let game = TicTacToe::new(3);
//! let evaluator = UniformEvaluator::new(game.action_size());
//! let mut mcts = Mcts::new(&game, evaluator, MctsConfig::default());
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let board = game.initial_board();
//! let policy = mcts.get_action_probabilities(&board, 1.0, &mut rng)?;
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per call (default: 25)
//! - `c_puct`: Exploration constant for UCT (default: 1.0)
//!
//! # Evaluators
//!
//! - [`UniformEvaluator`]: Uniform prior, neutral value (for testing)
//! - [`RolloutEvaluator`]: Uniform prior, value from a random playout
//! - [`FnEvaluator`]: Wraps a closure, e.g. around external inference

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{
    EvalResult, Evaluator, EvaluatorError, FnEvaluator, RolloutEvaluator, UniformEvaluator,
};
pub use node::{EdgeStats, MctsNode};
pub use search::{Mcts, SearchError};
pub use tree::{MctsTree, TreeStats};
