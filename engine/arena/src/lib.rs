//! Matches and self-play for two-player zero-sum games.
//!
//! - [`Arena`]: plays two [`Player`]s against each other, swapping seats
//!   halfway through a series
//! - [`RandomPlayer`], [`MctsPlayer`], [`FnPlayer`]: stock players
//! - [`self_play`]: episodes of an MCTS engine playing itself, labelled
//!   for training

pub mod arena;
pub mod error;
pub mod player;
pub mod self_play;

mod progress;

pub use arena::{Arena, ArenaResult, BoardDisplay};
pub use error::ArenaError;
pub use player::{policy_fn, FnPlayer, MctsPlayer, Player, RandomPlayer};
pub use self_play::{execute_episode, run_self_play, TrainingExample};
