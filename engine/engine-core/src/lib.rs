//! Core traits and types for two-player zero-sum game search
//!
//! This crate provides the rules boundary shared by the search engine and
//! the arena:
//! - `Game`: Typed trait every concrete game implements
//! - `Player`, `ActionMask`, `BoardKey`: Small value types used by the trait
//! - `game_utils`: Terminal-value conventions (draw value, perspective flips)
//! - `policy`: Policy masking/renormalisation, arg-max and sampling helpers

pub mod game_utils;
pub mod policy;
pub mod typed;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_games;

// Re-export main types for convenience
pub use game_utils::DRAW_VALUE;
pub use policy::{argmax_first, mask_and_normalize, sample_index, tied_argmax, Normalization};
pub use typed::{ActionMask, BoardKey, Game, InvalidPlayer, Player};
