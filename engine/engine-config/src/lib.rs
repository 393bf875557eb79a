//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared by
//! the `pit` binary and anything else that drives search or matches.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`ALPHAZERO_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! ALPHAZERO_<SECTION>_<KEY>=value
//!
//! Examples:
//!     ALPHAZERO_COMMON_LOG_LEVEL=debug
//!     ALPHAZERO_COMMON_SEED=7
//!     ALPHAZERO_MCTS_NUM_SIMULATIONS=100
//!     ALPHAZERO_ARENA_GAMES=20
//!     ALPHAZERO_SELF_PLAY_TEMP_THRESHOLD=8
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
