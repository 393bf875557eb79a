//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_board_size() -> usize {
    defaults::board_size()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_c_puct() -> f64 {
    defaults::c_puct()
}
fn d_arena_games() -> u32 {
    defaults::arena_games()
}
fn d_arena_verbose() -> bool {
    defaults::arena_verbose()
}
fn d_arena_opponent() -> String {
    defaults::arena_opponent().into()
}
fn d_episodes() -> u32 {
    defaults::episodes()
}
fn d_temp_threshold() -> u32 {
    defaults::temp_threshold()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub self_play: SelfPlayConfig,
}

impl CentralConfig {
    /// Search parameters in the form the `mcts` crate expects.
    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_simulations(self.mcts.num_simulations)
            .with_c_puct(self.mcts.c_puct as f32)
    }
}

/// Common configuration shared by all commands
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Seed for every random number generator in a run
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Side length of the tic-tac-toe board
    #[serde(default = "d_board_size")]
    pub board_size: usize,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
            board_size: defaults::board_size(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_c_puct")]
    pub c_puct: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            c_puct: defaults::c_puct(),
        }
    }
}

/// Arena match configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_arena_games")]
    pub games: u32,
    #[serde(default = "d_arena_verbose")]
    pub verbose: bool,
    /// Opponent for the MCTS player: "random" or "mcts"
    #[serde(default = "d_arena_opponent")]
    pub opponent: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::arena_games(),
            verbose: defaults::arena_verbose(),
            opponent: defaults::arena_opponent().into(),
        }
    }
}

/// Self-play configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SelfPlayConfig {
    #[serde(default = "d_episodes")]
    pub episodes: u32,
    /// Moves before this ply are sampled at temperature 1, later ones greedily
    #[serde(default = "d_temp_threshold")]
    pub temp_threshold: u32,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            episodes: defaults::episodes(),
            temp_threshold: defaults::temp_threshold(),
        }
    }
}
