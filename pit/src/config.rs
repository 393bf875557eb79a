//! Command-line configuration for `pit`.
//!
//! Defaults come from config.toml (with `ALPHAZERO_*` environment overrides).
//! CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_board_size() -> usize {
    CENTRAL_CONFIG.common.board_size
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts_config().num_simulations
}

fn default_c_puct() -> f32 {
    CENTRAL_CONFIG.mcts_config().c_puct
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_verbose() -> bool {
    CENTRAL_CONFIG.arena.verbose
}

fn default_opponent() -> Opponent {
    // An unknown name in config.toml falls back to the random opponent
    <Opponent as ValueEnum>::from_str(&CENTRAL_CONFIG.arena.opponent, true)
        .unwrap_or(Opponent::Random)
}

fn default_episodes() -> u32 {
    CENTRAL_CONFIG.self_play.episodes
}

fn default_temp_threshold() -> u32 {
    CENTRAL_CONFIG.self_play.temp_threshold
}

/// Who the MCTS player faces in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// Uniformly random valid moves
    Random,
    /// A second MCTS player with its own rollout evaluator
    Mcts,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "pit")]
#[command(about = "Pit MCTS agents against each other on TicTacToe")]
#[command(
    long_about = "Plays MCTS agents (backed by random rollouts) against a random player or
against each other, or runs self-play episodes and summarises the training
examples they produce.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Cli {
    /// Seed for every random number generator in the run
    #[arg(long, global = true, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = default_log_level())]
    pub log_level: String,

    /// Side length of the TicTacToe board
    #[arg(long, global = true, default_value_t = default_board_size())]
    pub board_size: usize,

    /// Number of MCTS simulations per move
    #[arg(long, global = true, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// Exploration constant for UCT selection
    #[arg(long, global = true, default_value_t = default_c_puct())]
    pub c_puct: f32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play a series of games and report the tally
    Arena(ArenaArgs),
    /// Run self-play episodes and summarise the examples produced
    SelfPlay(SelfPlayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ArenaArgs {
    /// Number of games (split evenly between both seatings)
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Opponent for the MCTS player
    #[arg(long, value_enum, default_value_t = default_opponent())]
    pub opponent: Opponent,

    /// Render the board before every move
    #[arg(long, default_value_t = default_verbose())]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SelfPlayArgs {
    /// Number of self-play episodes
    #[arg(long, default_value_t = default_episodes())]
    pub episodes: u32,

    /// Ply from which moves are played greedily instead of sampled
    #[arg(long, default_value_t = default_temp_threshold())]
    pub temp_threshold: u32,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(anyhow!("board_size must be at least 1"));
        }

        if self.num_simulations == 0 {
            return Err(anyhow!("num_simulations must be greater than 0"));
        }

        if !self.c_puct.is_finite() || self.c_puct < 0.0 {
            return Err(anyhow!(
                "c_puct must be a finite non-negative number, got {}",
                self.c_puct
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::default()
            .with_simulations(self.num_simulations)
            .with_c_puct(self.c_puct)
    }
}
