//! Pit - play MCTS agents against each other on TicTacToe
//!
//! Two subcommands:
//! 1. `arena`: an MCTS player (random-rollout evaluator) against a random
//!    player or a second MCTS player, seats swapped halfway
//! 2. `self-play`: one MCTS player against itself, summarising the labelled
//!    training examples the episodes produce

use anyhow::Result;
use clap::Parser;
use games_tictactoe::TicTacToe;
use tracing::{error, info};

mod commands;
mod config;

use crate::commands::{run_arena, run_self_play_command};
use crate::config::{Cli, Command};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    init_tracing(&cli.log_level)?;
    info!(log_level = %cli.log_level, seed = cli.seed, "Tracing initialized");

    let game = TicTacToe::new(cli.board_size);
    let mcts_config = cli.mcts_config();

    let outcome = match &cli.command {
        Command::Arena(args) => run_arena(&game, &mcts_config, cli.seed, args).map(|_| ()),
        Command::SelfPlay(args) => {
            run_self_play_command(&game, &mcts_config, cli.seed, args).map(|_| ())
        }
    };

    if let Err(e) = &outcome {
        error!("pit failed: {e:#}");
    }
    outcome
}
