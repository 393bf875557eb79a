//! The `arena` and `self-play` subcommands.

use anyhow::Result;
use arena::{run_self_play, Arena, ArenaResult, MctsPlayer, Player, RandomPlayer, TrainingExample};
use engine_core::game_utils::{is_loss, is_win};
use games_tictactoe::{Board, TicTacToe};
use mcts::{MctsConfig, RolloutEvaluator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::config::{ArenaArgs, Opponent, SelfPlayArgs};

/// Per-component RNG streams derived from the run seed, so that changing
/// one component's consumption does not perturb the others.
fn rng_for(seed: u64, stream: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// MCTS player backed by random rollouts. The tree is dropped between games
/// so both seatings start from the same knowledge.
fn mcts_player<'a>(
    game: &'a TicTacToe,
    config: &MctsConfig,
    seed: u64,
    stream: u64,
) -> MctsPlayer<'a, TicTacToe, RolloutEvaluator<'a, TicTacToe>> {
    let evaluator = RolloutEvaluator::new(game, rng_for(seed, stream));
    let rng = rng_for(seed, stream + 1);
    MctsPlayer::new(game, evaluator, config.clone(), rng).with_fresh_tree(true)
}

/// Play `args.games` games of MCTS against the chosen opponent.
pub fn run_arena(
    game: &TicTacToe,
    config: &MctsConfig,
    seed: u64,
    args: &ArenaArgs,
) -> Result<ArenaResult> {
    info!(
        games = args.games,
        board_size = game.size(),
        num_simulations = config.num_simulations,
        c_puct = config.c_puct,
        opponent = ?args.opponent,
        "Starting arena"
    );

    let challenger = mcts_player(game, config, seed, 0);
    let opponent: Box<dyn Player<TicTacToe> + '_> = match args.opponent {
        Opponent::Random => Box::new(RandomPlayer::new(game, rng_for(seed, 2))),
        Opponent::Mcts => Box::new(mcts_player(game, config, seed, 3)),
    };

    let mut arena = Arena::new(challenger, opponent, game);
    let result = arena.play_games(args.games, args.verbose)?;

    match result.win_rate() {
        Some(rate) => info!(
            mcts_wins = result.one_won,
            opponent_wins = result.two_won,
            draws = result.draws,
            "MCTS won {:.1}% of decisive games",
            rate * 100.0
        ),
        None => info!(draws = result.draws, "Every game was drawn"),
    }
    Ok(result)
}

/// How self-play examples are labelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueSummary {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl ValueSummary {
    pub fn from_examples(examples: &[TrainingExample<Board>]) -> Self {
        examples.iter().fold(Self::default(), |mut acc, ex| {
            if is_win(ex.value) {
                acc.wins += 1;
            } else if is_loss(ex.value) {
                acc.losses += 1;
            } else {
                acc.draws += 1;
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.wins + self.losses + self.draws
    }
}

/// Run self-play episodes and summarise the examples they produce.
pub fn run_self_play_command(
    game: &TicTacToe,
    config: &MctsConfig,
    seed: u64,
    args: &SelfPlayArgs,
) -> Result<ValueSummary> {
    info!(
        episodes = args.episodes,
        temp_threshold = args.temp_threshold,
        num_simulations = config.num_simulations,
        "Starting self-play"
    );

    let evaluator = RolloutEvaluator::new(game, rng_for(seed, 0));
    let mut rng = rng_for(seed, 1);
    let examples = run_self_play(
        game,
        &evaluator,
        config,
        args.episodes,
        args.temp_threshold,
        &mut rng,
    )?;

    let summary = ValueSummary::from_examples(&examples);
    info!(
        examples = summary.total(),
        wins = summary.wins,
        losses = summary.losses,
        draws = summary.draws,
        "Self-play finished"
    );
    Ok(summary)
}
