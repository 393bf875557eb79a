//! Self-play episodes producing training examples.
//!
//! One MCTS engine plays both sides of a game. Each position contributes
//! its search policy (and every symmetric variant) to the episode; once the
//! game ends every example is labelled with the final result from the
//! perspective of the player who was to move there.

use engine_core::policy::sample_index;
use engine_core::{Game, Player as Side};
use mcts::{Evaluator, Mcts, MctsConfig, SearchError};
use rand::Rng;
use tracing::{debug, info};

use crate::progress::progress_bar;

/// One labelled position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample<B> {
    /// Canonical board (or a symmetric variant of it)
    pub board: B,
    /// Search policy over the action space
    pub policy: Vec<f32>,
    /// Final game result for the player to move on `board`
    pub value: f32,
}

/// Play one game against itself and return the labelled positions.
///
/// A fresh engine is built for the episode, so no statistics carry over
/// between episodes. Moves are sampled at temperature 1 for the first
/// `temp_threshold - 1` plies and played greedily afterwards.
pub fn execute_episode<G, E, R>(
    game: &G,
    evaluator: E,
    config: &MctsConfig,
    temp_threshold: u32,
    rng: &mut R,
) -> Result<Vec<TrainingExample<G::Board>>, SearchError>
where
    G: Game,
    E: Evaluator<G::Board>,
    R: Rng + ?Sized,
{
    let mut mcts = Mcts::new(game, evaluator, config.clone());
    let mut pending: Vec<(G::Board, Side, Vec<f32>)> = Vec::new();

    let mut board = game.initial_board();
    let mut current = Side::One;
    let mut step = 0u32;

    loop {
        step += 1;
        let canonical = game.canonical_form(&board, current);
        let temperature = if step < temp_threshold { 1.0 } else { 0.0 };

        let pi = mcts.get_action_probabilities(&canonical, temperature, rng)?;
        for (b, p) in game.symmetries(&canonical, &pi) {
            pending.push((b, current, p));
        }

        let action = sample_index(&pi, rng)
            .ok_or(SearchError::NoValidMoves { actions: pi.len() })?;
        debug!(step, player = %current, action, temperature, "Self-play move");

        (board, current) = game.next_state(&board, current, action);

        let result = game.game_ended(&board, current);
        if result != 0.0 {
            debug!(steps = step, result, "Self-play episode ended");
            return Ok(pending
                .into_iter()
                .map(|(board, player, policy)| TrainingExample {
                    board,
                    policy,
                    value: if player == current { result } else { -result },
                })
                .collect());
        }
    }
}

/// Run `episodes` self-play games and concatenate their examples.
pub fn run_self_play<G, E, R>(
    game: &G,
    evaluator: &E,
    config: &MctsConfig,
    episodes: u32,
    temp_threshold: u32,
    rng: &mut R,
) -> Result<Vec<TrainingExample<G::Board>>, SearchError>
where
    G: Game,
    E: Evaluator<G::Board>,
    R: Rng + ?Sized,
{
    let mut examples = Vec::new();
    let progress = progress_bar(episodes as u64, "Self Play", "episodes");

    for episode in 1..=episodes {
        let batch = execute_episode(game, evaluator, config, temp_threshold, rng)?;
        info!(
            episode,
            examples = batch.len(),
            "Self-play episode complete"
        );
        examples.extend(batch);
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    Ok(examples)
}
