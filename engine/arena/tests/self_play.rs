use arena::run_self_play;
use engine_core::Game;
use games_tictactoe::TicTacToe;
use mcts::{MctsConfig, UniformEvaluator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn tictactoe_self_play_examples() {
    let game = TicTacToe::default();
    let evaluator = UniformEvaluator::new(game.action_size());
    let config = MctsConfig::for_testing().with_simulations(25);
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    let examples = run_self_play(&game, &evaluator, &config, 2, 4, &mut rng).unwrap();

    // At least five plies per game, eight symmetries per ply
    assert!(examples.len() >= 2 * 5 * 8);
    assert_eq!(examples.len() % 8, 0);
    for ex in &examples {
        assert_eq!(ex.policy.len(), game.action_size());
        assert!((ex.policy.iter().sum::<f32>() - 1.0).abs() < 1e-4);
        assert!(ex.value.abs() == 1.0 || ex.value.abs() < 1e-3);
    }
}
