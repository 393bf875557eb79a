//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, 42);
    assert_eq!(config.common.board_size, 3);
    assert_eq!(config.mcts.num_simulations, 25);
    assert!((config.mcts.c_puct - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_arena_and_self_play_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.arena.games, 40);
    assert!(!config.arena.verbose);
    assert_eq!(config.arena.opponent, "random");
    assert_eq!(config.self_play.episodes, 10);
    assert_eq!(config.self_play.temp_threshold, 15);
}

#[test]
fn test_search_config_conversion() {
    let toml_content = r#"
[mcts]
num_simulations = 200
c_puct = 1.5
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    let search = config.mcts_config();
    assert_eq!(search.num_simulations, 200);
    assert!((search.c_puct - 1.5).abs() < 1e-6);
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"
seed = 7
board_size = 4

[arena]
games = 12
verbose = true
opponent = "mcts"

[self_play]
episodes = 3
temp_threshold = 5
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.common.seed, 7);
    assert_eq!(config.common.board_size, 4);
    assert_eq!(config.arena.games, 12);
    assert!(config.arena.verbose);
    assert_eq!(config.arena.opponent, "mcts");
    assert_eq!(config.self_play.episodes, 3);
    assert_eq!(config.self_play.temp_threshold, 5);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[arena]
games = 6
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.arena.games, 6);
    assert!(!config.arena.verbose); // Default
    assert_eq!(config.common.seed, 42); // Default
    assert_eq!(config.mcts.num_simulations, 25); // Default
}

#[test]
fn test_env_overrides() {
    std::env::set_var("ALPHAZERO_MCTS_NUM_SIMULATIONS", "99");
    std::env::set_var("ALPHAZERO_ARENA_OPPONENT", "mcts");
    std::env::set_var("ALPHAZERO_SELF_PLAY_TEMP_THRESHOLD", "3");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.num_simulations, 99);
    assert_eq!(config.arena.opponent, "mcts");
    assert_eq!(config.self_play.temp_threshold, 3);

    std::env::remove_var("ALPHAZERO_MCTS_NUM_SIMULATIONS");
    std::env::remove_var("ALPHAZERO_ARENA_OPPONENT");
    std::env::remove_var("ALPHAZERO_SELF_PLAY_TEMP_THRESHOLD");
}

#[test]
fn test_unparseable_env_override_ignored() {
    std::env::set_var("ALPHAZERO_COMMON_SEED", "not-a-number");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.common.seed, 42);

    std::env::remove_var("ALPHAZERO_COMMON_SEED");
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!("alphazero-config-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[self_play]\nepisodes = 21").unwrap();
    drop(file);

    let config = load_from_path(&path);
    assert_eq!(config.self_play.episodes, 21);
    assert_eq!(config.arena.games, 40);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_from_invalid_path_uses_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/alphazero/config.toml"));
    assert_eq!(config.arena.games, 40);
}

#[test]
fn test_load_from_malformed_file_uses_defaults() {
    let path = std::env::temp_dir().join(format!("alphazero-bad-{}.toml", std::process::id()));
    std::fs::write(&path, "[arena\ngames = ").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.arena.games, 40);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.seed, cloned.common.seed);
    assert_eq!(config.arena.opponent, cloned.arena.opponent);
}
