//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by ALPHAZERO_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("ALPHAZERO_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from ALPHAZERO_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "ALPHAZERO_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// A file that cannot be read or parsed falls back to the built-in defaults
/// with a warning rather than failing the run.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, ...)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: ALPHAZERO_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "ALPHAZERO_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "ALPHAZERO_COMMON_SEED", parse);
    env_override!(
        config,
        common.board_size,
        "ALPHAZERO_COMMON_BOARD_SIZE",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.num_simulations,
        "ALPHAZERO_MCTS_NUM_SIMULATIONS",
        parse
    );
    env_override!(config, mcts.c_puct, "ALPHAZERO_MCTS_C_PUCT", parse);

    // Arena
    env_override!(config, arena.games, "ALPHAZERO_ARENA_GAMES", parse);
    env_override!(config, arena.verbose, "ALPHAZERO_ARENA_VERBOSE", parse);
    env_override!(config, arena.opponent, "ALPHAZERO_ARENA_OPPONENT");

    // Self-play
    env_override!(
        config,
        self_play.episodes,
        "ALPHAZERO_SELF_PLAY_EPISODES",
        parse
    );
    env_override!(
        config,
        self_play.temp_threshold,
        "ALPHAZERO_SELF_PLAY_TEMP_THRESHOLD",
        parse
    );

    config
}
