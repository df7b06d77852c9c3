//! Environment configuration shared by the binaries.
//!
//! `MATCH_TAKER_ROOT` (default `12345`) is the root of the perfect-play tree,
//! `MATCH_TAKER_SEED` (default `1`) seeds the solver's random source and
//! `RAYON_NUM_THREADS` sizes the thread pool of the survey binary.

use std::env;

use crate::error::{Error, Result};
use crate::game_state::GameState;

pub const ROOT_VAR: &str = "MATCH_TAKER_ROOT";
pub const SEED_VAR: &str = "MATCH_TAKER_SEED";
pub const DEFAULT_SEED: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: GameState,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: GameState::standard(),
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_vars(env::var(ROOT_VAR).ok(), env::var(SEED_VAR).ok())
    }

    /// Builds a config from raw variable values; `None` selects the default.
    pub fn from_vars(root: Option<String>, seed: Option<String>) -> Result<Config> {
        let mut config = Config::default();
        if let Some(root) = root {
            config.root = root.parse()?;
        }
        if let Some(seed) = seed {
            config.seed = seed
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", SEED_VAR, seed, e)))?;
        }
        Ok(config)
    }
}

/// Reads `RAYON_NUM_THREADS` and builds the global rayon pool. Returns the thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rayon::current_num_threads);
    // may fail if the pool was already initialized
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
    num_threads
}
