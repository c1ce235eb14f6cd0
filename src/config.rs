//! Game configuration.

use std::time::Duration;

use thiserror::Error;

/// Round limit used when none is configured.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Which words may be proposed after the first round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GuessMode {
    /// Any dictionary word, feasible or not.
    #[default]
    Easy,
    /// Only words still in the candidate set.
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_rounds must be at least 1")]
    ZeroRounds,
    #[error("time_limit must be positive")]
    ZeroTimeLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GuessMode,
    /// Feedback rounds before the game gives up.
    pub max_rounds: usize,
    /// Score guesses on the rayon pool. Results match the sequential search.
    pub parallel: bool,
    /// Per-search wall-clock budget; the best guess found so far is used when it runs out.
    pub time_limit: Option<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GuessMode::Easy,
            max_rounds: DEFAULT_MAX_ROUNDS,
            parallel: true,
            time_limit: None,
        }
    }
}

impl GameConfig {
    pub fn with_mode(mut self, mode: GuessMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
