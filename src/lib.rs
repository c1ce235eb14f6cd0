//! # Wordle Bot
//!
//! A Wordle solver built on a greedy one-step exhaustive search.
//!
//! Let W be the set of words consistent with all feedback so far. After the
//! first round the solver guesses the g minimising
//!
//! ```text
//! E_{w ∈ W} |{w' ∈ W : feedback(w', g) = feedback(w, g)}|
//! ```
//!
//! The opening guess, where W is the whole dictionary and the search is too
//! slow, comes from a letter-coverage heuristic instead.

pub mod config;
pub mod dictionary;
pub mod feedback;
pub mod game;
pub mod heuristic;
pub mod progress;
pub mod prune;
pub mod solver;
pub mod word;

pub use config::{ConfigError, GameConfig, GuessMode, DEFAULT_MAX_ROUNDS};
pub use dictionary::{load_dictionary, load_dictionary_file, parse_dictionary, DictionaryError};
pub use feedback::{feedback, Feedback, FeedbackParseError, FeedbackPattern};
pub use game::{
    Benchmark, FeedbackSource, Game, GameError, GameReport, InteractiveFeedback, OracleFeedback,
    Outcome, Round, RoundState,
};
pub use heuristic::initial_guess;
pub use progress::{NoProgress, SearchProgress};
pub use prune::{is_consistent, prune, prune_count};
pub use solver::{select_guess, CancelToken, ExhaustiveSearch, GuessAnalysis, SolverError};
pub use word::{Word, WordError};

/// Word length of the bundled dictionary
pub const WORD_LENGTH: usize = 5;
