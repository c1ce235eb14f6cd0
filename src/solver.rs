//! Greedy exhaustive guess selection.
//!
//! For every guess `g` in the pool we compute
//!
//! ```text
//! score(g) = Σ_{w ∈ words} |prune(words, g, feedback(w, g))|
//! ```
//!
//! which is `N` times the expected size of the candidate set after guessing
//! `g`. The guess with the strictly smallest score wins; ties keep the guess
//! that comes first in the pool. This is a one-step lookahead, not a game-tree
//! search.
//!
//! Scoring a guess costs O(N²) word comparisons, so a guess is abandoned as
//! soon as its partial sum exceeds the best complete score seen so far. The
//! abandoned guess can never be the minimum, so this does not change the
//! result.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use crate::feedback::FeedbackPattern;
use crate::progress::{NoProgress, SearchProgress};
use crate::prune::prune_count;
use crate::word::Word;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("guess pool is empty")]
    EmptyGuessPool,
    #[error("candidate set is empty")]
    NoCandidates,
    #[error("`{word}` has {found} letters, expected {expected}")]
    LengthMismatch {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("search cancelled before any guess was scored")]
    Cancelled,
}

/// Result of the exhaustive search.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: Word,
    /// Sum of post-prune candidate counts over all candidates.
    pub score: usize,
    /// Candidate count the score was computed over.
    pub candidates: usize,
    pub expected_remaining: f64,
    /// False when the search stopped early on cancellation or deadline.
    pub exhaustive: bool,
}

impl GuessAnalysis {
    pub fn summary(&self) -> String {
        let mut summary = format!("expected size after pruning: {:.1}.", self.expected_remaining);
        if !self.exhaustive {
            summary.push_str(" (search stopped early)");
        }
        summary
    }
}

impl fmt::Display for GuessAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Shared flag that stops a running search at the next guess boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Exhaustive search configuration.
#[derive(Clone)]
pub struct ExhaustiveSearch<'p> {
    parallel: bool,
    deadline: Option<Instant>,
    cancel: CancelToken,
    progress: &'p dyn SearchProgress,
}

impl Default for ExhaustiveSearch<'static> {
    fn default() -> Self {
        Self {
            parallel: false,
            deadline: None,
            cancel: CancelToken::default(),
            progress: &NoProgress,
        }
    }
}

impl ExhaustiveSearch<'static> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'p> ExhaustiveSearch<'p> {
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn progress<'q>(self, progress: &'q dyn SearchProgress) -> ExhaustiveSearch<'q> {
        ExhaustiveSearch {
            parallel: self.parallel,
            deadline: self.deadline,
            cancel: self.cancel,
            progress,
        }
    }

    /// Pick the guess from `pool` minimising the expected candidate count.
    pub fn select(&self, words: &[Word], pool: &[Word]) -> Result<GuessAnalysis, SolverError> {
        if pool.is_empty() {
            return Err(SolverError::EmptyGuessPool);
        }
        let expected = words.first().ok_or(SolverError::NoCandidates)?.len();
        if let Some(word) = words.iter().chain(pool).find(|w| w.len() != expected) {
            return Err(SolverError::LengthMismatch {
                word: word.to_string(),
                expected,
                found: word.len(),
            });
        }

        self.progress.begin(pool.len());
        let (best, exhaustive) = if self.parallel {
            self.search_parallel(words, pool)
        } else {
            self.search_sequential(words, pool)
        };
        self.progress.finish();

        let (score, index) = best.ok_or(SolverError::Cancelled)?;
        let analysis = GuessAnalysis {
            word: pool[index].clone(),
            score,
            candidates: words.len(),
            expected_remaining: score as f64 / words.len() as f64,
            exhaustive,
        };
        debug!(
            "selected {} over {} guesses: {}",
            analysis.word,
            pool.len(),
            analysis.summary()
        );
        Ok(analysis)
    }

    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns the best `(score, pool index)` and whether every guess was visited.
    fn search_sequential(&self, words: &[Word], pool: &[Word]) -> (Option<(usize, usize)>, bool) {
        let mut best: Option<(usize, usize)> = None;
        for (index, guess) in pool.iter().enumerate() {
            if self.should_stop() {
                return (best, false);
            }
            let bound = best.map_or(usize::MAX, |(score, _)| score);
            if let Some(score) = score_bounded(words, guess, bound) {
                if score < bound {
                    debug!("new best guess {guess}: score {score}");
                    best = Some((score, index));
                }
            }
            self.progress.advance(1);
        }
        (best, true)
    }

    /// Same result as the sequential search. Workers share the best score seen
    /// so far; a stale read only weakens the early exit.
    fn search_parallel(&self, words: &[Word], pool: &[Word]) -> (Option<(usize, usize)>, bool) {
        let bound = AtomicUsize::new(usize::MAX);
        let stopped = AtomicBool::new(false);

        let best = pool
            .par_iter()
            .enumerate()
            .filter_map(|(index, guess)| {
                if self.should_stop() {
                    stopped.store(true, Ordering::Relaxed);
                    return None;
                }
                let score = score_bounded(words, guess, bound.load(Ordering::Relaxed));
                self.progress.advance(1);
                let score = score?;
                bound.fetch_min(score, Ordering::Relaxed);
                Some((score, index))
            })
            .min();

        (best, !stopped.load(Ordering::Relaxed))
    }
}

/// Score `guess` unless its partial sum exceeds `bound`.
///
/// Words that yield the same feedback prune to the same set, so the prune
/// size is computed once per distinct feedback pattern.
fn score_bounded(words: &[Word], guess: &Word, bound: usize) -> Option<usize> {
    let mut sizes: HashMap<FeedbackPattern, usize> = HashMap::new();
    let mut total = 0usize;
    for word in words {
        let pattern = FeedbackPattern::calculate(word, guess);
        total += *sizes
            .entry(pattern)
            .or_insert_with(|| prune_count(words, guess, pattern));
        if total > bound {
            return None;
        }
    }
    Some(total)
}

/// Full score of a single guess, without early exit.
pub fn score_guess(words: &[Word], guess: &Word) -> usize {
    score_bounded(words, guess, usize::MAX).unwrap_or(usize::MAX)
}

/// Sequential exhaustive search with no progress reporting.
pub fn select_guess(words: &[Word], pool: &[Word]) -> Result<GuessAnalysis, SolverError> {
    ExhaustiveSearch::default().select(words, pool)
}
