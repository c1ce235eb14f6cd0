//! Round-by-round game control.
//!
//! A game is a small state machine:
//!
//! ```text
//! AwaitingGuess(1, dictionary)
//!   -> AwaitingFeedback(round, words, guess)
//!   -> AwaitingGuess(round + 1, pruned) | Solved | Failed | Exhausted
//! ```
//!
//! Round 1 uses the coverage heuristic; later rounds use the exhaustive search
//! over the dictionary (easy mode) or the remaining candidates (hard mode).
//! Feedback comes from a [`FeedbackSource`].

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig, GuessMode};
use crate::feedback::FeedbackPattern;
use crate::heuristic::initial_guess;
use crate::progress::{NoProgress, SearchProgress};
use crate::prune::prune;
use crate::solver::{CancelToken, ExhaustiveSearch, SolverError};
use crate::word::Word;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("dictionary contains no words")]
    EmptyDictionary,
    #[error("dictionary word `{word}` has {found} letters, expected {expected}")]
    MixedLengths {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("target has {found} letters, dictionary words have {expected}")]
    TargetLength { expected: usize, found: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("feedback has {found} symbols for a {expected}-letter guess")]
    FeedbackLength { expected: usize, found: usize },
    #[error("feedback input closed")]
    InputClosed,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("search failed: {0}")]
    Solver(#[from] SolverError),
}

/// Supplies feedback for each guess.
pub trait FeedbackSource {
    fn feedback(&mut self, guess: &Word) -> Result<FeedbackPattern, GameError>;
}

impl<F> FeedbackSource for F
where
    F: FnMut(&Word) -> FeedbackPattern,
{
    fn feedback(&mut self, guess: &Word) -> Result<FeedbackPattern, GameError> {
        Ok(self(guess))
    }
}

/// Scores guesses against a known target.
#[derive(Debug, Clone)]
pub struct OracleFeedback {
    target: Word,
}

impl OracleFeedback {
    pub fn new(target: Word) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Word {
        &self.target
    }
}

impl FeedbackSource for OracleFeedback {
    fn feedback(&mut self, guess: &Word) -> Result<FeedbackPattern, GameError> {
        if guess.len() != self.target.len() {
            return Err(GameError::TargetLength {
                expected: guess.len(),
                found: self.target.len(),
            });
        }
        Ok(FeedbackPattern::calculate(&self.target, guess))
    }
}

/// Asks a person for the `h`/`e`/`n` code, re-prompting until it parses.
pub struct InteractiveFeedback<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveFeedback<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> FeedbackSource for InteractiveFeedback<R, W> {
    fn feedback(&mut self, guess: &Word) -> Result<FeedbackPattern, GameError> {
        let mut line = String::new();
        loop {
            writeln!(self.output, "enter feedback code for {guess}:")?;
            writeln!(self.output, "h = here, e = elsewhere, n = nowhere.")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }
            match FeedbackPattern::parse(&line, guess.len()) {
                Ok(pattern) => return Ok(pattern),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    AwaitingGuess {
        round: usize,
        words: Vec<Word>,
    },
    AwaitingFeedback {
        round: usize,
        words: Vec<Word>,
        guess: Word,
        /// Why this guess was chosen, for display.
        rationale: String,
    },
    Solved {
        word: Word,
        rounds: usize,
    },
    /// Every candidate was eliminated: the feedback contradicts the dictionary.
    Failed {
        round: usize,
    },
    /// The round limit was reached with several candidates left.
    Exhausted {
        words: Vec<Word>,
    },
}

impl RoundState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RoundState::Solved { .. } | RoundState::Failed { .. } | RoundState::Exhausted { .. }
        )
    }

    /// Candidates still possible in this state.
    pub fn remaining(&self) -> usize {
        match self {
            RoundState::AwaitingGuess { words, .. }
            | RoundState::AwaitingFeedback { words, .. }
            | RoundState::Exhausted { words } => words.len(),
            RoundState::Solved { .. } => 1,
            RoundState::Failed { .. } => 0,
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved { word: Word, rounds: usize },
    Failed { round: usize },
    Exhausted { words: Vec<Word> },
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }
}

/// One completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub round: usize,
    pub guess: Word,
    pub rationale: String,
    pub feedback: FeedbackPattern,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: Outcome,
    pub rounds: Vec<Round>,
}

/// Oracle games over a list of targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Benchmark {
    pub games: usize,
    /// `(rounds, games)` pairs for targets that were identified.
    pub distribution: Vec<(usize, usize)>,
    /// Targets eliminated or misidentified.
    pub failed: Vec<Word>,
    /// Targets still ambiguous at the round limit.
    pub exhausted: Vec<Word>,
}

impl Benchmark {
    pub fn solved(&self) -> usize {
        self.distribution.iter().map(|(_, count)| count).sum()
    }

    /// Average rounds over solved games.
    pub fn average_rounds(&self) -> f64 {
        let solved = self.solved();
        if solved == 0 {
            return 0.0;
        }
        let total: usize = self.distribution.iter().map(|(r, c)| r * c).sum();
        total as f64 / solved as f64
    }
}

/// Drives games over a fixed dictionary.
#[derive(Clone)]
pub struct Game {
    dictionary: Arc<[Word]>,
    config: GameConfig,
    progress: Arc<dyn SearchProgress>,
    cancel: CancelToken,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("words", &self.dictionary.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(dictionary: impl Into<Arc<[Word]>>, config: GameConfig) -> Result<Self, GameError> {
        let dictionary = dictionary.into();
        config.validate()?;
        let expected = dictionary.first().ok_or(GameError::EmptyDictionary)?.len();
        if let Some(word) = dictionary.iter().find(|w| w.len() != expected) {
            return Err(GameError::MixedLengths {
                word: word.to_string(),
                expected,
                found: word.len(),
            });
        }
        Ok(Self {
            dictionary,
            config,
            progress: Arc::new(NoProgress),
            cancel: CancelToken::default(),
        })
    }

    /// Report exhaustive-search progress to `progress`.
    pub fn with_progress(mut self, progress: Arc<dyn SearchProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Stop searches when `cancel` fires. The best guess scored so far is used,
    /// or the coverage heuristic over the candidates when none was scored.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn dictionary(&self) -> &[Word] {
        &self.dictionary
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn word_length(&self) -> usize {
        self.dictionary[0].len()
    }

    pub fn start(&self) -> RoundState {
        RoundState::AwaitingGuess {
            round: 1,
            words: self.dictionary.to_vec(),
        }
    }

    /// Advance `state` by one transition. Terminal states are returned unchanged.
    pub fn step<S>(&self, state: RoundState, source: &mut S) -> Result<RoundState, GameError>
    where
        S: FeedbackSource + ?Sized,
    {
        match state {
            RoundState::AwaitingGuess { round, words } => {
                let (guess, rationale) = self.choose_guess(round, &words)?;
                Ok(RoundState::AwaitingFeedback {
                    round,
                    words,
                    guess,
                    rationale,
                })
            }
            RoundState::AwaitingFeedback {
                round, words, guess, ..
            } => {
                let pattern = self.observe(source, &guess)?;
                Ok(self.resolve(round, &words, &guess, pattern))
            }
            terminal => Ok(terminal),
        }
    }

    /// Play until a terminal state.
    pub fn play<S>(&self, source: &mut S) -> Result<GameReport, GameError>
    where
        S: FeedbackSource + ?Sized,
    {
        let mut state = self.start();
        let mut rounds = Vec::new();
        loop {
            state = match state {
                RoundState::AwaitingFeedback {
                    round,
                    words,
                    guess,
                    rationale,
                } => {
                    let feedback = self.observe(source, &guess)?;
                    let next = self.resolve(round, &words, &guess, feedback);
                    rounds.push(Round {
                        round,
                        guess,
                        rationale,
                        feedback,
                        remaining: next.remaining(),
                    });
                    next
                }
                RoundState::Solved { word, rounds: n } => {
                    return Ok(GameReport {
                        outcome: Outcome::Solved { word, rounds: n },
                        rounds,
                    })
                }
                RoundState::Failed { round } => {
                    return Ok(GameReport {
                        outcome: Outcome::Failed { round },
                        rounds,
                    })
                }
                RoundState::Exhausted { words } => {
                    return Ok(GameReport {
                        outcome: Outcome::Exhausted { words },
                        rounds,
                    })
                }
                awaiting => self.step(awaiting, source)?,
            };
        }
    }

    /// Play against a known target (for testing/benchmarking).
    pub fn solve_for_target(&self, target: &Word) -> Result<GameReport, GameError> {
        if target.len() != self.word_length() {
            return Err(GameError::TargetLength {
                expected: self.word_length(),
                found: target.len(),
            });
        }
        self.play(&mut OracleFeedback::new(target.clone()))
    }

    /// Solve every target in parallel, one sequential search per game.
    pub fn benchmark(
        &self,
        targets: &[Word],
        progress: &dyn SearchProgress,
    ) -> Result<Benchmark, GameError> {
        let quiet = Game {
            dictionary: Arc::clone(&self.dictionary),
            config: self.config.clone().with_parallel(false),
            progress: Arc::new(NoProgress),
            cancel: self.cancel.clone(),
        };

        progress.begin(targets.len());
        let outcomes = targets
            .par_iter()
            .map(|target| -> Result<_, GameError> {
                let report = quiet.solve_for_target(target)?;
                progress.advance(1);
                Ok((target, report.outcome))
            })
            .collect::<Result<Vec<_>, GameError>>()?;
        progress.finish();

        let mut distribution = BTreeMap::new();
        let mut benchmark = Benchmark {
            games: targets.len(),
            ..Benchmark::default()
        };
        for (target, outcome) in outcomes {
            match outcome {
                Outcome::Solved { word, rounds } if word == *target => {
                    *distribution.entry(rounds).or_insert(0) += 1;
                }
                Outcome::Solved { .. } | Outcome::Failed { .. } => {
                    benchmark.failed.push(target.clone())
                }
                Outcome::Exhausted { .. } => benchmark.exhausted.push(target.clone()),
            }
        }
        benchmark.distribution = distribution.into_iter().collect();
        Ok(benchmark)
    }

    fn choose_guess(&self, round: usize, words: &[Word]) -> Result<(Word, String), GameError> {
        if round == 1 {
            let guess = initial_guess(words).ok_or(SolverError::NoCandidates)?;
            return Ok((guess.clone(), "heuristic initial guess.".to_string()));
        }

        let pool: &[Word] = match self.config.mode {
            GuessMode::Easy => &self.dictionary,
            GuessMode::Hard => words,
        };
        let deadline = self.config.time_limit.map(|limit| Instant::now() + limit);
        let search = ExhaustiveSearch::new()
            .parallel(self.config.parallel)
            .deadline(deadline)
            .cancel_token(self.cancel.clone())
            .progress(&*self.progress);
        let analysis = match search.select(words, pool) {
            Ok(analysis) => analysis,
            Err(SolverError::Cancelled) => {
                let guess = initial_guess(words).ok_or(SolverError::NoCandidates)?;
                warn!("round {round}: search stopped before scoring a guess, using {guess}");
                return Ok((guess.clone(), "search cancelled; heuristic guess.".to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let rationale = analysis.summary();
        Ok((analysis.word, rationale))
    }

    fn observe<S>(&self, source: &mut S, guess: &Word) -> Result<FeedbackPattern, GameError>
    where
        S: FeedbackSource + ?Sized,
    {
        let pattern = source.feedback(guess)?;
        if pattern.len() != guess.len() {
            return Err(GameError::FeedbackLength {
                expected: guess.len(),
                found: pattern.len(),
            });
        }
        Ok(pattern)
    }

    fn resolve(
        &self,
        round: usize,
        words: &[Word],
        guess: &Word,
        feedback: FeedbackPattern,
    ) -> RoundState {
        let mut pruned = prune(words, guess, feedback);
        info!(
            "round {round}: {guess} -> {feedback}, {} of {} candidates remain",
            pruned.len(),
            words.len()
        );

        if pruned.len() == 1 {
            if let Some(word) = pruned.pop() {
                return RoundState::Solved {
                    word,
                    rounds: round,
                };
            }
        }
        if pruned.is_empty() {
            RoundState::Failed { round }
        } else if round >= self.config.max_rounds {
            RoundState::Exhausted { words: pruned }
        } else {
            RoundState::AwaitingGuess {
                round: round + 1,
                words: pruned,
            }
        }
    }
}
