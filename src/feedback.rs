//! Feedback calculation for guesses.
//!
//! This module computes the per-letter feedback (here/elsewhere/nowhere) for a
//! guess against a hypothetical word, and handles the `h`/`e`/`n` text codes a
//! player types in.
//!
//! Letters matched in place are removed from consideration before the
//! elsewhere/nowhere decision. Unlike a count-aware scorer, no occurrence
//! counter is consumed per `Elsewhere`: guessing `geese` against `later` marks
//! all three `e`s as elsewhere. [`crate::prune::prune`] relies on this exact rule.

use std::fmt;

use thiserror::Error;

use crate::word::{LetterSet, Word, MAX_WORD_LENGTH};

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter matches this exact position
    Here,
    /// Letter appears in the word, but not at this position
    Elsewhere,
    /// Letter satisfies neither of the above
    Nowhere,
}

impl Feedback {
    /// The code a player types for this symbol.
    pub fn to_code(self) -> char {
        match self {
            Feedback::Here => 'h',
            Feedback::Elsewhere => 'e',
            Feedback::Nowhere => 'n',
        }
    }

    /// Parse from a typed code (h=here, e=elsewhere, n=nowhere)
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'h' => Some(Feedback::Here),
            'e' => Some(Feedback::Elsewhere),
            'n' => Some(Feedback::Nowhere),
            _ => None,
        }
    }

    /// Convert to a character for display
    pub fn to_emoji(self) -> char {
        match self {
            Feedback::Here => '🟩',
            Feedback::Elsewhere => '🟨',
            Feedback::Nowhere => '⬛',
        }
    }

    fn digit(self) -> u32 {
        match self {
            Feedback::Nowhere => 0,
            Feedback::Elsewhere => 1,
            Feedback::Here => 2,
        }
    }

    fn from_digit(digit: u32) -> Self {
        match digit {
            0 => Feedback::Nowhere,
            1 => Feedback::Elsewhere,
            2 => Feedback::Here,
            _ => unreachable!("base-3 digit out of range"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackParseError {
    #[error("feedback code has {found} symbols, expected {expected}")]
    Length { expected: usize, found: usize },
    #[error("invalid feedback symbol {symbol:?} at position {position} (use h, e or n)")]
    InvalidSymbol { symbol: char, position: usize },
}

/// A complete feedback sequence for one guess.
///
/// Encoded base-3 into a `u32`, position 0 in the least significant digit:
/// `code = d0 + 3*d1 + 9*d2 + ...` with nowhere=0, elsewhere=1, here=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackPattern {
    code: u32,
    len: u8,
}

impl FeedbackPattern {
    /// Create a new pattern from individual feedback values
    ///
    /// # Panics
    ///
    /// If `feedbacks` is longer than [`MAX_WORD_LENGTH`].
    pub fn new(feedbacks: &[Feedback]) -> Self {
        assert!(
            feedbacks.len() <= MAX_WORD_LENGTH,
            "feedback longer than {MAX_WORD_LENGTH} symbols"
        );
        let mut code = 0;
        let mut multiplier = 1;
        for fb in feedbacks {
            code += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self {
            code,
            len: feedbacks.len() as u8,
        }
    }

    /// The winning pattern for a word of `len` letters.
    pub fn all_here(len: usize) -> Self {
        Self::new(&vec![Feedback::Here; len])
    }

    /// Calculate the feedback for `guess` when the hidden word is `word`.
    ///
    /// Positions where the letters agree are `Here`. The remaining positions
    /// are `Elsewhere` when the guessed letter occurs among the letters of
    /// `word` that were not matched in place, `Nowhere` otherwise.
    ///
    /// # Panics
    ///
    /// If `word` and `guess` differ in length.
    pub fn calculate(word: &Word, guess: &Word) -> Self {
        let word = word.as_bytes();
        let guess = guess.as_bytes();
        assert_eq!(
            word.len(),
            guess.len(),
            "word and guess must have the same length"
        );

        let remaining: LetterSet = word
            .iter()
            .zip(guess)
            .filter(|(w, g)| w != g)
            .map(|(&w, _)| w)
            .collect();

        let mut code = 0;
        let mut multiplier = 1;
        for (&w, &g) in word.iter().zip(guess) {
            let fb = if w == g {
                Feedback::Here
            } else if remaining.contains(g) {
                Feedback::Elsewhere
            } else {
                Feedback::Nowhere
            };
            code += fb.digit() * multiplier;
            multiplier *= 3;
        }

        Self {
            code,
            len: word.len() as u8,
        }
    }

    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The packed base-3 value.
    pub fn code(self) -> u32 {
        self.code
    }

    /// Symbols in positional order.
    pub fn iter(self) -> impl Iterator<Item = Feedback> {
        let mut rest = self.code;
        (0..self.len).map(move |_| {
            let fb = Feedback::from_digit(rest % 3);
            rest /= 3;
            fb
        })
    }

    /// Convert pattern to a vector of feedbacks
    pub fn to_feedbacks(self) -> Vec<Feedback> {
        self.iter().collect()
    }

    /// Check if this pattern represents a win (all here)
    pub fn is_win(self) -> bool {
        self.iter().all(|fb| fb == Feedback::Here)
    }

    /// Parse a typed code like "hnenn"; whitespace around it is ignored.
    pub fn parse(s: &str, expected_len: usize) -> Result<Self, FeedbackParseError> {
        let s = s.trim();
        let found = s.chars().count();
        if found != expected_len {
            return Err(FeedbackParseError::Length {
                expected: expected_len,
                found,
            });
        }
        let feedbacks = s
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Feedback::from_code(symbol)
                    .ok_or(FeedbackParseError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(&feedbacks))
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.iter().map(Feedback::to_emoji).collect()
    }
}

/// Formats as the typed `h`/`e`/`n` code, the inverse of [`FeedbackPattern::parse`].
impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code: String = self.iter().map(Feedback::to_code).collect();
        f.write_str(&code)
    }
}

/// Score `guess` against the hypothetical hidden `word`.
pub fn feedback(word: &Word, guess: &Word) -> FeedbackPattern {
    FeedbackPattern::calculate(word, guess)
}
