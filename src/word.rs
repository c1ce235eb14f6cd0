//! Words and letter sets.
//!
//! A [`Word`] is an immutable, validated sequence of lowercase ASCII letters.
//! Every algorithm in the crate works on the raw bytes, so validation happens
//! once, at construction.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Longest word the feedback encoding can represent (3^20 fits in a `u32`).
pub const MAX_WORD_LENGTH: usize = 20;

/// Number of letters in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word `{word}` has {len} letters, at most {MAX_WORD_LENGTH} are supported")]
    TooLong { word: String, len: usize },
    #[error("invalid letter {letter:?} in word `{word}`")]
    InvalidLetter { word: String, letter: char },
}

/// A dictionary entry or guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Box<str>);

impl Word {
    /// Build a word, lowercasing ASCII letters. Anything outside `a-z` is rejected.
    pub fn new(text: &str) -> Result<Self, WordError> {
        if text.is_empty() {
            return Err(WordError::Empty);
        }
        if let Some(letter) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidLetter {
                word: text.to_string(),
                letter,
            });
        }
        if text.len() > MAX_WORD_LENGTH {
            return Err(WordError::TooLong {
                word: text.to_string(),
                len: text.len(),
            });
        }
        Ok(Self(text.to_ascii_lowercase().into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed word; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The distinct letters of this word.
    pub fn letters(&self) -> LetterSet {
        self.as_bytes().iter().copied().collect()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Index of a lowercase ASCII letter in `0..26`.
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_lowercase());
    (letter - b'a') as usize
}

/// A set of letters packed into the low 26 bits of a `u32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn insert(&mut self, letter: u8) {
        self.0 |= 1 << letter_index(letter);
    }

    #[inline]
    pub fn contains(self, letter: u8) -> bool {
        self.0 & (1 << letter_index(letter)) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Letters in alphabetical order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..ALPHABET_SIZE as u8)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(|i| b'a' + i)
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}
