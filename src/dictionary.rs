//! Dictionary loading.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::word::{Word, WordError};

/// Word list shipped with the crate, one word per line.
pub const BUNDLED_DICTIONARY: &str = include_str!("../dictionary/dictionary.txt");

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    InvalidWord {
        line: usize,
        #[source]
        source: WordError,
    },
    #[error("line {line}: `{word}` has {found} letters, expected {expected}")]
    MixedLengths {
        line: usize,
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("dictionary contains no words")]
    Empty,
}

/// Parse one word per line, in order.
///
/// Lines are trimmed and blank lines skipped. Later duplicates are dropped.
/// Every word must have the length of the first one.
pub fn parse_dictionary(text: &str) -> Result<Vec<Word>, DictionaryError> {
    let mut words = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let word = Word::new(line).map_err(|source| DictionaryError::InvalidWord {
            line: index + 1,
            source,
        })?;
        if let Some(first) = words.first().map(Word::len) {
            if word.len() != first {
                return Err(DictionaryError::MixedLengths {
                    line: index + 1,
                    word: word.to_string(),
                    expected: first,
                    found: word.len(),
                });
            }
        }
        if !seen.insert(word.clone()) {
            warn!("line {}: duplicate word {word} ignored", index + 1);
            continue;
        }
        words.push(word);
    }

    if words.is_empty() {
        return Err(DictionaryError::Empty);
    }
    Ok(words)
}

pub fn load_dictionary_file(path: impl AsRef<Path>) -> Result<Vec<Word>, DictionaryError> {
    let text = fs::read_to_string(path)?;
    parse_dictionary(&text)
}

/// Load the bundled dictionary
pub fn load_dictionary() -> Result<Vec<Word>, DictionaryError> {
    parse_dictionary(BUNDLED_DICTIONARY)
}
