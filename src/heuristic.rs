//! Letter-coverage heuristic for the opening guess.
//!
//! The exhaustive search is quadratic in the candidate count per guess, far
//! too slow for the full dictionary. Before any feedback exists we instead pick
//! the word whose distinct letters appear in the most candidates, so that any
//! `Nowhere` feedback eliminates as many words as possible.

use crate::word::{letter_index, Word, ALPHABET_SIZE};

/// Number of words in `words` containing each letter at least once.
pub fn letter_coverage(words: &[Word]) -> [usize; ALPHABET_SIZE] {
    let mut table = [0usize; ALPHABET_SIZE];
    for word in words {
        for letter in word.letters().iter() {
            table[letter_index(letter)] += 1;
        }
    }
    table
}

/// Sum of the coverage of `word`'s distinct letters.
pub fn coverage_score(table: &[usize; ALPHABET_SIZE], word: &Word) -> usize {
    word.letters()
        .iter()
        .map(|letter| table[letter_index(letter)])
        .sum()
}

/// The word with the highest coverage score; the earliest wins ties.
///
/// The table is rebuilt from `words` on every call. Returns `None` for an
/// empty input.
pub fn initial_guess(words: &[Word]) -> Option<&Word> {
    let table = letter_coverage(words);
    let mut best: Option<(&Word, usize)> = None;
    for word in words {
        let score = coverage_score(&table, word);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((word, score)),
        }
    }
    best.map(|(word, _)| word)
}
