//! Consistency filtering of the candidate set.
//!
//! `prune` keeps exactly the words that would have produced the observed
//! feedback under [`FeedbackPattern::calculate`]. Positions marked `Here` are
//! checked and then masked out; the remaining `Nowhere`/`Elsewhere` tests run
//! against the letters left in the masked word, the same reduction the
//! evaluator applies.

use crate::feedback::{Feedback, FeedbackPattern};
use crate::word::{LetterSet, Word, MAX_WORD_LENGTH};

/// Feedback decoded once per call so the per-word test works on a plain slice.
struct Observation<'a> {
    guess: &'a [u8],
    symbols: [Feedback; MAX_WORD_LENGTH],
    len: usize,
}

impl<'a> Observation<'a> {
    fn new(guess: &'a Word, feedback: FeedbackPattern) -> Self {
        assert_eq!(
            guess.len(),
            feedback.len(),
            "guess and feedback must have the same length"
        );
        let mut symbols = [Feedback::Nowhere; MAX_WORD_LENGTH];
        for (slot, fb) in symbols.iter_mut().zip(feedback.iter()) {
            *slot = fb;
        }
        Self {
            guess: guess.as_bytes(),
            symbols,
            len: feedback.len(),
        }
    }

    fn admits(&self, word: &Word) -> bool {
        let word = word.as_bytes();
        assert_eq!(
            word.len(),
            self.len,
            "word and guess must have the same length"
        );
        let symbols = &self.symbols[..self.len];

        let mut remaining = LetterSet::EMPTY;
        for ((&w, &g), &fb) in word.iter().zip(self.guess).zip(symbols) {
            if fb == Feedback::Here {
                if w != g {
                    return false;
                }
            } else {
                remaining.insert(w);
            }
        }

        word.iter()
            .zip(self.guess)
            .zip(symbols)
            .all(|((&w, &g), &fb)| match fb {
                Feedback::Here => true,
                Feedback::Nowhere => !remaining.contains(g),
                Feedback::Elsewhere => remaining.contains(g) && w != g,
            })
    }
}

/// Returns the words of `words`, in order, that are consistent with `feedback`
/// for `guess`. Contradictory feedback gives an empty result.
///
/// # Panics
///
/// If `guess`, `feedback` and any of `words` differ in length.
pub fn prune(words: &[Word], guess: &Word, feedback: FeedbackPattern) -> Vec<Word> {
    let observation = Observation::new(guess, feedback);
    words
        .iter()
        .filter(|word| observation.admits(word))
        .cloned()
        .collect()
}

/// `prune(words, guess, feedback).len()` without building the result.
pub fn prune_count(words: &[Word], guess: &Word, feedback: FeedbackPattern) -> usize {
    let observation = Observation::new(guess, feedback);
    words.iter().filter(|word| observation.admits(word)).count()
}

/// Whether a single word is consistent with `feedback` for `guess`.
pub fn is_consistent(word: &Word, guess: &Word, feedback: FeedbackPattern) -> bool {
    Observation::new(guess, feedback).admits(word)
}
