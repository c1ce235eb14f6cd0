use wordle_bot::{
    feedback, is_consistent, load_dictionary, prune, prune_count, Feedback, FeedbackPattern, Word,
};

use Feedback::{Elsewhere as E, Here as H, Nowhere as N};

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|s| Word::new(s).unwrap()).collect()
}

fn w(s: &str) -> Word {
    Word::new(s).unwrap()
}

/// Reference: the words whose computed feedback equals `pattern`.
fn brute_force(set: &[Word], guess: &Word, pattern: FeedbackPattern) -> Vec<Word> {
    set.iter()
        .filter(|s| feedback(s, guess) == pattern)
        .cloned()
        .collect()
}

fn cut<T: Copy>(s: &[T], i: usize) -> Vec<T> {
    [&s[..i], &s[i + 1..]].concat()
}

/// Recursive formulation: peel off the first in-place match and recurse.
fn recursive_feedback(word: &[u8], guess: &[u8]) -> Vec<Feedback> {
    let mut out = Vec::new();
    for (i, (&wl, &gl)) in word.iter().zip(guess).enumerate() {
        if wl == gl {
            let mut rest = recursive_feedback(&cut(word, i), &cut(guess, i));
            rest.insert(i, H);
            return rest;
        } else if word.contains(&gl) {
            out.push(E);
        } else {
            out.push(N);
        }
    }
    out
}

fn recursive_prune(words: &[Vec<u8>], guess: &[u8], feedback: &[Feedback]) -> Vec<Vec<u8>> {
    if let Some(i) = feedback.iter().position(|&fb| fb == H) {
        let letter = guess[i];
        let reduced: Vec<Vec<u8>> = words
            .iter()
            .filter(|w| w[i] == letter)
            .map(|w| cut(w, i))
            .collect();
        return recursive_prune(&reduced, &cut(guess, i), &cut(feedback, i))
            .into_iter()
            .map(|mut w| {
                w.insert(i, letter);
                w
            })
            .collect();
    }

    let mut words = words.to_vec();
    for (i, (&letter, &fb)) in guess.iter().zip(feedback).enumerate() {
        if fb == N {
            words.retain(|w| !w.contains(&letter));
        } else {
            words.retain(|w| w.contains(&letter) && w[i] != letter);
        }
    }
    words
}

/// Every string of length `len` over `alphabet`.
fn all_strings(alphabet: &[u8], len: usize) -> Vec<Vec<u8>> {
    (0..len).fold(vec![Vec::new()], |acc, _| {
        acc.iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |&c| {
                    let mut s = prefix.clone();
                    s.push(c);
                    s
                })
            })
            .collect()
    })
}

fn all_patterns(len: usize) -> Vec<Vec<Feedback>> {
    (0..len).fold(vec![Vec::new()], |acc, _| {
        acc.iter()
            .flat_map(|prefix| {
                [H, E, N].into_iter().map(move |fb| {
                    let mut p = prefix.clone();
                    p.push(fb);
                    p
                })
            })
            .collect()
    })
}

fn to_words(raw: &[Vec<u8>]) -> Vec<Word> {
    raw.iter()
        .map(|b| Word::new(std::str::from_utf8(b).unwrap()).unwrap())
        .collect()
}

#[test]
fn test_feedback_matches_recursive_formulation() {
    for len in 1..=4 {
        let raw = all_strings(b"abc", len);
        let set = to_words(&raw);
        for (guess, raw_guess) in set.iter().zip(&raw) {
            for (word, raw_word) in set.iter().zip(&raw) {
                assert_eq!(
                    feedback(word, guess).to_feedbacks(),
                    recursive_feedback(raw_word, raw_guess),
                    "word {word}, guess {guess}"
                );
            }
        }
    }
}

#[test]
fn test_prune_matches_recursive_formulation() {
    for len in 1..=4 {
        let raw = all_strings(b"abc", len);
        let set = to_words(&raw);
        for (guess, raw_guess) in set.iter().zip(&raw) {
            for pattern in all_patterns(len) {
                let expected = to_words(&recursive_prune(&raw, raw_guess, &pattern));
                let pattern = FeedbackPattern::new(&pattern);
                assert_eq!(
                    prune(&set, guess, pattern),
                    expected,
                    "guess {guess}, feedback {pattern}"
                );
                assert_eq!(prune_count(&set, guess, pattern), expected.len());
                for word in &set {
                    assert_eq!(is_consistent(word, guess, pattern), expected.contains(word));
                }
            }
        }
    }
}

#[test]
fn test_two_letter_scenario() {
    let dictionary = words(&["ex", "ee"]);
    let guess = w("ee");
    let pattern = feedback(&w("ex"), &guess);
    assert_eq!(pattern.to_feedbacks(), vec![H, N]);
    assert_eq!(prune(&dictionary, &guess, pattern), words(&["ex"]));
}

#[test]
fn test_permutation_scenario() {
    let dictionary = words(&["aabc", "abcd", "dcba"]);
    let guess = w("abcd");
    let pattern = feedback(&w("dcba"), &guess);

    let pruned = prune(&dictionary, &guess, pattern);
    assert_eq!(pruned, brute_force(&dictionary, &guess, pattern));
    assert_eq!(pruned, words(&["dcba"]));
}

#[test]
fn test_duplicate_letter_edge_case() {
    let set = words(&["later", "geese", "eerie", "tenet", "sheep", "elder"]);
    let guess = w("geese");
    let pattern = FeedbackPattern::new(&[N, E, E, N, E]);

    let pruned = prune(&set, &guess, pattern);
    assert!(pruned.contains(&w("later")));
    assert_eq!(pruned, brute_force(&set, &guess, pattern));
}

#[test]
fn test_contradictory_feedback_is_empty() {
    let set = words(&["crane", "slate", "trace"]);
    assert!(prune(&set, &w("zzzzz"), FeedbackPattern::all_here(5)).is_empty());
    // The only unmatched position cannot hold the E elsewhere.
    let pattern = FeedbackPattern::new(&[H, H, H, H, E]);
    assert!(prune(&set, &w("crane"), pattern).is_empty());
}

#[test]
fn test_preserves_order_and_input() {
    let set = words(&["trace", "crate", "crane", "grace"]);
    let guess = w("brace");
    let pattern = feedback(&w("grace"), &guess);
    let pruned = prune(&set, &guess, pattern);
    assert_eq!(pruned, words(&["trace", "grace"]));
    assert_eq!(set.len(), 4);
}

#[test]
fn test_exact_against_evaluator() {
    let dictionary = load_dictionary().unwrap();
    let set: Vec<Word> = dictionary.iter().step_by(7).cloned().collect();

    for guess in dictionary.iter().step_by(31) {
        for word in dictionary.iter().step_by(13) {
            let pattern = feedback(word, guess);
            let pruned = prune(&set, guess, pattern);
            assert_eq!(pruned, brute_force(&set, guess, pattern), "{guess} / {word}");
            assert_eq!(prune_count(&set, guess, pattern), pruned.len());
        }
    }
}

#[test]
fn test_never_excludes_consistent_word() {
    let dictionary = load_dictionary().unwrap();
    for guess in dictionary.iter().step_by(53) {
        for target in dictionary.iter().step_by(29) {
            let pruned = prune(&dictionary, guess, feedback(target, guess));
            assert!(pruned.contains(target), "{target} dropped by {guess}");
        }
    }
}

#[test]
fn test_every_pattern_matches_evaluator() {
    // Includes patterns no word can produce.
    let set = words(&["abba", "baab", "aabb", "abab", "bbaa", "baba", "abcd", "dcba", "aaaa"]);
    let guess = w("abab");
    for code in 0..81u32 {
        let symbols: Vec<Feedback> = (0..4)
            .map(|i| match code / 3u32.pow(i) % 3 {
                0 => N,
                1 => E,
                _ => H,
            })
            .collect();
        let pattern = FeedbackPattern::new(&symbols);
        assert_eq!(
            prune(&set, &guess, pattern),
            brute_force(&set, &guess, pattern),
            "{pattern}"
        );
    }
}

#[test]
fn test_idempotent() {
    let dictionary = load_dictionary().unwrap();
    let guess = w("alert");
    for target in dictionary.iter().step_by(41) {
        let pattern = feedback(target, &guess);
        let once = prune(&dictionary, &guess, pattern);
        let twice = prune(&once, &guess, pattern);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_monotonic_shrinkage() {
    let dictionary = load_dictionary().unwrap();
    let mut set = dictionary.clone();
    let target = w("zebra");
    for guess in ["alert", "crane", "beard"] {
        let guess = w(guess);
        let pruned = prune(&set, &guess, feedback(&target, &guess));
        assert!(pruned.len() <= set.len());
        assert!(pruned.contains(&target));
        set = pruned;
    }
}

#[test]
#[should_panic(expected = "same length")]
fn test_feedback_length_mismatch_panics() {
    let set = words(&["crane"]);
    prune(&set, &w("crane"), FeedbackPattern::all_here(4));
}

#[test]
#[should_panic(expected = "same length")]
fn test_word_length_mismatch_panics() {
    let set = words(&["crane", "cranes"]);
    prune(&set, &w("crane"), FeedbackPattern::all_here(5));
}
