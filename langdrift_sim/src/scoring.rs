// Guess scoring.
//
// The guess is tokenized with the default punctuation exclusion and
// compared position by position with the original sentence's words,
// ignoring case (full Unicode lower-casing, so "ÉTÉ" matches "été"). Guess
// words past the end of the original are wrong; original words the guess
// never reaches count against it through `total`. The score is the fraction
// of original words matched, scaled to 0..=10, so extra words cost nothing
// there; only a guess of exactly the original words is perfect.
//
// Each verdict keeps the byte span of its word in the guess so a front end
// can mark the guess in place.

use crate::lang::{DEFAULT_EXCLUDED, word_spans};
use serde::{Deserialize, Serialize};

/// One guess word and whether it matched the original at its position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordVerdict {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// One entry per guess word, in order.
    pub verdicts: Vec<WordVerdict>,
    pub matches: usize,
    /// Word count of the original sentence.
    pub total: usize,
}

impl Score {
    /// `matches / total * 10`, or 0 for an empty original.
    pub fn value(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches as f64 / self.total as f64 * 10.0
        }
    }

    /// Every original word matched and the guess has no extra words.
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.matches == self.total && self.verdicts.len() == self.total
    }

    pub fn correctness(&self) -> Vec<bool> {
        self.verdicts.iter().map(|v| v.correct).collect()
    }
}

/// Score `guess` against the original sentence's words.
pub fn score<S: AsRef<str>>(guess: &str, original_words: &[S]) -> Score {
    let verdicts: Vec<WordVerdict> = word_spans(guess, Some(DEFAULT_EXCLUDED))
        .into_iter()
        .enumerate()
        .map(|(i, span)| WordVerdict {
            text: span.text.to_string(),
            start: span.start,
            end: span.end,
            correct: original_words
                .get(i)
                .is_some_and(|word| same_word(word.as_ref(), span.text)),
        })
        .collect();
    let matches = verdicts.iter().filter(|v| v.correct).count();
    Score {
        verdicts,
        matches,
        total: original_words.len(),
    }
}

fn same_word(original: &str, guessed: &str) -> bool {
    original.to_lowercase() == guessed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: [&str; 3] = ["le", "chat", "noir"];

    #[test]
    fn partial_match() {
        let result = score("le chien noir", &ORIGINAL);
        assert_eq!(result.correctness(), vec![true, false, true]);
        assert_eq!(result.matches, 2);
        assert!((result.value() - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", result.value()), "6.7");
        assert!(!result.is_perfect());
    }

    #[test]
    fn short_guess_counts_missing_words() {
        let result = score("le", &ORIGINAL);
        assert_eq!(result.correctness(), vec![true]);
        assert_eq!(result.total, 3);
        assert!((result.value() - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn long_guess_extra_words_are_wrong() {
        let result = score("le chat noir dort", &ORIGINAL);
        assert_eq!(result.correctness(), vec![true, true, true, false]);
        assert_eq!(result.matches, result.total);
        assert_eq!(result.value(), 10.0);
        assert!(!result.is_perfect());
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let result = score("Le CHAT, noir !", &ORIGINAL);
        assert_eq!(result.matches, 3);
        let accented = score("ÉTÉ", &["été"]);
        assert!(accented.is_perfect());
    }

    #[test]
    fn verdict_spans_point_into_guess() {
        let guess = "le  chien noir";
        let result = score(guess, &ORIGINAL);
        for verdict in &result.verdicts {
            assert_eq!(&guess[verdict.start..verdict.end], verdict.text);
        }
    }

    #[test]
    fn empty_original_scores_zero() {
        let empty: [&str; 0] = [];
        let result = score("quelque chose", &empty);
        assert_eq!(result.value(), 0.0);
        assert!(!result.is_perfect());
        assert_eq!(score("", &ORIGINAL).value(), 0.0);
    }
}
