// Random sentence selection within a word-count range.
//
// `pick_sentence` draws uniformly from the corpus and accepts the first
// sentence whose word count (default punctuation exclusion) lies in
// `[min_words, max_words]`. It gives up after `max_attempts` draws. The
// corpus is not pre-filtered, so each draw costs one tokenization and no
// extra memory; a corpus with no qualifying sentence simply exhausts the
// budget.

use crate::corpus::Corpus;
use crate::tokenize::{DEFAULT_EXCLUDED, words_of};
use langdrift_prng::DriftRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Word-count range and retry budget for sentence sampling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentenceBounds {
    pub min_words: usize,
    pub max_words: usize,
    pub max_attempts: u32,
}

impl Default for SentenceBounds {
    fn default() -> Self {
        Self {
            min_words: 3,
            max_words: 10,
            max_attempts: 100,
        }
    }
}

impl SentenceBounds {
    pub fn contains(&self, word_count: usize) -> bool {
        (self.min_words..=self.max_words).contains(&word_count)
    }
}

/// A sampled sentence with its word tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedSentence {
    pub sentence: String,
    pub words: Vec<String>,
    pub word_count: usize,
}

impl PickedSentence {
    /// Tokenize a caller-chosen sentence the same way the sampler does.
    pub fn from_sentence(sentence: &str) -> Self {
        let words: Vec<String> = words_of(sentence, Some(DEFAULT_EXCLUDED))
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            sentence: sentence.to_string(),
            word_count: words.len(),
            words,
        }
    }
}

/// No sentence in range was found within the attempt budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no sentence in the requested word range after {attempts} draws")]
pub struct SampleExhausted {
    pub attempts: u32,
}

/// Draw sentences until one has an acceptable word count.
pub fn pick_sentence(
    corpus: &Corpus,
    bounds: &SentenceBounds,
    rng: &mut DriftRng,
) -> Result<PickedSentence, SampleExhausted> {
    if corpus.is_empty() {
        return Err(SampleExhausted { attempts: 0 });
    }
    for attempt in 1..=bounds.max_attempts {
        let sentence = &corpus.sentences()[rng.range_usize(0, corpus.len())];
        let word_count = words_of(sentence, Some(DEFAULT_EXCLUDED)).len();
        if bounds.contains(word_count) {
            debug!(attempt, word_count, "sentence picked");
            return Ok(PickedSentence::from_sentence(sentence));
        }
    }
    Err(SampleExhausted {
        attempts: bounds.max_attempts,
    })
}
