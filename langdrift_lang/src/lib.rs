// langdrift_lang: alphabets, tokenization and letter inventories.
//
// Everything the mutation engine needs to know about text, with no
// randomness of its own beyond sentence sampling. Consumed by
// `langdrift_sim` (rules, groups, scoring). No I/O except the optional
// `Corpus::from_paths` convenience.
//
// Module overview:
// - `alphabet.rs`:  `LanguageDefinition` (vowels, consonants, alternate-form
//                   maps), validation errors, case folding helpers.
// - `tokenize.rs`:  UAX #29 word tokens with byte spans, sentence splitting.
// - `inventory.rs`: `LetterSet` / `Inventory`, the canonical letters a
//                   sentence actually uses.
// - `corpus.rs`:    `Corpus`, the immutable list of candidate sentences.
// - `sampler.rs`:   `pick_sentence` with word-count bounds and a retry budget.
//
// The default French definition is embedded from `data/french.json` with
// `include_str!`, the same way the embedded defaults are handled elsewhere
// in the workspace.
//
// **Critical constraint: determinism.** No `HashMap`, no OS entropy. All
// randomness comes through `langdrift_prng::DriftRng`.

pub mod alphabet;
pub mod corpus;
pub mod inventory;
pub mod sampler;
pub mod tokenize;

pub use alphabet::{AlternateMode, LanguageDefinition, LanguageError, LetterKind};
pub use corpus::{Corpus, CorpusError};
pub use inventory::{Inventory, LetterSet, contains_letter, vowels_and_consonants};
pub use sampler::{PickedSentence, SampleExhausted, SentenceBounds, pick_sentence};
pub use tokenize::{
    DEFAULT_EXCLUDED, WordSpan, sentences_from_text, sentences_from_texts, word_spans, words_of,
};

/// The embedded French definition, alternates merged into their base letters.
///
/// Panics if the embedded JSON is invalid, which a unit test rules out.
pub fn default_language() -> LanguageDefinition {
    default_language_with(AlternateMode::Merged)
}

/// The embedded French definition with the given alternate mode.
pub fn default_language_with(mode: AlternateMode) -> LanguageDefinition {
    let json = include_str!("../../data/french.json");
    LanguageDefinition::from_json(json, mode).expect("embedded french.json is invalid")
}
