// Mutation rules: pure sentence transformations.
//
// Every rule takes the current sentence, the group's language definition
// and inventory, and the group's RNG, and returns a fresh `Mutation`. A
// rule never touches the caller's inventory; on `Applied` it hands back the
// updated inventory and the group overwrites its own copy. `NoOp` means no
// eligible target existed. That is an ordinary outcome, not an error.
//
// Rule catalogue:
// - `VowelShiftAll` / `ConsonantShiftAll`: pick a letter present in the
//   inventory and a target from the full alphabet, then rewrite every
//   occurrence of the letter and of its alternates across the sentence.
// - `VowelShiftSingle` / `ConsonantShiftSingle`: same, but only inside one
//   randomly chosen word that contains a letter of that kind. The rewrite
//   is confined to the word's byte span, so every other word stays
//   byte-identical.
// - `Swap`: exchange two adjacent whitespace-delimited words, provided both
//   tokenize to exactly themselves (no punctuation riding along).
// - `LetterShiftAll`, `LetterShiftSingle`, `Deletion`: reserved names with
//   no behavior yet. They always return `NoOp(NotImplemented)` and are never
//   drawn by the session (`Rule::is_implemented`).
//
// Inventory update, shared by both shift families: the source letter leaves
// the inventory only if it no longer occurs anywhere in the new sentence,
// and the target letter joins it if it is not there yet. For the sentence-wide
// shifts this is exactly "remove source, add target", and it keeps the
// letter when source and target happen to coincide.
//
// Case is preserved through `alphabet::match_case`: shifting 'e' to 'o'
// turns "École" into "Ocole".

use crate::lang::alphabet::match_case;
use crate::lang::{
    DEFAULT_EXCLUDED, Inventory, LanguageDefinition, LetterKind, LetterSet, contains_letter,
    word_spans, words_of,
};
use crate::prng::DriftRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rule set, by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rule {
    VowelShiftAll,
    ConsonantShiftAll,
    VowelShiftSingle,
    ConsonantShiftSingle,
    LetterShiftAll,
    LetterShiftSingle,
    Deletion,
    Swap,
}

impl Rule {
    /// Every rule, in a fixed order.
    pub const ALL: [Rule; 8] = [
        Rule::VowelShiftAll,
        Rule::ConsonantShiftAll,
        Rule::VowelShiftSingle,
        Rule::ConsonantShiftSingle,
        Rule::LetterShiftAll,
        Rule::LetterShiftSingle,
        Rule::Deletion,
        Rule::Swap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::VowelShiftAll => "VowelShiftAll",
            Rule::ConsonantShiftAll => "ConsonantShiftAll",
            Rule::VowelShiftSingle => "VowelShiftSingle",
            Rule::ConsonantShiftSingle => "ConsonantShiftSingle",
            Rule::LetterShiftAll => "LetterShiftAll",
            Rule::LetterShiftSingle => "LetterShiftSingle",
            Rule::Deletion => "Deletion",
            Rule::Swap => "Swap",
        }
    }

    pub fn from_name(name: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Whether the rule has behavior and may be drawn by a session.
    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            Rule::LetterShiftAll | Rule::LetterShiftSingle | Rule::Deletion
        )
    }

    /// Run the rule against `sentence`.
    pub fn apply(
        self,
        sentence: &str,
        language: &LanguageDefinition,
        inventory: &Inventory,
        rng: &mut DriftRng,
    ) -> Mutation {
        match self {
            Rule::VowelShiftAll => shift_all(LetterKind::Vowel, sentence, language, inventory, rng),
            Rule::ConsonantShiftAll => {
                shift_all(LetterKind::Consonant, sentence, language, inventory, rng)
            }
            Rule::VowelShiftSingle => {
                shift_single(LetterKind::Vowel, sentence, language, inventory, rng)
            }
            Rule::ConsonantShiftSingle => {
                shift_single(LetterKind::Consonant, sentence, language, inventory, rng)
            }
            Rule::Swap => swap(sentence, inventory, rng),
            Rule::LetterShiftAll | Rule::LetterShiftSingle | Rule::Deletion => {
                Mutation::NoOp(NoOpReason::NotImplemented)
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an applied rule changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    /// `from` (with its alternates) became `to`. `word` is the affected word
    /// before mutation, for single-word shifts.
    LetterShift {
        kind: LetterKind,
        from: char,
        to: char,
        word: Option<String>,
    },
    /// The words at `position` and its neighbour traded places.
    Swap {
        position: usize,
        first: String,
        second: String,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::LetterShift {
                from,
                to,
                word: None,
                ..
            } => write!(f, "'{from}' -> '{to}'"),
            Change::LetterShift {
                from,
                to,
                word: Some(word),
                ..
            } => write!(f, "'{from}' -> '{to}' in word \"{word}\""),
            Change::Swap { first, second, .. } => {
                write!(f, "swapped \"{first}\" and \"{second}\"")
            }
        }
    }
}

/// Why a rule left the sentence unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoOpReason {
    /// The inventory holds no letter of this kind.
    NoLetter(LetterKind),
    /// No word contains a letter of this kind.
    NoWord(LetterKind),
    /// No two adjacent words are both free of punctuation.
    NoSwappablePair,
    /// The rule is a reserved placeholder.
    NotImplemented,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoOpReason::NoLetter(kind) => write!(f, "no {kind} to shift"),
            NoOpReason::NoWord(kind) => write!(f, "no word containing a {kind}"),
            NoOpReason::NoSwappablePair => f.write_str("no adjacent pair of clean words"),
            NoOpReason::NotImplemented => f.write_str("rule not implemented"),
        }
    }
}

/// A successful mutation: the new sentence and its inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub sentence: String,
    pub inventory: Inventory,
    pub change: Change,
}

/// Result of running a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    Applied(Applied),
    NoOp(NoOpReason),
}

// ---------------------------------------------------------------------------
// Letter shifts
// ---------------------------------------------------------------------------

/// Shift one letter everywhere in the sentence.
pub fn shift_all(
    kind: LetterKind,
    sentence: &str,
    language: &LanguageDefinition,
    inventory: &Inventory,
    rng: &mut DriftRng,
) -> Mutation {
    let Some(&from) = rng.choose(inventory.letters(kind).as_slice()) else {
        return Mutation::NoOp(NoOpReason::NoLetter(kind));
    };
    let Some(&to) = rng.choose(language.alphabet(kind)) else {
        return Mutation::NoOp(NoOpReason::NoLetter(kind));
    };

    let shifted = replace_letter(sentence, from, to, language);
    let inventory = updated_inventory(inventory, kind, from, to, &shifted, language);
    Mutation::Applied(Applied {
        sentence: shifted,
        inventory,
        change: Change::LetterShift {
            kind,
            from,
            to,
            word: None,
        },
    })
}

/// Shift one letter inside a single word.
pub fn shift_single(
    kind: LetterKind,
    sentence: &str,
    language: &LanguageDefinition,
    inventory: &Inventory,
    rng: &mut DriftRng,
) -> Mutation {
    let candidates: Vec<_> = word_spans(sentence, Some(DEFAULT_EXCLUDED))
        .into_iter()
        .filter_map(|span| {
            let letters = letters_of_kind(span.text, kind, language);
            (!letters.is_empty()).then_some((span, letters))
        })
        .collect();
    let Some((span, letters)) = rng.choose(&candidates) else {
        return Mutation::NoOp(NoOpReason::NoWord(kind));
    };
    let Some(&from) = rng.choose(letters.as_slice()) else {
        return Mutation::NoOp(NoOpReason::NoWord(kind));
    };
    let Some(&to) = rng.choose(language.alphabet(kind)) else {
        return Mutation::NoOp(NoOpReason::NoLetter(kind));
    };

    let mut shifted = String::with_capacity(sentence.len());
    shifted.push_str(&sentence[..span.start]);
    shifted.push_str(&replace_letter(span.text, from, to, language));
    shifted.push_str(&sentence[span.end..]);

    let inventory = updated_inventory(inventory, kind, from, to, &shifted, language);
    Mutation::Applied(Applied {
        sentence: shifted,
        inventory,
        change: Change::LetterShift {
            kind,
            from,
            to,
            word: Some(span.text.to_string()),
        },
    })
}

/// Replace `from` and its alternates with `to`, preserving case.
fn replace_letter(
    text: &str,
    from: char,
    to: char,
    language: &LanguageDefinition,
) -> String {
    text.chars()
        .map(|c| {
            if language.resolves_to(c, from) {
                match_case(c, to)
            } else {
                c
            }
        })
        .collect()
}

fn letters_of_kind(text: &str, kind: LetterKind, language: &LanguageDefinition) -> LetterSet {
    text.chars()
        .filter_map(|c| language.canonical_of(c))
        .filter(|&(_, k)| k == kind)
        .map(|(letter, _)| letter)
        .collect()
}

fn updated_inventory(
    inventory: &Inventory,
    kind: LetterKind,
    from: char,
    to: char,
    sentence: &str,
    language: &LanguageDefinition,
) -> Inventory {
    let mut updated = inventory.clone();
    let letters = updated.letters_mut(kind);
    if !contains_letter(sentence, from, language) {
        letters.remove(from);
    }
    if contains_letter(sentence, to, language) {
        letters.insert(to);
    }
    updated
}

// ---------------------------------------------------------------------------
// Word swap
// ---------------------------------------------------------------------------

/// Swap two adjacent punctuation-free words.
///
/// Position `p` pairs with `p + 1`, except the last position, which pairs
/// with the one before it. The result is re-joined with single spaces.
pub fn swap(sentence: &str, inventory: &Inventory, rng: &mut DriftRng) -> Mutation {
    let mut segments: Vec<&str> = sentence.split_whitespace().collect();
    let n = segments.len();
    if n < 2 {
        return Mutation::NoOp(NoOpReason::NoSwappablePair);
    }
    let clean: Vec<bool> = segments.iter().copied().map(is_clean_word).collect();
    let eligible: Vec<usize> = (0..n)
        .filter(|&p| clean[p] && clean[neighbour(p, n)])
        .collect();
    let Some(&position) = rng.choose(&eligible) else {
        return Mutation::NoOp(NoOpReason::NoSwappablePair);
    };

    let other = neighbour(position, n);
    let first = segments[position].to_string();
    let second = segments[other].to_string();
    segments.swap(position, other);
    Mutation::Applied(Applied {
        sentence: segments.join(" "),
        inventory: inventory.clone(),
        change: Change::Swap {
            position,
            first,
            second,
        },
    })
}

fn neighbour(position: usize, len: usize) -> usize {
    if position + 1 < len {
        position + 1
    } else {
        position - 1
    }
}

/// A raw segment that tokenizes to exactly itself.
fn is_clean_word(segment: &str) -> bool {
    words_of(segment, Some(DEFAULT_EXCLUDED)) == [segment]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{AlternateMode, default_language};

    fn applied(mutation: Mutation) -> Applied {
        match mutation {
            Mutation::Applied(applied) => applied,
            Mutation::NoOp(reason) => panic!("expected a change, got no-op: {reason}"),
        }
    }

    /// A language with a single vowel target, so shifts are predictable.
    fn two_vowels() -> LanguageDefinition {
        LanguageDefinition::new(
            "test",
            ['e', 'o'],
            ['c', 'h', 't', 'l', 'd', 'r'],
            [('e', vec!['é', 'è'])],
            AlternateMode::Merged,
        )
        .unwrap()
    }

    #[test]
    fn test_rule_names_roundtrip() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(Rule::from_name("Metathesis"), None);
    }

    #[test]
    fn test_placeholders_are_not_implemented() {
        let implemented: Vec<Rule> = Rule::ALL
            .into_iter()
            .filter(|r| r.is_implemented())
            .collect();
        assert_eq!(
            implemented,
            vec![
                Rule::VowelShiftAll,
                Rule::ConsonantShiftAll,
                Rule::VowelShiftSingle,
                Rule::ConsonantShiftSingle,
                Rule::Swap,
            ]
        );
        let language = default_language();
        let inventory = Inventory::of("le chat", &language);
        let mut rng = DriftRng::new(1);
        for rule in [
            Rule::LetterShiftAll,
            Rule::LetterShiftSingle,
            Rule::Deletion,
        ] {
            assert_eq!(
                rule.apply("le chat", &language, &inventory, &mut rng),
                Mutation::NoOp(NoOpReason::NotImplemented)
            );
        }
    }

    #[test]
    fn test_shift_all_propagates_to_alternates() {
        let language = two_vowels();
        let sentence = "été et thé";
        let mut inventory = Inventory::of(sentence, &language);
        assert_eq!(inventory.vowels.as_slice(), &['e']);
        // Force the source: only 'e' is present. Retry seeds until the
        // target is 'o' so the result is checkable.
        for seed in 0..64 {
            let mut rng = DriftRng::new(seed);
            let result = applied(shift_all(
                LetterKind::Vowel,
                sentence,
                &language,
                &inventory,
                &mut rng,
            ));
            let Change::LetterShift { from, to, .. } = result.change else {
                panic!("unexpected change");
            };
            assert_eq!(from, 'e');
            if to == 'o' {
                assert_eq!(result.sentence, "oto ot tho");
                assert!(!result.sentence.contains('e'));
                assert!(!result.sentence.contains('é'));
                assert_eq!(result.inventory.vowels.as_slice(), &['o']);
                inventory = result.inventory;
                break;
            }
        }
        assert_eq!(inventory.vowels.as_slice(), &['o'], "no seed drew 'o'");
    }

    #[test]
    fn test_shift_all_to_same_letter_keeps_inventory() {
        let language = two_vowels();
        let sentence = "été";
        let inventory = Inventory::of(sentence, &language);
        for seed in 0..64 {
            let mut rng = DriftRng::new(seed);
            let result = applied(shift_all(
                LetterKind::Vowel,
                sentence,
                &language,
                &inventory,
                &mut rng,
            ));
            if let Change::LetterShift { to: 'e', .. } = result.change {
                assert_eq!(result.sentence, "ete");
                assert_eq!(result.inventory, inventory);
                return;
            }
        }
        panic!("no seed drew 'e' as target");
    }

    #[test]
    fn test_shift_all_preserves_case() {
        let language = two_vowels();
        let sentence = "École";
        let inventory = Inventory::of(sentence, &language);
        for seed in 0..64 {
            let mut rng = DriftRng::new(seed);
            let result = applied(shift_all(
                LetterKind::Vowel,
                sentence,
                &language,
                &inventory,
                &mut rng,
            ));
            if let Change::LetterShift { from, to, .. } = result.change
                && (from, to) == ('e', 'o')
            {
                assert_eq!(result.sentence, "Ocolo");
                return;
            }
        }
        panic!("no seed drew 'e' -> 'o'");
    }

    #[test]
    fn test_shift_all_without_letters_is_noop() {
        let language = default_language();
        let inventory = Inventory::of("123 !", &language);
        let mut rng = DriftRng::new(5);
        assert_eq!(
            shift_all(LetterKind::Vowel, "123 !", &language, &inventory, &mut rng),
            Mutation::NoOp(NoOpReason::NoLetter(LetterKind::Vowel))
        );
    }

    #[test]
    fn test_shift_single_touches_one_word() {
        let language = default_language();
        let sentence = "le chat dort";
        let inventory = Inventory::of(sentence, &language);
        for seed in 0..200 {
            let mut rng = DriftRng::new(seed);
            let result = applied(shift_single(
                LetterKind::Vowel,
                sentence,
                &language,
                &inventory,
                &mut rng,
            ));
            let Change::LetterShift { word, .. } = &result.change else {
                panic!("unexpected change");
            };
            let word = word.as_ref().expect("single shift must name its word");
            let before = words_of(sentence, Some(DEFAULT_EXCLUDED));
            let after = words_of(&result.sentence, Some(DEFAULT_EXCLUDED));
            assert_eq!(before.len(), after.len());
            for (b, a) in before.iter().zip(&after) {
                if *b != word.as_str() {
                    assert_eq!(b, a, "word other than {word:?} changed (seed {seed})");
                }
            }
            assert_eq!(result.inventory, Inventory::of(&result.sentence, &language));
        }
    }

    #[test]
    fn test_shift_single_keeps_source_still_used_elsewhere() {
        let language = two_vowels();
        // Both words contain 'e'; shifting one leaves 'e' in the other.
        let sentence = "le thé";
        let inventory = Inventory::of(sentence, &language);
        for seed in 0..64 {
            let mut rng = DriftRng::new(seed);
            let result = applied(shift_single(
                LetterKind::Vowel,
                sentence,
                &language,
                &inventory,
                &mut rng,
            ));
            if let Change::LetterShift { to: 'o', .. } = result.change {
                assert!(result.inventory.vowels.contains('e'));
                assert!(result.inventory.vowels.contains('o'));
                assert!(result.sentence == "lo thé" || result.sentence == "le tho");
                return;
            }
        }
        panic!("no seed drew 'o'");
    }

    #[test]
    fn test_shift_single_without_candidate_word_is_noop() {
        let language = default_language();
        let inventory = Inventory::of("123, 456", &language);
        let mut rng = DriftRng::new(2);
        assert_eq!(
            shift_single(
                LetterKind::Consonant,
                "123, 456",
                &language,
                &inventory,
                &mut rng,
            ),
            Mutation::NoOp(NoOpReason::NoWord(LetterKind::Consonant))
        );
    }

    #[test]
    fn test_swap_is_self_inverse_on_single_pair() {
        let language = default_language();
        let sentence = "le, chat noir";
        let inventory = Inventory::of(sentence, &language);
        let mut rng = DriftRng::new(11);
        let once = applied(swap(sentence, &inventory, &mut rng));
        assert_eq!(once.sentence, "le, noir chat");
        assert_eq!(once.inventory, inventory);
        let twice = applied(swap(&once.sentence, &once.inventory, &mut rng));
        assert_eq!(twice.sentence, sentence);
    }

    #[test]
    fn test_swap_reports_words() {
        let inventory = Inventory::default();
        let mut rng = DriftRng::new(3);
        let result = applied(swap("chat noir", &inventory, &mut rng));
        assert_eq!(result.sentence, "noir chat");
        match result.change {
            Change::Swap { first, second, .. } => {
                let mut pair = [first, second];
                pair.sort();
                assert_eq!(pair, ["chat".to_string(), "noir".to_string()]);
            }
            other => panic!("unexpected change {other:?}"),
        }
    }

    #[test]
    fn test_swap_single_word_is_noop() {
        let mut rng = DriftRng::new(1);
        assert_eq!(
            swap("chat", &Inventory::default(), &mut rng),
            Mutation::NoOp(NoOpReason::NoSwappablePair)
        );
    }

    #[test]
    fn test_swap_without_clean_pair_is_noop() {
        let mut rng = DriftRng::new(1);
        assert_eq!(
            swap("oui, non, peut-être.", &Inventory::default(), &mut rng),
            Mutation::NoOp(NoOpReason::NoSwappablePair)
        );
    }

    #[test]
    fn test_swap_never_moves_punctuation_runs() {
        let mut rng = DriftRng::new(0);
        assert_eq!(
            swap("Quoi !! non", &Inventory::default(), &mut rng),
            Mutation::NoOp(NoOpReason::NoSwappablePair)
        );
        for seed in 0..32 {
            let mut rng = DriftRng::new(seed);
            let result = applied(swap("Quoi !! non merci", &Inventory::default(), &mut rng));
            assert_eq!(result.sentence, "Quoi !! merci non", "seed {seed}");
        }
    }

    #[test]
    fn test_change_display() {
        let shift = Change::LetterShift {
            kind: LetterKind::Vowel,
            from: 'e',
            to: 'o',
            word: Some("été".to_string()),
        };
        assert_eq!(shift.to_string(), "'e' -> 'o' in word \"été\"");
        assert_eq!(
            NoOpReason::NoLetter(LetterKind::Consonant).to_string(),
            "no consonant to shift"
        );
    }
}
