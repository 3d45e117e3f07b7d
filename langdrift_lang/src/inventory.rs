// Letter inventories: which canonical vowels and consonants a text uses.
//
// `Inventory::of` scans a sentence once. Each character is folded to lower
// case and resolved through the language definition: canonical letters count
// as themselves, known alternates count as their canonical letter, and
// everything else (spaces, punctuation, digits, undeclared letters) is
// ignored.
//
// `LetterSet` keeps letters in first-seen order so logs are reproducible,
// but compares as a set: two inventories with the same letters are equal
// regardless of the order mutations inserted them in.

use crate::alphabet::{LanguageDefinition, LetterKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An insertion-ordered set of canonical letters.
#[derive(Clone, Debug, Default, Eq, Serialize, Deserialize)]
pub struct LetterSet {
    letters: Vec<char>,
}

impl LetterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a letter. Returns `false` if it was already present.
    pub fn insert(&mut self, letter: char) -> bool {
        if self.letters.contains(&letter) {
            false
        } else {
            self.letters.push(letter);
            true
        }
    }

    /// Remove a letter. Returns `false` if it was absent.
    pub fn remove(&mut self, letter: char) -> bool {
        match self.letters.iter().position(|&l| l == letter) {
            Some(i) => {
                self.letters.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in insertion order.
    pub fn as_slice(&self) -> &[char] {
        &self.letters
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }
}

impl PartialEq for LetterSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|l| other.contains(l))
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = LetterSet::new();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, letter) in self.letters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{letter}")?;
        }
        write!(f, "]")
    }
}

/// The canonical vowels and consonants present in a sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub vowels: LetterSet,
    pub consonants: LetterSet,
}

impl Inventory {
    /// Scan `sentence` and collect the letters it uses.
    pub fn of(sentence: &str, language: &LanguageDefinition) -> Self {
        let mut inventory = Inventory::default();
        for c in sentence.chars() {
            if let Some((letter, kind)) = language.canonical_of(c) {
                inventory.letters_mut(kind).insert(letter);
            }
        }
        inventory
    }

    pub fn letters(&self, kind: LetterKind) -> &LetterSet {
        match kind {
            LetterKind::Vowel => &self.vowels,
            LetterKind::Consonant => &self.consonants,
        }
    }

    pub fn letters_mut(&mut self, kind: LetterKind) -> &mut LetterSet {
        match kind {
            LetterKind::Vowel => &mut self.vowels,
            LetterKind::Consonant => &mut self.consonants,
        }
    }
}

/// The vowel and consonant sets of `sentence`, as a pair.
pub fn vowels_and_consonants(
    sentence: &str,
    language: &LanguageDefinition,
) -> (LetterSet, LetterSet) {
    let inventory = Inventory::of(sentence, language);
    (inventory.vowels, inventory.consonants)
}

/// Whether canonical `letter` occurs in `text`, directly or as an alternate.
pub fn contains_letter(text: &str, letter: char, language: &LanguageDefinition) -> bool {
    text.chars().any(|c| language.resolves_to(c, letter))
}
