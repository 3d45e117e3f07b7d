// Language definitions: vowel and consonant alphabets plus alternate forms.
//
// A `LanguageDefinition` says which characters are canonical vowels, which
// are canonical consonants, and how diacritic or stylistic alternates map
// back to their base letter ("é" -> "e", "ç" -> "c"). It is loaded once from
// JSON (`from_json`) or built directly (`new`), validated, and then treated
// as read-only data; each language group owns its own clone.
//
// Two alternate modes exist:
// - `Merged`: alternates resolve to their canonical letter. Shifting "e"
//   also rewrites "é", and "é" counts as an "e" in the inventory.
// - `Independent`: alternates are promoted to full letters of their base
//   letter's alphabet, and the alternate maps are left empty.
//
// Case handling lives here too (`fold_case`, `match_case`) because every
// consumer must fold characters the same way: inventories, mutation rules
// and the tests that check them against each other.
//
// See also: `inventory.rs` for the per-sentence letter sets computed from a
// definition, and `data/french.json` for the embedded default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Which alphabet a letter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterKind {
    Vowel,
    Consonant,
}

impl LetterKind {
    pub fn label(self) -> &'static str {
        match self {
            LetterKind::Vowel => "vowel",
            LetterKind::Consonant => "consonant",
        }
    }
}

impl fmt::Display for LetterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How alternate letterforms are treated when a definition is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlternateMode {
    /// Alternates are variants of their canonical letter.
    #[default]
    Merged,
    /// Alternates are letters in their own right.
    Independent,
}

/// Reasons a language definition is rejected.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("invalid language JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {0:?} is not a single character")]
    NotASingleLetter(String),

    #[error("letter '{0}' is listed more than once")]
    DuplicateLetter(char),

    #[error("letter '{0}' is listed as both a vowel and a consonant")]
    OverlappingLetter(char),

    #[error("alternates declared for '{base}', which is neither a vowel nor a consonant")]
    OrphanAlternate { base: char },

    #[error("alternate '{alternate}' is declared for both '{first}' and '{second}'")]
    AmbiguousAlternate {
        alternate: char,
        first: char,
        second: char,
    },

    #[error("alternate '{0}' is also a canonical letter")]
    AlternateIsCanonical(char),

    #[error("the {0} alphabet is empty")]
    EmptyAlphabet(LetterKind),
}

/// On-disk shape of a language file.
#[derive(Debug, Deserialize)]
struct LanguageFile {
    #[serde(default)]
    name: Option<String>,
    vowels: Vec<String>,
    consonants: Vec<String>,
    #[serde(default)]
    alterations: BTreeMap<String, Vec<String>>,
}

/// A validated alphabet with its alternate-form maps.
///
/// Invariants (checked at construction): no letter is both a vowel and a
/// consonant, every alternate resolves to exactly one canonical letter, and
/// the two alternate maps are mutual inverses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageDefinition {
    name: String,
    vowels: Vec<char>,
    consonants: Vec<char>,
    alternate_to_canonical: BTreeMap<char, char>,
    canonical_to_alternates: BTreeMap<char, Vec<char>>,
}

impl LanguageDefinition {
    /// Build and validate a definition. Letters are lower-cased first.
    pub fn new<V, C, A>(
        name: &str,
        vowels: V,
        consonants: C,
        alterations: A,
        mode: AlternateMode,
    ) -> Result<Self, LanguageError>
    where
        V: IntoIterator<Item = char>,
        C: IntoIterator<Item = char>,
        A: IntoIterator<Item = (char, Vec<char>)>,
    {
        let mut def = LanguageDefinition {
            name: name.to_string(),
            vowels: Vec::new(),
            consonants: Vec::new(),
            alternate_to_canonical: BTreeMap::new(),
            canonical_to_alternates: BTreeMap::new(),
        };

        for (kind, letters) in [
            (LetterKind::Vowel, vowels.into_iter().collect::<Vec<_>>()),
            (LetterKind::Consonant, consonants.into_iter().collect()),
        ] {
            for letter in letters {
                let letter = fold_case(letter);
                match def.kind_of(letter) {
                    Some(existing) if existing == kind => {
                        return Err(LanguageError::DuplicateLetter(letter));
                    }
                    Some(_) => return Err(LanguageError::OverlappingLetter(letter)),
                    None => def.alphabet_mut(kind).push(letter),
                }
            }
            if def.alphabet(kind).is_empty() {
                return Err(LanguageError::EmptyAlphabet(kind));
            }
        }

        // Resolve every alternate against the canonical alphabets as they
        // stood before any Independent-mode promotion.
        let mut declared: BTreeMap<char, char> = BTreeMap::new();
        let mut promoted: Vec<(LetterKind, char, char)> = Vec::new();
        for (base, alternates) in alterations {
            let base = fold_case(base);
            let kind = def
                .kind_of(base)
                .ok_or(LanguageError::OrphanAlternate { base })?;
            for alternate in alternates {
                let alternate = fold_case(alternate);
                if let Some(&first) = declared.get(&alternate) {
                    if first == base {
                        return Err(LanguageError::DuplicateLetter(alternate));
                    }
                    return Err(LanguageError::AmbiguousAlternate {
                        alternate,
                        first,
                        second: base,
                    });
                }
                if def.kind_of(alternate).is_some() {
                    return Err(match mode {
                        AlternateMode::Merged => LanguageError::AlternateIsCanonical(alternate),
                        AlternateMode::Independent => LanguageError::DuplicateLetter(alternate),
                    });
                }
                declared.insert(alternate, base);
                promoted.push((kind, base, alternate));
            }
        }

        for (kind, base, alternate) in promoted {
            match mode {
                AlternateMode::Merged => {
                    def.alternate_to_canonical.insert(alternate, base);
                    def.canonical_to_alternates
                        .entry(base)
                        .or_default()
                        .push(alternate);
                }
                AlternateMode::Independent => def.alphabet_mut(kind).push(alternate),
            }
        }

        Ok(def)
    }

    /// Parse and validate a definition from a JSON language file.
    pub fn from_json(json: &str, mode: AlternateMode) -> Result<Self, LanguageError> {
        let file: LanguageFile = serde_json::from_str(json)?;
        let vowels = single_letters(&file.vowels)?;
        let consonants = single_letters(&file.consonants)?;
        let mut alterations = Vec::with_capacity(file.alterations.len());
        for (base, alternates) in &file.alterations {
            alterations.push((single_letter(base)?, single_letters(alternates)?));
        }
        let name = file.name.as_deref().unwrap_or("unnamed");
        Self::new(name, vowels, consonants, alterations, mode)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vowels(&self) -> &[char] {
        &self.vowels
    }

    pub fn consonants(&self) -> &[char] {
        &self.consonants
    }

    /// The full alphabet of one kind, in definition order.
    pub fn alphabet(&self, kind: LetterKind) -> &[char] {
        match kind {
            LetterKind::Vowel => &self.vowels,
            LetterKind::Consonant => &self.consonants,
        }
    }

    fn alphabet_mut(&mut self, kind: LetterKind) -> &mut Vec<char> {
        match kind {
            LetterKind::Vowel => &mut self.vowels,
            LetterKind::Consonant => &mut self.consonants,
        }
    }

    pub fn alternate_to_canonical(&self) -> &BTreeMap<char, char> {
        &self.alternate_to_canonical
    }

    pub fn canonical_to_alternates(&self) -> &BTreeMap<char, Vec<char>> {
        &self.canonical_to_alternates
    }

    /// Kind of a canonical letter. Alternates and other characters give `None`.
    pub fn kind_of(&self, letter: char) -> Option<LetterKind> {
        if self.vowels.contains(&letter) {
            Some(LetterKind::Vowel)
        } else if self.consonants.contains(&letter) {
            Some(LetterKind::Consonant)
        } else {
            None
        }
    }

    /// Resolve any sentence character (any case, possibly an alternate) to
    /// its canonical letter and kind.
    pub fn canonical_of(&self, c: char) -> Option<(char, LetterKind)> {
        let folded = fold_case(c);
        if let Some(kind) = self.kind_of(folded) {
            return Some((folded, kind));
        }
        let base = *self.alternate_to_canonical.get(&folded)?;
        self.kind_of(base).map(|kind| (base, kind))
    }

    /// Whether sentence character `c` is `letter` or one of its alternates.
    pub fn resolves_to(&self, c: char, letter: char) -> bool {
        self.canonical_of(c).is_some_and(|(base, _)| base == letter)
    }

    /// Declared alternates of a canonical letter (empty if none).
    pub fn alternates_of(&self, letter: char) -> &[char] {
        self.canonical_to_alternates
            .get(&letter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn single_letter(entry: &str) -> Result<char, LanguageError> {
    let mut chars = entry.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LanguageError::NotASingleLetter(entry.to_string())),
    }
}

fn single_letters(entries: &[String]) -> Result<Vec<char>, LanguageError> {
    entries.iter().map(|e| single_letter(e)).collect()
}

/// Lower-case a character when its lower-case form is a single character.
///
/// Characters whose lower-case mapping expands (e.g. 'İ') are returned as-is
/// so that folding never changes the length of a sentence.
pub fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Render `letter` in the case of `original`.
///
/// The upper-case form is used only when it is a single character that
/// folds back to `letter`; otherwise the lower-case letter is returned.
pub fn match_case(original: char, letter: char) -> char {
    if original.is_uppercase() {
        let mut upper = letter.to_uppercase();
        if let (Some(u), None) = (upper.next(), upper.next())
            && fold_case(u) == letter
        {
            return u;
        }
    }
    letter
}
