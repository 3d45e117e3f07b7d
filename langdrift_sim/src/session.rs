// Game session: draw a sentence, fan it out to groups, run turns, score.
//
// Lifecycle:
// 1. `new_sentence` (or `set_sentence`) fixes the original sentence and its
//    inventory. Doing so discards any groups and logs from a previous game.
// 2. `start` validates the config, creates `group_count` groups with ids
//    1..=N, each with a child RNG forked from the session RNG, and runs
//    `turn_count` turns.
// 3. `run_turn` can be called again afterwards to keep drifting.
// 4. `score` compares a guess with the original.
//
// Each turn draws one rule uniformly from the active rules and applies it
// to every group in id order. The rule is shared; the letters and words it
// picks come from each group's own RNG.

use crate::config::SessionConfig;
use crate::event::TurnLog;
use crate::group::{GroupId, LanguageGroup};
use crate::lang::{Corpus, Inventory, LanguageDefinition, PickedSentence, SampleExhausted};
use crate::lang::{SentenceBounds, pick_sentence};
use crate::prng::DriftRng;
use crate::rules::Rule;
use crate::scoring::{self, Score};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no sentence has been drawn")]
    NoSentence,
    #[error("no implemented rule is enabled")]
    NoActiveRules,
    #[error("group count must be at least 1")]
    InvalidGroupCount,
    #[error("turn count must be at least 1")]
    InvalidTurnCount,
    #[error(transparent)]
    Sampling(#[from] SampleExhausted),
    #[error("the session has not been started")]
    NotStarted,
}

/// Where a group ended up after `start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: GroupId,
    pub sentence: String,
    pub turns: usize,
}

#[derive(Clone, Debug)]
struct Original {
    picked: PickedSentence,
    inventory: Inventory,
}

pub struct GameSession {
    language: LanguageDefinition,
    rng: DriftRng,
    original: Option<Original>,
    groups: Vec<LanguageGroup>,
    active_rules: Vec<Rule>,
    turn: u32,
    log: Vec<TurnLog>,
}

impl GameSession {
    pub fn new(language: LanguageDefinition, seed: u64) -> Self {
        Self {
            language,
            rng: DriftRng::new(seed),
            original: None,
            groups: Vec::new(),
            active_rules: Vec::new(),
            turn: 0,
            log: Vec::new(),
        }
    }

    /// Sample the original sentence from `corpus`.
    pub fn new_sentence(
        &mut self,
        corpus: &Corpus,
        bounds: &SentenceBounds,
    ) -> Result<&PickedSentence, SessionError> {
        let picked = pick_sentence(corpus, bounds, &mut self.rng)?;
        Ok(self.install(picked))
    }

    /// Use a caller-chosen original sentence.
    pub fn set_sentence(&mut self, sentence: &str) -> &PickedSentence {
        self.install(PickedSentence::from_sentence(sentence))
    }

    fn install(&mut self, picked: PickedSentence) -> &PickedSentence {
        let inventory = Inventory::of(&picked.sentence, &self.language);
        debug!(
            words = picked.word_count,
            vowels = %inventory.vowels,
            consonants = %inventory.consonants,
            "original sentence set"
        );
        self.groups.clear();
        self.active_rules.clear();
        self.log.clear();
        self.turn = 0;
        &self.original.insert(Original { picked, inventory }).picked
    }

    /// Create the groups and run the configured number of turns.
    pub fn start(&mut self, config: &SessionConfig) -> Result<Vec<GroupSummary>, SessionError> {
        let original = self.original.as_ref().ok_or(SessionError::NoSentence)?;
        if config.group_count == 0 {
            return Err(SessionError::InvalidGroupCount);
        }
        if config.turn_count == 0 {
            return Err(SessionError::InvalidTurnCount);
        }
        let active_rules = config.active_rules();
        if active_rules.is_empty() {
            return Err(SessionError::NoActiveRules);
        }

        self.groups = (1..=config.group_count)
            .map(|n| {
                LanguageGroup::new(
                    GroupId(n),
                    original.picked.sentence.clone(),
                    original.inventory.clone(),
                    self.language.clone(),
                    self.rng.fork(),
                )
            })
            .collect();
        self.active_rules = active_rules;
        self.log.clear();
        self.turn = 0;

        info!(
            groups = config.group_count,
            turns = config.turn_count,
            rules = ?self.active_rules,
            "session started"
        );
        for _ in 0..config.turn_count {
            self.run_turn()?;
        }
        let changed = self.log.iter().filter(|log| log.changed()).count();
        info!(
            turns = self.turn,
            changed,
            no_ops = self.log.len() - changed,
            "session finished"
        );
        Ok(self.summaries())
    }

    /// Draw one rule and apply it to every group.
    pub fn run_turn(&mut self) -> Result<Rule, SessionError> {
        if self.groups.is_empty() {
            return Err(SessionError::NotStarted);
        }
        let rule = *self
            .rng
            .choose(&self.active_rules)
            .ok_or(SessionError::NoActiveRules)?;
        self.turn += 1;
        debug!(turn = self.turn, %rule, "turn");
        for group in &mut self.groups {
            self.log.push(group.apply_rule(rule));
        }
        Ok(rule)
    }

    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .map(|group| GroupSummary {
                id: group.id(),
                sentence: group.current_sentence().to_string(),
                turns: group.turns_applied(),
            })
            .collect()
    }

    /// Score a guess against the original sentence.
    pub fn score(&self, guess: &str) -> Result<Score, SessionError> {
        let original = self.original.as_ref().ok_or(SessionError::NoSentence)?;
        Ok(scoring::score(guess, &original.picked.words))
    }

    pub fn original(&self) -> Option<&PickedSentence> {
        self.original.as_ref().map(|o| &o.picked)
    }

    pub fn original_inventory(&self) -> Option<&Inventory> {
        self.original.as_ref().map(|o| &o.inventory)
    }

    pub fn groups(&self) -> &[LanguageGroup] {
        &self.groups
    }

    /// Every turn log so far, turn by turn, groups in id order.
    pub fn log(&self) -> &[TurnLog] {
        &self.log
    }

    /// Turns run since `start`.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn language(&self) -> &LanguageDefinition {
        &self.language
    }
}
