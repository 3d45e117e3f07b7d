// A language group: one lineage of a sentence under mutation.
//
// Each group starts from the session's original sentence and inventory and
// owns its own forked `DriftRng`. `apply_rule` runs a rule against the
// current sentence and always appends to the history: the mutated sentence
// when the rule applied, a repeat of the current one when it was a no-op.
// After k rules the history therefore holds k + 1 entries, and the current
// sentence is always the last one.
//
// The inventory always describes the current sentence. Rules return a new
// inventory with their result and the group replaces its own with it; a
// no-op leaves it untouched.

use crate::event::{TurnLog, TurnOutcome};
use crate::lang::{Inventory, LanguageDefinition};
use crate::prng::DriftRng;
use crate::rules::{Mutation, Rule};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Stable 1-based group identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group {}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("unknown rule {0:?}")]
    UnknownRule(String),
}

#[derive(Clone, Debug)]
pub struct LanguageGroup {
    id: GroupId,
    /// Never empty: index 0 is the original sentence.
    history: Vec<String>,
    inventory: Inventory,
    language: LanguageDefinition,
    rng: DriftRng,
}

impl LanguageGroup {
    pub fn new(
        id: GroupId,
        sentence: String,
        inventory: Inventory,
        language: LanguageDefinition,
        rng: DriftRng,
    ) -> Self {
        Self {
            id,
            history: vec![sentence],
            inventory,
            language,
            rng,
        }
    }

    /// Apply `rule` to the current sentence and record the outcome.
    pub fn apply_rule(&mut self, rule: Rule) -> TurnLog {
        let turn = self.history.len() as u32;
        let current = &self.history[self.history.len() - 1];
        let mutation = rule.apply(current, &self.language, &self.inventory, &mut self.rng);

        let outcome = match mutation {
            Mutation::Applied(applied) => {
                self.history.push(applied.sentence);
                self.inventory = applied.inventory;
                TurnOutcome::Changed(applied.change)
            }
            Mutation::NoOp(reason) => {
                let unchanged = self.history[self.history.len() - 1].clone();
                self.history.push(unchanged);
                TurnOutcome::Unchanged(reason)
            }
        };

        let log = TurnLog {
            turn,
            group: self.id,
            rule,
            outcome,
        };
        debug!(group = self.id.0, turn, "{log}");
        log
    }

    /// Apply a rule given by name, e.g. `"Swap"`.
    pub fn apply_rule_by_name(&mut self, name: &str) -> Result<TurnLog, GroupError> {
        let rule = Rule::from_name(name)
            .ok_or_else(|| GroupError::UnknownRule(name.to_string()))?;
        Ok(self.apply_rule(rule))
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Every sentence this group has held, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current_sentence(&self) -> &str {
        &self.history[self.history.len() - 1]
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn language(&self) -> &LanguageDefinition {
        &self.language
    }

    pub fn turns_applied(&self) -> usize {
        self.history.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::default_language;
    use crate::rules::NoOpReason;

    fn group(sentence: &str, seed: u64) -> LanguageGroup {
        let language = default_language();
        let inventory = Inventory::of(sentence, &language);
        LanguageGroup::new(
            GroupId(1),
            sentence.to_string(),
            inventory,
            language,
            DriftRng::new(seed),
        )
    }

    #[test]
    fn test_history_grows_on_every_turn() {
        let mut g = group("le vieux chien dort", 42);
        assert_eq!(g.history().len(), 1);
        g.apply_rule(Rule::VowelShiftAll);
        g.apply_rule(Rule::Deletion);
        g.apply_rule(Rule::Swap);
        assert_eq!(g.history().len(), 4);
        assert_eq!(g.turns_applied(), 3);
        assert_eq!(g.current_sentence(), g.history()[3]);
    }

    #[test]
    fn test_no_op_repeats_sentence_and_keeps_inventory() {
        let mut g = group("chat", 1);
        let before = g.inventory().clone();
        let log = g.apply_rule(Rule::Swap);
        assert_eq!(
            log.outcome,
            TurnOutcome::Unchanged(NoOpReason::NoSwappablePair)
        );
        assert_eq!(log.turn, 1);
        assert_eq!(g.history(), &["chat".to_string(), "chat".to_string()]);
        assert_eq!(g.inventory(), &before);
    }

    #[test]
    fn test_inventory_tracks_current_sentence() {
        let mut g = group("Nous fûmes entourées d'une étrange lueur.", 7);
        for rule in [
            Rule::VowelShiftAll,
            Rule::ConsonantShiftSingle,
            Rule::VowelShiftSingle,
            Rule::ConsonantShiftAll,
            Rule::Swap,
        ] {
            g.apply_rule(rule);
            let rescanned = Inventory::of(g.current_sentence(), g.language());
            assert_eq!(g.inventory(), &rescanned, "after {rule}");
        }
    }

    #[test]
    fn test_turn_numbers_count_up() {
        let mut g = group("le chat noir", 3);
        let turns: Vec<u32> = (0..4).map(|_| g.apply_rule(Rule::Swap).turn).collect();
        assert_eq!(turns, vec![1, 2, 3, 4]);
        assert!(g.history().iter().all(|s| s.split(' ').count() == 3));
    }

    #[test]
    fn test_apply_rule_by_name() {
        let mut g = group("le chat noir", 3);
        let log = g.apply_rule_by_name("Swap").unwrap();
        assert_eq!(log.rule, Rule::Swap);
        assert_eq!(
            g.apply_rule_by_name("Metathesis"),
            Err(GroupError::UnknownRule("Metathesis".to_string()))
        );
        assert_eq!(g.turns_applied(), 1);
    }

    #[test]
    fn test_same_seed_same_lineage() {
        let mut a = group("le vieux chien noir dort au soleil", 99);
        let mut b = group("le vieux chien noir dort au soleil", 99);
        for rule in [Rule::VowelShiftSingle, Rule::ConsonantShiftAll, Rule::Swap] {
            assert_eq!(a.apply_rule(rule), b.apply_rule(rule));
        }
        assert_eq!(a.history(), b.history());
    }
}
