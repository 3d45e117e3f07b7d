// Turn logs: what a rule did to one group on one turn.
//
// Every `LanguageGroup::apply_rule` call yields exactly one `TurnLog`,
// whether or not the sentence changed. The session collects them in turn
// order (groups in id order within a turn), which is what the `drift`
// binary prints in its admin view.

use crate::group::GroupId;
use crate::rules::{Change, NoOpReason, Rule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a rule on one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Changed(Change),
    Unchanged(NoOpReason),
}

/// One group's record of one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLog {
    /// 1-based turn index within the group's history.
    pub turn: u32,
    pub group: GroupId,
    pub rule: Rule,
    pub outcome: TurnOutcome,
}

impl TurnLog {
    pub fn changed(&self) -> bool {
        matches!(self.outcome, TurnOutcome::Changed(_))
    }
}

impl fmt::Display for TurnLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Turn {} - {} - {}: ", self.turn, self.group, self.rule)?;
        match &self.outcome {
            TurnOutcome::Changed(change) => write!(f, "{change}"),
            TurnOutcome::Unchanged(reason) => write!(f, "no modification ({reason})"),
        }
    }
}
