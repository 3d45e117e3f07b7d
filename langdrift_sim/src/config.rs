// Session configuration.
//
// `SessionConfig` holds the tunables of one game: how many groups, how many
// turns, which rules may be drawn, and the sentence bounds used when the
// session samples its sentence. It is loaded from JSON; every field has a
// default, so `{}` is a valid config. When the `rules` map is given it
// replaces the default map entirely: rules it omits are disabled.
//
// Example:
//
//     {
//       "group_count": 4,
//       "turn_count": 6,
//       "rules": { "VowelShiftAll": true, "Swap": true },
//       "bounds": { "min_words": 4, "max_words": 12 }
//     }

use crate::lang::SentenceBounds;
use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid session config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of language groups. Must be at least 1.
    pub group_count: u32,
    /// Number of turns run by `GameSession::start`. Must be at least 1.
    pub turn_count: u32,
    /// Per-rule enable flags. Placeholder rules are never drawn even when
    /// enabled here.
    pub rules: BTreeMap<Rule, bool>,
    pub bounds: SentenceBounds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            group_count: 3,
            turn_count: 5,
            rules: Rule::ALL
                .into_iter()
                .map(|rule| (rule, rule.is_implemented()))
                .collect(),
            bounds: SentenceBounds::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rules the session may draw from, in `Rule::ALL` order.
    pub fn active_rules(&self) -> Vec<Rule> {
        Rule::ALL
            .into_iter()
            .filter(|rule| {
                rule.is_implemented() && self.rules.get(rule).copied().unwrap_or(false)
            })
            .collect()
    }

    /// Enable or disable one rule.
    pub fn with_rule(mut self, rule: Rule, enabled: bool) -> Self {
        self.rules.insert(rule, enabled);
        self
    }

    /// Enable exactly the given rules.
    pub fn only_rules(mut self, rules: &[Rule]) -> Self {
        self.rules = Rule::ALL
            .into_iter()
            .map(|rule| (rule, rules.contains(&rule)))
            .collect();
        self
    }
}
