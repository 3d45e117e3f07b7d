// langdrift_sim: the language-drift game engine.
//
// A session draws one sentence, hands an identical copy to each of several
// language groups, and then for a fixed number of turns picks one mutation
// rule and applies it to every group. Groups share the rule but not the
// randomness, so their sentences diverge. At the end the player guesses the
// original sentence and is scored word by word.
//
// Module overview:
// - `rules.rs`:   the `Rule` catalogue and the pure mutation functions
//                 (sentence-wide and single-word letter shifts, word swap).
// - `group.rs`:   `LanguageGroup`, one lineage of mutated sentences with its
//                 own inventory and RNG.
// - `event.rs`:   `TurnLog`, the per-group record of what each turn did.
// - `config.rs`:  `SessionConfig`, group/turn counts and the enabled rules.
// - `session.rs`: `GameSession`, orchestration of draw, start and turns.
// - `scoring.rs`: word-by-word comparison of a guess with the original.
//
// The `drift` binary (`main.rs`) is a thin terminal front end over
// `GameSession`.
//
// **Critical constraint: determinism.** A session seeded with the same value
// and fed the same corpus and config produces the same sentences, logs and
// scores. All randomness flows from one `DriftRng`, forked per group.

pub use langdrift_lang as lang;
pub use langdrift_prng as prng;

pub mod config;
pub mod event;
pub mod group;
pub mod rules;
pub mod scoring;
pub mod session;
