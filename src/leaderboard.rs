//! Character leaderboard
//!
//! Running tally of obstacle passes per selected character. Survives a
//! round restart; only a full reset clears it. How (or whether) the
//! tallies reach a persistent ledger is the host's business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-character pass tally, deterministic iteration order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    tallies: BTreeMap<String, u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one obstacle pass to a character
    pub fn record_pass(&mut self, character: &str) {
        *self.tallies.entry(character.to_string()).or_insert(0) += 1;
    }

    /// A character's tally (zero if never credited)
    pub fn tally(&self, character: &str) -> u32 {
        self.tallies.get(character).copied().unwrap_or(0)
    }

    /// The leading character, ties broken by name
    pub fn top(&self) -> Option<(&str, u32)> {
        self.tallies
            .iter()
            .max_by_key(|(name, tally)| (*tally, std::cmp::Reverse(name.as_str())))
            .map(|(name, tally)| (name.as_str(), *tally))
    }

    /// Entries sorted by tally descending, then name
    pub fn standings(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .tallies
            .iter()
            .map(|(name, tally)| (name.as_str(), *tally))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn clear(&mut self) {
        self.tallies.clear();
    }
}
