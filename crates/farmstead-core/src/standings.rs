//! Player rankings and the end-of-game verdict.

use serde::{Deserialize, Serialize};

/// One row of the standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Zero-based turn-order index.
    pub index: usize,
    /// Player name.
    pub name: String,
    /// Gold held.
    pub gold: u64,
}

/// Every player's gold, in turn order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// One row per player.
    pub entries: Vec<Standing>,
}

impl Standings {
    /// Players who won.
    ///
    /// Everyone at or above `gold_to_win` wins. If nobody got there, the
    /// richest players win, ties included.
    pub fn winners(&self, gold_to_win: u64) -> Vec<&Standing> {
        let qualified: Vec<&Standing> = self
            .entries
            .iter()
            .filter(|entry| entry.gold >= gold_to_win)
            .collect();
        if !qualified.is_empty() {
            return qualified;
        }

        let Some(best) = self.entries.iter().map(|entry| entry.gold).max() else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|entry| entry.gold == best)
            .collect()
    }

    /// Whether anyone has reached `gold_to_win`.
    pub fn anyone_reached(&self, gold_to_win: u64) -> bool {
        self.entries.iter().any(|entry| entry.gold >= gold_to_win)
    }
}

/// The end-of-game summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Final gold per player.
    pub standings: Standings,
    /// Names of the winners in turn order.
    pub winners: Vec<String>,
}
