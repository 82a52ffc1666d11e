//! Append-only record of every gold movement.
//!
//! Gold only enters a player's purse by selling vegetables and only leaves
//! it by buying vegetables or land. Replaying a player's entries from the
//! starting balance must therefore reproduce their current gold exactly:
//!
//! ```text
//! starting_gold + sum(sales) - sum(purchases) == gold
//! ```
//!
//! A mismatch is reported as [`Conservation::Imbalanced`] and means some
//! code path moved gold without recording it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use farmstead_types::{Position, TileKind, Vegetable};

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// What a ledger entry paid for or earned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// One unit bought from the market.
    BuyVegetable {
        /// The vegetable bought.
        vegetable: Vegetable,
    },
    /// One unit sold to the market.
    SellVegetable {
        /// The vegetable sold.
        vegetable: Vegetable,
    },
    /// A land tile bought from the stack.
    BuyLand {
        /// Where the tile was placed.
        position: Position,
        /// The kind drawn.
        kind: TileKind,
    },
}

impl EntryKind {
    /// Whether the entry adds gold to the player.
    pub const fn is_credit(&self) -> bool {
        matches!(self, Self::SellVegetable { .. })
    }
}

/// A single gold movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Turn counter at the time of the movement.
    pub turn: u64,
    /// Index of the player whose gold moved.
    pub player: usize,
    /// What the gold was exchanged for.
    pub kind: EntryKind,
    /// Gold moved, always non-negative.
    pub amount: u64,
}

/// Outcome of reconciling a player's gold against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conservation {
    /// The recorded movements explain the balance.
    Balanced,
    /// The balance disagrees with the recorded movements.
    Imbalanced {
        /// Balance implied by the ledger. `None` if replaying underflows.
        expected: Option<u64>,
        /// The player's actual gold.
        actual: u64,
    },
}

impl Conservation {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The game-wide gold ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn record(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries belonging to `player`.
    pub fn entries_for(&self, player: usize) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(move |entry| entry.player == player)
    }

    /// Total gold `player` has earned from sales.
    pub fn earned_by(&self, player: usize) -> u64 {
        self.entries_for(player)
            .filter(|entry| entry.kind.is_credit())
            .fold(0_u64, |sum, entry| sum.saturating_add(entry.amount))
    }

    /// Total gold `player` has spent on vegetables and land.
    pub fn spent_by(&self, player: usize) -> u64 {
        self.entries_for(player)
            .filter(|entry| !entry.kind.is_credit())
            .fold(0_u64, |sum, entry| sum.saturating_add(entry.amount))
    }

    /// Gold `player` should hold given their starting balance.
    ///
    /// Entries are replayed in order so an overdraft at any point yields
    /// `None`.
    pub fn balance_of(&self, player: usize, starting_gold: u64) -> Option<u64> {
        self.entries_for(player)
            .try_fold(starting_gold, |balance, entry| {
                if entry.kind.is_credit() {
                    balance.checked_add(entry.amount)
                } else {
                    balance.checked_sub(entry.amount)
                }
            })
    }

    /// Reconcile `actual_gold` against the ledger.
    pub fn verify(&self, player: usize, starting_gold: u64, actual_gold: u64) -> Conservation {
        let expected = self.balance_of(player, starting_gold);
        if expected == Some(actual_gold) {
            return Conservation::Balanced;
        }
        warn!(
            player,
            ?expected,
            actual = actual_gold,
            "Gold conservation violated"
        );
        Conservation::Imbalanced {
            expected,
            actual: actual_gold,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player: usize, kind: EntryKind, amount: u64) -> LedgerEntry {
        LedgerEntry {
            turn: 1,
            player,
            kind,
            amount,
        }
    }

    const SELL_MUSHROOM: EntryKind = EntryKind::SellVegetable {
        vegetable: Vegetable::Mushroom,
    };
    const BUY_CARROT: EntryKind = EntryKind::BuyVegetable {
        vegetable: Vegetable::Carrot,
    };

    #[test]
    fn empty_ledger_balances_at_start() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.balance_of(0, 20), Some(20));
        assert!(ledger.verify(0, 20, 20).is_balanced());
    }

    #[test]
    fn balance_replays_credits_and_debits() {
        let mut ledger = Ledger::new();
        ledger.record(entry(0, SELL_MUSHROOM, 16));
        ledger.record(entry(0, BUY_CARROT, 2));
        ledger.record(entry(
            0,
            EntryKind::BuyLand {
                position: Position::new(2, 0),
                kind: TileKind::Forest,
            },
            10,
        ));
        ledger.record(entry(1, SELL_MUSHROOM, 16));

        assert_eq!(ledger.earned_by(0), 16);
        assert_eq!(ledger.spent_by(0), 12);
        assert_eq!(ledger.balance_of(0, 20), Some(24));
        assert_eq!(ledger.balance_of(1, 20), Some(36));
        assert_eq!(ledger.entries_for(1).count(), 1);
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn mismatch_is_reported() {
        let mut ledger = Ledger::new();
        ledger.record(entry(0, BUY_CARROT, 2));
        assert_eq!(
            ledger.verify(0, 20, 20),
            Conservation::Imbalanced {
                expected: Some(18),
                actual: 20
            }
        );
    }

    #[test]
    fn overdraft_has_no_expected_balance() {
        let mut ledger = Ledger::new();
        ledger.record(entry(0, BUY_CARROT, 5));
        ledger.record(entry(0, SELL_MUSHROOM, 10));
        assert_eq!(ledger.balance_of(0, 3), None);
        assert!(!ledger.verify(0, 3, 8).is_balanced());
    }
}
