//! Per-player vegetable storage with shared spoilage.
//!
//! All stored vegetables share one spoil countdown. It starts when the first
//! unit enters an empty barn, stops when the barn is emptied, and on expiry
//! throws away every stored unit at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_types::{GameError, Vegetable};

use crate::countdown::Countdown;

/// Turns stored vegetables last before spoiling.
pub const SPOIL_TURNS: i32 = 6;

/// A player's barn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barn {
    stock: BTreeMap<Vegetable, u32>,
    spoil_countdown: Countdown,
}

impl Default for Barn {
    fn default() -> Self {
        Self::new()
    }
}

impl Barn {
    /// Create an empty barn.
    pub fn new() -> Self {
        Self {
            stock: Vegetable::ALL.into_iter().map(|v| (v, 0)).collect(),
            spoil_countdown: Countdown::inactive(),
        }
    }

    /// Create the barn every player starts with: one unit of each vegetable.
    ///
    /// The countdown sits one above [`SPOIL_TURNS`] so that the owner's first
    /// turn tick leaves the full window.
    pub fn starter() -> Self {
        Self {
            stock: Vegetable::ALL.into_iter().map(|v| (v, 1)).collect(),
            spoil_countdown: Countdown::new(SPOIL_TURNS.saturating_add(1), 0, true),
        }
    }

    /// Units of `vegetable` in storage.
    pub fn count(&self, vegetable: Vegetable) -> u32 {
        self.stock.get(&vegetable).copied().unwrap_or(0)
    }

    /// Whether at least `amount` units of `vegetable` are stored.
    pub fn has(&self, vegetable: Vegetable, amount: u32) -> bool {
        self.count(vegetable) >= amount
    }

    /// Total units across all species.
    pub fn total(&self) -> u32 {
        self.stock
            .values()
            .fold(0_u32, |sum, count| sum.saturating_add(*count))
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.stock.values().all(|count| *count == 0)
    }

    /// Turns until everything spoils, while anything is stored.
    pub const fn spoils_in(&self) -> Option<i32> {
        self.spoil_countdown.value()
    }

    /// Store one unit of `vegetable`.
    pub fn add(&mut self, vegetable: Vegetable) {
        self.add_many(vegetable, 1);
    }

    /// Store `amount` units of `vegetable`.
    ///
    /// Filling an empty barn restarts the spoil window.
    pub fn add_many(&mut self, vegetable: Vegetable, amount: u32) {
        if amount == 0 {
            return;
        }
        let was_empty = self.is_empty();
        let count = self.stock.entry(vegetable).or_insert(0);
        *count = count.saturating_add(amount);

        if was_empty {
            self.spoil_countdown.start(SPOIL_TURNS);
        }
    }

    /// Take one unit of `vegetable` out of storage.
    pub fn remove(&mut self, vegetable: Vegetable) -> Result<(), GameError> {
        let count = self
            .stock
            .get_mut(&vegetable)
            .filter(|count| **count > 0)
            .ok_or(GameError::VegetableNotOwned { vegetable })?;
        *count = count.saturating_sub(1);

        if self.is_empty() {
            self.spoil_countdown.stop();
        }
        Ok(())
    }

    /// Advance the spoil countdown by one turn.
    ///
    /// Returns `true` if the stock spoiled this turn.
    pub fn tick(&mut self) -> bool {
        if !self.spoil_countdown.is_active() {
            return false;
        }
        if !self.spoil_countdown.step(-1) {
            return false;
        }

        let lost = self.total();
        for count in self.stock.values_mut() {
            *count = 0;
        }
        self.spoil_countdown.stop();
        debug!(lost, "Barn stock spoiled");
        true
    }

    /// Read-only snapshot of the barn.
    pub fn view(&self) -> BarnView {
        BarnView {
            stock: self.stock.clone(),
            total: self.total(),
            spoils_in: self.spoils_in(),
        }
    }
}

/// A display-ready snapshot of a barn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarnView {
    /// Units per vegetable, zero entries included.
    pub stock: BTreeMap<Vegetable, u32>,
    /// Sum of all units.
    pub total: u32,
    /// Turns until spoilage, if anything is stored.
    pub spoils_in: Option<i32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
