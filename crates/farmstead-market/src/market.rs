//! Dynamic two-pair vegetable pricing.
//!
//! Each pair shares one index into parallel price ladders. Sales are counted
//! during a turn and only move prices when [`Market::tick`] runs, so every
//! unit sold within one turn fetches the price that was posted when the turn
//! began.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_types::Vegetable;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Index every pair starts at.
pub const DEFAULT_INDEX: u8 = 2;

/// Highest valid ladder index.
pub const MAX_INDEX: u8 = 4;

/// Minimum sales imbalance within a pair that moves its index.
pub const SHIFT_THRESHOLD: i64 = 2;

const MUSHROOM_PRICES: [u64; 5] = [12, 15, 16, 17, 20];
const CARROT_PRICES: [u64; 5] = [3, 2, 2, 2, 1];
const TOMATO_PRICES: [u64; 5] = [3, 5, 6, 7, 9];
const SALAD_PRICES: [u64; 5] = [6, 5, 4, 3, 2];

/// Order in which the market lists its prices.
const DISPLAY_ORDER: [Vegetable; 4] = [
    Vegetable::Mushroom,
    Vegetable::Carrot,
    Vegetable::Tomato,
    Vegetable::Salad,
];

const fn ladder(vegetable: Vegetable) -> &'static [u64; 5] {
    match vegetable {
        Vegetable::Mushroom => &MUSHROOM_PRICES,
        Vegetable::Carrot => &CARROT_PRICES,
        Vegetable::Tomato => &TOMATO_PRICES,
        Vegetable::Salad => &SALAD_PRICES,
    }
}

// ---------------------------------------------------------------------------
// MarketPair
// ---------------------------------------------------------------------------

/// A pair of substitute vegetables sharing one price index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketPair {
    /// Mushrooms against carrots.
    MushroomCarrot,
    /// Tomatoes against salad.
    TomatoSalad,
}

impl MarketPair {
    /// Both pairs.
    pub const ALL: [Self; 2] = [Self::MushroomCarrot, Self::TomatoSalad];

    /// The pair a vegetable trades in.
    pub const fn of(vegetable: Vegetable) -> Self {
        match vegetable {
            Vegetable::Mushroom | Vegetable::Carrot => Self::MushroomCarrot,
            Vegetable::Tomato | Vegetable::Salad => Self::TomatoSalad,
        }
    }

    /// The pair's members. Overselling the first lowers the index.
    pub const fn members(self) -> (Vegetable, Vegetable) {
        match self {
            Self::MushroomCarrot => (Vegetable::Mushroom, Vegetable::Carrot),
            Self::TomatoSalad => (Vegetable::Tomato, Vegetable::Salad),
        }
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// The shared vegetable market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    indices: BTreeMap<MarketPair, u8>,
    sold_this_turn: BTreeMap<Vegetable, u32>,
}

impl Default for Market {
    fn default() -> Self {
        Self::new()
    }
}

impl Market {
    /// Create a market with both pairs at [`DEFAULT_INDEX`].
    pub fn new() -> Self {
        Self {
            indices: MarketPair::ALL
                .into_iter()
                .map(|pair| (pair, DEFAULT_INDEX))
                .collect(),
            sold_this_turn: BTreeMap::new(),
        }
    }

    /// The pair's current ladder index.
    pub fn index_of(&self, pair: MarketPair) -> u8 {
        self.indices.get(&pair).copied().unwrap_or(DEFAULT_INDEX)
    }

    /// Current price of one unit of `vegetable`.
    pub fn price_of(&self, vegetable: Vegetable) -> u64 {
        let index = usize::from(self.index_of(MarketPair::of(vegetable)));
        // Indices are clamped to the ladder in `tick`.
        ladder(vegetable).get(index).copied().unwrap_or_default()
    }

    /// Units of `vegetable` sold since the last tick.
    pub fn sold_this_turn(&self, vegetable: Vegetable) -> u32 {
        self.sold_this_turn.get(&vegetable).copied().unwrap_or(0)
    }

    /// Sell one unit and return the price paid for it.
    pub fn sell(&mut self, vegetable: Vegetable) -> u64 {
        let sold = self.sold_this_turn.entry(vegetable).or_insert(0);
        *sold = sold.saturating_add(1);
        self.price_of(vegetable)
    }

    /// Apply this turn's sales to the price indices and reset the counters.
    pub fn tick(&mut self) {
        for pair in MarketPair::ALL {
            let (first, second) = pair.members();
            let imbalance = i64::from(self.sold_this_turn(first))
                .saturating_sub(i64::from(self.sold_this_turn(second)));
            if imbalance.saturating_abs() < SHIFT_THRESHOLD {
                continue;
            }

            let before = self.index_of(pair);
            let shift = imbalance.checked_div(2).unwrap_or(0);
            let shifted = i64::from(before)
                .saturating_sub(shift)
                .clamp(0, i64::from(MAX_INDEX));
            let after = u8::try_from(shifted).unwrap_or(before);
            self.indices.insert(pair, after);

            debug!(?pair, imbalance, before, after, "Market index shifted");
        }
        self.sold_this_turn.clear();
    }

    /// Read-only snapshot of current prices.
    pub fn view(&self) -> MarketView {
        MarketView {
            prices: DISPLAY_ORDER
                .into_iter()
                .map(|vegetable| (vegetable, self.price_of(vegetable)))
                .collect(),
        }
    }
}

/// A display-ready snapshot of the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketView {
    /// Price per vegetable in listing order (mushroom, carrot, tomato, salad).
    pub prices: Vec<(Vegetable, u64)>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
