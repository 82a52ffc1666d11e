//! The shared market and gold bookkeeping for the Farmstead simulation.
//!
//! # Architecture
//!
//! - [`market`] -- The [`Market`]: four vegetables priced in two coupled
//!   pairs, each pair reading a 5-rung price ladder at a shared index.
//! - [`ledger`] -- The [`Ledger`]: an append-only log of every gold movement
//!   and the conservation check run against player balances.
//!
//! # Price Feedback
//!
//! Mushrooms trade against carrots and tomatoes against salad. At the end
//! of every turn, for each pair:
//!
//! ```text
//! d = sold(first) - sold(second)
//! index = clamp(index - d / 2, 0, 4)
//! ```
//!
//! Overselling one side of a pair makes it cheaper and its counterpart
//! dearer.
//!
//! # Usage
//!
//! ```
//! use farmstead_market::Market;
//! use farmstead_types::Vegetable;
//!
//! let mut market = Market::new();
//! assert_eq!(market.price_of(Vegetable::Mushroom), 16);
//!
//! for _ in 0..3 {
//!     market.sell(Vegetable::Mushroom);
//! }
//! market.tick();
//! assert_eq!(market.price_of(Vegetable::Mushroom), 15);
//! ```

pub mod ledger;
pub mod market;

// Re-export primary types at crate root.
pub use ledger::{Conservation, EntryKind, Ledger, LedgerEntry};
pub use market::{Market, MarketPair, MarketView};
