//! Land, crops, and storage for the Farmstead simulation.
//!
//! This crate models everything a single player owns on the table, plus the
//! shared deck of land tiles they buy from.
//!
//! # Modules
//!
//! - [`countdown`] -- The decrementing timer behind crop growth and spoilage.
//! - [`tile`] -- [`PlantableTile`]: one cell holding at most one crop that
//!   doubles on its growth countdown up to the tile's capacity.
//! - [`barn`] -- [`Barn`]: per-player storage with a single spoil countdown
//!   shared by every stored vegetable.
//! - [`board`] -- [`Board`]: the barn at the origin plus owned tiles keyed
//!   by position, with placement and land-price rules.
//! - [`tile_stack`] -- [`TileStack`]: the finite, seed-shuffled deck of land.

pub mod barn;
pub mod board;
pub mod countdown;
pub mod tile;
pub mod tile_stack;

// Re-export primary types at crate root.
pub use barn::{Barn, BarnView, SPOIL_TURNS};
pub use board::{Board, BoardView, LAND_PRICE_PER_STEP, TurnReport, starting_tiles};
pub use countdown::Countdown;
pub use tile::{Crop, PlantableTile, TileView};
pub use tile_stack::TileStack;
