//! Shared type definitions for the Farmstead simulation.
//!
//! This crate is the single source of truth for the static catalogs and the
//! error taxonomy used across the Farmstead workspace.
//!
//! # Modules
//!
//! - [`enums`] -- The vegetable and tile-kind catalogs with their per-variant
//!   data (growth time, capacity, plantable set).
//! - [`error`] -- [`GameError`], the one taxonomy of recoverable game failures.
//! - [`position`] -- Integer board coordinates with the barn fixed at the origin.

pub mod enums;
pub mod error;
pub mod position;

// Re-export all public types at crate root for convenience.
pub use enums::{ParseVegetableError, TileKind, Vegetable};
pub use error::GameError;
pub use position::Position;
