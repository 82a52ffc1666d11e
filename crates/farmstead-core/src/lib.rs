//! Configuration, players, and turn orchestration for the Farmstead simulation.
//!
//! This crate ties the board and market crates together into a playable
//! game. A [`Simulation`] is built from a [`GameConfig`] and driven one call
//! at a time by a front end.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `farmstead-config.yaml` into
//!   strongly-typed structs.
//! - [`outcome`] -- Results of successful actions and their player-facing
//!   messages.
//! - [`player`] -- A player's gold and board.
//! - [`simulation`] -- The turn state machine and every player action.
//! - [`standings`] -- Rankings and winner selection.
//!
//! # Usage
//!
//! ```
//! use farmstead_core::{GameConfig, Simulation, TurnStart};
//! use farmstead_types::Vegetable;
//!
//! let mut sim = Simulation::new(&GameConfig::default()).unwrap();
//! let TurnStart::Turn { name, .. } = sim.start_next_turn() else {
//!     unreachable!();
//! };
//! assert_eq!(name, "Alice");
//!
//! let purchase = sim.buy_vegetable(Vegetable::Carrot).unwrap();
//! assert_eq!(purchase.to_string(), "You have bought a carrot for 2 gold.");
//! ```

pub mod config;
pub mod outcome;
pub mod player;
pub mod simulation;
pub mod standings;

pub use config::{ConfigError, GameConfig, GameSection, LoggingConfig};
pub use outcome::{Harvest, LandPurchase, Sale, VegetablePurchase};
pub use player::Player;
pub use simulation::{MAX_ACTIONS, Simulation, TurnPhase, TurnStart};
pub use standings::{GameSummary, Standing, Standings};
