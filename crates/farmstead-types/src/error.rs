//! The game error taxonomy.
//!
//! Every failure a player action can produce is a [`GameError`]. Errors are
//! raised where the violated precondition is checked and propagate unmodified
//! to the controller; an operation that returns one has changed nothing.

use crate::enums::{TileKind, Vegetable};
use crate::position::Position;

/// A recoverable, typed failure of a game action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// No tile is owned at the position.
    #[error("you don't own land at {position}")]
    LandNotOwned {
        /// The requested position.
        position: Position,
    },

    /// The position is occupied or has no supporting neighbour.
    #[error("you can't buy land at {position}")]
    LandNotPlacable {
        /// The requested position.
        position: Position,
    },

    /// The shared tile stack has been exhausted.
    #[error("there is no more land to buy")]
    TileStackEmpty,

    /// The player's gold would go negative.
    #[error("you don't have enough gold: {required} needed, {available} available")]
    NotEnoughGold {
        /// The price of the action.
        required: u64,
        /// The player's balance.
        available: u64,
    },

    /// The barn holds fewer units than requested.
    #[error("you don't own enough {vegetable}")]
    VegetableNotOwned {
        /// The missing vegetable.
        vegetable: Vegetable,
    },

    /// The tile already carries a crop.
    #[error("something is already planted in the field")]
    AlreadyPlanted,

    /// The vegetable does not grow on the tile kind.
    #[error("you can't plant {vegetable} on a {tile}")]
    WrongVegetableType {
        /// The vegetable that was refused.
        vegetable: Vegetable,
        /// The tile kind that refused it.
        tile: TileKind,
    },

    /// More units were requested than are planted.
    #[error("cannot harvest {requested}: only {planted} planted")]
    HarvestExceedsPlanted {
        /// Units requested.
        requested: u32,
        /// Units on the tile.
        planted: u32,
    },

    /// A quantity argument was zero.
    #[error("input must be bigger than zero")]
    InputSmallerOne,

    /// An action was issued while no turn is running.
    #[error("no turn is in progress")]
    TurnNotInProgress,
}
