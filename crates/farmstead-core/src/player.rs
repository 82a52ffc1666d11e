//! A player: a name, a purse, and a board.

use serde::{Deserialize, Serialize};

use farmstead_board::Board;
use farmstead_types::GameError;

/// One participant in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    gold: u64,
    board: Board,
}

impl Player {
    /// Create a player with `gold` and the starter board.
    pub fn new(name: impl Into<String>, gold: u64) -> Self {
        Self {
            name: name.into(),
            gold,
            board: Board::starter(),
        }
    }

    /// The player's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current gold.
    pub const fn gold(&self) -> u64 {
        self.gold
    }

    /// The player's board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The player's board, mutably.
    pub const fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Whether the player can pay `amount`.
    pub const fn can_afford(&self, amount: u64) -> bool {
        self.gold >= amount
    }

    /// Add gold.
    pub const fn credit(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Remove gold, refusing to go negative.
    pub fn debit(&mut self, amount: u64) -> Result<(), GameError> {
        self.gold = self
            .gold
            .checked_sub(amount)
            .ok_or(GameError::NotEnoughGold {
                required: amount,
                available: self.gold,
            })?;
        Ok(())
    }
}
