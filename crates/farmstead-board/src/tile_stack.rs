//! The shared deck of land tiles.
//!
//! The deck is sized by the number of players and shuffled once from a
//! caller-supplied seed, so two games with the same seed and player count
//! deal the same land in the same order.

use std::collections::VecDeque;
use std::iter;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_types::{GameError, TileKind};

/// Copies of each tile kind per player.
const COPIES_PER_PLAYER: [(TileKind, usize); 5] = [
    (TileKind::Garden, 2),
    (TileKind::Field, 3),
    (TileKind::LargeField, 2),
    (TileKind::Forest, 2),
    (TileKind::LargeForest, 1),
];

/// A finite, pre-shuffled stack of land tiles drawn front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileStack {
    tiles: VecDeque<TileKind>,
}

impl TileStack {
    /// Build and shuffle the deck for `player_count` players.
    pub fn new(player_count: usize, seed: u64) -> Self {
        let mut tiles: Vec<TileKind> = COPIES_PER_PLAYER
            .iter()
            .flat_map(|&(kind, copies)| iter::repeat_n(kind, copies.saturating_mul(player_count)))
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        tiles.shuffle(&mut rng);

        debug!(player_count, seed, size = tiles.len(), "Tile stack shuffled");
        Self {
            tiles: tiles.into(),
        }
    }

    /// Build a deck with a fixed order, front first.
    pub fn from_tiles(tiles: impl IntoIterator<Item = TileKind>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Remove and return the front tile.
    pub fn draw(&mut self) -> Result<TileKind, GameError> {
        let kind = self.tiles.pop_front().ok_or(GameError::TileStackEmpty)?;
        debug!(?kind, remaining = self.tiles.len(), "Tile drawn");
        Ok(kind)
    }

    /// Tiles left in the deck.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the deck is exhausted.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
