//! A player's board: the barn at the origin plus owned land tiles.
//!
//! Land grows outward from the barn. A new tile needs a free cell with an
//! occupied neighbour to its left, right, or below, and costs more the
//! further it sits from the barn.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmstead_types::{GameError, Position, TileKind, Vegetable};

use crate::barn::{Barn, BarnView};
use crate::tile::{PlantableTile, TileView};

/// Gold per step of Manhattan distance beyond the first.
pub const LAND_PRICE_PER_STEP: u64 = 10;

/// The tiles every player owns at the start of the game.
pub const fn starting_tiles() -> [(Position, TileKind); 3] {
    [
        (Position::new(-1, 0), TileKind::Garden),
        (Position::new(1, 0), TileKind::Garden),
        (Position::new(0, 1), TileKind::Field),
    ]
}

// ---------------------------------------------------------------------------
// TurnReport
// ---------------------------------------------------------------------------

/// What happened on a board when its owner's turn began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Units that appeared across all tiles.
    pub grown: u32,
    /// Whether the barn stock spoiled.
    pub spoiled: bool,
}

impl TurnReport {
    /// Whether nothing worth reporting happened.
    pub const fn is_quiet(self) -> bool {
        self.grown == 0 && !self.spoiled
    }
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        match self.grown {
            0 => {}
            1 => lines.push(String::from("1 vegetable has grown since your last turn.")),
            n => lines.push(format!("{n} vegetables have grown since your last turn.")),
        }
        if self.spoiled {
            lines.push(String::from("The vegetables in your barn are spoiled."));
        }
        f.write_str(&lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A player's barn and land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    barn: Barn,
    tiles: BTreeMap<Position, PlantableTile>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with an empty barn and no land.
    pub fn new() -> Self {
        Self {
            barn: Barn::new(),
            tiles: BTreeMap::new(),
        }
    }

    /// Create the board every player starts with.
    pub fn starter() -> Self {
        let mut board = Self {
            barn: Barn::starter(),
            tiles: BTreeMap::new(),
        };
        for (position, kind) in starting_tiles() {
            board.add_tile(position, kind);
        }
        board
    }

    /// The barn.
    pub const fn barn(&self) -> &Barn {
        &self.barn
    }

    /// The barn, mutably.
    pub const fn barn_mut(&mut self) -> &mut Barn {
        &mut self.barn
    }

    /// The tile at `position`, if owned.
    pub fn tile(&self, position: Position) -> Option<&PlantableTile> {
        self.tiles.get(&position)
    }

    /// Number of owned land tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the cell holds the barn or an owned tile.
    pub fn is_occupied(&self, position: Position) -> bool {
        position.is_origin() || self.tiles.contains_key(&position)
    }

    /// Whether land may be bought at `position`.
    pub fn placement_allowed(&self, position: Position) -> bool {
        !self.is_occupied(position)
            && position
                .support_neighbours()
                .any(|neighbour| self.is_occupied(neighbour))
    }

    /// Price of land at `position`: `10 * (|x| + |y| - 1)`, so the cells
    /// touching the barn are free.
    pub fn price_of(position: Position) -> u64 {
        let steps = position.distance_to_origin().saturating_sub(1);
        u64::from(steps).saturating_mul(LAND_PRICE_PER_STEP)
    }

    /// Insert a new empty tile.
    ///
    /// Callers check [`Board::placement_allowed`] first.
    pub fn add_tile(&mut self, position: Position, kind: TileKind) {
        self.tiles.insert(position, PlantableTile::new(kind));
    }

    /// Plant one unit of `vegetable` on the tile at `position`.
    pub fn plant(&mut self, position: Position, vegetable: Vegetable) -> Result<(), GameError> {
        self.tiles
            .get_mut(&position)
            .ok_or(GameError::LandNotOwned { position })?
            .plant(vegetable)
    }

    /// Harvest `amount` units from the tile at `position`.
    pub fn harvest(&mut self, position: Position, amount: u32) -> Result<Vegetable, GameError> {
        self.tiles
            .get_mut(&position)
            .ok_or(GameError::LandNotOwned { position })?
            .harvest(amount)
    }

    /// Grow every tile and age the barn by one turn.
    pub fn tick(&mut self) -> TurnReport {
        let grown = self
            .tiles
            .values_mut()
            .fold(0_u32, |sum, tile| sum.saturating_add(tile.grow()));
        let spoiled = self.barn.tick();

        debug!(grown, spoiled, "Board ticked");
        TurnReport { grown, spoiled }
    }

    /// Read-only snapshot of the board.
    pub fn view(&self) -> BoardView {
        BoardView {
            barn: self.barn.view(),
            tiles: self
                .tiles
                .iter()
                .map(|(position, tile)| tile.view(*position))
                .collect(),
        }
    }
}

/// A display-ready snapshot of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// The barn at the origin.
    pub barn: BarnView,
    /// Owned tiles in position order.
    pub tiles: Vec<TileView>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn land_prices() {
        assert_eq!(Board::price_of(Position::new(2, 0)), 10);
        assert_eq!(Board::price_of(Position::new(-1, 0)), 0);
        assert_eq!(Board::price_of(Position::new(0, 1)), 0);
        assert_eq!(Board::price_of(Position::new(-2, 3)), 40);
        assert_eq!(Board::price_of(Position::ORIGIN), 0);
    }

    #[test]
    fn origin_is_always_occupied() {
        let board = Board::new();
        assert!(board.is_occupied(Position::ORIGIN));
        assert!(!board.placement_allowed(Position::ORIGIN));
    }

    #[test]
    fn placement_on_empty_board() {
        let board = Board::new();
        assert!(board.placement_allowed(Position::new(1, 0)));
        assert!(board.placement_allowed(Position::new(-1, 0)));
        assert!(board.placement_allowed(Position::new(0, 1)));
        // Nothing supports a cell from above.
        assert!(!board.placement_allowed(Position::new(0, -1)));
        assert!(!board.placement_allowed(Position::new(2, 0)));
        assert!(!board.placement_allowed(Position::new(1, 1)));
    }

    #[test]
    fn placement_grows_with_land() {
        let mut board = Board::starter();
        assert!(!board.placement_allowed(Position::new(1, 0)));
        assert!(board.placement_allowed(Position::new(2, 0)));
        assert!(board.placement_allowed(Position::new(1, 1)));
        assert!(board.placement_allowed(Position::new(0, 2)));
        assert!(!board.placement_allowed(Position::new(3, 0)));

        board.add_tile(Position::new(2, 0), TileKind::Forest);
        assert!(board.placement_allowed(Position::new(3, 0)));
        assert!(board.placement_allowed(Position::new(2, 1)));
    }

    #[test]
    fn starter_board_layout() {
        let board = Board::starter();
        assert_eq!(board.tile_count(), 3);
        assert_eq!(
            board.tile(Position::new(0, 1)).map(PlantableTile::kind),
            Some(TileKind::Field)
        );
        assert_eq!(
            board.tile(Position::new(-1, 0)).map(PlantableTile::kind),
            Some(TileKind::Garden)
        );
    }

    #[test]
    fn plant_and_harvest_need_owned_land() {
        let mut board = Board::new();
        let position = Position::new(1, 0);
        assert_eq!(
            board.plant(position, Vegetable::Carrot),
            Err(GameError::LandNotOwned { position })
        );
        assert_eq!(
            board.harvest(position, 1),
            Err(GameError::LandNotOwned { position })
        );

        board.add_tile(position, TileKind::Garden);
        board.plant(position, Vegetable::Carrot).unwrap();
        assert_eq!(board.harvest(position, 1), Ok(Vegetable::Carrot));
    }

    #[test]
    fn tick_sums_growth_and_spoilage() {
        let mut board = Board::new();
        board.add_tile(Position::new(-1, 0), TileKind::Garden);
        board.add_tile(Position::new(1, 0), TileKind::Garden);
        board.plant(Position::new(-1, 0), Vegetable::Carrot).unwrap();
        board.plant(Position::new(1, 0), Vegetable::Carrot).unwrap();
        board.barn_mut().add(Vegetable::Salad);

        let report = board.tick();
        assert_eq!(report, TurnReport { grown: 2, spoiled: false });
        assert_eq!(
            report.to_string(),
            "2 vegetables have grown since your last turn."
        );

        for _ in 0..4 {
            assert!(board.tick().is_quiet());
        }
        let report = board.tick();
        assert!(report.spoiled);
        assert_eq!(report.to_string(), "The vegetables in your barn are spoiled.");
    }

    #[test]
    fn report_text_for_single_unit() {
        let report = TurnReport { grown: 1, spoiled: true };
        assert_eq!(
            report.to_string(),
            "1 vegetable has grown since your last turn.\nThe vegetables in your barn are spoiled."
        );
    }

    #[test]
    fn view_lists_tiles_in_order() {
        let view = Board::starter().view();
        let positions: Vec<Position> = view.tiles.iter().map(|t| t.position).collect();
        assert_eq!(
            positions,
            vec![Position::new(-1, 0), Position::new(0, 1), Position::new(1, 0)]
        );
        assert_eq!(view.barn.total, 4);
    }
}
