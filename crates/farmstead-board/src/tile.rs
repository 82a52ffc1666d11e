//! A single plantable cell and its crop.
//!
//! A tile holds at most one species. Once planted, the count doubles every
//! time the growth countdown reaches its floor, capped at the tile's
//! capacity. The countdown is active exactly while a crop is present and
//! below capacity.

use serde::{Deserialize, Serialize};

use farmstead_types::{GameError, Position, TileKind, Vegetable};

use crate::countdown::Countdown;

/// The crop growing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    /// The planted species.
    pub vegetable: Vegetable,
    /// Units currently on the tile, always at least 1.
    pub count: u32,
}

/// One owned land tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantableTile {
    kind: TileKind,
    crop: Option<Crop>,
    grow_countdown: Countdown,
}

impl PlantableTile {
    /// Create an empty tile of the given kind.
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            crop: None,
            grow_countdown: Countdown::inactive(),
        }
    }

    /// The tile's kind.
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// The current crop, if any.
    pub const fn crop(&self) -> Option<Crop> {
        self.crop
    }

    /// Number of units planted (0 when empty).
    pub fn count(&self) -> u32 {
        self.crop.map_or(0, |crop| crop.count)
    }

    /// Turns left until the crop next doubles, while it is growing.
    pub const fn turns_until_growth(&self) -> Option<i32> {
        self.grow_countdown.value()
    }

    /// Plant a single unit of `vegetable`.
    pub fn plant(&mut self, vegetable: Vegetable) -> Result<(), GameError> {
        if self.count() > 0 {
            return Err(GameError::AlreadyPlanted);
        }
        if !self.kind.accepts(vegetable) {
            return Err(GameError::WrongVegetableType {
                vegetable,
                tile: self.kind,
            });
        }

        self.crop = Some(Crop {
            vegetable,
            count: 1,
        });
        self.grow_countdown = Countdown::new(vegetable.grow_time(), 0, true);
        Ok(())
    }

    /// Advance the growth countdown by one turn.
    ///
    /// Returns the number of units that appeared this turn, which is 0 while
    /// the countdown is still running or the tile is already full.
    pub fn grow(&mut self) -> u32 {
        if !self.grow_countdown.is_active() {
            return 0;
        }
        if !self.grow_countdown.step(-1) {
            return 0;
        }

        let Some(crop) = self.crop.as_mut() else {
            self.grow_countdown.stop();
            return 0;
        };

        let capacity = self.kind.capacity();
        let doubled = crop.count.saturating_mul(2).min(capacity);
        let grown = doubled.saturating_sub(crop.count);
        crop.count = doubled;

        if doubled >= capacity {
            self.grow_countdown.stop();
        } else {
            self.grow_countdown.start(crop.vegetable.grow_time());
        }
        grown
    }

    /// Remove `amount` units and return their species.
    ///
    /// Harvesting a full tile below capacity restarts growth with a fresh
    /// countdown; harvesting everything clears the tile.
    pub fn harvest(&mut self, amount: u32) -> Result<Vegetable, GameError> {
        if amount < 1 {
            return Err(GameError::InputSmallerOne);
        }
        let planted = self.count();
        let Some(crop) = self.crop.as_mut().filter(|crop| crop.count >= amount) else {
            return Err(GameError::HarvestExceedsPlanted {
                requested: amount,
                planted,
            });
        };

        let vegetable = crop.vegetable;
        crop.count = crop.count.saturating_sub(amount);

        if crop.count == 0 {
            self.crop = None;
            self.grow_countdown.stop();
        } else if !self.grow_countdown.is_active() {
            self.grow_countdown.start(vegetable.grow_time());
        }
        Ok(vegetable)
    }

    /// Read-only snapshot of the tile at `position`.
    pub fn view(&self, position: Position) -> TileView {
        TileView {
            position,
            kind: self.kind,
            crop: self.crop,
            capacity: self.kind.capacity(),
            turns_until_growth: self.turns_until_growth(),
        }
    }
}

/// A display-ready snapshot of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    /// Where the tile sits.
    pub position: Position,
    /// The tile kind.
    pub kind: TileKind,
    /// The crop, if any.
    pub crop: Option<Crop>,
    /// The kind's capacity.
    pub capacity: u32,
    /// Growth countdown value while active.
    pub turns_until_growth: Option<i32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grow_n(tile: &mut PlantableTile, turns: u32) -> u32 {
        (0..turns).map(|_| tile.grow()).sum()
    }

    #[test]
    fn tomato_on_field_doubles_to_capacity() {
        let mut tile = PlantableTile::new(TileKind::Field);
        tile.plant(Vegetable::Tomato).unwrap();
        assert_eq!(tile.turns_until_growth(), Some(3));

        assert_eq!(grow_n(&mut tile, 2), 0);
        assert_eq!(tile.grow(), 1);
        assert_eq!(tile.count(), 2);

        assert_eq!(grow_n(&mut tile, 3), 2);
        assert_eq!(tile.count(), 4);
        assert_eq!(tile.turns_until_growth(), None);

        assert_eq!(grow_n(&mut tile, 10), 0);
        assert_eq!(tile.count(), 4);
    }

    #[test]
    fn doubling_is_capped() {
        let mut tile = PlantableTile::new(TileKind::Garden);
        tile.plant(Vegetable::Carrot).unwrap();
        assert_eq!(tile.grow(), 1);
        assert_eq!(tile.count(), 2);
        assert_eq!(tile.grow(), 0);

        let mut large = PlantableTile::new(TileKind::LargeField);
        large.plant(Vegetable::Carrot).unwrap();
        assert_eq!(grow_n(&mut large, 3), 7);
        assert_eq!(large.count(), 8);
    }

    #[test]
    fn plant_rejects_occupied_tile() {
        let mut tile = PlantableTile::new(TileKind::Garden);
        tile.plant(Vegetable::Salad).unwrap();
        assert_eq!(tile.plant(Vegetable::Carrot), Err(GameError::AlreadyPlanted));
    }

    #[test]
    fn plant_rejects_wrong_vegetable() {
        let mut tile = PlantableTile::new(TileKind::Forest);
        assert_eq!(
            tile.plant(Vegetable::Tomato),
            Err(GameError::WrongVegetableType {
                vegetable: Vegetable::Tomato,
                tile: TileKind::Forest,
            })
        );
        assert_eq!(tile.crop(), None);
    }

    #[test]
    fn harvest_validates_amount() {
        let mut tile = PlantableTile::new(TileKind::Garden);
        assert_eq!(tile.harvest(0), Err(GameError::InputSmallerOne));
        assert_eq!(
            tile.harvest(1),
            Err(GameError::HarvestExceedsPlanted {
                requested: 1,
                planted: 0,
            })
        );

        tile.plant(Vegetable::Mushroom).unwrap();
        assert_eq!(
            tile.harvest(2),
            Err(GameError::HarvestExceedsPlanted {
                requested: 2,
                planted: 1,
            })
        );
        assert_eq!(tile.count(), 1);
    }

    #[test]
    fn harvest_everything_clears_tile() {
        let mut tile = PlantableTile::new(TileKind::Garden);
        tile.plant(Vegetable::Carrot).unwrap();
        tile.grow();
        assert_eq!(tile.harvest(2), Ok(Vegetable::Carrot));
        assert_eq!(tile.crop(), None);
        assert_eq!(tile.turns_until_growth(), None);
        assert!(tile.plant(Vegetable::Salad).is_ok());
    }

    #[test]
    fn harvest_from_full_tile_resumes_growth() {
        let mut tile = PlantableTile::new(TileKind::Field);
        tile.plant(Vegetable::Salad).unwrap();
        grow_n(&mut tile, 4);
        assert_eq!(tile.count(), 4);
        assert_eq!(tile.turns_until_growth(), None);

        assert_eq!(tile.harvest(3), Ok(Vegetable::Salad));
        assert_eq!(tile.count(), 1);
        assert_eq!(tile.turns_until_growth(), Some(2));
    }

    #[test]
    fn partial_harvest_keeps_running_countdown() {
        let mut tile = PlantableTile::new(TileKind::LargeForest);
        tile.plant(Vegetable::Carrot).unwrap();
        grow_n(&mut tile, 2);
        assert_eq!(tile.count(), 4);

        tile.harvest(1).unwrap();
        assert_eq!(tile.count(), 3);
        assert_eq!(tile.grow(), 3);
        assert_eq!(tile.count(), 6);
    }
}
