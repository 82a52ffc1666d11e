//! Board coordinates.
//!
//! The barn permanently occupies [`Position::ORIGIN`]; `y` grows upwards, so
//! "below" a position means `y - 1`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An integer cell coordinate on a player's board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Horizontal coordinate, negative to the left of the barn.
    pub x: i32,
    /// Vertical coordinate, never below the barn row for placed tiles.
    pub y: i32,
}

impl Position {
    /// The barn's cell.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is the barn's cell.
    pub const fn is_origin(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Manhattan distance to the barn, saturating at `u32::MAX`.
    pub const fn distance_to_origin(self) -> u32 {
        self.x.unsigned_abs().saturating_add(self.y.unsigned_abs())
    }

    /// The cells whose occupancy makes this cell placeable: below, left,
    /// and right. Neighbours that would overflow the coordinate range are
    /// skipped.
    pub fn support_neighbours(self) -> impl Iterator<Item = Self> {
        [
            self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
            self.x.checked_add(1).map(|x| Self::new(x, self.y)),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
