//! Enumeration types for the Farmstead simulation.
//!
//! Both catalogs are closed sets whose per-variant data is resolved through
//! `const fn` lookups, so every table lives next to the variant it describes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vegetables
// ---------------------------------------------------------------------------

/// A vegetable species that can be bought, planted, harvested, and sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vegetable {
    /// Doubles every turn. Grows on every tile kind.
    Carrot,
    /// Doubles every 2 turns. Grows in gardens and fields.
    Salad,
    /// Doubles every 3 turns. Grows in gardens and fields.
    Tomato,
    /// Doubles every 4 turns. Grows in gardens and forests.
    Mushroom,
}

impl Vegetable {
    /// Every vegetable in catalog order.
    pub const ALL: [Self; 4] = [Self::Carrot, Self::Salad, Self::Tomato, Self::Mushroom];

    /// Singular display name, also the token accepted by [`FromStr`].
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Carrot => "carrot",
            Self::Salad => "salad",
            Self::Tomato => "tomato",
            Self::Mushroom => "mushroom",
        }
    }

    /// Plural display name.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Carrot => "carrots",
            Self::Salad => "salads",
            Self::Tomato => "tomatoes",
            Self::Mushroom => "mushrooms",
        }
    }

    /// Display name matching `count`.
    pub const fn name_for(self, count: u32) -> &'static str {
        if count == 1 { self.singular() } else { self.plural() }
    }

    /// Single-letter board abbreviation.
    pub const fn abbreviation(self) -> char {
        match self {
            Self::Carrot => 'C',
            Self::Salad => 'S',
            Self::Tomato => 'T',
            Self::Mushroom => 'M',
        }
    }

    /// Number of turns a planted crop needs before its count doubles.
    pub const fn grow_time(self) -> i32 {
        match self {
            Self::Carrot => 1,
            Self::Salad => 2,
            Self::Tomato => 3,
            Self::Mushroom => 4,
        }
    }
}

impl fmt::Display for Vegetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Returned when a token names no known vegetable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vegetable: {0}")]
pub struct ParseVegetableError(pub String);

impl FromStr for Vegetable {
    type Err = ParseVegetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|vegetable| vegetable.singular() == s)
            .ok_or_else(|| ParseVegetableError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tile kinds
// ---------------------------------------------------------------------------

/// Every vegetable, plantable in gardens.
const GARDEN_VEGETABLES: &[Vegetable] = &[
    Vegetable::Carrot,
    Vegetable::Salad,
    Vegetable::Tomato,
    Vegetable::Mushroom,
];

/// Field and large-field crops.
const FIELD_VEGETABLES: &[Vegetable] = &[Vegetable::Carrot, Vegetable::Salad, Vegetable::Tomato];

/// Forest and large-forest crops.
const FOREST_VEGETABLES: &[Vegetable] = &[Vegetable::Carrot, Vegetable::Mushroom];

/// The kind of a plantable land tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Small plot accepting every vegetable.
    Garden,
    /// Open field for carrots, salad, and tomatoes.
    Field,
    /// Double-capacity field.
    LargeField,
    /// Woodland for carrots and mushrooms.
    Forest,
    /// Double-capacity forest.
    LargeForest,
}

impl TileKind {
    /// Every tile kind in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Garden,
        Self::Field,
        Self::LargeField,
        Self::Forest,
        Self::LargeForest,
    ];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Garden => "Garden",
            Self::Field => "Field",
            Self::LargeField => "Large Field",
            Self::Forest => "Forest",
            Self::LargeForest => "Large Forest",
        }
    }

    /// Short label shown in the top row of a rendered board cell.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Garden => "G",
            Self::Field => "Fi",
            Self::LargeField => "LFi",
            Self::Forest => "Fo",
            Self::LargeForest => "LFo",
        }
    }

    /// Maximum number of vegetables the tile can hold.
    pub const fn capacity(self) -> u32 {
        match self {
            Self::Garden => 2,
            Self::Field | Self::Forest => 4,
            Self::LargeField | Self::LargeForest => 8,
        }
    }

    /// The vegetables that may be planted on this kind of tile.
    pub const fn plantable(self) -> &'static [Vegetable] {
        match self {
            Self::Garden => GARDEN_VEGETABLES,
            Self::Field | Self::LargeField => FIELD_VEGETABLES,
            Self::Forest | Self::LargeForest => FOREST_VEGETABLES,
        }
    }

    /// Whether `vegetable` may be planted here.
    pub fn accepts(self, vegetable: Vegetable) -> bool {
        self.plantable().contains(&vegetable)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
