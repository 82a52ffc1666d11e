//! Results of successful player actions.
//!
//! Each outcome carries the data a front end needs and renders the message
//! shown to the player through `Display`.

use core::fmt;

use serde::{Deserialize, Serialize};

use farmstead_types::{Position, TileKind, Vegetable};

/// One vegetable bought from the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VegetablePurchase {
    /// The vegetable bought.
    pub vegetable: Vegetable,
    /// Gold paid.
    pub price: u64,
}

impl fmt::Display for VegetablePurchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You have bought a {} for {} gold.",
            self.vegetable.singular(),
            self.price
        )
    }
}

/// A land tile bought and placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandPurchase {
    /// Where the tile was placed.
    pub position: Position,
    /// The kind drawn from the stack.
    pub kind: TileKind,
    /// Gold paid.
    pub price: u64,
}

impl fmt::Display for LandPurchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You have bought a {} for {} gold.", self.kind, self.price)
    }
}

/// Vegetables sold to the market in one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Units sold.
    pub units: u32,
    /// Gold received.
    pub gold: u64,
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.units == 1 { "vegetable" } else { "vegetables" };
        write!(
            f,
            "You have sold {} {noun} for {} gold.",
            self.units, self.gold
        )
    }
}

/// Units taken from a tile into the barn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harvest {
    /// The vegetable harvested.
    pub vegetable: Vegetable,
    /// Units harvested.
    pub amount: u32,
}

impl fmt::Display for Harvest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You have harvested {} {}.",
            self.amount,
            self.vegetable.name_for(self.amount)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let bought = VegetablePurchase {
            vegetable: Vegetable::Carrot,
            price: 2,
        };
        assert_eq!(bought.to_string(), "You have bought a carrot for 2 gold.");

        let land = LandPurchase {
            position: Position::new(2, 0),
            kind: TileKind::Forest,
            price: 10,
        };
        assert_eq!(land.to_string(), "You have bought a Forest for 10 gold.");

        let harvest = Harvest {
            vegetable: Vegetable::Tomato,
            amount: 2,
        };
        assert_eq!(harvest.to_string(), "You have harvested 2 tomatoes.");
    }

    #[test]
    fn sale_message_agrees_in_number() {
        assert_eq!(
            Sale { units: 1, gold: 16 }.to_string(),
            "You have sold 1 vegetable for 16 gold."
        );
        assert_eq!(
            Sale { units: 3, gold: 20 }.to_string(),
            "You have sold 3 vegetables for 20 gold."
        );
        assert_eq!(
            Sale::default().to_string(),
            "You have sold 0 vegetables for 0 gold."
        );
    }
}
