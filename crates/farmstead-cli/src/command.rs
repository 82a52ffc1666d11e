//! Parsing of player input lines into [`Command`]s.
//!
//! Grammar (tokens separated by whitespace):
//!
//! ```text
//! buy vegetable <vegetable>
//! buy land <x> <y>
//! sell [<vegetable>...]
//! plant <x> <y> <vegetable>
//! harvest <x> <y> <amount>
//! show board | show barn | show market
//! end turn
//! quit
//! ```

use core::num::ParseIntError;
use core::str::FromStr;

use farmstead_types::{ParseVegetableError, Position, Vegetable};

/// One player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Buy one vegetable from the market.
    BuyVegetable(Vegetable),
    /// Buy the next land tile and place it.
    BuyLand(Position),
    /// Sell the listed units, one entry per unit.
    Sell(Vec<Vegetable>),
    /// Sell everything in the barn.
    SellAll,
    /// Plant a vegetable from the barn.
    Plant {
        /// Target tile.
        position: Position,
        /// What to plant.
        vegetable: Vegetable,
    },
    /// Harvest grown units from a tile.
    Harvest {
        /// Source tile.
        position: Position,
        /// Units to take.
        amount: u32,
    },
    /// Print the current player's board.
    ShowBoard,
    /// Print the current player's barn.
    ShowBarn,
    /// Print market prices.
    ShowMarket,
    /// End the current turn.
    EndTurn,
    /// End the game.
    Quit,
}

/// Why an input line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line matches no command.
    #[error("unknown command: {input:?}")]
    Unknown {
        /// The offending line.
        input: String,
    },

    /// A coordinate or amount is not an integer.
    #[error("{value:?} is not a valid number")]
    InvalidNumber {
        /// The offending token.
        value: String,
        /// Why the integer parse failed.
        #[source]
        source: ParseIntError,
    },

    /// A vegetable name was not recognised.
    #[error(transparent)]
    Vegetable(#[from] ParseVegetableError),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            ["buy", "vegetable", vegetable] => Ok(Self::BuyVegetable(vegetable.parse()?)),
            ["buy", "land", x, y] => Ok(Self::BuyLand(position(x, y)?)),
            ["sell"] => Ok(Self::SellAll),
            ["sell", vegetables @ ..] => Ok(Self::Sell(
                vegetables
                    .iter()
                    .map(|name| name.parse::<Vegetable>())
                    .collect::<Result<_, _>>()?,
            )),
            ["plant", x, y, vegetable] => Ok(Self::Plant {
                position: position(x, y)?,
                vegetable: vegetable.parse()?,
            }),
            ["harvest", x, y, amount] => Ok(Self::Harvest {
                position: position(x, y)?,
                amount: number(amount)?,
            }),
            ["show", "board"] => Ok(Self::ShowBoard),
            ["show", "barn"] => Ok(Self::ShowBarn),
            ["show", "market"] => Ok(Self::ShowMarket),
            ["end", "turn"] => Ok(Self::EndTurn),
            ["quit"] => Ok(Self::Quit),
            _ => Err(ParseError::Unknown {
                input: line.trim().to_owned(),
            }),
        }
    }
}

fn number<T: FromStr<Err = ParseIntError>>(token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidNumber {
        value: token.to_owned(),
        source,
    })
}

fn position(x: &str, y: &str) -> Result<Position, ParseError> {
    Ok(Position::new(number(x)?, number(y)?))
}
