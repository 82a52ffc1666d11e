//! Text rendering of game state for the terminal.
//!
//! The board is drawn as a grid of 7x3 character cells that share their
//! vertical borders, so cells sit 6 columns apart. Row 0 of the grid is the
//! highest `y`; the barn is always at the origin.

use std::iter;

use farmstead_board::{BarnView, BoardView, TileView, TurnReport};
use farmstead_core::Standings;
use farmstead_market::{Conservation, MarketView};
use farmstead_types::{Position, Vegetable};

const CELL_WIDTH: usize = 6;
const CELL_HEIGHT: usize = 3;
const CELL_INNER: usize = 5;
const EMPTY_ROW: &str = "|     |";

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Draw a board as ASCII art.
pub fn board(view: &BoardView) -> String {
    let cells: Vec<(Position, [String; 3])> = iter::once((Position::ORIGIN, barn_cell(&view.barn)))
        .chain(view.tiles.iter().map(|tile| (tile.position, tile_cell(tile))))
        .collect();

    let min_x = cells.iter().map(|(p, _)| p.x).min().unwrap_or(0);
    let max_x = cells.iter().map(|(p, _)| p.x).max().unwrap_or(0);
    let min_y = cells.iter().map(|(p, _)| p.y).min().unwrap_or(0);
    let max_y = cells.iter().map(|(p, _)| p.y).max().unwrap_or(0);

    let width = span(min_x, max_x)
        .saturating_add(1)
        .saturating_mul(CELL_WIDTH)
        .saturating_add(1);
    let height = span(min_y, max_y)
        .saturating_add(1)
        .saturating_mul(CELL_HEIGHT);
    let mut grid = vec![vec![' '; width]; height];

    for (position, rows) in &cells {
        let left = span(min_x, position.x).saturating_mul(CELL_WIDTH);
        let top = span(position.y, max_y).saturating_mul(CELL_HEIGHT);
        for (dy, row) in rows.iter().enumerate() {
            let Some(line) = grid.get_mut(top.saturating_add(dy)) else {
                continue;
            };
            for (dx, ch) in row.chars().enumerate() {
                if let Some(slot) = line.get_mut(left.saturating_add(dx)) {
                    *slot = ch;
                }
            }
        }
    }

    grid.iter()
        .map(|line| line.iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Distance from `low` to `high`, zero if reversed.
fn span(low: i32, high: i32) -> usize {
    usize::try_from(i64::from(high).saturating_sub(i64::from(low))).unwrap_or(0)
}

fn barn_cell(barn: &BarnView) -> [String; 3] {
    let countdown = match barn.spoils_in {
        Some(turns) if barn.total > 0 => turns.to_string(),
        _ => String::from("*"),
    };
    [
        EMPTY_ROW.to_owned(),
        format!("| B {countdown} |"),
        EMPTY_ROW.to_owned(),
    ]
}

fn tile_cell(tile: &TileView) -> [String; 3] {
    let countdown = tile
        .turns_until_growth
        .map_or_else(|| String::from("*"), |turns| turns.to_string());
    // Short labels get a leading space; the row is always CELL_INNER wide.
    let header = format!("{} {countdown}", tile.kind.label());
    let top = if header.len() < CELL_INNER {
        format!("| {header:<width$}|", width = CELL_INNER.saturating_sub(1))
    } else {
        format!("|{header}|")
    };
    let middle = tile.crop.map_or_else(
        || EMPTY_ROW.to_owned(),
        |crop| format!("|  {}  |", crop.vegetable.abbreviation()),
    );
    let count = tile.crop.map_or(0, |crop| crop.count);
    let bottom = format!("| {count}/{} |", tile.capacity);
    [top, middle, bottom]
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

enum Row {
    Entry(&'static str, u64),
    Separator,
    Blank,
}

/// Two-column table: keys left-aligned with a colon, values right-aligned.
fn table(rows: &[Row]) -> String {
    let key_width = rows
        .iter()
        .filter_map(|row| match row {
            Row::Entry(key, _) => Some(key.len()),
            Row::Separator | Row::Blank => None,
        })
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    let value_width = rows
        .iter()
        .filter_map(|row| match row {
            Row::Entry(_, value) => Some(value.to_string().len()),
            Row::Separator | Row::Blank => None,
        })
        .max()
        .unwrap_or(1);

    let lines: Vec<String> = rows
        .iter()
        .map(|row| match row {
            Row::Entry(key, value) => {
                let label = format!("{key}:");
                format!("{label:<key_width$} {value:>value_width$}")
            }
            Row::Separator => "-".repeat(key_width.saturating_add(1).saturating_add(value_width)),
            Row::Blank => String::new(),
        })
        .collect();
    lines.join("\n").trim().to_owned()
}

/// The barn contents, fullest species last, followed by the sum and gold.
pub fn barn(view: &BarnView, gold: u64) -> String {
    if view.total == 0 {
        return format!("Barn\nGold: {gold}");
    }

    let header = match view.spoils_in {
        Some(1) => String::from("Barn (spoils in 1 turn)"),
        Some(turns) => format!("Barn (spoils in {turns} turns)"),
        None => String::from("Barn"),
    };

    let mut stock: Vec<(Vegetable, u32)> = view
        .stock
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(&vegetable, &count)| (vegetable, count))
        .collect();
    stock.sort_by_key(|&(_, count)| count);

    let rows: Vec<Row> = stock
        .into_iter()
        .map(|(vegetable, count)| Row::Entry(vegetable.plural(), u64::from(count)))
        .chain([
            Row::Separator,
            Row::Entry("Sum", u64::from(view.total)),
            Row::Blank,
            Row::Entry("Gold", gold),
        ])
        .collect();

    format!("{header}\n{}", table(&rows))
}

/// Current market prices.
pub fn market(view: &MarketView) -> String {
    let rows: Vec<Row> = view
        .prices
        .iter()
        .map(|&(vegetable, price)| Row::Entry(vegetable.plural(), price))
        .collect();
    table(&rows)
}

// ---------------------------------------------------------------------------
// Turns and results
// ---------------------------------------------------------------------------

/// Announcement printed when a turn begins.
pub fn turn_start(name: &str, report: TurnReport) -> String {
    if report.is_quiet() {
        format!("\nIt is {name}'s turn!")
    } else {
        format!("\nIt is {name}'s turn!\n{report}")
    }
}

/// Every player's gold, one line each.
pub fn standings(standings: &Standings) -> String {
    standings
        .entries
        .iter()
        .map(|entry| {
            format!(
                "Player {} ({}): {}",
                entry.index.saturating_add(1),
                entry.name,
                entry.gold
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One warning per player whose gold the ledger does not account for.
pub fn ledger_warnings(standings: &Standings, checks: &[Conservation]) -> Vec<String> {
    standings
        .entries
        .iter()
        .zip(checks)
        .filter_map(|(entry, check)| match *check {
            Conservation::Balanced => None,
            Conservation::Imbalanced {
                expected: Some(expected),
                actual,
            } => Some(format!(
                "Warning: {} holds {actual} gold but the ledger accounts for {expected}.",
                entry.name
            )),
            Conservation::Imbalanced {
                expected: None,
                actual,
            } => Some(format!(
                "Warning: {} holds {actual} gold but the ledger shows an overdraft.",
                entry.name
            )),
        })
        .collect()
}

/// The winner announcement.
pub fn winners(names: &[String]) -> String {
    match names {
        [] => String::from("Nobody has won!"),
        [single] => format!("{single} has won!"),
        [rest @ .., last] => format!("{} and {last} have won!", rest.join(", ")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
