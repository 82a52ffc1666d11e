//! The interactive game loop.
//!
//! A [`Session`] reads one command per line, applies it to the
//! [`Simulation`], and writes the response. Rule violations and unparsable
//! input are reported as `Error: ...` lines and never end the session.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use tracing::{debug, info};

use farmstead_core::{GameSummary, Player, Simulation, TurnStart};
use farmstead_types::{GameError, Vegetable};

use crate::command::Command;
use crate::error::CliError;
use crate::render;

/// A game bound to an input and an output stream.
pub struct Session<R, W> {
    sim: Simulation,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Bind a game to its streams.
    pub const fn new(sim: Simulation, input: R, output: W) -> Self {
        Self { sim, input, output }
    }

    /// Play until the game ends or input runs out, then print the result.
    ///
    /// End of input counts as `quit`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if reading or writing fails.
    pub fn run(&mut self) -> Result<GameSummary, CliError> {
        while self.sim.is_active() {
            match self.sim.start_next_turn() {
                TurnStart::Turn { name, report, .. } => {
                    writeln!(self.output, "{}", render::turn_start(&name, report))?;
                }
                TurnStart::GameOver => break,
            }

            while self.sim.is_turn_running() {
                let mut line = String::new();
                if self.input.read_line(&mut line)? == 0 {
                    info!("Input closed, quitting");
                    self.sim.quit();
                    break;
                }
                if let Some(response) = self.respond(&line) {
                    writeln!(self.output, "{response}")?;
                }
            }
        }

        let summary = self.sim.end_game();
        self.settle_accounts(&summary)?;
        writeln!(self.output, "{}", render::standings(&summary.standings))?;
        writeln!(self.output, "{}", render::winners(&summary.winners))?;
        self.output.flush()?;
        Ok(summary)
    }

    /// Log every player's takings and flag gold the ledger cannot explain.
    fn settle_accounts(&mut self, summary: &GameSummary) -> Result<(), CliError> {
        let checks = self.sim.audit();
        for warning in render::ledger_warnings(&summary.standings, &checks) {
            writeln!(self.output, "{warning}")?;
        }

        let ledger = self.sim.ledger();
        for standing in &summary.standings.entries {
            info!(
                player = %standing.name,
                gold = standing.gold,
                earned = ledger.earned_by(standing.index),
                spent = ledger.spent_by(standing.index),
                "Final account"
            );
        }
        Ok(())
    }

    /// The text to print for one input line, if any.
    fn respond(&mut self, line: &str) -> Option<String> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => return Some(format!("Error: {error}")),
        };
        debug!(?command, "Command parsed");
        match self.execute(command) {
            Ok(response) => response,
            Err(error) => Some(format!("Error: {error}")),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Option<String>, GameError> {
        let sim = &mut self.sim;
        let response = match command {
            Command::BuyVegetable(vegetable) => Some(sim.buy_vegetable(vegetable)?.to_string()),
            Command::BuyLand(position) => Some(sim.buy_land(position)?.to_string()),
            Command::Sell(vegetables) => Some(sim.sell(&tally(&vegetables))?.to_string()),
            Command::SellAll => Some(sim.sell_all()?.to_string()),
            Command::Plant {
                position,
                vegetable,
            } => {
                sim.plant(position, vegetable)?;
                None
            }
            Command::Harvest { position, amount } => {
                Some(sim.harvest(position, amount)?.to_string())
            }
            Command::ShowBoard => Some(render::board(&sim.show_board()?)),
            Command::ShowBarn => {
                let gold = sim.current_player().map_or(0, Player::gold);
                Some(render::barn(&sim.show_barn()?, gold))
            }
            Command::ShowMarket => Some(render::market(&sim.show_market())),
            Command::EndTurn => {
                sim.end_turn();
                None
            }
            Command::Quit => {
                sim.quit();
                None
            }
        };
        Ok(response)
    }
}

/// Count repeated vegetables.
fn tally(vegetables: &[Vegetable]) -> BTreeMap<Vegetable, u32> {
    let mut counts = BTreeMap::new();
    for &vegetable in vegetables {
        let count = counts.entry(vegetable).or_insert(0_u32);
        *count = count.saturating_add(1);
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmstead_core::GameConfig;

    use super::*;

    fn play(players: &[&str], gold_to_win: u64, script: &str) -> (GameSummary, String) {
        let mut config = GameConfig::default();
        config.game.players = players.iter().map(|name| (*name).to_owned()).collect();
        config.game.gold_to_win = gold_to_win;
        let sim = Simulation::new(&config).unwrap();

        let mut output = Vec::new();
        let summary = Session::new(sim, script.as_bytes(), &mut output)
            .run()
            .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn tally_counts_repeats() {
        let counts = tally(&[Vegetable::Carrot, Vegetable::Salad, Vegetable::Carrot]);
        assert_eq!(
            counts,
            BTreeMap::from([(Vegetable::Carrot, 2), (Vegetable::Salad, 1)])
        );
    }

    #[test]
    fn scripted_game_to_victory() {
        let script = "show market\n\
                      sell mushroom tomato\n\
                      buy vegetable carrot\n\
                      end turn\n";
        let (summary, output) = play(&["Ada", "Bob"], 30, script);

        assert!(output.contains("It is Ada's turn!"));
        assert!(output.contains("mushrooms: 16"));
        assert!(output.contains("You have sold 2 vegetables for 22 gold."));
        assert!(output.contains("You have bought a carrot for 2 gold."));
        assert!(output.contains("It is Bob's turn!"));
        assert!(output.contains("Player 1 (Ada): 40"));
        assert!(output.contains("Player 2 (Bob): 20"));
        assert!(output.ends_with("Ada has won!\n"));
        assert!(!output.contains("Warning:"));
        assert_eq!(summary.winners, vec!["Ada"]);
    }

    #[test]
    fn errors_do_not_end_the_turn() {
        let script = "dance\n\
                      buy vegetable potato\n\
                      plant 0 1 mushroom\n\
                      harvest 1 0 0\n\
                      quit\n";
        let (_, output) = play(&["Ada"], 100, script);

        let errors: Vec<&str> = output.lines().filter(|l| l.starts_with("Error: ")).collect();
        assert_eq!(errors.len(), 4);
        assert!(output.contains("Error: unknown vegetable: potato"));
        assert!(output.contains("Error: you can't plant mushroom on a Field"));
        assert!(output.contains("Error: input must be bigger than zero"));
        assert!(output.contains("Ada has won!"));
    }

    #[test]
    fn views_do_not_use_actions() {
        let script = "show board\n\
                      show barn\n\
                      show market\n\
                      plant -1 0 carrot\n\
                      show barn\n\
                      end turn\n";
        let (_, output) = play(&["Ada"], 1, script);

        assert!(output.contains("| B 6 |"));
        assert!(output.contains("Barn (spoils in 6 turns)"));
        assert!(output.contains("Sum:        3"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn end_of_input_quits() {
        let (summary, output) = play(&["Ada", "Bob"], 100, "buy vegetable salad\n");
        assert!(output.contains("You have bought a salad for 4 gold."));
        assert_eq!(summary.winners, vec!["Bob"]);
        assert!(output.ends_with("Bob has won!\n"));
    }
}
