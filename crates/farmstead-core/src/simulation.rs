//! The turn controller.
//!
//! [`Simulation`] owns every player, the shared market, the tile stack and
//! the gold ledger, and enforces turn order:
//!
//! ```text
//! AwaitingTurnStart --start_next_turn--> TurnInProgress
//! TurnInProgress --2 actions | end_turn--> AwaitingTurnStart
//! AwaitingTurnStart --round ends with a winner--> GameOver
//! any --quit--> GameOver
//! ```
//!
//! Every action validates before it mutates. A rejected action leaves the
//! game exactly as it was and does not use up an action.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use farmstead_board::{BarnView, Board, BoardView, TileStack, TurnReport};
use farmstead_market::{Conservation, EntryKind, Ledger, LedgerEntry, Market, MarketView};
use farmstead_types::{GameError, Position, Vegetable};

use crate::config::{ConfigError, GameConfig};
use crate::outcome::{Harvest, LandPurchase, Sale, VegetablePurchase};
use crate::player::Player;
use crate::standings::{GameSummary, Standing, Standings};

/// Actions each player may take per turn.
pub const MAX_ACTIONS: u8 = 2;

// ---------------------------------------------------------------------------
// Turn state
// ---------------------------------------------------------------------------

/// Where the game is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Between turns; the next call must be [`Simulation::start_next_turn`].
    AwaitingTurnStart,
    /// The current player has actions left.
    TurnInProgress,
    /// The game has ended.
    GameOver,
}

/// Result of [`Simulation::start_next_turn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStart {
    /// A player's turn has begun.
    Turn {
        /// The player's turn-order index.
        index: usize,
        /// The player's name.
        name: String,
        /// What happened on their board since their last turn.
        report: TurnReport,
    },
    /// The game has ended; see [`Simulation::end_game`].
    GameOver,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// A running game.
#[derive(Debug, Clone)]
pub struct Simulation {
    players: Vec<Player>,
    current: Option<usize>,
    remaining_actions: u8,
    market: Market,
    tile_stack: TileStack,
    ledger: Ledger,
    starting_gold: u64,
    gold_to_win: u64,
    turn: u64,
    active: bool,
}

impl Simulation {
    /// Set up a game from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration does not
    /// describe a playable game.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let game = &config.game;
        let tile_stack = TileStack::new(game.players.len(), game.seed);
        Ok(Self::with_tile_stack(config, tile_stack))
    }

    /// Set up a game with a prepared tile stack.
    ///
    /// The configuration is used as given; call [`GameConfig::validate`]
    /// first if it comes from outside.
    pub fn with_tile_stack(config: &GameConfig, tile_stack: TileStack) -> Self {
        let game = &config.game;
        let players = game
            .players
            .iter()
            .map(|name| Player::new(name.clone(), game.starting_gold))
            .collect();

        info!(
            players = game.players.len(),
            starting_gold = game.starting_gold,
            gold_to_win = game.gold_to_win,
            seed = game.seed,
            tiles = tile_stack.len(),
            "Game created"
        );
        Self {
            players,
            current: None,
            remaining_actions: 0,
            market: Market::new(),
            tile_stack,
            ledger: Ledger::new(),
            starting_gold: game.starting_gold,
            gold_to_win: game.gold_to_win,
            turn: 0,
            active: true,
        }
    }

    // -----------------------------------------------------------------------
    // State queries
    // -----------------------------------------------------------------------

    /// Whether the game has not ended.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the current player may still act.
    pub const fn is_turn_running(&self) -> bool {
        self.remaining_actions != 0
    }

    /// The current phase.
    pub const fn phase(&self) -> TurnPhase {
        if !self.active {
            TurnPhase::GameOver
        } else if self.remaining_actions != 0 {
            TurnPhase::TurnInProgress
        } else {
            TurnPhase::AwaitingTurnStart
        }
    }

    /// Actions left this turn.
    pub const fn remaining_actions(&self) -> u8 {
        self.remaining_actions
    }

    /// Number of turns started so far.
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// All players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player whose turn it is or was last.
    pub fn current_player(&self) -> Option<&Player> {
        self.current.and_then(|index| self.players.get(index))
    }

    /// The shared market.
    pub const fn market(&self) -> &Market {
        &self.market
    }

    /// The shared tile stack.
    pub const fn tile_stack(&self) -> &TileStack {
        &self.tile_stack
    }

    /// The gold ledger.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // -----------------------------------------------------------------------
    // Turn control
    // -----------------------------------------------------------------------

    /// Close the previous turn and open the next one.
    ///
    /// Market prices react to the previous turn's sales first. When a round
    /// completes and someone has reached the gold goal, the game ends
    /// instead of starting a turn.
    pub fn start_next_turn(&mut self) -> TurnStart {
        if !self.active || self.players.is_empty() {
            self.finish();
            return TurnStart::GameOver;
        }

        self.market.tick();

        let next = self.current.map_or(0, |index| index.saturating_add(1));
        let index = if next >= self.players.len() {
            if self.standings().anyone_reached(self.gold_to_win) {
                self.current = Some(0);
                self.finish();
                return TurnStart::GameOver;
            }
            0
        } else {
            next
        };

        let Some(player) = self.players.get_mut(index) else {
            self.finish();
            return TurnStart::GameOver;
        };
        let report = player.board_mut().tick();
        let name = player.name().to_owned();

        self.current = Some(index);
        self.remaining_actions = MAX_ACTIONS;
        self.turn = self.turn.saturating_add(1);

        info!(
            turn = self.turn,
            player = %name,
            index,
            grown = report.grown,
            spoiled = report.spoiled,
            "Turn started"
        );
        TurnStart::Turn {
            index,
            name,
            report,
        }
    }

    /// End the current turn early.
    pub fn end_turn(&mut self) {
        debug!(turn = self.turn, "Turn ended");
        self.remaining_actions = 0;
    }

    /// Abandon the game.
    pub fn quit(&mut self) {
        info!(turn = self.turn, "Game quit");
        self.finish();
    }

    fn finish(&mut self) {
        if self.active {
            info!(turn = self.turn, "Game over");
        }
        self.remaining_actions = 0;
        self.active = false;
    }

    /// Final standings and winners.
    pub fn end_game(&self) -> GameSummary {
        let standings = self.standings();
        let winners = standings
            .winners(self.gold_to_win)
            .into_iter()
            .map(|standing| standing.name.clone())
            .collect();
        GameSummary { standings, winners }
    }

    /// Every player's gold in turn order.
    pub fn standings(&self) -> Standings {
        Standings {
            entries: self
                .players
                .iter()
                .enumerate()
                .map(|(index, player)| Standing {
                    index,
                    name: player.name().to_owned(),
                    gold: player.gold(),
                })
                .collect(),
        }
    }

    /// Reconcile every player's gold against the ledger.
    pub fn audit(&self) -> Vec<Conservation> {
        self.players
            .iter()
            .enumerate()
            .map(|(index, player)| self.ledger.verify(index, self.starting_gold, player.gold()))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// The current player's board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TurnNotInProgress`] before the first turn.
    pub fn show_board(&self) -> Result<BoardView, GameError> {
        self.current_board().map(Board::view)
    }

    /// The current player's barn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TurnNotInProgress`] before the first turn.
    pub fn show_barn(&self) -> Result<BarnView, GameError> {
        self.current_board().map(|board| board.barn().view())
    }

    /// Current market prices.
    pub fn show_market(&self) -> MarketView {
        self.market.view()
    }

    fn current_board(&self) -> Result<&Board, GameError> {
        self.current_player()
            .map(Player::board)
            .ok_or(GameError::TurnNotInProgress)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Buy one unit of `vegetable` at the current market price.
    ///
    /// # Errors
    ///
    /// [`GameError::NotEnoughGold`] if the player cannot pay.
    pub fn buy_vegetable(&mut self, vegetable: Vegetable) -> Result<VegetablePurchase, GameError> {
        let result = self.try_buy_vegetable(vegetable);
        self.conclude("buy vegetable", result)
    }

    fn try_buy_vegetable(&mut self, vegetable: Vegetable) -> Result<VegetablePurchase, GameError> {
        let index = self.acting_player()?;
        let price = self.market.price_of(vegetable);
        let player = player_at(&mut self.players, index)?;

        player.debit(price)?;
        player.board_mut().barn_mut().add(vegetable);

        self.record(index, EntryKind::BuyVegetable { vegetable }, price);
        debug!(player = index, ?vegetable, price, "Vegetable bought");
        Ok(VegetablePurchase { vegetable, price })
    }

    /// Buy the next tile from the stack and place it at `position`.
    ///
    /// # Errors
    ///
    /// [`GameError::TileStackEmpty`], [`GameError::LandNotPlacable`] or
    /// [`GameError::NotEnoughGold`], checked in that order.
    pub fn buy_land(&mut self, position: Position) -> Result<LandPurchase, GameError> {
        let result = self.try_buy_land(position);
        self.conclude("buy land", result)
    }

    fn try_buy_land(&mut self, position: Position) -> Result<LandPurchase, GameError> {
        let index = self.acting_player()?;
        if self.tile_stack.is_empty() {
            return Err(GameError::TileStackEmpty);
        }
        let player = player_at(&mut self.players, index)?;
        if !player.board().placement_allowed(position) {
            return Err(GameError::LandNotPlacable { position });
        }
        let price = Board::price_of(position);
        if !player.can_afford(price) {
            return Err(GameError::NotEnoughGold {
                required: price,
                available: player.gold(),
            });
        }

        let kind = self.tile_stack.draw()?;
        player.debit(price)?;
        player.board_mut().add_tile(position, kind);

        self.record(index, EntryKind::BuyLand { position, kind }, price);
        debug!(player = index, %position, ?kind, price, "Land bought");
        Ok(LandPurchase {
            position,
            kind,
            price,
        })
    }

    /// Sell the requested number of units of each vegetable.
    ///
    /// Ownership of every requested unit is checked before anything is sold.
    ///
    /// # Errors
    ///
    /// [`GameError::VegetableNotOwned`] if the barn is short of any species.
    pub fn sell(&mut self, request: &BTreeMap<Vegetable, u32>) -> Result<Sale, GameError> {
        let result = self.try_sell(request);
        self.conclude("sell", result)
    }

    /// Sell the entire barn.
    ///
    /// An empty barn sells nothing for nothing and still uses an action.
    ///
    /// # Errors
    ///
    /// [`GameError::TurnNotInProgress`] outside a running turn.
    pub fn sell_all(&mut self) -> Result<Sale, GameError> {
        let result = self.acting_player().and_then(|index| {
            let stock = player_at(&mut self.players, index)?.board().barn().view().stock;
            self.try_sell(&stock)
        });
        self.conclude("sell all", result)
    }

    fn try_sell(&mut self, request: &BTreeMap<Vegetable, u32>) -> Result<Sale, GameError> {
        let index = self.acting_player()?;
        let player = player_at(&mut self.players, index)?;

        if let Some((&vegetable, _)) = request
            .iter()
            .find(|&(&vegetable, &count)| !player.board().barn().has(vegetable, count))
        {
            return Err(GameError::VegetableNotOwned { vegetable });
        }

        let mut sale = Sale::default();
        let mut entries = Vec::new();
        for (&vegetable, &count) in request {
            for _ in 0..count {
                player.board_mut().barn_mut().remove(vegetable)?;
                let price = self.market.sell(vegetable);
                sale.units = sale.units.saturating_add(1);
                sale.gold = sale.gold.saturating_add(price);
                entries.push((EntryKind::SellVegetable { vegetable }, price));
            }
        }
        player.credit(sale.gold);

        for (kind, price) in entries {
            self.record(index, kind, price);
        }
        debug!(player = index, units = sale.units, gold = sale.gold, "Vegetables sold");
        Ok(sale)
    }

    /// Plant one unit of `vegetable` from the barn at `position`.
    ///
    /// # Errors
    ///
    /// [`GameError::VegetableNotOwned`] if the barn has none, otherwise
    /// whatever the tile refuses with ([`GameError::LandNotOwned`],
    /// [`GameError::AlreadyPlanted`], [`GameError::WrongVegetableType`]).
    pub fn plant(&mut self, position: Position, vegetable: Vegetable) -> Result<(), GameError> {
        let result = self.try_plant(position, vegetable);
        self.conclude("plant", result)
    }

    fn try_plant(&mut self, position: Position, vegetable: Vegetable) -> Result<(), GameError> {
        let index = self.acting_player()?;
        let board = player_at(&mut self.players, index)?.board_mut();
        if !board.barn().has(vegetable, 1) {
            return Err(GameError::VegetableNotOwned { vegetable });
        }
        board.plant(position, vegetable)?;
        board.barn_mut().remove(vegetable)?;

        debug!(player = index, %position, ?vegetable, "Vegetable planted");
        Ok(())
    }

    /// Move `amount` grown units from the tile at `position` into the barn.
    ///
    /// # Errors
    ///
    /// [`GameError::LandNotOwned`], [`GameError::InputSmallerOne`] or
    /// [`GameError::HarvestExceedsPlanted`].
    pub fn harvest(&mut self, position: Position, amount: u32) -> Result<Harvest, GameError> {
        let result = self.try_harvest(position, amount);
        self.conclude("harvest", result)
    }

    fn try_harvest(&mut self, position: Position, amount: u32) -> Result<Harvest, GameError> {
        let index = self.acting_player()?;
        let board = player_at(&mut self.players, index)?.board_mut();
        let vegetable = board.harvest(position, amount)?;
        board.barn_mut().add_many(vegetable, amount);

        debug!(player = index, %position, ?vegetable, amount, "Vegetables harvested");
        Ok(Harvest { vegetable, amount })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// The index of the player allowed to act right now.
    fn acting_player(&self) -> Result<usize, GameError> {
        if !self.active || self.remaining_actions == 0 {
            return Err(GameError::TurnNotInProgress);
        }
        self.current.ok_or(GameError::TurnNotInProgress)
    }

    /// Use up an action on success, log the rejection otherwise.
    fn conclude<T>(
        &mut self,
        action: &'static str,
        result: Result<T, GameError>,
    ) -> Result<T, GameError> {
        match &result {
            Ok(_) => {
                self.remaining_actions = self.remaining_actions.saturating_sub(1);
            }
            Err(error) => {
                warn!(action, player = ?self.current, %error, "Action rejected");
            }
        }
        result
    }

    fn record(&mut self, player: usize, kind: EntryKind, amount: u64) {
        self.ledger.record(LedgerEntry {
            turn: self.turn,
            player,
            kind,
            amount,
        });
    }
}

fn player_at(players: &mut [Player], index: usize) -> Result<&mut Player, GameError> {
    players.get_mut(index).ok_or(GameError::TurnNotInProgress)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
