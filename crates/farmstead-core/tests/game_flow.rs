//! Integration tests driving whole games through the public API.
//!
//! Each test builds a [`Simulation`] from configuration, runs turns the way
//! a front end would, and checks the resulting state.

#![allow(clippy::unwrap_used, clippy::panic, clippy::arithmetic_side_effects)]

use std::collections::BTreeMap;

use farmstead_core::{GameConfig, Simulation, TurnPhase, TurnStart};
use farmstead_types::{GameError, Position, Vegetable};

fn config(players: &[&str], starting_gold: u64, gold_to_win: u64, seed: u64) -> GameConfig {
    let mut config = GameConfig::default();
    config.game.players = players.iter().map(|name| (*name).to_owned()).collect();
    config.game.starting_gold = starting_gold;
    config.game.gold_to_win = gold_to_win;
    config.game.seed = seed;
    config
}

fn expect_turn(sim: &mut Simulation) -> (usize, String) {
    match sim.start_next_turn() {
        TurnStart::Turn { index, name, .. } => (index, name),
        TurnStart::GameOver => panic!("game ended unexpectedly"),
    }
}

#[test]
fn winner_is_declared_only_at_round_end() {
    let mut sim = Simulation::new(&config(&["Ada", "Bob"], 20, 40, 1)).unwrap();

    assert_eq!(expect_turn(&mut sim), (0, String::from("Ada")));
    let sale = sim.sell_all().unwrap();
    assert_eq!(sale.gold, 28);
    sim.end_turn();

    // Ada is over the goal but Bob still gets a turn.
    assert_eq!(expect_turn(&mut sim), (1, String::from("Bob")));
    sim.end_turn();

    assert_eq!(sim.turn(), 2);
    assert_eq!(sim.start_next_turn(), TurnStart::GameOver);
    assert_eq!(sim.phase(), TurnPhase::GameOver);
    assert_eq!(sim.turn(), 2);
    assert!(!sim.is_active());

    let summary = sim.end_game();
    assert_eq!(summary.winners, vec!["Ada"]);
    assert_eq!(summary.standings.entries.len(), 2);
}

#[test]
fn several_players_can_win_together() {
    let mut sim = Simulation::new(&config(&["Ada", "Bob", "Cy"], 20, 45, 1)).unwrap();
    for _ in 0..3 {
        expect_turn(&mut sim);
        sim.sell_all().unwrap();
        sim.end_turn();
    }
    assert_eq!(sim.start_next_turn(), TurnStart::GameOver);
    assert_eq!(sim.end_game().winners, vec!["Ada", "Bob", "Cy"]);
}

#[test]
fn quitting_crowns_the_richest() {
    let mut sim = Simulation::new(&config(&["Ada", "Bob"], 20, 1000, 1)).unwrap();
    expect_turn(&mut sim);
    sim.end_turn();
    expect_turn(&mut sim);
    sim.sell(&BTreeMap::from([(Vegetable::Tomato, 1)])).unwrap();
    sim.quit();

    assert!(!sim.is_turn_running());
    let summary = sim.end_game();
    assert_eq!(summary.winners, vec!["Bob"]);
}

#[test]
fn market_reacts_between_turns() {
    let mut sim = Simulation::new(&config(&["Ada"], 100, 1000, 1)).unwrap();
    expect_turn(&mut sim);

    sim.buy_vegetable(Vegetable::Mushroom).unwrap();
    sim.buy_vegetable(Vegetable::Mushroom).unwrap();
    expect_turn(&mut sim);
    assert_eq!(sim.market().price_of(Vegetable::Mushroom), 16);

    let sale = sim
        .sell(&BTreeMap::from([(Vegetable::Mushroom, 3)]))
        .unwrap();
    assert_eq!(sale.gold, 48);
    assert_eq!(sim.market().price_of(Vegetable::Mushroom), 16);

    expect_turn(&mut sim);
    assert_eq!(sim.market().price_of(Vegetable::Mushroom), 15);
}

#[test]
fn gold_is_conserved() {
    let mut sim = Simulation::new(&config(&["Ada", "Bob"], 60, 1000, 3)).unwrap();
    let mut spent = 0;

    for _ in 0..6 {
        expect_turn(&mut sim);
        let price = sim.market().price_of(Vegetable::Tomato);
        let purchase = sim.buy_vegetable(Vegetable::Tomato).unwrap();
        assert_eq!(purchase.price, price);
        spent += price;
        sim.sell(&BTreeMap::from([(Vegetable::Tomato, 1)])).unwrap();
    }

    assert!(spent > 0);
    assert!(sim.audit().iter().all(|c| c.is_balanced()));
    let ledger = sim.ledger();
    let total_spent: u64 = (0..2).map(|player| ledger.spent_by(player)).sum();
    assert_eq!(total_spent, spent);
}

#[test]
fn land_runs_out() {
    let mut sim = Simulation::new(&config(&["Ada"], 10_000, 1_000_000, 5)).unwrap();
    let spots = [
        Position::new(2, 0),
        Position::new(3, 0),
        Position::new(4, 0),
        Position::new(5, 0),
        Position::new(6, 0),
        Position::new(-2, 0),
        Position::new(-3, 0),
        Position::new(-4, 0),
        Position::new(-5, 0),
        Position::new(-6, 0),
    ];

    let mut bought = 0;
    for pair in spots.chunks(2) {
        expect_turn(&mut sim);
        for position in pair {
            sim.buy_land(*position).unwrap();
            bought += 1;
        }
    }
    assert_eq!(bought, 10);
    assert!(sim.tile_stack().is_empty());

    expect_turn(&mut sim);
    assert_eq!(
        sim.buy_land(Position::new(0, 2)),
        Err(GameError::TileStackEmpty)
    );
    assert!(sim.audit().iter().all(|c| c.is_balanced()));
}

#[test]
fn same_seed_deals_the_same_land() {
    let deal = |seed: u64| {
        let mut sim = Simulation::new(&config(&["Ada"], 1000, 100_000, seed)).unwrap();
        expect_turn(&mut sim);
        let first = sim.buy_land(Position::new(2, 0)).unwrap().kind;
        let second = sim.buy_land(Position::new(-2, 0)).unwrap().kind;
        (first, second)
    };
    assert_eq!(deal(11), deal(11));
}

#[test]
fn starter_barn_spoils_on_the_seventh_turn() {
    let mut sim = Simulation::new(&config(&["Ada"], 0, 1000, 1)).unwrap();
    let mut spoiled_on = Vec::new();
    for turn in 1..=8 {
        if let TurnStart::Turn { report, .. } = sim.start_next_turn() {
            if report.spoiled {
                spoiled_on.push(turn);
            }
        }
        sim.end_turn();
    }
    assert_eq!(spoiled_on, vec![7]);
    assert!(sim.show_barn().unwrap().stock.values().all(|count| *count == 0));
}

#[test]
fn crops_grow_across_turns() {
    let mut sim = Simulation::new(&config(&["Ada"], 0, 1000, 1)).unwrap();
    expect_turn(&mut sim);
    sim.plant(Position::new(0, 1), Vegetable::Tomato).unwrap();
    sim.end_turn();

    let mut grown = Vec::new();
    for _ in 0..6 {
        if let TurnStart::Turn { report, .. } = sim.start_next_turn() {
            grown.push(report.grown);
        }
        sim.end_turn();
    }
    assert_eq!(grown, vec![0, 0, 1, 0, 0, 2]);

    expect_turn(&mut sim);
    let harvest = sim.harvest(Position::new(0, 1), 4).unwrap();
    assert_eq!(harvest.to_string(), "You have harvested 4 tomatoes.");
}

#[test]
fn summary_serializes() {
    let mut sim = Simulation::new(&config(&["Ada"], 5, 1, 1)).unwrap();
    expect_turn(&mut sim);
    sim.end_turn();
    assert_eq!(sim.start_next_turn(), TurnStart::GameOver);

    let json = serde_json::to_value(sim.end_game()).unwrap();
    assert_eq!(json["winners"][0], "Ada");
    assert_eq!(json["standings"]["entries"][0]["gold"], 5);
}
