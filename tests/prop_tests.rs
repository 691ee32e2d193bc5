//! Property-based tests for the economy, spells, battles and determinism.

use proptest::prelude::*;

use realm_duel::battle::{resolve_battle, BattleOutcome, CombatUnit, CritRolls, Equipment};
use realm_duel::board::{Attribute, BoardGraph, TerrainTable, TileId};
use realm_duel::cards::{CardCatalog, CardId, CreatureStats, Resistances};
use realm_duel::core::{Controller, GameState, Player, PlayerId, PlayerMap, RuleConfig, RulesContext, Tile, TileCreature};
use realm_duel::economy::{base_toll, set_bonus_percent, toll};
use realm_duel::effects::{SpellEffect, SpellEngine};
use realm_duel::rules::{cpu, Game, PlayerSetup};

fn creature(hp_max: i32, water: i32) -> CreatureStats {
    CreatureStats {
        hp_max,
        affection: 4,
        power: 10,
        durability: 6,
        resistances: Resistances { fire: 0, water, earth: 0, wind: 0 },
        cost: 50,
        skill: None,
    }
}

/// Non-special tiles of the standard board, in ascending order.
fn field_tiles(board: &BoardGraph) -> Vec<TileId> {
    board.tiles().filter(|&t| !board.is_special(t)).collect()
}

fn board_state(board: &BoardGraph, placed: &[(TileId, i32, i32)]) -> GameState {
    let tiles = TerrainTable::standard(board).iter().map(Tile::new).collect();
    let players = PlayerMap::new(|_| Player::new("P", Controller::Human, 1000, board.home()));
    let mut state = GameState::new(tiles, players, 3);
    for (i, &(tile, hp, water)) in placed.iter().enumerate() {
        let owner = PlayerId::new((i % 2) as u8);
        let mut c = TileCreature::new(CardId::new(1), owner, creature(60, water));
        c.hp = hp;
        let t = state.tile_mut(tile);
        t.owner = Some(owner);
        t.level = 1;
        t.creature = Some(c);
    }
    state
}

fn unit(hp: i32, attack: i32, defense: i32, equipment: Equipment) -> CombatUnit {
    CombatUnit {
        card: CardId::new(1),
        owner: PlayerId::new(0),
        hp,
        attack,
        defense,
        critical_percent: 0,
        equipment,
    }
}

fn cpu_game(seed: u64) -> Game {
    let players = [PlayerSetup::starter("A", Controller::Cpu), PlayerSetup::starter("B", Controller::Cpu)];
    Game::standard(players, seed).unwrap()
}

proptest! {
    /// Raising a level never lowers the toll under the same set bonus.
    #[test]
    fn prop_toll_increases_with_level(base in 1i64..500, same in 1usize..8) {
        let config = RuleConfig { base_toll: base, ..RuleConfig::standard() };
        let bonus = set_bonus_percent(&config, same);

        for level in 1u8..4 {
            let lower = toll::apply_percent(base_toll(&config, level), bonus);
            let upper = toll::apply_percent(base_toll(&config, level + 1), bonus);
            prop_assert!(lower < upper, "level {} toll {} vs {}", level, lower, upper);
        }
    }

    /// An area spell hits every creature on its own terms: the result does
    /// not depend on which tiles the creatures occupy.
    #[test]
    fn prop_aoe_is_order_independent(
        creatures in prop::collection::vec((1i32..60, 0i32..12), 1..10),
    ) {
        let board = BoardGraph::standard();
        let config = RuleConfig::standard();
        let catalog = CardCatalog::standard();
        let ctx = RulesContext::new(&config, &board, &catalog);
        let tiles = field_tiles(&board);
        let effect = SpellEffect::AoeDamage { element: Attribute::Water, threshold: 8, amount: 20 };

        let forward: Vec<_> = creatures.iter().enumerate().map(|(i, &(hp, w))| (tiles[i], hp, w)).collect();
        let backward: Vec<_> = creatures.iter().rev().enumerate().map(|(i, &(hp, w))| (tiles[i], hp, w)).collect();

        let mut a = board_state(&board, &forward);
        let mut b = board_state(&board, &backward);
        SpellEngine::apply_effect(&mut a, &ctx, PlayerId::new(0), effect, None);
        SpellEngine::apply_effect(&mut b, &ctx, PlayerId::new(0), effect, None);

        let survivors = |state: &GameState, placed: &[(TileId, i32, i32)]| {
            let mut hp: Vec<_> = placed
                .iter()
                .map(|&(tile, _, w)| (w, state.tile(tile).creature.as_ref().map(|c| c.hp)))
                .collect();
            hp.sort();
            hp
        };
        prop_assert_eq!(survivors(&a, &forward), survivors(&b, &backward));

        for &(tile, hp, water) in &forward {
            let damage = if water < 8 { 20 } else { (20 - water * 3).max(0) };
            let expected = (hp - damage > 0).then_some(hp - damage);
            prop_assert_eq!(a.tile(tile).creature.as_ref().map(|c| c.hp), expected);
        }
    }

    /// With criticals disabled a battle is a pure function of its units.
    #[test]
    fn prop_battle_is_deterministic(
        attacker in (1i32..120, 0i32..80, 0i32..50),
        defender in (1i32..120, 0i32..80, 0i32..50),
        first_strike: bool,
    ) {
        let a = unit(attacker.0, attacker.1, attacker.2, Equipment::default());
        let gear = Equipment { first_strike, ..Equipment::default() };
        let d = unit(defender.0, defender.1, defender.2, gear);

        let report = resolve_battle(&a, &d, CritRolls::NONE);
        prop_assert_eq!(&report, &resolve_battle(&a, &d, CritRolls::NONE));

        prop_assert!((0..=a.hp).contains(&report.attacker_hp));
        prop_assert!((0..=d.hp).contains(&report.defender_hp));
        match report.outcome {
            BattleOutcome::DefenderDefeated => prop_assert_eq!(report.defender_hp, 0),
            BattleOutcome::AttackerDefeated => prop_assert_eq!(report.attacker_hp, 0),
            BattleOutcome::Draw => prop_assert!(report.attacker_hp > 0 && report.defender_hp > 0),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Seeded self-play reproduces the same snapshot byte for byte, and
    /// replaying its command history reproduces it again.
    #[test]
    fn prop_self_play_is_reproducible(seed in any::<u64>()) {
        let mut first = cpu_game(seed);
        let mut second = cpu_game(seed);
        cpu::run_self_play(&mut first, 40).unwrap();
        cpu::run_self_play(&mut second, 40).unwrap();

        let bytes = first.state().encode().unwrap();
        prop_assert_eq!(&bytes, &second.state().encode().unwrap());

        let mut replayed = cpu_game(seed);
        for record in first.state().history.iter() {
            let _ = replayed.apply(record.command.clone());
        }
        prop_assert_eq!(&bytes, &replayed.state().encode().unwrap());

        let decoded = GameState::decode(&bytes).unwrap();
        prop_assert_eq!(&bytes, &decoded.encode().unwrap());
    }
}
