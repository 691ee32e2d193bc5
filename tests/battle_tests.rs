//! Battle tests.
//!
//! Player 1 holds tile 5 (earth) with a Dune Scout; player 0 lands on it.
//! Criticals are disabled so every outcome is fixed.

use realm_duel::battle::BattleOutcome;
use realm_duel::board::{BoardGraph, TerrainTable, TileId};
use realm_duel::cards::{ids, CardCatalog, CardId};
use realm_duel::core::{Command, Controller, GameError, PendingAction, PlayerId, RuleConfig, TileCreature};
use realm_duel::events::GameEvent;
use realm_duel::rules::{Game, PlayerSetup};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const FIELD: TileId = TileId::new(5);

fn duel(defender: Controller, defender_hand: Vec<CardId>) -> Game {
    let players = [PlayerSetup::starter("Ada", Controller::Human), PlayerSetup::starter("Bo", defender)];
    let board = BoardGraph::standard();
    let terrain = TerrainTable::standard(&board);
    let config = RuleConfig::standard().with_critical_percent(0, 0);
    let mut game = Game::new(config, board, CardCatalog::standard(), terrain, players, 21).unwrap();

    let stats = *game.catalog().creature(ids::DUNE_SCOUT).unwrap();
    let state = game.state_mut();
    let t = state.tile_mut(FIELD);
    t.owner = Some(P1);
    t.level = 1;
    t.creature = Some(TileCreature::new(ids::DUNE_SCOUT, P1, stats));
    state.player_mut(P1).hand = defender_hand;
    game
}

/// Walk player 0 onto the scout's tile holding `hand`.
fn land(game: &mut Game, hand: Vec<CardId>) {
    let p = game.state_mut().player_mut(P0);
    p.hand = hand;
    p.position = TileId::new(3);
    p.forced_roll = Some(2);
    game.roll_dice().unwrap();
    assert_eq!(game.state().pending, Some(PendingAction::LandedOnOpponent { tile: FIELD }));
}

fn finished(game: &mut Game) -> Option<BattleOutcome> {
    game.drain_events().into_iter().find_map(|e| match e {
        GameEvent::BattleFinished { outcome, .. } => Some(outcome),
        _ => None,
    })
}

#[test]
fn test_capture_keeps_level_and_attacker_hp() {
    let mut game = duel(Controller::Cpu, vec![]);
    game.state_mut().tile_mut(FIELD).level = 2;
    land(&mut game, vec![ids::FLAME_DRAKE]);

    game.choose_battle(ids::FLAME_DRAKE, None).unwrap();

    assert_eq!(finished(&mut game), Some(BattleOutcome::DefenderDefeated));
    let tile = game.state().tile(FIELD);
    assert!(tile.is_owned_by(P0));
    assert_eq!(tile.level, 2);
    assert_eq!(tile.creature.as_ref().map(|c| (c.card, c.hp)), Some((ids::FLAME_DRAKE, 60)));
    assert_eq!(game.state().player(P0).gold, 1000 - 180);
    assert_eq!(game.state().player(P1).discard, vec![ids::DUNE_SCOUT]);
}

#[test]
fn test_attack_with_last_gold_can_capture() {
    let mut game = duel(Controller::Cpu, vec![]);
    game.state_mut().player_mut(P0).gold = 180;
    land(&mut game, vec![ids::FLAME_DRAKE]);

    game.choose_battle(ids::FLAME_DRAKE, None).unwrap();

    assert_eq!(finished(&mut game), Some(BattleOutcome::DefenderDefeated));
    assert_eq!(game.state().player(P0).gold, 0);
    assert_eq!(game.total_assets(P0), 30);
    assert!(game.outcome().is_none());
}

#[test]
fn test_battle_awaiting_response_is_not_judged() {
    let mut game = duel(Controller::Human, vec![ids::IRON_SHELL]);
    game.state_mut().player_mut(P0).gold = 180;
    land(&mut game, vec![ids::FLAME_DRAKE]);

    game.choose_battle(ids::FLAME_DRAKE, None).unwrap();
    assert_eq!(game.state().player(P0).gold, 0);
    assert!(game.outcome().is_none());
    assert!(matches!(game.state().pending, Some(PendingAction::BattleResponse(_))));

    game.respond_battle(None).unwrap();

    assert!(game.state().tile(FIELD).is_owned_by(P0));
    assert!(game.outcome().is_none());
}

#[test]
fn test_failed_attack_pays_toll() {
    let mut game = duel(Controller::Cpu, vec![]);
    land(&mut game, vec![ids::EMBER_IMP]);

    game.choose_battle(ids::EMBER_IMP, None).unwrap();

    assert_eq!(finished(&mut game), Some(BattleOutcome::AttackerDefeated));
    let tile = game.state().tile(FIELD);
    assert!(tile.is_owned_by(P1));
    assert_eq!(tile.creature.as_ref().map(|c| c.hp), Some(13));
    assert_eq!(game.state().player(P0).gold, 1000 - 60 - 30);
    assert_eq!(game.state().player(P1).gold, 1030);
    assert_eq!(game.state().player(P0).discard, vec![ids::EMBER_IMP]);
    assert!(game.state().land_action_used);
}

#[test]
fn test_draw_refunds_summon_cost() {
    let mut game = duel(Controller::Human, vec![ids::IRON_SHELL]);
    land(&mut game, vec![ids::WANDERING_KNIGHT]);

    game.choose_battle(ids::WANDERING_KNIGHT, None).unwrap();
    assert!(matches!(game.state().pending, Some(PendingAction::BattleResponse(_))));
    assert_eq!(game.end_turn(), Err(GameError::PendingActionActive));

    game.respond_battle(Some(ids::IRON_SHELL)).unwrap();

    assert_eq!(finished(&mut game), Some(BattleOutcome::Draw));
    assert_eq!(game.state().tile(FIELD).creature.as_ref().map(|c| c.hp), Some(4));
    assert_eq!(game.state().player(P0).gold, 1000 - 140 + 140 - 30);
    assert_eq!(game.state().player(P1).gold, 1000 - 40 + 30);

    let last = game.state().history.last().unwrap();
    assert_eq!(last.player, P1);
    assert_eq!(last.command, Command::RespondBattle { item: Some(ids::IRON_SHELL) });
}

#[test]
fn test_defender_first_strike_reverses_order() {
    let mut game = duel(Controller::Human, vec![ids::QUICKDRAW]);
    land(&mut game, vec![ids::FLAME_DRAKE]);

    game.choose_battle(ids::FLAME_DRAKE, None).unwrap();
    game.respond_battle(Some(ids::QUICKDRAW)).unwrap();

    // The scout hits first for 38 and still falls.
    let creature = game.state().tile(FIELD).creature.clone().unwrap();
    assert_eq!((creature.owner, creature.hp), (P0, 22));
}

#[test]
fn test_venom_poisons_surviving_defender() {
    let mut game = duel(Controller::Cpu, vec![]);
    land(&mut game, vec![ids::EMBER_IMP, ids::VENOM_BARB]);

    game.choose_battle(ids::EMBER_IMP, Some(ids::VENOM_BARB)).unwrap();

    assert!(game.state().tile(FIELD).status.poisoned);
    assert_eq!(game.state().player(P0).gold, 1000 - 60 - 40 - 30);
    assert_eq!(game.state().player(P0).discard, vec![ids::VENOM_BARB, ids::EMBER_IMP]);
}

#[test]
fn test_bad_response_keeps_battle_pending() {
    let mut game = duel(Controller::Human, vec![ids::IRON_SHELL]);
    land(&mut game, vec![ids::FLAME_DRAKE]);
    game.choose_battle(ids::FLAME_DRAKE, None).unwrap();

    assert_eq!(game.respond_battle(Some(ids::HARD_FANG)), Err(GameError::NotInHand(ids::HARD_FANG)));
    assert!(matches!(game.state().pending, Some(PendingAction::BattleResponse(_))));
    assert_eq!(game.state().player(P1).hand, vec![ids::IRON_SHELL]);
}

#[test]
fn test_cpu_defender_answers_at_once() {
    let mut game = duel(Controller::Cpu, vec![ids::IRON_SHELL]);
    land(&mut game, vec![ids::WANDERING_KNIGHT]);

    game.choose_battle(ids::WANDERING_KNIGHT, None).unwrap();

    assert!(game.state().pending.is_none());
    assert_eq!(finished(&mut game), Some(BattleOutcome::Draw));
    assert!(game.state().player(P1).hand.is_empty());
}

#[test]
fn test_battle_requires_landing() {
    let mut game = duel(Controller::Cpu, vec![]);
    game.state_mut().player_mut(P0).hand = vec![ids::FLAME_DRAKE];

    assert_eq!(game.choose_battle(ids::FLAME_DRAKE, None), Err(GameError::NothingPending));
    assert_eq!(game.respond_battle(None), Err(GameError::NothingPending));
}
