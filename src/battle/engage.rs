//! Applying a battle to the game state.
//!
//! The caller has already taken the attacking creature and both items out of
//! hand and charged the summon cost. This module builds the units, rolls the
//! criticals, resolves the round and settles the board and the gold.

use tracing::info;

use super::resolver::{resolve_battle, BattleOutcome, BattleReport, CritRolls};
use super::unit::{CombatUnit, Equipment};
use crate::cards::CardId;
use crate::core::{BattleSetup, GameState, RulesContext, TileCreature};
use crate::economy::{ledger, ownership};
use crate::events::GameEvent;

/// Fight for `setup.tile`.
///
/// Returns `None` without touching the state when the tile has no defender
/// or the attacking card is not a creature.
pub fn engage(
    state: &mut GameState,
    ctx: &RulesContext,
    setup: &BattleSetup,
    defender_item: Option<CardId>,
) -> Option<BattleReport> {
    let stats = *ctx.catalog.creature(setup.creature)?;
    let tile = state.tile(setup.tile);
    let defending = tile.creature.clone()?;
    let attribute = tile.attribute();
    let level = tile.level;

    let attacker_gear = Equipment::from_effect(setup.item.and_then(|c| ctx.catalog.equipment(c)));
    let defender_gear = Equipment::from_effect(defender_item.and_then(|c| ctx.catalog.equipment(c)));

    let attacker = CombatUnit::build(
        setup.creature,
        setup.attacker,
        &stats,
        stats.hp_max,
        attribute,
        attacker_gear,
        defender_gear,
        ctx.config,
    );
    let defender = CombatUnit::build(
        defending.card,
        defending.owner,
        &defending.stats,
        defending.hp,
        attribute,
        defender_gear,
        attacker_gear,
        ctx.config,
    );

    state.push_event(GameEvent::BattleStarted {
        attacker: setup.attacker,
        tile: setup.tile,
        attacking: setup.creature,
        defending: defending.card,
    });

    let crits = CritRolls {
        attacker: state.rng.chance_percent(attacker.critical_percent),
        defender: state.rng.chance_percent(defender.critical_percent),
    };
    let report = resolve_battle(&attacker, &defender, crits);

    for (owner, item) in [(attacker.owner, setup.item), (defender.owner, defender_item)] {
        if let Some(card) = item {
            state.player_mut(owner).discard.push(card);
        }
    }

    state.push_event(GameEvent::BattleFinished {
        tile: setup.tile,
        outcome: report.outcome,
        attacker_hp: report.attacker_hp,
        defender_hp: report.defender_hp,
    });
    info!(
        tile = %setup.tile,
        outcome = ?report.outcome,
        attacker_hp = report.attacker_hp,
        defender_hp = report.defender_hp,
        "battle resolved"
    );

    match report.outcome {
        BattleOutcome::DefenderDefeated => {
            ownership::remove_creature(state, setup.tile);
            state.push_event(GameEvent::CreatureDefeated {
                owner: defender.owner,
                tile: setup.tile,
                card: defender.card,
            });

            let creature = TileCreature::new(setup.creature, setup.attacker, stats).with_hp(report.attacker_hp);
            ownership::claim(state, setup.tile, creature, level);
            if defender_gear.poison_on_hit {
                state.tile_mut(setup.tile).status.poisoned = true;
            }
            state.push_event(GameEvent::TileCaptured {
                player: setup.attacker,
                tile: setup.tile,
                card: setup.creature,
            });
        }
        BattleOutcome::AttackerDefeated | BattleOutcome::Draw => {
            let t = state.tile_mut(setup.tile);
            if let Some(creature) = t.creature.as_mut() {
                creature.hp = report.defender_hp;
            }
            if attacker_gear.poison_on_hit {
                t.status.poisoned = true;
            }
            state.player_mut(setup.attacker).discard.push(setup.creature);

            if report.outcome == BattleOutcome::Draw {
                ledger::adjust_gold(state, setup.attacker, stats.cost);
            }
            ledger::charge_toll(state, ctx, setup.attacker, setup.tile);
        }
    }

    Some(report)
}
