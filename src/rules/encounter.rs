//! Landing on an opponent's tile: pay the toll or fight for the tile.
//!
//! A mover who holds an affordable creature gets a choice
//! (`PendingAction::LandedOnOpponent`); anyone else pays at once. A defender
//! holding an affordable battle item gets to answer the attack
//! (`PendingAction::BattleResponse`). CPU seats decide both on the spot.

use tracing::{debug, warn};

use super::cpu;
use crate::battle;
use crate::board::TileId;
use crate::cards::CardId;
use crate::core::{BattleSetup, GameError, GameState, PendingAction, PlayerId, RulesContext};
use crate::economy::ledger;

/// Decide what happens after the active player's movement ends.
pub(crate) fn resolve_landing(state: &mut GameState, ctx: &RulesContext) {
    let player = state.turn;
    let tile = state.player(player).position;
    if ctx.board.is_special(tile) {
        return;
    }
    match state.tile(tile).owner {
        Some(owner) if owner != player => {}
        _ => return,
    }

    if affordable_creatures(state, ctx, player).is_empty() {
        ledger::charge_toll(state, ctx, player, tile);
        return;
    }

    if !state.player(player).is_cpu() {
        debug!(%player, %tile, "landed on opponent tile");
        state.pending = Some(PendingAction::LandedOnOpponent { tile });
        return;
    }

    let attacked = match cpu::plan_landing(state, ctx, player, tile) {
        Some((creature, item)) => start_battle(state, ctx, player, tile, creature, item).is_ok(),
        None => false,
    };
    if !attacked {
        ledger::charge_toll(state, ctx, player, tile);
    }
}

/// Attack the tile the active player landed on.
pub fn choose_battle(
    state: &mut GameState,
    ctx: &RulesContext,
    creature: CardId,
    item: Option<CardId>,
) -> Result<(), GameError> {
    let Some(PendingAction::LandedOnOpponent { tile }) = state.pending else {
        return Err(GameError::NothingPending);
    };
    let attacker = state.turn;
    start_battle(state, ctx, attacker, tile, creature, item)
}

/// Decline the battle and pay the toll.
pub fn pay_toll(state: &mut GameState, ctx: &RulesContext) -> Result<(), GameError> {
    let Some(PendingAction::LandedOnOpponent { tile }) = state.pending else {
        return Err(GameError::NothingPending);
    };
    let payer = state.turn;
    state.pending = None;
    ledger::charge_toll(state, ctx, payer, tile);
    Ok(())
}

/// The defender's answer to a pending attack.
pub fn respond_battle(state: &mut GameState, ctx: &RulesContext, item: Option<CardId>) -> Result<(), GameError> {
    let Some(PendingAction::BattleResponse(setup)) = state.pending.clone() else {
        return Err(GameError::NothingPending);
    };
    let defender = setup.defender();
    let cost = match item {
        Some(card) => item_cost(state, ctx, defender, card)?,
        None => 0,
    };
    check_funds(state, defender, cost)?;

    state.pending = None;
    commit_item(state, defender, item, cost);
    fight(state, ctx, &setup, item);
    Ok(())
}

fn start_battle(
    state: &mut GameState,
    ctx: &RulesContext,
    attacker: PlayerId,
    tile: TileId,
    creature: CardId,
    item: Option<CardId>,
) -> Result<(), GameError> {
    let definition = ctx.catalog.get(creature).ok_or(GameError::UnknownCard(creature))?;
    let stats = definition.creature_stats().ok_or(GameError::NotACreature(creature))?;
    if state.player(attacker).hand_index(creature).is_none() {
        return Err(GameError::NotInHand(creature));
    }
    let item_cost = match item {
        Some(card) => item_cost(state, ctx, attacker, card)?,
        None => 0,
    };
    check_funds(state, attacker, stats.cost + item_cost)?;

    state.player_mut(attacker).take_from_hand(creature);
    state.pending = None;
    state.land_action_used = true;
    ledger::adjust_gold(state, attacker, -stats.cost);
    commit_item(state, attacker, item, item_cost);

    let setup = BattleSetup { attacker, tile, creature, item };
    let defender = setup.defender();
    debug!(%attacker, %tile, %creature, "battle declared");

    if affordable_items(state, ctx, defender).is_empty() {
        fight(state, ctx, &setup, None);
    } else if state.player(defender).is_cpu() {
        let answer = cpu::choose_defense_item(state, ctx, &setup);
        let cost = answer.and_then(|card| ctx.catalog.spell(card)).map_or(0, |(_, cost)| cost);
        commit_item(state, defender, answer, cost);
        fight(state, ctx, &setup, answer);
    } else {
        state.pending = Some(PendingAction::BattleResponse(setup));
    }
    Ok(())
}

fn fight(state: &mut GameState, ctx: &RulesContext, setup: &BattleSetup, defender_item: Option<CardId>) {
    if battle::engage(state, ctx, setup, defender_item).is_none() {
        warn!(tile = %setup.tile, "battle target vanished; attacker forfeits");
        state.player_mut(setup.attacker).discard.push(setup.creature);
    }
}

/// Take a battle item out of hand and pay for it.
fn commit_item(state: &mut GameState, player: PlayerId, item: Option<CardId>, cost: i64) {
    if let Some(card) = item {
        state.player_mut(player).take_from_hand(card);
        ledger::adjust_gold(state, player, -cost);
    }
}

fn item_cost(state: &GameState, ctx: &RulesContext, player: PlayerId, card: CardId) -> Result<i64, GameError> {
    if state.player(player).hand_index(card).is_none() {
        return Err(GameError::NotInHand(card));
    }
    ctx.catalog.equipment(card).ok_or(GameError::NotEquipment(card))?;
    ctx.catalog
        .spell(card)
        .map(|(_, cost)| cost)
        .ok_or(GameError::NotEquipment(card))
}

fn check_funds(state: &GameState, player: PlayerId, needed: i64) -> Result<(), GameError> {
    let available = state.player(player).gold;
    if available < needed {
        return Err(GameError::InsufficientGold { needed, available });
    }
    Ok(())
}

/// Creature cards in hand the player can pay for, in hand order.
#[must_use]
pub fn affordable_creatures(state: &GameState, ctx: &RulesContext, player: PlayerId) -> Vec<CardId> {
    let p = state.player(player);
    p.hand
        .iter()
        .copied()
        .filter(|&card| ctx.catalog.creature(card).is_some_and(|stats| stats.cost <= p.gold))
        .collect()
}

/// Battle items in hand the player can pay for, in hand order.
#[must_use]
pub fn affordable_items(state: &GameState, ctx: &RulesContext, player: PlayerId) -> Vec<CardId> {
    let p = state.player(player);
    p.hand
        .iter()
        .copied()
        .filter(|&card| {
            ctx.catalog.equipment(card).is_some() && ctx.catalog.spell(card).is_some_and(|(_, cost)| cost <= p.gold)
        })
        .collect()
}
