//! Land actions: placing a creature, leveling up and forced sales.
//!
//! Placement and level-up share one allowance per turn and both require the
//! player to stand on the tile after movement with nothing pending.

use tracing::debug;

use crate::board::TileId;
use crate::cards::CardId;
use crate::core::{GameError, GameState, PendingAction, Phase, PlayerId, RulesContext, TileCreature, MAX_LEVEL};
use crate::economy::{ledger, liquidation, ownership, toll};
use crate::events::GameEvent;

/// Put a creature from hand on the empty tile the active player stands on.
pub fn place_creature(state: &mut GameState, ctx: &RulesContext, card: CardId, tile: TileId) -> Result<(), GameError> {
    let player = check_land_action(state, tile)?;
    if ctx.board.is_special(tile) {
        return Err(GameError::NotOwnable(tile));
    }
    if state.tile(tile).owner.is_some() {
        return Err(GameError::TileOccupied(tile));
    }
    if state.player(player).hand_index(card).is_none() {
        return Err(GameError::NotInHand(card));
    }
    let definition = ctx.catalog.get(card).ok_or(GameError::UnknownCard(card))?;
    let stats = *definition.creature_stats().ok_or(GameError::NotACreature(card))?;
    check_funds(state, player, stats.cost)?;

    state.player_mut(player).take_from_hand(card);
    state.land_action_used = true;
    ownership::claim(state, tile, TileCreature::new(card, player, stats), 1);
    state.push_event(GameEvent::CreaturePlaced { player, tile, card });
    debug!(%player, %tile, %card, "creature placed");
    ledger::adjust_gold(state, player, -stats.cost);
    Ok(())
}

/// Raise the level of the active player's tile to `level`.
pub fn confirm_level_up(state: &mut GameState, ctx: &RulesContext, tile: TileId, level: u8) -> Result<(), GameError> {
    let player = check_land_action(state, tile)?;
    let current = state.tile(tile).level;
    if !state.tile(tile).is_owned_by(player) {
        return Err(GameError::NotOwner(tile));
    }
    let cost = toll::level_up_cost(ctx.config, current, level)
        .filter(|_| level > current && level <= MAX_LEVEL)
        .ok_or(GameError::InvalidLevel { tile, current, requested: level })?;
    check_funds(state, player, cost)?;

    state.land_action_used = true;
    debug!(%player, %tile, from = current, to = level, cost, "tile leveled");
    ledger::adjust_gold(state, player, -cost);
    ownership::set_level(state, tile, level);
    Ok(())
}

/// Sell one tile while in forced liquidation.
///
/// The sale ends once `ledger::settle` finds the debt covered or nothing
/// left to sell.
pub fn sell_tile(state: &mut GameState, ctx: &RulesContext, tile: TileId) -> Result<(), GameError> {
    let Some(PendingAction::ForcedSale { player }) = state.pending else {
        return Err(GameError::NothingPending);
    };
    if !state.get_tile(tile).is_some_and(|t| t.is_owned_by(player)) {
        return Err(GameError::NotOwner(tile));
    }

    liquidation::sell(state, ctx, player, tile);
    Ok(())
}

/// Shared preconditions of placement and level-up.
fn check_land_action(state: &GameState, tile: TileId) -> Result<PlayerId, GameError> {
    if state.phase != Phase::Moved {
        return Err(GameError::WrongPhase(state.phase));
    }
    if state.pending.is_some() {
        return Err(GameError::PendingActionActive);
    }
    let player = state.turn;
    if state.player(player).position != tile {
        return Err(GameError::NotStandingOn(tile));
    }
    if state.land_action_used {
        return Err(GameError::LandActionUsed);
    }
    Ok(player)
}

fn check_funds(state: &GameState, player: PlayerId, needed: i64) -> Result<(), GameError> {
    let available = state.player(player).gold;
    if available < needed {
        return Err(GameError::InsufficientGold { needed, available });
    }
    Ok(())
}
