//! Tile ownership mutations.
//!
//! These are the only functions that change who owns a tile, its level, its
//! creature's HP or its toll status. They move total assets without judging
//! them; `ledger::settle` does that once the command is complete.

use crate::board::{Attribute, Terrain, TileId};
use crate::core::{GameState, TileCreature, TollModifier, MAX_LEVEL};
use crate::events::GameEvent;

/// Put a creature on a tile and give the tile to the creature's owner.
///
/// `level` is clamped to `1..=MAX_LEVEL`.
pub fn claim(state: &mut GameState, tile: TileId, creature: TileCreature, level: u8) {
    let t = state.tile_mut(tile);
    t.owner = Some(creature.owner);
    t.level = level.clamp(1, MAX_LEVEL);
    t.creature = Some(creature);
}

/// Clear a tile and return its creature's card to the owner's discard pile.
pub fn remove_creature(state: &mut GameState, tile: TileId) -> Option<TileCreature> {
    let creature = state.tile_mut(tile).clear()?;
    state.player_mut(creature.owner).discard.push(creature.card);
    Some(creature)
}

/// Clear a tile whose creature was killed.
pub fn defeat(state: &mut GameState, tile: TileId) {
    if let Some(creature) = remove_creature(state, tile) {
        state.push_event(GameEvent::CreatureDefeated {
            owner: creature.owner,
            tile,
            card: creature.card,
        });
    }
}

/// Change an owned tile's level.
pub fn set_level(state: &mut GameState, tile: TileId, level: u8) {
    let t = state.tile_mut(tile);
    if t.owner.is_none() {
        return;
    }
    let from = t.level;
    let to = level.clamp(1, MAX_LEVEL);
    if from == to {
        return;
    }
    t.level = to;
    state.push_event(GameEvent::LevelChanged { tile, from, to });
}

/// Damage the creature on a tile, clearing the tile if it dies.
///
/// Returns the remaining HP, or `None` if the creature died or there was
/// none.
pub fn damage(state: &mut GameState, tile: TileId, amount: i32) -> Option<i32> {
    let creature = state.tile_mut(tile).creature.as_mut()?;
    creature.hp -= amount.max(0);
    if creature.hp > 0 {
        return Some(creature.hp);
    }
    defeat(state, tile);
    None
}

/// Heal the creature on a tile, capped at max HP.
///
/// Returns the HP actually restored.
pub fn heal(state: &mut GameState, tile: TileId, amount: i32) -> i32 {
    let Some(creature) = state.tile_mut(tile).creature.as_mut() else {
        return 0;
    };
    let restored = amount.clamp(0, creature.stats.hp_max - creature.hp);
    creature.hp += restored;
    let hp = creature.hp;
    if restored > 0 {
        state.push_event(GameEvent::CreatureHealed { tile, amount: restored, hp });
    }
    restored
}

/// Replace a tile's toll modifier. Devastated and harvested exclude each
/// other.
pub fn set_toll_modifier(state: &mut GameState, tile: TileId, modifier: Option<TollModifier>) {
    state.tile_mut(tile).status.toll_modifier = modifier;
}

/// Change a tile's elemental attribute (and its artwork with it).
pub fn set_attribute(state: &mut GameState, tile: TileId, attribute: Attribute) {
    state.tile_mut(tile).terrain = Terrain::of(attribute);
}
