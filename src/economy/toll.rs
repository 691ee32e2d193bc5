//! Toll and leveling arithmetic.
//!
//! ## Toll
//!
//! ```text
//! toll = round(base(level) * set_bonus(same-attribute tiles) / 100) [* harvest factor]
//! ```
//!
//! `base` doubles per level from 1 to 4 and is 16x at level 5. A devastated
//! or unowned tile collects 0. Tolls are always computed live from the
//! tiles; nothing is cached.

use crate::board::{Attribute, TileId};
use crate::core::{GameState, PlayerId, RuleConfig, TollModifier, MAX_LEVEL};

/// Level-indexed toll before bonuses.
///
/// Levels above the cap never occur in play; they fall back to
/// `base_toll * (16 + level)`.
#[must_use]
pub fn base_toll(config: &RuleConfig, level: u8) -> i64 {
    match level {
        0 => 0,
        1..=4 => config.base_toll << (level - 1),
        MAX_LEVEL => config.base_toll * 16,
        _ => config.base_toll * (16 + i64::from(level)),
    }
}

/// Set bonus in percent for a count of same-attribute tiles.
#[must_use]
pub fn set_bonus_percent(config: &RuleConfig, same_attribute_tiles: usize) -> i64 {
    let table = &config.set_bonus_percent;
    match same_attribute_tiles {
        0 => 100,
        n => table.get(n - 1).or(table.last()).copied().unwrap_or(100),
    }
}

/// Apply a percentage, rounding half up.
#[must_use]
pub fn apply_percent(value: i64, percent: i64) -> i64 {
    (value * percent + 50).div_euclid(100)
}

/// Tiles `owner` controls with the given attribute.
#[must_use]
pub fn same_attribute_count(state: &GameState, owner: PlayerId, attribute: Attribute) -> usize {
    state
        .tiles
        .iter()
        .filter(|t| t.is_owned_by(owner) && t.attribute() == attribute)
        .count()
}

/// Tiles owned by a player.
#[must_use]
pub fn owned_tile_count(state: &GameState, player: PlayerId) -> usize {
    state.owned_tiles(player).count()
}

/// Live toll of a tile.
///
/// ## Example
///
/// ```
/// use realm_duel::board::TileId;
/// use realm_duel::economy::toll;
/// # use realm_duel::core::{GameState, PlayerMap, Player, Controller, RuleConfig, Tile, TileCreature};
/// # use realm_duel::board::{Attribute, Terrain};
/// # use realm_duel::cards::{CardCatalog, ids};
/// # let catalog = CardCatalog::standard();
/// # let config = RuleConfig::standard();
/// # let tiles = vec![Tile::new(Terrain::of(Attribute::Earth))];
/// # let players = PlayerMap::new(|_| Player::new("P", Controller::Human, 1000, TileId::new(0)));
/// # let mut state = GameState::new(tiles, players, 1);
/// # let owner = realm_duel::core::PlayerId::new(0);
/// # let stats = *catalog.creature(ids::DUNE_SCOUT).unwrap();
/// # state.tiles[0].owner = Some(owner);
/// # state.tiles[0].creature = Some(TileCreature::new(ids::DUNE_SCOUT, owner, stats));
/// state.tiles[0].level = 1;
/// assert_eq!(toll::toll(&state, &config, TileId::new(0)), 30);
/// state.tiles[0].level = 3;
/// assert_eq!(toll::toll(&state, &config, TileId::new(0)), 120);
/// ```
#[must_use]
pub fn toll(state: &GameState, config: &RuleConfig, tile: TileId) -> i64 {
    let Some(t) = state.get_tile(tile) else {
        return 0;
    };
    let Some(owner) = t.owner else {
        return 0;
    };
    if t.status.toll_modifier == Some(TollModifier::Devastated) {
        return 0;
    }

    let count = same_attribute_count(state, owner, t.attribute());
    let value = apply_percent(base_toll(config, t.level), set_bonus_percent(config, count));

    match t.status.toll_modifier {
        Some(TollModifier::Harvested { factor }) => value * i64::from(factor),
        _ => value,
    }
}

/// Sum of the tolls of every tile a player owns.
#[must_use]
pub fn total_tolls(state: &GameState, config: &RuleConfig, player: PlayerId) -> i64 {
    state.owned_tiles(player).map(|tile| toll(state, config, tile)).sum()
}

/// Gold needed to raise a tile from `from` to `to`.
///
/// `None` unless `1 <= from < to <= MAX_LEVEL`.
#[must_use]
pub fn level_up_cost(config: &RuleConfig, from: u8, to: u8) -> Option<i64> {
    if from == 0 || to <= from {
        return None;
    }
    Some(config.cumulative_cost(to)? - config.cumulative_cost(from)?)
}
