//! Spell targeting.
//!
//! Each targeted spell names a [`TargetKind`]; the selector turns it into the
//! list of tiles the caster may pick, in ascending tile order. An empty list
//! means the spell cannot be cast right now.

use super::effect::TargetKind;
use crate::board::TileId;
use crate::core::{GameState, PlayerId, RulesContext, TollModifier, MAX_LEVEL};
use crate::economy::toll;

/// Computes target candidates.
pub struct TargetSelector;

impl TargetSelector {
    /// Every tile `caster` may target with a spell of `kind`.
    #[must_use]
    pub fn candidates(kind: TargetKind, state: &GameState, ctx: &RulesContext, caster: PlayerId) -> Vec<TileId> {
        state
            .tile_ids()
            .filter(|&tile| Self::is_candidate(kind, state, ctx, caster, tile))
            .collect()
    }

    /// Check a single tile.
    #[must_use]
    pub fn is_candidate(kind: TargetKind, state: &GameState, ctx: &RulesContext, caster: PlayerId, tile: TileId) -> bool {
        let Some(t) = state.get_tile(tile) else {
            return false;
        };
        let owned = t.owner.is_some();
        let modifier = t.status.toll_modifier;

        match kind {
            TargetKind::Heal => t.is_owned_by(caster) && t.creature.as_ref().is_some_and(|c| c.is_damaged()),
            TargetKind::LevelDown => owned && t.level >= 2,
            TargetKind::LevelUp => t.is_owned_by(caster) && t.level < MAX_LEVEL,
            TargetKind::TollZero => {
                owned && modifier != Some(TollModifier::Devastated) && toll::toll(state, ctx.config, tile) > 0
            }
            TargetKind::TollMultiply => {
                owned
                    && !matches!(modifier, Some(TollModifier::Harvested { .. }))
                    && toll::toll(state, ctx.config, tile) > 0
            }
            TargetKind::Damage => t.creature.is_some(),
            TargetKind::Poison => t.creature.is_some() && !t.status.poisoned,
            TargetKind::Cleanse => t.creature.is_some() && t.status.poisoned,
            TargetKind::Attribute(attribute) => !ctx.board.is_special(tile) && t.attribute() != attribute,
            TargetKind::Teleport => state.player(caster).position != tile,
        }
    }
}
