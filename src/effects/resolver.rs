//! Spell resolution.
//!
//! `SpellEngine` plays spell cards. Instant spells are paid and resolved in
//! one step. Targeted spells go through a two-phase selection:
//!
//! 1. [`SpellEngine::begin_selection`] takes the card out of hand, remembers
//!    where it was and exposes the candidate tiles through
//!    `PendingAction::SpellTarget`. The cost is reserved, not charged.
//! 2. [`SpellEngine::confirm`] charges the cost and applies the effect, or
//!    rolls everything back if the tile is not a candidate or the caster can
//!    no longer pay. [`SpellEngine::cancel`] rolls back unconditionally.
//!
//! Every effect is interpreted by the single match in
//! [`SpellEngine::apply_effect`].

use tracing::debug;

use super::effect::{SpellEffect, SpellUsage, TargetKind};
use super::targeting::TargetSelector;
use crate::board::{Attribute, TileId};
use crate::cards::CardId;
use crate::core::{
    GameError, GameState, PendingAction, Phase, PlayerId, RulesContext, SpellSelection, TollModifier, MAX_LEVEL,
};
use crate::economy::{ledger, ownership};
use crate::events::GameEvent;
use crate::rules::hand;

/// Plays spell cards.
pub struct SpellEngine;

impl SpellEngine {
    /// Play a spell from `caster`'s hand.
    ///
    /// A targeted spell opens a selection; with `target` given it is
    /// confirmed immediately.
    pub fn cast(
        state: &mut GameState,
        ctx: &RulesContext,
        caster: PlayerId,
        card: CardId,
        target: Option<TileId>,
    ) -> Result<(), GameError> {
        if !matches!(state.phase, Phase::Ready | Phase::Moved) {
            return Err(GameError::WrongPhase(state.phase));
        }
        if state.pending.is_some() {
            return Err(GameError::PendingActionActive);
        }
        if state.player(caster).hand_index(card).is_none() {
            return Err(GameError::NotInHand(card));
        }
        if !ctx.catalog.contains(card) {
            return Err(GameError::UnknownCard(card));
        }
        let (effect, cost) = ctx.catalog.spell(card).ok_or(GameError::NotASpell(card))?;

        match effect.usage() {
            SpellUsage::Equipment => Err(GameError::EquipmentOnly(card)),
            SpellUsage::Instant => {
                Self::check_funds(state, caster, cost)?;
                state.player_mut(caster).take_from_hand(card);
                ledger::adjust_gold(state, caster, -cost);
                state.player_mut(caster).discard.push(card);
                state.push_event(GameEvent::SpellCast { player: caster, card, target: None });
                debug!(player = %caster, %card, ?effect, "instant spell cast");
                Self::apply_effect(state, ctx, caster, effect, None);
                Ok(())
            }
            SpellUsage::Targeted(kind) => {
                Self::begin_selection(state, ctx, caster, card, effect, cost, kind)?;
                match target {
                    Some(tile) => Self::confirm(state, ctx, tile),
                    None => Ok(()),
                }
            }
        }
    }

    /// Open a target selection for a card in `caster`'s hand.
    pub fn begin_selection(
        state: &mut GameState,
        ctx: &RulesContext,
        caster: PlayerId,
        card: CardId,
        effect: SpellEffect,
        cost: i64,
        kind: TargetKind,
    ) -> Result<(), GameError> {
        Self::check_funds(state, caster, cost)?;
        let candidates = TargetSelector::candidates(kind, state, ctx, caster);
        if candidates.is_empty() {
            return Err(GameError::NoValidTargets);
        }
        let hand_index = state
            .player_mut(caster)
            .take_from_hand(card)
            .ok_or(GameError::NotInHand(card))?;

        debug!(player = %caster, %card, candidates = candidates.len(), "spell selection opened");
        state.pending = Some(PendingAction::SpellTarget(SpellSelection {
            caster,
            card,
            effect,
            cost,
            candidates,
            hand_index,
        }));
        Ok(())
    }

    /// Confirm the pending selection on `tile`.
    ///
    /// A tile outside the candidates cancels the selection and returns
    /// `InvalidTarget`; a caster who can no longer pay gets the card back and
    /// `InsufficientGold`.
    pub fn confirm(state: &mut GameState, ctx: &RulesContext, tile: TileId) -> Result<(), GameError> {
        let Some(PendingAction::SpellTarget(selection)) = state.pending.clone() else {
            return Err(GameError::NothingPending);
        };
        if !selection.candidates.contains(&tile) {
            Self::cancel(state);
            return Err(GameError::InvalidTarget(tile));
        }
        if let Err(err) = Self::check_funds(state, selection.caster, selection.cost) {
            Self::cancel(state);
            return Err(err);
        }

        let SpellSelection { caster, card, effect, cost, .. } = selection;
        state.pending = None;
        ledger::adjust_gold(state, caster, -cost);
        state.player_mut(caster).discard.push(card);
        state.push_event(GameEvent::SpellCast { player: caster, card, target: Some(tile) });
        debug!(player = %caster, %card, %tile, ?effect, "targeted spell cast");
        Self::apply_effect(state, ctx, caster, effect, Some(tile));
        Ok(())
    }

    /// Abandon the pending selection and put the card back where it was.
    ///
    /// Returns `false` if no selection was pending.
    pub fn cancel(state: &mut GameState) -> bool {
        let Some(PendingAction::SpellTarget(selection)) = &state.pending else {
            return false;
        };
        let SpellSelection { caster, card, hand_index, .. } = *selection;
        state.pending = None;

        let hand = &mut state.player_mut(caster).hand;
        let index = hand_index.min(hand.len());
        hand.insert(index, card);
        debug!(player = %caster, %card, "spell selection cancelled");
        true
    }

    /// The candidates of the pending selection, if any.
    #[must_use]
    pub fn pending_candidates(state: &GameState) -> Option<&[TileId]> {
        match &state.pending {
            Some(PendingAction::SpellTarget(selection)) => Some(&selection.candidates),
            _ => None,
        }
    }

    /// Damage an area spell deals, per creature tile.
    ///
    /// A creature whose resistance to `element` is below `threshold` takes the
    /// full `amount`; a more resistant one takes `amount - resistance * 3`.
    /// Tiles that would take no damage are left out.
    #[must_use]
    pub fn aoe_hits(state: &GameState, element: Attribute, threshold: i32, amount: i32) -> Vec<(TileId, i32)> {
        state
            .creature_tiles()
            .filter_map(|tile| {
                let creature = state.tile(tile).creature.as_ref()?;
                let resist = creature.stats.resistances.get(element);
                let damage = if resist < threshold {
                    amount
                } else {
                    (amount - resist * 3).max(0)
                };
                (damage > 0).then_some((tile, damage))
            })
            .collect()
    }

    /// Apply an effect cast by `caster`.
    ///
    /// Targeted effects without a target and battle items do nothing here.
    pub fn apply_effect(
        state: &mut GameState,
        ctx: &RulesContext,
        caster: PlayerId,
        effect: SpellEffect,
        target: Option<TileId>,
    ) {
        use SpellEffect::*;

        let opponent = caster.opponent();

        match (effect, target) {
            (FixRoll(value), _) => state.player_mut(caster).forced_roll = Some(value),
            (DoubleDice, _) => state.player_mut(caster).double_next_roll = true,

            (BuffPower(_) | BuffDefense(_) | FirstStrike | PoisonOnHit | ReflectSkill, _) => {}

            (Teleport, Some(tile)) => {
                let player = state.player_mut(caster);
                let from = player.position;
                player.position = tile;
                player.came_from = None;
                state.push_event(GameEvent::Moved { player: caster, from, to: tile });
            }
            (HealHp(amount), Some(tile)) => {
                ownership::heal(state, tile, amount);
            }
            (FullHeal, Some(tile)) => {
                ownership::heal(state, tile, i32::MAX);
            }
            (ChangeLandLevel(delta), Some(tile)) => {
                let level = (i16::from(state.tile(tile).level) + i16::from(delta)).clamp(1, i16::from(MAX_LEVEL));
                ownership::set_level(state, tile, level as u8);
            }
            (SetTollZero, Some(tile)) => {
                ownership::set_toll_modifier(state, tile, Some(TollModifier::Devastated));
            }
            (MultiplyToll(factor), Some(tile)) => {
                ownership::set_toll_modifier(state, tile, Some(TollModifier::Harvested { factor }));
            }
            (DamageTarget(amount), Some(tile)) => {
                ownership::damage(state, tile, amount);
            }
            (PoisonTarget, Some(tile)) => {
                let t = state.tile_mut(tile);
                if t.creature.is_some() {
                    t.status.poisoned = true;
                }
            }
            (CleanseTarget, Some(tile)) => state.tile_mut(tile).status.poisoned = false,
            (ChangeTileAttribute(attribute), Some(tile)) => {
                ownership::set_attribute(state, tile, attribute);
            }
            (
                Teleport | HealHp(_) | FullHeal | ChangeLandLevel(_) | SetTollZero | MultiplyToll(_) | DamageTarget(_)
                | PoisonTarget | CleanseTarget | ChangeTileAttribute(_),
                None,
            ) => {}

            (DrawCards(count), _) => {
                hand::draw(state, ctx.config, caster, usize::from(count));
            }
            (DiscardOpponent(count), _) => {
                for _ in 0..count {
                    hand::discard_random(state, opponent);
                }
            }
            (GainGold(amount), _) => ledger::adjust_gold(state, caster, amount),
            (StealGold(amount), _) => {
                let available = state.player(opponent).gold.max(0);
                ledger::transfer(state, opponent, caster, amount.min(available));
            }
            (InspectCreature, _) => {
                let creatures = state
                    .player(opponent)
                    .hand
                    .iter()
                    .copied()
                    .filter(|&card| ctx.catalog.creature(card).is_some())
                    .collect();
                state.push_event(GameEvent::HandRevealed { player: opponent, creatures });
            }
            (AoeDamage { element, threshold, amount }, _) => {
                let hits = Self::aoe_hits(state, element, threshold, amount);
                let mut dead = Vec::new();
                for &(tile, damage) in &hits {
                    if let Some(creature) = state.tile_mut(tile).creature.as_mut() {
                        creature.hp -= damage;
                        if creature.hp <= 0 {
                            dead.push(tile);
                        }
                    }
                }
                Self::clear_tiles(state, &dead);
            }
            (PurgeAllCreatures, _) => {
                let tiles: Vec<_> = state.creature_tiles().collect();
                Self::clear_tiles(state, &tiles);
            }
        }
    }

    fn clear_tiles(state: &mut GameState, tiles: &[TileId]) {
        for &tile in tiles {
            if let Some(creature) = ownership::remove_creature(state, tile) {
                state.push_event(GameEvent::CreatureDefeated {
                    owner: creature.owner,
                    tile,
                    card: creature.card,
                });
            }
        }
    }

    fn check_funds(state: &GameState, player: PlayerId, cost: i64) -> Result<(), GameError> {
        let available = state.player(player).gold;
        if available < cost {
            return Err(GameError::InsufficientGold { needed: cost, available });
        }
        Ok(())
    }
}
