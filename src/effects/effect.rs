//! Spell effect definitions.
//!
//! A `SpellEffect` is plain immutable data printed on a spell card. It never
//! carries behavior: the [`SpellEngine`](super::SpellEngine) interprets every
//! variant with one exhaustive `match`, and the battle module reads the
//! equipment variants when building combat units.
//!
//! ## Usage classes
//!
//! - `Instant`: resolved as soon as the card is played
//! - `Targeted`: opens a tile selection that must be confirmed or cancelled
//! - `Equipment`: only usable as a battle item

use serde::{Deserialize, Serialize};

use crate::board::Attribute;

/// The closed set of spell effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellEffect {
    // === Dice ===

    /// The caster's next roll is exactly this value.
    FixRoll(u8),
    /// The caster's next roll uses two dice.
    DoubleDice,

    // === Equipment ===

    /// Battle item: adds to attack.
    BuffPower(i32),
    /// Battle item: adds to defense.
    BuffDefense(i32),
    /// Battle item: a defender strikes first.
    FirstStrike,
    /// Battle item: poisons the opposing creature if it ends up on the tile.
    PoisonOnHit,
    /// Battle item: nullifies the opposing creature's skill.
    ReflectSkill,

    // === Targeted ===

    /// Move the caster's token to any other tile.
    Teleport,
    /// Restore HP to one of the caster's creatures.
    HealHp(i32),
    /// Restore one of the caster's creatures to full HP.
    FullHeal,
    /// Raise or lower a tile's level, clamped to `1..=MAX_LEVEL`.
    ChangeLandLevel(i8),
    /// The tile collects no toll.
    SetTollZero,
    /// The tile's toll is multiplied.
    MultiplyToll(u8),
    /// Deal damage to a creature.
    DamageTarget(i32),
    /// Poison a creature.
    PoisonTarget,
    /// Remove poison from a creature.
    CleanseTarget,
    /// Change a tile's elemental attribute.
    ChangeTileAttribute(Attribute),

    // === Instant ===

    /// Draw cards.
    DrawCards(u8),
    /// The opponent discards random cards.
    DiscardOpponent(u8),
    /// Gain gold.
    GainGold(i64),
    /// Take gold from the opponent, never more than they have.
    StealGold(i64),
    /// Reveal the creature cards in the opponent's hand.
    InspectCreature,
    /// Damage every creature whose resistance to `element` is low.
    AoeDamage {
        element: Attribute,
        threshold: i32,
        amount: i32,
    },
    /// Remove every creature from the board.
    PurgeAllCreatures,
}

/// Which tiles a targeted spell may select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Heal,
    LevelDown,
    LevelUp,
    TollZero,
    TollMultiply,
    Damage,
    Poison,
    Cleanse,
    Attribute(Attribute),
    Teleport,
}

/// How a spell is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellUsage {
    Instant,
    Targeted(TargetKind),
    Equipment,
}

impl SpellEffect {
    /// Classify the effect.
    ///
    /// ```
    /// use realm_duel::effects::{SpellEffect, SpellUsage, TargetKind};
    ///
    /// assert_eq!(SpellEffect::ChangeLandLevel(-1).usage(), SpellUsage::Targeted(TargetKind::LevelDown));
    /// assert_eq!(SpellEffect::FirstStrike.usage(), SpellUsage::Equipment);
    /// ```
    #[must_use]
    pub fn usage(self) -> SpellUsage {
        use SpellEffect::*;

        match self {
            FixRoll(_) | DoubleDice | DrawCards(_) | DiscardOpponent(_) | GainGold(_) | StealGold(_)
            | InspectCreature | AoeDamage { .. } | PurgeAllCreatures => SpellUsage::Instant,
            BuffPower(_) | BuffDefense(_) | FirstStrike | PoisonOnHit | ReflectSkill => SpellUsage::Equipment,
            Teleport => SpellUsage::Targeted(TargetKind::Teleport),
            HealHp(_) | FullHeal => SpellUsage::Targeted(TargetKind::Heal),
            ChangeLandLevel(delta) if delta < 0 => SpellUsage::Targeted(TargetKind::LevelDown),
            ChangeLandLevel(_) => SpellUsage::Targeted(TargetKind::LevelUp),
            SetTollZero => SpellUsage::Targeted(TargetKind::TollZero),
            MultiplyToll(_) => SpellUsage::Targeted(TargetKind::TollMultiply),
            DamageTarget(_) => SpellUsage::Targeted(TargetKind::Damage),
            PoisonTarget => SpellUsage::Targeted(TargetKind::Poison),
            CleanseTarget => SpellUsage::Targeted(TargetKind::Cleanse),
            ChangeTileAttribute(attribute) => SpellUsage::Targeted(TargetKind::Attribute(attribute)),
        }
    }

    /// Check if this is a battle item.
    #[must_use]
    pub fn is_equipment(self) -> bool {
        self.usage() == SpellUsage::Equipment
    }

    /// Target kind, for targeted effects.
    #[must_use]
    pub fn target_kind(self) -> Option<TargetKind> {
        match self.usage() {
            SpellUsage::Targeted(kind) => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_effects() {
        for effect in [
            SpellEffect::FixRoll(3),
            SpellEffect::DoubleDice,
            SpellEffect::DrawCards(2),
            SpellEffect::GainGold(100),
            SpellEffect::PurgeAllCreatures,
            SpellEffect::AoeDamage { element: Attribute::Fire, threshold: 8, amount: 20 },
        ] {
            assert_eq!(effect.usage(), SpellUsage::Instant, "{:?}", effect);
            assert!(effect.target_kind().is_none());
        }
    }

    #[test]
    fn test_equipment_effects() {
        assert!(SpellEffect::BuffPower(10).is_equipment());
        assert!(SpellEffect::PoisonOnHit.is_equipment());
        assert!(SpellEffect::ReflectSkill.is_equipment());
        assert!(!SpellEffect::HealHp(10).is_equipment());
    }

    #[test]
    fn test_level_change_direction() {
        assert_eq!(SpellEffect::ChangeLandLevel(-2).target_kind(), Some(TargetKind::LevelDown));
        assert_eq!(SpellEffect::ChangeLandLevel(1).target_kind(), Some(TargetKind::LevelUp));
    }

    #[test]
    fn test_heal_variants_share_target_kind() {
        assert_eq!(SpellEffect::HealHp(5).target_kind(), SpellEffect::FullHeal.target_kind());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = SpellEffect::AoeDamage { element: Attribute::Water, threshold: 8, amount: 30 };
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: SpellEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
