//! Combat units.
//!
//! A `CombatUnit` is a creature's fighting profile for one battle, built once
//! from its card stats, the tile it fights on and the battle items on both
//! sides. Nothing about it changes during the round except HP.

use serde::{Deserialize, Serialize};

use crate::board::Attribute;
use crate::cards::{CardId, CreatureStats, Skill};
use crate::core::{PlayerId, RuleConfig};
use crate::effects::SpellEffect;

/// Stat changes granted by a battle item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equipment {
    pub power: i32,
    pub durability: i32,
    pub first_strike: bool,
    pub poison_on_hit: bool,
    pub reflect_skill: bool,
}

impl Equipment {
    /// Equipment for an item effect; non-item effects grant nothing.
    #[must_use]
    pub fn from_effect(effect: Option<SpellEffect>) -> Self {
        let mut equipment = Self::default();
        match effect {
            Some(SpellEffect::BuffPower(n)) => equipment.power = n,
            Some(SpellEffect::BuffDefense(n)) => equipment.durability = n,
            Some(SpellEffect::FirstStrike) => equipment.first_strike = true,
            Some(SpellEffect::PoisonOnHit) => equipment.poison_on_hit = true,
            Some(SpellEffect::ReflectSkill) => equipment.reflect_skill = true,
            _ => {}
        }
        equipment
    }
}

/// One side of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatUnit {
    pub card: CardId,
    pub owner: PlayerId,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// Chance of a critical strike, in percent.
    pub critical_percent: u32,
    pub equipment: Equipment,
}

impl CombatUnit {
    /// Build a unit fighting on ground of `attribute`.
    ///
    /// `opposing` is the other side's equipment; a reflecting item there
    /// cancels this unit's skill.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        card: CardId,
        owner: PlayerId,
        stats: &CreatureStats,
        hp: i32,
        attribute: Attribute,
        equipment: Equipment,
        opposing: Equipment,
        config: &RuleConfig,
    ) -> Self {
        let skill = stats.skill.filter(|_| !opposing.reflect_skill);
        let resist = stats.resistances.get(attribute);

        let attack = stats.power * 2 + resist * 4 + equipment.power + skill.map_or(0, Skill::attack_bonus);
        let defense = stats.durability + resist + equipment.durability + skill.map_or(0, Skill::defense_bonus);
        let critical_percent = match skill {
            Some(Skill::Critical) => config.critical_skill_percent,
            _ => config.critical_percent,
        };

        Self {
            card,
            owner,
            hp,
            attack,
            defense,
            critical_percent,
            equipment,
        }
    }
}
