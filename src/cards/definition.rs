//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: a creature's
//! stats or a spell's effect and price. Which copy sits in which hand is game
//! state, not part of the definition.

use serde::{Deserialize, Serialize};

use crate::board::Attribute;
use crate::effects::SpellEffect;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Elemental resistances of a creature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resistances {
    pub fire: i32,
    pub water: i32,
    pub earth: i32,
    pub wind: i32,
}

impl Resistances {
    /// Resistance against an attribute. Neutral ground grants none.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Fire => self.fire,
            Attribute::Water => self.water,
            Attribute::Earth => self.earth,
            Attribute::Wind => self.wind,
            Attribute::Neutral => 0,
        }
    }
}

/// Innate creature skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// Raised critical hit chance.
    Critical,
    /// Flat bonus to attack power.
    Strike(i32),
    /// Flat bonus to defense.
    Guard(i32),
}

impl Skill {
    /// Attack bonus granted by this skill.
    #[must_use]
    pub fn attack_bonus(self) -> i32 {
        match self {
            Skill::Strike(bonus) => bonus,
            _ => 0,
        }
    }

    /// Defense bonus granted by this skill.
    #[must_use]
    pub fn defense_bonus(self) -> i32 {
        match self {
            Skill::Guard(bonus) => bonus,
            _ => 0,
        }
    }
}

/// Stats printed on a creature card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureStats {
    pub hp_max: i32,
    pub affection: i32,
    pub power: i32,
    pub durability: i32,
    pub resistances: Resistances,
    /// Summon cost in gold.
    pub cost: i64,
    pub skill: Option<Skill>,
}

/// What a card does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Creature(CreatureStats),
    Spell { effect: SpellEffect, cost: i64 },
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use realm_duel::cards::{CardDefinition, CardId};
/// use realm_duel::effects::SpellEffect;
///
/// let windfall = CardDefinition::spell(CardId::new(900), "Windfall", "$", SpellEffect::GainGold(150), 20);
/// assert!(windfall.is_spell());
/// assert_eq!(windfall.cost(), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Short glyph shown on the card face.
    pub symbol: String,

    /// Creature stats or spell effect.
    pub kind: CardKind,
}

impl CardDefinition {
    /// Create a creature card.
    #[must_use]
    pub fn creature(id: CardId, name: impl Into<String>, symbol: impl Into<String>, stats: CreatureStats) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            kind: CardKind::Creature(stats),
        }
    }

    /// Create a spell card.
    #[must_use]
    pub fn spell(
        id: CardId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        effect: SpellEffect,
        cost: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            kind: CardKind::Spell { effect, cost },
        }
    }

    /// Creature stats, if this is a creature.
    #[must_use]
    pub fn creature_stats(&self) -> Option<&CreatureStats> {
        match &self.kind {
            CardKind::Creature(stats) => Some(stats),
            CardKind::Spell { .. } => None,
        }
    }

    /// Spell effect, if this is a spell.
    #[must_use]
    pub fn spell_effect(&self) -> Option<&SpellEffect> {
        match &self.kind {
            CardKind::Spell { effect, .. } => Some(effect),
            CardKind::Creature(_) => None,
        }
    }

    /// Check if this is a creature card.
    #[must_use]
    pub fn is_creature(&self) -> bool {
        matches!(self.kind, CardKind::Creature(_))
    }

    /// Check if this is a spell card.
    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell { .. })
    }

    /// Gold needed to play the card.
    #[must_use]
    pub fn cost(&self) -> i64 {
        match &self.kind {
            CardKind::Creature(stats) => stats.cost,
            CardKind::Spell { cost, .. } => *cost,
        }
    }
}
