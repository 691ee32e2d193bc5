//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition of a match and provides
//! fast lookup by `CardId`. [`CardCatalog::standard`] is the reference set;
//! its ids are exported from [`ids`].

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CreatureStats, Resistances, Skill};
use crate::board::Attribute;
use crate::effects::{SpellEffect, SpellUsage};

/// Ids of the reference catalog.
pub mod ids {
    use super::CardId;

    pub const EMBER_IMP: CardId = CardId::new(1);
    pub const FLAME_DRAKE: CardId = CardId::new(2);
    pub const TIDE_SPRITE: CardId = CardId::new(3);
    pub const REEF_GUARDIAN: CardId = CardId::new(4);
    pub const SAND_GOLEM: CardId = CardId::new(5);
    pub const DUNE_SCOUT: CardId = CardId::new(6);
    pub const GALE_HAWK: CardId = CardId::new(7);
    pub const STORM_ROC: CardId = CardId::new(8);
    pub const WANDERING_KNIGHT: CardId = CardId::new(9);
    pub const MOSS_TREANT: CardId = CardId::new(10);
    pub const ASH_WOLF: CardId = CardId::new(11);
    pub const MIST_SERPENT: CardId = CardId::new(12);

    pub const LOADED_DIE: CardId = CardId::new(101);
    pub const TWIN_DICE: CardId = CardId::new(102);
    pub const HARD_FANG: CardId = CardId::new(103);
    pub const IRON_SHELL: CardId = CardId::new(104);
    pub const QUICKDRAW: CardId = CardId::new(105);
    pub const VENOM_BARB: CardId = CardId::new(106);
    pub const MIRROR_CHARM: CardId = CardId::new(107);
    pub const BLINK: CardId = CardId::new(108);
    pub const MEND: CardId = CardId::new(109);
    pub const INSIGHT: CardId = CardId::new(110);
    pub const PICKPOCKET: CardId = CardId::new(111);
    pub const RESTORATION: CardId = CardId::new(112);
    pub const QUAKE: CardId = CardId::new(113);
    pub const BLESSING: CardId = CardId::new(114);
    pub const DROUGHT: CardId = CardId::new(115);
    pub const HARVEST_MOON: CardId = CardId::new(116);
    pub const FIREBOLT: CardId = CardId::new(117);
    pub const BLIGHT: CardId = CardId::new(118);
    pub const PURIFY: CardId = CardId::new(119);
    pub const WINDFALL: CardId = CardId::new(120);
    pub const PLUNDER: CardId = CardId::new(121);
    pub const SCRYING: CardId = CardId::new(122);
    pub const TIDAL_SURGE: CardId = CardId::new(123);
    pub const TERRAFORM: CardId = CardId::new(124);
    pub const CATACLYSM: CardId = CardId::new(125);
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use realm_duel::cards::{CardCatalog, CardDefinition, CardId};
/// use realm_duel::effects::SpellEffect;
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::spell(CardId::new(1), "Windfall", "$", SpellEffect::GainGold(100), 10));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Windfall");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }

    /// Creature stats of a card, if it is a creature.
    #[must_use]
    pub fn creature(&self, id: CardId) -> Option<&CreatureStats> {
        self.get(id)?.creature_stats()
    }

    /// Spell effect and cost of a card, if it is a spell.
    #[must_use]
    pub fn spell(&self, id: CardId) -> Option<(SpellEffect, i64)> {
        let card = self.get(id)?;
        card.spell_effect().map(|&effect| (effect, card.cost()))
    }

    /// Effect of a card, if it is a battle item.
    #[must_use]
    pub fn equipment(&self, id: CardId) -> Option<SpellEffect> {
        self.spell(id)
            .map(|(effect, _)| effect)
            .filter(|effect| effect.usage() == SpellUsage::Equipment)
    }

    /// The reference card set: twelve creatures and one spell per effect.
    #[must_use]
    pub fn standard() -> Self {
        use ids::*;

        let mut catalog = Self::new();

        let creatures = [
            (EMBER_IMP, "Ember Imp", "i", 30, 8, 12, 6, [8, 1, 2, 3], 60, None),
            (FLAME_DRAKE, "Flame Drake", "D", 60, 6, 20, 12, [10, 0, 4, 5], 180, Some(Skill::Critical)),
            (TIDE_SPRITE, "Tide Sprite", "s", 35, 12, 10, 8, [1, 9, 2, 3], 70, None),
            (REEF_GUARDIAN, "Reef Guardian", "R", 70, 10, 14, 20, [3, 10, 2, 1], 200, Some(Skill::Guard(6))),
            (SAND_GOLEM, "Sand Golem", "G", 80, 4, 16, 22, [2, 1, 10, 0], 220, Some(Skill::Guard(4))),
            (DUNE_SCOUT, "Dune Scout", "d", 30, 10, 11, 7, [2, 0, 8, 3], 60, None),
            (GALE_HAWK, "Gale Hawk", "h", 32, 8, 15, 5, [1, 2, 0, 9], 90, Some(Skill::Strike(4))),
            (STORM_ROC, "Storm Roc", "S", 65, 6, 22, 10, [2, 3, 1, 10], 210, Some(Skill::Critical)),
            (WANDERING_KNIGHT, "Wandering Knight", "K", 50, 10, 16, 14, [4, 4, 4, 4], 140, Some(Skill::Strike(3))),
            (MOSS_TREANT, "Moss Treant", "T", 90, 16, 10, 18, [0, 6, 6, 2], 160, None),
            (ASH_WOLF, "Ash Wolf", "w", 40, 8, 17, 8, [7, 0, 1, 3], 110, Some(Skill::Strike(2))),
            (MIST_SERPENT, "Mist Serpent", "m", 45, 14, 13, 12, [0, 7, 1, 4], 120, None),
        ];
        for (id, name, symbol, hp_max, affection, power, durability, [fire, water, earth, wind], cost, skill) in
            creatures
        {
            catalog.register(CardDefinition::creature(
                id,
                name,
                symbol,
                CreatureStats {
                    hp_max,
                    affection,
                    power,
                    durability,
                    resistances: Resistances { fire, water, earth, wind },
                    cost,
                    skill,
                },
            ));
        }

        let spells = [
            (LOADED_DIE, "Loaded Die", "6", SpellEffect::FixRoll(6), 20),
            (TWIN_DICE, "Twin Dice", "2", SpellEffect::DoubleDice, 30),
            (HARD_FANG, "Hard Fang", "/", SpellEffect::BuffPower(10), 40),
            (IRON_SHELL, "Iron Shell", "#", SpellEffect::BuffDefense(10), 40),
            (QUICKDRAW, "Quickdraw", ">", SpellEffect::FirstStrike, 50),
            (VENOM_BARB, "Venom Barb", "v", SpellEffect::PoisonOnHit, 40),
            (MIRROR_CHARM, "Mirror Charm", "o", SpellEffect::ReflectSkill, 30),
            (BLINK, "Blink", "*", SpellEffect::Teleport, 60),
            (MEND, "Mend", "+", SpellEffect::HealHp(20), 20),
            (INSIGHT, "Insight", "?", SpellEffect::DrawCards(2), 30),
            (PICKPOCKET, "Pickpocket", "-", SpellEffect::DiscardOpponent(1), 40),
            (RESTORATION, "Restoration", "@", SpellEffect::FullHeal, 50),
            (QUAKE, "Quake", "q", SpellEffect::ChangeLandLevel(-1), 120),
            (BLESSING, "Blessing", "^", SpellEffect::ChangeLandLevel(1), 100),
            (DROUGHT, "Drought", "0", SpellEffect::SetTollZero, 60),
            (HARVEST_MOON, "Harvest Moon", "x", SpellEffect::MultiplyToll(2), 80),
            (FIREBOLT, "Firebolt", "!", SpellEffect::DamageTarget(20), 50),
            (BLIGHT, "Blight", "~", SpellEffect::PoisonTarget, 40),
            (PURIFY, "Purify", "=", SpellEffect::CleanseTarget, 20),
            (WINDFALL, "Windfall", "$", SpellEffect::GainGold(150), 20),
            (PLUNDER, "Plunder", "&", SpellEffect::StealGold(100), 40),
            (SCRYING, "Scrying", "e", SpellEffect::InspectCreature, 10),
            (
                TIDAL_SURGE,
                "Tidal Surge",
                "W",
                SpellEffect::AoeDamage { element: Attribute::Water, threshold: 8, amount: 20 },
                80,
            ),
            (TERRAFORM, "Terraform", "%", SpellEffect::ChangeTileAttribute(Attribute::Fire), 50),
            (CATACLYSM, "Cataclysm", "X", SpellEffect::PurgeAllCreatures, 300),
        ];
        for (id, name, symbol, effect, cost) in spells {
            catalog.register(CardDefinition::spell(id, name, symbol, effect, cost));
        }

        catalog
    }
}
