//! Deck building.
//!
//! A [`Collection`] counts the copies of each card a player owns. A
//! [`DeckList`] picks from it into two slot groups, creatures and spells,
//! each with its own cap. At match start the list is expanded into a
//! shuffled draw pile.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::CardId;
use super::registry::{ids, CardCatalog};
use crate::core::{DeckError, GameRng, RuleConfig};

/// Copies of each card a player owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    owned: FxHashMap<CardId, u8>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `copies` of every card in the catalog.
    #[must_use]
    pub fn complete(catalog: &CardCatalog, copies: u8) -> Self {
        Self {
            owned: catalog.iter().map(|c| (c.id, copies)).collect(),
        }
    }

    /// Set the owned count of a card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId, copies: u8) -> Self {
        self.owned.insert(card, copies);
        self
    }

    /// Owned copies of a card.
    #[must_use]
    pub fn owned(&self, card: CardId) -> u8 {
        self.owned.get(&card).copied().unwrap_or(0)
    }
}

/// Which slot group a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotGroup {
    Creatures,
    Spells,
}

/// A deck list: card counts in two capped slot groups.
///
/// ## Example
///
/// ```
/// use realm_duel::cards::{ids, CardCatalog, Collection, DeckList};
/// use realm_duel::core::RuleConfig;
///
/// let catalog = CardCatalog::standard();
/// let collection = Collection::complete(&catalog, 3);
/// let config = RuleConfig::standard();
///
/// let mut deck = DeckList::new();
/// deck.add(&catalog, &collection, &config, ids::SAND_GOLEM).unwrap();
/// deck.add(&catalog, &collection, &config, ids::MEND).unwrap();
///
/// assert_eq!(deck.creature_count(), 1);
/// assert_eq!(deck.spell_count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    creatures: FxHashMap<CardId, u8>,
    spells: FxHashMap<CardId, u8>,
}

impl DeckList {
    /// Create an empty deck list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put creature copies in the creature slots without validation.
    #[must_use]
    pub fn with_creature(mut self, card: CardId, copies: u8) -> Self {
        self.creatures.insert(card, copies);
        self
    }

    /// Put spell copies in the spell slots without validation.
    #[must_use]
    pub fn with_spell(mut self, card: CardId, copies: u8) -> Self {
        self.spells.insert(card, copies);
        self
    }

    /// The reference starter deck: 14 creatures and 16 spells from
    /// [`CardCatalog::standard`].
    #[must_use]
    pub fn starter() -> Self {
        use ids::*;

        let creatures = [
            (EMBER_IMP, 2),
            (TIDE_SPRITE, 2),
            (DUNE_SCOUT, 2),
            (GALE_HAWK, 2),
            (WANDERING_KNIGHT, 1),
            (MOSS_TREANT, 1),
            (ASH_WOLF, 1),
            (MIST_SERPENT, 1),
            (SAND_GOLEM, 1),
            (FLAME_DRAKE, 1),
        ];
        let spells = [
            (LOADED_DIE, 1),
            (TWIN_DICE, 1),
            (HARD_FANG, 1),
            (IRON_SHELL, 1),
            (QUICKDRAW, 1),
            (MEND, 1),
            (RESTORATION, 1),
            (QUAKE, 1),
            (BLESSING, 1),
            (DROUGHT, 1),
            (FIREBOLT, 1),
            (WINDFALL, 1),
            (PLUNDER, 1),
            (SCRYING, 1),
            (TIDAL_SURGE, 1),
            (BLINK, 1),
        ];

        let deck = creatures
            .into_iter()
            .fold(Self::new(), |deck, (card, n)| deck.with_creature(card, n));
        spells.into_iter().fold(deck, |deck, (card, n)| deck.with_spell(card, n))
    }

    /// Add one copy of a card to its slot group.
    pub fn add(
        &mut self,
        catalog: &CardCatalog,
        collection: &Collection,
        config: &RuleConfig,
        card: CardId,
    ) -> Result<(), DeckError> {
        let group = Self::group_of(catalog, card)?;
        let (slots, cap) = match group {
            SlotGroup::Creatures => (&mut self.creatures, config.creature_slots),
            SlotGroup::Spells => (&mut self.spells, config.spell_slots),
        };
        let total: usize = slots.values().map(|&n| n as usize).sum();
        if total >= cap {
            return Err(DeckError::SlotsFull { cap });
        }
        let owned = collection.owned(card);
        let count = slots.entry(card).or_insert(0);
        if *count >= owned {
            if *count == 0 {
                slots.remove(&card);
            }
            return Err(DeckError::NotOwned { card, owned });
        }
        *count += 1;
        Ok(())
    }

    /// Remove one copy of a card.
    pub fn remove(&mut self, card: CardId) -> Result<(), DeckError> {
        for slots in [&mut self.creatures, &mut self.spells] {
            if let Some(count) = slots.get_mut(&card) {
                *count -= 1;
                if *count == 0 {
                    slots.remove(&card);
                }
                return Ok(());
            }
        }
        Err(DeckError::NotInDeck(card))
    }

    /// Copies of a card in either group.
    #[must_use]
    pub fn count(&self, card: CardId) -> u8 {
        self.creatures.get(&card).or_else(|| self.spells.get(&card)).copied().unwrap_or(0)
    }

    /// Cards in the creature slots.
    #[must_use]
    pub fn creature_count(&self) -> usize {
        self.creatures.values().map(|&n| n as usize).sum()
    }

    /// Cards in the spell slots.
    #[must_use]
    pub fn spell_count(&self) -> usize {
        self.spells.values().map(|&n| n as usize).sum()
    }

    /// Check every deck rule against a catalog and collection.
    pub fn validate(&self, catalog: &CardCatalog, collection: &Collection, config: &RuleConfig) -> Result<(), DeckError> {
        if self.creature_count() + self.spell_count() == 0 {
            return Err(DeckError::Empty);
        }
        if self.creature_count() > config.creature_slots {
            return Err(DeckError::SlotsFull { cap: config.creature_slots });
        }
        if self.spell_count() > config.spell_slots {
            return Err(DeckError::SlotsFull { cap: config.spell_slots });
        }
        for (slots, expected) in [(&self.creatures, SlotGroup::Creatures), (&self.spells, SlotGroup::Spells)] {
            let mut cards: Vec<_> = slots.iter().collect();
            cards.sort();
            for (&card, &count) in cards {
                if Self::group_of(catalog, card)? != expected {
                    return Err(DeckError::WrongSlot(card));
                }
                let owned = collection.owned(card);
                if count > owned {
                    return Err(DeckError::NotOwned { card, owned });
                }
            }
        }
        Ok(())
    }

    /// Every copy in the list, in ascending id order.
    #[must_use]
    pub fn cards(&self) -> Vec<CardId> {
        let mut cards: Vec<CardId> = self
            .creatures
            .iter()
            .chain(self.spells.iter())
            .flat_map(|(&card, &n)| std::iter::repeat(card).take(n as usize))
            .collect();
        cards.sort();
        cards
    }

    /// Expand into a shuffled draw pile (top = end).
    #[must_use]
    pub fn build_pile(&self, rng: &mut GameRng) -> Vec<CardId> {
        let mut pile = self.cards();
        rng.shuffle(&mut pile);
        pile
    }

    fn group_of(catalog: &CardCatalog, card: CardId) -> Result<SlotGroup, DeckError> {
        let definition = catalog.get(card).ok_or(DeckError::UnknownCard(card))?;
        Ok(if definition.is_creature() {
            SlotGroup::Creatures
        } else {
            SlotGroup::Spells
        })
    }
}
