//! Ruleset configuration.
//!
//! Every tunable number of the duel lives in [`RuleConfig`]: starting gold,
//! victory threshold, hand and deck limits, the toll and leveling tables, and
//! the battle and tick percentages. `RuleConfig::standard()` is the reference
//! ruleset; builders adjust individual values for variants and tests.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Highest land level.
pub const MAX_LEVEL: u8 = 5;

/// Complete ruleset for a match.
///
/// ## Example
///
/// ```
/// use realm_duel::core::RuleConfig;
///
/// let config = RuleConfig::standard().with_starting_gold(500);
/// assert_eq!(config.starting_gold, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Gold each player starts with.
    pub starting_gold: i64,

    /// Total assets at or above which a player wins.
    pub victory_threshold: i64,

    /// Cards a player may hold at the end of their turn.
    pub hand_limit: usize,

    /// Cards dealt to each player before the first turn.
    pub starting_hand: usize,

    /// Cards drawn at the start of each turn.
    pub draws_per_turn: usize,

    /// Maximum creature cards in a deck.
    pub creature_slots: usize,

    /// Maximum spell cards in a deck.
    pub spell_slots: usize,

    /// Toll of a level-1 tile before any bonus.
    pub base_toll: i64,

    /// Terrain-set bonus in percent, indexed by same-attribute tile count - 1.
    /// The last entry applies to every larger count.
    pub set_bonus_percent: Vec<i64>,

    /// Cumulative leveling cost, indexed by level - 1 (level 1 costs 0).
    pub cumulative_level_cost: [i64; MAX_LEVEL as usize],

    /// Home reward when both checkpoints were passed.
    pub lap_reward_base: i64,

    /// Additional home reward per owned tile.
    pub lap_reward_per_tile: i64,

    /// Poison tick damage in percent of max HP (minimum 1).
    pub poison_percent: i32,

    /// Base chance of a critical hit in percent.
    pub critical_percent: u32,

    /// Critical chance in percent for creatures with the critical skill.
    pub critical_skill_percent: u32,
}

impl RuleConfig {
    /// The reference ruleset.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            starting_gold: 1000,
            victory_threshold: 5000,
            hand_limit: 5,
            starting_hand: 4,
            draws_per_turn: 1,
            creature_slots: 30,
            spell_slots: 20,
            base_toll: 30,
            set_bonus_percent: vec![100, 120, 150, 180, 200],
            cumulative_level_cost: [0, 80, 200, 400, 700],
            lap_reward_base: 300,
            lap_reward_per_tile: 45,
            poison_percent: 20,
            critical_percent: 10,
            critical_skill_percent: 30,
        }
    }

    /// Set the starting gold.
    #[must_use]
    pub fn with_starting_gold(mut self, gold: i64) -> Self {
        self.starting_gold = gold;
        self
    }

    /// Set the victory threshold.
    #[must_use]
    pub fn with_victory_threshold(mut self, threshold: i64) -> Self {
        self.victory_threshold = threshold;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    /// Set the critical hit chances (base, with skill).
    #[must_use]
    pub fn with_critical_percent(mut self, base: u32, skill: u32) -> Self {
        self.critical_percent = base;
        self.critical_skill_percent = skill;
        self
    }

    /// Cumulative cost to reach `level` from level 1.
    #[must_use]
    pub fn cumulative_cost(&self, level: u8) -> Option<i64> {
        if level == 0 || level > MAX_LEVEL {
            return None;
        }
        Some(self.cumulative_level_cost[level as usize - 1])
    }

    /// Check the ruleset for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_gold <= 0 {
            return Err(ConfigError::NonPositive("starting_gold"));
        }
        if self.victory_threshold <= self.starting_gold {
            return Err(ConfigError::ThresholdTooLow {
                threshold: self.victory_threshold,
                starting_gold: self.starting_gold,
            });
        }
        if self.hand_limit == 0 {
            return Err(ConfigError::NonPositive("hand_limit"));
        }
        if self.starting_hand > self.hand_limit {
            return Err(ConfigError::StartingHandTooLarge {
                starting_hand: self.starting_hand,
                hand_limit: self.hand_limit,
            });
        }
        if self.base_toll <= 0 {
            return Err(ConfigError::NonPositive("base_toll"));
        }
        if self.set_bonus_percent.is_empty() {
            return Err(ConfigError::EmptySetBonus);
        }
        if self.cumulative_level_cost[0] != 0
            || self.cumulative_level_cost.windows(2).any(|w| w[1] <= w[0])
        {
            return Err(ConfigError::LevelCostsNotIncreasing);
        }
        if self.critical_percent > 100 || self.critical_skill_percent > 100 {
            return Err(ConfigError::PercentOutOfRange("critical"));
        }
        if !(0..=100).contains(&self.poison_percent) {
            return Err(ConfigError::PercentOutOfRange("poison_percent"));
        }
        Ok(())
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::standard()
    }
}
