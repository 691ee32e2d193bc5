//! Battle resolution.
//!
//! A battle is a single round. The attacker strikes first unless the defender
//! carries a first-strike item; the second unit strikes back only if it
//! survived. Criticals are rolled by the caller so this module stays pure.

use serde::{Deserialize, Serialize};

use super::unit::CombatUnit;

/// Whether each side's strike is critical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CritRolls {
    pub attacker: bool,
    pub defender: bool,
}

impl CritRolls {
    /// No criticals on either side.
    pub const NONE: Self = Self { attacker: false, defender: false };
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The attacker takes the tile.
    DefenderDefeated,
    /// The defender holds the tile and collects the toll.
    AttackerDefeated,
    /// Both survive; the toll is paid and the summon cost refunded.
    Draw,
}

/// Result of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub attacker_hp: i32,
    pub defender_hp: i32,
    pub crits: CritRolls,
    pub defender_struck_first: bool,
}

/// Damage of one strike.
///
/// A critical strike uses `max(round(attack * 1.5), attack + 1)`.
///
/// ```
/// use realm_duel::battle::strike_damage;
///
/// assert_eq!(strike_damage(40, 15, false), 25);
/// assert_eq!(strike_damage(41, 15, true), 47);
/// assert_eq!(strike_damage(10, 30, false), 0);
/// ```
#[must_use]
pub fn strike_damage(attack: i32, defense: i32, critical: bool) -> i32 {
    let attack = if critical {
        ((attack * 3 + 1) / 2).max(attack + 1)
    } else {
        attack
    };
    (attack - defense).max(0)
}

/// Resolve one round between two units.
#[must_use]
pub fn resolve_battle(attacker: &CombatUnit, defender: &CombatUnit, crits: CritRolls) -> BattleReport {
    let mut attacker_hp = attacker.hp;
    let mut defender_hp = defender.hp;
    let defender_struck_first = defender.equipment.first_strike;

    let hit_defender = strike_damage(attacker.attack, defender.defense, crits.attacker);
    let hit_attacker = strike_damage(defender.attack, attacker.defense, crits.defender);

    if defender_struck_first {
        attacker_hp -= hit_attacker;
        if attacker_hp > 0 {
            defender_hp -= hit_defender;
        }
    } else {
        defender_hp -= hit_defender;
        if defender_hp > 0 {
            attacker_hp -= hit_attacker;
        }
    }

    let outcome = if defender_hp <= 0 {
        BattleOutcome::DefenderDefeated
    } else if attacker_hp <= 0 {
        BattleOutcome::AttackerDefeated
    } else {
        BattleOutcome::Draw
    };

    BattleReport {
        outcome,
        attacker_hp: attacker_hp.max(0),
        defender_hp: defender_hp.max(0),
        crits,
        defender_struck_first,
    }
}
