//! Creature battles.
//!
//! - `unit`: combat units built from card stats, terrain and battle items
//! - `resolver`: the pure single-round resolution
//! - `engage`: applying a resolved battle to the board and the gold

pub mod unit;
pub mod resolver;
pub mod engage;

pub use unit::{CombatUnit, Equipment};
pub use resolver::{resolve_battle, strike_damage, BattleOutcome, BattleReport, CritRolls};
pub use engage::engage;
