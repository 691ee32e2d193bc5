//! # realm-duel
//!
//! A deterministic rules engine for a two-player board-and-card duel: tokens
//! move around two looped rings joined at a junction, players claim land
//! with creature cards, level it up, collect tolls, cast spells and fight
//! for each other's tiles until one side reaches the asset threshold or goes
//! bankrupt.
//!
//! ## Design Principles
//!
//! 1. **Commands In, Snapshot And Events Out**: the engine never renders,
//!    waits or plays sound. Callers issue [`Command`]s and read the
//!    [`GameState`] and the [`GameEvent`] log.
//!
//! 2. **Seeded Determinism**: dice, criticals, shuffles and CPU picks all
//!    draw from one ChaCha8 stream inside the state. A seed plus a command
//!    sequence reproduces a byte-identical snapshot.
//!
//! 3. **One Pending Decision**: whatever the engine waits on (branch choice,
//!    spell target, battle choice or answer, forced sale) is a single
//!    `Option<PendingAction>`.
//!
//! ## Example
//!
//! ```
//! use realm_duel::core::{Controller, Phase};
//! use realm_duel::rules::{cpu, Game, PlayerSetup};
//!
//! let players = [
//!     PlayerSetup::starter("Ada", Controller::Cpu),
//!     PlayerSetup::starter("Bo", Controller::Cpu),
//! ];
//! let mut game = Game::standard(players, 42).unwrap();
//! assert_eq!(game.state().phase, Phase::Ready);
//!
//! cpu::run_self_play(&mut game, 10).unwrap();
//! assert!(!game.state().history.is_empty());
//! ```
//!
//! ## Modules
//!
//! - `core`: ids, RNG, ruleset, errors, state and commands
//! - `board`: the ring graph and terrain
//! - `cards`: card definitions, the catalog and deck building
//! - `economy`: tolls, gold, ownership and liquidation
//! - `effects`: spell effects, targeting and casting
//! - `battle`: combat units and battle resolution
//! - `events`: turn resolution events
//! - `rules`: turn flow, land actions, victory, CPU seats and the `Game` driver

pub mod core;
pub mod board;
pub mod cards;
pub mod economy;
pub mod effects;
pub mod battle;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandRecord, Controller, GameError, GameOutcome, GameRng, GameState, PendingAction, Phase, PlayerId,
    PlayerMap, RuleConfig, RulesContext, SetupError,
};

pub use crate::board::{Attribute, BoardGraph, Direction, TerrainTable, TileId};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, Collection, DeckList};

pub use crate::effects::{SpellEffect, SpellEngine, TargetKind};

pub use crate::battle::{resolve_battle, BattleOutcome, BattleReport, CombatUnit};

pub use crate::events::GameEvent;

pub use crate::rules::{Game, PlayerSetup};
