//! Core engine types: players, RNG, configuration, errors, state, commands.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod context;
pub mod state;

pub use player::{PlayerId, PlayerMap, SEAT_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{RuleConfig, MAX_LEVEL};
pub use error::{ConfigError, DeckError, GameError, SetupError, SnapshotError};
pub use action::{Command, CommandRecord};
pub use context::RulesContext;
pub use state::{
    BattleSetup, Controller, DiceRoll, GameOutcome, GameState, PendingAction, Phase, Player,
    SpellSelection, Tile, TileCreature, TileStatus, TollModifier, VictoryReason,
};
