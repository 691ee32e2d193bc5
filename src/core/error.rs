//! Error types.
//!
//! Commands never panic on bad input: they return a [`GameError`] and leave
//! the state as it was (or, for a rejected spell target, rolled back).

use thiserror::Error;

use super::state::Phase;
use crate::board::TileId;
use crate::cards::CardId;

/// Why a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the match is already decided")]
    GameOver,
    #[error("command not allowed in phase {0:?}")]
    WrongPhase(Phase),
    #[error("another action is pending")]
    PendingActionActive,
    #[error("no matching action is pending")]
    NothingPending,
    #[error("{0} is not in hand")]
    NotInHand(CardId),
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("{0} is not a creature card")]
    NotACreature(CardId),
    #[error("{0} is not a spell card")]
    NotASpell(CardId),
    #[error("{0} can only be equipped in battle")]
    EquipmentOnly(CardId),
    #[error("{0} is not a battle item")]
    NotEquipment(CardId),
    #[error("not enough gold (needed {needed}, available {available})")]
    InsufficientGold { needed: i64, available: i64 },
    #[error("{0} is not a valid target")]
    InvalidTarget(TileId),
    #[error("{0} is not a branch option")]
    InvalidBranch(TileId),
    #[error("the spell has no valid targets")]
    NoValidTargets,
    #[error("{0} cannot be owned")]
    NotOwnable(TileId),
    #[error("{0} is already occupied")]
    TileOccupied(TileId),
    #[error("{0} is not owned by the acting player")]
    NotOwner(TileId),
    #[error("the acting player is not standing on {0}")]
    NotStandingOn(TileId),
    #[error("cannot level {tile} from {current} to {requested}")]
    InvalidLevel { tile: TileId, current: u8, requested: u8 },
    #[error("a land action was already taken this turn")]
    LandActionUsed,
    #[error("hand is over the limit; discard first")]
    DiscardRequired,
    #[error("hand is within the limit")]
    DiscardNotRequired,
    #[error("outstanding debt must be settled first")]
    DebtOutstanding,
}

/// Why a deck list was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("{0} belongs in the other slot group")]
    WrongSlot(CardId),
    #[error("slot group is full ({cap} cards)")]
    SlotsFull { cap: usize },
    #[error("only {owned} copies of {card} are owned")]
    NotOwned { card: CardId, owned: u8 },
    #[error("{0} is not in the deck")]
    NotInDeck(CardId),
    #[error("the deck has no cards")]
    Empty,
}

/// Why a ruleset was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("victory threshold {threshold} must exceed starting gold {starting_gold}")]
    ThresholdTooLow { threshold: i64, starting_gold: i64 },
    #[error("starting hand {starting_hand} exceeds hand limit {hand_limit}")]
    StartingHandTooLarge { starting_hand: usize, hand_limit: usize },
    #[error("set bonus table is empty")]
    EmptySetBonus,
    #[error("cumulative level costs must start at 0 and strictly increase")]
    LevelCostsNotIncreasing,
    #[error("{0} percentage out of range")]
    PercentOutOfRange(&'static str),
}

/// Failure while building a match.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid ruleset: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid deck for {player}: {source}")]
    Deck {
        player: super::PlayerId,
        #[source]
        source: DeckError,
    },
    #[error("terrain table covers {terrain} tiles but the board has {board}")]
    TerrainMismatch { terrain: usize, board: usize },
}

/// Failure while encoding or decoding a state snapshot.
#[derive(Debug, Error)]
#[error("snapshot codec failed: {0}")]
pub struct SnapshotError(#[from] pub bincode::Error);
