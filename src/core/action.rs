//! Player commands.
//!
//! Every entry point of [`Game`](crate::rules::Game) has a matching
//! [`Command`] variant so that a match can be driven, logged and replayed as
//! plain data. `Game::apply` dispatches a command to its entry point.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::TileId;
use crate::cards::CardId;

/// A player command.
///
/// ## Example
///
/// ```
/// use realm_duel::board::TileId;
/// use realm_duel::cards::CardId;
/// use realm_duel::core::Command;
///
/// let cast = Command::UseSpell { card: CardId::new(109), target: Some(TileId::new(5)) };
/// assert!(!cast.is_selection_step());
/// assert!(Command::CancelSpellSelection.is_selection_step());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    RollDice,
    PickBranch(TileId),
    UseSpell { card: CardId, target: Option<TileId> },
    ConfirmSpellTarget(TileId),
    CancelSpellSelection,
    ChooseBattle { creature: CardId, item: Option<CardId> },
    PayToll,
    RespondBattle { item: Option<CardId> },
    PlaceCreature { card: CardId, tile: TileId },
    ConfirmLevelUp { tile: TileId, level: u8 },
    SellTile(TileId),
    Discard(CardId),
    EndTurn,
}

impl Command {
    /// Commands that continue a pending spell selection instead of
    /// cancelling it.
    #[must_use]
    pub fn is_selection_step(&self) -> bool {
        matches!(self, Command::ConfirmSpellTarget(_) | Command::CancelSpellSelection)
    }
}

/// A recorded command with metadata for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The player who issued the command.
    pub player: PlayerId,

    /// The command.
    pub command: Command,

    /// Turn number when it was applied.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(player: PlayerId, command: Command, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            command,
            turn,
            sequence,
        }
    }
}
