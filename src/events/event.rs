//! Turn resolution events.
//!
//! The engine appends one `GameEvent` per observable fact to
//! `GameState::events` as the fact happens. A presentation layer drains the
//! log with `Game::drain_events` and replays it at its own pace; the engine
//! never waits for that.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::battle::BattleOutcome;
use crate::board::{BranchCandidates, TileId};
use crate::cards::CardId;
use crate::core::{GameOutcome, PlayerId};

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DiceRolled {
        player: PlayerId,
        dice: SmallVec<[u8; 2]>,
        total: u8,
    },
    /// A token moved one tile (or teleported).
    Moved {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },
    BranchPending {
        player: PlayerId,
        candidates: BranchCandidates,
    },
    CheckpointPassed {
        player: PlayerId,
        /// 0 for checkpoint 1, 1 for checkpoint 2.
        checkpoint: usize,
    },
    HomeReached {
        player: PlayerId,
        reward: i64,
    },
    CreaturePlaced {
        player: PlayerId,
        tile: TileId,
        card: CardId,
    },
    LevelChanged {
        tile: TileId,
        from: u8,
        to: u8,
    },
    TollPaid {
        payer: PlayerId,
        payee: PlayerId,
        tile: TileId,
        amount: i64,
    },
    GoldChanged {
        player: PlayerId,
        delta: i64,
        balance: i64,
    },
    BattleStarted {
        attacker: PlayerId,
        tile: TileId,
        attacking: CardId,
        defending: CardId,
    },
    BattleFinished {
        tile: TileId,
        outcome: BattleOutcome,
        attacker_hp: i32,
        defender_hp: i32,
    },
    TileCaptured {
        player: PlayerId,
        tile: TileId,
        card: CardId,
    },
    CreatureDefeated {
        owner: PlayerId,
        tile: TileId,
        card: CardId,
    },
    PoisonTick {
        tile: TileId,
        damage: i32,
        hp: i32,
    },
    CreatureHealed {
        tile: TileId,
        amount: i32,
        hp: i32,
    },
    SpellCast {
        player: PlayerId,
        card: CardId,
        target: Option<TileId>,
    },
    CardsDrawn {
        player: PlayerId,
        count: usize,
    },
    CardDiscarded {
        player: PlayerId,
        card: CardId,
    },
    /// The creature cards in `player`'s hand were shown to the opponent.
    HandRevealed {
        player: PlayerId,
        creatures: Vec<CardId>,
    },
    TileSold {
        player: PlayerId,
        tile: TileId,
        value: i64,
    },
    ForcedSaleStarted {
        player: PlayerId,
        debt: i64,
    },
    TurnEnded {
        player: PlayerId,
        turn: u32,
    },
    VictoryReached {
        outcome: GameOutcome,
    },
}

impl GameEvent {
    /// The player the event is about, when there is exactly one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        use GameEvent::*;

        match self {
            DiceRolled { player, .. }
            | Moved { player, .. }
            | BranchPending { player, .. }
            | CheckpointPassed { player, .. }
            | HomeReached { player, .. }
            | CreaturePlaced { player, .. }
            | GoldChanged { player, .. }
            | TileCaptured { player, .. }
            | SpellCast { player, .. }
            | CardsDrawn { player, .. }
            | CardDiscarded { player, .. }
            | HandRevealed { player, .. }
            | TileSold { player, .. }
            | ForcedSaleStarted { player, .. }
            | TurnEnded { player, .. } => Some(*player),
            TollPaid { payer, .. } => Some(*payer),
            BattleStarted { attacker, .. } => Some(*attacker),
            CreatureDefeated { owner, .. } => Some(*owner),
            VictoryReached { outcome } => Some(outcome.winner),
            LevelChanged { .. } | BattleFinished { .. } | PoisonTick { .. } | CreatureHealed { .. } => None,
        }
    }
}
