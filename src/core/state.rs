//! Game state: the complete, serializable snapshot of a match.
//!
//! ## Tiles
//!
//! Ownership, level, terrain, the resident creature and status effects. Toll
//! is never stored; see [`crate::economy::toll`].
//!
//! ## Players
//!
//! Position and travel direction, gold, checkpoint flags, hand, draw pile and
//! discard pile, and the one-shot dice modifiers.
//!
//! ## Turn bookkeeping
//!
//! Phase, remaining steps, the single pending action, the latched outcome, the
//! RNG, and the event log and command history. The log and history use `im`
//! persistent vectors so a state clone stays O(1) in their length.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::CommandRecord;
use super::error::SnapshotError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{Attribute, BranchCandidates, Direction, Terrain, TileId};
use crate::cards::{CardId, CreatureStats};
use crate::effects::SpellEffect;
use crate::events::GameEvent;

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the active player to roll.
    #[default]
    Ready,
    /// Movement in progress.
    Moving,
    /// Movement paused on the junction.
    BranchSelecting,
    /// Movement finished; land actions and `end_turn` are available.
    Moved,
}

/// Temporary toll modifier on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TollModifier {
    /// The tile collects nothing.
    Devastated,
    /// The tile's toll is multiplied by `factor`.
    Harvested { factor: u8 },
}

/// Status effects on a tile. Reset whenever the tile is cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileStatus {
    pub poisoned: bool,
    pub toll_modifier: Option<TollModifier>,
}

/// A creature standing on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCreature {
    pub card: CardId,
    pub owner: PlayerId,
    pub stats: CreatureStats,
    /// Current HP, `0 < hp <= stats.hp_max` while on the board.
    pub hp: i32,
}

impl TileCreature {
    /// A creature at full health.
    #[must_use]
    pub fn new(card: CardId, owner: PlayerId, stats: CreatureStats) -> Self {
        Self {
            card,
            owner,
            stats,
            hp: stats.hp_max,
        }
    }

    /// Override the current HP.
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.clamp(1, self.stats.hp_max);
        self
    }

    /// Check if the creature is below max HP.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.hp < self.stats.hp_max
    }
}

/// One board tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub owner: Option<PlayerId>,
    pub level: u8,
    pub terrain: Terrain,
    pub creature: Option<TileCreature>,
    pub status: TileStatus,
}

impl Tile {
    /// An unowned tile.
    #[must_use]
    pub fn new(terrain: Terrain) -> Self {
        Self {
            owner: None,
            level: 0,
            terrain,
            creature: None,
            status: TileStatus::default(),
        }
    }

    /// Elemental attribute.
    #[must_use]
    pub fn attribute(&self) -> Attribute {
        self.terrain.attribute
    }

    /// Check if the tile is owned by `player`.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Reset owner, level, creature and status together.
    ///
    /// Returns the creature that stood here.
    pub fn clear(&mut self) -> Option<TileCreature> {
        self.owner = None;
        self.level = 0;
        self.status = TileStatus::default();
        self.creature.take()
    }
}

/// Who makes a seat's decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    #[default]
    Human,
    Cpu,
}

/// Per-seat state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub controller: Controller,
    pub position: TileId,
    /// Tile the token last moved from. `None` after a teleport.
    pub came_from: Option<TileId>,
    /// May be negative while a debt is being liquidated.
    pub gold: i64,
    pub direction: Direction,
    pub checkpoints: [bool; 2],
    pub hand: Vec<CardId>,
    /// Draw pile, top = end.
    pub pile: Vec<CardId>,
    pub discard: Vec<CardId>,
    pub double_next_roll: bool,
    pub forced_roll: Option<u8>,
}

impl Player {
    /// A player standing on `home` with an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>, controller: Controller, gold: i64, home: TileId) -> Self {
        Self {
            name: name.into(),
            controller,
            position: home,
            came_from: None,
            gold,
            direction: Direction::Clockwise,
            checkpoints: [false; 2],
            hand: Vec::new(),
            pile: Vec::new(),
            discard: Vec::new(),
            double_next_roll: false,
            forced_roll: None,
        }
    }

    /// Check if the seat is CPU-controlled.
    #[must_use]
    pub fn is_cpu(&self) -> bool {
        self.controller == Controller::Cpu
    }

    /// Check if both checkpoints were passed this lap.
    #[must_use]
    pub fn has_all_checkpoints(&self) -> bool {
        self.checkpoints.iter().all(|&c| c)
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn hand_index(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|&c| c == card)
    }

    /// Remove one copy of a card from hand.
    ///
    /// Returns the index it was taken from.
    pub fn take_from_hand(&mut self, card: CardId) -> Option<usize> {
        let index = self.hand_index(card)?;
        self.hand.remove(index);
        Some(index)
    }

    /// Draw from the top of the pile, reshuffling the discard pile into the
    /// pile when it runs out.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<CardId> {
        if self.pile.is_empty() && !self.discard.is_empty() {
            self.pile.append(&mut self.discard);
            rng.shuffle(&mut self.pile);
        }
        let card = self.pile.pop()?;
        self.hand.push(card);
        Some(card)
    }
}

/// A dice roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Individual die faces. A forced roll has a single entry.
    pub dice: SmallVec<[u8; 2]>,
    pub total: u8,
    pub forced: bool,
}

/// A targeted spell awaiting confirmation.
///
/// The card has left the hand and its cost is reserved but not charged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSelection {
    pub caster: PlayerId,
    pub card: CardId,
    pub effect: SpellEffect,
    pub cost: i64,
    pub candidates: Vec<TileId>,
    /// Where the card sat in hand, for restoring it.
    pub hand_index: usize,
}

/// A battle waiting for the defender's item choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSetup {
    pub attacker: PlayerId,
    pub tile: TileId,
    pub creature: CardId,
    pub item: Option<CardId>,
}

impl BattleSetup {
    /// The defending seat.
    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker.opponent()
    }
}

/// The single outstanding decision, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// The mover must pick a junction exit.
    Branch { candidates: BranchCandidates },
    /// A targeted spell awaits its target.
    SpellTarget(SpellSelection),
    /// The mover stands on an opponent tile and may battle or pay.
    LandedOnOpponent { tile: TileId },
    /// The defender may answer with a battle item.
    BattleResponse(BattleSetup),
    /// The player must sell tiles until gold is non-negative.
    ForcedSale { player: PlayerId },
}

/// Why the match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryReason {
    /// The winner's total assets reached the victory threshold.
    AssetThreshold,
    /// The loser's total assets fell to zero or below.
    Bankruptcy,
}

/// Latched result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub reason: VictoryReason,
}

impl GameOutcome {
    /// The losing seat.
    #[must_use]
    pub fn loser(&self) -> PlayerId {
        self.winner.opponent()
    }
}

/// Complete game state.
///
/// Everything here derives serde so an external persistence layer can store
/// the state verbatim; [`GameState::encode`] gives a bincode snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub tiles: Vec<Tile>,
    pub players: PlayerMap<Player>,

    /// Seat whose turn it is.
    pub turn: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    pub phase: Phase,
    pub remaining_steps: u8,
    pub last_roll: Option<DiceRoll>,
    pub pending: Option<PendingAction>,

    /// Whether a placement or level-up was already made this turn.
    pub land_action_used: bool,

    pub outcome: Option<GameOutcome>,
    pub rng: GameRng,

    /// Undrained turn resolution events.
    pub events: Vector<GameEvent>,

    /// Commands applied so far.
    pub history: Vector<CommandRecord>,

    /// Command sequence within the current turn.
    pub sequence: u32,
}

impl GameState {
    /// Create a state with the given tiles and players, player 0 to act.
    #[must_use]
    pub fn new(tiles: Vec<Tile>, players: PlayerMap<Player>, seed: u64) -> Self {
        Self {
            tiles,
            players,
            turn: PlayerId::new(0),
            turn_number: 1,
            phase: Phase::Ready,
            remaining_steps: 0,
            last_roll: None,
            pending: None,
            land_action_used: false,
            outcome: None,
            rng: GameRng::new(seed),
            events: Vector::new(),
            history: Vector::new(),
            sequence: 0,
        }
    }

    /// Get a tile. Panics on an id outside the board.
    #[must_use]
    pub fn tile(&self, tile: TileId) -> &Tile {
        &self.tiles[tile.index()]
    }

    /// Get a mutable tile. Panics on an id outside the board.
    pub fn tile_mut(&mut self, tile: TileId) -> &mut Tile {
        &mut self.tiles[tile.index()]
    }

    /// Get a tile if the id is on the board.
    #[must_use]
    pub fn get_tile(&self, tile: TileId) -> Option<&Tile> {
        self.tiles.get(tile.index())
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Get a mutable player.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.turn]
    }

    /// Iterate over every tile id in ascending order.
    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> {
        (0..self.tiles.len() as u8).map(TileId::new)
    }

    /// Tiles owned by a player, in ascending order.
    pub fn owned_tiles(&self, player: PlayerId) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.is_owned_by(player))
            .map(|(i, _)| TileId::new(i as u8))
    }

    /// Tiles with a creature on them, in ascending order.
    pub fn creature_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.creature.is_some())
            .map(|(i, _)| TileId::new(i as u8))
    }

    /// Check if the match has a result.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Append an event to the log.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Append an applied command to the history.
    ///
    /// The record carries the turn and sequence it was issued at; the
    /// sequence only advances while that turn is still running.
    pub fn record(&mut self, record: CommandRecord) {
        if record.turn == self.turn_number {
            self.sequence = record.sequence + 1;
        }
        self.history.push_back(record);
    }

    /// Encode the whole state with bincode.
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`GameState::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
