//! The match driver.
//!
//! [`Game`] owns the static tables (ruleset, board, catalog) next to the
//! mutable [`GameState`] and exposes the command surface. Every command goes
//! through [`Game::apply`], which:
//!
//! - rejects everything once the match is decided
//! - cancels an open spell selection unless the command continues it
//! - dispatches to the rule function
//! - settles victory and debt on the state a successful command leaves
//! - appends a [`CommandRecord`] when the command succeeded or changed the
//!   pending decision, so replaying the history reproduces the state

use tracing::{debug, info};

use super::{encounter, hand, land, turn, victory};
use crate::board::{BoardGraph, TerrainTable, TileId};
use crate::cards::{CardCatalog, CardId, Collection, DeckList};
use crate::core::{
    Command, CommandRecord, Controller, GameError, GameOutcome, GameState, PendingAction, Player, PlayerId, PlayerMap,
    RuleConfig, RulesContext, SetupError, Tile,
};
use crate::economy::{ledger, toll};
use crate::effects::SpellEngine;
use crate::events::GameEvent;

/// One seat's setup: who plays it and with which cards.
#[derive(Clone, Debug)]
pub struct PlayerSetup {
    pub name: String,
    pub controller: Controller,
    pub deck: DeckList,
    pub collection: Collection,
}

impl PlayerSetup {
    /// Create a seat setup.
    #[must_use]
    pub fn new(name: impl Into<String>, controller: Controller, deck: DeckList, collection: Collection) -> Self {
        Self {
            name: name.into(),
            controller,
            deck,
            collection,
        }
    }

    /// The starter deck, backed by two copies of every standard card.
    #[must_use]
    pub fn starter(name: impl Into<String>, controller: Controller) -> Self {
        let collection = Collection::complete(&CardCatalog::standard(), 2);
        Self::new(name, controller, DeckList::starter(), collection)
    }
}

/// A match in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: RuleConfig,
    board: BoardGraph,
    catalog: CardCatalog,
    state: GameState,
}

impl Game {
    /// Set up a match: validate everything, shuffle both piles from the seed
    /// and deal the starting hands.
    pub fn new(
        config: RuleConfig,
        board: BoardGraph,
        catalog: CardCatalog,
        terrain: TerrainTable,
        players: [PlayerSetup; 2],
        seed: u64,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        if terrain.len() != board.tile_count() {
            return Err(SetupError::TerrainMismatch {
                terrain: terrain.len(),
                board: board.tile_count(),
            });
        }
        for (player, setup) in PlayerId::all().zip(&players) {
            setup
                .deck
                .validate(&catalog, &setup.collection, &config)
                .map_err(|source| SetupError::Deck { player, source })?;
        }

        let tiles = terrain.iter().map(Tile::new).collect();
        let seats = PlayerMap::new(|player| {
            let setup = &players[player.index()];
            Player::new(setup.name.clone(), setup.controller, config.starting_gold, board.home())
        });
        let mut state = GameState::new(tiles, seats, seed);
        for (player, setup) in PlayerId::all().zip(&players) {
            let pile = setup.deck.build_pile(&mut state.rng);
            state.player_mut(player).pile = pile;
        }

        let mut game = Self {
            config,
            board,
            catalog,
            state,
        };
        let (state, ctx) = game.split();
        for player in PlayerId::all() {
            hand::draw(state, ctx.config, player, ctx.config.starting_hand);
        }
        info!(seed, "match started");
        Ok(game)
    }

    /// A match on the reference board, ruleset and card set.
    pub fn standard(players: [PlayerSetup; 2], seed: u64) -> Result<Self, SetupError> {
        let board = BoardGraph::standard();
        let terrain = TerrainTable::standard(&board);
        Self::new(RuleConfig::standard(), board, CardCatalog::standard(), terrain, players, seed)
    }

    fn split(&mut self) -> (&mut GameState, RulesContext<'_>) {
        (&mut self.state, RulesContext::new(&self.config, &self.board, &self.catalog))
    }

    /// The static tables, borrowed.
    #[must_use]
    pub fn ctx(&self) -> RulesContext<'_> {
        RulesContext::new(&self.config, &self.board, &self.catalog)
    }

    /// Apply a command for whoever is expected to issue it.
    pub fn apply(&mut self, command: Command) -> Result<(), GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let actor = self.actor(&command);
        let pending_before = self.state.pending.clone();
        let (turn, sequence) = (self.state.turn_number, self.state.sequence);

        let (state, ctx) = self.split();
        if !command.is_selection_step() {
            SpellEngine::cancel(state);
        }
        let result = dispatch(state, &ctx, &command);
        if result.is_ok() {
            ledger::settle(state, &ctx);
        }

        match &result {
            Ok(()) => debug!(player = %actor, ?command, "command applied"),
            Err(err) => debug!(player = %actor, ?command, %err, "command rejected"),
        }
        if result.is_ok() || state.pending != pending_before {
            state.record(CommandRecord::new(actor, command, turn, sequence));
        }
        result
    }

    /// The seat a command is issued by: the defender answers a battle, the
    /// indebted player sells, everything else is the active player's.
    fn actor(&self, command: &Command) -> PlayerId {
        match (command, &self.state.pending) {
            (Command::RespondBattle { .. }, Some(PendingAction::BattleResponse(setup))) => setup.defender(),
            (Command::SellTile(_), Some(PendingAction::ForcedSale { player })) => *player,
            _ => self.state.turn,
        }
    }

    pub fn roll_dice(&mut self) -> Result<(), GameError> {
        self.apply(Command::RollDice)
    }

    pub fn pick_branch(&mut self, tile: TileId) -> Result<(), GameError> {
        self.apply(Command::PickBranch(tile))
    }

    /// Play a spell; a targeted spell without `target` opens a selection.
    pub fn use_spell(&mut self, card: CardId, target: Option<TileId>) -> Result<(), GameError> {
        self.apply(Command::UseSpell { card, target })
    }

    pub fn confirm_spell_target(&mut self, tile: TileId) -> Result<(), GameError> {
        self.apply(Command::ConfirmSpellTarget(tile))
    }

    pub fn cancel_spell_selection(&mut self) -> Result<(), GameError> {
        self.apply(Command::CancelSpellSelection)
    }

    pub fn choose_battle(&mut self, creature: CardId, item: Option<CardId>) -> Result<(), GameError> {
        self.apply(Command::ChooseBattle { creature, item })
    }

    pub fn pay_toll(&mut self) -> Result<(), GameError> {
        self.apply(Command::PayToll)
    }

    pub fn respond_battle(&mut self, item: Option<CardId>) -> Result<(), GameError> {
        self.apply(Command::RespondBattle { item })
    }

    pub fn place_creature(&mut self, card: CardId, tile: TileId) -> Result<(), GameError> {
        self.apply(Command::PlaceCreature { card, tile })
    }

    pub fn confirm_level_up(&mut self, tile: TileId, level: u8) -> Result<(), GameError> {
        self.apply(Command::ConfirmLevelUp { tile, level })
    }

    pub fn sell_tile(&mut self, tile: TileId) -> Result<(), GameError> {
        self.apply(Command::SellTile(tile))
    }

    pub fn discard(&mut self, card: CardId) -> Result<(), GameError> {
        self.apply(Command::Discard(card))
    }

    pub fn end_turn(&mut self) -> Result<(), GameError> {
        self.apply(Command::EndTurn)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scenario setup in tests and tools. Edits made here
    /// bypass every rule.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &BoardGraph {
        &self.board
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.turn
    }

    /// Live toll of a tile.
    #[must_use]
    pub fn toll(&self, tile: TileId) -> i64 {
        toll::toll(&self.state, &self.config, tile)
    }

    /// Gold plus the live toll of every owned tile.
    #[must_use]
    pub fn total_assets(&self, player: PlayerId) -> i64 {
        victory::total_assets(&self.state, &self.config, player)
    }

    /// Check whether a player must sell tiles before anything else happens.
    #[must_use]
    pub fn is_forced_sale_mode(&self) -> bool {
        matches!(self.state.pending, Some(PendingAction::ForcedSale { .. }))
    }

    /// Debt of the player in forced sale, or of the active player otherwise.
    #[must_use]
    pub fn debt_amount(&self) -> i64 {
        let player = match self.state.pending {
            Some(PendingAction::ForcedSale { player }) => player,
            _ => self.state.turn,
        };
        ledger::debt(&self.state, player)
    }

    /// Candidate tiles of the open spell selection.
    #[must_use]
    pub fn spell_candidates(&self) -> Option<&[TileId]> {
        SpellEngine::pending_candidates(&self.state)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome
    }

    /// Hand over every event logged since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events).into_iter().collect()
    }
}

fn dispatch(state: &mut GameState, ctx: &RulesContext, command: &Command) -> Result<(), GameError> {
    match *command {
        Command::RollDice => turn::roll_dice(state, ctx),
        Command::PickBranch(tile) => turn::pick_branch(state, ctx, tile),
        Command::UseSpell { card, target } => {
            let caster = state.turn;
            SpellEngine::cast(state, ctx, caster, card, target)
        }
        Command::ConfirmSpellTarget(tile) => SpellEngine::confirm(state, ctx, tile),
        Command::CancelSpellSelection => {
            if SpellEngine::cancel(state) {
                Ok(())
            } else {
                Err(GameError::NothingPending)
            }
        }
        Command::ChooseBattle { creature, item } => encounter::choose_battle(state, ctx, creature, item),
        Command::PayToll => encounter::pay_toll(state, ctx),
        Command::RespondBattle { item } => encounter::respond_battle(state, ctx, item),
        Command::PlaceCreature { card, tile } => land::place_creature(state, ctx, card, tile),
        Command::ConfirmLevelUp { tile, level } => land::confirm_level_up(state, ctx, tile, level),
        Command::SellTile(tile) => land::sell_tile(state, ctx, tile),
        Command::Discard(card) => turn::discard(state, ctx, card),
        Command::EndTurn => turn::end_turn(state, ctx),
    }
}
