//! CPU seat heuristics.
//!
//! CPU seats never leave a decision pending: branch choices, landing
//! decisions and battle answers are made synchronously inside the rules
//! that raise them. [`play_turn`] drives a whole CPU turn through the public
//! command surface; [`run_self_play`] loops it.

use tracing::debug;

use super::encounter::{affordable_creatures, affordable_items};
use super::engine::Game;
use crate::battle::{resolve_battle, BattleOutcome, CombatUnit, CritRolls, Equipment};
use crate::board::TileId;
use crate::cards::{CardId, CreatureStats};
use crate::core::{BattleSetup, GameError, GameState, Phase, PlayerId, RulesContext, Tile, MAX_LEVEL};
use crate::economy::toll;

/// Pick a junction exit: nearest unpassed checkpoint, else home.
///
/// Ties go to the exit that keeps the current direction, then to candidate
/// order.
#[must_use]
pub fn choose_branch(state: &GameState, ctx: &RulesContext, player: PlayerId, candidates: &[TileId]) -> Option<TileId> {
    let p = state.player(player);
    let checkpoints = ctx.board.checkpoints();
    let target = p
        .checkpoints
        .iter()
        .position(|&passed| !passed)
        .map_or(ctx.board.home(), |i| checkpoints[i]);

    candidates.iter().copied().min_by_key(|&tile| {
        let direction = ctx.board.branch_direction(tile).unwrap_or(p.direction);
        let steps = ctx.board.steps_until(tile, direction, target).unwrap_or(usize::MAX);
        (steps, direction != p.direction)
    })
}

/// Decide whether to attack the opponent tile the CPU landed on.
///
/// Picks the cheapest creature (with an item only if needed) that beats the
/// current defender without criticals. `None` means pay the toll.
#[must_use]
pub fn plan_landing(
    state: &GameState,
    ctx: &RulesContext,
    player: PlayerId,
    tile: TileId,
) -> Option<(CardId, Option<CardId>)> {
    let target = state.tile(tile);
    target.creature.as_ref()?;
    let gold = state.player(player).gold;

    let mut creatures: Vec<(CardId, CreatureStats)> = affordable_creatures(state, ctx, player)
        .into_iter()
        .filter_map(|card| ctx.catalog.creature(card).map(|stats| (card, *stats)))
        .collect();
    creatures.sort_by_key(|(_, stats)| stats.cost);
    let items = affordable_items(state, ctx, player);

    for (card, stats) in creatures {
        let wins = |item: Option<CardId>| {
            let gear = Equipment::from_effect(item.and_then(|c| ctx.catalog.equipment(c)));
            simulate(ctx, target, card, &stats, gear, Equipment::default()) == Some(BattleOutcome::DefenderDefeated)
        };
        if wins(None) {
            return Some((card, None));
        }
        let item = items.iter().copied().find(|&item| {
            let cost = ctx.catalog.spell(item).map_or(i64::MAX, |(_, cost)| cost);
            stats.cost + cost <= gold && wins(Some(item))
        });
        if item.is_some() {
            return Some((card, item));
        }
    }
    None
}

/// Pick a defending item, only when it improves the outcome.
///
/// Outcomes rank attacker defeated, then draw, then capture.
#[must_use]
pub fn choose_defense_item(state: &GameState, ctx: &RulesContext, setup: &BattleSetup) -> Option<CardId> {
    let target = state.tile(setup.tile);
    let stats = *ctx.catalog.creature(setup.creature)?;
    let attacker_gear = Equipment::from_effect(setup.item.and_then(|c| ctx.catalog.equipment(c)));

    let rank = |item: Option<CardId>| {
        let gear = Equipment::from_effect(item.and_then(|c| ctx.catalog.equipment(c)));
        match simulate(ctx, target, setup.creature, &stats, attacker_gear, gear) {
            Some(BattleOutcome::AttackerDefeated) => 2,
            Some(BattleOutcome::Draw) => 1,
            _ => 0,
        }
    };

    let baseline = rank(None);
    let mut best: Option<(CardId, i32)> = None;
    for item in affordable_items(state, ctx, setup.defender()) {
        let score = rank(Some(item));
        if score > best.map_or(baseline, |(_, s)| s) {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}

/// Outcome of a battle on `tile` with criticals disabled.
fn simulate(
    ctx: &RulesContext,
    tile: &Tile,
    card: CardId,
    stats: &CreatureStats,
    attacker_gear: Equipment,
    defender_gear: Equipment,
) -> Option<BattleOutcome> {
    let defending = tile.creature.as_ref()?;
    let attribute = tile.attribute();
    let attacker = CombatUnit::build(
        card,
        defending.owner.opponent(),
        stats,
        stats.hp_max,
        attribute,
        attacker_gear,
        defender_gear,
        ctx.config,
    );
    let defender = CombatUnit::build(
        defending.card,
        defending.owner,
        &defending.stats,
        defending.hp,
        attribute,
        defender_gear,
        attacker_gear,
        ctx.config,
    );
    Some(resolve_battle(&attacker, &defender, CritRolls::NONE).outcome)
}

/// The land action a CPU takes on the tile it stands on, if any.
fn land_action(state: &GameState, ctx: &RulesContext) -> Option<LandAction> {
    let player = state.turn;
    let tile = state.player(player).position;
    if ctx.board.is_special(tile) {
        return None;
    }
    let t = state.tile(tile);
    let gold = state.player(player).gold;

    match t.owner {
        None => affordable_creatures(state, ctx, player)
            .into_iter()
            .filter_map(|card| ctx.catalog.creature(card).map(|stats| (card, stats)))
            .min_by_key(|(_, stats)| (-stats.resistances.get(t.attribute()), stats.cost))
            .map(|(card, _)| LandAction::Place(card)),
        Some(owner) if owner == player && t.level < MAX_LEVEL => {
            let cost = toll::level_up_cost(ctx.config, t.level, t.level + 1)?;
            (cost <= gold / 2).then_some(LandAction::LevelUp(t.level + 1))
        }
        Some(_) => None,
    }
}

enum LandAction {
    Place(CardId),
    LevelUp(u8),
}

/// Play the active seat's turn to completion where possible.
///
/// Stops early, without error, when the match ends or a decision is left
/// pending for a human seat.
pub fn play_turn(game: &mut Game) -> Result<(), GameError> {
    if game.state().phase == Phase::Ready {
        game.roll_dice()?;
    }
    let state = game.state();
    if state.is_over() || state.pending.is_some() || state.phase != Phase::Moved {
        return Ok(());
    }

    if !state.land_action_used {
        let tile = state.player(state.turn).position;
        let action = land_action(state, &game.ctx());
        match action {
            Some(LandAction::Place(card)) => game.place_creature(card, tile)?,
            Some(LandAction::LevelUp(level)) => game.confirm_level_up(tile, level)?,
            None => {}
        }
    }

    let limit = game.config().hand_limit;
    while game.state().active_player().hand.len() > limit {
        let Some(&card) = game.state().active_player().hand.last() else {
            break;
        };
        game.discard(card)?;
    }

    let state = game.state();
    if state.is_over() || state.pending.is_some() {
        return Ok(());
    }
    game.end_turn()
}

/// Play turns until the match ends, `max_turns` turns were played or a turn
/// makes no progress. Returns the number of turns played.
pub fn run_self_play(game: &mut Game, max_turns: u32) -> Result<u32, GameError> {
    let start = game.state().turn_number;
    while !game.state().is_over() && game.state().turn_number - start < max_turns {
        let before = game.state().turn_number;
        play_turn(game)?;
        if game.state().turn_number == before && !game.state().is_over() {
            debug!(turn = before, "self-play stalled");
            break;
        }
    }
    Ok(game.state().turn_number - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardGraph, Direction, TerrainTable};
    use crate::cards::{ids, CardCatalog};
    use crate::core::{Controller, Player, PlayerMap, RuleConfig, TileCreature};
    use crate::rules::engine::PlayerSetup;

    struct Fixture {
        config: RuleConfig,
        board: BoardGraph,
        catalog: CardCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: RuleConfig::standard().with_critical_percent(0, 0),
                board: BoardGraph::standard(),
                catalog: CardCatalog::standard(),
            }
        }

        fn ctx(&self) -> RulesContext<'_> {
            RulesContext::new(&self.config, &self.board, &self.catalog)
        }

        fn state(&self) -> GameState {
            let tiles = TerrainTable::standard(&self.board).iter().map(Tile::new).collect();
            let players = PlayerMap::new(|_| Player::new("Cpu", Controller::Cpu, 1000, self.board.home()));
            GameState::new(tiles, players, 9)
        }

        /// Player 1 holds tile 5 with a full-health Dune Scout.
        fn defended(&self) -> GameState {
            let mut state = self.state();
            let stats = *self.catalog.creature(ids::DUNE_SCOUT).unwrap();
            let t = state.tile_mut(TileId::new(5));
            t.owner = Some(P1);
            t.level = 1;
            t.creature = Some(TileCreature::new(ids::DUNE_SCOUT, P1, stats));
            state
        }
    }

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_branch_heads_for_next_checkpoint() {
        let fx = Fixture::new();
        let mut state = fx.state();
        let candidates = fx.board.branch_candidates(Some(TileId::new(7)));

        // Both outer exits reach checkpoint 1 in 8 steps; keep direction.
        assert_eq!(choose_branch(&state, &fx.ctx(), P0, &candidates), Some(TileId::new(16)));

        state.player_mut(P0).direction = Direction::CounterClockwise;
        assert_eq!(choose_branch(&state, &fx.ctx(), P0, &candidates), Some(TileId::new(30)));

        state.player_mut(P0).checkpoints = [true, false];
        assert_eq!(choose_branch(&state, &fx.ctx(), P0, &candidates), Some(TileId::new(9)));
    }

    #[test]
    fn test_branch_heads_home_after_both_checkpoints() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).checkpoints = [true, true];
        let candidates = fx.board.branch_candidates(Some(TileId::new(9)));

        assert_eq!(choose_branch(&state, &fx.ctx(), P0, &candidates), Some(TileId::new(7)));
        assert_eq!(choose_branch(&state, &fx.ctx(), P0, &[]), None);
    }

    #[test]
    fn test_plan_landing_prefers_cheapest_winner() {
        let fx = Fixture::new();
        let mut state = fx.defended();
        state.player_mut(P0).hand = vec![ids::FLAME_DRAKE, ids::EMBER_IMP, ids::SAND_GOLEM];

        // The imp cannot break the scout on earth; the drake can.
        assert_eq!(
            plan_landing(&state, &fx.ctx(), P0, TileId::new(5)),
            Some((ids::FLAME_DRAKE, None))
        );

        state.player_mut(P0).hand = vec![ids::EMBER_IMP];
        assert_eq!(plan_landing(&state, &fx.ctx(), P0, TileId::new(5)), None);
    }

    #[test]
    fn test_plan_landing_ignores_empty_tile() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).hand = vec![ids::FLAME_DRAKE];

        assert_eq!(plan_landing(&state, &fx.ctx(), P0, TileId::new(5)), None);
    }

    #[test]
    fn test_defense_item_only_when_it_helps() {
        let fx = Fixture::new();
        let mut state = fx.defended();
        state.player_mut(P1).hand = vec![ids::HARD_FANG, ids::IRON_SHELL];
        let setup = BattleSetup { attacker: P0, tile: TileId::new(5), creature: ids::WANDERING_KNIGHT, item: None };

        // Unaided the scout falls to the knight; behind the shell it holds.
        assert_eq!(choose_defense_item(&state, &fx.ctx(), &setup), Some(ids::IRON_SHELL));

        // Cancelling the knight's strike bonus is not enough.
        state.player_mut(P1).hand = vec![ids::MIRROR_CHARM];
        assert_eq!(choose_defense_item(&state, &fx.ctx(), &setup), None);

        // Against the imp the scout wins anyway.
        state.player_mut(P1).hand = vec![ids::IRON_SHELL];
        let weak = BattleSetup { creature: ids::EMBER_IMP, ..setup };
        assert_eq!(choose_defense_item(&state, &fx.ctx(), &weak), None);
    }

    #[test]
    fn test_self_play_is_reproducible() {
        let play = || {
            let players = [PlayerSetup::starter("A", Controller::Cpu), PlayerSetup::starter("B", Controller::Cpu)];
            let mut game = Game::standard(players, 77).unwrap();
            run_self_play(&mut game, 60).unwrap();
            game.state().encode().unwrap()
        };

        assert_eq!(play(), play());
    }
}
