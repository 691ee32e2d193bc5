//! Turn flow.
//!
//! `Ready → Moving → (BranchSelecting ⇄ Moving) → Moved → Ready` for the next
//! player. Movement is simulated one tile at a time so that checkpoints and
//! home fire exactly when they are entered.

use smallvec::{smallvec, SmallVec};
use tracing::{debug, info};

use super::{cpu, encounter, hand};
use crate::board::TileId;
use crate::cards::CardId;
use crate::core::{DiceRoll, GameError, GameState, PendingAction, Phase, PlayerId, RulesContext};
use crate::economy::{ledger, ownership, toll};
use crate::events::GameEvent;

/// Roll for the active player and move.
pub fn roll_dice(state: &mut GameState, ctx: &RulesContext) -> Result<(), GameError> {
    if state.phase != Phase::Ready {
        return Err(GameError::WrongPhase(state.phase));
    }
    if state.pending.is_some() {
        return Err(GameError::PendingActionActive);
    }

    let player = state.turn;
    let roll = roll(state, player);
    debug!(%player, total = roll.total, forced = roll.forced, "dice rolled");
    state.push_event(GameEvent::DiceRolled {
        player,
        dice: roll.dice.clone(),
        total: roll.total,
    });
    state.remaining_steps = roll.total;
    state.last_roll = Some(roll);
    state.phase = Phase::Moving;

    advance(state, ctx);
    Ok(())
}

/// Forced value first, then two dice, then one. Both modifiers are spent.
fn roll(state: &mut GameState, player: PlayerId) -> DiceRoll {
    let p = state.player_mut(player);
    let forced = p.forced_roll.take();
    let double = std::mem::take(&mut p.double_next_roll);

    let dice: SmallVec<[u8; 2]> = match forced {
        Some(value) => smallvec![value],
        None if double => smallvec![state.rng.roll_die(), state.rng.roll_die()],
        None => smallvec![state.rng.roll_die()],
    };
    let total = dice.iter().sum();

    DiceRoll {
        dice,
        total,
        forced: forced.is_some(),
    }
}

/// Leave the junction toward `tile` and keep moving.
pub fn pick_branch(state: &mut GameState, ctx: &RulesContext, tile: TileId) -> Result<(), GameError> {
    if state.phase != Phase::BranchSelecting {
        return Err(GameError::WrongPhase(state.phase));
    }
    let Some(PendingAction::Branch { candidates }) = &state.pending else {
        return Err(GameError::NothingPending);
    };
    if !candidates.contains(&tile) {
        return Err(GameError::InvalidBranch(tile));
    }

    state.pending = None;
    state.phase = Phase::Moving;
    take_branch(state, ctx, tile);
    advance(state, ctx);
    Ok(())
}

/// Step until the roll is used up, pausing on the junction for a human.
pub(crate) fn advance(state: &mut GameState, ctx: &RulesContext) {
    let player = state.turn;

    while state.remaining_steps > 0 {
        let p = state.player(player);
        let (position, came_from, direction, is_cpu) = (p.position, p.came_from, p.direction, p.is_cpu());

        if ctx.board.is_junction(position) {
            let candidates = ctx.board.branch_candidates(came_from);
            if is_cpu {
                if let Some(tile) = cpu::choose_branch(state, ctx, player, &candidates) {
                    take_branch(state, ctx, tile);
                    continue;
                }
            }
            debug!(%player, options = candidates.len(), "waiting for branch choice");
            state.push_event(GameEvent::BranchPending {
                player,
                candidates: candidates.clone(),
            });
            state.pending = Some(PendingAction::Branch { candidates });
            state.phase = Phase::BranchSelecting;
            return;
        }

        let next = ctx.board.next_tile(direction, position);
        step_to(state, ctx, next);
    }

    state.phase = Phase::Moved;
    encounter::resolve_landing(state, ctx);
}

fn take_branch(state: &mut GameState, ctx: &RulesContext, tile: TileId) {
    if let Some(direction) = ctx.board.branch_direction(tile) {
        let player = state.turn;
        state.player_mut(player).direction = direction;
    }
    step_to(state, ctx, tile);
}

fn step_to(state: &mut GameState, ctx: &RulesContext, to: TileId) {
    let player = state.turn;
    state.remaining_steps = state.remaining_steps.saturating_sub(1);

    let p = state.player_mut(player);
    let from = p.position;
    p.came_from = Some(from);
    p.position = to;
    state.push_event(GameEvent::Moved { player, from, to });

    enter_tile(state, ctx, player, to);
}

/// Checkpoint flags and the home reward.
fn enter_tile(state: &mut GameState, ctx: &RulesContext, player: PlayerId, tile: TileId) {
    if let Some(checkpoint) = ctx.board.checkpoint_index(tile) {
        let flag = &mut state.player_mut(player).checkpoints[checkpoint];
        if !*flag {
            *flag = true;
            state.push_event(GameEvent::CheckpointPassed { player, checkpoint });
        }
        return;
    }

    if tile != ctx.board.home() || !state.player(player).has_all_checkpoints() {
        return;
    }

    let owned = toll::owned_tile_count(state, player) as i64;
    let reward = ctx.config.lap_reward_base + ctx.config.lap_reward_per_tile * owned;
    state.player_mut(player).checkpoints = [false; 2];
    state.remaining_steps = 0;
    info!(%player, reward, owned, "lap completed");
    state.push_event(GameEvent::HomeReached { player, reward });
    ledger::adjust_gold(state, player, reward);
}

/// Discard a card to get back within the hand limit.
pub fn discard(state: &mut GameState, ctx: &RulesContext, card: CardId) -> Result<(), GameError> {
    let player = state.turn;
    if !hand::is_over_limit(state, ctx.config, player) {
        return Err(GameError::DiscardNotRequired);
    }
    if !hand::discard(state, player, card) {
        return Err(GameError::NotInHand(card));
    }
    Ok(())
}

/// Finish the active player's turn and hand over.
///
/// An unanswered landing on an opponent tile is settled by paying the toll.
/// If that toll decides the match or opens a forced sale, the command still
/// succeeds but the turn stays in `Moved`: the sale has to finish and
/// `end_turn` be issued again.
pub fn end_turn(state: &mut GameState, ctx: &RulesContext) -> Result<(), GameError> {
    if state.phase != Phase::Moved {
        return Err(GameError::WrongPhase(state.phase));
    }
    let player = state.turn;
    if hand::is_over_limit(state, ctx.config, player) {
        return Err(GameError::DiscardRequired);
    }

    match &state.pending {
        Some(PendingAction::LandedOnOpponent { .. }) => {
            encounter::pay_toll(state, ctx)?;
            ledger::settle(state, ctx);
            if state.is_over() || state.pending.is_some() {
                return Ok(());
            }
        }
        Some(PendingAction::ForcedSale { .. }) => return Err(GameError::DebtOutstanding),
        Some(_) => return Err(GameError::PendingActionActive),
        None => {}
    }
    if state.player(player).gold < 0 {
        return Err(GameError::DebtOutstanding);
    }

    handoff(state, ctx);
    Ok(())
}

fn handoff(state: &mut GameState, ctx: &RulesContext) {
    let ending = state.turn;
    state.push_event(GameEvent::TurnEnded {
        player: ending,
        turn: state.turn_number,
    });

    let next = ending.opponent();
    state.turn = next;
    state.turn_number += 1;
    state.sequence = 0;
    state.phase = Phase::Ready;
    state.remaining_steps = 0;
    state.land_action_used = false;
    debug!(player = %next, turn = state.turn_number, "turn started");

    upkeep(state, ctx, next);
    hand::draw(state, ctx.config, next, ctx.config.draws_per_turn);
}

/// Poison ticks, then natural healing, on the new player's creatures.
fn upkeep(state: &mut GameState, ctx: &RulesContext, player: PlayerId) {
    let owned: Vec<_> = state.owned_tiles(player).collect();

    for &tile in &owned {
        let t = state.tile(tile);
        let Some(creature) = t.creature.as_ref().filter(|_| t.status.poisoned) else {
            continue;
        };
        let damage = (creature.stats.hp_max * ctx.config.poison_percent / 100).max(1);
        let hp = (creature.hp - damage).max(0);
        state.push_event(GameEvent::PoisonTick { tile, damage, hp });
        ownership::damage(state, tile, damage);
    }

    for &tile in &owned {
        let Some(creature) = state.tile(tile).creature.as_ref() else {
            continue;
        };
        if creature.is_damaged() {
            let amount = creature.stats.affection / 2;
            ownership::heal(state, tile, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardGraph, Direction, TerrainTable};
    use crate::cards::{ids, CardCatalog};
    use crate::core::{Controller, Player, PlayerMap, RuleConfig, Tile, TileCreature};

    struct Fixture {
        config: RuleConfig,
        board: BoardGraph,
        catalog: CardCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: RuleConfig::standard(),
                board: BoardGraph::standard(),
                catalog: CardCatalog::standard(),
            }
        }

        fn ctx(&self) -> RulesContext<'_> {
            RulesContext::new(&self.config, &self.board, &self.catalog)
        }

        fn state(&self) -> GameState {
            let tiles = TerrainTable::standard(&self.board).iter().map(Tile::new).collect();
            let players = PlayerMap::new(|_| Player::new("P", Controller::Human, 1000, self.board.home()));
            GameState::new(tiles, players, 2)
        }
    }

    const P0: PlayerId = PlayerId::new(0);

    #[test]
    fn test_forced_roll_wins_over_double() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).forced_roll = Some(3);
        state.player_mut(P0).double_next_roll = true;

        roll_dice(&mut state, &fx.ctx()).unwrap();

        let roll = state.last_roll.clone().unwrap();
        assert_eq!((roll.total, roll.forced), (3, true));
        assert_eq!(state.player(P0).position, TileId::new(3));
        assert!(!state.player(P0).double_next_roll);
        assert_eq!(state.player(P0).forced_roll, None);
        assert_eq!(state.phase, Phase::Moved);
    }

    #[test]
    fn test_double_roll_uses_two_dice() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).double_next_roll = true;
        state.player_mut(P0).position = TileId::new(20);

        roll_dice(&mut state, &fx.ctx()).unwrap();

        let roll = state.last_roll.clone().unwrap();
        assert_eq!(roll.dice.len(), 2);
        assert_eq!(roll.total, roll.dice[0] + roll.dice[1]);
    }

    #[test]
    fn test_roll_requires_ready_phase() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.phase = Phase::Moved;

        assert_eq!(roll_dice(&mut state, &fx.ctx()), Err(GameError::WrongPhase(Phase::Moved)));
    }

    #[test]
    fn test_junction_pauses_for_branch() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).position = TileId::new(6);
        state.player_mut(P0).forced_roll = Some(4);

        roll_dice(&mut state, &fx.ctx()).unwrap();

        assert_eq!(state.phase, Phase::BranchSelecting);
        assert_eq!(state.remaining_steps, 2);
        let Some(PendingAction::Branch { candidates }) = &state.pending else {
            panic!("expected a branch choice");
        };
        assert_eq!(candidates.as_slice(), &[TileId::new(9), TileId::new(16), TileId::new(30)]);

        assert_eq!(
            pick_branch(&mut state, &fx.ctx(), TileId::new(7)),
            Err(GameError::InvalidBranch(TileId::new(7)))
        );

        pick_branch(&mut state, &fx.ctx(), TileId::new(30)).unwrap();
        assert_eq!(state.player(P0).direction, Direction::CounterClockwise);
        assert_eq!(state.player(P0).position, TileId::new(29));
        assert_eq!(state.phase, Phase::Moved);
    }

    #[test]
    fn test_home_reward_requires_both_checkpoints() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).position = TileId::new(14);
        state.player_mut(P0).checkpoints = [true, false];
        state.player_mut(P0).forced_roll = Some(3);

        roll_dice(&mut state, &fx.ctx()).unwrap();

        assert_eq!(state.player(P0).position, TileId::new(1));
        assert_eq!(state.player(P0).gold, 1000);
        assert_eq!(state.player(P0).checkpoints, [true, false]);
    }

    #[test]
    fn test_home_reward_stops_movement() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.player_mut(P0).position = TileId::new(14);
        state.player_mut(P0).checkpoints = [true, true];
        state.player_mut(P0).forced_roll = Some(5);
        state.tile_mut(TileId::new(5)).owner = Some(P0);
        state.tile_mut(TileId::new(5)).level = 1;

        roll_dice(&mut state, &fx.ctx()).unwrap();

        assert_eq!(state.player(P0).position, fx.board.home());
        assert_eq!(state.player(P0).gold, 1000 + 300 + 45);
        assert_eq!(state.player(P0).checkpoints, [false, false]);
        assert!(state.events.contains(&GameEvent::HomeReached { player: P0, reward: 345 }));
    }

    #[test]
    fn test_end_turn_hands_over_with_upkeep() {
        let fx = Fixture::new();
        let mut state = fx.state();
        let p1 = P0.opponent();
        state.phase = Phase::Moved;
        state.player_mut(p1).pile = vec![ids::MEND];

        let stats = *fx.catalog.creature(ids::DUNE_SCOUT).unwrap();
        for (tile, hp, poisoned) in [(5u8, 20, true), (6, 2, true), (1, 20, false)] {
            let t = state.tile_mut(TileId::new(tile));
            t.owner = Some(p1);
            t.level = 1;
            t.creature = Some(TileCreature::new(ids::DUNE_SCOUT, p1, stats).with_hp(hp));
            t.status.poisoned = poisoned;
        }

        end_turn(&mut state, &fx.ctx()).unwrap();

        assert_eq!((state.turn, state.turn_number, state.phase), (p1, 2, Phase::Ready));
        // Poison: max(1, 30 * 20 / 100) = 6, then heal 10 / 2 = 5.
        assert_eq!(state.tile(TileId::new(5)).creature.as_ref().unwrap().hp, 19);
        assert!(state.tile(TileId::new(6)).owner.is_none());
        assert_eq!(state.tile(TileId::new(1)).creature.as_ref().unwrap().hp, 25);
        assert_eq!(state.player(p1).hand, vec![ids::MEND]);
    }

    #[test]
    fn test_end_turn_requires_discard() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.phase = Phase::Moved;
        state.player_mut(P0).hand = vec![ids::MEND; 6];

        assert_eq!(end_turn(&mut state, &fx.ctx()), Err(GameError::DiscardRequired));

        discard(&mut state, &fx.ctx(), ids::MEND).unwrap();
        assert_eq!(discard(&mut state, &fx.ctx(), ids::MEND), Err(GameError::DiscardNotRequired));
        end_turn(&mut state, &fx.ctx()).unwrap();
    }

    #[test]
    fn test_end_turn_blocked_by_debt() {
        let fx = Fixture::new();
        let mut state = fx.state();
        state.phase = Phase::Moved;
        state.pending = Some(PendingAction::ForcedSale { player: P0 });

        assert_eq!(end_turn(&mut state, &fx.ctx()), Err(GameError::DebtOutstanding));
        assert_eq!(state.turn, P0);
    }
}
