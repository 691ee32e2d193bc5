//! Gold ledger.
//!
//! All gold moves through [`adjust_gold`] or [`transfer`]. Neither judges the
//! result: a command may charge a cost before the effect that pays for it,
//! so victory and debt are looked at once, by [`settle`], after the command
//! has finished. A negative balance is not an error but puts the player into
//! forced liquidation. Humans get a `PendingAction::ForcedSale` and sell
//! tiles by hand; CPU seats liquidate automatically.

use tracing::debug;

use super::{liquidation, toll};
use crate::board::TileId;
use crate::core::{GameState, PendingAction, PlayerId, RulesContext};
use crate::events::GameEvent;
use crate::rules::victory;

/// Add `delta` (possibly negative) to a player's gold.
pub fn adjust_gold(state: &mut GameState, player: PlayerId, delta: i64) {
    if delta == 0 {
        return;
    }
    let gold = &mut state.player_mut(player).gold;
    *gold += delta;
    let balance = *gold;
    state.push_event(GameEvent::GoldChanged { player, delta, balance });
}

/// Move `amount` from one player to another.
///
/// The payer may end up negative.
pub fn transfer(state: &mut GameState, from: PlayerId, to: PlayerId, amount: i64) {
    if amount == 0 {
        return;
    }
    adjust_gold(state, from, -amount);
    adjust_gold(state, to, amount);
}

/// Charge `payer` the live toll of `tile`, paid to its owner.
///
/// Returns the amount charged; nothing is charged on an unowned tile or on
/// the payer's own tile.
pub fn charge_toll(state: &mut GameState, ctx: &RulesContext, payer: PlayerId, tile: TileId) -> i64 {
    let Some(payee) = state.tile(tile).owner.filter(|&owner| owner != payer) else {
        return 0;
    };
    let amount = toll::toll(state, ctx.config, tile);
    if amount > 0 {
        debug!(%payer, %tile, amount, "toll charged");
        state.push_event(GameEvent::TollPaid { payer, payee, tile, amount });
        transfer(state, payer, payee, amount);
    }
    amount
}

/// Outstanding debt of a player (0 when the balance is non-negative).
#[must_use]
pub fn debt(state: &GameState, player: PlayerId) -> i64 {
    (-state.player(player).gold).max(0)
}

/// Judge the state a command left behind.
///
/// Latches a result if the totals imply one, then moves any player left in
/// debt into forced liquidation. A CPU sale can shrink its owner's set
/// bonuses, so victory is looked at again afterwards. Nothing is judged
/// while a battle waits for the defender's answer.
pub fn settle(state: &mut GameState, ctx: &RulesContext) {
    if matches!(state.pending, Some(PendingAction::BattleResponse(_))) {
        return;
    }
    victory::settle(state, ctx.config);
    for player in PlayerId::all() {
        check_debt(state, ctx, player);
    }
    victory::settle(state, ctx.config);
}

/// Enter or leave forced liquidation according to the current balance.
///
/// Does nothing once the match is decided.
pub fn check_debt(state: &mut GameState, ctx: &RulesContext, player: PlayerId) {
    if state.is_over() {
        return;
    }

    let in_sale = matches!(state.pending, Some(PendingAction::ForcedSale { player: p }) if p == player);
    let owed = debt(state, player);

    if owed == 0 {
        if in_sale {
            state.pending = None;
        }
        return;
    }
    if in_sale {
        if state.owned_tiles(player).next().is_none() {
            state.pending = None;
        }
        return;
    }
    if state.owned_tiles(player).next().is_none() {
        return;
    }

    if state.player(player).is_cpu() {
        liquidation::auto_liquidate(state, ctx, player);
    } else if state.pending.is_none() {
        debug!(%player, debt = owed, "forced sale started");
        state.pending = Some(PendingAction::ForcedSale { player });
        state.push_event(GameEvent::ForcedSaleStarted { player, debt: owed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardGraph, TerrainTable, TileId};
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

        fn state(&self, controller: Controller) -> GameState {
            let tiles = TerrainTable::standard(&self.board).iter().map(Tile::new).collect();
            let players = PlayerMap::new(|_| Player::new("P", controller, 1000, self.board.home()));
            GameState::new(tiles, players, 3)
        }

        fn give_tile(&self, state: &mut GameState, tile: u8, player: PlayerId, level: u8) {
            let stats = *self.catalog.creature(ids::DUNE_SCOUT).unwrap();
            let t = state.tile_mut(TileId::new(tile));
            t.owner = Some(player);
            t.level = level;
            t.creature = Some(TileCreature::new(ids::DUNE_SCOUT, player, stats));
        }
    }

    #[test]
    fn test_adjust_gold_emits_event() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Human);
        let p0 = PlayerId::new(0);

        adjust_gold(&mut state, p0, -250);

        assert_eq!(state.player(p0).gold, 750);
        assert_eq!(
            state.events.back(),
            Some(&GameEvent::GoldChanged { player: p0, delta: -250, balance: 750 })
        );
    }

    #[test]
    fn test_transfer_into_debt_starts_forced_sale() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Human);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        fx.give_tile(&mut state, 5, p0, 3);

        transfer(&mut state, p0, p1, 1050);
        assert!(state.pending.is_none());
        settle(&mut state, &fx.ctx());

        assert_eq!(state.player(p0).gold, -50);
        assert_eq!(state.player(p1).gold, 2050);
        assert_eq!(debt(&state, p0), 50);
        assert_eq!(state.pending, Some(PendingAction::ForcedSale { player: p0 }));
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_debt_cleared_ends_forced_sale() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Human);
        let p0 = PlayerId::new(0);
        fx.give_tile(&mut state, 5, p0, 3);

        adjust_gold(&mut state, p0, -1100);
        settle(&mut state, &fx.ctx());
        assert!(state.pending.is_some());

        adjust_gold(&mut state, p0, 200);
        settle(&mut state, &fx.ctx());
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_settle_judges_only_the_final_balance() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Human);
        let p0 = PlayerId::new(0);

        // A cost that empties the purse, then a payout, inside one command.
        adjust_gold(&mut state, p0, -1000);
        adjust_gold(&mut state, p0, 150);
        settle(&mut state, &fx.ctx());

        assert!(state.outcome.is_none());
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_settle_waits_for_battle_response() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Human);
        let p0 = PlayerId::new(0);
        fx.give_tile(&mut state, 5, p0.opponent(), 1);
        state.pending = Some(PendingAction::BattleResponse(crate::core::BattleSetup {
            attacker: p0,
            tile: TileId::new(5),
            creature: ids::FLAME_DRAKE,
            item: None,
        }));

        adjust_gold(&mut state, p0, -1000);
        settle(&mut state, &fx.ctx());

        assert!(state.outcome.is_none());
        assert!(matches!(state.pending, Some(PendingAction::BattleResponse(_))));
    }

    #[test]
    fn test_charge_toll_pays_owner() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Human);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        fx.give_tile(&mut state, 5, p1, 1);

        assert_eq!(charge_toll(&mut state, &fx.ctx(), p0, TileId::new(5)), 30);
        assert_eq!(state.player(p0).gold, 970);
        assert_eq!(state.player(p1).gold, 1030);

        // Own and unowned tiles are free.
        assert_eq!(charge_toll(&mut state, &fx.ctx(), p1, TileId::new(5)), 0);
        assert_eq!(charge_toll(&mut state, &fx.ctx(), p0, TileId::new(6)), 0);
    }

    #[test]
    fn test_cpu_debt_liquidates_automatically() {
        let fx = Fixture::new();
        let mut state = fx.state(Controller::Cpu);
        let p0 = PlayerId::new(0);
        fx.give_tile(&mut state, 5, p0, 3);
        fx.give_tile(&mut state, 1, p0, 1);

        adjust_gold(&mut state, p0, -1020);
        settle(&mut state, &fx.ctx());

        assert!(state.pending.is_none());
        assert!(state.player(p0).gold >= 0);
        // The cheapest covering sale is the level-1 tile alone.
        assert!(state.tile(TileId::new(5)).is_owned_by(p0));
        assert!(state.tile(TileId::new(1)).owner.is_none());
    }
}
