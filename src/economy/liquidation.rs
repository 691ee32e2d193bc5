//! Forced liquidation.
//!
//! A tile sells for its current toll. CPU seats sell the cheapest subset of
//! their tiles whose value covers the debt, found by an exact subset-sum over
//! reachable sale totals. Ties prefer fewer tiles, then lower tile ids. When
//! no subset covers the debt, everything is sold.

use tracing::{debug, warn};

use super::{ledger, ownership, toll};
use crate::board::TileId;
use crate::core::{GameState, PlayerId, RulesContext};
use crate::events::GameEvent;

/// Tiles to sell to cover `debt`.
///
/// `sales` pairs each tile with its sale value and must be sorted by tile id.
/// Returns the chosen tiles in ascending order, or every tile when even
/// selling all of them falls short.
#[must_use]
pub fn plan_liquidation(sales: &[(TileId, i64)], debt: i64) -> Vec<TileId> {
    if debt <= 0 {
        return Vec::new();
    }
    let total: i64 = sales.iter().map(|&(_, value)| value.max(0)).sum();
    if total < debt {
        return sales.iter().map(|&(tile, _)| tile).collect();
    }

    // best[s]: the preferred tile set with sale total exactly s.
    let mut best: Vec<Option<Vec<TileId>>> = vec![None; total as usize + 1];
    best[0] = Some(Vec::new());

    for &(tile, value) in sales {
        let value = value.max(0) as usize;
        for sum in (value..best.len()).rev() {
            let Some(base) = &best[sum - value] else {
                continue;
            };
            if base.last().is_some_and(|&last| last >= tile) {
                continue;
            }
            let mut candidate = base.clone();
            candidate.push(tile);
            let better = match &best[sum] {
                None => true,
                Some(current) => (candidate.len(), &candidate) < (current.len(), current),
            };
            if better {
                best[sum] = Some(candidate);
            }
        }
    }

    best.into_iter()
        .skip(debt as usize)
        .flatten()
        .next()
        .unwrap_or_else(|| sales.iter().map(|&(tile, _)| tile).collect())
}

/// Sell one tile: clear it and credit its current toll to the owner.
///
/// Returns the sale value. Neither the debt nor victory is re-checked.
pub fn sell(state: &mut GameState, ctx: &RulesContext, player: PlayerId, tile: TileId) -> i64 {
    let value = toll::toll(state, ctx.config, tile);
    ownership::remove_creature(state, tile);
    ledger::adjust_gold(state, player, value);
    state.push_event(GameEvent::TileSold { player, tile, value });
    debug!(%player, %tile, value, "tile sold");
    value
}

/// Sell tiles automatically until the player's gold is non-negative or
/// nothing is left.
pub fn auto_liquidate(state: &mut GameState, ctx: &RulesContext, player: PlayerId) {
    loop {
        let debt = ledger::debt(state, player);
        if debt == 0 || state.is_over() {
            return;
        }
        let sales: Vec<_> = state
            .owned_tiles(player)
            .map(|tile| (tile, toll::toll(state, ctx.config, tile)))
            .collect();
        if sales.is_empty() {
            return;
        }

        let total: i64 = sales.iter().map(|&(_, v)| v).sum();
        if total < debt {
            warn!(%player, debt, total, "liquidation cannot cover debt; selling everything");
        }

        for tile in plan_liquidation(&sales, debt) {
            sell(state, ctx, player, tile);
        }
    }
}
