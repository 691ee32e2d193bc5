//! Victory evaluation.
//!
//! A player's total assets are their gold plus the live toll of every tile
//! they own. Reaching the threshold wins; falling to zero or below loses.
//! The first result is latched and never re-evaluated.

use tracing::info;

use crate::core::{GameOutcome, GameState, PlayerId, RuleConfig, VictoryReason};
use crate::economy::toll;
use crate::events::GameEvent;

/// Gold plus owned tolls.
#[must_use]
pub fn total_assets(state: &GameState, config: &RuleConfig, player: PlayerId) -> i64 {
    state.player(player).gold + toll::total_tolls(state, config, player)
}

/// The result the current totals imply, without latching it.
///
/// Wins are checked before losses, player 0 first.
#[must_use]
pub fn evaluate(state: &GameState, config: &RuleConfig) -> Option<GameOutcome> {
    let totals: Vec<_> = PlayerId::all().map(|p| (p, total_assets(state, config, p))).collect();

    if let Some(&(winner, _)) = totals.iter().find(|&&(_, total)| total >= config.victory_threshold) {
        return Some(GameOutcome { winner, reason: VictoryReason::AssetThreshold });
    }
    totals
        .iter()
        .find(|&&(_, total)| total <= 0)
        .map(|&(loser, _)| GameOutcome { winner: loser.opponent(), reason: VictoryReason::Bankruptcy })
}

/// Latch a result if none is latched yet.
pub fn settle(state: &mut GameState, config: &RuleConfig) {
    if state.outcome.is_some() {
        return;
    }
    if let Some(outcome) = evaluate(state, config) {
        info!(winner = %outcome.winner, reason = ?outcome.reason, "match decided");
        state.outcome = Some(outcome);
        state.pending = None;
        state.push_event(GameEvent::VictoryReached { outcome });
    }
}
