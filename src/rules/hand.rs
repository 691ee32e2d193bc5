//! Hand management: drawing, random discards and the hand limit.

use tracing::debug;

use crate::cards::CardId;
use crate::core::{GameState, PlayerId, RuleConfig};
use crate::events::GameEvent;

/// Draw up to `count` cards.
///
/// A CPU seat that ends up over the hand limit discards at random right away;
/// a human seat must discard before ending the turn. Returns the number of
/// cards drawn.
pub fn draw(state: &mut GameState, config: &RuleConfig, player: PlayerId, count: usize) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        let GameState { players, rng, .. } = state;
        if players[player].draw(rng).is_none() {
            break;
        }
        drawn += 1;
    }
    if drawn > 0 {
        state.push_event(GameEvent::CardsDrawn { player, count: drawn });
    }
    if state.player(player).is_cpu() {
        enforce_cpu_hand_limit(state, config, player);
    }
    drawn
}

/// Check if a player holds more cards than allowed.
#[must_use]
pub fn is_over_limit(state: &GameState, config: &RuleConfig, player: PlayerId) -> bool {
    state.player(player).hand.len() > config.hand_limit
}

/// Move a card from hand to the discard pile.
///
/// Returns `false` if the card is not in hand.
pub fn discard(state: &mut GameState, player: PlayerId, card: CardId) -> bool {
    if state.player_mut(player).take_from_hand(card).is_none() {
        return false;
    }
    state.player_mut(player).discard.push(card);
    state.push_event(GameEvent::CardDiscarded { player, card });
    true
}

/// Discard a uniformly random card from hand.
pub fn discard_random(state: &mut GameState, player: PlayerId) -> Option<CardId> {
    let len = state.player(player).hand.len();
    if len == 0 {
        return None;
    }
    let index = state.rng.gen_range_usize(0..len);
    let card = state.player(player).hand[index];
    discard(state, player, card);
    Some(card)
}

/// Discard at random until the hand is within the limit.
pub fn enforce_cpu_hand_limit(state: &mut GameState, config: &RuleConfig, player: PlayerId) {
    while is_over_limit(state, config, player) {
        if let Some(card) = discard_random(state, player) {
            debug!(%player, %card, "over hand limit; discarded");
        }
    }
}
