//! Rules of the duel.
//!
//! - `engine`: the [`Game`] driver and its command surface
//! - `turn`: dice, stepping, the junction, handoff and upkeep
//! - `encounter`: landing on an opponent tile, battle declaration
//! - `land`: placement, level-up and forced sales
//! - `hand`: draws, discards and the hand limit
//! - `victory`: total assets and the latched outcome
//! - `cpu`: heuristics for CPU seats and self-play
//!
//! Rule functions take `(&mut GameState, &RulesContext)` and return
//! `Result<(), GameError>`; a rejected command leaves the state untouched.

pub mod victory;
pub mod hand;
pub mod turn;
pub mod encounter;
pub mod land;
pub mod cpu;
pub mod engine;

pub use engine::{Game, PlayerSetup};
