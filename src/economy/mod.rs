//! Economic model: tolls, gold, ownership and forced liquidation.
//!
//! - `toll`: live toll computation and leveling costs
//! - `ledger`: the gold mutation entry points and the debt check
//! - `ownership`: claim, clear, level and status changes on tiles
//! - `liquidation`: tile sales and the CPU subset-sum sale planner

pub mod toll;
pub mod ledger;
pub mod ownership;
pub mod liquidation;

pub use toll::{base_toll, level_up_cost, set_bonus_percent};
pub use liquidation::plan_liquidation;
