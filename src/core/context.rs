//! Borrowed static data shared by the rules modules.

use super::config::RuleConfig;
use crate::board::BoardGraph;
use crate::cards::CardCatalog;

/// The immutable half of a match: ruleset, board and card catalog.
///
/// Rule functions take `(&mut GameState, &RulesContext)` so the mutable
/// state and the static tables can be borrowed side by side.
#[derive(Clone, Copy, Debug)]
pub struct RulesContext<'a> {
    pub config: &'a RuleConfig,
    pub board: &'a BoardGraph,
    pub catalog: &'a CardCatalog,
}

impl<'a> RulesContext<'a> {
    /// Create a new context.
    #[must_use]
    pub fn new(config: &'a RuleConfig, board: &'a BoardGraph, catalog: &'a CardCatalog) -> Self {
        Self { config, board, catalog }
    }
}
