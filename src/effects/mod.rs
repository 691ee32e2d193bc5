//! Spell effects.
//!
//! - `SpellEffect`: the closed set of effects printed on spell cards
//! - `TargetSelector`: candidate tiles for targeted spells
//! - `SpellEngine`: casting, the two-phase target selection and effect
//!   application
//!
//! Effects are data; all behavior lives in the engine's single match so
//! adding a variant is a compile error until it is handled.

mod effect;
mod targeting;
mod resolver;

pub use effect::{SpellEffect, SpellUsage, TargetKind};
pub use targeting::TargetSelector;
pub use resolver::SpellEngine;
