//! Card system: definitions, catalog, and deck building.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (creature stats or spell effect)
//! - `CardCatalog`: Card definition lookup
//! - `Collection` / `DeckList`: Owned cards and the deck built from them

pub mod definition;
pub mod registry;
pub mod deck;

pub use definition::{CardDefinition, CardId, CardKind, CreatureStats, Resistances, Skill};
pub use registry::{ids, CardCatalog};
pub use deck::{Collection, DeckList};
