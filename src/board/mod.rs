//! Board topology and terrain.
//!
//! - `BoardGraph`: two square rings sharing a junction, next-tables, branch
//!   candidates, home and checkpoints
//! - `TerrainTable`: initial attribute and artwork of every tile

pub mod graph;
pub mod terrain;

pub use graph::{BoardGraph, BranchCandidates, Direction, Ring, TileId};
pub use terrain::{Attribute, Landscape, Terrain, TerrainTable};
