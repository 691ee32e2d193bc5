//! Terrain assignment.
//!
//! Each tile carries an elemental [`Attribute`] (which drives set bonuses and
//! battle resistances) and a [`Landscape`] used only for display. The table is
//! fixed at game start; afterwards only spell effects change a tile's
//! attribute.

use serde::{Deserialize, Serialize};

use super::graph::{BoardGraph, TileId};

/// Elemental attribute of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Fire,
    Water,
    Earth,
    Wind,
    /// Special tiles. Never grants a resistance.
    Neutral,
}

impl Attribute {
    /// The four elements a creature can resist.
    pub const ELEMENTS: [Attribute; 4] = [Attribute::Fire, Attribute::Water, Attribute::Earth, Attribute::Wind];
}

/// Display artwork for a tile. Carries no rules meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landscape {
    Volcano,
    Lake,
    Desert,
    Meadow,
    Castle,
    Gate,
    Crossroads,
}

impl Landscape {
    /// Default artwork for an attribute.
    #[must_use]
    pub fn for_attribute(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Fire => Landscape::Volcano,
            Attribute::Water => Landscape::Lake,
            Attribute::Earth => Landscape::Desert,
            Attribute::Wind => Landscape::Meadow,
            Attribute::Neutral => Landscape::Crossroads,
        }
    }
}

/// Attribute plus display of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terrain {
    pub attribute: Attribute,
    pub landscape: Landscape,
}

impl Terrain {
    /// Terrain with the default artwork for its attribute.
    #[must_use]
    pub fn of(attribute: Attribute) -> Self {
        Self {
            attribute,
            landscape: Landscape::for_attribute(attribute),
        }
    }
}

/// Initial terrain of every tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTable {
    tiles: Vec<Terrain>,
}

impl TerrainTable {
    /// Build from an explicit per-tile list.
    #[must_use]
    pub fn new(tiles: Vec<Terrain>) -> Self {
        Self { tiles }
    }

    /// The reference assignment for a board.
    ///
    /// Special tiles are neutral; the rest cycle through the four elements in
    /// runs of two so that neighbouring tiles tend to form sets.
    #[must_use]
    pub fn standard(board: &BoardGraph) -> Self {
        let mut ordinal = 0usize;
        let tiles = board
            .tiles()
            .map(|tile| {
                if tile == board.home() {
                    Terrain { attribute: Attribute::Neutral, landscape: Landscape::Castle }
                } else if board.checkpoint_index(tile).is_some() {
                    Terrain { attribute: Attribute::Neutral, landscape: Landscape::Gate }
                } else if board.is_junction(tile) {
                    Terrain::of(Attribute::Neutral)
                } else {
                    let attribute = Attribute::ELEMENTS[(ordinal / 2) % Attribute::ELEMENTS.len()];
                    ordinal += 1;
                    Terrain::of(attribute)
                }
            })
            .collect();
        Self { tiles }
    }

    /// Number of tiles covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Terrain of a tile.
    #[must_use]
    pub fn get(&self, tile: TileId) -> Option<Terrain> {
        self.tiles.get(tile.index()).copied()
    }

    /// Iterate in tile order.
    pub fn iter(&self) -> impl Iterator<Item = Terrain> + '_ {
        self.tiles.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_board() {
        let board = BoardGraph::standard();
        let table = TerrainTable::standard(&board);

        assert_eq!(table.len(), board.tile_count());
    }

    #[test]
    fn test_special_tiles_are_neutral() {
        let board = BoardGraph::standard();
        let table = TerrainTable::standard(&board);

        for tile in board.tiles().filter(|&t| board.is_special(t)) {
            assert_eq!(table.get(tile).unwrap().attribute, Attribute::Neutral);
        }
        assert_eq!(table.get(board.home()).unwrap().landscape, Landscape::Castle);
    }

    #[test]
    fn test_elements_come_in_pairs() {
        let board = BoardGraph::standard();
        let table = TerrainTable::standard(&board);

        assert_eq!(table.get(TileId::new(1)).unwrap().attribute, Attribute::Fire);
        assert_eq!(table.get(TileId::new(2)).unwrap().attribute, Attribute::Fire);
        assert_eq!(table.get(TileId::new(3)).unwrap().attribute, Attribute::Water);
        assert_eq!(table.get(TileId::new(5)).unwrap().attribute, Attribute::Earth);
        assert_eq!(table.get(TileId::new(5)).unwrap().landscape, Landscape::Desert);
    }
}
