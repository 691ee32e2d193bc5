//! Board topology.
//!
//! Two equal square rings share one corner, the junction. Movement on a ring
//! tile is a pure lookup in the clockwise or counter-clockwise next-table; the
//! junction has four onward neighbors and forces a branch choice.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tile index on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Direction of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Which part of the board a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ring {
    /// The ring holding the home tile.
    Home,
    /// The second ring.
    Outer,
    /// The shared corner.
    Junction,
}

/// Candidate tiles when leaving the junction.
pub type BranchCandidates = SmallVec<[TileId; 4]>;

/// Static board graph.
///
/// ## Example
///
/// ```
/// use realm_duel::board::{BoardGraph, Direction, TileId};
///
/// let board = BoardGraph::standard();
/// assert_eq!(board.tile_count(), 31);
/// assert_eq!(board.next_tile(Direction::Clockwise, TileId::new(3)), TileId::new(4));
/// assert!(board.is_junction(TileId::new(8)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGraph {
    clockwise: Vec<TileId>,
    counter_clockwise: Vec<TileId>,
    junction: TileId,
    /// Junction exits when travelling clockwise (home ring, outer ring).
    clockwise_exits: [TileId; 2],
    /// Junction exits when travelling counter-clockwise (home ring, outer ring).
    counter_clockwise_exits: [TileId; 2],
    home: TileId,
    checkpoints: [TileId; 2],
    ring_len: usize,
}

impl BoardGraph {
    /// The reference 31-tile board.
    #[must_use]
    pub fn standard() -> Self {
        Self::two_rings(16)
    }

    /// Build two square rings of `ring_len` tiles sharing one corner.
    ///
    /// The home ring holds tiles `0..ring_len` with home at 0 and the junction
    /// at `ring_len / 2`. The outer ring holds the junction followed by tiles
    /// `ring_len..2 * ring_len - 1`. Checkpoint 1 is the outer ring's far
    /// corner, checkpoint 2 sits on the home ring past the junction.
    ///
    /// Panics if `ring_len` is below 8 or not a multiple of 4, since no
    /// square with corner checkpoints fits.
    #[must_use]
    pub fn two_rings(ring_len: usize) -> Self {
        assert!(ring_len >= 8 && ring_len % 4 == 0, "ring length must be a multiple of 4, at least 8");
        let tile_count = ring_len * 2 - 1;
        assert!(tile_count <= u8::MAX as usize, "board too large");

        let junction = TileId::new((ring_len / 2) as u8);
        let mut clockwise = vec![TileId::new(0); tile_count];
        let mut counter_clockwise = vec![TileId::new(0); tile_count];

        // Home ring.
        for i in 0..ring_len {
            clockwise[i] = TileId::new(((i + 1) % ring_len) as u8);
            counter_clockwise[i] = TileId::new(((i + ring_len - 1) % ring_len) as u8);
        }

        // Outer ring order: junction, ring_len, ring_len + 1, ..., tile_count - 1.
        let outer: Vec<TileId> = std::iter::once(junction)
            .chain((ring_len..tile_count).map(|i| TileId::new(i as u8)))
            .collect();
        for (pos, &tile) in outer.iter().enumerate().skip(1) {
            clockwise[tile.index()] = outer[(pos + 1) % outer.len()];
            counter_clockwise[tile.index()] = outer[pos - 1];
        }

        let outer_first = outer[1];
        let outer_last = outer[outer.len() - 1];

        Self {
            clockwise_exits: [clockwise[junction.index()], outer_first],
            counter_clockwise_exits: [counter_clockwise[junction.index()], outer_last],
            clockwise,
            counter_clockwise,
            junction,
            home: TileId::new(0),
            checkpoints: [outer[ring_len / 2], TileId::new((ring_len * 3 / 4) as u8)],
            ring_len,
        }
    }

    /// Number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.clockwise.len()
    }

    /// Iterate over every tile in index order.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> {
        (0..self.tile_count() as u8).map(TileId)
    }

    /// Check that a tile exists on this board.
    #[must_use]
    pub fn contains(&self, tile: TileId) -> bool {
        tile.index() < self.tile_count()
    }

    /// The next tile in a direction.
    ///
    /// For the junction this is the home-ring continuation; movement through
    /// the junction itself goes through [`BoardGraph::branch_candidates`].
    #[must_use]
    pub fn next_tile(&self, direction: Direction, tile: TileId) -> TileId {
        match direction {
            Direction::Clockwise => self.clockwise[tile.index()],
            Direction::CounterClockwise => self.counter_clockwise[tile.index()],
        }
    }

    /// The junction tile.
    #[must_use]
    pub fn junction(&self) -> TileId {
        self.junction
    }

    /// Check whether a tile is the junction.
    #[must_use]
    pub fn is_junction(&self, tile: TileId) -> bool {
        tile == self.junction
    }

    /// The home tile.
    #[must_use]
    pub fn home(&self) -> TileId {
        self.home
    }

    /// Both checkpoint tiles, in checkpoint order.
    #[must_use]
    pub fn checkpoints(&self) -> [TileId; 2] {
        self.checkpoints
    }

    /// Which checkpoint (0 or 1) a tile is, if any.
    #[must_use]
    pub fn checkpoint_index(&self, tile: TileId) -> Option<usize> {
        self.checkpoints.iter().position(|&c| c == tile)
    }

    /// Home, checkpoints and the junction cannot be owned.
    #[must_use]
    pub fn is_special(&self, tile: TileId) -> bool {
        tile == self.home || tile == self.junction || self.checkpoint_index(tile).is_some()
    }

    /// Which ring a tile belongs to.
    #[must_use]
    pub fn ring_of(&self, tile: TileId) -> Ring {
        if tile == self.junction {
            Ring::Junction
        } else if tile.index() < self.ring_len {
            Ring::Home
        } else {
            Ring::Outer
        }
    }

    /// Onward neighbors of the junction, minus the tile just departed from.
    #[must_use]
    pub fn branch_candidates(&self, came_from: Option<TileId>) -> BranchCandidates {
        self.clockwise_exits
            .iter()
            .chain(self.counter_clockwise_exits.iter())
            .copied()
            .filter(|&t| Some(t) != came_from)
            .collect()
    }

    /// Direction of travel implied by leaving the junction toward `tile`.
    #[must_use]
    pub fn branch_direction(&self, tile: TileId) -> Option<Direction> {
        if self.clockwise_exits.contains(&tile) {
            Some(Direction::Clockwise)
        } else if self.counter_clockwise_exits.contains(&tile) {
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }

    /// Steps needed to reach `target` walking from `start` in `direction`,
    /// counting `start` itself as the first step. Stops at the junction.
    #[must_use]
    pub fn steps_until(&self, start: TileId, direction: Direction, target: TileId) -> Option<usize> {
        let mut tile = start;
        for steps in 1..=self.tile_count() {
            if tile == target {
                return Some(steps);
            }
            if self.is_junction(tile) {
                return None;
            }
            tile = self.next_tile(direction, tile);
        }
        None
    }
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::standard()
    }
}
