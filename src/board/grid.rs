//! Square-grid topology.
//!
//! Pure coordinate math over an N×N tile space. Tiles are identified by an
//! integer id in `[0, N²)` with `id = y * N + x`. Adjacency is orthogonal
//! only: Manhattan distance exactly 1, no diagonals, no wraparound across
//! edges. The reference game uses N = 5 but all math is parametric.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Grid side length of the reference game.
pub const GRID_SIZE: u32 = 5;

/// An N×N square-grid topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
}

impl Grid {
    /// Creates a grid with the given side length.
    pub const fn new(size: u32) -> Self {
        Grid { size }
    }

    /// The side length N.
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Total number of tiles, N².
    pub const fn tile_count(self) -> u32 {
        self.size * self.size
    }

    /// Returns true if `id` names a tile on this grid.
    pub const fn contains(self, id: u32) -> bool {
        id < self.tile_count()
    }

    /// Converts a tile id to `(x, y)` coordinates.
    pub fn id_to_coords(self, id: u32) -> Result<(u32, u32), RuleError> {
        if !self.contains(id) {
            return Err(RuleError::OutOfRange);
        }
        Ok((id % self.size, id / self.size))
    }

    /// Converts `(x, y)` coordinates to a tile id.
    pub fn coords_to_id(self, x: u32, y: u32) -> Result<u32, RuleError> {
        if x >= self.size || y >= self.size {
            return Err(RuleError::OutOfRange);
        }
        Ok(y * self.size + x)
    }

    /// Returns true iff `a` and `b` are orthogonally adjacent.
    ///
    /// Out-of-range ids are simply not adjacent to anything.
    pub fn are_adjacent(self, a: u32, b: u32) -> bool {
        let (Ok((ax, ay)), Ok((bx, by))) = (self.id_to_coords(a), self.id_to_coords(b)) else {
            return false;
        };
        let dx = ax.abs_diff(bx);
        let dy = ay.abs_diff(by);
        dx + dy == 1
    }

    /// Returns the ids of all orthogonal neighbors of `id`.
    ///
    /// Corner tiles have 2 neighbors, edge tiles 3, interior tiles 4.
    pub fn adjacent_ids(self, id: u32) -> Result<Vec<u32>, RuleError> {
        let (x, y) = self.id_to_coords(id)?;
        let mut neighbors = Vec::with_capacity(4);
        if x > 0 {
            neighbors.push(y * self.size + (x - 1));
        }
        if x + 1 < self.size {
            neighbors.push(y * self.size + (x + 1));
        }
        if y > 0 {
            neighbors.push((y - 1) * self.size + x);
        }
        if y + 1 < self.size {
            neighbors.push((y + 1) * self.size + x);
        }
        Ok(neighbors)
    }

    /// Spawn tiles in join order: the four corners of the grid.
    pub fn spawn_tiles(self) -> [u32; 4] {
        let n = self.size;
        [0, n - 1, n * (n - 1), n * n - 1]
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_SIZE)
    }
}
