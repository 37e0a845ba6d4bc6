use serde::{Deserialize, Serialize};

use crate::tiles::{PlayerId, Tile};

/// Cell index on the 3×3 grid: row = idx / 3, col = idx % 3.
pub type Cell = usize;

pub const CELLS: usize = 9;
pub const CENTER: Cell = 4;
pub const CORNERS: [Cell; 4] = [0, 2, 6, 8];

// Orthogonal neighbours in N, E, S, W order.
const ADJACENCY: [&[Cell]; CELLS] = [
    &[1, 3],
    &[2, 4, 0],
    &[5, 1],
    &[0, 4, 6],
    &[1, 5, 7, 3],
    &[2, 8, 4],
    &[3, 7],
    &[4, 8, 6],
    &[5, 7],
];

/// Up to four orthogonal neighbours of `cell`; empty for out-of-range cells.
pub fn adjacent_of(cell: Cell) -> &'static [Cell] {
    ADJACENCY.get(cell).copied().unwrap_or(&[])
}

pub fn are_adjacent(a: Cell, b: Cell) -> bool {
    adjacent_of(a).contains(&b)
}

pub fn is_corner(cell: Cell) -> bool {
    CORNERS.contains(&cell)
}

/// Fixed nine-slot tile storage. `Copy`, so simulations work on their own board.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Tile>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only for an in-range cell holding no tile.
    pub fn is_empty(&self, cell: Cell) -> bool {
        matches!(self.cells.get(cell), Some(None))
    }

    pub fn adjacent_of(&self, cell: Cell) -> &'static [Cell] {
        adjacent_of(cell)
    }

    pub fn tile_at(&self, cell: Cell) -> Option<&Tile> {
        self.cells.get(cell).and_then(|c| c.as_ref())
    }

    pub fn tile_at_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.cells.get_mut(cell).and_then(|c| c.as_mut())
    }

    pub fn owner_at(&self, cell: Cell) -> Option<PlayerId> {
        self.tile_at(cell).map(|t| t.owner)
    }

    /// Puts a tile on an empty cell. Returns false (and leaves the board alone)
    /// if the cell is occupied or out of range.
    pub fn place(&mut self, cell: Cell, tile: Tile) -> bool {
        match self.cells.get_mut(cell) {
            Some(slot) if slot.is_none() => {
                *slot = Some(tile);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, cell: Cell) -> Option<Tile> {
        self.cells.get_mut(cell).and_then(Option::take)
    }

    /// Occupied cells in index order.
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, &Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|t| (i, t)))
    }

    pub fn empty_cells(&self) -> Vec<Cell> {
        (0..CELLS).filter(|&c| self.is_empty(c)).collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.tiles().filter(|(_, t)| t.owner == player).count()
    }

    /// Adjacent cells holding a tile owned by `player`.
    pub fn adjacent_owned_by(&self, cell: Cell, player: PlayerId) -> Vec<Cell> {
        adjacent_of(cell)
            .iter()
            .copied()
            .filter(|&c| self.owner_at(c) == Some(player))
            .collect()
    }

    /// Adjacent cells with no tile.
    pub fn adjacent_empty(&self, cell: Cell) -> Vec<Cell> {
        adjacent_of(cell)
            .iter()
            .copied()
            .filter(|&c| self.is_empty(c))
            .collect()
    }
}
