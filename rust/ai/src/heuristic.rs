//! Static board evaluation.
//!
//! Every tile is worth `1 + 2·center + 1·corner + 0.4·(enemies it beats)
//! − 0.3·(enemies that beat it)`, counted positive for the evaluating player
//! and negative for the opponent.

use nightdealer_engine::board::{self, Board, Cell, CENTER};
use nightdealer_engine::tiles::{Face, PlayerId, Tile};

pub const BASE_VALUE: f64 = 1.0;
pub const CENTER_BONUS: f64 = 2.0;
pub const CORNER_BONUS: f64 = 1.0;
pub const BEAT_WEIGHT: f64 = 0.4;
pub const THREAT_WEIGHT: f64 = 0.3;

/// Value of owning `cell`, ignoring its neighbours.
pub fn positional_value(cell: Cell) -> f64 {
    let mut v = BASE_VALUE;
    if cell == CENTER {
        v += CENTER_BONUS;
    }
    if board::is_corner(cell) {
        v += CORNER_BONUS;
    }
    v
}

/// Adjacent enemy tiles the tile at `cell` beats.
pub fn beaten_count(board: &Board, cell: Cell) -> usize {
    let Some(tile) = board.tile_at(cell) else {
        return 0;
    };
    board
        .adjacent_owned_by(cell, tile.owner.other())
        .into_iter()
        .filter_map(|c| board.tile_at(c))
        .filter(|enemy| tile.kind.beats(enemy.kind))
        .count()
}

/// Adjacent enemy tiles that beat the tile at `cell`.
pub fn threat_count(board: &Board, cell: Cell) -> usize {
    let Some(tile) = board.tile_at(cell) else {
        return 0;
    };
    board
        .adjacent_owned_by(cell, tile.owner.other())
        .into_iter()
        .filter_map(|c| board.tile_at(c))
        .filter(|enemy| enemy.kind.beats(tile.kind))
        .count()
}

/// Unsigned worth of the tile at `cell` to its owner; 0 for an empty cell.
pub fn tile_value(board: &Board, cell: Cell) -> f64 {
    if board.tile_at(cell).is_none() {
        return 0.0;
    }
    positional_value(cell) + BEAT_WEIGHT * beaten_count(board, cell) as f64
        - THREAT_WEIGHT * threat_count(board, cell) as f64
}

pub fn score_board_for(player: PlayerId, board: &Board) -> f64 {
    board
        .tiles()
        .map(|(cell, tile)| {
            let v = tile_value(board, cell);
            if tile.owner == player { v } else { -v }
        })
        .sum()
}

/// Quick per-cell estimate of putting `face` down on `cell` for `player`.
/// An eclipse is valued as its best basic kind. Empty-cell check is the caller's.
pub fn cell_heuristic(board: &Board, cell: Cell, face: Face, player: PlayerId) -> f64 {
    let kinds: &[Face] = if face.is_eclipse() {
        &Face::BASIC
    } else {
        std::slice::from_ref(&face)
    };
    kinds
        .iter()
        .map(|&kind| {
            let mut b = *board;
            if !b.place(cell, Tile::new(player, kind)) {
                return f64::NEG_INFINITY;
            }
            tile_value(&b, cell)
        })
        .fold(f64::NEG_INFINITY, f64::max)
}
