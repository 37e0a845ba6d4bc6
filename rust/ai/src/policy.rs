use nightdealer_engine::board::{Board, Cell, CENTER};
use nightdealer_engine::effects::{EffectPolicy, HexChoice};
use nightdealer_engine::omen;
use nightdealer_engine::tiles::{Flip, PlayerId};

use crate::heuristic::{positional_value, threat_count, tile_value};

/// Automatic Ward/Hex answers used by the computer player and its look-ahead.
///
/// - Ward: shield the most threatened offered ally (first on ties).
/// - Hex: curse the most valuable reachable enemy; with none, trap the empty
///   cell closest to the center.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoEffects;

fn center_distance(cell: Cell) -> usize {
    (cell / 3).abs_diff(CENTER / 3) + (cell % 3).abs_diff(CENTER % 3)
}

/// First maximum of `key` over `cells`.
fn first_max_by(cells: &[Cell], key: impl Fn(Cell) -> f64) -> Option<Cell> {
    let mut best: Option<(Cell, f64)> = None;
    for &c in cells {
        let k = key(c);
        if best.is_none_or(|(_, b)| k > b) {
            best = Some((c, k));
        }
    }
    best.map(|(c, _)| c)
}

impl EffectPolicy for AutoEffects {
    fn ward_target(&self, board: &Board, ward: Cell, candidates: &[Cell]) -> Cell {
        first_max_by(candidates, |c| threat_count(board, c) as f64).unwrap_or(ward)
    }

    fn hex_choice(
        &self,
        board: &Board,
        hex: Cell,
        curse_targets: &[Cell],
        trap_targets: &[Cell],
    ) -> HexChoice {
        if let Some(target) = first_max_by(curse_targets, |c| tile_value(board, c)) {
            return HexChoice::Curse(target);
        }
        let trap = first_max_by(trap_targets, |c| -(center_distance(c) as f64)).unwrap_or(hex);
        HexChoice::Trap(trap)
    }
}

/// Flip of the last batch worth reversing for `me`: the most valuable cell
/// it lost whose flip the Omen can still undo.
pub fn omen_pick(board: &Board, flips: &[Flip], me: PlayerId) -> Option<Cell> {
    let lost: Vec<Cell> = flips
        .iter()
        .map(|f| f.cell)
        .filter(|&c| omen::reversible(board, flips, c).is_some_and(|f| f.from == me))
        .collect();
    first_max_by(&lost, positional_value)
}
