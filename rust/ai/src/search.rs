//! One-ply search over every legal first tile.

use nightdealer_engine::board::{Cell, CELLS};
use nightdealer_engine::effects::EffectPolicy;
use nightdealer_engine::engine::Engine;
use nightdealer_engine::tiles::Face;
use tracing::trace;

use crate::heuristic::{cell_heuristic, score_board_for};

/// A simulated first placement and the board score it leads to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub wheel: usize,
    pub cell: Cell,
    /// Kind an eclipse wheel would be resolved to
    pub affinity: Option<Face>,
    pub score: f64,
}

/// Simulates every unused wheel on every legal cell (and every affinity for
/// an eclipse) on a cloned engine, settling effects with `policy` and running
/// traps plus RPS. Returns the global maximum; earlier candidates win ties.
pub fn search_best(engine: &Engine, policy: &dyn EffectPolicy) -> Option<Candidate> {
    let me = engine.current_player();
    let loadout = engine.state().loadout(me);
    let mut best: Option<Candidate> = None;
    for wheel in loadout.available() {
        let Some(face) = loadout.face(wheel) else {
            continue;
        };
        let affinities: Vec<Option<Face>> = if face.is_eclipse() {
            Face::BASIC.iter().copied().map(Some).collect()
        } else {
            vec![None]
        };
        for cell in (0..CELLS).filter(|&c| engine.can_place(c)) {
            for &affinity in &affinities {
                let Some(board) = engine.simulate_placement(wheel, cell, affinity, policy) else {
                    continue;
                };
                let score = score_board_for(me, &board);
                trace!(wheel, cell, face = %face, ?affinity, score, "candidate");
                if best.is_none_or(|b| score > b.score) {
                    best = Some(Candidate {
                        wheel,
                        cell,
                        affinity,
                        score,
                    });
                }
            }
        }
    }
    best
}

/// Best affinity for the eclipse currently awaiting one.
pub fn best_affinity(engine: &Engine, policy: &dyn EffectPolicy) -> Face {
    let me = engine.current_player();
    let mut best = (Face::Atk, f64::NEG_INFINITY);
    for kind in Face::BASIC {
        if let Some(board) = engine.simulate_affinity(kind, policy) {
            let score = score_board_for(me, &board);
            if score > best.1 {
                best = (kind, score);
            }
        }
    }
    best.0
}

/// Greedy choice of an optional second tile among the highlighted cells.
/// Only worth placing when the per-cell estimate is positive.
pub fn best_second_tile(engine: &Engine) -> Option<(usize, Cell)> {
    let state = engine.state();
    let me = state.current_player();
    let board = state.board();
    let loadout = state.loadout(me);
    let mut best: Option<(usize, Cell, f64)> = None;
    for cell in state.highlighted_cells() {
        for wheel in loadout.available() {
            let Some(face) = loadout.face(wheel) else {
                continue;
            };
            let h = cell_heuristic(board, cell, face, me);
            if h > 0.0 && best.is_none_or(|(_, _, b)| h > b) {
                best = Some((wheel, cell, h));
            }
        }
    }
    best.map(|(w, c, _)| (w, c))
}
