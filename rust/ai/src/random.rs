//! Uniformly random legal play, used as a sparring partner in simulations.

use nightdealer_engine::action::Action;
use nightdealer_engine::board::CELLS;
use nightdealer_engine::effects::{EffectRequest, HexMode};
use nightdealer_engine::engine::Engine;
use nightdealer_engine::tiles::Face;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::AIOpponent;

/// Picks among legal moves at random. The stream is derived from the match
/// seed and the turn position, so replays with the same seed repeat exactly.
#[derive(Debug, Clone, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }

    fn rng_for(engine: &Engine) -> StdRng {
        let s = engine.state();
        let salt = ((s.turn_serial() as u64) << 8) | s.pending().len() as u64;
        StdRng::seed_from_u64(s.seed() ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

impl AIOpponent for RandomAI {
    fn next_action(&self, engine: &Engine) -> Action {
        let state = engine.state();
        let mut rng = Self::rng_for(engine);
        if state.omen_window_open() {
            return Action::DeclineOmen;
        }
        match state.effect() {
            EffectRequest::Idle => {}
            EffectRequest::AwaitingEclipse { .. } => {
                let kind = Face::BASIC.choose(&mut rng).copied().unwrap_or(Face::Atk);
                return Action::ResolveEclipse { kind };
            }
            EffectRequest::AwaitingWard { cell, candidates } => {
                let target = candidates.choose(&mut rng).copied().unwrap_or(*cell);
                return Action::ResolveWard { target };
            }
            EffectRequest::AwaitingHex {
                cell,
                curse_targets,
                trap_targets,
            } => {
                let use_curse = !curse_targets.is_empty()
                    && (trap_targets.is_empty() || rng.random_bool(0.5));
                let (mode, pool) = if use_curse {
                    (HexMode::Curse, curse_targets)
                } else {
                    (HexMode::Trap, trap_targets)
                };
                let target = pool.choose(&mut rng).copied().unwrap_or(*cell);
                return Action::ResolveHex { mode, cell: target };
            }
        }

        // Second tile only half the time
        if !state.pending().is_empty() && rng.random_bool(0.5) {
            return Action::Validate;
        }
        let wheels = state.loadout(state.current_player()).available();
        let cells: Vec<usize> = (0..CELLS).filter(|&c| engine.can_place(c)).collect();
        match (wheels.choose(&mut rng), cells.choose(&mut rng)) {
            (Some(&wheel), Some(&cell)) => Action::Place { wheel, cell },
            _ => Action::Validate,
        }
    }

    fn name(&self) -> &str {
        "RandomAI"
    }
}
