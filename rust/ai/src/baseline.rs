//! Baseline computer player for Night Dealer.
//!
//! Searches every legal first tile one ply deep, rerolls when nothing on
//! offer beats the current position by a margin, and adds a greedy second
//! tile when the turn allows one.

use nightdealer_engine::action::Action;
use nightdealer_engine::effects::{EffectPolicy, EffectRequest, HexChoice, HexMode};
use nightdealer_engine::engine::Engine;
use tracing::debug;

use crate::AIOpponent;
use crate::heuristic::score_board_for;
use crate::policy::{AutoEffects, omen_pick};
use crate::search::{best_affinity, best_second_tile, search_best};

/// Improvement a first tile must bring before a reroll is ruled out.
pub const REROLL_MARGIN: f64 = 0.5;

/// Heuristic one-ply player.
///
/// # Decision order
///
/// 1. Omen window open: reverse the most valuable flip it lost, else decline
/// 2. Outstanding effect: answer it (eclipse affinity by simulation, Ward/Hex by [`AutoEffects`])
/// 3. No tile yet: search; reroll instead when the best result is within
///    [`REROLL_MARGIN`] of the current score and a reroll is legal
/// 4. One tile and room for another: greedy second tile
/// 5. Validate
///
/// # Example
///
/// ```rust
/// use nightdealer_ai::AIOpponent;
/// use nightdealer_ai::baseline::BaselineAI;
/// use nightdealer_engine::action::Action;
/// use nightdealer_engine::config::RulesConfig;
/// use nightdealer_engine::engine::Engine;
///
/// let ai = BaselineAI::new();
/// let engine = Engine::new(Some(42), RulesConfig::default()).unwrap();
/// // Empty board on turn one: always opens with a tile
/// assert!(matches!(ai.next_action(&engine), Action::Place { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI {
    name: &'static str,
    reroll_aware: bool,
    policy: AutoEffects,
}

impl BaselineAI {
    pub fn new() -> Self {
        Self {
            name: "BaselineAI",
            reroll_aware: true,
            policy: AutoEffects,
        }
    }

    /// Same search without ever spending a reroll.
    pub fn greedy() -> Self {
        Self {
            name: "GreedyAI",
            reroll_aware: false,
            policy: AutoEffects,
        }
    }

    fn answer_effect(&self, engine: &Engine, effect: &EffectRequest) -> Option<Action> {
        let board = engine.board();
        match effect {
            EffectRequest::Idle => None,
            EffectRequest::AwaitingEclipse { .. } => Some(Action::ResolveEclipse {
                kind: best_affinity(engine, &self.policy),
            }),
            EffectRequest::AwaitingWard { cell, candidates } => Some(Action::ResolveWard {
                target: self.policy.ward_target(board, *cell, candidates),
            }),
            EffectRequest::AwaitingHex {
                cell,
                curse_targets,
                trap_targets,
            } => {
                let (mode, cell) =
                    match self.policy.hex_choice(board, *cell, curse_targets, trap_targets) {
                        HexChoice::Curse(c) => (HexMode::Curse, c),
                        HexChoice::Trap(c) => (HexMode::Trap, c),
                    };
                Some(Action::ResolveHex { mode, cell })
            }
        }
    }

    fn first_tile(&self, engine: &Engine) -> Action {
        let me = engine.current_player();
        let best = search_best(engine, &self.policy);
        let current = score_board_for(me, engine.board());
        let unpromising = best.is_none_or(|b| b.score <= current + REROLL_MARGIN);
        if self.reroll_aware && unpromising && engine.can_reroll() {
            debug!(player = %me, current, best = ?best.map(|b| b.score), "rerolling");
            return Action::Reroll;
        }
        match best {
            Some(b) => Action::Place {
                wheel: b.wheel,
                cell: b.cell,
            },
            None => Action::Validate,
        }
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

impl AIOpponent for BaselineAI {
    fn next_action(&self, engine: &Engine) -> Action {
        let state = engine.state();
        if engine.is_over() {
            return Action::Validate;
        }
        if state.omen_window_open() {
            return match omen_pick(engine.board(), state.last_flips(), state.current_player()) {
                Some(cell) => Action::ApplyOmen { cell },
                None => Action::DeclineOmen,
            };
        }
        if let Some(action) = self.answer_effect(engine, state.effect()) {
            return action;
        }
        match state.pending().len() {
            0 => self.first_tile(engine),
            1 if state.turn_cap() > 1 => match best_second_tile(engine) {
                Some((wheel, cell)) => Action::Place { wheel, cell },
                None => Action::Validate,
            },
            _ => Action::Validate,
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightdealer_engine::config::RulesConfig;
    use nightdealer_engine::tiles::{Face, PlayerId, Tile};

    const P1: PlayerId = PlayerId::One;
    const P2: PlayerId = PlayerId::Two;

    fn engine() -> Engine {
        Engine::with_starter(6, RulesConfig::default(), P1).unwrap()
    }

    #[test]
    fn names() {
        assert_eq!(BaselineAI::new().name(), "BaselineAI");
        assert_eq!(BaselineAI::greedy().name(), "GreedyAI");
    }

    #[test]
    fn takes_the_capture() {
        let mut e = engine();
        e.board_mut().place(1, Tile::new(P2, Face::Hex));
        e.set_faces(P1, [Face::Ward, Face::Ward, Face::Atk, Face::Ward, Face::Ward]);
        assert_eq!(
            BaselineAI::new().next_action(&e),
            Action::Place { wheel: 2, cell: 4 }
        );
    }

    #[test]
    fn answers_an_open_effect() {
        let mut e = engine();
        e.board_mut().place(1, Tile::new(P1, Face::Atk));
        e.set_faces(P1, [Face::Ward; 5]);
        e.place(0, 4).unwrap();
        assert_eq!(
            BaselineAI::new().next_action(&e),
            Action::ResolveWard { target: 1 }
        );
    }

    #[test]
    fn reverses_a_lost_tile_with_the_omen() {
        let mut e = engine();
        e.board_mut().place(1, Tile::new(P2, Face::Hex));
        e.set_faces(P1, [Face::Atk; 5]);
        e.place(0, 4).unwrap();
        e.validate_turn().unwrap();
        assert_eq!(
            BaselineAI::new().next_action(&e),
            Action::ApplyOmen { cell: 1 }
        );
    }

    #[test]
    fn rerolls_only_when_nothing_helps() {
        let mut e = engine();
        // Turn 1: both sides put a tile down so rerolls open up on turn 2
        e.set_faces(P1, [Face::Atk; 5]);
        e.place(0, 4).unwrap();
        e.validate_turn().unwrap();
        e.decline_omen().ok();
        e.set_faces(P2, [Face::Atk; 5]);
        e.place(0, 0).unwrap();
        e.validate_turn().unwrap();

        // P2 holds every cell but 8 with ATK; a HEX there would just be taken.
        for c in [1, 2, 3, 5, 6, 7] {
            e.board_mut().place(c, Tile::new(P2, Face::Atk));
        }
        e.set_faces(P1, [Face::Hex; 5]);
        let ai = BaselineAI::new();
        assert!(e.can_reroll());
        assert_eq!(ai.next_action(&e), Action::Reroll);
        assert_ne!(BaselineAI::greedy().next_action(&e), Action::Reroll);
    }
}
