//! Runs computer turns through the engine's action queue.

use nightdealer_engine::action::Action;
use nightdealer_engine::engine::Engine;
use nightdealer_engine::errors::GameError;
use nightdealer_engine::game::MatchOutcome;
use nightdealer_engine::scheduler::ActionQueue;
use tracing::{debug, warn};

use crate::AIOpponent;

/// Cosmetic pause a front-end may show before each computer action.
pub const THINK_DELAY_MS: u64 = 350;

// Far above any real turn (omen + reroll + 2 tiles + 2 effect chains + validate).
const MAX_ACTIONS_PER_TURN: usize = 16;

/// Lets `ai` play the current turn to completion, one scheduled action at a
/// time. Returns the number of actions applied.
///
/// A turn that does not finish within a sane number of actions is wound
/// back and validated empty.
pub fn play_turn(
    engine: &mut Engine,
    ai: &dyn AIOpponent,
    queue: &mut ActionQueue,
) -> Result<usize, GameError> {
    let player = engine.current_player();
    let serial = engine.state().turn_serial();
    let mut applied = 0;
    while !engine.is_over() && engine.state().turn_serial() == serial {
        if applied >= MAX_ACTIONS_PER_TURN {
            warn!(player = %player, ai = ai.name(), "turn did not settle, validating empty");
            if !engine.state().pending().is_empty() {
                queue.schedule(Action::CancelAll, 0);
            }
            queue.schedule(Action::Validate, 0);
            applied += queue.drain_into(engine)?;
            break;
        }
        let action = ai.next_action(engine);
        queue.schedule(action, THINK_DELAY_MS);
        applied += queue.drain_into(engine)?;
    }
    debug!(player = %player, ai = ai.name(), actions = applied, "turn played");
    Ok(applied)
}

/// Plays a whole match with `ais[0]` as P1 and `ais[1]` as P2.
pub fn play_match(
    engine: &mut Engine,
    ais: [&dyn AIOpponent; 2],
) -> Result<MatchOutcome, GameError> {
    let mut queue = ActionQueue::new();
    loop {
        if let Some(outcome) = engine.outcome() {
            return Ok(outcome);
        }
        let ai = ais[engine.current_player().index()];
        play_turn(engine, ai, &mut queue)?;
    }
}
