//! # nightdealer-ai: Computer Opponents for Night Dealer
//!
//! Computer players that drive the rules engine through the same action API
//! a human front-end uses. Look-ahead runs on cloned engines only.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for AI decision-making
//! - [`baseline`] - Heuristic one-ply player with reroll awareness
//! - [`random`] - Random legal play
//! - [`heuristic`] / [`policy`] / [`search`] - Board scoring, automatic effect answers and the search
//! - [`driver`] - Turn and match loops over the action queue
//! - [`create_ai`] - Factory function for creating AI opponents
//!
//! ## Quick Start
//!
//! ```rust
//! use nightdealer_ai::{create_ai, driver::play_match};
//! use nightdealer_engine::config::RulesConfig;
//! use nightdealer_engine::engine::Engine;
//!
//! let p1 = create_ai("baseline").unwrap();
//! let p2 = create_ai("random").unwrap();
//! let mut engine = Engine::new(Some(42), RulesConfig::default()).unwrap();
//! let outcome = play_match(&mut engine, [p1.as_ref(), p2.as_ref()]).unwrap();
//! println!("{}", outcome);
//! ```
//!
//! ## AI Types
//!
//! - `"baseline"` - One-ply search, rerolls weak hands
//! - `"greedy"` - Same search, never rerolls
//! - `"random"` - Random legal moves

use nightdealer_engine::action::Action;
use nightdealer_engine::engine::Engine;

pub mod baseline;
pub mod driver;
pub mod heuristic;
pub mod policy;
pub mod random;
pub mod search;

/// Interface for computer players.
///
/// # Example Implementation
///
/// ```rust
/// use nightdealer_ai::AIOpponent;
/// use nightdealer_engine::action::Action;
/// use nightdealer_engine::engine::Engine;
///
/// struct Passive;
///
/// impl AIOpponent for Passive {
///     fn next_action(&self, _engine: &Engine) -> Action {
///         Action::Validate
///     }
///
///     fn name(&self) -> &str {
///         "Passive"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Next action for the player currently on turn. Called repeatedly until
    /// the turn is validated; must never need more than the engine state.
    fn next_action(&self, engine: &Engine) -> Action;

    fn name(&self) -> &str;
}

/// AI types accepted by [`create_ai`].
pub const AI_TYPES: [&str; 3] = ["baseline", "greedy", "random"];

/// Creates an AI opponent by type string; `None` for unknown types.
///
/// ```rust
/// use nightdealer_ai::create_ai;
///
/// assert_eq!(create_ai("baseline").unwrap().name(), "BaselineAI");
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        "greedy" => Some(Box::new(baseline::BaselineAI::greedy())),
        "random" => Some(Box::new(random::RandomAI::new())),
        _ => None,
    }
}
