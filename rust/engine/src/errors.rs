use thiserror::Error;

use crate::game::Phase;
use crate::tiles::PlayerId;

/// Why an action was turned down. A rejected action never changes state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Action not allowed during {phase}")]
    WrongPhase { phase: Phase },
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },
    #[error("Match is over")]
    MatchOver,
    #[error("Wheel {wheel} is not available")]
    WheelUnavailable { wheel: usize },
    #[error("No wheel selected")]
    NoWheelSelected,
    #[error("Placement cap of {cap} reached for this turn")]
    CapReached { cap: usize },
    #[error("Cell {cell} cannot take a tile")]
    CellUnavailable { cell: usize },
    #[error("Cell {cell} is not adjacent to the first tile at {first}")]
    NotAdjacent { cell: usize, first: usize },
    #[error("Cell {cell} is not an offered target")]
    IllegalTarget { cell: usize },
    #[error("Eclipse must resolve to ATK, HEX or WARD")]
    IllegalAffinity,
    #[error("A special effect must be resolved first")]
    EffectPending,
    #[error("No matching special effect is awaiting a choice")]
    NoEffectPending,
    #[error("Nothing to cancel")]
    NothingToCancel,
    #[error("Reroll not available: {reason}")]
    RerollUnavailable { reason: &'static str },
    #[error("Omen not available")]
    OmenUnavailable,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse grouping of rejections, for callers that only surface feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Phase,
    Actor,
    Exhausted,
    Target,
    EffectBlock,
    Terminal,
}

impl GameError {
    pub fn rejection(&self) -> Rejection {
        match self {
            GameError::WrongPhase { .. } | GameError::InvalidConfig(_) => Rejection::Phase,
            GameError::NotYourTurn { .. } => Rejection::Actor,
            GameError::WheelUnavailable { .. }
            | GameError::NoWheelSelected
            | GameError::CapReached { .. }
            | GameError::NothingToCancel
            | GameError::RerollUnavailable { .. }
            | GameError::OmenUnavailable => Rejection::Exhausted,
            GameError::CellUnavailable { .. }
            | GameError::NotAdjacent { .. }
            | GameError::IllegalTarget { .. }
            | GameError::IllegalAffinity => Rejection::Target,
            GameError::EffectPending | GameError::NoEffectPending => Rejection::EffectBlock,
            GameError::MatchOver => Rejection::Terminal,
        }
    }
}
