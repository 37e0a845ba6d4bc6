use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::game::{GameState, MatchOutcome, RoundResult};
use crate::tiles::{Face, Flip, PlayerId};

/// A tile committed by a validated turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Wheel slot that was spent (0-4)
    pub wheel: usize,
    pub cell: Cell,
    /// Face shown by the wheel
    pub face: Face,
    /// Kind the tile had when combat ran (differs from `face` for eclipses)
    pub kind: Face,
    /// Landed on an opposing trap
    pub trapped: bool,
}

/// One validated turn.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u8,
    pub turn: u8,
    /// Global turn serial after this validation
    pub serial: u32,
    pub player: PlayerId,
    pub placements: Vec<PlacedTile>,
    /// Trap, RPS and curse flips in application order
    pub flips: Vec<Flip>,
    /// Flip of the previous turn this player reversed with the Omen
    #[serde(default)]
    pub omen: Option<Flip>,
}

/// Complete record of a match, written one per line by `sim --jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Identifier (format: YYYYMMDD-NNNNNN)
    pub match_id: String,
    /// RNG seed the match was played with (enables replay)
    pub seed: u64,
    pub rounds: Vec<RoundResult>,
    pub outcome: Option<MatchOutcome>,
    pub turns: Vec<TurnRecord>,
    /// Names of the controllers of P1 and P2
    #[serde(default)]
    pub players: Option<[String; 2]>,
    /// Timestamp when the match finished (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl MatchRecord {
    /// Captures the rounds, outcome and turn log of `state`. Controller
    /// names and the timestamp are left to the caller.
    pub fn from_state(match_id: String, state: &GameState) -> Self {
        Self {
            match_id,
            seed: state.seed(),
            rounds: state.rounds().to_vec(),
            outcome: state.outcome(),
            turns: state.history().to_vec(),
            players: None,
            ts: None,
        }
    }

    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub fn format_match_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}
