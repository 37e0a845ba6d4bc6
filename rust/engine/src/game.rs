use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{Board, Cell};
use crate::combat;
use crate::config::RulesConfig;
use crate::effects::EffectRequest;
use crate::errors::GameError;
use crate::omen;
use crate::record::{PlacedTile, TurnRecord};
use crate::rules::{self, TURNS_PER_ROUND};
use crate::tiles::{Face, Flip, PlayerId};
use crate::wheels::{Loadout, WheelRoller, WHEEL_SLOTS};

/// Where the state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Turn start: the player may reverse one flip of the previous turn
    Omen,
    /// Reroll (when legal), wheel selection, placement and validation
    Placement,
    /// A Ward/Hex/Eclipse choice is outstanding
    SpecialEffect,
    /// Terminal: every action is rejected
    MatchEnd,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Omen => "omen",
            Phase::Placement => "placement",
            Phase::SpecialEffect => "special effect",
            Phase::MatchEnd => "match end",
        };
        f.write_str(s)
    }
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(PlayerId),
    Draw,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchOutcome::Winner(p) => Some(*p),
            MatchOutcome::Draw => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Winner(p) => write!(f, "{} wins the match", p),
            MatchOutcome::Draw => write!(f, "Match drawn"),
        }
    }
}

/// Score of a finished round. `winner == None` is a TIE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u8,
    /// Tiles owned at round end, indexed by player
    pub tiles: [usize; 2],
    pub winner: Option<PlayerId>,
}

/// Everything a cancelled placement has to put back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Undo {
    pub(crate) board: Board,
    pub(crate) traps: [Option<Cell>; 2],
    pub(crate) eclipse_used: bool,
}

/// A tile put down this turn and not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlacement {
    pub wheel: usize,
    pub cell: Cell,
    /// Face of the wheel that was spent
    pub face: Face,
    /// Landed on an opposing trap; its effect is skipped
    pub trapped: bool,
    pub(crate) undo: Undo,
}

/// Transient per-turn sub-state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementState {
    pub(crate) selected: Option<usize>,
    pub(crate) pending: Vec<PendingPlacement>,
    pub(crate) effect: EffectRequest,
}

impl PlacementState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn pending(&self) -> &[PendingPlacement] {
        &self.pending
    }

    pub fn effect(&self) -> &EffectRequest {
        &self.effect
    }
}

/// The whole match: board, wheels, turn bookkeeping and history.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: RulesConfig,
    pub(crate) seed: u64,
    pub(crate) board: Board,
    pub(crate) traps: [Option<Cell>; 2],
    pub(crate) loadouts: [Loadout; 2],
    pub(crate) roller: WheelRoller,
    pub(crate) placement: PlacementState,
    pub(crate) round: u8,
    pub(crate) turn: u8,
    pub(crate) current: PlayerId,
    pub(crate) starter: PlayerId,
    pub(crate) round_wins: [u8; 2],
    pub(crate) rounds: Vec<RoundResult>,
    pub(crate) rerolls: [u8; 2],
    pub(crate) reroll_used_this_turn: bool,
    pub(crate) first_move_done: [bool; 2],
    pub(crate) eclipse_used: [bool; 2],
    pub(crate) turn_serial: u32,
    pub(crate) omen: [u8; 2],
    pub(crate) omen_window: bool,
    pub(crate) last_flips: Vec<Flip>,
    /// Omen reversal made at the start of the turn in progress
    pub(crate) omen_reversal: Option<Flip>,
    pub(crate) outcome: Option<MatchOutcome>,
    pub(crate) history: Vec<TurnRecord>,
}

impl GameState {
    /// Seeds round one. `starter` forces the opening player; `None` flips a coin.
    pub fn new(config: RulesConfig, seed: u64, starter: Option<PlayerId>) -> Result<Self, GameError> {
        config.validate()?;
        let mut gs = Self {
            config,
            seed,
            board: Board::new(),
            traps: [None, None],
            loadouts: [Loadout::default(); 2],
            roller: WheelRoller::new_with_seed(seed, config.eclipse_chance),
            placement: PlacementState::default(),
            round: 1,
            turn: 1,
            current: PlayerId::One,
            starter: PlayerId::One,
            round_wins: [0, 0],
            rounds: Vec::new(),
            rerolls: [config.rerolls_per_round; 2],
            reroll_used_this_turn: false,
            first_move_done: [false; 2],
            eclipse_used: [false; 2],
            turn_serial: 0,
            omen: [0, 0],
            omen_window: false,
            last_flips: Vec::new(),
            omen_reversal: None,
            outcome: None,
            history: Vec::new(),
        };
        gs.seed_round(starter);
        Ok(gs)
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn trap_of(&self, player: PlayerId) -> Option<Cell> {
        self.traps[player.index()]
    }
    pub fn loadout(&self, player: PlayerId) -> &Loadout {
        &self.loadouts[player.index()]
    }
    pub fn placement(&self) -> &PlacementState {
        &self.placement
    }
    pub fn pending(&self) -> &[PendingPlacement] {
        &self.placement.pending
    }
    pub fn effect(&self) -> &EffectRequest {
        &self.placement.effect
    }
    pub fn round(&self) -> u8 {
        self.round
    }
    pub fn turn(&self) -> u8 {
        self.turn
    }
    pub fn current_player(&self) -> PlayerId {
        self.current
    }
    pub fn starter(&self) -> PlayerId {
        self.starter
    }
    pub fn round_wins(&self) -> [u8; 2] {
        self.round_wins
    }
    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }
    pub fn rerolls_left(&self, player: PlayerId) -> u8 {
        self.rerolls[player.index()]
    }
    pub fn reroll_used_this_turn(&self) -> bool {
        self.reroll_used_this_turn
    }
    pub fn first_move_done(&self, player: PlayerId) -> bool {
        self.first_move_done[player.index()]
    }
    pub fn eclipse_used(&self, player: PlayerId) -> bool {
        self.eclipse_used[player.index()]
    }
    pub fn turn_serial(&self) -> u32 {
        self.turn_serial
    }
    pub fn omen_charges(&self, player: PlayerId) -> u8 {
        self.omen[player.index()]
    }
    pub fn omen_window_open(&self) -> bool {
        self.omen_window
    }
    pub fn last_flips(&self) -> &[Flip] {
        &self.last_flips
    }
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::MatchEnd
        } else if !self.placement.effect.is_idle() {
            Phase::SpecialEffect
        } else if self.omen_window {
            Phase::Omen
        } else {
            Phase::Placement
        }
    }

    pub fn turn_cap(&self) -> usize {
        rules::turn_cap(self.turn)
    }

    /// Cells a second tile may still go to: empty neighbours of the first
    /// pending tile, while the cap allows one more.
    pub fn highlighted_cells(&self) -> Vec<Cell> {
        match self.placement.pending.as_slice() {
            [first] if self.turn_cap() > 1 => self.board.adjacent_empty(first.cell),
            _ => Vec::new(),
        }
    }

    /// Scripted setups: direct access to the board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Scripted setups: overwrite a player's unspent wheel faces.
    pub fn set_unused_faces(&mut self, player: PlayerId, faces: [Face; WHEEL_SLOTS]) {
        self.loadouts[player.index()].set_unused_faces(faces);
    }

    /// Clears the round and deals fresh wheels to both players.
    pub(crate) fn seed_round(&mut self, starter: Option<PlayerId>) {
        self.board = Board::new();
        self.traps = [None, None];
        self.placement = PlacementState::default();
        self.last_flips.clear();
        self.rerolls = [self.config.rerolls_per_round; 2];
        self.first_move_done = [false; 2];
        self.eclipse_used = [false; 2];
        for loadout in self.loadouts.iter_mut() {
            self.roller.roll_faces(loadout, false, true);
        }
        let starter = starter.unwrap_or_else(|| {
            if self.roller.coin_flip() {
                PlayerId::One
            } else {
                PlayerId::Two
            }
        });
        self.starter = starter;
        self.omen = [0, 0];
        self.omen[starter.other().index()] = 1;
        self.turn = 1;
        self.current = starter;
        tracing::info!(round = self.round, starter = %starter, "round seeded");
        self.start_turn();
    }

    /// Auto-rolls the acting player's unspent wheels and opens the Omen window when due.
    pub(crate) fn start_turn(&mut self) {
        let p = self.current.index();
        self.reroll_used_this_turn = false;
        self.placement = PlacementState::default();
        self.omen_reversal = None;
        let eclipse_allowed = !self.eclipse_used[p];
        self.roller
            .roll_faces(&mut self.loadouts[p], true, eclipse_allowed);
        self.omen_window = omen::window_opens(self.omen[p], &self.last_flips);
    }

    /// Board after this turn's traps and RPS pass, without touching `self`.
    pub(crate) fn preview_board(&self) -> Board {
        let mut board = self.board;
        for p in self.placement.pending.iter().filter(|p| p.trapped) {
            combat::resolve_trap(&mut board, p.cell, self.current.other());
        }
        combat::resolve_rps(&mut board, self.current);
        board
    }

    /// Validation: traps, RPS, turn serial, curses, then hand-over.
    pub(crate) fn commit_turn(&mut self) -> TurnRecord {
        let player = self.current;
        let pending = std::mem::take(&mut self.placement.pending);
        let placements: Vec<PlacedTile> = pending
            .iter()
            .map(|p| PlacedTile {
                wheel: p.wheel,
                cell: p.cell,
                face: p.face,
                kind: self.board.tile_at(p.cell).map_or(p.face, |t| t.kind),
                trapped: p.trapped,
            })
            .collect();

        let mut flips = Vec::new();
        for p in pending.iter().filter(|p| p.trapped) {
            let trap_owner = player.other();
            flips.extend(combat::resolve_trap(&mut self.board, p.cell, trap_owner));
            self.traps[trap_owner.index()] = None;
        }
        flips.extend(combat::resolve_rps(&mut self.board, player));

        self.turn_serial += 1;
        let curse_flips = combat::trigger_curses(&mut self.board, player, self.turn_serial);
        self.last_flips = if curse_flips.is_empty() {
            flips.clone()
        } else {
            curse_flips.clone()
        };
        flips.extend(curse_flips);

        if !pending.is_empty() {
            self.first_move_done[player.index()] = true;
        }
        self.placement = PlacementState::default();
        self.omen_window = false;

        let record = TurnRecord {
            round: self.round,
            turn: self.turn,
            serial: self.turn_serial,
            player,
            placements,
            flips,
            omen: self.omen_reversal.take(),
        };
        tracing::debug!(
            player = %player,
            round = self.round,
            turn = self.turn,
            serial = self.turn_serial,
            flips = record.flips.len(),
            "turn validated"
        );
        self.history.push(record.clone());
        self.advance();
        record
    }

    fn advance(&mut self) {
        if self.current != self.starter {
            if self.turn >= TURNS_PER_ROUND {
                self.end_round();
                return;
            }
            self.turn += 1;
        }
        self.current = self.current.other();
        self.start_turn();
    }

    fn end_round(&mut self) {
        let tiles = [
            self.board.count_owned(PlayerId::One),
            self.board.count_owned(PlayerId::Two),
        ];
        let winner = match tiles[0].cmp(&tiles[1]) {
            std::cmp::Ordering::Greater => Some(PlayerId::One),
            std::cmp::Ordering::Less => Some(PlayerId::Two),
            std::cmp::Ordering::Equal => None,
        };
        if let Some(w) = winner {
            self.round_wins[w.index()] += 1;
        }
        self.rounds.push(RoundResult {
            round: self.round,
            tiles,
            winner,
        });
        tracing::info!(
            round = self.round,
            p1_tiles = tiles[0],
            p2_tiles = tiles[1],
            winner = ?winner,
            "round scored"
        );

        let decided = self
            .round_wins
            .iter()
            .any(|&w| w >= self.config.wins_to_take_match);
        if decided || self.round >= self.config.max_rounds {
            let outcome = match self.round_wins[0].cmp(&self.round_wins[1]) {
                std::cmp::Ordering::Greater => MatchOutcome::Winner(PlayerId::One),
                std::cmp::Ordering::Less => MatchOutcome::Winner(PlayerId::Two),
                std::cmp::Ordering::Equal => MatchOutcome::Draw,
            };
            self.outcome = Some(outcome);
            self.placement = PlacementState::default();
            self.omen_window = false;
            tracing::info!(outcome = %outcome, "match over");
            return;
        }
        self.round += 1;
        self.seed_round(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_opens_round_one() {
        let gs = GameState::new(RulesConfig::default(), 5, Some(PlayerId::Two)).unwrap();
        assert_eq!(gs.round(), 1);
        assert_eq!(gs.turn(), 1);
        assert_eq!(gs.current_player(), PlayerId::Two);
        assert_eq!(gs.omen_charges(PlayerId::One), 1);
        assert_eq!(gs.omen_charges(PlayerId::Two), 0);
        assert_eq!(gs.rerolls_left(PlayerId::One), 2);
        assert_eq!(gs.phase(), Phase::Placement);
        assert!(gs.board().tile_count() == 0);
        for p in PlayerId::both() {
            assert_eq!(gs.loadout(p).available().len(), WHEEL_SLOTS);
            assert!(gs.loadout(p).unused_eclipses() <= 1);
        }
    }

    #[test]
    fn invalid_config_is_refused() {
        let cfg = RulesConfig {
            max_rounds: 0,
            ..RulesConfig::default()
        };
        assert!(GameState::new(cfg, 1, None).is_err());
    }

    #[test]
    fn empty_turns_walk_through_a_drawn_match() {
        let mut gs = GameState::new(RulesConfig::default(), 9, Some(PlayerId::One)).unwrap();
        let mut validated = 0;
        while !gs.is_over() {
            gs.commit_turn();
            validated += 1;
        }
        // Three rounds of six empty turns, every round a TIE.
        assert_eq!(validated, 18);
        assert_eq!(gs.rounds().len(), 3);
        assert!(gs.rounds().iter().all(|r| r.winner.is_none()));
        assert_eq!(gs.outcome(), Some(MatchOutcome::Draw));
        assert_eq!(gs.phase(), Phase::MatchEnd);
        assert_eq!(gs.turn_serial(), 18);
    }
}
