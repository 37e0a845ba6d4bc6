use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::effects::EffectRequest;
use crate::game::{GameState, MatchOutcome, Phase, RoundResult};
use crate::tiles::{Face, Flip, PlayerId, Trap};
use crate::wheels::Loadout;

/// A pending placement as a view layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingView {
    pub wheel: usize,
    pub cell: Cell,
    pub face: Face,
    /// Current kind of the tile on the board (ECLIPSE until its affinity is chosen)
    pub kind: Face,
    pub trapped: bool,
}

/// Read-only picture of the whole match, indexed by player where arrays appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round: u8,
    pub turn: u8,
    pub turn_cap: usize,
    pub current: PlayerId,
    pub starter: PlayerId,
    pub phase: Phase,
    pub board: Board,
    pub loadouts: [Loadout; 2],
    pub selected: Option<usize>,
    pub pending: Vec<PendingView>,
    /// Cells a second tile may go to
    pub highlighted: Vec<Cell>,
    pub effect: EffectRequest,
    pub traps: Vec<Trap>,
    pub round_wins: [u8; 2],
    pub rounds: Vec<RoundResult>,
    pub rerolls_left: [u8; 2],
    pub can_reroll: bool,
    pub omen_charges: [u8; 2],
    pub omen_window: bool,
    pub last_flips: Vec<Flip>,
    pub tiles_owned: [usize; 2],
    pub turn_serial: u32,
    pub outcome: Option<MatchOutcome>,
}

impl Snapshot {
    pub fn capture(state: &GameState, can_reroll: bool) -> Self {
        let board = *state.board();
        let pending = state
            .pending()
            .iter()
            .map(|p| PendingView {
                wheel: p.wheel,
                cell: p.cell,
                face: p.face,
                kind: board.tile_at(p.cell).map_or(p.face, |t| t.kind),
                trapped: p.trapped,
            })
            .collect();
        let traps = PlayerId::both()
            .into_iter()
            .filter_map(|owner| state.trap_of(owner).map(|cell| Trap { cell, owner }))
            .collect();
        let [p1, p2] = PlayerId::both();
        Self {
            round: state.round(),
            turn: state.turn(),
            turn_cap: state.turn_cap(),
            current: state.current_player(),
            starter: state.starter(),
            phase: state.phase(),
            board,
            loadouts: [*state.loadout(p1), *state.loadout(p2)],
            selected: state.placement().selected(),
            pending,
            highlighted: state.highlighted_cells(),
            effect: state.effect().clone(),
            traps,
            round_wins: state.round_wins(),
            rounds: state.rounds().to_vec(),
            rerolls_left: [state.rerolls_left(p1), state.rerolls_left(p2)],
            can_reroll,
            omen_charges: [state.omen_charges(p1), state.omen_charges(p2)],
            omen_window: state.omen_window_open(),
            last_flips: state.last_flips().to_vec(),
            tiles_owned: [board.count_owned(p1), board.count_owned(p2)],
            turn_serial: state.turn_serial(),
            outcome: state.outcome(),
        }
    }
}
