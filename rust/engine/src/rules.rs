use crate::board::{are_adjacent, Cell};
use crate::errors::GameError;
use crate::game::GameState;

/// Turns each player takes per round.
pub const TURNS_PER_ROUND: u8 = 3;

/// Tiles a player may put down on `turn`.
///
/// # Examples
///
/// ```
/// use nightdealer_engine::rules::turn_cap;
///
/// assert_eq!(turn_cap(1), 2);
/// assert_eq!(turn_cap(2), 2);
/// assert_eq!(turn_cap(3), 1);
/// ```
pub fn turn_cap(turn: u8) -> usize {
    if turn >= TURNS_PER_ROUND {
        1
    } else {
        2
    }
}

/// Checks whether the acting player may put a tile on `cell` right now.
///
/// Order of checks: cap, then occupancy, then adjacency to the first tile
/// of the turn.
///
/// # Errors
///
/// - [`GameError::CapReached`] - the turn cap is already used up
/// - [`GameError::CellUnavailable`] - out of range or occupied
/// - [`GameError::NotAdjacent`] - second tile not orthogonally next to the first
pub fn check_placement(state: &GameState, cell: Cell) -> Result<(), GameError> {
    let pending = state.pending();
    let cap = state.turn_cap();
    if pending.len() >= cap {
        return Err(GameError::CapReached { cap });
    }
    if !state.board().is_empty(cell) {
        return Err(GameError::CellUnavailable { cell });
    }
    if let Some(first) = pending.first() {
        if !are_adjacent(first.cell, cell) {
            return Err(GameError::NotAdjacent {
                cell,
                first: first.cell,
            });
        }
    }
    Ok(())
}

pub fn can_place(state: &GameState, cell: Cell) -> bool {
    check_placement(state, cell).is_ok()
}

/// Reroll gate for the acting player. Phase and effect checks are left to the caller.
pub fn check_reroll(state: &GameState) -> Result<(), GameError> {
    let p = state.current_player();
    if state.turn() < 2 {
        return Err(GameError::RerollUnavailable {
            reason: "only from turn 2",
        });
    }
    if state.reroll_used_this_turn() {
        return Err(GameError::RerollUnavailable {
            reason: "already rerolled this turn",
        });
    }
    if !state.pending().is_empty() {
        return Err(GameError::RerollUnavailable {
            reason: "a tile was already placed this turn",
        });
    }
    if state.rerolls_left(p) == 0 {
        return Err(GameError::RerollUnavailable {
            reason: "no rerolls left this round",
        });
    }
    if !state.first_move_done(p) {
        return Err(GameError::RerollUnavailable {
            reason: "no tile placed yet this round",
        });
    }
    Ok(())
}
