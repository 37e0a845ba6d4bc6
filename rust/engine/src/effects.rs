//! Placement effects of Ward, Hex and Eclipse tiles.
//!
//! A freshly placed tile either settles on its own or leaves behind exactly
//! one [`EffectRequest`] that the acting player must answer before the turn
//! can be validated.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::errors::GameError;
use crate::tiles::{CurseMark, Face, PlayerId};

/// The outstanding special-effect choice, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectRequest {
    #[default]
    Idle,
    /// Ward with allies around: pick one ally to share the shield with.
    AwaitingWard { cell: Cell, candidates: Vec<Cell> },
    /// Hex: curse an adjacent enemy or trap an adjacent empty cell.
    AwaitingHex {
        cell: Cell,
        curse_targets: Vec<Cell>,
        trap_targets: Vec<Cell>,
    },
    /// Eclipse: pick ATK, HEX or WARD.
    AwaitingEclipse { cell: Cell },
}

impl EffectRequest {
    pub fn is_idle(&self) -> bool {
        matches!(self, EffectRequest::Idle)
    }

    /// Cell of the tile the request belongs to.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            EffectRequest::Idle => None,
            EffectRequest::AwaitingWard { cell, .. }
            | EffectRequest::AwaitingHex { cell, .. }
            | EffectRequest::AwaitingEclipse { cell } => Some(*cell),
        }
    }

    /// Drops `blocked` from a Hex's trap targets. A Hex left without any
    /// target settles to `Idle`.
    pub fn without_trap_target(self, blocked: Option<Cell>) -> EffectRequest {
        match self {
            EffectRequest::AwaitingHex {
                cell,
                curse_targets,
                mut trap_targets,
            } => {
                trap_targets.retain(|&c| Some(c) != blocked);
                if curse_targets.is_empty() && trap_targets.is_empty() {
                    EffectRequest::Idle
                } else {
                    EffectRequest::AwaitingHex {
                        cell,
                        curse_targets,
                        trap_targets,
                    }
                }
            }
            other => other,
        }
    }
}

/// Which half of a Hex the player picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexMode {
    Curse,
    Trap,
}

/// A complete Hex answer: mode plus target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HexChoice {
    Curse(Cell),
    Trap(Cell),
}

impl HexChoice {
    pub fn cell(self) -> Cell {
        match self {
            HexChoice::Curse(c) | HexChoice::Trap(c) => c,
        }
    }

    pub fn mode(self) -> HexMode {
        match self {
            HexChoice::Curse(_) => HexMode::Curse,
            HexChoice::Trap(_) => HexMode::Trap,
        }
    }
}

/// Automatic answers to Ward and Hex requests, used wherever nobody is
/// asked interactively (simulations, computer players).
pub trait EffectPolicy {
    fn ward_target(&self, board: &Board, ward: Cell, candidates: &[Cell]) -> Cell;

    fn hex_choice(
        &self,
        board: &Board,
        hex: Cell,
        curse_targets: &[Cell],
        trap_targets: &[Cell],
    ) -> HexChoice;
}

/// Runs the on-place effect of the tile at `cell`.
///
/// A lonely Ward shields itself immediately; everything that needs a
/// decision comes back as a request. ATK tiles and Hexes with nothing
/// around them settle to `Idle`.
pub fn on_place(board: &mut Board, cell: Cell) -> EffectRequest {
    let Some(tile) = board.tile_at(cell).copied() else {
        return EffectRequest::Idle;
    };
    match tile.kind {
        Face::Atk => EffectRequest::Idle,
        Face::Eclipse => EffectRequest::AwaitingEclipse { cell },
        Face::Ward => {
            let candidates = board.adjacent_owned_by(cell, tile.owner);
            if candidates.is_empty() {
                if let Some(t) = board.tile_at_mut(cell) {
                    t.bless();
                }
                EffectRequest::Idle
            } else {
                EffectRequest::AwaitingWard { cell, candidates }
            }
        }
        Face::Hex => {
            let curse_targets = board.adjacent_owned_by(cell, tile.owner.other());
            let trap_targets = board.adjacent_empty(cell);
            if curse_targets.is_empty() && trap_targets.is_empty() {
                EffectRequest::Idle
            } else {
                EffectRequest::AwaitingHex {
                    cell,
                    curse_targets,
                    trap_targets,
                }
            }
        }
    }
}

/// Shares a Ward's blessing with `target`: both tiles gain a shield and lose any curse.
pub fn resolve_ward(board: &mut Board, request: &EffectRequest, target: Cell) -> Result<(), GameError> {
    let EffectRequest::AwaitingWard { cell, candidates } = request else {
        return Err(GameError::NoEffectPending);
    };
    if !candidates.contains(&target) {
        return Err(GameError::IllegalTarget { cell: target });
    }
    for c in [*cell, target] {
        if let Some(t) = board.tile_at_mut(c) {
            t.bless();
        }
    }
    Ok(())
}

/// Applies a Hex answer. A curse replaces any earlier one on the target and
/// falls due at `turn_serial + 1`; a trap replaces the caster's previous trap.
pub fn resolve_hex(
    board: &mut Board,
    traps: &mut [Option<Cell>; 2],
    request: &EffectRequest,
    choice: HexChoice,
    caster: PlayerId,
    turn_serial: u32,
) -> Result<(), GameError> {
    let EffectRequest::AwaitingHex {
        curse_targets,
        trap_targets,
        ..
    } = request
    else {
        return Err(GameError::NoEffectPending);
    };
    match choice {
        HexChoice::Curse(target) => {
            if !curse_targets.contains(&target) {
                return Err(GameError::IllegalTarget { cell: target });
            }
            let tile = board
                .tile_at_mut(target)
                .ok_or(GameError::IllegalTarget { cell: target })?;
            tile.curse = Some(CurseMark {
                by: caster,
                trigger_at: turn_serial + 1,
            });
        }
        HexChoice::Trap(target) => {
            if !trap_targets.contains(&target) {
                return Err(GameError::IllegalTarget { cell: target });
            }
            traps[caster.index()] = Some(target);
        }
    }
    Ok(())
}

/// Fixes an Eclipse tile's kind. Unless the tile landed on a trap, the new
/// kind's own placement effect follows right away.
pub fn resolve_eclipse(
    board: &mut Board,
    request: &EffectRequest,
    kind: Face,
    trapped: bool,
) -> Result<EffectRequest, GameError> {
    let EffectRequest::AwaitingEclipse { cell } = request else {
        return Err(GameError::NoEffectPending);
    };
    if kind.is_eclipse() {
        return Err(GameError::IllegalAffinity);
    }
    let tile = board
        .tile_at_mut(*cell)
        .ok_or(GameError::IllegalTarget { cell: *cell })?;
    tile.kind = kind;
    if trapped {
        Ok(EffectRequest::Idle)
    } else {
        Ok(on_place(board, *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;

    fn put(board: &mut Board, cell: Cell, owner: PlayerId, kind: Face) {
        assert!(board.place(cell, Tile::new(owner, kind)));
    }

    #[test]
    fn lonely_ward_shields_itself() {
        let mut b = Board::new();
        put(&mut b, 4, PlayerId::One, Face::Ward);
        b.tile_at_mut(4).unwrap().curse = Some(CurseMark {
            by: PlayerId::Two,
            trigger_at: 9,
        });
        assert_eq!(on_place(&mut b, 4), EffectRequest::Idle);
        let t = b.tile_at(4).unwrap();
        assert_eq!(t.shields, 1);
        assert!(t.curse.is_none());
    }

    #[test]
    fn ward_with_allies_asks_for_target() {
        let mut b = Board::new();
        put(&mut b, 1, PlayerId::One, Face::Atk);
        put(&mut b, 5, PlayerId::Two, Face::Atk);
        put(&mut b, 4, PlayerId::One, Face::Ward);
        let req = on_place(&mut b, 4);
        assert_eq!(
            req,
            EffectRequest::AwaitingWard {
                cell: 4,
                candidates: vec![1]
            }
        );
        assert_eq!(
            resolve_ward(&mut b, &req, 5),
            Err(GameError::IllegalTarget { cell: 5 })
        );
        resolve_ward(&mut b, &req, 1).unwrap();
        assert_eq!(b.tile_at(4).unwrap().shields, 1);
        assert_eq!(b.tile_at(1).unwrap().shields, 1);
        assert_eq!(b.tile_at(5).unwrap().shields, 0);
    }

    #[test]
    fn hex_offers_enemies_and_empty_cells() {
        let mut b = Board::new();
        put(&mut b, 1, PlayerId::Two, Face::Atk);
        put(&mut b, 3, PlayerId::One, Face::Atk);
        put(&mut b, 0, PlayerId::One, Face::Hex);
        let req = on_place(&mut b, 0);
        assert_eq!(
            req,
            EffectRequest::AwaitingHex {
                cell: 0,
                curse_targets: vec![1],
                trap_targets: vec![],
            }
        );
        let mut traps = [None, None];
        resolve_hex(&mut b, &mut traps, &req, HexChoice::Curse(1), PlayerId::One, 4).unwrap();
        assert_eq!(
            b.tile_at(1).unwrap().curse,
            Some(CurseMark {
                by: PlayerId::One,
                trigger_at: 5
            })
        );
        assert_eq!(
            resolve_hex(&mut b, &mut traps, &req, HexChoice::Trap(3), PlayerId::One, 4),
            Err(GameError::IllegalTarget { cell: 3 })
        );
    }

    #[test]
    fn boxed_in_hex_is_a_no_op() {
        let mut b = Board::new();
        put(&mut b, 1, PlayerId::One, Face::Atk);
        put(&mut b, 3, PlayerId::One, Face::Ward);
        put(&mut b, 0, PlayerId::One, Face::Hex);
        assert!(on_place(&mut b, 0).is_idle());
    }

    #[test]
    fn eclipse_cascades_unless_trapped() {
        let mut b = Board::new();
        put(&mut b, 4, PlayerId::One, Face::Eclipse);
        let req = on_place(&mut b, 4);
        assert_eq!(req, EffectRequest::AwaitingEclipse { cell: 4 });
        assert_eq!(
            resolve_eclipse(&mut b, &req, Face::Eclipse, false),
            Err(GameError::IllegalAffinity)
        );
        let next = resolve_eclipse(&mut b, &req, Face::Hex, false).unwrap();
        assert!(matches!(next, EffectRequest::AwaitingHex { cell: 4, .. }));
        assert_eq!(b.tile_at(4).unwrap().kind, Face::Hex);

        let mut trapped = Board::new();
        put(&mut trapped, 2, PlayerId::Two, Face::Eclipse);
        let req = on_place(&mut trapped, 2);
        let next = resolve_eclipse(&mut trapped, &req, Face::Ward, true).unwrap();
        assert!(next.is_idle());
        assert_eq!(trapped.tile_at(2).unwrap().shields, 0);
    }

    #[test]
    fn hex_never_offers_a_cell_already_trapped() {
        let mut b = Board::new();
        put(&mut b, 0, PlayerId::One, Face::Hex);
        let req = on_place(&mut b, 0).without_trap_target(Some(1));
        assert_eq!(
            req,
            EffectRequest::AwaitingHex {
                cell: 0,
                curse_targets: vec![],
                trap_targets: vec![3],
            }
        );
        let idle = req.without_trap_target(Some(3));
        assert!(idle.is_idle());
        assert!(EffectRequest::Idle.without_trap_target(Some(3)).is_idle());
    }
}
