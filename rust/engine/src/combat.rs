//! Simultaneous rock-paper-scissors resolution plus trap and curse triggers.
//!
//! All attacks of a pass are tallied on the board as it stands before any
//! flip of that pass, so the order in which cells are visited never matters.

use crate::board::{Board, Cell, CELLS};
use crate::tiles::{Flip, FlipSource, PlayerId};

/// Incoming attacks per cell, indexed by attacking player.
pub type Tally = [[u8; 2]; CELLS];

/// Counts, for every occupied cell, how many adjacent enemies of each player beat it.
pub fn tally(board: &Board) -> Tally {
    let mut counts: Tally = [[0; 2]; CELLS];
    for (cell, attacker) in board.tiles() {
        for &target in board.adjacent_of(cell) {
            let Some(defender) = board.tile_at(target) else {
                continue;
            };
            if defender.owner != attacker.owner && attacker.kind.beats(defender.kind) {
                counts[target][attacker.owner.index()] += 1;
            }
        }
    }
    counts
}

/// A shield absorbs one attack: the side with more attacks loses one.
/// On equal counts the non-active player's attack is the one cancelled,
/// falling back to the active player's when the former has none.
pub fn shield_cancel(counts: [u8; 2], active: PlayerId) -> [u8; 2] {
    let mut out = counts;
    let side = if counts[0] != counts[1] {
        if counts[0] > counts[1] {
            0
        } else {
            1
        }
    } else if counts[active.other().index()] > 0 {
        active.other().index()
    } else {
        active.index()
    };
    out[side] = out[side].saturating_sub(1);
    out
}

/// Resolves one RPS pass in place and returns the flips it produced, in cell order.
pub fn resolve_rps(board: &mut Board, active: PlayerId) -> Vec<Flip> {
    let counts = tally(board);
    let mut flips = Vec::new();
    for (cell, incoming) in counts.iter().enumerate() {
        if incoming[0] == 0 && incoming[1] == 0 {
            continue;
        }
        let Some(tile) = board.tile_at_mut(cell) else {
            continue;
        };
        let mut left = *incoming;
        if tile.shields > 0 {
            tile.shields -= 1;
            left = shield_cancel(left, active);
        }
        let winner = if left[0] > left[1] {
            PlayerId::One
        } else if left[1] > left[0] {
            PlayerId::Two
        } else {
            continue;
        };
        if winner != tile.owner {
            flips.push(Flip {
                cell,
                from: tile.owner,
                to: winner,
                source: FlipSource::Rps,
            });
            tile.owner = winner;
        }
    }
    flips
}

/// Springs `trap_owner`'s trap on the tile at `cell`. A shield is spent
/// instead of the tile when there is one.
pub fn resolve_trap(board: &mut Board, cell: Cell, trap_owner: PlayerId) -> Option<Flip> {
    let tile = board.tile_at_mut(cell)?;
    if tile.owner == trap_owner {
        return None;
    }
    if tile.shields > 0 {
        tile.shields -= 1;
        return None;
    }
    let flip = Flip {
        cell,
        from: tile.owner,
        to: trap_owner,
        source: FlipSource::Trap,
    };
    tile.owner = trap_owner;
    Some(flip)
}

/// Fires every due curse on tiles owned by `player`.
///
/// A shielded tile shrugs the curse off and keeps its shield; otherwise the
/// tile goes to the caster. Either way the mark is gone afterwards.
pub fn trigger_curses(board: &mut Board, player: PlayerId, turn_serial: u32) -> Vec<Flip> {
    let mut flips = Vec::new();
    for cell in 0..CELLS {
        let Some(tile) = board.tile_at_mut(cell) else {
            continue;
        };
        if tile.owner != player {
            continue;
        }
        let Some(curse) = tile.curse else {
            continue;
        };
        if turn_serial < curse.trigger_at {
            continue;
        }
        tile.curse = None;
        if tile.shields == 0 && curse.by != tile.owner {
            flips.push(Flip {
                cell,
                from: tile.owner,
                to: curse.by,
                source: FlipSource::Curse,
            });
            tile.owner = curse.by;
        }
    }
    flips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{CurseMark, Face, Tile};

    fn board(tiles: &[(Cell, PlayerId, Face)]) -> Board {
        let mut b = Board::new();
        for &(c, p, k) in tiles {
            assert!(b.place(c, Tile::new(p, k)));
        }
        b
    }

    #[test]
    fn atk_takes_adjacent_hex() {
        let mut b = board(&[(4, PlayerId::One, Face::Atk), (1, PlayerId::Two, Face::Hex)]);
        let flips = resolve_rps(&mut b, PlayerId::Two);
        assert_eq!(
            flips,
            vec![Flip {
                cell: 1,
                from: PlayerId::Two,
                to: PlayerId::One,
                source: FlipSource::Rps
            }]
        );
        assert_eq!(b.owner_at(4), Some(PlayerId::One));
    }

    #[test]
    fn tallies_ignore_flips_of_the_same_pass() {
        // WARD@0 beats ATK@1 and ATK@1 beats HEX@2: both flip, because the
        // tally is taken before cell 1 changes hands.
        let mut b = board(&[
            (0, PlayerId::One, Face::Ward),
            (1, PlayerId::Two, Face::Atk),
            (2, PlayerId::One, Face::Hex),
        ]);
        let flips = resolve_rps(&mut b, PlayerId::One);
        assert_eq!(flips.len(), 2);
        assert_eq!(b.owner_at(1), Some(PlayerId::One));
        assert_eq!(b.owner_at(2), Some(PlayerId::Two));
    }

    #[test]
    fn resolution_is_deterministic() {
        let start = board(&[
            (0, PlayerId::One, Face::Ward),
            (1, PlayerId::Two, Face::Atk),
            (4, PlayerId::Two, Face::Hex),
            (3, PlayerId::One, Face::Atk),
        ]);
        let mut a = start;
        let mut b = start;
        assert_eq!(resolve_rps(&mut a, PlayerId::One), resolve_rps(&mut b, PlayerId::One));
        assert_eq!(a, b);
    }

    #[test]
    fn shield_absorbs_single_attack() {
        let mut b = board(&[(4, PlayerId::One, Face::Atk), (1, PlayerId::Two, Face::Hex)]);
        b.tile_at_mut(1).unwrap().shields = 1;
        let flips = resolve_rps(&mut b, PlayerId::One);
        assert!(flips.is_empty());
        assert_eq!(b.tile_at(1).unwrap().shields, 0);
        assert_eq!(b.owner_at(1), Some(PlayerId::Two));
    }

    #[test]
    fn shield_only_cancels_one_of_two_attacks() {
        let mut b = board(&[
            (4, PlayerId::Two, Face::Hex),
            (1, PlayerId::One, Face::Atk),
            (3, PlayerId::One, Face::Atk),
        ]);
        b.tile_at_mut(4).unwrap().shields = 1;
        let flips = resolve_rps(&mut b, PlayerId::One);
        assert_eq!(flips.len(), 1);
        assert_eq!(b.owner_at(4), Some(PlayerId::One));
        assert_eq!(b.tile_at(4).unwrap().shields, 0);
    }

    #[test]
    fn shield_tie_break_prefers_non_active_side() {
        assert_eq!(shield_cancel([1, 1], PlayerId::One), [1, 0]);
        assert_eq!(shield_cancel([1, 1], PlayerId::Two), [0, 1]);
        assert_eq!(shield_cancel([2, 1], PlayerId::One), [1, 1]);
        assert_eq!(shield_cancel([0, 3], PlayerId::Two), [0, 2]);
        assert_eq!(shield_cancel([0, 0], PlayerId::One), [0, 0]);
    }

    #[test]
    fn trap_flips_or_eats_shield() {
        let mut b = board(&[(1, PlayerId::Two, Face::Atk)]);
        let flip = resolve_trap(&mut b, 1, PlayerId::One);
        assert_eq!(flip.map(|f| f.source), Some(FlipSource::Trap));
        assert_eq!(b.owner_at(1), Some(PlayerId::One));

        let mut shielded = board(&[(1, PlayerId::Two, Face::Atk)]);
        shielded.tile_at_mut(1).unwrap().shields = 1;
        assert!(resolve_trap(&mut shielded, 1, PlayerId::One).is_none());
        assert_eq!(shielded.tile_at(1).unwrap().shields, 0);
        assert_eq!(shielded.owner_at(1), Some(PlayerId::Two));
    }

    #[test]
    fn curses_fire_only_when_due_and_for_the_acting_owner() {
        let mut b = board(&[(1, PlayerId::Two, Face::Atk), (5, PlayerId::Two, Face::Atk)]);
        let mark = Some(CurseMark {
            by: PlayerId::One,
            trigger_at: 3,
        });
        b.tile_at_mut(1).unwrap().curse = mark;
        b.tile_at_mut(5).unwrap().curse = mark;
        b.tile_at_mut(5).unwrap().shields = 1;

        assert!(trigger_curses(&mut b, PlayerId::Two, 2).is_empty());
        assert!(trigger_curses(&mut b, PlayerId::One, 3).is_empty());
        assert!(b.tile_at(1).unwrap().curse.is_some());

        let flips = trigger_curses(&mut b, PlayerId::Two, 3);
        assert_eq!(flips.len(), 1);
        assert_eq!(flips[0].cell, 1);
        assert_eq!(flips[0].source, FlipSource::Curse);
        assert_eq!(b.owner_at(1), Some(PlayerId::One));
        assert!(b.tile_at(1).unwrap().curse.is_none());
        // Cleansed, shield untouched
        assert_eq!(b.owner_at(5), Some(PlayerId::Two));
        assert_eq!(b.tile_at(5).unwrap().shields, 1);
        assert!(b.tile_at(5).unwrap().curse.is_none());
    }
}
