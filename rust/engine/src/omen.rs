//! The Omen: a once-per-round charge that undoes one flip of the previous turn.

use crate::board::{Board, Cell};
use crate::errors::GameError;
use crate::tiles::{Flip, FlipSource};

/// Whether a player with `charges` may look at `last_flips` at turn start.
pub fn window_opens(charges: u8, last_flips: &[Flip]) -> bool {
    charges > 0 && !last_flips.is_empty()
}

/// The flip [`reverse`] would undo on `cell`: the latest one that left the
/// tile with its current owner.
pub fn reversible(board: &Board, last_flips: &[Flip], cell: Cell) -> Option<Flip> {
    let owner = board.owner_at(cell);
    last_flips
        .iter()
        .rev()
        .find(|f| f.cell == cell && owner == Some(f.to))
        .copied()
}

/// Reverses the flip recorded for `cell`, handing the tile back to its
/// previous owner. Only the latest flip that left the tile with its current
/// owner qualifies; it leaves the batch so it cannot be reversed twice.
pub fn reverse(board: &mut Board, last_flips: &mut Vec<Flip>, cell: Cell) -> Result<Flip, GameError> {
    let owner = board.owner_at(cell);
    let pos = last_flips
        .iter()
        .rposition(|f| f.cell == cell && owner == Some(f.to))
        .ok_or(GameError::IllegalTarget { cell })?;
    let flip = last_flips.remove(pos);
    let tile = board
        .tile_at_mut(cell)
        .ok_or(GameError::IllegalTarget { cell })?;
    tile.owner = flip.from;
    Ok(Flip {
        cell,
        from: flip.to,
        to: flip.from,
        source: FlipSource::Omen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Face, PlayerId, Tile};

    #[test]
    fn window_needs_charge_and_flips() {
        let f = Flip {
            cell: 1,
            from: PlayerId::Two,
            to: PlayerId::One,
            source: FlipSource::Rps,
        };
        assert!(window_opens(1, &[f]));
        assert!(!window_opens(0, &[f]));
        assert!(!window_opens(1, &[]));
    }

    #[test]
    fn reverse_restores_previous_owner_once() {
        let mut b = Board::new();
        b.place(1, Tile::new(PlayerId::One, Face::Hex));
        let mut flips = vec![Flip {
            cell: 1,
            from: PlayerId::Two,
            to: PlayerId::One,
            source: FlipSource::Rps,
        }];
        let undone = reverse(&mut b, &mut flips, 1).unwrap();
        assert_eq!(undone.source, FlipSource::Omen);
        assert_eq!(b.owner_at(1), Some(PlayerId::Two));
        assert!(flips.is_empty());
        assert_eq!(
            reverse(&mut b, &mut flips, 1),
            Err(GameError::IllegalTarget { cell: 1 })
        );
    }

    #[test]
    fn reverse_rejects_cells_outside_the_batch() {
        let mut b = Board::new();
        b.place(4, Tile::new(PlayerId::One, Face::Atk));
        let mut flips = vec![Flip {
            cell: 1,
            from: PlayerId::Two,
            to: PlayerId::One,
            source: FlipSource::Rps,
        }];
        assert!(reverse(&mut b, &mut flips, 4).is_err());
        assert_eq!(flips.len(), 1);
        assert_eq!(b.owner_at(4), Some(PlayerId::One));
    }

    #[test]
    fn reverse_takes_the_flip_that_matches_the_owner() {
        let mut b = Board::new();
        b.place(1, Tile::new(PlayerId::Two, Face::Atk));
        let mut flips = vec![
            Flip {
                cell: 1,
                from: PlayerId::Two,
                to: PlayerId::One,
                source: FlipSource::Trap,
            },
            Flip {
                cell: 1,
                from: PlayerId::One,
                to: PlayerId::Two,
                source: FlipSource::Rps,
            },
        ];
        let undone = reverse(&mut b, &mut flips, 1).unwrap();
        assert_eq!(undone.to, PlayerId::One);
        assert_eq!(b.owner_at(1), Some(PlayerId::One));
        assert_eq!(flips.len(), 1);
        assert_eq!(flips[0].source, FlipSource::Trap);
    }
}
