//! Text rendering of the board, wheels and match events for the terminal.
//!
//! Pure functions over engine snapshots; nothing here writes to a stream.
//!
//! ## Example
//!
//! ```rust
//! use nightdealer_cli::formatters::format_board;
//! use nightdealer_engine::board::Board;
//! use nightdealer_engine::tiles::{Face, PlayerId, Tile};
//!
//! let mut board = Board::new();
//! board.place(4, Tile::new(PlayerId::One, Face::Atk));
//! let text = format_board(&board, None, &[]);
//! assert!(text.contains("4 P1 ATK"));
//! ```

use nightdealer_engine::board::{Board, Cell};
use nightdealer_engine::effects::EffectRequest;
use nightdealer_engine::game::{MatchOutcome, RoundResult};
use nightdealer_engine::record::TurnRecord;
use nightdealer_engine::snapshot::Snapshot;
use nightdealer_engine::tiles::{Flip, FlipSource, PlayerId, Tile};
use nightdealer_engine::wheels::Loadout;

const CELL_WIDTH: usize = 10;
const ROW_RULE: &str = "+-------------+-------------+-------------+";

/// Tile text: owner and kind, `+N` for shields, `!` when cursed.
pub fn format_tile(tile: &Tile) -> String {
    let mut s = format!("{} {}", tile.owner, tile.kind);
    if tile.shields > 0 {
        s.push_str(&format!("+{}", tile.shields));
    }
    if tile.curse.is_some() {
        s.push('!');
    }
    s
}

/// 3x3 grid. `own_trap` is only ever the viewer's trap; `highlighted`
/// cells are marked `*` as legal drops.
pub fn format_board(board: &Board, own_trap: Option<Cell>, highlighted: &[Cell]) -> String {
    let mut lines = vec![ROW_RULE.to_string()];
    for row in 0..3 {
        let mut line = String::from("|");
        for col in 0..3 {
            let cell = row * 3 + col;
            let content = match board.tile_at(cell) {
                Some(tile) => format_tile(tile),
                None if own_trap == Some(cell) => "^trap".to_string(),
                None if highlighted.contains(&cell) => "*".to_string(),
                None => ".".to_string(),
            };
            line.push_str(&format!(" {} {:<width$}|", cell, content, width = CELL_WIDTH));
        }
        lines.push(line);
        lines.push(ROW_RULE.to_string());
    }
    lines.join("\n")
}

/// Wheel strip such as `[0]ATK [1*]HEX [2]---`; used slots show dashes.
pub fn format_wheels(loadout: &Loadout, selected: Option<usize>) -> String {
    loadout
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let mark = if selected == Some(i) { "*" } else { "" };
            if slot.used {
                format!("[{}{}]---", i, mark)
            } else {
                format!("[{}{}]{}", i, mark, slot.face)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_flip(flip: &Flip) -> String {
    let source = match flip.source {
        FlipSource::Rps => "combat",
        FlipSource::Trap => "trap",
        FlipSource::Curse => "curse",
        FlipSource::Omen => "omen",
    };
    format!(
        "cell {}: {} -> {} ({})",
        flip.cell, flip.from, flip.to, source
    )
}

/// One-line summary of a validated turn.
pub fn format_turn(record: &TurnRecord) -> String {
    let placed = if record.placements.is_empty() {
        "no tiles".to_string()
    } else {
        record
            .placements
            .iter()
            .map(|p| {
                let trapped = if p.trapped { " (trapped)" } else { "" };
                if p.face == p.kind {
                    format!("{} on {}{}", p.kind, p.cell, trapped)
                } else {
                    format!("{} as {} on {}{}", p.face, p.kind, p.cell, trapped)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{} played {}; {} flip(s)",
        record.player,
        placed,
        record.flips.len()
    )
}

/// Prompt for an outstanding effect choice, `None` when nothing is owed.
pub fn format_effect(effect: &EffectRequest) -> Option<String> {
    let cells = |cs: &[Cell]| {
        cs.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    match effect {
        EffectRequest::Idle => None,
        EffectRequest::AwaitingWard { cell, candidates } => Some(format!(
            "Ward on {}: choose an ally to bless with 'ward N' from [{}]",
            cell,
            cells(candidates)
        )),
        EffectRequest::AwaitingHex {
            cell,
            curse_targets,
            trap_targets,
        } => Some(format!(
            "Hex on {}: 'curse N' from [{}] or 'trap N' from [{}]",
            cell,
            cells(curse_targets),
            cells(trap_targets)
        )),
        EffectRequest::AwaitingEclipse { cell } => Some(format!(
            "Eclipse on {}: choose 'eclipse atk', 'eclipse hex' or 'eclipse ward'",
            cell
        )),
    }
}

pub fn format_round(result: &RoundResult) -> String {
    let winner = match result.winner {
        Some(p) => format!("{} takes the round", p),
        None => "round tied".to_string(),
    };
    format!(
        "Round {}: P1 {} - P2 {} tiles, {}",
        result.round, result.tiles[0], result.tiles[1], winner
    )
}

pub fn format_outcome(outcome: &MatchOutcome, round_wins: [u8; 2]) -> String {
    format!(
        "{} ({} - {})",
        outcome, round_wins[0], round_wins[1]
    )
}

/// Status line, board and wheels as seen by `viewer`. The opponent's trap
/// never appears.
pub fn render_snapshot(snap: &Snapshot, viewer: PlayerId) -> String {
    let own_trap = snap
        .traps
        .iter()
        .find(|t| t.owner == viewer)
        .map(|t| t.cell);
    let highlighted: &[Cell] = if snap.current == viewer {
        &snap.highlighted
    } else {
        &[]
    };
    let v = viewer.index();
    let mut lines = vec![
        format!(
            "Round {} Turn {} (up to {} tile(s)) - {} to play - round wins P1 {} P2 {}",
            snap.round,
            snap.turn,
            snap.turn_cap,
            snap.current,
            snap.round_wins[0],
            snap.round_wins[1]
        ),
        format_board(&snap.board, own_trap, highlighted),
        format!(
            "{} wheels: {}   rerolls {}   omen {}",
            viewer,
            format_wheels(&snap.loadouts[v], snap.selected.filter(|_| snap.current == viewer)),
            snap.rerolls_left[v],
            snap.omen_charges[v]
        ),
    ];
    if snap.current == viewer {
        if snap.omen_window {
            let lost: Vec<String> = snap
                .last_flips
                .iter()
                .filter(|f| f.from == viewer)
                .map(format_flip)
                .collect();
            lines.push(format!(
                "Omen available: 'omen N' to reverse one of [{}], or 'pass'",
                lost.join("; ")
            ));
        }
        if let Some(prompt) = format_effect(&snap.effect) {
            lines.push(prompt);
        }
    }
    lines.join("\n")
}
