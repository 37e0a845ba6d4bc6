//! Parsing of the text commands typed during `play`.

use nightdealer_engine::action::Action;
use nightdealer_engine::board::CELLS;
use nightdealer_engine::effects::HexMode;
use nightdealer_engine::tiles::Face;
use nightdealer_engine::wheels::WHEEL_SLOTS;

/// Outcome of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// An engine action to apply for the player on turn
    Action(Action),
    /// Redraw the board
    Board,
    Help,
    Quit,
    /// Unusable input, with a message for the user
    Invalid(String),
}

pub const HELP: &str = "\
Commands (cells 0-8 read left to right, top to bottom; wheels 0-4):
  wheel N          select wheel N
  place N          place the selected wheel on cell N
  place W N        select wheel W and place it on cell N
  ward N           Ward: bless your tile on cell N
  curse N          Hex: curse the enemy tile on cell N
  trap N           Hex: set your trap on empty cell N
  eclipse K        Eclipse: become atk, hex or ward
  undo             take back the last tile this turn
  undo all         take back every tile this turn
  reroll           reroll your unused wheels
  omen N           Omen: reverse the last flip on cell N
  pass             let the Omen go unused
  go               end your turn
  board            show the board again
  quit             leave the match";

/// Parses a `play` command line, case-insensitively.
///
/// ```rust
/// # use nightdealer_cli::validation::{parse_command, ParseResult};
/// use nightdealer_engine::action::Action;
///
/// assert_eq!(parse_command("place 4"), ParseResult::Action(Action::PlaceOnCell { cell: 4 }));
/// assert_eq!(parse_command("undo all"), ParseResult::Action(Action::CancelAll));
/// assert_eq!(parse_command("q"), ParseResult::Quit);
/// assert!(matches!(parse_command("place 9"), ParseResult::Invalid(_)));
/// ```
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    let args = &parts[1..];

    let parsed = match verb {
        "q" | "quit" | "exit" => return ParseResult::Quit,
        "help" | "h" | "?" => return ParseResult::Help,
        "board" | "b" => return ParseResult::Board,
        "wheel" | "w" => one_arg(verb, args)
            .and_then(wheel_index)
            .map(|wheel| Action::SelectWheel { wheel }),
        "place" | "p" => match args {
            [cell] => cell_index(cell).map(|cell| Action::PlaceOnCell { cell }),
            [wheel, cell] => wheel_index(wheel)
                .and_then(|wheel| cell_index(cell).map(|cell| Action::Place { wheel, cell })),
            _ => Err("place takes a cell, or a wheel and a cell (e.g. 'place 4')".to_string()),
        },
        "ward" => one_arg(verb, args)
            .and_then(cell_index)
            .map(|target| Action::ResolveWard { target }),
        "curse" => one_arg(verb, args)
            .and_then(cell_index)
            .map(|cell| Action::ResolveHex {
                mode: HexMode::Curse,
                cell,
            }),
        "trap" => one_arg(verb, args)
            .and_then(cell_index)
            .map(|cell| Action::ResolveHex {
                mode: HexMode::Trap,
                cell,
            }),
        "eclipse" | "e" => one_arg(verb, args).and_then(eclipse_kind),
        "undo" | "u" => match args {
            [] => Ok(Action::CancelLast),
            ["all"] => Ok(Action::CancelAll),
            _ => Err("use 'undo' or 'undo all'".to_string()),
        },
        "reroll" | "r" => Ok(Action::Reroll),
        "omen" | "o" => one_arg(verb, args)
            .and_then(cell_index)
            .map(|cell| Action::ApplyOmen { cell }),
        "pass" => Ok(Action::DeclineOmen),
        "go" | "done" | "validate" => Ok(Action::Validate),
        other => Err(format!(
            "Unrecognized command '{}'. Type 'help' for the list",
            other
        )),
    };

    match parsed {
        Ok(action) => ParseResult::Action(action),
        Err(msg) => ParseResult::Invalid(msg),
    }
}

fn one_arg<'a>(verb: &str, args: &[&'a str]) -> Result<&'a str, String> {
    match args {
        [arg] => Ok(arg),
        _ => Err(format!("{} takes exactly one argument", verb)),
    }
}

fn cell_index(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(cell) if cell < CELLS => Ok(cell),
        _ => Err(format!("'{}' is not a cell (0-{})", s, CELLS - 1)),
    }
}

fn wheel_index(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(wheel) if wheel < WHEEL_SLOTS => Ok(wheel),
        _ => Err(format!("'{}' is not a wheel (0-{})", s, WHEEL_SLOTS - 1)),
    }
}

fn eclipse_kind(s: &str) -> Result<Action, String> {
    match s.parse::<Face>() {
        Ok(kind) if !kind.is_eclipse() => Ok(Action::ResolveEclipse { kind }),
        _ => Err("eclipse takes atk, hex or ward".to_string()),
    }
}
