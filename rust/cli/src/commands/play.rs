//! # Play Command
//!
//! A Night Dealer match on the terminal. P1 is always typed in; P2 is either
//! a computer opponent (`--vs ai`) or a second person at the same keyboard
//! (`--vs human`). Each validated turn and each round result is echoed as it
//! happens. Quitting or closing the input ends the session cleanly.

use crate::cli::Vs;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_flip, format_outcome, format_round, format_turn, render_snapshot};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{HELP, ParseResult, parse_command};
use nightdealer_ai::driver::play_turn;
use nightdealer_ai::{AI_TYPES, create_ai};
use nightdealer_engine::engine::Engine;
use nightdealer_engine::scheduler::ActionQueue;
use std::io::{BufRead, Write};

/// Runs an interactive match until it ends, the user quits, or input runs out.
///
/// `seed` and `ai` fall back to the configuration; a missing seed is drawn at
/// random and printed so the match can be replayed.
pub fn handle_play_command(
    vs: Vs,
    seed: Option<u64>,
    ai: Option<String>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if vs == Vs::Human && ai.is_some() {
        ui::display_warning(err, "--ai has no effect with --vs human")?;
    }
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);
    let ai_name = ai.unwrap_or_else(|| config.ai.clone());
    let Some(opponent) = create_ai(&ai_name) else {
        return Err(CliError::InvalidInput(format!(
            "unknown ai '{}' (expected one of {})",
            ai_name,
            AI_TYPES.join(", ")
        )));
    };
    let mut engine = Engine::new(Some(seed), config.rules())?;

    writeln!(out, "play: vs={} seed={}", vs.as_str(), seed)?;
    if vs == Vs::Ai {
        writeln!(out, "You are P1; {} plays P2.", opponent.name())?;
    }
    writeln!(out, "Type 'help' for commands.")?;

    let humans = match vs {
        Vs::Ai => [true, false],
        Vs::Human => [true, true],
    };
    let mut queue = ActionQueue::new();
    let mut progress = Progress::default();
    let mut shown_serial = None;

    loop {
        progress.report(&engine, out)?;
        if let Some(outcome) = engine.outcome() {
            writeln!(
                out,
                "{}",
                format_outcome(&outcome, engine.state().round_wins())
            )?;
            break;
        }

        let player = engine.current_player();
        if !humans[player.index()] {
            play_turn(&mut engine, opponent.as_ref(), &mut queue)?;
            continue;
        }

        let serial = engine.state().turn_serial();
        if shown_serial != Some(serial) {
            writeln!(out)?;
            writeln!(out, "{}", render_snapshot(&engine.snapshot(), player))?;
            shown_serial = Some(serial);
        }

        ui::prompt(out, &player.to_string())?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            writeln!(out, "Input closed; leaving the match.")?;
            break;
        };
        match parse_command(&line) {
            ParseResult::Quit => {
                writeln!(out, "Quit.")?;
                break;
            }
            ParseResult::Help => writeln!(out, "{}", HELP)?,
            ParseResult::Board => writeln!(out, "{}", render_snapshot(&engine.snapshot(), player))?,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Action(action) => match engine.act(player, action) {
                Ok(()) if !action.ends_turn() => {
                    writeln!(out, "{}", render_snapshot(&engine.snapshot(), player))?
                }
                Ok(()) => {}
                Err(e) => ui::write_error(err, &format!("{} rejected: {}", player, e))?,
            },
        }
    }
    Ok(())
}

/// How much of the match history has already been echoed.
#[derive(Default)]
struct Progress {
    turns: usize,
    rounds: usize,
}

impl Progress {
    fn report(&mut self, engine: &Engine, out: &mut dyn Write) -> std::io::Result<()> {
        let state = engine.state();
        for record in &state.history()[self.turns..] {
            writeln!(out, "{}", format_turn(record))?;
            for flip in record.omen.iter().chain(&record.flips) {
                writeln!(out, "  {}", format_flip(flip))?;
            }
        }
        self.turns = state.history().len();
        for result in &state.rounds()[self.rounds..] {
            writeln!(out, "{}", format_round(result))?;
        }
        self.rounds = state.rounds().len();
        Ok(())
    }
}
