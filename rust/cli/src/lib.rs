//! # Night Dealer CLI Library
//!
//! Terminal front-end for the Night Dealer engine: interactive play,
//! AI-vs-AI simulation and configuration inspection.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves the configuration and dispatches to
//! the subcommand handler. Output streams are injected so every command can be
//! driven from tests.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let args = ["nightdealer", "sim", "--matches", "2", "--seed", "42"];
//! let code = nightdealer_cli::run(args, &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().starts_with("sim: matches=2 seed=42"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a match on the terminal against the computer or hot-seat
//! - `sim`: Play AI-vs-AI matches and summarize them, optionally as JSONL
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, NightDealerCli};
use commands::{handle_cfg_command, handle_play_command, handle_sim_command};

pub use cli::Vs;
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "cfg"];

/// Main entry point: reads interactive input from the process stdin.
///
/// Returns the exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`].
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match NightDealerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = logging::init_logging(cli.verbose);

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(&resolved, out),
        Commands::Play { vs, seed, ai } => {
            handle_play_command(vs, seed, ai, &resolved.config, out, err, stdin)
        }
        Commands::Sim {
            matches,
            seed,
            ai,
            opponent,
            jsonl,
        } => handle_sim_command(matches, seed, ai, opponent, jsonl, &resolved.config, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }

    let mut usage = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "Night Dealer CLI")?;
        writeln!(err, "Usage: nightdealer <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: nightdealer --help")
    };
    let _ = usage();
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["nightdealer", "--help"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        let text = String::from_utf8(out).unwrap();
        for c in COMMANDS {
            assert!(text.contains(c), "help lacks {}", c);
        }
    }

    #[test]
    fn unknown_command_lists_the_real_ones() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["nightdealer", "deal"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Usage: nightdealer <command>"));
        assert!(text.contains("  sim"));
    }
}
