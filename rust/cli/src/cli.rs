//! Command-line definitions for the `nightdealer` binary.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "nightdealer",
    version,
    about = "Night Dealer: simultaneous rock-paper-scissors on a 3x3 grid"
)]
pub struct NightDealerCli {
    /// Raise log output to debug (RUST_LOG still wins when set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a match on the terminal
    Play {
        /// Who sits in the P2 seat
        #[arg(long, value_enum, default_value_t = Vs::Ai)]
        vs: Vs,
        #[arg(long)]
        seed: Option<u64>,
        /// AI type for the computer seat (baseline, greedy, random)
        #[arg(long)]
        ai: Option<String>,
    },
    /// Play AI-vs-AI matches and summarize the results
    Sim {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        matches: u32,
        /// Seed of the first match; match i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        /// AI type for P1
        #[arg(long)]
        ai: Option<String>,
        /// AI type for P2 (defaults to the P1 type)
        #[arg(long)]
        opponent: Option<String>,
        /// Write one JSON match record per line to stdout
        #[arg(long)]
        jsonl: bool,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Opponent in the P2 seat for the `play` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    /// A computer player answers every P2 turn.
    Ai,
    /// Hot-seat: both seats read from the same input.
    Human,
}

impl Vs {
    /// ```
    /// # use nightdealer_cli::Vs;
    /// assert_eq!(Vs::Ai.as_str(), "ai");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Ai => "ai",
            Vs::Human => "human",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_defaults_to_ai() {
        let cli = NightDealerCli::try_parse_from(["nightdealer", "play"]).unwrap();
        match cli.cmd {
            Commands::Play { vs, seed, ai } => {
                assert_eq!(vs, Vs::Ai);
                assert_eq!(seed, None);
                assert_eq!(ai, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn sim_rejects_zero_matches() {
        assert!(NightDealerCli::try_parse_from(["nightdealer", "sim", "--matches", "0"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = NightDealerCli::try_parse_from(["nightdealer", "cfg", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
