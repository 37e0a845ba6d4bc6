//! AI-vs-AI simulation.
//!
//! Plays `matches` complete matches between two computer players and prints
//! a summary. Match `i` (0-based) uses `seed + i`, so a run is reproducible
//! from its printed base seed. With `--jsonl` every match is also written to
//! stdout as one [`MatchRecord`] per line and the summary moves to stderr.

use crate::config::Config;
use crate::error::CliError;
use chrono::{SecondsFormat, Utc};
use nightdealer_ai::driver::play_match;
use nightdealer_ai::{AI_TYPES, AIOpponent, create_ai};
use nightdealer_engine::engine::Engine;
use nightdealer_engine::game::{GameState, MatchOutcome};
use nightdealer_engine::record::{MatchRecord, format_match_id};
use std::io::Write;
use tracing::debug;

#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    matches: u32,
    seed: Option<u64>,
    ai: Option<String>,
    opponent: Option<String>,
    jsonl: bool,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if matches == 0 {
        return Err(CliError::InvalidInput("matches must be >= 1".to_string()));
    }
    let p1_name = ai.unwrap_or_else(|| config.ai.clone());
    let p2_name = opponent.unwrap_or_else(|| p1_name.clone());
    let p1 = lookup_ai(&p1_name)?;
    let p2 = lookup_ai(&p2_name)?;
    let base_seed = seed.or(config.seed).unwrap_or_else(rand::random);
    let rules = config.rules();
    let date = Utc::now().format("%Y%m%d").to_string();

    let mut summary = SimSummary::default();
    for i in 0..matches {
        let match_seed = base_seed.wrapping_add(u64::from(i));
        let mut engine = Engine::new(Some(match_seed), rules)?;
        let outcome = play_match(&mut engine, [p1.as_ref(), p2.as_ref()])?;
        debug!(index = i + 1, seed = match_seed, outcome = %outcome, "match simulated");
        summary.record(engine.state(), outcome);

        if jsonl {
            let mut record = MatchRecord::from_state(format_match_id(&date, i + 1), engine.state());
            record.players = Some([p1.name().to_string(), p2.name().to_string()]);
            record.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
            let line = record.to_json_line().map_err(std::io::Error::other)?;
            writeln!(out, "{}", line)?;
        }
    }

    let header = format!(
        "sim: matches={} seed={} p1={} p2={}",
        matches,
        base_seed,
        p1.name(),
        p2.name()
    );
    if jsonl {
        summary.write(&header, err)?;
    } else {
        summary.write(&header, out)?;
    }
    Ok(())
}

fn lookup_ai(name: &str) -> Result<Box<dyn AIOpponent>, CliError> {
    create_ai(name).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "unknown ai '{}' (expected one of {})",
            name,
            AI_TYPES.join(", ")
        ))
    })
}

/// Running totals over simulated matches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimSummary {
    pub matches: u32,
    pub wins: [u32; 2],
    pub draws: u32,
    pub rounds: u32,
    /// Tiles held at the end of each round, summed per player
    pub tiles: [u64; 2],
}

impl SimSummary {
    pub fn record(&mut self, state: &GameState, outcome: MatchOutcome) {
        self.matches += 1;
        match outcome.winner() {
            Some(p) => self.wins[p.index()] += 1,
            None => self.draws += 1,
        }
        for round in state.rounds() {
            self.rounds += 1;
            self.tiles[0] += round.tiles[0] as u64;
            self.tiles[1] += round.tiles[1] as u64;
        }
    }

    /// Average tiles per round for each player.
    pub fn avg_tiles(&self) -> [f64; 2] {
        if self.rounds == 0 {
            return [0.0; 2];
        }
        let n = f64::from(self.rounds);
        [self.tiles[0] as f64 / n, self.tiles[1] as f64 / n]
    }

    fn write(&self, header: &str, out: &mut dyn Write) -> std::io::Result<()> {
        let [a1, a2] = self.avg_tiles();
        writeln!(out, "{}", header)?;
        writeln!(out, "P1 wins: {}", self.wins[0])?;
        writeln!(out, "P2 wins: {}", self.wins[1])?;
        writeln!(out, "Draws: {}", self.draws)?;
        writeln!(out, "Rounds: {}", self.rounds)?;
        writeln!(out, "Avg tiles per round: P1 {:.2} P2 {:.2}", a1, a2)
    }
}
