//! `cfg`: prints the resolved configuration with the source of each value.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "ai": {
//!     "value": "baseline",
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        },
        "eclipse_chance": {
            "value": config.eclipse_chance,
            "source": sources.eclipse_chance,
        },
        "rerolls_per_round": {
            "value": config.rerolls_per_round,
            "source": sources.rerolls_per_round,
        },
        "wins_to_take_match": {
            "value": config.wins_to_take_match,
            "source": sources.wins_to_take_match,
        },
        "max_rounds": {
            "value": config.max_rounds,
            "source": sources.max_rounds,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
