//! Command handlers for the `nightdealer` binary.
//!
//! Each command lives in its own module and follows the same pattern:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) are passed in, never opened here
//! - Errors propagate as [`CliError`](crate::error::CliError); `run` reports them

pub mod cfg;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
