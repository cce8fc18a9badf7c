//! Command handler modules.
//!
//! Every subcommand lives in its own file and follows the same shape:
//! `pub fn handle_COMMAND_command(..., out, err) -> Result<(), CliError>`,
//! with output streams injected so tests can capture them.

pub mod cfg;
pub mod deal;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use sim::handle_sim_command;
