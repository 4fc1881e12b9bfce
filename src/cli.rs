//! CLI domain: parse, route, help, and output only.
//! Route table dispatches to the snapshot model; no hashing logic lives here.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::{format_divergences, format_hashes, map_error};
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;
