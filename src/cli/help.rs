//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "hash", "diff").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Hash { .. } => "hash",
        Commands::Repr { .. } => "repr",
        Commands::Show { .. } => "show",
        Commands::Diff { .. } => "diff",
        Commands::Config => "config",
    }
}
