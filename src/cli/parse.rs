//! CLI parse: clap types for treehash. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Treehash CLI - canonical hashes for JSON trees
#[derive(Parser)]
#[command(name = "treehash")]
#[command(about = "Canonical, versioned hashes for priority-annotated JSON trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml lookup)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hash version (v1, v2); overrides configuration
    #[arg(long)]
    pub hash_version: Option<String>,

    /// Digest algorithm (sha256, blake3); overrides configuration
    #[arg(long)]
    pub digest: Option<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Format of subtree hash listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<path>\t<hash>` line per subtree
    Text,
    /// A JSON object of path to hash
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the hash of a subtree of a JSON document
    Hash {
        /// JSON document
        file: PathBuf,
        /// Subtree path, e.g. /users/alice
        #[arg(long, default_value = "/")]
        path: String,
        /// Print the hash of every subtree below the path
        #[arg(long)]
        all: bool,
        /// Limit --all to this many levels below the path
        #[arg(long)]
        max_depth: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the pre-digest hash representation of a subtree
    Repr {
        /// JSON document
        file: PathBuf,
        /// Subtree path
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Print a subtree as JSON
    Show {
        /// JSON document
        file: PathBuf,
        /// Subtree path
        #[arg(long, default_value = "/")]
        path: String,
        /// Keep priorities (.priority / .value entries)
        #[arg(long)]
        export: bool,
    },
    /// Compare a JSON document against reported subtree hashes
    Diff {
        /// Local JSON document
        file: PathBuf,
        /// JSON object mapping paths to reported hashes
        reported: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}
