//! Command-line interface definitions.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the agent configuration materializer.
#[derive(Parser, Debug)]
#[command(
    name = "agentsync",
    about = "Materialize the canonical .agent/ tree into per-tool profiles",
    version
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Materialize one profile, or all of them
    Sync(SyncOpts),
    /// Print version information
    Version,
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Target profile (claude, gemini, copilot, codex, opencode, all)
    #[arg(default_value = "all")]
    pub profile: String,
}
