//! `agentsync` binary entry point.
use anyhow::Result;
use clap::Parser;

use agentsync_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init(args.verbose);
    let log = logging::Logger::new();

    match args.command {
        cli::Command::Sync(opts) => commands::sync::run(&args.global, &opts, &log),
        cli::Command::Version => {
            log.info(concat!("agentsync ", env!("CARGO_PKG_VERSION")));
            Ok(())
        }
    }
}
