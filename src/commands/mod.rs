//! Subcommand implementations.
pub mod sync;
