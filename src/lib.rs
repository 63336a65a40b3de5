//! Agent configuration materializer.
//!
//! Projects one canonical `.agent/` source tree — rules, skills, workflows,
//! agent personas, commands, and MCP server definitions — into per-tool
//! profile directories (`.claude`, `.gemini`, `.github`, `.codex`,
//! `.opencode`), root-level entry documents compiled from templates, and
//! remote-tool configuration documents in each tool's native format.
//!
//! Every run is a clean-slate recompute: derived directories are deleted and
//! rebuilt, so the filesystem state after a run is a pure function of the
//! canonical store and the selected profiles. There is no incremental
//! diffing and no persisted state.
//!
//! The crate is organised into four layers:
//!
//! - **[`store`]** — read the canonical source tree and server definitions
//! - **[`resources`]** — filesystem primitives (links, clean-slate directories)
//! - **[`tasks`]** — the materializer, template compiler and transpiler stages
//! - **[`commands`]** — top-level subcommand orchestration (`sync`)
//!
//! Known hazard: two concurrent invocations targeting overlapping profiles
//! can interleave the delete-then-recreate steps and leave a torn
//! intermediate state. The tool provides no mutual exclusion; the next
//! single run repairs everything.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod profiles;
pub mod resources;
pub mod store;
pub mod tasks;
