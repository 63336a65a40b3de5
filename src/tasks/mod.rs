//! The pipeline stages: materializer, reference resolver, template
//! compiler, and server-definition transpiler.
//!
//! Each stage is a pure, idempotent projection from (canonical store
//! snapshot, profile configuration) to filesystem state. Stages run
//! sequentially in one synchronous pass; per-entry failures are logged
//! through the shared [`Context`] and never abort the run.
pub mod materialize;
pub mod mcp;
pub mod refs;
pub mod template;

use crate::logging::Logger;
use crate::store::{ActiveLists, Store};

/// Shared context threaded through every pipeline stage.
///
/// The root path lives inside the [`Store`]; nothing reads the process
/// working directory, so tests can run isolated pipelines in parallel
/// temporary directories.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Opened canonical store (also carries the project root).
    pub store: &'a Store,
    /// Active-item lists, computed once per run.
    pub lists: &'a ActiveLists,
    /// Logger for warnings and progress output.
    pub log: &'a Logger,
}

impl Context<'_> {
    /// The project root.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        self.store.root()
    }
}
