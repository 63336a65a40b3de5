//! Server-definition input document.
//!
//! Remote-tool (MCP) servers are declared once, in `.agent/mcp.json`:
//!
//! ```json
//! { "mcpServers": { "<id>": { "command": "...", "args": [...], "env": {...} } } }
//! ```
//!
//! The document is an immutable input and is never partially applied: a
//! parse failure yields an empty server set (with a warning), not a partial
//! one. An absent document means no definitions exist at all, which the
//! transpiler treats differently from an empty set.
use std::collections::BTreeMap;

use serde::Deserialize;

use super::Store;
use crate::logging::Logger;

/// File name of the server-definition document inside the store.
pub const SERVERS_FILE: &str = "mcp.json";

/// One remote-tool server invocation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDefinition {
    /// Server identifier (the key in `mcpServers`).
    pub id: String,
    /// Executable to launch.
    pub command: String,
    /// Ordered command arguments.
    pub args: Vec<String>,
    /// Environment variables for the server process.
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ServersDocument {
    #[serde(rename = "mcpServers", default)]
    mcp_servers: BTreeMap<String, RawServer>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

/// Load the server definitions of `store`, ordered by id.
///
/// An absent document returns `None` — no definitions exist. A malformed
/// document returns an empty set with a warning, so a typo never produces
/// a half-applied projection.
#[must_use]
pub fn load(store: &Store, log: &Logger) -> Option<Vec<ServerDefinition>> {
    let path = store.agent_dir().join(SERVERS_FILE);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<ServersDocument>(&raw) {
        Ok(doc) => Some(
            doc.mcp_servers
                .into_iter()
                .map(|(id, server)| ServerDefinition {
                    id,
                    command: server.command,
                    args: server.args,
                    env: server.env,
                })
                .collect(),
        ),
        Err(err) => {
            log.warn(&format!("unparseable {}: {err}", path.display()));
            Some(Vec::new())
        }
    }
}
