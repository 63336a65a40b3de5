//! Server-definition transpiler.
//!
//! Converts the canonical server list into each profile's remote-tool
//! configuration document. Four shapes exist (see
//! [`RemoteShape`](crate::profiles::RemoteShape)); all of them serialize
//! with deterministic key order, and an empty `env` map is omitted wherever
//! the target format conventionally omits it.
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::Context;
use crate::profiles::{ProfileId, ProfileSpec, RemoteShape};
use crate::resources::fs;
use crate::store::servers::ServerDefinition;

/// Snapshot the current contents of every merge-preserving target of the
/// active profiles.
///
/// Merge-preserving documents live inside directories the materializer
/// clean-slates, so their prior contents must be captured before the
/// materializer runs and threaded back into [`run`].
#[must_use]
pub fn snapshot_priors(root: &Path, active: &[ProfileId]) -> HashMap<PathBuf, String> {
    let mut priors = HashMap::new();
    for id in active {
        for remote in id.spec().remote_configs {
            if remote.shape == RemoteShape::MergePreserving {
                let path = root.join(remote.path);
                if let Ok(content) = std::fs::read_to_string(&path) {
                    priors.insert(path, content);
                }
            }
        }
    }
    priors
}

/// Write every remote-tool configuration document of `spec`.
///
/// A failure on one target document is a warning; the remaining targets
/// are still written.
pub fn run(
    ctx: &Context<'_>,
    spec: &ProfileSpec,
    servers: &[ServerDefinition],
    priors: &HashMap<PathBuf, String>,
) {
    for remote in spec.remote_configs {
        let path = ctx.root().join(remote.path);
        let prior = priors.get(&path).map(String::as_str);
        let result = render(remote.shape, servers, prior, ctx, &path)
            .and_then(|document| write_document(&path, &document));
        match result {
            Ok(()) => ctx.log.debug(&format!("{}: wrote {}", spec.id, remote.path)),
            Err(err) => ctx
                .log
                .warn(&format!("{}: skipped {}: {err:#}", spec.id, remote.path)),
        }
    }
}

/// Handle `spec`'s remote-config targets when the store has no server
/// document at all.
///
/// Generated documents from a previous run are stale and removed. A
/// merge-preserving document is user-owned beyond its `mcpServers` field,
/// so its snapshot is written back with only that field dropped — the
/// materializer's clean slate must not take the user's settings with it.
pub fn run_without_definitions(
    ctx: &Context<'_>,
    spec: &ProfileSpec,
    priors: &HashMap<PathBuf, String>,
) {
    for remote in spec.remote_configs {
        let path = ctx.root().join(remote.path);
        let result = if remote.shape == RemoteShape::MergePreserving {
            priors
                .get(&path)
                .map_or(Ok(()), |prior| write_document(&path, &strip_servers(prior)))
        } else {
            fs::remove_path(&path)
        };
        if let Err(err) = result {
            ctx.log
                .warn(&format!("{}: skipped {}: {err:#}", spec.id, remote.path));
        }
    }
}

/// Drop the `mcpServers` field from a snapshotted JSON document. A snapshot
/// that does not parse is kept byte-for-byte rather than discarded.
fn strip_servers(prior: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(prior) {
        Ok(serde_json::Value::Object(mut map)) => {
            map.remove("mcpServers");
            to_json(&map).unwrap_or_else(|_| prior.to_string())
        }
        _ => prior.to_string(),
    }
}

fn write_document(path: &Path, document: &str) -> Result<()> {
    fs::ensure_parent_dir(path)?;
    std::fs::write(path, document).with_context(|| format!("write {}", path.display()))
}

fn render(
    shape: RemoteShape,
    servers: &[ServerDefinition],
    prior: Option<&str>,
    ctx: &Context<'_>,
    path: &Path,
) -> Result<String> {
    match shape {
        RemoteShape::Direct => direct(servers),
        RemoteShape::Restructured => restructured(servers),
        RemoteShape::MergePreserving => {
            let prior = prior.and_then(|raw| match serde_json::from_str(raw) {
                Ok(serde_json::Value::Object(map)) => Some(map),
                // Open product question: is discarding an unparseable prior
                // document loss-avoidance or corruption-masking? Flag it.
                _ => {
                    ctx.log.warn(&format!(
                        "unparseable {}: treating as no prior document",
                        path.display()
                    ));
                    None
                }
            });
            merge_preserving(servers, prior)
        }
        RemoteShape::Toml => toml_document(servers),
    }
}

#[derive(Debug, Serialize)]
struct PlainServer<'a> {
    command: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    args: &'a [String],
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a ServerDefinition> for PlainServer<'a> {
    fn from(server: &'a ServerDefinition) -> Self {
        Self {
            command: &server.command,
            args: &server.args,
            env: &server.env,
        }
    }
}

fn plain_map(servers: &[ServerDefinition]) -> BTreeMap<&str, PlainServer<'_>> {
    servers
        .iter()
        .map(|server| (server.id.as_str(), PlainServer::from(server)))
        .collect()
}

/// `{ "servers": { id: { command, args, env } } }`, written verbatim.
fn direct(servers: &[ServerDefinition]) -> Result<String> {
    #[derive(Debug, Serialize)]
    struct Document<'a> {
        servers: BTreeMap<&'a str, PlainServer<'a>>,
    }
    to_json(&Document {
        servers: plain_map(servers),
    })
}

/// `{ "$schema": …, "mcp": { id: { type, command[], environment, enabled } } }`.
fn restructured(servers: &[ServerDefinition]) -> Result<String> {
    #[derive(Debug, Serialize)]
    struct Entry<'a> {
        #[serde(rename = "type")]
        kind: &'static str,
        command: Vec<&'a str>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        environment: &'a BTreeMap<String, String>,
        enabled: bool,
    }
    #[derive(Debug, Serialize)]
    struct Document<'a> {
        #[serde(rename = "$schema")]
        schema: &'static str,
        mcp: BTreeMap<&'a str, Entry<'a>>,
    }

    let mcp = servers
        .iter()
        .map(|server| {
            let mut command = vec![server.command.as_str()];
            command.extend(server.args.iter().map(String::as_str));
            (
                server.id.as_str(),
                Entry {
                    kind: "local",
                    command,
                    environment: &server.env,
                    enabled: true,
                },
            )
        })
        .collect();
    to_json(&Document {
        schema: "https://opencode.ai/config.json",
        mcp,
    })
}

/// Rewrite only the `mcpServers` field of the prior document, preserving
/// any unrelated fields a user may have hand-added.
fn merge_preserving(
    servers: &[ServerDefinition],
    prior: Option<serde_json::Map<String, serde_json::Value>>,
) -> Result<String> {
    let mut document = prior.unwrap_or_default();
    document.insert(
        "mcpServers".to_string(),
        serde_json::to_value(plain_map(servers))?,
    );
    to_json(&document)
}

/// TOML `[mcp_servers.<id>]` blocks; the serializer quotes keys outside
/// the bare-identifier set.
fn toml_document(servers: &[ServerDefinition]) -> Result<String> {
    #[derive(Debug, Serialize)]
    struct Document<'a> {
        mcp_servers: BTreeMap<&'a str, PlainServer<'a>>,
    }
    toml::to_string(&Document {
        mcp_servers: plain_map(servers),
    })
    .context("serialize TOML document")
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut document = serde_json::to_string_pretty(value).context("serialize JSON document")?;
    document.push('\n');
    Ok(document)
}
