//! The `sync` subcommand: one synchronous pass projecting the canonical
//! store into every active profile.
//!
//! Only two conditions abort the run: an unknown profile selector and a
//! missing store directory. Everything past input validation degrades to
//! per-entry warnings, so one unreadable asset never blocks the other
//! profiles.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, SyncOpts};
use crate::error::SyncError;
use crate::logging::Logger;
use crate::profiles::{self, AgentMode, ProfileId};
use crate::resources::fs;
use crate::store::{servers, ActiveLists, Store};
use crate::tasks::{materialize, mcp, template, Context};

/// Run the sync pipeline for the selected profile(s).
///
/// # Errors
///
/// Returns an error for an unknown selector, a missing `.agent/` directory,
/// or an unresolvable project root.
pub fn run(global: &GlobalOpts, opts: &SyncOpts, log: &Logger) -> Result<()> {
    let root = resolve_root(global)?;
    let active = profiles::select(&opts.profile).map_err(SyncError::from)?;
    let store = Store::open(&root).map_err(SyncError::from)?;

    let lists = ActiveLists::collect(&store);
    let server_defs = servers::load(&store, log);
    let ctx = Context {
        store: &store,
        lists: &lists,
        log,
    };

    // Prior contents of merge-preserving documents must outlive the
    // clean-slate of the directories holding them.
    let priors = mcp::snapshot_priors(&root, &active);

    for id in &active {
        let spec = id.spec();
        log.stage(&format!("Syncing {id}"));

        let mut entries = match materialize::run(&ctx, spec) {
            Ok(count) => count,
            Err(err) => {
                log.warn(&format!("{id}: materialization failed: {err:#}"));
                continue;
            }
        };

        match template::run(&ctx, spec) {
            Ok(true) => entries += 1,
            Ok(false) => {}
            Err(err) => log.warn(&format!("{id}: {err:#}")),
        }

        match &server_defs {
            Some(defs) => {
                mcp::run(&ctx, spec, defs, &priors);
                entries += spec.remote_configs.len();
            }
            None => mcp::run_without_definitions(&ctx, spec, &priors),
        }

        log.record_profile(spec.id.name(), entries);
    }

    cleanup_inactive(&ctx, &active);
    log.print_summary();
    Ok(())
}

fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let root = match &global.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };
    dunce::canonicalize(&root).with_context(|| format!("resolve project root: {}", root.display()))
}

/// Remove every artifact belonging to a profile outside the active set, so
/// the tree afterwards is a pure function of the store and the selection.
fn cleanup_inactive(ctx: &Context<'_>, active: &[ProfileId]) {
    for id in ProfileId::ALL {
        if active.contains(&id) {
            continue;
        }
        let spec = id.spec();
        let dir = ctx.root().join(spec.dir_name);

        if spec.owns_dir {
            remove_artifact(ctx, &dir);
        } else {
            // Shared directory: only the subdirectories this profile wrote.
            if let AgentMode::Transformed(transform) = spec.agents {
                remove_artifact(ctx, &dir.join(transform.subdir));
            }
            remove_artifact(ctx, &dir.join(spec.commands.subdir));
        }

        if let Some(entry) = &spec.entry_doc {
            remove_artifact(ctx, &ctx.root().join(entry.output));
        }
        for remote in spec.remote_configs {
            remove_artifact(ctx, &ctx.root().join(remote.path));
        }
    }
}

fn remove_artifact(ctx: &Context<'_>, path: &std::path::Path) {
    if path.symlink_metadata().is_err() {
        return;
    }
    if let Err(err) = fs::remove_path(path) {
        ctx.log
            .warn(&format!("cleanup: could not remove {}: {err:#}", path.display()));
    } else {
        ctx.log.debug(&format!("cleanup: removed {}", path.display()));
    }
}
