//! Directory materializer.
//!
//! Projects the canonical store into one profile directory: shared assets
//! as links, agent personas as a directory link or transformed copies, and
//! commands as individually filtered links. The profile directory (or, for
//! a shared directory like `.github`, just the owned subdirectories) is
//! deleted and rebuilt on every run, so no stale entry from a previous run
//! can survive a source change.
use anyhow::Result;
use std::path::Path;

use super::Context;
use crate::profiles::{AgentMode, ProfileSpec};
use crate::resources::{fs, link};
use crate::store::Category;

/// Materialize `spec`'s profile directory, returning the number of entries
/// created.
///
/// Individual link or read failures are warnings (the remaining entries are
/// still materialized); the returned error covers only structural failures
/// such as being unable to create the target directory at all.
///
/// # Errors
///
/// Returns an error if a target directory cannot be replaced or created.
pub fn run(ctx: &Context<'_>, spec: &ProfileSpec) -> Result<usize> {
    let target_dir = ctx.root().join(spec.dir_name);
    if spec.owns_dir {
        fs::replace_dir(&target_dir, |dir| populate(ctx, spec, dir))
    } else {
        std::fs::create_dir_all(&target_dir)?;
        populate(ctx, spec, &target_dir)
    }
}

fn populate(ctx: &Context<'_>, spec: &ProfileSpec, dir: &Path) -> Result<usize> {
    let mut count = 0;

    for name in spec.shared {
        let source = ctx.store.agent_dir().join(name);
        if source.symlink_metadata().is_err() {
            continue;
        }
        let target = dir.join(name);
        match link::materialize_entry(&source, &target, spec.link_strategy) {
            Ok(()) => count += 1,
            Err(err) => warn_skipped(ctx, spec, name, &err),
        }
    }

    count += materialize_agents(ctx, spec, dir)?;
    count += materialize_commands(ctx, spec, dir)?;
    Ok(count)
}

fn materialize_agents(ctx: &Context<'_>, spec: &ProfileSpec, dir: &Path) -> Result<usize> {
    match spec.agents {
        AgentMode::Linked => {
            let source = ctx.store.category_dir(Category::Agent);
            if !source.is_dir() {
                return Ok(0);
            }
            let target = dir.join(Category::Agent.dir_name());
            fs::remove_path(&target)?;
            match link::link_dir(&source, &target) {
                Ok(()) => Ok(1),
                Err(err) => {
                    warn_skipped(ctx, spec, "agents", &err);
                    Ok(0)
                }
            }
        }
        AgentMode::Transformed(transform) => {
            fs::replace_dir(&dir.join(transform.subdir), |subdir| {
                let mut count = 0;
                for name in &ctx.lists.agents {
                    let source = ctx
                        .store
                        .category_dir(Category::Agent)
                        .join(format!("{name}.md"));
                    let content = match std::fs::read_to_string(&source) {
                        Ok(content) => content,
                        Err(err) => {
                            warn_skipped(ctx, spec, name, &err.into());
                            continue;
                        }
                    };
                    let content = if transform.display_name {
                        inject_display_name(&content, name)
                    } else {
                        content
                    };
                    let target = subdir.join(format!("{name}{}", transform.suffix));
                    match std::fs::write(&target, content) {
                        Ok(()) => count += 1,
                        Err(err) => warn_skipped(ctx, spec, name, &err.into()),
                    }
                }
                Ok(count)
            })
        }
    }
}

fn materialize_commands(ctx: &Context<'_>, spec: &ProfileSpec, dir: &Path) -> Result<usize> {
    // The commands subdirectory is recreated fresh, never merged with a
    // previous run's contents.
    fs::replace_dir(&dir.join(spec.commands.subdir), |subdir| {
        let mut count = 0;
        for file in ctx.store.command_files() {
            if !spec.commands.accepts(&file) {
                continue;
            }
            let source = ctx.store.category_dir(Category::Command).join(&file);
            let target = subdir.join(spec.commands.link_name(&file));
            match link::link_file(&source, &target, spec.link_strategy) {
                Ok(()) => count += 1,
                Err(err) => warn_skipped(ctx, spec, &file, &err),
            }
        }
        Ok(count)
    })
}

fn warn_skipped(ctx: &Context<'_>, spec: &ProfileSpec, entry: &str, err: &anyhow::Error) {
    ctx.log
        .warn(&format!("{}: skipped {entry}: {err:#}", spec.id));
}

/// Inject a `name:` field into an agent document's front matter, creating
/// the front-matter block when the document has none.
fn inject_display_name(content: &str, name: &str) -> String {
    if let Some(rest) = content.strip_prefix("---\n") {
        if rest.contains("\nname:") || rest.starts_with("name:") {
            return content.to_string();
        }
        return format!("---\nname: {name}\n{rest}");
    }
    format!("---\nname: {name}\n---\n\n{content}")
}
