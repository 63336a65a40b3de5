//! Entry-document template compiler.
//!
//! Fills the fixed placeholder set from the active-item lists, using the
//! profile's reference dialect, then runs the reference resolver over every
//! line and writes the result to the document's fixed name at the project
//! root. Entry documents live at the root, not inside profile directories:
//! they are the cross-tool discovery surface.
use anyhow::{Context as _, Result};

use super::{refs, Context};
use crate::profiles::{AgentMode, ProfileSpec};
use crate::resources::fs;

/// Compile and write `spec`'s entry document.
///
/// Returns `Ok(false)` when the profile has no entry document or its
/// template is absent. A declared document whose template has been deleted
/// also has its previously generated output removed: the document has no
/// source left.
///
/// # Errors
///
/// Returns an error if the compiled document cannot be written or a stale
/// output cannot be removed.
pub fn run(ctx: &Context<'_>, spec: &ProfileSpec) -> Result<bool> {
    let Some(entry) = &spec.entry_doc else {
        return Ok(false);
    };
    let output = ctx.root().join(entry.output);
    let Some(document) = compile(ctx, spec) else {
        fs::remove_path(&output)?;
        return Ok(false);
    };
    std::fs::write(&output, document)
        .with_context(|| format!("write entry document: {}", output.display()))?;
    ctx.log.debug(&format!("{}: wrote {}", spec.id, entry.output));
    Ok(true)
}

/// Compile `spec`'s entry document to a string, or `None` when the profile
/// declares no entry document or the template file is missing.
#[must_use]
pub fn compile(ctx: &Context<'_>, spec: &ProfileSpec) -> Option<String> {
    let entry = spec.entry_doc.as_ref()?;
    let path = ctx.store.templates_dir().join(entry.template);
    let template = std::fs::read_to_string(path).ok()?;

    let substituted = substitute(&template, spec, ctx, entry.prefix);
    let resolved: Vec<String> = substituted
        .split('\n')
        .map(|line| refs::resolve_line(line, ctx.root()))
        .collect();
    Some(resolved.join("\n"))
}

/// Expand the fixed placeholder set. Placeholders are the only dynamic
/// parts of a template; everything else passes through untouched.
fn substitute(template: &str, spec: &ProfileSpec, ctx: &Context<'_>, prefix: &str) -> String {
    template
        .replace("{{rules}}", &rules_block(ctx, prefix))
        .replace("{{skills}}", &bullet_list(&ctx.lists.skills, |name| {
            format!("{prefix}/skills/{name}/SKILL.md")
        }))
        .replace("{{workflows}}", &bullet_list(&ctx.lists.workflows, |name| {
            format!("{prefix}/workflows/{name}.md")
        }))
        .replace("{{agents}}", &bullet_list(&ctx.lists.agents, |name| {
            agent_path(spec, prefix, name)
        }))
        .replace("{{commands}}", &bullet_list(&ctx.lists.commands, |name| {
            let file = format!("{name}.{}", spec.commands.extension);
            format!(
                "{prefix}/{}/{}",
                spec.commands.subdir,
                spec.commands.link_name(&file)
            )
        }))
}

/// Rules are load-bearing context: each one gets a heading plus a
/// whole-line embed reference, so the resolver always inlines the full
/// document regardless of profile.
fn rules_block(ctx: &Context<'_>, prefix: &str) -> String {
    let blocks: Vec<String> = ctx
        .lists
        .rules
        .iter()
        .map(|name| format!("## {name}\n\n@{prefix}/rules/{name}.md"))
        .collect();
    blocks.join("\n\n")
}

fn bullet_list(names: &[String], path: impl Fn(&str) -> String) -> String {
    let items: Vec<String> = names
        .iter()
        .map(|name| format!("- {name}: {}", path(name)))
        .collect();
    items.join("\n")
}

fn agent_path(spec: &ProfileSpec, prefix: &str, name: &str) -> String {
    match spec.agents {
        AgentMode::Linked => format!("{prefix}/agents/{name}.md"),
        AgentMode::Transformed(t) => format!("{prefix}/{}/{name}{}", t.subdir, t.suffix),
    }
}
