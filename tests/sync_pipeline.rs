#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `sync` command — the full materialization
//! pipeline.
//!
//! These tests run the pipeline against isolated temporary projects and
//! verify:
//! - every profile directory receives its conventional layout
//! - re-running the pipeline is byte-identical (idempotence)
//! - removed store items leave no stale projection behind (clean slate)
//! - syncing one profile removes the artifacts of the others
//! - the fatal error surface is limited to bad selectors and a missing store

mod common;

use agentsync_cli::logging::Logger;
use common::{full_project, IntegrationTestContext, TestContextBuilder};

// ---------------------------------------------------------------------------
// Profile layouts
// ---------------------------------------------------------------------------

/// A full `sync all` run produces the conventional layout of every profile.
#[test]
fn sync_all_materializes_every_profile() {
    let ctx = full_project();
    let log = ctx.sync("all");

    // Claude: linked shared assets, linked agents dir, markdown commands.
    assert!(ctx.root().join(".claude/skills/review/SKILL.md").is_file());
    assert!(ctx.root().join(".claude/agents/planner.md").is_file());
    assert!(ctx.root().join(".claude/commands/review.md").is_file());
    assert!(ctx.root().join("CLAUDE.md").is_file());

    // Gemini: TOML commands only.
    assert!(ctx.root().join(".gemini/commands/deploy.toml").is_file());
    assert!(!ctx.root().join(".gemini/commands/review.md").exists());
    assert!(ctx.root().join("GEMINI.md").is_file());

    // Copilot: transformed chatmodes, renamed prompts, reserved file excluded.
    assert!(ctx
        .root()
        .join(".github/chatmodes/planner.chatmode.md")
        .is_file());
    assert!(ctx.root().join(".github/prompts/review.prompt.md").is_file());
    assert!(!ctx.root().join(".github/prompts/copilot.prompt.md").exists());

    // Codex: markdown prompts under their own subdir name.
    assert!(ctx.root().join(".codex/prompts/review.md").is_file());
    assert!(ctx.root().join("AGENTS.md").is_file());

    // OpenCode: singular subdir names, plain agent copies.
    assert!(ctx.root().join(".opencode/agent/planner.md").is_file());
    assert!(ctx.root().join(".opencode/command/review.md").is_file());

    assert_eq!(log.warning_count(), 0, "clean run must not warn");
}

/// Claude materializes commands as symlinks so edits to the canonical file
/// are visible without a re-run.
#[cfg(unix)]
#[test]
fn claude_commands_are_symlinks_to_the_store() {
    let ctx = full_project();
    ctx.sync("claude");

    let link = ctx.root().join(".claude/commands/review.md");
    let meta = std::fs::symlink_metadata(&link).unwrap();
    assert!(meta.file_type().is_symlink());
    let target = std::fs::read_link(&link).unwrap();
    assert!(target.ends_with(".agent/commands/review.md"), "{target:?}");
}

/// Copilot copies prompt files instead of linking them.
#[cfg(unix)]
#[test]
fn copilot_prompts_are_copies_not_links() {
    let ctx = full_project();
    ctx.sync("copilot");

    let prompt = ctx.root().join(".github/prompts/review.prompt.md");
    let meta = std::fs::symlink_metadata(&prompt).unwrap();
    assert!(!meta.file_type().is_symlink());
    assert_eq!(ctx.read(".github/prompts/review.prompt.md"), "Review the diff.\n");
}

/// Copilot chatmodes get a `name:` front-matter field injected.
#[test]
fn copilot_chatmodes_carry_injected_display_name() {
    let ctx = full_project();
    ctx.sync("copilot");

    let chatmode = ctx.read(".github/chatmodes/planner.chatmode.md");
    assert!(chatmode.starts_with("---\nname: planner\n"), "{chatmode}");
    assert!(chatmode.contains("# Planner"));
}

/// OpenCode agent copies are byte-identical to the canonical personas.
#[test]
fn opencode_agents_are_plain_copies() {
    let ctx = full_project();
    ctx.sync("opencode");

    assert_eq!(
        ctx.read(".opencode/agent/planner.md"),
        "# Planner\nPlans work.\n"
    );
}

// ---------------------------------------------------------------------------
// Idempotence and clean slate
// ---------------------------------------------------------------------------

/// Running the pipeline twice with an unchanged store produces byte-identical
/// entry documents.
#[test]
fn rerun_is_byte_identical() {
    let ctx = full_project();
    ctx.sync("all");
    let first = ctx.read("CLAUDE.md");
    let first_agents = ctx.read("AGENTS.md");

    ctx.sync("all");
    assert_eq!(ctx.read("CLAUDE.md"), first);
    assert_eq!(ctx.read("AGENTS.md"), first_agents);
}

/// Deleting a command from the store removes its projection on the next run.
#[test]
fn removed_command_leaves_no_stale_link() {
    let ctx = full_project();
    ctx.sync("all");
    assert!(ctx.root().join(".claude/commands/review.md").is_file());

    std::fs::remove_file(ctx.store_dir().join("commands/review.md")).unwrap();
    ctx.sync("all");
    assert!(!ctx.root().join(".claude/commands/review.md").exists());
    assert!(!ctx.root().join(".opencode/command/review.md").exists());
}

/// Deleting an agent removes its transformed copies on the next run.
#[test]
fn removed_agent_leaves_no_stale_copy() {
    let ctx = full_project();
    ctx.sync("all");

    std::fs::remove_file(ctx.store_dir().join("agents/planner.md")).unwrap();
    ctx.sync("all");
    assert!(!ctx
        .root()
        .join(".github/chatmodes/planner.chatmode.md")
        .exists());
    assert!(!ctx.root().join(".opencode/agent/planner.md").exists());
}

/// Hidden store entries are never projected.
#[test]
fn hidden_store_entries_are_ignored() {
    let ctx = TestContextBuilder::new()
        .with_command("review.md", "visible\n")
        .with_command(".draft.md", "hidden\n")
        .build();
    ctx.sync("claude");

    assert!(ctx.root().join(".claude/commands/review.md").is_file());
    assert!(!ctx.root().join(".claude/commands/.draft.md").exists());
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Entry-document listings are ordered by name, not by directory order.
#[test]
fn command_listing_is_sorted_by_name() {
    let ctx = TestContextBuilder::new()
        .with_command("zeta.md", "z\n")
        .with_command("alpha.md", "a\n")
        .with_command("mid.md", "m\n")
        .with_template("CLAUDE.md", "{{commands}}\n")
        .build();
    ctx.sync("claude");

    let doc = ctx.read("CLAUDE.md");
    let alpha = doc.find("- alpha:").unwrap();
    let mid = doc.find("- mid:").unwrap();
    let zeta = doc.find("- zeta:").unwrap();
    assert!(alpha < mid && mid < zeta, "unsorted listing:\n{doc}");
}

// ---------------------------------------------------------------------------
// Inactive-profile cleanup
// ---------------------------------------------------------------------------

/// Narrowing the selection removes the artifacts of the deselected profiles.
#[test]
fn single_profile_sync_removes_other_profiles() {
    let ctx = full_project();
    ctx.sync("all");
    assert!(ctx.root().join(".codex").is_dir());

    ctx.sync("claude");
    assert!(ctx.root().join(".claude").is_dir());
    assert!(ctx.root().join("CLAUDE.md").is_file());
    assert!(!ctx.root().join(".codex").exists());
    assert!(!ctx.root().join(".gemini").exists());
    assert!(!ctx.root().join(".opencode").exists());
    assert!(!ctx.root().join("AGENTS.md").exists());
    assert!(!ctx.root().join("GEMINI.md").exists());
    assert!(!ctx.root().join(".github/chatmodes").exists());
    assert!(!ctx.root().join(".github/prompts").exists());
}

/// Cleanup of the shared `.github` directory spares user-owned content.
#[test]
fn cleanup_preserves_user_ci_workflows() {
    let ctx = TestContextBuilder::new()
        .with_agent("planner", "# Planner\n")
        .with_project_file(".github/workflows/ci.yml", "jobs: {}\n")
        .build();
    ctx.sync("copilot");
    assert!(ctx.root().join(".github/chatmodes/planner.chatmode.md").is_file());

    ctx.sync("claude");
    assert!(!ctx.root().join(".github/chatmodes").exists());
    assert_eq!(ctx.read(".github/workflows/ci.yml"), "jobs: {}\n");
}

// ---------------------------------------------------------------------------
// Fatal error surface
// ---------------------------------------------------------------------------

/// An unknown selector is a usage error, not a warning.
#[test]
fn unknown_selector_is_fatal() {
    let ctx = IntegrationTestContext::new();
    let log = Logger::new();
    let err = ctx.try_sync("cursor", &log).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("cursor"), "{msg}");
    assert!(msg.contains("claude"), "selector list missing: {msg}");
}

/// A project without a canonical store cannot be synced.
#[test]
fn missing_store_is_fatal() {
    let ctx = IntegrationTestContext::new();
    std::fs::remove_dir(ctx.store_dir()).unwrap();
    let log = Logger::new();
    let err = ctx.try_sync("all", &log).unwrap_err();
    assert!(err.to_string().contains(".agent"), "{err}");
}

/// Nothing before input validation touches the filesystem.
#[test]
fn failed_selection_leaves_project_untouched() {
    let ctx = full_project();
    let log = Logger::new();
    ctx.try_sync("bogus", &log).unwrap_err();
    assert!(!ctx.root().join(".claude").exists());
    assert!(!ctx.root().join("CLAUDE.md").exists());
}
