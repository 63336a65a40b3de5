// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed test project with a canonical
// `.agent/` store and a fluent builder so each integration test can set up
// an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use agentsync_cli::cli::{GlobalOpts, SyncOpts};
use agentsync_cli::commands::sync;
use agentsync_cli::logging::Logger;
use agentsync_cli::store::{STORE_DIR, TEMPLATES_DIR};

/// An isolated test project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped (via the underlying
/// [`tempfile::TempDir`]).
pub struct IntegrationTestContext {
    /// Temporary directory containing the test project.
    dir: tempfile::TempDir,
    /// Canonicalized project root (the pipeline canonicalizes its root, so
    /// assertions must use the same path form).
    root: PathBuf,
}

impl IntegrationTestContext {
    /// Create a new context with an empty canonical store.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join(STORE_DIR)).expect("create store dir");
        let root = dunce::canonicalize(dir.path()).expect("canonicalize temp dir");
        Self { dir, root }
    }

    /// Path to the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the canonical store directory.
    pub fn store_dir(&self) -> PathBuf {
        self.root.join(STORE_DIR)
    }

    /// Run the sync pipeline for `selector`, returning the logger so tests
    /// can assert on the collected warnings.
    pub fn sync(&self, selector: &str) -> Logger {
        let log = Logger::new();
        self.try_sync(selector, &log).expect("sync pipeline");
        log
    }

    /// Run the sync pipeline and return its result unasserted.
    pub fn try_sync(&self, selector: &str, log: &Logger) -> anyhow::Result<()> {
        let global = GlobalOpts {
            root: Some(self.root.clone()),
        };
        let opts = SyncOpts {
            profile: selector.to_string(),
        };
        sync::run(&global, &opts, log)
    }

    /// Read a root-relative file to a string.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel)).expect("read project file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context backed by an empty store.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write a rule document `rules/<name>.md`.
    pub fn with_rule(self, name: &str, content: &str) -> Self {
        self.store_file(&format!("rules/{name}.md"), content)
    }

    /// Create a skill directory `skills/<name>/SKILL.md`.
    pub fn with_skill(self, name: &str, content: &str) -> Self {
        self.store_file(&format!("skills/{name}/SKILL.md"), content)
    }

    /// Write a workflow document `workflows/<name>.md`.
    pub fn with_workflow(self, name: &str, content: &str) -> Self {
        self.store_file(&format!("workflows/{name}.md"), content)
    }

    /// Write an agent persona `agents/<name>.md`.
    pub fn with_agent(self, name: &str, content: &str) -> Self {
        self.store_file(&format!("agents/{name}.md"), content)
    }

    /// Write a command file `commands/<file_name>` (extension included).
    pub fn with_command(self, file_name: &str, content: &str) -> Self {
        self.store_file(&format!("commands/{file_name}"), content)
    }

    /// Write an entry-document template `templates/<name>`.
    pub fn with_template(self, name: &str, content: &str) -> Self {
        self.store_file(&format!("{TEMPLATES_DIR}/{name}"), content)
    }

    /// Write the server-definition document `.agent/mcp.json`.
    pub fn with_servers(self, json: &str) -> Self {
        self.store_file("mcp.json", json)
    }

    /// Write an arbitrary file relative to the project root (e.g. a
    /// pre-existing `.gemini/settings.json` or a user CI workflow).
    pub fn with_project_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create project file parent");
        }
        std::fs::write(&path, content).expect("write project file");
        self
    }

    fn store_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.store_dir().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create store file parent");
        }
        std::fs::write(&path, content).expect("write store file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// A fully-populated store covering every asset category, shared by tests
/// that exercise the whole pipeline.
pub fn full_project() -> IntegrationTestContext {
    TestContextBuilder::new()
        .with_rule("style", "# Style\nBe terse.\n")
        .with_skill("review", "# Review skill\n")
        .with_workflow("release", "# Release\n")
        .with_agent("planner", "# Planner\nPlans work.\n")
        .with_command("review.md", "Review the diff.\n")
        .with_command("deploy.toml", "description = \"deploy\"\n")
        .with_command("copilot.md", "Self reference.\n")
        .with_template("CLAUDE.md", "# Project\n\n{{rules}}\n\n{{commands}}\n")
        .with_template("GEMINI.md", "# Project\n\n{{rules}}\n\n{{commands}}\n")
        .with_template("AGENTS.md", "# Project\n\n{{rules}}\n\n{{agents}}\n")
        .build()
}
