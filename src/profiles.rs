//! Declarative per-profile configuration records.
//!
//! A profile is a named target projection — one downstream tool ecosystem
//! with its own directory layout, naming conventions, link policy and
//! remote-config format. Profiles are pure configuration: the materializer,
//! template compiler and transpiler consume these records uniformly and
//! never branch on profile identity, only on record fields.

use crate::error::ProfileError;

/// Identifier of a fixed, hand-enumerated target profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileId {
    /// Claude Code (`.claude/`, `CLAUDE.md`).
    Claude,
    /// Gemini CLI (`.gemini/`, `GEMINI.md`, `settings.json`).
    Gemini,
    /// GitHub Copilot (`.github/` chatmodes and prompts, `.vscode/mcp.json`).
    Copilot,
    /// Codex CLI (`.codex/`, `AGENTS.md`, `config.toml`).
    Codex,
    /// OpenCode (`.opencode/`, `opencode.json`).
    Opencode,
}

impl ProfileId {
    /// Every profile, in materialization order.
    pub const ALL: [Self; 5] = [
        Self::Claude,
        Self::Gemini,
        Self::Copilot,
        Self::Codex,
        Self::Opencode,
    ];

    /// The selector / display name of this profile.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Copilot => "copilot",
            Self::Codex => "codex",
            Self::Opencode => "opencode",
        }
    }

    /// The declarative configuration record for this profile.
    #[must_use]
    pub const fn spec(self) -> &'static ProfileSpec {
        match self {
            Self::Claude => &CLAUDE,
            Self::Gemini => &GEMINI,
            Self::Copilot => &COPILOT,
            Self::Codex => &CODEX,
            Self::Opencode => &OPENCODE,
        }
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a selector argument to the set of active profiles.
///
/// `all` is the aggregate selector that materializes every profile at once.
///
/// # Errors
///
/// Returns [`ProfileError::UnknownSelector`] when the selector names no
/// known profile — a fatal usage error.
pub fn select(selector: &str) -> Result<Vec<ProfileId>, ProfileError> {
    if selector == "all" {
        return Ok(ProfileId::ALL.to_vec());
    }
    ProfileId::ALL
        .into_iter()
        .find(|id| id.name() == selector)
        .map(|id| vec![id])
        .ok_or_else(|| ProfileError::UnknownSelector(selector.to_string()))
}

/// How file entries (shared assets, commands) are placed in the profile
/// directory. Directory entries always use a symlink (or junction on
/// Windows) regardless of this strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Symbolic link, with a byte-copy fallback where the platform
    /// disallows file symlinks without elevation.
    Symlink,
    /// Always byte-copy. Used where the consuming tool does not follow
    /// symlinks reliably.
    Copy,
}

/// How agent personas are materialized into the profile directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    /// One directory link to the canonical `agents/` directory.
    Linked,
    /// Per-agent transformed copies.
    Transformed(AgentTransform),
}

/// Parameters of the transformed-copy agent materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentTransform {
    /// Subdirectory of the profile directory receiving the copies.
    pub subdir: &'static str,
    /// Filename suffix replacing the canonical `.md` extension.
    pub suffix: &'static str,
    /// Whether a `name:` front-matter field is injected into each copy.
    pub display_name: bool,
}

/// Per-profile command materialization: which canonical command files are
/// included and how their links are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Subdirectory of the profile directory receiving the links.
    pub subdir: &'static str,
    /// Only files with this extension (without dot) are included.
    pub extension: &'static str,
    /// Optional replacement suffix for the link name (e.g. `.prompt.md`);
    /// `None` keeps the canonical file name.
    pub link_suffix: Option<&'static str>,
    /// A file name reserved for profile self-reference, excluded from
    /// materialization.
    pub exclude: Option<&'static str>,
}

impl CommandSpec {
    /// Whether the canonical command file named `file_name` passes this
    /// profile's filter.
    #[must_use]
    pub fn accepts(&self, file_name: &str) -> bool {
        if self.exclude == Some(file_name) {
            return false;
        }
        std::path::Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext == self.extension)
    }

    /// The name the link for canonical command file `file_name` gets in the
    /// profile's command subdirectory.
    #[must_use]
    pub fn link_name(&self, file_name: &str) -> String {
        self.link_suffix.map_or_else(
            || file_name.to_string(),
            |suffix| {
                let stem = std::path::Path::new(file_name)
                    .file_stem()
                    .map_or(file_name, |s| s.to_str().unwrap_or(file_name));
                format!("{stem}{suffix}")
            },
        )
    }
}

/// A root-level entry document compiled from a template for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryDoc {
    /// Template file name under the canonical `templates/` directory.
    pub template: &'static str,
    /// Output file name at the project root.
    pub output: &'static str,
    /// Profile-relative reference dialect: the directory prefix used when
    /// expanding placeholders (normalized back to the store by the
    /// reference resolver).
    pub prefix: &'static str,
}

/// Target format of a remote-tool (MCP) configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteShape {
    /// `{ "servers": { id: { command, args, env } } }`, written verbatim.
    Direct,
    /// `{ "$schema": …, "mcp": { id: { type, command[], environment, enabled } } }`.
    Restructured,
    /// Rewrite only the `mcpServers` field of a pre-existing JSON document,
    /// preserving unrelated fields.
    MergePreserving,
    /// TOML `[mcp_servers.<id>]` blocks.
    Toml,
}

/// One remote-tool configuration target: a root-relative path plus the
/// document shape written there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Output path relative to the project root.
    pub path: &'static str,
    /// Document shape.
    pub shape: RemoteShape,
}

/// The complete declarative configuration of one target profile.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSpec {
    /// Profile identity.
    pub id: ProfileId,
    /// Target directory name under the project root.
    pub dir_name: &'static str,
    /// Whether the profile exclusively owns `dir_name`. Owned directories
    /// are clean-slated wholesale; a shared directory (Copilot's `.github`,
    /// which also holds user CI workflows) only has its agent and command
    /// subdirectories clean-slated.
    pub owns_dir: bool,
    /// Canonical entries (directories or files) linked straight through
    /// into the profile directory under the same base name.
    pub shared: &'static [&'static str],
    /// Link-vs-copy policy for file entries.
    pub link_strategy: LinkStrategy,
    /// Agent persona materialization policy.
    pub agents: AgentMode,
    /// Command materialization policy.
    pub commands: CommandSpec,
    /// Entry document, if this profile has one.
    pub entry_doc: Option<EntryDoc>,
    /// Remote-tool configuration targets.
    pub remote_configs: &'static [RemoteConfig],
}

const SHARED: &[&str] = &["skills", "workflows", "profiles", "config.yaml"];

static CLAUDE: ProfileSpec = ProfileSpec {
    owns_dir: true,
    id: ProfileId::Claude,
    dir_name: ".claude",
    shared: SHARED,
    link_strategy: LinkStrategy::Symlink,
    agents: AgentMode::Linked,
    commands: CommandSpec {
        subdir: "commands",
        extension: "md",
        link_suffix: None,
        exclude: None,
    },
    entry_doc: Some(EntryDoc {
        template: "CLAUDE.md",
        output: "CLAUDE.md",
        prefix: ".claude",
    }),
    remote_configs: &[],
};

static GEMINI: ProfileSpec = ProfileSpec {
    owns_dir: true,
    id: ProfileId::Gemini,
    dir_name: ".gemini",
    shared: SHARED,
    link_strategy: LinkStrategy::Symlink,
    agents: AgentMode::Linked,
    commands: CommandSpec {
        subdir: "commands",
        extension: "toml",
        link_suffix: None,
        exclude: None,
    },
    entry_doc: Some(EntryDoc {
        template: "GEMINI.md",
        output: "GEMINI.md",
        prefix: ".gemini",
    }),
    remote_configs: &[RemoteConfig {
        path: ".gemini/settings.json",
        shape: RemoteShape::MergePreserving,
    }],
};

static COPILOT: ProfileSpec = ProfileSpec {
    owns_dir: false,
    id: ProfileId::Copilot,
    dir_name: ".github",
    shared: &[],
    // VS Code does not follow symlinked prompt files reliably on Windows.
    link_strategy: LinkStrategy::Copy,
    agents: AgentMode::Transformed(AgentTransform {
        subdir: "chatmodes",
        suffix: ".chatmode.md",
        display_name: true,
    }),
    commands: CommandSpec {
        subdir: "prompts",
        extension: "md",
        link_suffix: Some(".prompt.md"),
        exclude: Some("copilot.md"),
    },
    entry_doc: None,
    remote_configs: &[RemoteConfig {
        path: ".vscode/mcp.json",
        shape: RemoteShape::Direct,
    }],
};

static CODEX: ProfileSpec = ProfileSpec {
    owns_dir: true,
    id: ProfileId::Codex,
    dir_name: ".codex",
    shared: SHARED,
    link_strategy: LinkStrategy::Symlink,
    agents: AgentMode::Linked,
    commands: CommandSpec {
        subdir: "prompts",
        extension: "md",
        link_suffix: None,
        exclude: None,
    },
    entry_doc: Some(EntryDoc {
        template: "AGENTS.md",
        output: "AGENTS.md",
        prefix: ".codex",
    }),
    remote_configs: &[RemoteConfig {
        path: ".codex/config.toml",
        shape: RemoteShape::Toml,
    }],
};

static OPENCODE: ProfileSpec = ProfileSpec {
    owns_dir: true,
    id: ProfileId::Opencode,
    dir_name: ".opencode",
    shared: SHARED,
    link_strategy: LinkStrategy::Symlink,
    agents: AgentMode::Transformed(AgentTransform {
        subdir: "agent",
        suffix: ".md",
        display_name: false,
    }),
    commands: CommandSpec {
        subdir: "command",
        extension: "md",
        link_suffix: None,
        exclude: None,
    },
    entry_doc: None,
    remote_configs: &[RemoteConfig {
        path: "opencode.json",
        shape: RemoteShape::Restructured,
    }],
};
