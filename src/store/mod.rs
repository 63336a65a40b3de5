//! Canonical store reader.
//!
//! The canonical store is the single source-of-truth tree under
//! `<root>/.agent/`. This module enumerates it into ordered name lists per
//! asset category; the lists are recomputed fresh on every run — there is no
//! cache, an item exists exactly as long as its filesystem entry does.
pub mod servers;

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Name of the canonical store directory under the project root.
pub const STORE_DIR: &str = ".agent";

/// Name of the template directory inside the store.
pub const TEMPLATES_DIR: &str = "templates";

/// An asset category of the canonical store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Always-loaded rule documents (`rules/*.md`).
    Rule,
    /// Directory-backed skills (`skills/<name>/SKILL.md`).
    Skill,
    /// Workflow documents (`workflows/*.md`).
    Workflow,
    /// Agent persona documents (`agents/*.md`).
    Agent,
    /// Slash-command definitions (`commands/*.{md,toml}`).
    Command,
}

impl Category {
    /// Every category, in the order the entry documents list them.
    pub const ALL: [Self; 5] = [
        Self::Rule,
        Self::Skill,
        Self::Workflow,
        Self::Agent,
        Self::Command,
    ];

    /// Subdirectory of the store holding this category.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Rule => "rules",
            Self::Skill => "skills",
            Self::Workflow => "workflows",
            Self::Agent => "agents",
            Self::Command => "commands",
        }
    }

    /// Whether items of this category are directories rather than files.
    #[must_use]
    pub const fn is_dir_backed(self) -> bool {
        matches!(self, Self::Skill)
    }
}

/// Handle to an opened canonical store.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    agent_dir: PathBuf,
}

impl Store {
    /// Open the canonical store under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RootMissing`] when `<root>/.agent` does not
    /// exist — the one fatal input condition.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let agent_dir = root.join(STORE_DIR);
        if !agent_dir.is_dir() {
            return Err(StoreError::RootMissing(agent_dir));
        }
        Ok(Self {
            root: root.to_path_buf(),
            agent_dir,
        })
    }

    /// The project root the store was opened under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.agent/` directory itself.
    #[must_use]
    pub fn agent_dir(&self) -> &Path {
        &self.agent_dir
    }

    /// Directory of one asset category.
    #[must_use]
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.agent_dir.join(category.dir_name())
    }

    /// Directory holding the entry-document templates.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.agent_dir.join(TEMPLATES_DIR)
    }

    /// Ordered active-item names for one category.
    ///
    /// Hidden entries are excluded. File-backed categories count only `.md`
    /// files and return the stem; the directory-backed skill category counts
    /// only directories and returns the directory name. A missing category
    /// directory yields an empty list, and unreadable directory entries are
    /// silently skipped — listing never fails.
    #[must_use]
    pub fn list_active(&self, category: Category) -> Vec<String> {
        let mut names: Vec<String> = visible_entries(&self.category_dir(category))
            .into_iter()
            .filter_map(|(name, is_dir)| {
                if category.is_dir_backed() {
                    is_dir.then_some(name)
                } else if is_dir {
                    None
                } else {
                    let path = Path::new(&name);
                    (path.extension().is_some_and(|ext| ext == "md"))
                        .then(|| path.file_stem()?.to_str().map(ToString::to_string))
                        .flatten()
                }
            })
            .collect();
        names.sort();
        names
    }

    /// Ordered raw file names (extension kept) of the command category.
    ///
    /// The materializer filters these per profile, so unlike
    /// [`list_active`](Self::list_active) this keeps non-markdown command
    /// files (e.g. Gemini's TOML commands).
    #[must_use]
    pub fn command_files(&self) -> Vec<String> {
        let mut names: Vec<String> = visible_entries(&self.category_dir(Category::Command))
            .into_iter()
            .filter_map(|(name, is_dir)| (!is_dir).then_some(name))
            .collect();
        names.sort();
        names
    }
}

/// Non-hidden `(file_name, is_dir)` pairs of `dir`, unordered.
fn visible_entries(dir: &Path) -> Vec<(String, bool)> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if name.starts_with('.') {
                return None;
            }
            let is_dir = entry.file_type().ok()?.is_dir();
            Some((name, is_dir))
        })
        .collect()
}

/// The five active-item lists, computed once per run and shared by the
/// materializer and the template compiler.
#[derive(Debug, Clone, Default)]
pub struct ActiveLists {
    /// Active rule names.
    pub rules: Vec<String>,
    /// Active skill names.
    pub skills: Vec<String>,
    /// Active workflow names.
    pub workflows: Vec<String>,
    /// Active agent names.
    pub agents: Vec<String>,
    /// Active markdown command names.
    pub commands: Vec<String>,
}

impl ActiveLists {
    /// Enumerate every category of `store`.
    #[must_use]
    pub fn collect(store: &Store) -> Self {
        Self {
            rules: store.list_active(Category::Rule),
            skills: store.list_active(Category::Skill),
            workflows: store.list_active(Category::Workflow),
            agents: store.list_active(Category::Agent),
            commands: store.list_active(Category::Command),
        }
    }

    /// The list for one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Rule => &self.rules,
            Category::Skill => &self.skills,
            Category::Workflow => &self.workflows,
            Category::Agent => &self.agents,
            Category::Command => &self.commands,
        }
    }
}
