//! Tool availability probing.
//!
//! Each tool is looked up through a ranked list of [`Candidate`] locations;
//! the first location that resolves to an executable wins.

use crate::fs::ProjectFs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tool families postedit knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolFamily {
    /// Formatter and linter in one binary.
    Ruff,
    Black,
    Flake8,
    Pytest,
    Prettier,
    Eslint,
    Jest,
    Vitest,
}

impl ToolFamily {
    /// Executable name, without platform suffix.
    pub fn binary_name(&self) -> &'static str {
        match self {
            ToolFamily::Ruff => "ruff",
            ToolFamily::Black => "black",
            ToolFamily::Flake8 => "flake8",
            ToolFamily::Pytest => "pytest",
            ToolFamily::Prettier => "prettier",
            ToolFamily::Eslint => "eslint",
            ToolFamily::Jest => "jest",
            ToolFamily::Vitest => "vitest",
        }
    }
}

impl std::fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary_name())
    }
}

/// A resolved, executable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub family: ToolFamily,
    pub executable: PathBuf,
}

/// One place a tool might live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A specific file that must exist and be executable.
    Local(PathBuf),

    /// A name looked up on the executable search path.
    OnPath(&'static str),
}

impl Candidate {
    fn resolve(&self, fs: &dyn ProjectFs) -> Option<PathBuf> {
        match self {
            Candidate::Local(path) => fs.is_executable(path).then(|| path.clone()),
            Candidate::OnPath(name) => fs.find_on_path(name),
        }
    }
}

/// Resolve `family` from the first satisfied candidate.
pub fn first_available(
    family: ToolFamily,
    candidates: &[Candidate],
    fs: &dyn ProjectFs,
) -> Option<Tool> {
    let found = candidates
        .iter()
        .find_map(|candidate| candidate.resolve(fs))
        .map(|executable| Tool { family, executable });

    match &found {
        Some(tool) => debug!(tool = %family, path = %tool.executable.display(), "Tool available"),
        None => debug!(tool = %family, "Tool not installed"),
    }
    found
}

/// Executable path for `name` inside a directory of binaries.
pub fn executable_in(bin_dir: &Path, name: &str) -> PathBuf {
    if cfg!(windows) {
        bin_dir.join(format!("{name}.exe"))
    } else {
        bin_dir.join(name)
    }
}
