//! Read-only filesystem capability.
//!
//! Project discovery and tool probing only ever ask yes/no questions about
//! paths. Routing them through [`ProjectFs`] keeps the locator and the
//! profile selector testable against the in-memory fake in
//! [`crate::fakes`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Filesystem queries used during project discovery.
pub trait ProjectFs: Send + Sync {
    /// Whether `path` exists and is a regular file (symlinks followed).
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file the current user may execute.
    fn is_executable(&self, path: &Path) -> bool;

    /// Look up `name` on the executable search path.
    fn find_on_path(&self, name: &str) -> Option<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Default)]
pub struct OsFs {
    search_path: Option<OsString>,
}

impl OsFs {
    /// Filesystem access using the ambient `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filesystem access with an explicit executable search path.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl ProjectFs for OsFs {
    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        self.is_file(path)
    }

    fn find_on_path(&self, name: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(name, Some(paths), cwd).ok()
            }
            None => which::which(name).ok(),
        }
    }
}
