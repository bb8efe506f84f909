//! In-memory fake for [`ProjectFs`] (testing only)
//!
//! Directories are implied by the files registered beneath them, so a tree
//! can be described by listing its files.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::fs::ProjectFs;

/// Virtual filesystem backed by path sets.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
    on_path: HashMap<String, PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a regular file and all of its ancestor directories.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_file(path.as_ref());
        self
    }

    /// Register an empty directory.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        for ancestor in path.as_ref().ancestors() {
            self.dirs.insert(ancestor.to_path_buf());
        }
        self
    }

    /// Register an executable file.
    pub fn with_executable(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.insert_file(path);
        self.executables.insert(path.to_path_buf());
        self
    }

    /// Make `name` resolvable on the search path at `path`.
    pub fn with_global(mut self, name: &str, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.insert_file(path);
        self.executables.insert(path.to_path_buf());
        self.on_path.insert(name.to_string(), path.to_path_buf());
        self
    }

    fn insert_file(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            for ancestor in parent.ancestors() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
        self.files.insert(path.to_path_buf());
    }
}

impl ProjectFs for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.executables.contains(path)
    }

    fn find_on_path(&self, name: &str) -> Option<PathBuf> {
        self.on_path.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_imply_parent_dirs() {
        let fs = MemoryFs::new().with_file("/a/b/c.py");
        assert!(fs.is_file(Path::new("/a/b/c.py")));
        assert!(fs.is_dir(Path::new("/a/b")));
        assert!(fs.is_dir(Path::new("/a")));
        assert!(!fs.is_file(Path::new("/a/b")));
    }

    #[test]
    fn plain_files_are_not_executable() {
        let fs = MemoryFs::new()
            .with_file("/p/.venv/bin/ruff")
            .with_executable("/p/.venv/bin/pytest");
        assert!(!fs.is_executable(Path::new("/p/.venv/bin/ruff")));
        assert!(fs.is_executable(Path::new("/p/.venv/bin/pytest")));
    }

    #[test]
    fn globals_resolve_by_name() {
        let fs = MemoryFs::new().with_global("eslint", "/usr/bin/eslint");
        assert_eq!(
            fs.find_on_path("eslint"),
            Some(PathBuf::from("/usr/bin/eslint"))
        );
        assert!(fs.find_on_path("prettier").is_none());
    }
}
