//! Project root discovery.
//!
//! Walks from the edited file's directory towards the filesystem root and
//! stops at the first directory holding a packaging descriptor. The nearest
//! descriptor always wins, so sub-packages inside a monorepo get their own
//! toolchain.

use crate::fs::ProjectFs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Packaging descriptors that mark a project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Pyproject,
    SetupPy,
    SetupCfg,
    PackageJson,
}

impl Marker {
    /// Markers in the order they are checked at each directory.
    pub const SEARCH_ORDER: [Marker; 4] = [
        Marker::Pyproject,
        Marker::SetupPy,
        Marker::SetupCfg,
        Marker::PackageJson,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Marker::Pyproject => "pyproject.toml",
            Marker::SetupPy => "setup.py",
            Marker::SetupCfg => "setup.cfg",
            Marker::PackageJson => "package.json",
        }
    }

    pub fn is_python(&self) -> bool {
        !self.is_javascript()
    }

    pub fn is_javascript(&self) -> bool {
        matches!(self, Marker::PackageJson)
    }
}

/// A directory holding at least one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub root_path: PathBuf,

    /// First marker found in [`Marker::SEARCH_ORDER`].
    pub marker_found: Marker,

    /// Every marker present at `root_path`, in search order.
    pub markers: Vec<Marker>,
}

impl ProjectRoot {
    pub fn has_python_marker(&self) -> bool {
        self.markers.iter().any(Marker::is_python)
    }

    pub fn has_javascript_marker(&self) -> bool {
        self.markers.iter().any(Marker::is_javascript)
    }
}

/// Markers present directly in `dir`, in search order.
pub fn markers_at(dir: &Path, fs: &dyn ProjectFs) -> Vec<Marker> {
    Marker::SEARCH_ORDER
        .into_iter()
        .filter(|marker| fs.is_file(&dir.join(marker.file_name())))
        .collect()
}

fn root_at(dir: &Path, fs: &dyn ProjectFs) -> Option<ProjectRoot> {
    let markers = markers_at(dir, fs);
    let marker_found = *markers.first()?;
    Some(ProjectRoot {
        root_path: dir.to_path_buf(),
        marker_found,
        markers,
    })
}

/// Locate the project root for a file in `start_dir`.
///
/// Checks `start_dir` and each of its ancestors; if none carries a marker,
/// `fallback_dir` (the caller's working directory) is checked on its own.
pub fn locate(start_dir: &Path, fallback_dir: &Path, fs: &dyn ProjectFs) -> Option<ProjectRoot> {
    if let Some(root) = start_dir.ancestors().find_map(|dir| root_at(dir, fs)) {
        debug!(root = %root.root_path.display(), marker = ?root.marker_found, "Found project root");
        return Some(root);
    }

    let root = root_at(fallback_dir, fs);
    match &root {
        Some(root) => {
            debug!(root = %root.root_path.display(), "Using working directory as project root")
        }
        None => debug!(start = %start_dir.display(), "No project marker found"),
    }
    root
}
