//! Target path resolution.

use crate::event::EditEvent;
use crate::fs::ProjectFs;
use crate::skip::{Skip, Step};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// An edited file known to exist at resolution time.
///
/// The file may still disappear before the stages run; tools are expected to
/// cope with that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub absolute_path: PathBuf,
}

impl ResolvedTarget {
    /// Directory containing the target.
    pub fn parent_dir(&self) -> &Path {
        self.absolute_path.parent().unwrap_or(&self.absolute_path)
    }

    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        self.absolute_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

/// Resolve the event's path to an existing regular file.
///
/// Relative paths are joined onto the event's working directory, which is
/// itself made absolute against the process directory when relative.
/// Missing files and non-files are skips, never errors: a file can
/// legitimately be removed or renamed between the edit and the check.
pub fn resolve(event: &EditEvent, fs: &dyn ProjectFs) -> Step<ResolvedTarget> {
    if !event.has_target() {
        return Err(Skip::NoTarget);
    }

    let raw = Path::new(event.file_path.trim());
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        event.working_directory.join(raw)
    };
    let absolute_path = absolutize(&joined);

    if !fs.is_file(&absolute_path) {
        debug!(path = %absolute_path.display(), "Edited path is not a regular file");
        return Err(Skip::NotAFile);
    }

    Ok(ResolvedTarget { absolute_path })
}

/// Make `path` absolute against the process directory and fold `.` and
/// `..` components lexically, so substring matching sees a clean path.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize(&absolute)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` above the root is the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclude::ExclusionFilter;
    use crate::fakes::MemoryFs;

    fn event(file_path: &str, cwd: &str) -> EditEvent {
        EditEvent {
            file_path: file_path.to_string(),
            working_directory: PathBuf::from(cwd),
            tool_name: None,
        }
    }

    #[test]
    fn empty_path_is_no_target() {
        let fs = MemoryFs::new();
        assert_eq!(resolve(&event("", "/repo"), &fs), Err(Skip::NoTarget));
        assert_eq!(resolve(&event("   ", "/repo"), &fs), Err(Skip::NoTarget));
    }

    #[test]
    fn relative_path_joins_working_directory() {
        let fs = MemoryFs::new().with_file("/repo/src/app.py");
        let target = resolve(&event("./src/app.py", "/repo"), &fs).unwrap();
        assert_eq!(target.absolute_path, PathBuf::from("/repo/src/app.py"));
        assert_eq!(target.parent_dir(), Path::new("/repo/src"));
        assert_eq!(target.extension().as_deref(), Some("py"));
    }

    #[test]
    fn absolute_path_ignores_working_directory() {
        let fs = MemoryFs::new().with_file("/other/lib.ts");
        let target = resolve(&event("/other/lib.ts", "/repo"), &fs).unwrap();
        assert_eq!(target.absolute_path, PathBuf::from("/other/lib.ts"));
    }

    #[test]
    fn missing_file_is_skipped() {
        let fs = MemoryFs::new();
        assert_eq!(
            resolve(&event("/repo/gone.py", "/repo"), &fs),
            Err(Skip::NotAFile)
        );
    }

    #[test]
    fn directory_is_not_a_file() {
        let fs = MemoryFs::new().with_dir("/repo/src");
        assert_eq!(
            resolve(&event("/repo/src", "/repo"), &fs),
            Err(Skip::NotAFile)
        );
    }

    #[test]
    fn parent_components_are_folded() {
        let fs = MemoryFs::new().with_file("/p/src/a.js");
        let target = resolve(&event("/p/node_modules/../src/./a.js", "/repo"), &fs).unwrap();
        assert_eq!(target.absolute_path, PathBuf::from("/p/src/a.js"));
        assert_eq!(ExclusionFilter::default().check(&target), Ok(()));
    }

    #[test]
    fn relative_working_directory_is_made_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let file = cwd.join("proj/node_modules/pkg/index.js");
        let fs = MemoryFs::new().with_file(&file);

        let target = resolve(&event("proj/node_modules/pkg/index.js", "."), &fs).unwrap();
        assert!(target.absolute_path.is_absolute());
        assert_eq!(target.absolute_path, file);
        assert_eq!(
            ExclusionFilter::default().check(&target),
            Err(Skip::ExcludedPath)
        );
    }

    #[cfg(unix)]
    #[test]
    fn normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../a/../b")), PathBuf::from("/b"));
        assert_eq!(absolutize(Path::new("/x/./y/..")), PathBuf::from("/x"));
    }

    #[test]
    fn extension_is_lowercased() {
        let target = ResolvedTarget {
            absolute_path: PathBuf::from("/r/App.TSX"),
        };
        assert_eq!(target.extension().as_deref(), Some("tsx"));
    }
}
