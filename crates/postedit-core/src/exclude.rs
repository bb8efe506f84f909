//! Generated and vendored path exclusion.

use crate::skip::{Skip, Step};
use crate::target::ResolvedTarget;
use std::path::Path;
use tracing::debug;

/// Directory fragments that never hold authored content.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "/node_modules/",
    "/.git/",
    "/dist/",
    "/build/",
    "/coverage/",
    "/htmlcov/",
    "/__pycache__/",
    "/.venv/",
    "/venv/",
    "/.tox/",
    "/.eggs/",
    "/.pytest_cache/",
    "/.mypy_cache/",
    "/.ruff_cache/",
    "/.next/",
];

/// Substring filter over absolute target paths.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    patterns: Vec<String>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl ExclusionFilter {
    /// The default patterns plus `extra`.
    pub fn new(extra: &[String]) -> Self {
        let patterns = DEFAULT_EXCLUDES
            .iter()
            .map(|p| p.to_string())
            .chain(extra.iter().filter(|p| !p.is_empty()).cloned())
            .collect();
        Self { patterns }
    }

    /// The first pattern `path` contains, if any.
    pub fn matching_pattern(&self, path: &Path) -> Option<&str> {
        let rendered = path.to_string_lossy().replace('\\', "/");
        self.patterns
            .iter()
            .find(|pattern| rendered.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Pass the target through, or skip it when it sits in an excluded tree.
    pub fn check(&self, target: &ResolvedTarget) -> Step<()> {
        match self.matching_pattern(&target.absolute_path) {
            Some(pattern) => {
                debug!(path = %target.absolute_path.display(), pattern, "Path excluded");
                Err(Skip::ExcludedPath)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn target(path: &str) -> ResolvedTarget {
        ResolvedTarget {
            absolute_path: PathBuf::from(path),
        }
    }

    #[test]
    fn vendored_paths_are_excluded() {
        let filter = ExclusionFilter::default();
        for path in [
            "/p/node_modules/react/index.js",
            "/p/.git/hooks/pre-commit.py",
            "/p/dist/bundle.js",
            "/p/src/__pycache__/mod.py",
            "/p/.venv/lib/site.py",
            "/p/coverage/lcov-report/x.js",
            "/p/.mypy_cache/3.12/a.py",
        ] {
            assert_eq!(filter.check(&target(path)), Err(Skip::ExcludedPath), "{path}");
        }
    }

    #[test]
    fn authored_paths_pass() {
        let filter = ExclusionFilter::default();
        assert_eq!(filter.check(&target("/p/src/app.py")), Ok(()));
        assert_eq!(filter.check(&target("/p/builder/app.ts")), Ok(()));
        assert_eq!(filter.check(&target("/p/.venvrc.py")), Ok(()));
    }

    #[test]
    fn reports_matching_pattern() {
        let filter = ExclusionFilter::default();
        assert_eq!(
            filter.matching_pattern(Path::new("/p/build/out.js")),
            Some("/build/")
        );
    }

    #[test]
    fn extra_patterns_extend_defaults() {
        let filter = ExclusionFilter::new(&["/generated/".to_string(), String::new()]);
        assert_eq!(
            filter.check(&target("/p/generated/api.ts")),
            Err(Skip::ExcludedPath)
        );
        assert_eq!(
            filter.check(&target("/p/node_modules/x.js")),
            Err(Skip::ExcludedPath)
        );
        assert_eq!(filter.check(&target("/p/src/api.ts")), Ok(()));
    }
}
