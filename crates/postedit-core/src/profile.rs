//! Toolchain profile selection.
//!
//! Chooses the language from the markers at the project root and the edited
//! file's extension, then probes for the formatter, linter and test runner
//! that language uses.

use crate::fs::ProjectFs;
use crate::probe::{executable_in, first_available, Candidate, Tool, ToolFamily};
use crate::root::ProjectRoot;
use crate::settings::{AmbiguousPolicy, Settings};
use crate::skip::{Skip, Step};
use crate::target::ResolvedTarget;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions that always select the javascript profile when both marker
/// kinds are present.
pub const JAVASCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Extensions that always select the python profile when both marker kinds
/// are present.
pub const PYTHON_EXTENSIONS: &[&str] = &["py"];

/// Config files that select the alternate (vitest) runner family.
pub const VITEST_CONFIGS: &[&str] = &[
    "vitest.config.ts",
    "vitest.config.js",
    "vitest.config.mts",
    "vitest.config.mjs",
    "vitest.config.cts",
    "vitest.config.cjs",
];

/// Config files that select the default (jest) runner family.
pub const JEST_CONFIGS: &[&str] = &[
    "jest.config.js",
    "jest.config.ts",
    "jest.config.mjs",
    "jest.config.cjs",
    "jest.config.json",
];

const ENV_BIN_DIR: &str = if cfg!(windows) { "Scripts" } else { "bin" };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Python,
    Javascript,
}

/// Test runner family within a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerVariant {
    /// Runs only tests related to the edited file.
    #[default]
    Default,

    /// Runs the whole suite; no reliable per-file selection.
    Alternate,
}

/// The tools selected for one invocation. Empty slots are skipped stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainProfile {
    pub language: Language,
    pub formatter: Option<Tool>,
    pub linter: Option<Tool>,
    pub test_runner: Option<Tool>,
    pub test_runner_variant: RunnerVariant,
}

impl ToolchainProfile {
    /// Whether no stage would run.
    pub fn is_empty(&self) -> bool {
        self.formatter.is_none() && self.linter.is_none() && self.test_runner.is_none()
    }
}

/// Pick the language for `extension` given the markers at `root`.
pub fn select_language(
    root: &ProjectRoot,
    extension: Option<&str>,
    policy: AmbiguousPolicy,
) -> Step<Language> {
    match (root.has_python_marker(), root.has_javascript_marker()) {
        (false, false) => Err(Skip::NoProject),
        (true, false) => Ok(Language::Python),
        (false, true) => Ok(Language::Javascript),
        (true, true) => {
            let language = match extension {
                Some(ext) if PYTHON_EXTENSIONS.contains(&ext) => Language::Python,
                Some(ext) if JAVASCRIPT_EXTENSIONS.contains(&ext) => Language::Javascript,
                _ => match policy {
                    AmbiguousPolicy::Javascript => Language::Javascript,
                    AmbiguousPolicy::Python => Language::Python,
                },
            };
            debug!(?extension, ?language, "Both marker kinds present");
            Ok(language)
        }
    }
}

/// Select the full toolchain profile for `target` under `root`.
pub fn select(
    root: &ProjectRoot,
    target: &ResolvedTarget,
    settings: &Settings,
    fs: &dyn ProjectFs,
) -> Step<ToolchainProfile> {
    let extension = target.extension();
    let language = select_language(root, extension.as_deref(), settings.ambiguous_policy)?;

    match language {
        Language::Python => python_profile(&root.root_path, settings, fs),
        Language::Javascript => Ok(javascript_profile(&root.root_path, fs)),
    }
}

/// Locate the isolated Python environment at `root`.
pub fn find_environment(root: &Path, settings: &Settings, fs: &dyn ProjectFs) -> Option<PathBuf> {
    settings
        .env_dir_names()
        .into_iter()
        .map(|name| root.join(name))
        .find(|dir| fs.is_dir(dir))
}

fn python_profile(root: &Path, settings: &Settings, fs: &dyn ProjectFs) -> Step<ToolchainProfile> {
    let Some(env_dir) = find_environment(root, settings, fs) else {
        debug!(root = %root.display(), "No Python environment provisioned");
        return Err(Skip::NoEnvironment);
    };
    let bin_dir = env_dir.join(ENV_BIN_DIR);

    let probe = |family: ToolFamily| {
        let candidates = [Candidate::Local(executable_in(&bin_dir, family.binary_name()))];
        first_available(family, &candidates, fs)
    };

    let (formatter, linter) = match probe(ToolFamily::Ruff) {
        Some(ruff) => (Some(ruff.clone()), Some(ruff)),
        None => (probe(ToolFamily::Black), probe(ToolFamily::Flake8)),
    };

    Ok(ToolchainProfile {
        language: Language::Python,
        formatter,
        linter,
        test_runner: probe(ToolFamily::Pytest),
        test_runner_variant: RunnerVariant::Default,
    })
}

/// Runner family named by a config file at `root`, if any.
pub fn configured_runner(root: &Path, fs: &dyn ProjectFs) -> Option<RunnerVariant> {
    let has_any = |names: &[&str]| names.iter().any(|name| fs.is_file(&root.join(name)));

    if has_any(VITEST_CONFIGS) {
        Some(RunnerVariant::Alternate)
    } else if has_any(JEST_CONFIGS) {
        Some(RunnerVariant::Default)
    } else {
        None
    }
}

fn javascript_profile(root: &Path, fs: &dyn ProjectFs) -> ToolchainProfile {
    let local_bin = root.join("node_modules").join(".bin");

    let probe = |family: ToolFamily| {
        let name = family.binary_name();
        let candidates = [
            Candidate::Local(local_bin.join(name)),
            Candidate::OnPath(name),
        ];
        first_available(family, &candidates, fs)
    };

    let jest = probe(ToolFamily::Jest);
    let vitest = probe(ToolFamily::Vitest);
    let (test_runner, test_runner_variant) = match configured_runner(root, fs) {
        Some(RunnerVariant::Alternate) => match (vitest, jest) {
            (Some(vitest), _) => (Some(vitest), RunnerVariant::Alternate),
            (None, jest) => (jest, RunnerVariant::Default),
        },
        _ => match (jest, vitest) {
            (Some(jest), _) => (Some(jest), RunnerVariant::Default),
            (None, Some(vitest)) => (Some(vitest), RunnerVariant::Alternate),
            (None, None) => (None, RunnerVariant::Default),
        },
    };

    ToolchainProfile {
        language: Language::Javascript,
        formatter: probe(ToolFamily::Prettier),
        linter: probe(ToolFamily::Eslint),
        test_runner,
        test_runner_variant,
    }
}
