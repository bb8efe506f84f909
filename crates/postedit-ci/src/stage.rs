//! Stage definitions and command construction.

use postedit_core::{Settings, Tool, ToolFamily, ToolchainProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The three verification stages, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Auto-fix formatting of the edited file. Never fails the run.
    Format,

    /// Lint the edited file.
    Lint,

    /// Run the project's tests.
    Test,
}

impl StageKind {
    pub const ORDER: [StageKind; 3] = [StageKind::Format, StageKind::Lint, StageKind::Test];

    /// Get the stage name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Format => "format",
            StageKind::Lint => "lint",
            StageKind::Test => "test",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments passed to `family` when running `kind` against `target`.
pub fn arguments(kind: StageKind, family: ToolFamily, target: &Path) -> Vec<String> {
    let file = target.to_string_lossy();
    let file: &str = file.as_ref();
    let args: Vec<&str> = match (kind, family) {
        (StageKind::Format, ToolFamily::Ruff) => vec!["format", file],
        (StageKind::Format, ToolFamily::Black) => vec!["--quiet", file],
        (StageKind::Format, ToolFamily::Prettier) => vec!["--write", file],

        (StageKind::Lint, ToolFamily::Ruff) => {
            vec!["check", "--quiet", "--output-format=concise", file]
        }

        // Whole suite, short tracebacks.
        (StageKind::Test, ToolFamily::Pytest) => vec!["--tb=short", "-q"],
        (StageKind::Test, ToolFamily::Jest) => {
            vec!["--findRelatedTests", file, "--passWithNoTests"]
        }
        // Vitest has no reliable related-test selection; run everything.
        (StageKind::Test, ToolFamily::Vitest) => vec!["run", "--reporter=verbose"],

        (_, _) => vec![file],
    };
    args.into_iter().map(String::from).collect()
}

/// Configuration for one stage execution.
#[derive(Debug, Clone, Serialize)]
pub struct StageConfig {
    pub kind: StageKind,

    pub tool: Tool,

    /// Command to execute (first element is executable).
    pub command: Vec<String>,

    /// Directory the command runs in (the project root).
    pub working_dir: PathBuf,

    /// Timeout in seconds (0 = none).
    pub timeout_secs: u64,

    /// Whether this stage is enabled.
    pub enabled: bool,
}

impl StageConfig {
    /// Build the stage that runs `tool` for `kind` against `target`.
    pub fn for_tool(
        kind: StageKind,
        tool: &Tool,
        target: &Path,
        working_dir: &Path,
        timeout_secs: u64,
    ) -> Self {
        let mut command = vec![tool.executable.to_string_lossy().into_owned()];
        command.extend(arguments(kind, tool.family, target));
        Self {
            kind,
            tool: tool.clone(),
            command,
            working_dir: working_dir.to_path_buf(),
            timeout_secs,
            enabled: true,
        }
    }

    /// Disable this stage.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Display name, e.g. `lint (ruff)`.
    pub fn name(&self) -> String {
        format!("{} ({})", self.kind, self.tool.family)
    }
}

/// Stages for `profile`, in execution order. Empty slots produce no stage.
pub fn plan(
    profile: &ToolchainProfile,
    target: &Path,
    root: &Path,
    settings: &Settings,
) -> Vec<StageConfig> {
    StageKind::ORDER
        .into_iter()
        .filter_map(|kind| {
            let tool = match kind {
                StageKind::Format => profile.formatter.as_ref(),
                StageKind::Lint => profile.linter.as_ref(),
                StageKind::Test => profile.test_runner.as_ref(),
            }?;
            let config = StageConfig::for_tool(kind, tool, target, root, settings.timeout_secs);
            if kind == StageKind::Test && !settings.run_tests {
                Some(config.disabled())
            } else {
                Some(config)
            }
        })
        .collect()
}
