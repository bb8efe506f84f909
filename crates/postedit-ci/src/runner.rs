//! Stage execution.

use crate::classify::Classification;
use crate::stage::{StageConfig, StageKind};
use postedit_core::ToolFamily;
use serde::Serialize;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// Errors that stop a stage from producing output at all.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("stage {0} has empty command")]
    EmptyCommand(String),

    #[error("stage {stage} could not be spawned: {source}")]
    Spawn {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stage {stage} timed out after {secs} seconds")]
    TimedOut { stage: String, secs: u64 },
}

/// Raw output of a finished stage process.
#[derive(Debug, Clone, Serialize)]
pub struct StageOutput {
    /// Exit code (-1 when killed by a signal).
    pub exit_code: i32,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl StageOutput {
    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// A classified stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    pub stage: StageKind,

    pub tool: ToolFamily,

    /// Combined output of the tool.
    pub raw_output: String,

    pub exit_code: i32,

    pub duration_ms: u64,

    pub classification: Classification,
}

impl StageResult {
    pub fn from_output(
        config: &StageConfig,
        output: &StageOutput,
        classification: Classification,
    ) -> Self {
        Self {
            stage: config.kind,
            tool: config.tool.family,
            raw_output: output.combined(),
            exit_code: output.exit_code,
            duration_ms: output.duration_ms,
            classification,
        }
    }

    pub fn is_failing(&self) -> bool {
        self.classification == Classification::Failing
    }
}

/// Executes stage commands as child processes.
pub struct StageRunner;

impl StageRunner {
    /// Execute a single stage and capture its output.
    ///
    /// The child runs in the stage's working directory with stdin closed.
    /// Without a timeout the call waits for the tool indefinitely.
    pub async fn execute(config: &StageConfig) -> Result<StageOutput, StageError> {
        let start = Instant::now();
        let stage = config.name();

        let Some((exe, args)) = config.command.split_first() else {
            return Err(StageError::EmptyCommand(stage));
        };

        let child = Command::new(exe)
            .args(args)
            .current_dir(&config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| StageError::Spawn {
                stage: stage.clone(),
                source,
            })?;

        let waited = if config.timeout_secs > 0 {
            tokio::time::timeout(
                std::time::Duration::from_secs(config.timeout_secs),
                child.wait_with_output(),
            )
            .await
            .map_err(|_| StageError::TimedOut {
                stage: stage.clone(),
                secs: config.timeout_secs,
            })?
        } else {
            child.wait_with_output().await
        };
        let output = waited.map_err(|source| StageError::Spawn { stage, source })?;

        Ok(StageOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postedit_core::Tool;
    use std::path::{Path, PathBuf};

    fn shell_stage(script: &str) -> StageConfig {
        let tool = Tool {
            family: ToolFamily::Flake8,
            executable: PathBuf::from("sh"),
        };
        let mut config =
            StageConfig::for_tool(StageKind::Lint, &tool, Path::new("x"), Path::new("."), 60);
        config.command = vec!["sh".to_string(), "-c".to_string(), script.to_string()];
        config
    }

    fn output(stdout: &str, stderr: &str) -> StageOutput {
        StageOutput {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_combined_output() {
        assert_eq!(output("a\n", "").combined(), "a\n");
        assert_eq!(output("", "b\n").combined(), "b\n");
        assert_eq!(output("a\n", "b\n").combined(), "a\nb\n");
        assert!(output("  \n", "").combined().trim().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_captures_output() {
        let config = shell_stage("echo hello; echo oops >&2; exit 3");
        let result = StageRunner::execute(&config).await.expect("execute failed");
        assert_eq!(result.exit_code, 3);
        assert!(!result.succeeded());
        assert!(result.stdout.contains("hello"));
        assert!(result.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let mut config = shell_stage("ls");
        config.working_dir = dir.path().to_path_buf();
        let result = StageRunner::execute(&config).await.unwrap();
        assert!(result.succeeded());
        assert!(result.stdout.contains("marker.txt"));
    }

    #[tokio::test]
    async fn test_empty_command_is_error() {
        let mut config = shell_stage("true");
        config.command.clear();
        let err = StageRunner::execute(&config).await.unwrap_err();
        assert!(matches!(err, StageError::EmptyCommand(_)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let mut config = shell_stage("true");
        config.command = vec!["/nonexistent/postedit-tool".to_string()];
        let err = StageRunner::execute(&config).await.unwrap_err();
        assert!(matches!(err, StageError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let mut config = shell_stage("sleep 5");
        config.timeout_secs = 1;
        let err = StageRunner::execute(&config).await.unwrap_err();
        assert!(matches!(err, StageError::TimedOut { secs: 1, .. }));
    }
}
