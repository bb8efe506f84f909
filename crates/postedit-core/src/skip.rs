//! Short-circuit states.
//!
//! Every stage before execution either produces its value or a [`Skip`].
//! A skip always ends the invocation as a success with no report.

use serde::Serialize;

/// Why an invocation ended before running any tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Skip {
    #[error("skip: no target")]
    NoTarget,

    #[error("skip: not a file")]
    NotAFile,

    #[error("skip: excluded path")]
    ExcludedPath,

    #[error("skip: no project")]
    NoProject,

    #[error("skip: no environment")]
    NoEnvironment,
}

/// Result of a pipeline step that may short-circuit.
pub type Step<T> = std::result::Result<T, Skip>;
