//! Invocation settings.
//!
//! The binary fills these from command-line flags with `POSTEDIT_*`
//! environment fallbacks; library callers can build them directly.

use crate::error::PostEditError;
use crate::exclude::ExclusionFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment directory checked when none is configured.
pub const DEFAULT_ENV_DIR: &str = ".venv";

/// Which language wins when a root carries both a Python and a JavaScript
/// descriptor and the edited file's extension belongs to neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguousPolicy {
    #[default]
    Javascript,
    Python,
}

impl FromStr for AmbiguousPolicy {
    type Err = PostEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(AmbiguousPolicy::Javascript),
            "python" | "py" => Ok(AmbiguousPolicy::Python),
            other => Err(PostEditError::InvalidSetting {
                name: "ambiguous_policy".to_string(),
                reason: format!("expected javascript or python, got {other:?}"),
            }),
        }
    }
}

impl std::fmt::Display for AmbiguousPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmbiguousPolicy::Javascript => f.write_str("javascript"),
            AmbiguousPolicy::Python => f.write_str("python"),
        }
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Python environment directory names, checked in order at the root.
    pub env_dirs: Vec<String>,

    /// Substrings excluded in addition to the built-in list.
    pub extra_excludes: Vec<String>,

    pub ambiguous_policy: AmbiguousPolicy,

    /// Per-stage timeout in seconds (0 = wait indefinitely).
    pub timeout_secs: u64,

    /// Whether the test stage runs at all.
    pub run_tests: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_dirs: vec![DEFAULT_ENV_DIR.to_string()],
            extra_excludes: Vec::new(),
            ambiguous_policy: AmbiguousPolicy::default(),
            timeout_secs: 0,
            run_tests: true,
        }
    }
}

impl Settings {
    pub fn exclusion_filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(&self.extra_excludes)
    }

    /// Environment directory names, never empty.
    pub fn env_dir_names(&self) -> Vec<&str> {
        let names: Vec<&str> = self
            .env_dirs
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .collect();
        if names.is_empty() {
            vec![DEFAULT_ENV_DIR]
        } else {
            names
        }
    }
}
