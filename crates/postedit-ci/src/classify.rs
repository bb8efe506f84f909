//! Output classification.
//!
//! Tools report problems in free-form text. Each tool family gets a
//! [`Classifier`] that decides from that text (and the exit code, where it
//! can be trusted) whether the stage failed.

use crate::runner::StageOutput;
use crate::stage::StageKind;
use postedit_core::ToolFamily;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Clean,
    Failing,
}

/// Decides whether a stage's output is a failure.
pub trait Classifier: Send + Sync {
    fn classify(&self, output: &StageOutput) -> Classification;
}

/// Formatter output is never reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discarded;

impl Classifier for Discarded {
    fn classify(&self, _output: &StageOutput) -> Classification {
        Classification::Clean
    }
}

/// Any printed output is a failure; the exit code is ignored.
///
/// Some linters exit non-zero on warnings they print elsewhere, so a silent
/// non-zero exit counts as clean.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyOutput;

impl Classifier for NonEmptyOutput {
    fn classify(&self, output: &StageOutput) -> Classification {
        if output.combined().trim().is_empty() {
            Classification::Clean
        } else {
            Classification::Failing
        }
    }
}

/// A non-zero exit is a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonZeroExit;

impl Classifier for NonZeroExit {
    fn classify(&self, output: &StageOutput) -> Classification {
        if output.succeeded() {
            Classification::Clean
        } else {
            Classification::Failing
        }
    }
}

static PYTEST_FAILURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bFAILED\b|\bERROR\b|\b\d+ failed\b").expect("pytest failure signature")
});

static JEST_FAILURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*FAIL\s|Tests:.*\b\d+ failed\b").expect("jest failure signature")
});

static VITEST_FAILURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:FAIL|×|✗)\s|Tests\s+.*\b\d+ failed\b").expect("vitest failure signature")
});

/// Output matching a failure-signature pattern is a failure.
///
/// Zero-test runs ("no tests ran", "No tests found") carry no signature and
/// are therefore clean.
#[derive(Debug, Clone)]
pub struct FailureSignature {
    pattern: Regex,
}

impl FailureSignature {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pytest() -> Self {
        Self {
            pattern: PYTEST_FAILURE.clone(),
        }
    }

    pub fn jest() -> Self {
        Self {
            pattern: JEST_FAILURE.clone(),
        }
    }

    pub fn vitest() -> Self {
        Self {
            pattern: VITEST_FAILURE.clone(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Classifier for FailureSignature {
    fn classify(&self, output: &StageOutput) -> Classification {
        if self.matches(&output.combined()) {
            Classification::Failing
        } else {
            Classification::Clean
        }
    }
}

/// The classifier for `family` running `kind`.
pub fn classifier_for(kind: StageKind, family: ToolFamily) -> Box<dyn Classifier> {
    match (kind, family) {
        (StageKind::Format, _) => Box::new(Discarded),
        (StageKind::Lint, _) => Box::new(NonEmptyOutput),
        (StageKind::Test, ToolFamily::Pytest) => Box::new(FailureSignature::pytest()),
        (StageKind::Test, ToolFamily::Jest) => Box::new(FailureSignature::jest()),
        (StageKind::Test, ToolFamily::Vitest) => Box::new(FailureSignature::vitest()),
        (StageKind::Test, _) => Box::new(NonZeroExit),
    }
}
