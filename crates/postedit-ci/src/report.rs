//! Failure report aggregation.

use crate::runner::StageResult;
use crate::stage::StageKind;
use postedit_core::ToolFamily;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One labeled section of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBlock {
    pub stage: StageKind,
    pub tool: ToolFamily,
    pub output: String,
}

impl ReportBlock {
    /// Heading line, e.g. `Lint issues (ruff) in /p/app.py:`.
    pub fn heading(&self, target: &Path) -> String {
        match self.stage {
            StageKind::Lint => format!("Lint issues ({}) in {}:", self.tool, target.display()),
            StageKind::Test => format!("Test failures ({}):", self.tool),
            StageKind::Format => format!("Format errors ({}) in {}:", self.tool, target.display()),
        }
    }
}

/// The failing stages of one invocation, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedReport {
    pub target: PathBuf,
    pub blocks: Vec<ReportBlock>,
}

impl AggregatedReport {
    /// Collect a block for every failing result.
    ///
    /// Clean results contribute nothing; skipped stages have no result.
    pub fn aggregate(target: &Path, results: &[StageResult]) -> Self {
        let mut blocks: Vec<ReportBlock> = results
            .iter()
            .filter(|result| result.is_failing())
            .map(|result| ReportBlock {
                stage: result.stage,
                tool: result.tool,
                output: result.raw_output.trim_end().to_string(),
            })
            .collect();
        blocks.sort_by_key(|block| block.stage);

        Self {
            target: target.to_path_buf(),
            blocks,
        }
    }

    /// Whether the invocation is a success.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks for `stage`.
    pub fn count(&self, stage: StageKind) -> usize {
        self.blocks.iter().filter(|b| b.stage == stage).count()
    }

    /// Render the report as one text block; empty when there is nothing to
    /// report.
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(|block| format!("{}\n{}\n", block.heading(&self.target), block.output))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;

    fn result(stage: StageKind, tool: ToolFamily, output: &str, c: Classification) -> StageResult {
        StageResult {
            stage,
            tool,
            raw_output: output.to_string(),
            exit_code: 1,
            duration_ms: 10,
            classification: c,
        }
    }

    #[test]
    fn test_empty_results_is_success() {
        let report = AggregatedReport::aggregate(Path::new("/p/a.py"), &[]);
        assert!(report.is_empty());
        assert_eq!(report.render(), "");
    }

    #[test]
    fn test_clean_results_contribute_nothing() {
        let report = AggregatedReport::aggregate(
            Path::new("/p/a.py"),
            &[
                result(StageKind::Format, ToolFamily::Ruff, "1 file reformatted", Classification::Clean),
                result(StageKind::Test, ToolFamily::Pytest, "3 passed", Classification::Clean),
            ],
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_failing_blocks_are_labeled_in_stage_order() {
        let report = AggregatedReport::aggregate(
            Path::new("/p/a.py"),
            &[
                result(StageKind::Test, ToolFamily::Pytest, "2 failed\n", Classification::Failing),
                result(StageKind::Lint, ToolFamily::Ruff, "a.py:1:1: F401\n", Classification::Failing),
            ],
        );
        assert_eq!(report.count(StageKind::Lint), 1);
        assert_eq!(report.count(StageKind::Test), 1);
        assert_eq!(report.blocks[0].stage, StageKind::Lint);

        let text = report.render();
        assert_eq!(
            text,
            "Lint issues (ruff) in /p/a.py:\na.py:1:1: F401\n\nTest failures (pytest):\n2 failed\n"
        );
    }

    #[test]
    fn test_report_serialization() {
        let failing = result(StageKind::Test, ToolFamily::Jest, "FAIL a.test.js\n", Classification::Failing);
        let value = serde_json::to_value(&failing).unwrap();
        assert_eq!(value["stage"], "test");
        assert_eq!(value["tool"], "jest");
        assert_eq!(value["classification"], "failing");

        let report = AggregatedReport::aggregate(Path::new("/p/a.js"), &[failing]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["target"], "/p/a.js");
        assert_eq!(value["blocks"][0]["output"], "FAIL a.test.js");
    }
}
