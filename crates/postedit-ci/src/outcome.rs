//! Outcome signalling.
//!
//! Exit status contract with the caller:
//! - `0`: nothing to report (clean run, any skip, any internal error)
//! - `2`: actionable failure; the report is on stderr

use crate::report::AggregatedReport;
use postedit_core::Skip;
use std::io::Write;
use tracing::warn;

/// Nothing to report.
pub const EXIT_CLEAN: u8 = 0;

/// The caller should read the report and fix the file.
pub const EXIT_ACTIONABLE: u8 = 2;

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stopped before running any tool.
    Skipped(Skip),

    /// Stages ran; the report may be empty.
    Completed(AggregatedReport),
}

impl Outcome {
    /// The report, when there is something to report.
    pub fn report(&self) -> Option<&AggregatedReport> {
        match self {
            Outcome::Completed(report) if !report.is_empty() => Some(report),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.report().is_some() {
            EXIT_ACTIONABLE
        } else {
            EXIT_CLEAN
        }
    }
}

/// Write the report (if any) to `diagnostics` and return the exit code.
///
/// A failed write still yields the actionable status.
pub fn signal<W: Write>(outcome: &Outcome, diagnostics: &mut W) -> u8 {
    if let Some(report) = outcome.report() {
        let written = diagnostics
            .write_all(report.render().as_bytes())
            .and_then(|_| diagnostics.flush());
        if let Err(e) = written {
            warn!(error = %e, "Failed to write report");
        }
    }
    outcome.exit_code()
}
