//! postedit CI - verification stages for a freshly edited file
//!
//! Provides the execution half of the post-edit pipeline:
//! - Plans format, lint and test stages for a toolchain profile
//! - Runs each stage as a child process in the project root
//! - Classifies tool output and aggregates failures into one report
//! - Maps the report to the caller's exit-code contract

pub mod classify;
pub mod outcome;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod stage;

// Re-export key types
pub use classify::{classifier_for, Classification, Classifier, FailureSignature};
pub use outcome::{signal, Outcome, EXIT_ACTIONABLE, EXIT_CLEAN};
pub use pipeline::{PipelinePlan, PostEditPipeline};
pub use report::{AggregatedReport, ReportBlock};
pub use runner::{StageError, StageOutput, StageResult, StageRunner};
pub use stage::{StageConfig, StageKind};
