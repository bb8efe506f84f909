//! Post-edit pipeline orchestration.

use crate::classify::{classifier_for, Classification};
use crate::outcome::Outcome;
use crate::report::AggregatedReport;
use crate::runner::{StageResult, StageRunner};
use crate::stage::{plan, StageConfig, StageKind};
use postedit_core::{
    absolutize, locate, profile, resolve, EditEvent, ProjectFs, ProjectRoot, ResolvedTarget,
    Settings, Skip, Step, ToolchainProfile,
};
use tracing::{debug, info};

/// Everything decided before any tool runs.
#[derive(Debug, Clone)]
pub struct PipelinePlan {
    pub target: ResolvedTarget,

    pub root: ProjectRoot,

    pub profile: ToolchainProfile,

    pub stages: Vec<StageConfig>,
}

/// Post-edit pipeline orchestrator.
pub struct PostEditPipeline;

impl PostEditPipeline {
    /// Resolve the target, filter it, locate its project and select the
    /// toolchain. Any step may short-circuit with a [`Skip`].
    pub fn prepare(event: &EditEvent, settings: &Settings, fs: &dyn ProjectFs) -> Step<PipelinePlan> {
        let target = resolve(event, fs)?;
        settings.exclusion_filter().check(&target)?;

        let fallback_dir = absolutize(&event.working_directory);
        let root = locate(target.parent_dir(), &fallback_dir, fs).ok_or(Skip::NoProject)?;
        let profile = profile::select(&root, &target, settings, fs)?;
        let stages = plan(&profile, &target.absolute_path, &root.root_path, settings);

        debug!(
            target = %target.absolute_path.display(),
            root = %root.root_path.display(),
            language = ?profile.language,
            stages = stages.len(),
            "Prepared post-edit pipeline"
        );

        Ok(PipelinePlan {
            target,
            root,
            profile,
            stages,
        })
    }

    /// Run every enabled stage in order and aggregate the failures.
    ///
    /// Stages that cannot be spawned or time out are logged at debug level
    /// and dropped; only lint and test findings reach the report.
    pub async fn execute(plan: &PipelinePlan) -> AggregatedReport {
        let mut results = Vec::new();

        for config in &plan.stages {
            if !config.enabled {
                info!(stage = %config.name(), "Skipping disabled stage");
                continue;
            }

            info!(stage = %config.name(), "Executing stage");

            let output = match StageRunner::execute(config).await {
                Ok(output) => output,
                // Internal errors stay below the default log level.
                Err(e) => {
                    debug!(error = %e, "Stage did not run");
                    continue;
                }
            };

            if config.kind == StageKind::Format && !output.succeeded() {
                debug!(
                    stage = %config.name(),
                    exit_code = output.exit_code,
                    "Formatter failed; ignoring"
                );
            }

            let classification = classifier_for(config.kind, config.tool.family).classify(&output);
            if classification == Classification::Failing {
                info!(stage = %config.name(), exit_code = output.exit_code, "Stage failed");
            }
            results.push(StageResult::from_output(config, &output, classification));
        }

        AggregatedReport::aggregate(&plan.target.absolute_path, &results)
    }

    /// Run the whole pipeline for one edit.
    pub async fn run(event: &EditEvent, settings: &Settings, fs: &dyn ProjectFs) -> Outcome {
        match Self::prepare(event, settings, fs) {
            Ok(plan) => Outcome::Completed(Self::execute(&plan).await),
            Err(skip) => {
                debug!(reason = %skip, "Nothing to verify");
                Outcome::Skipped(skip)
            }
        }
    }
}
