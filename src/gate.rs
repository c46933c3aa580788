//! The publish gate: version resolution, idempotency check, step execution.

use crate::clock::Clock;
use crate::config::{StepsConfig, VersionConfig};
use crate::domain::{
    resolve_version, PublishDecision, ReportedVersion, ResolvedVersion, TagPattern,
};
use crate::error::{GateError, Result};
use crate::git::{self, Repository};
use crate::index::PackageIndex;
use crate::steps::{StepContext, StepKind, StepRunner};

/// A step the gate ran, or would run in dry-run mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub kind: StepKind,
    pub command: String,
}

/// Result of a gate run that did not fail
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub decision: PublishDecision,
    pub steps: Vec<PlannedStep>,
    pub dry_run: bool,
}

/// Decides whether the current build gets published
pub struct PublishGate<'a> {
    repo: &'a dyn Repository,
    index: &'a dyn PackageIndex,
    clock: &'a dyn Clock,
    pattern: TagPattern,
    dev_marker: String,
}

impl<'a> PublishGate<'a> {
    pub fn new(
        repo: &'a dyn Repository,
        index: &'a dyn PackageIndex,
        clock: &'a dyn Clock,
        config: &VersionConfig,
    ) -> Result<Self> {
        Ok(PublishGate {
            repo,
            index,
            clock,
            pattern: TagPattern::new(config.tag_pattern.clone())?,
            dev_marker: config.dev_marker.clone(),
        })
    }

    /// Resolve the version to publish without touching the index
    pub fn resolve(&self, reported: &ReportedVersion) -> Result<ResolvedVersion> {
        let tag_match = git::is_exact_tag_match(self.repo, &self.pattern, reported.as_str())?;
        if !tag_match {
            match git::head_release_versions(self.repo, &self.pattern) {
                Ok(on_head) if !on_head.is_empty() => log::warn!(
                    "HEAD is tagged {} but the reported version is {}",
                    on_head.join(", "),
                    reported
                ),
                Ok(_) => {}
                Err(e) => log::debug!("Cannot list release tags on HEAD: {}", e),
            }
        }

        resolve_version(reported, tag_match, &self.dev_marker, self.clock)
    }

    /// Resolve, then check the index.
    ///
    /// An invalid version short-circuits before the index is queried.
    pub fn evaluate(&self, reported: &ReportedVersion) -> Result<PublishDecision> {
        let resolved = match self.resolve(reported) {
            Ok(resolved) => resolved,
            Err(GateError::InvalidVersion(msg)) => {
                log::error!("{}", msg);
                return Ok(PublishDecision::FailInvalidVersion(reported.clone()));
            }
            Err(e) => return Err(e),
        };

        if self.index.is_published(&resolved.version)? {
            log::info!(
                "{} {} has already been released",
                self.index.package(),
                resolved
            );
            Ok(PublishDecision::SkipAlreadyPublished(resolved))
        } else {
            Ok(PublishDecision::Proceed(resolved))
        }
    }

    /// Evaluate and run the steps matching the decision.
    ///
    /// - `Proceed`: build steps, then upload steps; the first failure aborts.
    /// - `SkipAlreadyPublished`: install-existing steps only.
    /// - `FailInvalidVersion`: returns [GateError::InvalidVersion], nothing runs.
    pub fn run(
        &self,
        reported: &ReportedVersion,
        steps: &StepsConfig,
        runner: &dyn StepRunner,
        dry_run: bool,
    ) -> Result<GateOutcome> {
        let decision = self.evaluate(reported)?;

        let plan = match &decision {
            PublishDecision::FailInvalidVersion(v) => {
                return Err(GateError::invalid_version(format!(
                    "Refusing to publish. {} does not contain '{}'",
                    v, self.dev_marker
                )));
            }
            PublishDecision::Proceed(_) => plan_steps(&[
                (StepKind::Build, &steps.build),
                (StepKind::Upload, &steps.upload),
            ]),
            PublishDecision::SkipAlreadyPublished(_) => {
                plan_steps(&[(StepKind::InstallExisting, &steps.install_existing)])
            }
        };

        if !dry_run {
            if let Some(resolved) = decision.resolved() {
                for step in &plan {
                    let context = StepContext::new(step.kind, resolved, self.index.package());
                    runner.run(&step.command, &context)?;
                }
            }
        }

        Ok(GateOutcome {
            decision,
            steps: plan,
            dry_run,
        })
    }
}

fn plan_steps(phases: &[(StepKind, &Vec<String>)]) -> Vec<PlannedStep> {
    phases
        .iter()
        .flat_map(|(kind, commands)| {
            commands.iter().map(move |command| PlannedStep {
                kind: *kind,
                command: command.clone(),
            })
        })
        .collect()
}
