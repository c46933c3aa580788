//! Workflow orchestration behind the CLI subcommands
//!
//! Wires the configuration to the real collaborators (git2 repository,
//! status endpoint, HTTP package index, shell executor) and hands them to
//! the [PublishGate]. Kept apart from clap so it can be called directly.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::clock::SystemClock;
use crate::config::{self, Config};
use crate::domain::{ReportedVersion, ResolvedVersion};
use crate::gate::{GateOutcome, PublishGate};
use crate::git::Git2Repository;
use crate::index::{self, HttpIndex, PackageIndex};
use crate::status::{StaticVersion, StatusClient, VersionSource};
use crate::steps::ShellExecutor;

/// Arguments shared by the workflow entry points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Skip the status endpoint and use this version
    pub reported_version: Option<String>,

    /// Preview mode - don't run build/upload steps
    pub dry_run: bool,
}

/// Result of an idempotency check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub package: String,
    pub version: String,
    pub url: String,
    pub published: bool,
}

/// Loads the configuration named by the arguments
pub fn load(args: &PublishWorkflowArgs) -> Result<Config> {
    config::load_config(args.config_path.as_deref()).context("Error loading config")
}

/// The reported version, from the CLI override or the status endpoint
pub fn reported_version(args: &PublishWorkflowArgs, config: &Config) -> Result<ReportedVersion> {
    let version = match &args.reported_version {
        Some(v) => StaticVersion(v.clone()).reported_version()?,
        None => {
            let timeout = Duration::from_secs(config.status.timeout_secs);
            StatusClient::new(&config.status, timeout)?
                .reported_version()
                .with_context(|| format!("Cannot read version from {}", config.status.url))?
        }
    };
    Ok(version)
}

/// Resolve the version for the current checkout without contacting the index
pub fn run_resolve(args: &PublishWorkflowArgs) -> Result<ResolvedVersion> {
    let config = load(args)?;
    let index = HttpIndex::new(&config.index)?;
    resolve_current(args, &config, &index)
}

/// Check whether a version is already in the index.
///
/// `version` is checked verbatim when given; otherwise the current checkout's
/// version is resolved first.
pub fn run_check(args: &PublishWorkflowArgs, version: Option<&str>) -> Result<CheckResult> {
    let config = load(args)?;
    let index = HttpIndex::new(&config.index)?;

    let version = match version {
        Some(v) => v.to_string(),
        None => resolve_current(args, &config, &index)?.version,
    };

    let published = index.is_published(&version)?;

    Ok(CheckResult {
        package: index.package().to_string(),
        url: index::version_url(&config.index, &version)?,
        version,
        published,
    })
}

fn resolve_current(
    args: &PublishWorkflowArgs,
    config: &Config,
    index: &dyn PackageIndex,
) -> Result<ResolvedVersion> {
    let reported = reported_version(args, config)?;

    let repo = Git2Repository::open(".").context("Not in a git repository")?;
    let gate = PublishGate::new(&repo, index, &SystemClock, &config.version)?;

    Ok(gate.resolve(&reported)?)
}

/// Main publish workflow
///
/// 1. Load configuration
/// 2. Read the reported version
/// 3. Resolve it against the tag on HEAD
/// 4. Check the package index
/// 5. Run install-existing, or build and upload steps
pub fn run_publish_workflow(args: &PublishWorkflowArgs) -> Result<GateOutcome> {
    let config = load(args)?;
    let reported = reported_version(args, &config)?;

    let repo = Git2Repository::open(".").context("Not in a git repository")?;
    let index = HttpIndex::new(&config.index)?;
    let gate = PublishGate::new(&repo, &index, &SystemClock, &config.version)?;

    let outcome = gate.run(&reported, &config.steps, &ShellExecutor, args.dry_run)?;
    Ok(outcome)
}
