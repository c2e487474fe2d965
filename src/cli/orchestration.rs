//! Version workflow orchestration
//!
//! Connects CLI arguments, configuration and a repository collaborator to
//! the [VersionCoordinator]. Kept apart from `main.rs` so the workflow can
//! be driven programmatically without depending on clap.

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::coordinator::{ComputedVersion, VersionCoordinator};
use crate::git::{Git2Repository, Repository, SnapshotRepository};

/// Arguments for the version workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionWorkflowArgs {
    /// Repository to inspect (discovered upwards from here)
    pub repo_path: Option<String>,

    /// Tracking branch to use instead of the checkout's upstream
    pub branch: Option<String>,

    /// `git tag --list` output for offline mode
    pub tags_file: Option<String>,

    /// `git branch --all` output for offline mode
    pub branches_file: Option<String>,

    /// Report the four-component padded version
    pub pad: bool,
}

/// Result of a version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The version to print, padded if requested
    pub version: String,

    /// Full computation outcome
    pub computed: ComputedVersion,

    /// Non-fatal issues to show the user
    pub warnings: Vec<BoundaryWarning>,
}

/// Delegates to a repository but reports a fixed tracking branch.
pub struct TrackingOverride<'a, R: Repository + ?Sized> {
    inner: &'a R,
    branch: String,
}

impl<'a, R: Repository + ?Sized> TrackingOverride<'a, R> {
    pub fn new(inner: &'a R, branch: impl Into<String>) -> Self {
        TrackingOverride {
            inner,
            branch: branch.into(),
        }
    }
}

impl<R: Repository + ?Sized> Repository for TrackingOverride<'_, R> {
    fn list_remote_branches(&self) -> crate::Result<Vec<String>> {
        self.inner.list_remote_branches()
    }

    fn list_tags(&self) -> crate::Result<Vec<String>> {
        self.inner.list_tags()
    }

    fn tracking_branch_name(&self) -> crate::Result<String> {
        Ok(self.branch.clone())
    }

    fn commit_distance(
        &self,
        from: &str,
        to: &str,
        limit: Option<usize>,
    ) -> crate::Result<Option<usize>> {
        self.inner.commit_distance(from, to, limit)
    }
}

/// Main version workflow
///
/// 1. Build the coordinator from configuration
/// 2. Open the repository, or the offline snapshot
/// 3. Compute the version for the tracking branch
/// 4. Collect warnings and pad the output if requested
pub fn run_version_workflow(args: &VersionWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let coordinator =
        VersionCoordinator::new(config).context("Invalid naming patterns in configuration")?;

    let computed = match (&args.tags_file, &args.branches_file) {
        (Some(tags_file), Some(branches_file)) => {
            let branch = match &args.branch {
                Some(branch) => branch,
                None => bail!("Offline mode needs --branch to name the tracking branch"),
            };
            debug!(tags_file = %tags_file, branches_file = %branches_file, "computing version from snapshot");
            let snapshot = SnapshotRepository::from_files(tags_file, branches_file, branch)?;
            coordinator.compute(&snapshot)?
        }
        (None, None) => {
            let path = args.repo_path.as_deref().unwrap_or(".");
            let repo = Git2Repository::open(path)
                .with_context(|| format!("Not in a git repository: {}", path))?;
            match &args.branch {
                Some(branch) => coordinator.compute(&TrackingOverride::new(&repo, branch.as_str()))?,
                None => coordinator.compute(&repo)?,
            }
        }
        _ => bail!("--tags-file and --branches-file must be given together"),
    };

    Ok(finish(computed, args.pad))
}

/// Computes the version from an already-open collaborator.
pub fn run_with_repository<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    pad: bool,
) -> Result<WorkflowResult> {
    let coordinator = VersionCoordinator::new(config)?;
    let computed = coordinator.compute(repo)?;
    Ok(finish(computed, pad))
}

fn finish(computed: ComputedVersion, pad: bool) -> WorkflowResult {
    let version = if pad {
        computed.padded()
    } else {
        computed.version.clone()
    };

    WorkflowResult {
        version,
        warnings: BoundaryWarning::for_result(&computed),
        computed,
    }
}
