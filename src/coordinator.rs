//! Version computation for a checkout.
//!
//! Tags and series branches are parsed once and registered in a
//! [VersionTree]; the branch nearest to the checkout is then resolved against
//! that tree to get the smallest unused version under its prefix.

use tracing::{debug, info, warn};

use crate::config::{Config, VersioningConfig};
use crate::domain::branch::{BranchClassifier, BranchRecord};
use crate::domain::matcher::BranchMatcher;
use crate::domain::pattern::NamePattern;
use crate::domain::tree::VersionTree;
use crate::error::Result;
use crate::git::Repository;
use crate::version::{pad_version, VersionTuple};

/// Outcome of a version computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedVersion {
    /// Dot-joined version without trailing zeros, or the unknown sentinel.
    pub version: String,
    /// The branch the version was allocated on, if one was found.
    pub active_branch: Option<String>,
    /// The branch the checkout reported as tracking.
    pub tracking_branch: String,
}

impl ComputedVersion {
    pub fn active_branch_name(&self) -> Option<&str> {
        self.active_branch.as_deref()
    }

    pub fn is_unknown(&self) -> bool {
        self.active_branch.is_none()
    }

    /// The version padded to four components. The unknown sentinel is
    /// returned as-is.
    pub fn padded(&self) -> String {
        if self.is_unknown() {
            self.version.clone()
        } else {
            pad_version(&self.version)
        }
    }
}

/// Every tag and series branch of a repository, registered for allocation.
#[derive(Debug, Clone)]
pub struct VersionIndex {
    tree: VersionTree,
    branches: Vec<BranchRecord>,
}

impl VersionIndex {
    pub fn tree(&self) -> &VersionTree {
        &self.tree
    }

    /// Known branches, oldest first.
    pub fn branches(&self) -> &[BranchRecord] {
        &self.branches
    }

    /// Allocates the next free version on `branch`, canonicalised.
    pub fn allocate(&self, branch: &BranchRecord) -> Result<VersionTuple> {
        Ok(self.tree.resolve_next(&branch.version)?.canonical())
    }
}

/// Computes versions from repository tags and branches.
#[derive(Debug, Clone)]
pub struct VersionCoordinator {
    versioning: VersioningConfig,
    tag_pattern: NamePattern,
    classifier: BranchClassifier,
}

impl VersionCoordinator {
    /// Builds a coordinator from loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::from_parts(
            config.versioning.clone(),
            config.patterns.tag_pattern()?,
            config.patterns.branch_pattern()?,
        ))
    }

    pub fn from_parts(
        versioning: VersioningConfig,
        tag_pattern: NamePattern,
        branch_pattern: NamePattern,
    ) -> Self {
        let classifier = BranchClassifier::new(
            branch_pattern,
            versioning.trunk_branches.clone(),
            versioning.trunk_version,
        );

        VersionCoordinator {
            versioning,
            tag_pattern,
            classifier,
        }
    }

    /// Parses `tags` and `branches` and registers every match.
    ///
    /// A branch's tree entry and its record come from the same
    /// classification, so every recorded branch can be resolved.
    pub fn index<T, B>(&self, tags: &[T], branches: &[B]) -> VersionIndex
    where
        T: AsRef<str>,
        B: AsRef<str>,
    {
        let mut tree = VersionTree::new();

        for tag in tags {
            if let Some(version) = self.tag_pattern.parse(tag.as_ref().trim()) {
                tree.insert(&version);
            }
        }

        let mut records = Vec::new();
        for branch in branches {
            if let Some(record) = self.classifier.classify(branch.as_ref().trim()) {
                tree.insert(&record.version);
                records.push(record);
            }
        }

        records.sort();
        records.dedup();
        debug!(branches = records.len(), "indexed series branches");

        VersionIndex {
            tree,
            branches: records,
        }
    }

    /// Computes the version for the checkout `repo` describes.
    ///
    /// # Returns
    /// * `Ok(ComputedVersion)` - The allocated version, or the unknown sentinel
    ///   when no active branch can be found
    /// * `Err` - If the repository cannot be queried
    pub fn compute<R: Repository + ?Sized>(&self, repo: &R) -> Result<ComputedVersion> {
        let tags = repo.list_tags()?;
        let branches = repo.list_remote_branches()?;
        let index = self.index(tags.as_slice(), branches.as_slice());

        let tracking_branch = repo.tracking_branch_name()?;
        let active = BranchMatcher::new(index.branches()).find_active(repo, &tracking_branch)?;

        let record = match active {
            Some(record) => record,
            None => {
                warn!(tracking = %tracking_branch, "no active branch, version is unknown");
                return Ok(ComputedVersion {
                    version: self.versioning.unknown_version.clone(),
                    active_branch: None,
                    tracking_branch,
                });
            }
        };

        let version = index.allocate(record)?;
        info!(branch = %record.name, version = %version, "allocated version");

        Ok(ComputedVersion {
            version: version.to_string(),
            active_branch: Some(record.name.clone()),
            tracking_branch,
        })
    }

    /// Computes just the version string.
    pub fn compute_version<R: Repository + ?Sized>(&self, repo: &R) -> Result<String> {
        Ok(self.compute(repo)?.version)
    }
}
