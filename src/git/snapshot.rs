//! Repository state captured as text.
//!
//! Lets a build reproduce a version computation offline from the output of
//! `git tag --list` and `git branch --all`, e.g. in CI jobs without the
//! repository at hand or when debugging an unexpected version.

use std::fs;
use std::path::Path;

use crate::error::{MkVersionError, Result};
use crate::git::Repository;

/// A point-in-time listing of tags and remote branches.
///
/// History is not part of a snapshot, so only exact tracking-branch matches
/// can be resolved against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRepository {
    tags: Vec<String>,
    remote_branches: Vec<String>,
    tracking_branch: String,
}

impl SnapshotRepository {
    /// Builds a snapshot from `git tag --list` and `git branch --all` output.
    pub fn from_listings(tag_listing: &str, branch_listing: &str, tracking_branch: &str) -> Self {
        let tags = tag_listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        SnapshotRepository {
            tags,
            remote_branches: parse_branch_listing(branch_listing),
            tracking_branch: tracking_branch.trim().to_string(),
        }
    }

    /// Reads the two listings from files.
    pub fn from_files(
        tags_path: impl AsRef<Path>,
        branches_path: impl AsRef<Path>,
        tracking_branch: &str,
    ) -> Result<Self> {
        let tags_path = tags_path.as_ref();
        let branches_path = branches_path.as_ref();

        let tag_listing = fs::read_to_string(tags_path).map_err(|e| {
            MkVersionError::snapshot(format!("Cannot read {}: {}", tags_path.display(), e))
        })?;
        let branch_listing = fs::read_to_string(branches_path).map_err(|e| {
            MkVersionError::snapshot(format!("Cannot read {}: {}", branches_path.display(), e))
        })?;

        if tracking_branch.trim().is_empty() {
            return Err(MkVersionError::snapshot(
                "A tracking branch name is required in snapshot mode",
            ));
        }

        Ok(Self::from_listings(
            &tag_listing,
            &branch_listing,
            tracking_branch,
        ))
    }
}

/// Extracts remote branch names from `git branch --all` output.
fn parse_branch_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(|line| line.trim_start_matches('*').trim())
        .filter(|line| !line.is_empty() && !line.contains(" -> "))
        .filter(|line| line.contains('/'))
        .map(|line| line.strip_prefix("remotes/").unwrap_or(line).to_string())
        .collect()
}

impl Repository for SnapshotRepository {
    fn list_remote_branches(&self) -> Result<Vec<String>> {
        Ok(self.remote_branches.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn tracking_branch_name(&self) -> Result<String> {
        Ok(self.tracking_branch.clone())
    }

    fn commit_distance(
        &self,
        _from: &str,
        _to: &str,
        _limit: Option<usize>,
    ) -> Result<Option<usize>> {
        Ok(None)
    }
}
