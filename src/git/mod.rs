//! Version-control collaborators
//!
//! The version algorithm never talks to git directly. It asks a [Repository]
//! for the names it needs and for commit distances between revisions.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: a real repository, read through the `git2` crate
//! - [snapshot::SnapshotRepository]: captured `git tag` / `git branch --all` output
//! - [mock::MockRepository]: an in-memory repository for tests
//!
//! # Usage
//!
//! ```rust
//! # use git_mkversion::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tracking = repo.tracking_branch_name()?;
//! let ahead = repo.commit_distance("origin/master", &tracking, None)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;
pub mod snapshot;

pub use mock::MockRepository;
pub use repository::Git2Repository;
pub use snapshot::SnapshotRepository;

use crate::error::Result;

/// Name reported when the checkout does not follow any branch.
pub const DETACHED_HEAD: &str = "HEAD";

/// Read-only view of a repository's tags, branches and history.
pub trait Repository {
    /// Names of all remote branches (e.g. "origin/1.8.next"), in no particular order.
    fn list_remote_branches(&self) -> Result<Vec<String>>;

    /// Names of all tags (e.g. "v1.8.0.1GA").
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Name of the branch the current checkout tracks.
    ///
    /// Falls back to [DETACHED_HEAD] when the checkout has no upstream.
    fn tracking_branch_name(&self) -> Result<String>;

    /// Counts commits reachable from `to` but not from `from`.
    ///
    /// When `limit` is given, counting stops once `limit` commits were seen
    /// and `limit` is returned.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - The (possibly capped) distance
    /// * `Ok(None)` - If either revision cannot be resolved to a commit
    /// * `Err` - If the history walk itself fails
    fn commit_distance(&self, from: &str, to: &str, limit: Option<usize>)
        -> Result<Option<usize>>;
}
