use crate::error::Result;
use crate::git::DETACHED_HEAD;
use git2::{Branch, BranchType, ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;
use tracing::{debug, warn};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Resolves a revision to a commit, or `None` if it names nothing.
    fn resolve_commit(&self, rev: &str) -> Result<Option<Oid>> {
        let object = match self.repo.revparse_single(rev) {
            Ok(object) => object,
            Err(e) if is_unresolvable(&e) => {
                debug!(rev, error = %e, "revision does not resolve");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match object.peel_to_commit() {
            Ok(commit) => Ok(Some(commit.id())),
            Err(e) => {
                warn!(rev, error = %e, "revision does not point at a commit");
                Ok(None)
            }
        }
    }
}

fn is_unresolvable(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::UnbornBranch | ErrorCode::Ambiguous
    )
}

impl super::Repository for Git2Repository {
    fn list_remote_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                // "origin/HEAD" is a symbolic pointer, not a branch of its own
                if !name.ends_with("/HEAD") {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn tracking_branch_name(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if is_unresolvable(&e) => return Ok(DETACHED_HEAD.to_string()),
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Ok(DETACHED_HEAD.to_string());
        }

        let upstream = match Branch::wrap(head).upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!("checked-out branch has no upstream");
                return Ok(DETACHED_HEAD.to_string());
            }
            Err(e) => return Err(e.into()),
        };

        let name = upstream.name()?.unwrap_or(DETACHED_HEAD).to_string();
        if !upstream.get().is_remote() {
            // Never a series branch; the matcher falls back to distances.
            debug!(upstream = %name, "upstream is a local branch");
        }
        Ok(name)
    }

    fn commit_distance(
        &self,
        from: &str,
        to: &str,
        limit: Option<usize>,
    ) -> Result<Option<usize>> {
        let (from_oid, to_oid) = match (self.resolve_commit(from)?, self.resolve_commit(to)?) {
            (Some(from_oid), Some(to_oid)) => (from_oid, to_oid),
            _ => return Ok(None),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut count = 0;
        for oid in revwalk {
            oid?;
            count += 1;
            if limit.map_or(false, |cap| count >= cap) {
                break;
            }
        }

        Ok(Some(count))
    }
}
