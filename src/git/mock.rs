use crate::error::Result;
use crate::git::{Repository, DETACHED_HEAD};
use std::cell::RefCell;
use std::collections::HashMap;

/// A recorded `commit_distance` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceQuery {
    pub from: String,
    pub to: String,
    pub limit: Option<usize>,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<String>,
    remote_branches: Vec<String>,
    tracking_branch: Option<String>,
    distances: HashMap<(String, String), usize>,
    queries: RefCell<Vec<DistanceQuery>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            remote_branches: Vec::new(),
            tracking_branch: None,
            distances: HashMap::new(),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Add a remote branch
    pub fn add_remote_branch(&mut self, name: impl Into<String>) {
        self.remote_branches.push(name.into());
    }

    /// Set the branch the checkout tracks
    pub fn set_tracking_branch(&mut self, name: impl Into<String>) {
        self.tracking_branch = Some(name.into());
    }

    /// Set the number of commits on `to` that `from` lacks
    pub fn set_distance(&mut self, from: impl Into<String>, to: impl Into<String>, distance: usize) {
        self.distances.insert((from.into(), to.into()), distance);
    }

    /// Every distance query made so far, in call order
    pub fn distance_queries(&self) -> Vec<DistanceQuery> {
        self.queries.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_remote_branches(&self) -> Result<Vec<String>> {
        Ok(self.remote_branches.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn tracking_branch_name(&self) -> Result<String> {
        Ok(self
            .tracking_branch
            .clone()
            .unwrap_or_else(|| DETACHED_HEAD.to_string()))
    }

    fn commit_distance(
        &self,
        from: &str,
        to: &str,
        limit: Option<usize>,
    ) -> Result<Option<usize>> {
        self.queries.borrow_mut().push(DistanceQuery {
            from: from.to_string(),
            to: to.to_string(),
            limit,
        });

        let distance = self
            .distances
            .get(&(from.to_string(), to.to_string()))
            .copied();
        Ok(distance.map(|d| limit.map_or(d, |cap| d.min(cap))))
    }
}
