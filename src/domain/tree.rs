//! Occupancy tree of version numbers.
//!
//! Every parsed tag and series branch inserts its full tuple. A node stands
//! for all tuples sharing a prefix and remembers the greatest component seen
//! directly below it, which is what "next free number after this prefix"
//! queries need.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{MkVersionError, Result};
use crate::version::VersionTuple;

/// One prefix in the version tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionNode {
    max_child: Option<u32>,
    children: BTreeMap<u32, VersionNode>,
}

impl VersionNode {
    /// Greatest component registered directly below this prefix, if any.
    pub fn max_child(&self) -> Option<u32> {
        self.max_child
    }

    pub fn child(&self, component: u32) -> Option<&VersionNode> {
        self.children.get(&component)
    }

    /// Smallest component not yet used below this prefix, or `None` when
    /// `u32::MAX` is already taken.
    pub fn next_free(&self) -> Option<u32> {
        match self.max_child {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    fn child_mut(&mut self, component: u32) -> &mut VersionNode {
        if self.max_child.map_or(true, |max| component > max) {
            self.max_child = Some(component);
        }
        self.children.entry(component).or_default()
    }
}

/// Trie of every version tuple seen in the repository, rooted at the empty prefix.
#[derive(Debug, Clone, Default)]
pub struct VersionTree {
    root: VersionNode,
}

impl VersionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &VersionNode {
        &self.root
    }

    /// Registers every prefix of `tuple`. Inserting the same tuple again is a no-op.
    pub fn insert(&mut self, tuple: &VersionTuple) {
        let mut node = &mut self.root;
        for &component in tuple.components() {
            node = node.child_mut(component);
        }
        debug!(version = %tuple, "registered version in tree");
    }

    /// Looks up the node for `prefix`, if it was ever inserted.
    pub fn find(&self, prefix: &VersionTuple) -> Option<&VersionNode> {
        prefix
            .components()
            .iter()
            .try_fold(&self.root, |node, &component| node.child(component))
    }

    /// Allocates the next free version under `prefix`.
    ///
    /// Returns `prefix` extended by one component equal to the greatest
    /// component already registered under it plus one (or `0` when nothing is
    /// registered below it). The result is not canonicalised.
    ///
    /// # Errors
    /// * `UnregisteredPrefix` - If `prefix` is empty or was never inserted
    /// * `VersionOverflow` - If `u32::MAX` is already registered under `prefix`
    pub fn resolve_next(&self, prefix: &VersionTuple) -> Result<VersionTuple> {
        if prefix.is_empty() {
            return Err(MkVersionError::UnregisteredPrefix { prefix: Vec::new() });
        }

        let node = self
            .find(prefix)
            .ok_or_else(|| MkVersionError::UnregisteredPrefix {
                prefix: prefix.components().to_vec(),
            })?;

        let next = node
            .next_free()
            .ok_or_else(|| MkVersionError::VersionOverflow {
                prefix: prefix.components().to_vec(),
            })?;

        Ok(prefix.with_component(next))
    }
}
