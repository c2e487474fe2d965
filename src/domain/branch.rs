use std::cmp::Ordering;

use crate::domain::pattern::NamePattern;
use crate::version::VersionTuple;

/// The two faces of a trunk branch.
///
/// Trunk allocates versions under the configured trunk version, but must sort
/// as the oldest branch when picking the nearest branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrunkValues {
    /// Tuple inserted into the version tree and resolved against it.
    pub tree_value: VersionTuple,
    /// Tuple used when ordering branch records.
    pub order_value: VersionTuple,
}

/// Returns the tree and ordering representations of a trunk branch.
pub fn trunk_values(trunk_version: u32) -> TrunkValues {
    TrunkValues {
        tree_value: VersionTuple::new(vec![trunk_version]),
        order_value: VersionTuple::empty(),
    }
}

/// A known remote branch that takes part in version allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    /// Prefix this branch allocates under.
    pub version: VersionTuple,
    /// Position among branches; empty for trunk.
    pub order: VersionTuple,
}

impl BranchRecord {
    pub fn is_trunk(&self) -> bool {
        self.order.is_empty()
    }
}

impl Ord for BranchRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for BranchRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Turns branch names into [`BranchRecord`]s, special-casing trunk branches.
#[derive(Debug, Clone)]
pub struct BranchClassifier {
    pattern: NamePattern,
    trunk_branches: Vec<String>,
    trunk: TrunkValues,
}

impl BranchClassifier {
    pub fn new(pattern: NamePattern, trunk_branches: Vec<String>, trunk_version: u32) -> Self {
        BranchClassifier {
            pattern,
            trunk_branches,
            trunk: trunk_values(trunk_version),
        }
    }

    pub fn is_trunk(&self, name: &str) -> bool {
        self.trunk_branches.iter().any(|trunk| trunk == name)
    }

    /// Classifies `name`, returning `None` for branches that are neither trunk
    /// nor series branches.
    pub fn classify(&self, name: &str) -> Option<BranchRecord> {
        if self.is_trunk(name) {
            return Some(BranchRecord {
                name: name.to_string(),
                version: self.trunk.tree_value.clone(),
                order: self.trunk.order_value.clone(),
            });
        }

        self.pattern.parse(name).map(|version| BranchRecord {
            name: name.to_string(),
            order: version.clone(),
            version,
        })
    }
}
