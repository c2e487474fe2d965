//! Domain logic - pure version allocation rules independent of git operations

pub mod branch;
pub mod matcher;
pub mod pattern;
pub mod tree;

pub use branch::{trunk_values, BranchClassifier, BranchRecord, TrunkValues};
pub use matcher::BranchMatcher;
pub use pattern::NamePattern;
pub use tree::{VersionNode, VersionTree};
