use regex::Regex;
use tracing::debug;

use crate::error::{MkVersionError, Result};
use crate::version::VersionTuple;

// Nested optional groups: a component can only be present when every
// component before it is present too.
const NUMERIC_GROUPS: &str = r"(\d+)(?:\.(\d+)(?:\.(\d+)(?:\.(\d+))?)?)?";

/// Matches tag or branch names of the shape `<prefix>M[.m[.p[.h]]]<suffix>`.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    /// Tag pattern: literal `prefix`, 1-4 dot-separated integers, literal `suffix`.
    ///
    /// Example: prefix="v", suffix="GA" matches "v1GA" and "v1.8.0.3GA".
    pub fn tag(prefix: &str, suffix: &str) -> Result<Self> {
        Self::compile(&format!(
            "^{}{}{}$",
            regex::escape(prefix),
            NUMERIC_GROUPS,
            regex::escape(suffix)
        ))
    }

    /// Branch pattern: any path prefix ending in `/` (or none), 1-4
    /// dot-separated integers, then any one of the literal `suffixes`.
    ///
    /// Example: suffixes=[".next", ".x"] matches "origin/1.8.next" and "1.x".
    ///
    /// # Errors
    /// A config error if `suffixes` is empty or holds an empty entry, since
    /// that would read every versioned name as a series branch.
    pub fn branch<S: AsRef<str>>(suffixes: &[S]) -> Result<Self> {
        if suffixes.is_empty() {
            return Err(MkVersionError::config(
                "branch_suffixes must list at least one suffix",
            ));
        }
        if suffixes.iter().any(|suffix| suffix.as_ref().is_empty()) {
            return Err(MkVersionError::config(
                "branch_suffixes must not contain an empty suffix",
            ));
        }

        let alternatives = suffixes
            .iter()
            .map(|suffix| regex::escape(suffix.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        Self::compile(&format!(
            "^(?:.*/)?{}(?:{})$",
            NUMERIC_GROUPS, alternatives
        ))
    }

    fn compile(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| MkVersionError::config(format!("Invalid name pattern: {}", e)))?;
        Ok(NamePattern { regex })
    }

    /// Parses `name` into the numeric groups it carries.
    ///
    /// Returns `None` when the name does not have the expected shape, or when
    /// a component does not fit in a `u32`. Callers ignore such names.
    pub fn parse(&self, name: &str) -> Option<VersionTuple> {
        let captures = match self.regex.captures(name) {
            Some(captures) => captures,
            None => {
                debug!(name, "ignoring name that does not match pattern");
                return None;
            }
        };

        let mut components = Vec::with_capacity(4);
        for group in captures.iter().skip(1).flatten() {
            match group.as_str().parse::<u32>() {
                Ok(n) => components.push(n),
                Err(_) => {
                    debug!(name, "ignoring name with out-of-range component");
                    return None;
                }
            }
        }

        Some(VersionTuple::new(components))
    }
}
