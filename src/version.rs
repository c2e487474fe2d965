use std::cmp::Ordering;
use std::fmt;

/// Maximum number of numeric components a tag or branch name may carry.
pub const MAX_COMPONENTS: usize = 4;

/// An ordered sequence of version components parsed from a tag or branch name.
///
/// Components are kept exactly as parsed: absent trailing groups are omitted,
/// never zero-filled. Ordering treats the shorter tuple as if it were padded
/// with zeros, falling back to length so that `[]` < `[0]` < `[0, 0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VersionTuple(Vec<u32>);

impl VersionTuple {
    /// Creates a tuple from its components.
    pub fn new(components: Vec<u32>) -> Self {
        VersionTuple(components)
    }

    /// The empty tuple, used to order trunk ahead of every series branch.
    pub fn empty() -> Self {
        VersionTuple(Vec::new())
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy of this tuple with `component` appended.
    pub fn with_component(&self, component: u32) -> Self {
        let mut components = self.0.clone();
        components.push(component);
        VersionTuple(components)
    }

    /// Strips trailing zero components, always keeping at least one component.
    ///
    /// `[1, 8, 0]` becomes `[1, 8]`, `[1, 0, 0]` becomes `[1]`, `[0]` stays `[0]`.
    pub fn canonical(mut self) -> Self {
        while self.0.len() > 1 && self.0.last() == Some(&0) {
            self.0.pop();
        }
        self
    }

    fn padded_component(&self, index: usize) -> u32 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl From<Vec<u32>> for VersionTuple {
    fn from(components: Vec<u32>) -> Self {
        VersionTuple(components)
    }
}

impl Ord for VersionTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.0.len().max(other.0.len());
        (0..width)
            .map(|i| self.padded_component(i).cmp(&other.padded_component(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.0.len().cmp(&other.0.len()))
    }
}

impl PartialOrd for VersionTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

/// Right-pads a dot-separated version string with `0` components until it has
/// exactly four components.
///
/// This is a pure string operation: components are not validated, and a string
/// that already has four or more components is returned unchanged.
///
/// # Example
/// ```
/// # use git_mkversion::version::pad_version;
/// assert_eq!(pad_version("1.8"), "1.8.0.0");
/// assert_eq!(pad_version("1.8.0.4"), "1.8.0.4");
/// ```
pub fn pad_version(version: &str) -> String {
    let mut parts: Vec<&str> = version.split('.').collect();
    while parts.len() < MAX_COMPONENTS {
        parts.push("0");
    }
    parts.join(".")
}
