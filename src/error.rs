use thiserror::Error;

/// Unified error type for mkversion operations
#[derive(Error, Debug)]
pub enum MkVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version prefix '{}' was never registered in the version tree", dotted(.prefix))]
    UnregisteredPrefix { prefix: Vec<u32> },

    #[error("No version number left under prefix '{}'", dotted(.prefix))]
    VersionOverflow { prefix: Vec<u32> },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mkversion
pub type Result<T> = std::result::Result<T, MkVersionError>;

fn dotted(prefix: &[u32]) -> String {
    prefix
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

impl MkVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MkVersionError::Config(msg.into())
    }

    /// Create a snapshot error with context
    pub fn snapshot(msg: impl Into<String>) -> Self {
        MkVersionError::Snapshot(msg.into())
    }
}
